use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use enum_iterator::all;
use itertools::Itertools;
use serde::Serialize;
use volforce_calc::sdvx::{
    config::EngineConfig,
    rating_table::{generate_level_tables, generate_table, RatingTableRow, TableColumn},
    schema::{DifficultyConstant, DifficultyLevel, Score},
};
use volforce_calc_utils::fs_json_util::{read_toml_or_default, write_json};

#[derive(Parser)]
struct Opts {
    /// Difficulty constant, e.g. `18.4`.
    #[arg(conflicts_with = "level")]
    constant: Option<DifficultyConstant>,
    /// Prints one table per constant of this level instead.
    #[arg(long)]
    level: Option<DifficultyLevel>,
    #[arg(long = "config")]
    config_path: Option<PathBuf>,
    #[arg(long = "json")]
    json_path: Option<PathBuf>,
}

#[derive(Serialize)]
struct Table {
    constant: DifficultyConstant,
    rows: Vec<RatingTableRow>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    let config: EngineConfig = read_toml_or_default(opts.config_path.as_deref())?;

    let tables = match (opts.constant, opts.level) {
        (Some(constant), _) => vec![(constant, generate_table(constant, &config.table()))],
        (None, Some(level)) => generate_level_tables(level, &config.table()),
        (None, None) => bail!("Specify either a constant or --level"),
    };
    for (constant, rows) in &tables {
        print_table(*constant, rows);
    }

    if let Some(path) = opts.json_path {
        let tables = tables
            .into_iter()
            .map(|(constant, rows)| Table { constant, rows })
            .collect_vec();
        write_json(path, &tables)?;
    }
    Ok(())
}

fn print_table(constant: DifficultyConstant, rows: &[RatingTableRow]) {
    println!("==== {constant} ====");
    let header = all::<TableColumn>()
        .map(|column| format!("{:>12}", column.header()))
        .join("");
    println!("{:>6}{header}", "VF");
    for row in rows {
        if row.gap_before() {
            println!("{:>6}", "...");
        }
        let cells = all::<TableColumn>()
            .map(|column| {
                let cell = row
                    .score(column)
                    .map_or_else(|| "-".to_owned(), Score::with_separators);
                format!("{cell:>12}")
            })
            .join("");
        let tag = if row.is_puc_row() { "  PUC" } else { "" };
        println!("{:>6}{cells}{tag}", row.target());
    }
    println!();
}
