use std::{fmt::Display, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use lazy_format::lazy_format;
use log::info;
use serde::Serialize;
use volforce_calc::sdvx::{
    config::EngineConfig,
    grade::GradeTier,
    next_target::{next_targets, Suggestion},
    rating::{compute_rating, rank_band, Rating},
    schema::{ClearMark, DifficultyConstant, Score},
};
use volforce_calc_utils::fs_json_util::{read_toml_or_default, write_json};

#[derive(Parser)]
struct Opts {
    /// Difficulty constant, e.g. `18.4`.
    constant: DifficultyConstant,
    score: Score,
    /// One of EF, EX, MXV, UC, PUC. May be omitted for a perfect score.
    #[arg(long)]
    mark: Option<ClearMark>,
    #[arg(long = "config")]
    config_path: Option<PathBuf>,
    #[arg(long = "json")]
    json_path: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report {
    constant: DifficultyConstant,
    score: Score,
    mark: ClearMark,
    rating: Rating,
    rank: &'static str,
    grade: GradeTier,
    next_targets: Vec<Suggestion>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    let config: EngineConfig = read_toml_or_default(opts.config_path.as_deref())?;

    let score = opts.score;
    let mark = opts
        .mark
        .or((score == Score::MAX).then_some(ClearMark::PUC))
        .context("--mark is required unless the score is 10,000,000")?;
    let coerced = mark.coerce_for(score);
    if coerced != mark {
        info!("Treating {mark} at {score} as {coerced}");
    }
    let mark = coerced;

    let rating = compute_rating(opts.constant, score, mark);
    let grade = GradeTier::of(rating.display());
    let rank = rank_band(score).label();
    println!("{} / {} / {mark}", opts.constant, score.with_separators());
    println!("Rating: {:.6} ({})", rating.raw(), rating.display());
    println!("Rank:   {rank}");
    println!("Grade:  {}", grade.name());

    let suggestions = next_targets(opts.constant, score, mark, &config.next_target());
    if suggestions.is_empty() {
        println!("Already at the maximum rating of this chart.");
    } else {
        println!("Next targets:");
        for &suggestion in &suggestions {
            println!("  {}", show_suggestion(suggestion));
        }
    }

    if let Some(path) = opts.json_path {
        let report = Report {
            constant: opts.constant,
            score,
            mark,
            rating,
            rank,
            grade,
            next_targets: suggestions,
        };
        write_json(path, &report)?;
    }
    Ok(())
}

fn show_suggestion(suggestion: Suggestion) -> impl Display {
    lazy_format!(
        "{:<20} {} (+{})",
        suggestion.label(),
        suggestion.rating(),
        suggestion.gain()
    )
}
