use clap::Parser;
use volforce_calc::sdvx::{
    rating::rank_band,
    required_score::min_score_for_target,
    schema::{ClearMark, DifficultyConstant, DisplayRating},
};

#[derive(Parser)]
struct Opts {
    /// Display rating to reach, e.g. `38.5`.
    target: DisplayRating,
    constant: DifficultyConstant,
    mark: ClearMark,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    match min_score_for_target(opts.target, opts.constant, opts.mark) {
        Some(score) => println!("{} ({})", score.with_separators(), rank_band(score).label()),
        None => println!(
            "{} is unreachable on {} with {}",
            opts.target, opts.constant, opts.mark
        ),
    }
    Ok(())
}
