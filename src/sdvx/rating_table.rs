use enum_iterator::Sequence;
use enum_map::{Enum, EnumMap};
use getset::{CopyGetters, Getters};
use itertools::Itertools;
use log::{debug, trace};
use serde::Serialize;

use super::{
    config::TableConfig,
    rating::{gauge_coef, single_play_rating_precise, RankCoefficient, RatingPrecise, RANK_BANDS},
    required_score::min_score_for_target,
    schema::{ClearMark, DifficultyConstant, DifficultyLevel, DisplayRating, Score},
};

/// Rank coefficient assumed for the lowest row of a table, before the margin is applied.
pub const TABLE_FLOOR_RANK_COEF: RankCoefficient = RankCoefficient::new(97);

/// Rows further apart than this (in hundredths) are separated by a gap.
const GAP_THRESHOLD: u16 = 15;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Enum, Sequence, Serialize)]
pub enum TableColumn {
    EF,
    EX,
    MXV,
    /// UC if reachable, PUC otherwise.
    UltimateChain,
}

impl TableColumn {
    pub fn header(self) -> &'static str {
        use TableColumn::*;
        match self {
            EF => "EF",
            EX => "EX",
            MXV => "MXV",
            UltimateChain => "UC/PUC",
        }
    }

    fn solve(self, target: DisplayRating, constant: DifficultyConstant) -> Option<Score> {
        use TableColumn::*;
        let solve = |mark| min_score_for_target(target, constant, mark);
        match self {
            EF => solve(ClearMark::EF),
            EX => solve(ClearMark::EX),
            MXV => solve(ClearMark::MXV),
            UltimateChain => solve(ClearMark::UC).or_else(|| solve(ClearMark::PUC)),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, CopyGetters, Getters, Serialize)]
pub struct RatingTableRow {
    #[getset(get_copy = "pub")]
    target: DisplayRating,
    #[getset(get = "pub")]
    scores: EnumMap<TableColumn, Option<Score>>,
    /// At least one 0.1 step between the previous row and this one has no breakpoint.
    #[getset(get_copy = "pub")]
    gap_before: bool,
}

impl RatingTableRow {
    pub fn score(&self, column: TableColumn) -> Option<Score> {
        self.scores[column]
    }

    pub fn is_empty(&self) -> bool {
        self.scores.values().all(Option::is_none)
    }

    /// Only a perfect score reaches this row in the UC/PUC column.
    pub fn is_puc_row(&self) -> bool {
        self.scores[TableColumn::UltimateChain] == Some(Score::MAX)
    }
}

/// `floor(constant * 2 * 1.05 * 1.10)`: a PUC.
pub fn table_upper_bound(constant: DifficultyConstant) -> DisplayRating {
    single_play_rating_precise(
        constant,
        Score::MAX,
        RANK_BANDS[0].coefficient(),
        gauge_coef(ClearMark::PUC),
    )
    .to_display()
}

/// `floor(constant * 2 * 0.97 * 1.00 * margin)`.
pub fn table_lower_bound(constant: DifficultyConstant, config: &TableConfig) -> DisplayRating {
    let base = single_play_rating_precise(
        constant,
        Score::MAX,
        TABLE_FLOOR_RANK_COEF,
        gauge_coef(ClearMark::EF),
    );
    RatingPrecise::from(base.get() * u64::from(config.lower_margin()) / 100).to_display()
}

/// Minimum score per column for every reachable rating of `constant`, highest rating first.
///
/// A score already listed in a higher row of the same column is blanked out, since reaching
/// that row implies this one; rows left without any score are dropped.
pub fn generate_table(constant: DifficultyConstant, config: &TableConfig) -> Vec<RatingTableRow> {
    let upper = table_upper_bound(constant);
    let lower = table_lower_bound(constant, config);
    debug!("Generating table for {constant}: {upper} down to {lower}");

    let mut rows = (lower.get()..=upper.get())
        .rev()
        .map(DisplayRating::from)
        .map(|target| RatingTableRow {
            target,
            scores: EnumMap::from_fn(|column: TableColumn| column.solve(target, constant)),
            gap_before: false,
        })
        .filter(|row| !row.is_empty())
        .collect_vec();
    remove_repeated_scores(&mut rows);
    rows.retain(|row| !row.is_empty());
    mark_gaps(&mut rows);
    debug!("{} rows for {constant}", rows.len());
    rows
}

/// Tables for every constant of `level`, in ascending order of constant.
pub fn generate_level_tables(
    level: DifficultyLevel,
    config: &TableConfig,
) -> Vec<(DifficultyConstant, Vec<RatingTableRow>)> {
    level
        .constants()
        .map(|constant| (constant, generate_table(constant, config)))
        .collect()
}

/// `rows` must be sorted by descending target.
fn remove_repeated_scores(rows: &mut [RatingTableRow]) {
    let mut last_seen = EnumMap::<TableColumn, Option<Score>>::default();
    for row in rows {
        for (column, score) in &mut row.scores {
            let Some(s) = *score else { continue };
            if last_seen[column] == Some(s) {
                trace!("{}: {s} in {} already listed", row.target, column.header());
                *score = None;
            } else {
                last_seen[column] = Some(s);
            }
        }
    }
}

fn mark_gaps(rows: &mut [RatingTableRow]) {
    let mut prev = None;
    for row in rows {
        row.gap_before = prev.is_some_and(|prev: DisplayRating| {
            (prev.get() - row.target.get()) * 10 > GAP_THRESHOLD
        });
        prev = Some(row.target);
    }
}
