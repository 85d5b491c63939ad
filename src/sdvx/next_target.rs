use arrayvec::ArrayVec;
use getset::CopyGetters;
use log::debug;
use serde::Serialize;

use super::{
    config::NextTargetConfig,
    rating::{compute_rating, rank_band},
    required_score::min_score_for_target,
    schema::{ClearMark, DifficultyConstant, DisplayRating, RatingGain, Score},
};

/// Scores worth suggesting as round goals on their own.
pub const SCORE_MILESTONES: [Score; 3] = [
    Score::new_const(9_700_000),
    Score::new_const(9_800_000),
    Score::new_const(9_900_000),
];

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Same score, better clear mark.
    MarkUpgrade { mark: ClearMark },
    /// Same clear mark, next rank border.
    ScoreMilestone { score: Score },
    /// Same clear mark, smallest score for the next few display ratings.
    SmartSearch { score: Score },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, CopyGetters, Serialize)]
#[getset(get_copy = "pub")]
pub struct Suggestion {
    kind: SuggestionKind,
    rating: DisplayRating,
    gain: RatingGain,
}

impl Suggestion {
    pub fn label(&self) -> String {
        match self.kind {
            SuggestionKind::MarkUpgrade { mark } => mark.to_string(),
            SuggestionKind::ScoreMilestone { score } => {
                format!("{} ({})", score.with_separators(), rank_band(score).label())
            }
            SuggestionKind::SmartSearch { score } => score.with_separators(),
        }
    }
}

/// Ways to raise the display rating of a play, nearest improvement first.
/// Empty for a perfect score.
pub fn next_targets(
    constant: DifficultyConstant,
    score: Score,
    mark: ClearMark,
    config: &NextTargetConfig,
) -> Vec<Suggestion> {
    if score == Score::MAX {
        return vec![];
    }
    let current = compute_rating(constant, score, mark).display();
    let mut ret = vec![];

    for upgrade in mark.upgrades() {
        let score = match upgrade {
            ClearMark::PUC => Score::MAX,
            _ => score,
        };
        let rating = compute_rating(constant, score, upgrade).display();
        if let Some(gain) = rating.gain_over(current) {
            ret.push(Suggestion {
                kind: SuggestionKind::MarkUpgrade { mark: upgrade },
                rating,
                gain,
            });
        }
    }

    let mut covered = ArrayVec::<Score, { SCORE_MILESTONES.len() }>::new();
    for milestone in SCORE_MILESTONES.into_iter().filter(|&x| x > score) {
        let rating = compute_rating(constant, milestone, mark).display();
        if let Some(gain) = rating.gain_over(current) {
            ret.push(Suggestion {
                kind: SuggestionKind::ScoreMilestone { score: milestone },
                rating,
                gain,
            });
            covered.push(milestone);
        }
    }

    let mut target = current.step_up();
    let mut previous = None;
    for _ in 0..config.smart_search_steps() {
        if let Some(required) = min_score_for_target(target, constant, mark).filter(|&x| x > score)
        {
            if required == Score::MAX {
                break;
            }
            if !covered.contains(&required) && previous != Some(required) {
                if let Some(gain) = target.gain_over(current) {
                    ret.push(Suggestion {
                        kind: SuggestionKind::SmartSearch { score: required },
                        rating: target,
                        gain,
                    });
                }
                previous = Some(required);
            }
        }
        target = target.step_up();
    }

    ret.sort_by_key(|x| x.gain);
    debug!(
        "{} suggestions for {constant} / {score} / {mark} (currently {current})",
        ret.len()
    );
    ret
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{thread_rng, Rng};

    use crate::sdvx::{
        config::NextTargetConfig,
        rating::compute_rating,
        schema::{ClearMark, DifficultyConstant, DifficultyLevel, Score},
    };

    use super::{next_targets, Suggestion, SuggestionKind, SCORE_MILESTONES};

    fn constant(v: u16) -> DifficultyConstant {
        DifficultyConstant::try_from(v).unwrap()
    }

    fn score(v: u32) -> Score {
        Score::try_from(v).unwrap()
    }

    fn run(c: u16, s: u32, m: ClearMark) -> Vec<Suggestion> {
        next_targets(constant(c), score(s), m, &NextTargetConfig::default())
    }

    #[test]
    fn test_perfect_score_has_no_targets() {
        for m in [ClearMark::PUC, ClearMark::UC, ClearMark::EF] {
            assert!(run(180, 10_000_000, m).is_empty());
        }
    }

    #[test]
    fn test_concrete() {
        // 18.0, 9,900,000, MXV: 38.9
        let suggestions = run(180, 9_900_000, ClearMark::MXV);
        let described = suggestions
            .iter()
            .map(|s| format!("{} {} +{}", s.label(), s.rating(), s.gain()))
            .collect_vec();
        // UC: 18 * 2 * 0.99 * 1.05 * 1.06 = 39.6676; PUC: 41.58
        assert!(described.contains(&"UC 39.6 +0.7".to_owned()), "{described:?}");
        assert!(described.contains(&"PUC 41.5 +2.6".to_owned()), "{described:?}");
        // already past every milestone
        assert!(!suggestions
            .iter()
            .any(|s| matches!(s.kind(), SuggestionKind::ScoreMilestone { .. })));
        // 39.0 at MXV: ceil(39.0e7 / (18 * 2 * 1.05 * 1.04)) = 9,920,635
        assert_eq!(
            suggestions[0].kind(),
            SuggestionKind::SmartSearch {
                score: score(9_920_635)
            }
        );
        assert_eq!(suggestions[0].gain().to_string(), "0.1");
        assert_eq!(suggestions[0].label(), "9,920,635");
    }

    #[test]
    fn test_serialize() {
        let suggestions = run(180, 9_900_000, ClearMark::MXV);
        let puc = suggestions
            .iter()
            .find(|s| s.kind() == SuggestionKind::MarkUpgrade { mark: ClearMark::PUC })
            .unwrap();
        let value = serde_json::to_value(puc).unwrap();
        assert_eq!(value["kind"]["kind"], "mark_upgrade");
        assert_eq!(value["kind"]["mark"], "PUC");
        assert_eq!(value["rating"], "41.5");
    }

    #[test]
    fn test_milestones() {
        let suggestions = run(190, 9_650_000, ClearMark::EX);
        let milestones = suggestions
            .iter()
            .filter_map(|s| match s.kind() {
                SuggestionKind::ScoreMilestone { score } => Some(score),
                _ => None,
            })
            .collect_vec();
        assert_eq!(milestones, SCORE_MILESTONES);
        let labels = suggestions
            .iter()
            .filter(|s| matches!(s.kind(), SuggestionKind::ScoreMilestone { .. }))
            .map(|s| s.label())
            .collect_vec();
        assert_eq!(
            labels,
            ["9,700,000 (AAA)", "9,800,000 (AAA+)", "9,900,000 (S)"]
        );
        // a milestone score is never suggested again by the search
        for s in &suggestions {
            if let SuggestionKind::SmartSearch { score } = s.kind() {
                assert!(!SCORE_MILESTONES.contains(&score));
            }
        }
    }

    #[test]
    fn test_puc_below_max_stops_search() {
        // only a perfect score answers a PUC target, which ends the search at once
        let suggestions = run(185, 9_750_000, ClearMark::PUC);
        assert!(!suggestions
            .iter()
            .any(|s| matches!(s.kind(), SuggestionKind::SmartSearch { .. })));
        assert!(!suggestions
            .iter()
            .any(|s| matches!(s.kind(), SuggestionKind::MarkUpgrade { .. })));
        let milestones = suggestions
            .iter()
            .filter_map(|s| match s.kind() {
                SuggestionKind::ScoreMilestone { score } => Some(score.get()),
                _ => None,
            })
            .collect_vec();
        assert_eq!(milestones, [9_800_000, 9_900_000]);
    }

    #[test]
    fn test_smart_search_step_cap() {
        let c = constant(200);
        let s = score(9_000_000);
        let count = |steps: usize| {
            next_targets(
                c,
                s,
                ClearMark::EF,
                &NextTargetConfig::builder().smart_search_steps(steps).build(),
            )
            .iter()
            .filter(|x| matches!(x.kind(), SuggestionKind::SmartSearch { .. }))
            .count()
        };
        assert_eq!(count(0), 0);
        assert!(count(1) <= 1);
        assert!(count(5) <= 5);
        assert!(count(5) <= count(20));
    }

    #[test]
    fn test_invariants_stress() {
        let mut rng = thread_rng();
        let constants = DifficultyLevel::all()
            .flat_map(|l| l.constants())
            .collect_vec();
        let marks = [ClearMark::EF, ClearMark::EX, ClearMark::MXV, ClearMark::UC];
        for _ in 0..2_000 {
            let c = constants[rng.gen_range(0..constants.len())];
            let m = marks[rng.gen_range(0..marks.len())];
            let s = score(rng.gen_range(8_000_000..10_000_000));
            let current = compute_rating(c, s, m).display();
            let suggestions = next_targets(c, s, m, &NextTargetConfig::default());

            for (x, y) in suggestions.iter().tuple_windows() {
                assert!(x.gain() <= y.gain());
            }
            let mut smart_scores = vec![];
            for x in &suggestions {
                assert!(x.rating() > current);
                assert_eq!(x.rating().gain_over(current), Some(x.gain()));
                match x.kind() {
                    SuggestionKind::MarkUpgrade { mark } => {
                        assert!(mark > m);
                        let at = if mark == ClearMark::PUC { Score::MAX } else { s };
                        assert_eq!(compute_rating(c, at, mark).display(), x.rating());
                    }
                    SuggestionKind::ScoreMilestone { score } => {
                        assert!(score > s);
                        assert_eq!(compute_rating(c, score, m).display(), x.rating());
                    }
                    SuggestionKind::SmartSearch { score } => {
                        assert!(score > s && score < Score::MAX);
                        assert!(compute_rating(c, score, m).display() >= x.rating());
                        smart_scores.push(score);
                    }
                }
            }
            assert!(smart_scores.iter().all_unique());
        }
    }
}
