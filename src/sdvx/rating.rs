use std::{fmt::Display, iter::once};

use derive_more::{From, Into};
use getset::CopyGetters;
use serde::Serialize;

use super::schema::{ClearMark, DifficultyConstant, DisplayRating, Score};

/// Coefficient in hundredths, e.g. `1_05` for 1.05.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, From, Into, Serialize)]
pub struct RankCoefficient(u16);

/// Coefficient in hundredths, e.g. `1_10` for 1.10.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, From, Into, Serialize)]
pub struct GaugeCoefficient(u16);

macro_rules! impl_coefficient {
    ($t: ty) => {
        impl $t {
            pub const fn new(hundredths: u16) -> Self {
                Self(hundredths)
            }
            pub fn get(self) -> u16 {
                self.0
            }
        }
        impl Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(&format!("{}.{:02}", self.0 / 100, self.0 % 100))
            }
        }
    };
}
impl_coefficient!(RankCoefficient);
impl_coefficient!(GaugeCoefficient);

#[derive(Clone, Copy, PartialEq, Eq, Debug, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct RankBand {
    min_score: Score,
    coefficient: RankCoefficient,
    label: &'static str,
}

impl RankBand {
    const fn new(min_score: u32, coefficient: u16, label: &'static str) -> Self {
        Self {
            min_score: Score::new_const(min_score),
            coefficient: RankCoefficient::new(coefficient),
            label,
        }
    }
}

/// Sorted by `min_score` in descending order; the last band starts at zero.
#[allow(clippy::inconsistent_digit_grouping)]
pub const RANK_BANDS: [RankBand; 10] = [
    RankBand::new(9_900_000, 1_05, "S"),
    RankBand::new(9_800_000, 1_02, "AAA+"),
    RankBand::new(9_700_000, 1_00, "AAA"),
    RankBand::new(9_500_000, 0_97, "AA+"),
    RankBand::new(9_300_000, 0_94, "AA"),
    RankBand::new(9_000_000, 0_91, "A+"),
    RankBand::new(8_700_000, 0_88, "A"),
    RankBand::new(7_500_000, 0_85, "B"),
    RankBand::new(6_500_000, 0_82, "C"),
    RankBand::new(0, 0_80, "D"),
];

pub fn rank_band(score: Score) -> &'static RankBand {
    let [.., lowest] = &RANK_BANDS;
    RANK_BANDS
        .iter()
        .find(|band| band.min_score <= score)
        .unwrap_or(lowest)
}

pub fn rank_coef(score: Score) -> RankCoefficient {
    rank_band(score).coefficient
}

/// Each band paired with the largest score it covers.
/// The top band stops one short of the maximum, which only a PUC reaches.
pub fn rank_bands_with_upper_bounds() -> impl Iterator<Item = (&'static RankBand, u32)> {
    let upper_bounds = once(Score::MAX.get() - 1)
        .chain(RANK_BANDS.iter().map(|band| band.min_score.get().saturating_sub(1)));
    RANK_BANDS.iter().zip(upper_bounds)
}

#[allow(clippy::inconsistent_digit_grouping)]
pub fn gauge_coef(mark: ClearMark) -> GaugeCoefficient {
    use ClearMark::*;
    let ret = match mark {
        PUC => 1_10,
        UC => 1_06,
        MXV => 1_04,
        EX => 1_02,
        EF => 1_00,
    };
    GaugeCoefficient(ret)
}

/// Exact rating scaled by `10^12`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, From, Into, Serialize)]
#[serde(into = "f64")]
pub struct RatingPrecise(u64);

/// `10^11`: one tenth of a rating point in `RatingPrecise` units.
pub(crate) const PRECISE_PER_TENTH: u64 = 100_000_000_000;

impl RatingPrecise {
    pub fn get(self) -> u64 {
        self.0
    }

    pub fn to_display(self) -> DisplayRating {
        DisplayRating::from((self.0 / PRECISE_PER_TENTH) as u16)
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / (PRECISE_PER_TENTH * 10) as f64
    }
}

impl From<RatingPrecise> for f64 {
    fn from(value: RatingPrecise) -> f64 {
        value.as_f64()
    }
}

impl Display for RatingPrecise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let factor = PRECISE_PER_TENTH * 10;
        write!(f, "{}.{:012}", self.0 / factor, self.0 % factor)
    }
}

/// `constant * 2 * (score / 10^7) * rank_coef * gauge_coef`, without any rounding.
pub fn single_play_rating_precise(
    constant: DifficultyConstant,
    score: Score,
    rank_coef: RankCoefficient,
    gauge_coef: GaugeCoefficient,
) -> RatingPrecise {
    RatingPrecise(
        u64::from(constant.get())
            * 2
            * u64::from(score.get())
            * u64::from(rank_coef.0)
            * u64::from(gauge_coef.0),
    )
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, CopyGetters, Serialize)]
#[getset(get_copy = "pub")]
pub struct Rating {
    precise: RatingPrecise,
    display: DisplayRating,
}

impl Rating {
    pub fn raw(self) -> f64 {
        self.precise.as_f64()
    }
}

impl From<RatingPrecise> for Rating {
    fn from(precise: RatingPrecise) -> Self {
        Self {
            precise,
            display: precise.to_display(),
        }
    }
}

pub fn compute_rating(constant: DifficultyConstant, score: Score, mark: ClearMark) -> Rating {
    single_play_rating_precise(constant, score, rank_coef(score), gauge_coef(mark)).into()
}

/// Zero unless all three inputs are present.
pub fn compute_rating_partial(
    constant: Option<DifficultyConstant>,
    score: Option<Score>,
    mark: Option<ClearMark>,
) -> Rating {
    match (constant, score, mark) {
        (Some(constant), Some(score), Some(mark)) => compute_rating(constant, score, mark),
        _ => Rating::default(),
    }
}
