use std::{
    fmt::Display,
    iter::successors,
    num::ParseIntError,
    str::FromStr,
};

use derive_more::{From, Into};
use enum_iterator::Sequence;
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize, Serializer};
use strum::EnumString;
use thiserror::Error;

/// Chart constant in tenths, e.g. `18_4` for 18.4.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Into)]
pub struct DifficultyConstant(u16);

impl TryFrom<u16> for DifficultyConstant {
    type Error = u16;

    #[allow(clippy::inconsistent_digit_grouping)]
    fn try_from(v: u16) -> Result<Self, u16> {
        match v {
            17_0 | 17_5 | 18_0..=20_9 => Ok(Self(v)),
            _ => Err(v),
        }
    }
}

impl DifficultyConstant {
    pub fn get(self) -> u16 {
        self.0
    }

    pub fn level(self) -> DifficultyLevel {
        DifficultyLevel((self.0 / 10) as u8)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl Display for DifficultyConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("{}.{}", self.0 / 10, self.0 % 10))
    }
}

impl Serialize for DifficultyConstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(PartialEq, Eq, Debug, Error)]
pub enum ConstantParseError {
    #[error(transparent)]
    Malformed(#[from] TenthsParseError),
    #[error("Constant must be between 17.0 and 20.9, found {}.{}", .0 / 10, .0 % 10)]
    OutOfRange(u16),
    #[error("Level 17 only has 17.0 and 17.5, found {}.{}", .0 / 10, .0 % 10)]
    InvalidLevel17(u16),
}

impl FromStr for DifficultyConstant {
    type Err = ConstantParseError;

    #[allow(clippy::inconsistent_digit_grouping)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tenths = parse_tenths(s)?;
        Self::try_from(tenths).map_err(|v| {
            if (17_1..18_0).contains(&v) {
                ConstantParseError::InvalidLevel17(v)
            } else {
                ConstantParseError::OutOfRange(v)
            }
        })
    }
}

#[derive(PartialEq, Eq, Debug, Error)]
pub enum TenthsParseError {
    #[error("Integer part cannot be parsed: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("Unexpected character in fractional part: {0:?}")]
    Malformed(String),
    #[error("Only one decimal place is allowed: {0:?}")]
    TooPrecise(String),
    #[error("Value too large: {0:?}")]
    Overflow(String),
}

/// Parses a decimal with at most one significant fractional digit into tenths.
/// Trailing zeros such as `18.40` are accepted.
pub fn parse_tenths(s: &str) -> Result<u16, TenthsParseError> {
    let (int, frac) = s.split_once('.').unwrap_or((s, ""));
    let int: u16 = int.parse()?;
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(TenthsParseError::Malformed(s.to_owned()));
    }
    let mut digits = frac.bytes().map(|c| (c - b'0') as u16);
    let tenth = digits.next().unwrap_or(0);
    if digits.any(|d| d != 0) {
        return Err(TenthsParseError::TooPrecise(s.to_owned()));
    }
    int.checked_mul(10)
        .and_then(|x| x.checked_add(tenth))
        .ok_or_else(|| TenthsParseError::Overflow(s.to_owned()))
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Into, Serialize)]
pub struct DifficultyLevel(u8);

impl TryFrom<u8> for DifficultyLevel {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, u8> {
        match v {
            17..=20 => Ok(Self(v)),
            _ => Err(v),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Error)]
pub enum LevelParseError {
    #[error("Value cannot be parsed as an integer: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("Level must be between 17 and 20, found {0}")]
    OutOfRange(u8),
}

impl FromStr for DifficultyLevel {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.parse::<u8>()?).map_err(LevelParseError::OutOfRange)
    }
}

impl Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl DifficultyLevel {
    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (17..=20).map(Self)
    }

    /// Constants that exist within this level, in ascending order.
    pub fn constants(self) -> impl Iterator<Item = DifficultyConstant> + Clone {
        let offsets: &'static [u16] = match self.0 {
            17 => &[0, 5],
            _ => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        };
        let base = u16::from(self.0) * 10;
        offsets.iter().map(move |&x| DifficultyConstant(base + x))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Into, Serialize)]
pub struct Score(u32);

impl Score {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(10_000_000);

    /// Only meant for building constant tables; out-of-range values fail at compile time there.
    pub(crate) const fn new_const(v: u32) -> Self {
        assert!(v <= 10_000_000);
        Self(v)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn with_separators(self) -> String {
        self.0.to_formatted_string(&Locale::en)
    }
}

impl TryFrom<u32> for Score {
    type Error = u32;

    fn try_from(v: u32) -> Result<Self, u32> {
        match v {
            0..=10_000_000 => Ok(Self(v)),
            _ => Err(v),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Error)]
pub enum ScoreParseError {
    #[error("Value cannot be parsed as an integer: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("Score must be between 0 and 10000000, found {0}")]
    OutOfRange(u32),
}

impl FromStr for Score {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.parse::<u32>()?).map_err(ScoreParseError::OutOfRange)
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    Sequence,
    EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum ClearMark {
    EF,
    EX,
    MXV,
    UC,
    PUC,
}

impl ClearMark {
    /// Marks strictly better than `self`, weakest first.
    pub fn upgrades(self) -> impl Iterator<Item = ClearMark> {
        successors(self.next(), Sequence::next)
    }

    /// A perfect score is always a PUC, and a PUC is always a perfect score.
    pub fn coerce_for(self, score: Score) -> ClearMark {
        match self {
            _ if score == Score::MAX => ClearMark::PUC,
            ClearMark::PUC => ClearMark::UC,
            mark => mark,
        }
    }
}

/// Rating as shown to players, in tenths (floored).
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, From, Into,
)]
pub struct DisplayRating(u16);

impl DisplayRating {
    pub const fn new(tenths: u16) -> Self {
        Self(tenths)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Largest tenth not exceeding `x`; negative values and NaN become zero.
    pub fn floor_from_f64(x: f64) -> Self {
        let mut tenths = (x * 10.0).floor().max(0.0) as u16;
        // `x * 10` may round across an exact tenth, so settle against `tenths / 10` itself.
        while tenths > 0 && f64::from(tenths) / 10.0 > x {
            tenths -= 1;
        }
        while tenths < u16::MAX && f64::from(tenths + 1) / 10.0 <= x {
            tenths += 1;
        }
        Self(tenths)
    }

    pub fn step_up(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// `Some` only if `self` is strictly greater than `base`.
    pub fn gain_over(self, base: DisplayRating) -> Option<RatingGain> {
        (self > base).then(|| RatingGain(self.0 - base.0))
    }
}

impl FromStr for DisplayRating {
    type Err = TenthsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tenths(s).map(Self)
    }
}

impl Display for DisplayRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("{}.{}", self.0 / 10, self.0 % 10))
    }
}

impl Serialize for DisplayRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Positive difference of two display ratings, in tenths.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Into)]
pub struct RatingGain(u16);

impl RatingGain {
    pub fn get(self) -> u16 {
        self.0
    }
}

impl Display for RatingGain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("{}.{}", self.0 / 10, self.0 % 10))
    }
}

impl Serialize for RatingGain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
