use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};

use super::schema::DisplayRating;

#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Sequence,
)]
pub enum GradeTier {
    Volforce,
    EldoraI,
    EldoraII,
    EldoraIII,
    EldoraIV,
    CrimsonI,
    CrimsonII,
    CrimsonIII,
    CrimsonIV,
    ImperialI,
    ImperialII,
    ImperialIII,
    ImperialIV,
}

/// Lower bound of each named tier, highest first. Anything below is [`GradeTier::Volforce`].
pub const GRADE_BANDS: [(DisplayRating, GradeTier); 12] = {
    use GradeTier::*;
    [
        (DisplayRating::new(460), ImperialIV),
        (DisplayRating::new(440), ImperialIII),
        (DisplayRating::new(420), ImperialII),
        (DisplayRating::new(400), ImperialI),
        (DisplayRating::new(395), CrimsonIV),
        (DisplayRating::new(390), CrimsonIII),
        (DisplayRating::new(385), CrimsonII),
        (DisplayRating::new(380), CrimsonI),
        (DisplayRating::new(375), EldoraIV),
        (DisplayRating::new(370), EldoraIII),
        (DisplayRating::new(365), EldoraII),
        (DisplayRating::new(360), EldoraI),
    ]
};

impl GradeTier {
    pub fn of(rating: DisplayRating) -> Self {
        GRADE_BANDS
            .iter()
            .find(|&&(min, _)| min <= rating)
            .map_or(GradeTier::Volforce, |&(_, tier)| tier)
    }

    /// Floors `rating` to a tenth first, so this agrees with [`GradeTier::of`] on display values.
    pub fn of_real(rating: f64) -> Self {
        Self::of(DisplayRating::floor_from_f64(rating))
    }

    pub fn min_rating(self) -> DisplayRating {
        GRADE_BANDS
            .iter()
            .find(|&&(_, tier)| tier == self)
            .map_or(DisplayRating::new(0), |&(min, _)| min)
    }

    pub fn name(self) -> &'static str {
        use GradeTier::*;
        match self {
            Volforce => "VOLFORCE",
            EldoraI => "ELDORA I",
            EldoraII => "ELDORA II",
            EldoraIII => "ELDORA III",
            EldoraIV => "ELDORA IV",
            CrimsonI => "CRIMSON I",
            CrimsonII => "CRIMSON II",
            CrimsonIII => "CRIMSON III",
            CrimsonIV => "CRIMSON IV",
            ImperialI => "IMPERIAL I",
            ImperialII => "IMPERIAL II",
            ImperialIII => "IMPERIAL III",
            ImperialIV => "IMPERIAL IV",
        }
    }

    /// Colour token of the tier badge.
    pub fn style_tag(self) -> &'static str {
        use GradeTier::*;
        match self {
            Volforce => "slate-400",
            EldoraI | EldoraII | EldoraIII | EldoraIV => "yellow-400",
            CrimsonI | CrimsonII | CrimsonIII | CrimsonIV => "red-400",
            ImperialI => "purple-300",
            ImperialII => "purple-400",
            ImperialIII => "purple-500",
            ImperialIV => "purple-600",
        }
    }
}
