use log::trace;

use super::{
    rating::{
        gauge_coef, rank_bands_with_upper_bounds, single_play_rating_precise, GaugeCoefficient,
        RankBand, PRECISE_PER_TENTH, RANK_BANDS,
    },
    schema::{ClearMark, DifficultyConstant, DisplayRating, Score},
};

/// Smallest score whose display rating reaches `target` with `mark`.
///
/// The rank coefficient is a step function of the score, so every rank band is solved
/// as if its coefficient applied everywhere, kept only if the answer lies inside the band,
/// and the smallest surviving candidate wins. A lower band may beat a higher one.
///
/// A PUC is always a perfect score, so it either reaches `target` at `Score::MAX` or not at all.
pub fn min_score_for_target(
    target: DisplayRating,
    constant: DifficultyConstant,
    mark: ClearMark,
) -> Option<Score> {
    let gauge = gauge_coef(mark);
    if mark == ClearMark::PUC {
        let top = &RANK_BANDS[0];
        let rating =
            single_play_rating_precise(constant, Score::MAX, top.coefficient(), gauge).to_display();
        return (rating >= target).then_some(Score::MAX);
    }

    let ret = rank_bands_with_upper_bounds()
        .filter_map(|(band, max_score)| min_score_in_band(target, constant, gauge, band, max_score))
        .min();
    trace!("min_score_for_target({target}, {constant}, {mark}) = {ret:?}");
    ret
}

fn min_score_in_band(
    target: DisplayRating,
    constant: DifficultyConstant,
    gauge: GaugeCoefficient,
    band: &RankBand,
    max_score: u32,
) -> Option<Score> {
    // rating = constant * 2 * score * rank * gauge / 10^12 (constant in tenths, coefs in hundredths)
    let denominator = u64::from(constant.get())
        * 2
        * u64::from(band.coefficient().get())
        * u64::from(gauge.get());
    if denominator == 0 {
        return None;
    }
    let required = (u64::from(target.get()) * PRECISE_PER_TENTH).div_ceil(denominator);
    if required > u64::from(Score::MAX.get()) {
        return None;
    }
    let score = (required as u32).max(band.min_score().get());
    if score > max_score {
        // Belongs to a higher band, which is tried separately.
        return None;
    }
    let score = Score::try_from(score).ok()?;
    let rating = single_play_rating_precise(constant, score, band.coefficient(), gauge).to_display();
    (rating >= target).then_some(score)
}
