use serde::Serialize;

use crate::catalog::item::Manhwa;

/// Weight of the art-style match bonus.
pub const ART_STYLE_WEIGHT: f64 = 0.10;
/// Weight of the status match bonus.
pub const STATUS_WEIGHT: f64 = 0.05;
/// Weight of the release-year proximity bonus.
pub const YEAR_WEIGHT: f64 = 0.05;
/// Weight of the rating proximity bonus.
pub const RATING_WEIGHT: f64 = 0.10;

/// One auxiliary scoring factor: a score in `[0, 1]` and its fixed weight.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Factor {
    pub score: f64,
    pub weight: f64,
}

impl Factor {
    /// Get the factor's weighted contribution to the final score.
    #[inline]
    pub fn contribution(&self) -> f64 {
        self.score * self.weight
    }
}

/// The four auxiliary factors added on top of cosine similarity.
/// The bonuses are additive, not averaged in, so a composite score can
/// exceed 1.0 when the cosine is already high.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct FactorBreakdown {
    pub art_style: Factor,
    pub status: Factor,
    pub year_proximity: Factor,
    pub rating_proximity: Factor,
}

impl FactorBreakdown {
    /// Compute the factor breakdown for an item pair.
    ///
    /// # Arguments
    /// * `source` - Query-side item
    /// * `target` - Candidate-side item
    pub fn between(source: &Manhwa, target: &Manhwa) -> Self {
        FactorBreakdown {
            art_style: Factor {
                score: if source.art_style == target.art_style {
                    1.0
                } else {
                    0.0
                },
                weight: ART_STYLE_WEIGHT,
            },
            status: Factor {
                score: if source.status == target.status { 1.0 } else { 0.0 },
                weight: STATUS_WEIGHT,
            },
            year_proximity: Factor {
                score: year_proximity(source.release_year, target.release_year),
                weight: YEAR_WEIGHT,
            },
            rating_proximity: Factor {
                score: 1.0 - (source.rating - target.rating).abs() / 10.0,
                weight: RATING_WEIGHT,
            },
        }
    }

    /// Get the summed weighted bonus of all factors.
    #[inline]
    pub fn bonus(&self) -> f64 {
        self.art_style.contribution()
            + self.status.contribution()
            + self.year_proximity.contribution()
            + self.rating_proximity.contribution()
    }
}

/// Blend cosine similarity with the auxiliary factor bonuses.
/// The cosine term keeps an effective weight of 1; the result is not
/// clamped to `[0, 1]`.
#[inline]
pub fn composite_score(similarity: f64, factors: &FactorBreakdown) -> f64 {
    similarity + factors.bonus()
}

/// Get the release-year proximity score: 1.0 for the same year, falling
/// linearly to 0.0 at ten or more years apart.
///
/// # Arguments
/// * `a` - First release year
/// * `b` - Second release year
#[inline]
pub fn year_proximity(a: i32, b: i32) -> f64 {
    let difference = (a - b).abs() as f64;
    1.0 - (difference / 10.0).min(1.0)
}
