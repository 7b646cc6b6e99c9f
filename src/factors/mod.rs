//! Factor scoring modules
//!
//! Each of the five factors (nutrients, environment, pH, season, soil) is
//! implemented in its own module. Every factor compares one CropProfile
//! against one MatchQuery and yields a sub-score on the 0-1 scale.

pub mod environment;
pub mod nutrients;
pub mod ph;
pub mod season;
pub mod soil;

pub use environment::score_environment;
pub use nutrients::score_nutrients;
pub use ph::score_ph;
pub use season::score_season;
pub use soil::score_soil;

use crate::catalog::CropProfile;
use crate::query::MatchQuery;

/// Neutral sub-score for unknown/empty season or soil inputs
pub const NEUTRAL_SCORE: f64 = 0.5;

/// The five per-factor sub-scores for one crop, each in 0..=1
#[derive(Debug, Clone, Copy)]
pub struct FactorScores {
    pub nutrient: f64,
    pub environment: f64,
    pub ph: f64,
    pub season: f64,
    pub soil: f64,
}

impl FactorScores {
    /// Score all five factors for one crop against one query
    pub fn compute(profile: &CropProfile, query: &MatchQuery) -> Self {
        Self {
            nutrient: score_nutrients(profile, query),
            environment: score_environment(profile, query),
            ph: score_ph(profile, query),
            season: score_season(&profile.seasons, &query.season),
            soil: score_soil(&profile.soil, query),
        }
    }
}

/// Score how close `actual` is to `target` given an acceptable `tolerance`.
///
/// Within tolerance the score follows a gaussian peak: 1.0 at an exact
/// match, decaying to exp(-0.5) ≈ 0.61 at the tolerance boundary. Beyond
/// tolerance the decay steepens and is capped at 0.3 so out-of-envelope
/// crops stay below every in-envelope crop while remaining orderable
/// (never hard zero).
pub fn gaussian_score(actual: f64, target: f64, tolerance: f64) -> f64 {
    let d = (actual - target).abs();
    if d <= tolerance {
        (-(d * d) / (2.0 * tolerance * tolerance)).exp()
    } else {
        (-(d - tolerance) / tolerance).exp() * 0.3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_peak_at_exact_match() {
        assert_relative_eq!(gaussian_score(50.0, 50.0, 10.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gaussian_boundary_value() {
        // At d == tolerance: exp(-0.5)
        assert_relative_eq!(
            gaussian_score(60.0, 50.0, 10.0),
            (-0.5f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_gaussian_out_of_tolerance_capped() {
        // Just past the boundary the score drops to ~0.3, below the
        // in-tolerance floor of exp(-0.5) ≈ 0.607
        let just_outside = gaussian_score(60.001, 50.0, 10.0);
        assert!(just_outside < (-0.5f64).exp());
        assert!(just_outside <= 0.3);
        assert!(just_outside > 0.0);
    }

    #[test]
    fn test_gaussian_monotone_in_distance() {
        let tolerance = 10.0;
        let mut prev = gaussian_score(50.0, 50.0, tolerance);
        for step in 1..200 {
            let actual = 50.0 + step as f64 * 0.5;
            let score = gaussian_score(actual, 50.0, tolerance);
            assert!(
                score <= prev + 1e-12,
                "score increased at d={}",
                actual - 50.0
            );
            prev = score;
        }
    }

    #[test]
    fn test_gaussian_never_zero() {
        assert!(gaussian_score(1000.0, 0.0, 10.0) > 0.0);
    }
}
