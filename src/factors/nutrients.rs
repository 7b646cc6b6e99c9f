//! Nutrient factor (N/P/K)
//!
//! Weighted blend of three gaussian scores; nitrogen dominates because it
//! is the strongest yield driver in the catalog's reference data.

use super::gaussian_score;
use crate::catalog::CropProfile;
use crate::query::MatchQuery;

/// N/P/K blend weights
const NITROGEN_WEIGHT: f64 = 0.5;
const PHOSPHORUS_WEIGHT: f64 = 0.3;
const POTASSIUM_WEIGHT: f64 = 0.2;

/// Acceptable nitrogen deviation scales with the query value itself
pub fn nitrogen_tolerance(query_value: f64) -> f64 {
    (0.30 * query_value.abs()).max(15.0)
}

pub fn phosphorus_tolerance(query_value: f64) -> f64 {
    (0.25 * query_value.abs()).max(10.0)
}

pub fn potassium_tolerance(query_value: f64) -> f64 {
    (0.25 * query_value.abs()).max(10.0)
}

/// Nutrient sub-score (0-1) for one crop against the query
pub fn score_nutrients(profile: &CropProfile, query: &MatchQuery) -> f64 {
    let n = gaussian_score(
        profile.nitrogen,
        query.nitrogen,
        nitrogen_tolerance(query.nitrogen),
    );
    let p = gaussian_score(
        profile.phosphorus,
        query.phosphorus,
        phosphorus_tolerance(query.phosphorus),
    );
    let k = gaussian_score(
        profile.potassium,
        query.potassium,
        potassium_tolerance(query.potassium),
    );

    NITROGEN_WEIGHT * n + PHOSPHORUS_WEIGHT * p + POTASSIUM_WEIGHT * k
}
