//! Soil pH factor
//!
//! Single gaussian score with a fixed tolerance: pH lives on a narrow,
//! absolute scale, so it does not get the adaptive treatment the other
//! numeric factors do.

use super::gaussian_score;
use crate::catalog::CropProfile;
use crate::query::MatchQuery;

/// Acceptable pH deviation
pub const PH_TOLERANCE: f64 = 0.8;

/// pH sub-score (0-1) for one crop against the query
pub fn score_ph(profile: &CropProfile, query: &MatchQuery) -> f64 {
    gaussian_score(profile.ph, query.ph, PH_TOLERANCE)
}
