//! Soil factor
//!
//! Exact affinity beats the directional compatibility table; anything else
//! gets a small floor so the ordering over crops stays total. An
//! unrecognized soil name on the query is an unknown and scores neutral.

use super::NEUTRAL_SCORE;
use crate::catalog::SoilAffinity;
use crate::query::MatchQuery;

const EXACT_SCORE: f64 = 1.0;
const COMPATIBLE_SCORE: f64 = 0.7;
const MISMATCH_SCORE: f64 = 0.2;

/// Soil sub-score (0-1) for one crop against the query
pub fn score_soil(affinity: &SoilAffinity, query: &MatchQuery) -> f64 {
    let Some(soil) = query.soil() else {
        return NEUTRAL_SCORE;
    };

    if affinity.grows_in(soil) {
        return EXACT_SCORE;
    }

    if soil
        .compatible_soils()
        .iter()
        .any(|s| affinity.grows_in(*s))
    {
        return COMPATIBLE_SCORE;
    }

    MISMATCH_SCORE
}
