//! Environment factor (temperature, humidity, rainfall)
//!
//! Unweighted average of three gaussian scores.

use super::gaussian_score;
use crate::catalog::CropProfile;
use crate::query::MatchQuery;

pub fn temperature_tolerance(query_value: f64) -> f64 {
    (0.15 * query_value.abs()).max(3.0)
}

pub fn humidity_tolerance(query_value: f64) -> f64 {
    (0.20 * query_value.abs()).max(8.0)
}

pub fn rainfall_tolerance(query_value: f64) -> f64 {
    (0.40 * query_value.abs()).max(50.0)
}

/// Environment sub-score (0-1) for one crop against the query
pub fn score_environment(profile: &CropProfile, query: &MatchQuery) -> f64 {
    let temperature = gaussian_score(
        profile.temperature,
        query.temperature,
        temperature_tolerance(query.temperature),
    );
    let humidity = gaussian_score(
        profile.humidity,
        query.humidity,
        humidity_tolerance(query.humidity),
    );
    let rainfall = gaussian_score(
        profile.rainfall,
        query.rainfall,
        rainfall_tolerance(query.rainfall),
    );

    (temperature + humidity + rainfall) / 3.0
}
