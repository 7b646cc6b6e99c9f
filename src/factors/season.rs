//! Season factor
//!
//! Compares the query season against a crop's season set with graded
//! confidence: exact membership, substring overlap, then a fixed
//! compatibility table covering the Indian cropping calendar (kharif /
//! rabi / zaid) and its informal aliases.

use super::NEUTRAL_SCORE;

const EXACT_SCORE: f64 = 1.0;
const OVERLAP_SCORE: f64 = 0.8;
const COMPATIBLE_SCORE: f64 = 0.6;
const MISMATCH_SCORE: f64 = 0.3;

/// Seasons considered workable neighbors of the given season name.
///
/// Each direction is listed explicitly (kharif accepts summer sowing, but
/// summer does not list rainy, and so on).
fn compatible_seasons(season: &str) -> &'static [&'static str] {
    match season {
        "kharif" => &["monsoon", "rainy", "summer"],
        "monsoon" => &["kharif", "rainy"],
        "rainy" => &["kharif", "monsoon"],
        "rabi" => &["winter", "cold"],
        "winter" => &["rabi", "cold"],
        "cold" => &["rabi", "winter"],
        "zaid" => &["summer", "spring"],
        "summer" => &["zaid", "kharif"],
        "spring" => &["zaid"],
        _ => &[],
    }
}

/// Season sub-score (0-1).
///
/// `crop_seasons` and `query_season` are expected lowercased (catalog load
/// and query normalization guarantee this). Empty input on either side is
/// an unknown, not a mismatch, and scores neutral.
pub fn score_season(crop_seasons: &[String], query_season: &str) -> f64 {
    if query_season.is_empty() || crop_seasons.is_empty() {
        return NEUTRAL_SCORE;
    }

    if crop_seasons.iter().any(|s| s == query_season) {
        return EXACT_SCORE;
    }

    if crop_seasons
        .iter()
        .any(|s| s.contains(query_season) || query_season.contains(s.as_str()))
    {
        return OVERLAP_SCORE;
    }

    let compatible = compatible_seasons(query_season);
    if crop_seasons.iter().any(|s| compatible.contains(&s.as_str())) {
        return COMPATIBLE_SCORE;
    }

    MISMATCH_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seasons(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_membership() {
        assert_relative_eq!(score_season(&seasons(&["kharif", "zaid"]), "kharif"), 1.0);
    }

    #[test]
    fn test_substring_overlap() {
        // "kharif season" in the catalog vs a plain "kharif" query
        assert_relative_eq!(score_season(&seasons(&["kharif season"]), "kharif"), 0.8);
        assert_relative_eq!(score_season(&seasons(&["rabi"]), "rabi crop"), 0.8);
    }

    #[test]
    fn test_compatibility_table() {
        assert_relative_eq!(score_season(&seasons(&["monsoon"]), "kharif"), 0.6);
        assert_relative_eq!(score_season(&seasons(&["winter"]), "rabi"), 0.6);
        assert_relative_eq!(score_season(&seasons(&["zaid"]), "summer"), 0.6);
        assert_relative_eq!(score_season(&seasons(&["summer"]), "zaid"), 0.6);
    }

    #[test]
    fn test_mismatch_floor() {
        assert_relative_eq!(score_season(&seasons(&["rabi"]), "kharif"), 0.3);
    }

    #[test]
    fn test_missing_season_is_neutral() {
        assert_relative_eq!(score_season(&seasons(&["kharif"]), ""), 0.5);
        assert_relative_eq!(score_season(&[], "kharif"), 0.5);
    }
}
