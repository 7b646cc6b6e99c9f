//! Backfill Generator
//!
//! Guarantees a minimum result size even when few crops clear the
//! composite threshold. Scans the catalog minus already-selected crops
//! with a cheaper suitability heuristic and appends the best remaining
//! candidates. Backfilled crops may carry arbitrarily low composites.

use rustc_hash::FxHashSet;

use crate::catalog::CropProfile;
use crate::query::MatchQuery;
use crate::ranker::ScoredCrop;

/// Flat bonus when the crop's season set covers the query season
const SEASON_BONUS: f64 = 50.0;

/// Cheap suitability heuristic over nitrogen, pH and temperature.
///
/// Each term is clamped at zero; pH and temperature deviations are scaled
/// onto the nitrogen axis (a full pH unit ≈ 20 nitrogen units).
pub fn basic_suitability(profile: &CropProfile, query: &MatchQuery) -> f64 {
    let nitrogen = (100.0 - (profile.nitrogen - query.nitrogen).abs()).max(0.0);
    let ph = (100.0 - (profile.ph - query.ph).abs() * 20.0).max(0.0);
    let temperature = (100.0 - (profile.temperature - query.temperature).abs() * 3.0).max(0.0);

    let season_bonus = if !query.season.is_empty()
        && profile.seasons.iter().any(|s| s.contains(&query.season))
    {
        SEASON_BONUS
    } else {
        0.0
    };

    nitrogen + ph + temperature + season_bonus
}

/// Pick the best remaining crops by basic suitability until the combined
/// result reaches `min_results`. Returns only the appended entries, in
/// append order.
pub fn backfill(
    scored_all: &[ScoredCrop],
    catalog: &[CropProfile],
    query: &MatchQuery,
    selected: &[ScoredCrop],
    min_results: usize,
) -> Vec<ScoredCrop> {
    if selected.len() >= min_results {
        return Vec::new();
    }

    let mut seen_names: FxHashSet<String> = selected
        .iter()
        .map(|s| catalog[s.index].name.to_lowercase())
        .collect();

    let mut candidates: Vec<(f64, &ScoredCrop)> = scored_all
        .iter()
        .filter(|s| !seen_names.contains(&catalog[s.index].name.to_lowercase()))
        .map(|s| (basic_suitability(&catalog[s.index], query), s))
        .collect();

    candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut appended = Vec::new();
    for (_, scored) in candidates {
        if selected.len() + appended.len() >= min_results {
            break;
        }
        if seen_names.insert(catalog[scored.index].name.to_lowercase()) {
            appended.push(scored.clone());
        }
    }

    tracing::debug!(appended = appended.len(), "backfilled below-minimum result");
    appended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_profile;
    use crate::factors::FactorScores;
    use approx::assert_relative_eq;

    fn query() -> MatchQuery {
        MatchQuery::from_raw(80.0, 40.0, 20.0, 6.5, 25.0, 80.0, 200.0, "kharif", "alluvial")
    }

    fn scored(index: usize) -> ScoredCrop {
        ScoredCrop {
            index,
            factors: FactorScores {
                nutrient: 0.1,
                environment: 0.1,
                ph: 0.1,
                season: 0.1,
                soil: 0.1,
            },
            composite: 10.0,
            roi: 0.0,
        }
    }

    #[test]
    fn test_basic_suitability_exact_match() {
        let profile = sample_profile("Rice");
        // 100 + 100 + 100 + 50 season bonus
        assert_relative_eq!(basic_suitability(&profile, &query()), 350.0, epsilon = 1e-9);
    }

    #[test]
    fn test_terms_clamp_at_zero() {
        let mut profile = sample_profile("Outlier");
        profile.nitrogen = 300.0; // 220 off: clamped
        profile.ph = 0.0; // 6.5 * 20 = 130: clamped
        profile.seasons = vec!["rabi".to_string()];
        // Only the temperature term survives
        assert_relative_eq!(basic_suitability(&profile, &query()), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_backfill_fills_to_minimum() {
        let catalog = vec![
            sample_profile("Rice"),
            sample_profile("Wheat"),
            sample_profile("Maize"),
        ];
        let scored_all: Vec<_> = (0..3).map(scored).collect();
        let selected = vec![scored(0)];

        let appended = backfill(&scored_all, &catalog, &query(), &selected, 3);
        assert_eq!(appended.len(), 2);
        let names: Vec<&str> = appended
            .iter()
            .map(|s| catalog[s.index].name.as_str())
            .collect();
        assert!(!names.contains(&"Rice"));
    }

    #[test]
    fn test_backfill_noop_when_minimum_met() {
        let catalog = vec![sample_profile("Rice"), sample_profile("Wheat")];
        let scored_all: Vec<_> = (0..2).map(scored).collect();
        let selected = vec![scored(0), scored(1)];
        assert!(backfill(&scored_all, &catalog, &query(), &selected, 2).is_empty());
    }

    #[test]
    fn test_backfill_prefers_closer_crops() {
        let near = sample_profile("Near");
        let mut far = sample_profile("Far");
        far.nitrogen = 250.0;
        far.seasons = vec!["rabi".to_string()];

        let catalog = vec![far, near];
        let scored_all: Vec<_> = (0..2).map(scored).collect();

        let appended = backfill(&scored_all, &catalog, &query(), &[], 1);
        assert_eq!(appended.len(), 1);
        assert_eq!(catalog[appended[0].index].name, "Near");
    }
}
