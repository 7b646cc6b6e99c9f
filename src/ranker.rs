//! Composite Ranker
//!
//! Combines the five factor sub-scores into one 0-100 composite per crop,
//! drops crops below the minimum-quality threshold, and orders the rest.
//! Near-equal composites (within a 5-point window) are ordered by ROI so
//! the farmer sees the more profitable of two equally-suited crops first.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::catalog::CropProfile;
use crate::factors::FactorScores;
use crate::query::MatchQuery;

/// Composite blend weights; must sum to 1.0
pub const NUTRIENT_WEIGHT: f64 = 0.30;
pub const ENVIRONMENT_WEIGHT: f64 = 0.25;
pub const PH_WEIGHT: f64 = 0.20;
pub const SEASON_WEIGHT: f64 = 0.15;
pub const SOIL_WEIGHT: f64 = 0.10;

/// Crops scoring below this composite are dropped from the ranked list
pub const MIN_COMPOSITE_SCORE: f64 = 25.0;

/// Composites within this many points of each other are ordered by ROI
pub const TIE_BREAK_WINDOW: f64 = 5.0;

/// One catalog entry scored against a query. Transient: created per
/// scoring pass, discarded after ranking.
#[derive(Debug, Clone)]
pub struct ScoredCrop {
    /// Index into the catalog slice the crop was scored from
    pub index: usize,
    pub factors: FactorScores,
    /// Weighted composite on the 0-100 scale
    pub composite: f64,
    /// Parsed ROI, used for near-tie ordering
    pub roi: f64,
}

/// Weighted composite of the five sub-scores, on the 0-100 scale
pub fn composite_score(factors: &FactorScores) -> f64 {
    100.0
        * (NUTRIENT_WEIGHT * factors.nutrient
            + ENVIRONMENT_WEIGHT * factors.environment
            + PH_WEIGHT * factors.ph
            + SEASON_WEIGHT * factors.season
            + SOIL_WEIGHT * factors.soil)
}

fn score_one(index: usize, profile: &CropProfile, query: &MatchQuery) -> ScoredCrop {
    let factors = FactorScores::compute(profile, query);
    ScoredCrop {
        index,
        factors,
        composite: composite_score(&factors),
        roi: profile.roi_percent(),
    }
}

/// Score every catalog entry against the query (sequential)
pub fn score_catalog(catalog: &[CropProfile], query: &MatchQuery) -> Vec<ScoredCrop> {
    catalog
        .iter()
        .enumerate()
        .map(|(index, profile)| score_one(index, profile, query))
        .collect()
}

/// Score every catalog entry against the query across CPU cores.
///
/// The per-crop loop is embarrassingly parallel: scoring touches only the
/// read-only catalog and the query, so no coordination is needed.
pub fn score_catalog_parallel(catalog: &[CropProfile], query: &MatchQuery) -> Vec<ScoredCrop> {
    catalog
        .par_iter()
        .enumerate()
        .map(|(index, profile)| score_one(index, profile, query))
        .collect()
}

fn by_composite_desc(a: &ScoredCrop, b: &ScoredCrop) -> Ordering {
    b.composite
        .partial_cmp(&a.composite)
        .unwrap_or(Ordering::Equal)
}

/// Apply the minimum-quality filter and order the survivors.
///
/// Primary order is composite descending. The pairwise "≤5 points apart →
/// ROI decides" rule is not a strict weak ordering (ROI chains can cycle),
/// so the tie-break is applied over maximal windows instead: after the
/// composite sort, each run of crops within [`TIE_BREAK_WINDOW`] of the
/// run head is re-sorted by ROI descending.
pub fn rank(mut scored: Vec<ScoredCrop>) -> Vec<ScoredCrop> {
    scored.retain(|s| s.composite >= MIN_COMPOSITE_SCORE);
    scored.sort_by(by_composite_desc);

    let mut start = 0;
    while start < scored.len() {
        let head = scored[start].composite;
        let mut end = start + 1;
        while end < scored.len() && head - scored[end].composite <= TIE_BREAK_WINDOW {
            end += 1;
        }
        scored[start..end].sort_by(|a, b| {
            b.roi
                .partial_cmp(&a.roi)
                .unwrap_or(Ordering::Equal)
                .then_with(|| by_composite_desc(a, b))
        });
        start = end;
    }

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_profile;
    use approx::assert_relative_eq;

    fn scored(index: usize, composite: f64, roi: f64) -> ScoredCrop {
        ScoredCrop {
            index,
            factors: FactorScores {
                nutrient: 0.0,
                environment: 0.0,
                ph: 0.0,
                season: 0.0,
                soil: 0.0,
            },
            composite,
            roi,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total =
            NUTRIENT_WEIGHT + ENVIRONMENT_WEIGHT + PH_WEIGHT + SEASON_WEIGHT + SOIL_WEIGHT;
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_perfect_factors_score_one_hundred() {
        let factors = FactorScores {
            nutrient: 1.0,
            environment: 1.0,
            ph: 1.0,
            season: 1.0,
            soil: 1.0,
        };
        assert_relative_eq!(composite_score(&factors), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_envelope_match_scores_one_hundred() {
        let catalog = vec![sample_profile("Rice")];
        let query = MatchQuery::from_raw(
            80.0, 40.0, 20.0, 6.5, 25.0, 80.0, 200.0, "Kharif", "alluvial",
        );
        let scored = score_catalog(&catalog, &query);
        assert_relative_eq!(scored[0].composite, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_threshold_filter() {
        let ranked = rank(vec![scored(0, 80.0, 0.0), scored(1, 24.9, 0.0), scored(2, 25.0, 0.0)]);
        let indices: Vec<usize> = ranked.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_near_tie_orders_by_roi() {
        // 88 vs 90 is inside the 5-point window: higher ROI wins
        let ranked = rank(vec![scored(0, 90.0, 20.0), scored(1, 88.0, 50.0)]);
        assert_eq!(ranked[0].index, 1);

        // 80 vs 90 is outside the window: composite wins regardless of ROI
        let ranked = rank(vec![scored(0, 90.0, 20.0), scored(1, 80.0, 50.0)]);
        assert_eq!(ranked[0].index, 0);
    }

    #[test]
    fn test_tie_windows_are_anchored_at_the_run_head() {
        // 86 is within 5 of 90, 82 is not: the ROI re-sort covers {90, 86}
        // only, even though 82 is within 5 of 86
        let ranked = rank(vec![
            scored(0, 90.0, 1.0),
            scored(1, 86.0, 2.0),
            scored(2, 82.0, 3.0),
        ]);
        let indices: Vec<usize> = ranked.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 0, 2]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut catalog = Vec::new();
        for i in 0..32 {
            let mut p = sample_profile(&format!("Crop {}", i));
            p.nitrogen += i as f64 * 7.0;
            p.ph += i as f64 * 0.05;
            catalog.push(p);
        }
        let query = MatchQuery::from_raw(
            80.0, 40.0, 20.0, 6.5, 25.0, 80.0, 200.0, "kharif", "alluvial",
        );

        let seq = score_catalog(&catalog, &query);
        let par = score_catalog_parallel(&catalog, &query);
        for (a, b) in seq.iter().zip(par.iter()) {
            assert_eq!(a.index, b.index);
            assert_relative_eq!(a.composite, b.composite, epsilon = 1e-12);
        }
    }
}
