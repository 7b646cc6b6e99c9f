//! Recommendation Engine
//!
//! The full pipeline: score every catalog entry, rank, diversify by
//! category, backfill to the minimum result size, and cap the final list.
//!
//! Stateless per call: each invocation is fully determined by the query
//! and the read-only catalog slice, so concurrent calls need no
//! coordination. The catalog is injected by the caller; the engine never
//! loads or refreshes it.

use crate::backfill::backfill;
use crate::catalog::CropProfile;
use crate::diversify::diversify;
use crate::factors::FactorScores;
use crate::query::MatchQuery;
use crate::ranker::{rank, score_catalog, score_catalog_parallel, ScoredCrop};

/// Hard cap on the result list
pub const MAX_RESULTS: usize = 10;

/// Target minimum; backfill tops the list up to this when the catalog
/// allows it
pub const MIN_RESULTS: usize = 8;

/// How a crop earned its place in the result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// Cleared the composite threshold and survived diversification
    Ranked,
    /// Appended by the basic-suitability backfill pass
    Backfill,
}

/// One entry of the final recommendation list
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub profile: CropProfile,
    /// Weighted composite on the 0-100 scale. Backfilled entries keep
    /// their real composite, which may sit below the ranking threshold.
    pub composite_score: f64,
    pub factors: FactorScores,
    pub source: MatchSource,
}

/// Recommend crops for a query (sequential scoring pass)
pub fn recommend(catalog: &[CropProfile], query: &MatchQuery) -> Vec<Recommendation> {
    run_pipeline(catalog, query, score_catalog)
}

/// Recommend crops for a query, scoring the catalog across CPU cores.
///
/// Worth it only for large catalogs; results are identical to
/// [`recommend`].
pub fn recommend_parallel(catalog: &[CropProfile], query: &MatchQuery) -> Vec<Recommendation> {
    run_pipeline(catalog, query, score_catalog_parallel)
}

fn run_pipeline(
    catalog: &[CropProfile],
    query: &MatchQuery,
    score: fn(&[CropProfile], &MatchQuery) -> Vec<ScoredCrop>,
) -> Vec<Recommendation> {
    // Empty catalog is a valid "no recommendation" outcome, not an error
    if catalog.is_empty() {
        return Vec::new();
    }

    let scored_all = score(catalog, query);
    let ranked = rank(scored_all.clone());
    tracing::debug!(
        catalog = catalog.len(),
        above_threshold = ranked.len(),
        "scored catalog"
    );

    let diversified = diversify(&ranked, catalog, MIN_RESULTS);
    let appended = backfill(&scored_all, catalog, query, &diversified, MIN_RESULTS);

    let mut result: Vec<Recommendation> = diversified
        .into_iter()
        .map(|s| to_recommendation(catalog, s, MatchSource::Ranked))
        .chain(
            appended
                .into_iter()
                .map(|s| to_recommendation(catalog, s, MatchSource::Backfill)),
        )
        .collect();

    result.truncate(MAX_RESULTS);
    tracing::debug!(results = result.len(), "recommendation pipeline finished");
    result
}

fn to_recommendation(
    catalog: &[CropProfile],
    scored: ScoredCrop,
    source: MatchSource,
) -> Recommendation {
    Recommendation {
        profile: catalog[scored.index].clone(),
        composite_score: scored.composite,
        factors: scored.factors,
        source,
    }
}
