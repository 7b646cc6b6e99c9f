//! Crop Recommendation Matching Engine
//!
//! Scores a catalog of crop profiles against a farmer's soil and climate
//! readings, resolves near-ties by ROI, enforces category diversity, and
//! backfills results to a target count.
//!
//! - `catalog`: CropProfile records and file loading
//! - `query`: parameter normalization and soil types
//! - `factors/`: the five per-factor sub-scorers
//! - `ranker` / `diversify` / `backfill` / `engine`: the pipeline
//!
//! The engine is pure, synchronous computation over a read-only in-memory
//! catalog; concurrent calls are safe without coordination.

pub mod backfill;
pub mod catalog;
pub mod diversify;
pub mod engine;
pub mod factors;
pub mod query;
pub mod ranker;

// Re-export commonly used types
pub use catalog::{CropCatalog, CropProfile, SoilAffinity};
pub use diversify::CropCategory;
pub use engine::{recommend, recommend_parallel, MatchSource, Recommendation};
pub use factors::FactorScores;
pub use query::{MatchQuery, SoilType};
