//! Demo Recommendations
//!
//! Runs the recommendation pipeline over a hand-authored base catalog,
//! optionally enlarged with seeded synthetic profiles, and prints the
//! result for a few sample queries.
//!
//! Run with: cargo run --bin demo_recommendations [catalog.csv]
//!
//! With a path argument the catalog is loaded from that comma-delimited
//! file instead of the built-in demo profiles.

use std::path::Path;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use crop_match::{
    recommend, CropCatalog, CropCategory, CropProfile, MatchQuery, MatchSource, SoilAffinity,
};

/// Fixed seed so demo output is reproducible run to run
const SYNTHETIC_SEED: u64 = 20240615;

/// Synthetic profiles appended to the built-in catalog
const SYNTHETIC_COUNT: usize = 40;

fn base_profile(
    name: &str,
    npk: (f64, f64, f64),
    climate: (f64, f64, f64),
    ph: f64,
    seasons: &[&str],
    soil: SoilAffinity,
    roi: &str,
) -> CropProfile {
    CropProfile {
        name: name.to_string(),
        nitrogen: npk.0,
        phosphorus: npk.1,
        potassium: npk.2,
        temperature: climate.0,
        humidity: climate.1,
        rainfall: climate.2,
        ph,
        seasons: seasons.iter().map(|s| s.to_lowercase()).collect(),
        soil,
        growth_duration_days: String::new(),
        return_on_investment_pct: roi.to_string(),
        cost_per_acre: String::new(),
        warnings: String::new(),
        general_tips: String::new(),
        specific_tips: String::new(),
    }
}

fn demo_catalog() -> CropCatalog {
    let soils = |red, black, alluvial, sandy, loamy, laterite| SoilAffinity {
        red,
        black,
        alluvial,
        sandy,
        loamy,
        laterite,
    };

    let mut catalog = CropCatalog::new(vec![
        base_profile("Rice", (80.0, 40.0, 40.0), (25.0, 80.0, 200.0), 6.5,
            &["Kharif", "Monsoon"], soils(false, false, true, false, true, false), "45"),
        base_profile("Wheat", (100.0, 50.0, 40.0), (20.0, 60.0, 100.0), 7.0,
            &["Rabi", "Winter"], soils(false, true, true, false, true, false), "38"),
        base_profile("Maize", (90.0, 45.0, 35.0), (24.0, 65.0, 110.0), 6.8,
            &["Kharif"], soils(true, false, true, true, true, false), "42"),
        base_profile("Cotton", (110.0, 45.0, 50.0), (28.0, 60.0, 90.0), 7.5,
            &["Kharif"], soils(false, true, false, false, true, false), "52"),
        base_profile("Groundnut", (25.0, 50.0, 40.0), (27.0, 65.0, 80.0), 6.2,
            &["Kharif", "Summer"], soils(true, false, false, true, true, false), "40"),
        base_profile("Tomato", (75.0, 55.0, 50.0), (24.0, 70.0, 80.0), 6.3,
            &["Rabi", "Zaid"], soils(true, false, true, true, true, false), "60"),
        base_profile("Onion", (70.0, 45.0, 45.0), (22.0, 65.0, 75.0), 6.5,
            &["Rabi"], soils(true, true, true, false, true, false), "55"),
        base_profile("Banana", (100.0, 35.0, 60.0), (27.0, 85.0, 180.0), 6.5,
            &["Kharif", "Whole Year"], soils(false, false, true, false, true, true), "65"),
        base_profile("Chickpea", (20.0, 55.0, 30.0), (21.0, 55.0, 70.0), 7.2,
            &["Rabi"], soils(false, true, true, true, true, false), "35"),
        base_profile("Sugarcane", (120.0, 50.0, 60.0), (28.0, 75.0, 160.0), 6.8,
            &["Kharif", "Whole Year"], soils(false, true, true, false, true, false), "48"),
        base_profile("Turmeric", (60.0, 50.0, 110.0), (26.0, 80.0, 150.0), 6.0,
            &["Kharif"], soils(true, false, true, false, true, true), "58"),
        base_profile("Mango", (50.0, 30.0, 50.0), (27.0, 70.0, 120.0), 6.4,
            &["Summer"], soils(true, false, true, false, true, true), "50"),
    ]);

    // Enlarge with seeded jittered variants of the base profiles
    let mut rng = StdRng::seed_from_u64(SYNTHETIC_SEED);
    let base = catalog.as_slice().to_vec();
    for i in 0..SYNTHETIC_COUNT {
        let template = &base[rng.gen_range(0..base.len())];
        let mut profile = template.clone();
        profile.name = format!("{} (variety {})", template.name, i + 1);
        profile.nitrogen += rng.gen_range(-20.0..20.0);
        profile.phosphorus += rng.gen_range(-10.0..10.0);
        profile.potassium += rng.gen_range(-10.0..10.0);
        profile.temperature += rng.gen_range(-3.0..3.0);
        profile.humidity += rng.gen_range(-10.0..10.0);
        profile.rainfall += rng.gen_range(-40.0..40.0);
        profile.ph += rng.gen_range(-0.5..0.5);
        profile.return_on_investment_pct =
            format!("{}", rng.gen_range(20..70));
        catalog.push(profile);
    }

    catalog
}

fn print_recommendations(label: &str, query: &MatchQuery, catalog: &CropCatalog) {
    println!("\n=== {} ===", label);
    println!(
        "  query: N={} P={} K={} pH={} temp={} humidity={} rainfall={} season={} soil={}",
        query.nitrogen,
        query.phosphorus,
        query.potassium,
        query.ph,
        query.temperature,
        query.humidity,
        query.rainfall,
        query.season,
        query.soil_type
    );

    let result = recommend(catalog.as_slice(), query);
    if result.is_empty() {
        println!("  no recommendations");
        return;
    }

    for (rank, rec) in result.iter().enumerate() {
        let source = match rec.source {
            MatchSource::Ranked => "ranked",
            MatchSource::Backfill => "backfill",
        };
        println!(
            "  {:>2}. {:<28} {:>6.1}  [{}] ({})",
            rank + 1,
            rec.profile.name,
            rec.composite_score,
            CropCategory::classify(&rec.profile.name).display_name(),
            source
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = match std::env::args().nth(1) {
        Some(path) => CropCatalog::from_csv_path(Path::new(&path), b',')?,
        None => demo_catalog(),
    };
    println!("Catalog: {} crops", catalog.len());

    print_recommendations(
        "Kharif paddy field (alluvial)",
        &MatchQuery::from_raw(80.0, 40.0, 40.0, 6.5, 25.0, 80.0, 200.0, "Kharif", "alluvial"),
        &catalog,
    );

    print_recommendations(
        "Rabi plot on black soil",
        &MatchQuery::from_raw(95.0, 50.0, 40.0, 7.1, 20.0, 55.0, 90.0, "Rabi", "black"),
        &catalog,
    );

    print_recommendations(
        "Unknown soil, dry summer",
        &MatchQuery::from_raw(40.0, 30.0, 30.0, 6.0, 32.0, 40.0, 40.0, "Summer", "moon_dust"),
        &catalog,
    );

    Ok(())
}
