//! Crop Catalog
//!
//! CropProfile records describe the nutrient/climate envelope a crop
//! tolerates plus economic and advisory metadata. Profiles are created once
//! at load time and shared read-only across all recommendation calls.
//!
//! Loading defaults missing or unparsable numeric fields to 0.0 so the
//! scorer never encounters NaN.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::query::SoilType;

/// Errors raised while loading a crop catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog record: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed supplementary profile file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-soil-category affinity flags; true means the crop grows well there
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoilAffinity {
    #[serde(default)]
    pub red: bool,
    #[serde(default)]
    pub black: bool,
    #[serde(default)]
    pub alluvial: bool,
    #[serde(default)]
    pub sandy: bool,
    #[serde(default)]
    pub loamy: bool,
    #[serde(default)]
    pub laterite: bool,
}

impl SoilAffinity {
    /// Check whether the crop grows well in a specific soil category
    pub fn grows_in(&self, soil: SoilType) -> bool {
        match soil {
            SoilType::Red => self.red,
            SoilType::Black => self.black,
            SoilType::Alluvial => self.alluvial,
            SoilType::Sandy => self.sandy,
            SoilType::Loamy => self.loamy,
            SoilType::Laterite => self.laterite,
        }
    }

    /// Soil categories where the crop grows well
    pub fn suitable_soils(&self) -> Vec<SoilType> {
        SoilType::all()
            .iter()
            .copied()
            .filter(|s| self.grows_in(*s))
            .collect()
    }
}

/// One crop catalog entry, immutable after load.
///
/// Nutrient/climate/pH fields are reference values the crop expects; the
/// advisory and economic fields pass through the engine unscored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropProfile {
    pub name: String,

    #[serde(default)]
    pub nitrogen: f64,
    #[serde(default)]
    pub phosphorus: f64,
    #[serde(default)]
    pub potassium: f64,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub rainfall: f64,
    #[serde(default)]
    pub ph: f64,

    /// Seasons the crop is suited to, lowercased
    #[serde(default)]
    pub seasons: Vec<String>,

    #[serde(default)]
    pub soil: SoilAffinity,

    // Advisory/economic metadata, passed through unscored
    #[serde(default)]
    pub growth_duration_days: String,
    #[serde(default)]
    pub return_on_investment_pct: String,
    #[serde(default)]
    pub cost_per_acre: String,
    #[serde(default)]
    pub warnings: String,
    #[serde(default)]
    pub general_tips: String,
    #[serde(default)]
    pub specific_tips: String,
}

impl CropProfile {
    /// ROI parsed as a number; unparsable or missing treated as 0
    pub fn roi_percent(&self) -> f64 {
        parse_num_or_zero(&self.return_on_investment_pct)
    }

    /// Check season membership (exact, case-insensitive)
    pub fn has_season(&self, season: &str) -> bool {
        self.seasons.iter().any(|s| s == season)
    }
}

/// Parse a numeric field, defaulting to 0.0 and never producing NaN
fn parse_num_or_zero(raw: &str) -> f64 {
    let value: f64 = raw
        .trim()
        .trim_end_matches('%')
        .parse()
        .unwrap_or(0.0);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parse a soil affinity flag column (1/0, true/false, yes/no)
fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}

/// Split a comma-separated seasons field into lowercase entries
fn parse_seasons(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Raw CSV row; everything is text so one bad cell never aborts the load
#[derive(Debug, Default, Deserialize)]
struct RawCropRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    nitrogen: String,
    #[serde(default)]
    phosphorus: String,
    #[serde(default)]
    potassium: String,
    #[serde(default)]
    temperature: String,
    #[serde(default)]
    humidity: String,
    #[serde(default)]
    rainfall: String,
    #[serde(default)]
    ph: String,
    #[serde(default)]
    seasons: String,
    #[serde(default)]
    red: String,
    #[serde(default)]
    black: String,
    #[serde(default)]
    alluvial: String,
    #[serde(default)]
    sandy: String,
    #[serde(default)]
    loamy: String,
    #[serde(default)]
    laterite: String,
    #[serde(default)]
    growth_duration_days: String,
    #[serde(default)]
    return_on_investment_pct: String,
    #[serde(default)]
    cost_per_acre: String,
    #[serde(default)]
    warnings: String,
    #[serde(default)]
    general_tips: String,
    #[serde(default)]
    specific_tips: String,
}

impl From<RawCropRecord> for CropProfile {
    fn from(raw: RawCropRecord) -> Self {
        CropProfile {
            name: raw.name.trim().to_string(),
            nitrogen: parse_num_or_zero(&raw.nitrogen),
            phosphorus: parse_num_or_zero(&raw.phosphorus),
            potassium: parse_num_or_zero(&raw.potassium),
            temperature: parse_num_or_zero(&raw.temperature),
            humidity: parse_num_or_zero(&raw.humidity),
            rainfall: parse_num_or_zero(&raw.rainfall),
            ph: parse_num_or_zero(&raw.ph),
            seasons: parse_seasons(&raw.seasons),
            soil: SoilAffinity {
                red: parse_flag(&raw.red),
                black: parse_flag(&raw.black),
                alluvial: parse_flag(&raw.alluvial),
                sandy: parse_flag(&raw.sandy),
                loamy: parse_flag(&raw.loamy),
                laterite: parse_flag(&raw.laterite),
            },
            growth_duration_days: raw.growth_duration_days.trim().to_string(),
            return_on_investment_pct: raw.return_on_investment_pct.trim().to_string(),
            cost_per_acre: raw.cost_per_acre.trim().to_string(),
            warnings: raw.warnings.trim().to_string(),
            general_tips: raw.general_tips.trim().to_string(),
            specific_tips: raw.specific_tips.trim().to_string(),
        }
    }
}

/// An ordered, read-only collection of crop profiles.
///
/// The recommendation engine takes `&[CropProfile]`; this type only exists
/// so loading and merging live in one place.
#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    crops: Vec<CropProfile>,
}

impl CropCatalog {
    pub fn new(crops: Vec<CropProfile>) -> Self {
        Self { crops }
    }

    /// Load the delimited crop reference file.
    ///
    /// Rows with empty names are skipped; numeric cells that fail to parse
    /// default to 0.0 rather than aborting the load.
    pub fn from_csv_path(path: &Path, delimiter: u8) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv_str(&contents, delimiter)
            .with_context(|| format!("while parsing catalog file {:?}", path))
    }

    /// Parse catalog rows from an in-memory delimited string
    pub fn from_csv_str(contents: &str, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(contents.as_bytes());

        let mut crops = Vec::new();
        for record in reader.deserialize::<RawCropRecord>() {
            let raw = record.map_err(CatalogError::Csv)?;
            let profile = CropProfile::from(raw);
            if profile.name.is_empty() {
                tracing::debug!("skipping catalog row with empty crop name");
                continue;
            }
            crops.push(profile);
        }

        tracing::debug!(count = crops.len(), "loaded crop catalog");
        Ok(Self { crops })
    }

    /// Merge hand-authored supplementary profiles from a JSON array file
    pub fn merge_json_path(&mut self, path: &Path) -> Result<usize> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut extra: Vec<CropProfile> =
            serde_json::from_str(&contents).map_err(CatalogError::Json)?;
        for profile in &mut extra {
            // Same invariant as the CSV path: finite numerics, lowercase seasons
            for value in [
                &mut profile.nitrogen,
                &mut profile.phosphorus,
                &mut profile.potassium,
                &mut profile.temperature,
                &mut profile.humidity,
                &mut profile.rainfall,
                &mut profile.ph,
            ] {
                if !value.is_finite() {
                    *value = 0.0;
                }
            }
            for season in &mut profile.seasons {
                *season = season.trim().to_lowercase();
            }
        }

        let added = extra.len();
        self.crops.extend(extra);
        tracing::debug!(added, total = self.crops.len(), "merged supplementary profiles");
        Ok(added)
    }

    pub fn push(&mut self, profile: CropProfile) {
        self.crops.push(profile);
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn as_slice(&self) -> &[CropProfile] {
        &self.crops
    }
}

/// Hand-rolled profile with a perfect Kharif/alluvial envelope, shared by
/// unit tests across the crate
#[cfg(test)]
pub(crate) fn sample_profile(name: &str) -> CropProfile {
    CropProfile {
        name: name.to_string(),
        nitrogen: 80.0,
        phosphorus: 40.0,
        potassium: 20.0,
        temperature: 25.0,
        humidity: 80.0,
        rainfall: 200.0,
        ph: 6.5,
        seasons: vec!["kharif".to_string()],
        soil: SoilAffinity {
            alluvial: true,
            ..SoilAffinity::default()
        },
        growth_duration_days: String::new(),
        return_on_investment_pct: String::new(),
        cost_per_acre: String::new(),
        warnings: String::new(),
        general_tips: String::new(),
        specific_tips: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
name,nitrogen,phosphorus,potassium,temperature,humidity,rainfall,ph,seasons,red,black,alluvial,sandy,loamy,laterite,growth_duration_days,return_on_investment_pct,cost_per_acre,warnings,general_tips,specific_tips
Rice,80,40,40,25,80,200,6.5,\"Kharif, Monsoon\",0,0,1,0,1,0,120,45,22000,Needs standing water,Transplant seedlings,Keep fields flooded
Wheat,100,50,40,20,60,100,7.0,Rabi,0,1,1,0,1,0,140,38,18000,,,
Mystery,,not-a-number,,,,,,,,,,,,,,,,,,
";

    #[test]
    fn test_csv_loading() {
        let catalog = CropCatalog::from_csv_str(SAMPLE_CSV, b',').unwrap();
        assert_eq!(catalog.len(), 3);

        let rice = &catalog.as_slice()[0];
        assert_eq!(rice.name, "Rice");
        assert_eq!(rice.nitrogen, 80.0);
        assert_eq!(rice.seasons, vec!["kharif", "monsoon"]);
        assert!(rice.soil.alluvial);
        assert!(rice.soil.loamy);
        assert!(!rice.soil.black);
        assert_eq!(rice.roi_percent(), 45.0);
    }

    #[test]
    fn test_missing_numerics_default_to_zero() {
        let catalog = CropCatalog::from_csv_str(SAMPLE_CSV, b',').unwrap();
        let mystery = &catalog.as_slice()[2];
        assert_eq!(mystery.nitrogen, 0.0);
        assert_eq!(mystery.phosphorus, 0.0);
        assert_eq!(mystery.ph, 0.0);
        assert!(mystery.seasons.is_empty());
        assert_eq!(mystery.roi_percent(), 0.0);
    }

    #[test]
    fn test_roi_parsing_tolerates_percent_suffix() {
        let mut profile = CropProfile {
            name: "Cotton".to_string(),
            return_on_investment_pct: "52%".to_string(),
            ..sample_profile("Cotton")
        };
        assert_eq!(profile.roi_percent(), 52.0);

        profile.return_on_investment_pct = "high".to_string();
        assert_eq!(profile.roi_percent(), 0.0);
    }
}
