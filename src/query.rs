//! Match Query and Parameter Normalization
//!
//! Defines the MatchQuery struct representing a farmer's soil and climate
//! readings, plus the six-category soil type classification used by the
//! soil factor scorer.

/// The six soil categories tracked in the crop catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilType {
    Red,
    Black,
    Alluvial,
    Sandy,
    Loamy,
    Laterite,
}

impl SoilType {
    /// Parse a soil type name (case-insensitive). Unknown names return None
    /// and degrade to a neutral soil sub-score downstream.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "red" => Some(SoilType::Red),
            "black" => Some(SoilType::Black),
            "alluvial" => Some(SoilType::Alluvial),
            "sandy" => Some(SoilType::Sandy),
            "loamy" => Some(SoilType::Loamy),
            "laterite" => Some(SoilType::Laterite),
            _ => None,
        }
    }

    /// Friendly name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            SoilType::Red => "Red",
            SoilType::Black => "Black",
            SoilType::Alluvial => "Alluvial",
            SoilType::Sandy => "Sandy",
            SoilType::Loamy => "Loamy",
            SoilType::Laterite => "Laterite",
        }
    }

    /// Soils agronomically close enough that a crop thriving in one of them
    /// is a workable (0.7) match for a query on this soil.
    ///
    /// Each direction is defined explicitly; the relation is not assumed
    /// symmetric.
    pub fn compatible_soils(&self) -> &'static [SoilType] {
        match self {
            SoilType::Alluvial => &[SoilType::Loamy, SoilType::Sandy],
            SoilType::Black => &[SoilType::Loamy, SoilType::Red],
            SoilType::Red => &[SoilType::Laterite, SoilType::Black],
            SoilType::Sandy => &[SoilType::Alluvial, SoilType::Laterite],
            SoilType::Loamy => &[SoilType::Alluvial, SoilType::Black],
            SoilType::Laterite => &[SoilType::Red, SoilType::Sandy],
        }
    }

    /// Check if a crop on `other` soil is compatible with a query on this soil
    pub fn is_compatible_with(&self, other: &SoilType) -> bool {
        self.compatible_soils().contains(other)
    }

    /// Get all soil types
    pub fn all() -> &'static [SoilType] {
        &[
            SoilType::Red,
            SoilType::Black,
            SoilType::Alluvial,
            SoilType::Sandy,
            SoilType::Loamy,
            SoilType::Laterite,
        ]
    }
}

/// A farmer's soil and climate readings for one recommendation request.
///
/// Constructed fresh per call through [`MatchQuery::from_raw`]; never shared
/// across calls. All numeric fields are finite after normalization.
#[derive(Debug, Clone)]
pub struct MatchQuery {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,

    /// Target season, trimmed and lowercased. Empty = unknown.
    pub season: String,

    /// Soil type name, trimmed and lowercased. May be unknown.
    pub soil_type: String,
}

/// Clamp a raw reading to a finite value (sensor glue can hand us NaN)
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl MatchQuery {
    /// Normalize raw farmer/sensor inputs into the canonical query shape.
    ///
    /// Non-finite numerics become 0.0; season and soil type are trimmed and
    /// lowercased so all downstream matching is case-insensitive.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        ph: f64,
        temperature: f64,
        humidity: f64,
        rainfall: f64,
        season: &str,
        soil_type: &str,
    ) -> Self {
        Self {
            nitrogen: finite_or_zero(nitrogen),
            phosphorus: finite_or_zero(phosphorus),
            potassium: finite_or_zero(potassium),
            ph: finite_or_zero(ph),
            temperature: finite_or_zero(temperature),
            humidity: finite_or_zero(humidity),
            rainfall: finite_or_zero(rainfall),
            season: season.trim().to_lowercase(),
            soil_type: soil_type.trim().to_lowercase(),
        }
    }

    /// Resolved soil type, if the query names one of the six known categories
    pub fn soil(&self) -> Option<SoilType> {
        SoilType::from_name(&self.soil_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soil_type_parsing() {
        assert_eq!(SoilType::from_name("alluvial"), Some(SoilType::Alluvial));
        assert_eq!(SoilType::from_name("  Black "), Some(SoilType::Black));
        assert_eq!(SoilType::from_name("LATERITE"), Some(SoilType::Laterite));
        assert_eq!(SoilType::from_name("moon_dust"), None);
        assert_eq!(SoilType::from_name(""), None);
    }

    #[test]
    fn test_soil_compatibility_is_directional() {
        // Alluvial accepts sandy-soil crops...
        assert!(SoilType::Alluvial.is_compatible_with(&SoilType::Sandy));
        // ...but black does not accept sandy-soil crops
        assert!(!SoilType::Black.is_compatible_with(&SoilType::Sandy));
        assert!(SoilType::Black.is_compatible_with(&SoilType::Red));
    }

    #[test]
    fn test_query_normalization() {
        let q = MatchQuery::from_raw(
            80.0,
            f64::NAN,
            f64::INFINITY,
            6.5,
            25.0,
            80.0,
            200.0,
            " Kharif ",
            "Alluvial",
        );
        assert_eq!(q.phosphorus, 0.0);
        assert_eq!(q.potassium, 0.0);
        assert_eq!(q.season, "kharif");
        assert_eq!(q.soil_type, "alluvial");
        assert_eq!(q.soil(), Some(SoilType::Alluvial));
    }
}
