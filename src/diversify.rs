//! Category Diversifier
//!
//! Prevents the final list from being dominated by one crop family. Crops
//! are classified into coarse agricultural categories by keyword
//! inspection of their names, then selected under a per-category quota.
//!
//! Classification is recomputed on every call rather than stored on the
//! profile, so a vocabulary change never requires a catalog migration.
//! The keyword lists are a knowingly fragile heuristic carried over from
//! the catalog's naming conventions ("sweet potato" lands in Vegetables);
//! they are matched in a fixed priority order and the first hit wins.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::catalog::CropProfile;
use crate::ranker::ScoredCrop;

/// Coarse agricultural category, derived from the crop name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropCategory {
    Cereals,
    Vegetables,
    CashCrops,
    Oilseeds,
    Pulses,
    Fruits,
    SpicesTrees,
    Specialty,
    Others,
}

const CEREAL_KEYWORDS: &[&str] = &[
    "rice", "wheat", "barley", "maize", "corn", "millet", "sorghum", "paddy", "oat", "ragi",
    "bajra", "jowar",
];
const VEGETABLE_KEYWORDS: &[&str] = &[
    "potato", "onion", "tomato", "carrot", "cabbage", "brinjal", "cauliflower", "cucumber",
    "watermelon", "okra", "radish", "spinach", "pumpkin", "gourd",
];
const CASH_CROP_KEYWORDS: &[&str] = &["cotton", "sugarcane", "jute", "tobacco", "indigo"];
const OILSEED_KEYWORDS: &[&str] = &[
    "groundnut", "mustard", "sunflower", "sesame", "soybean", "safflower", "castor", "linseed",
];
const PULSE_KEYWORDS: &[&str] = &[
    "gram", "lentil", "pea", "bean", "moong", "urad", "arhar", "pigeon", "chickpea", "masoor",
    "cowpea",
];
const FRUIT_KEYWORDS: &[&str] = &[
    "mango", "banana", "apple", "orange", "grape", "guava", "papaya", "pomegranate", "litchi",
    "pineapple",
];
const SPICE_TREE_KEYWORDS: &[&str] = &[
    "pepper", "cardamom", "clove", "cinnamon", "turmeric", "ginger", "chilli", "coconut",
    "arecanut", "cashew", "coffee", "tea", "rubber",
];
const SPECIALTY_KEYWORDS: &[&str] = &[
    "mushroom", "bamboo", "aloe", "saffron", "vanilla", "herb", "flower", "medicinal",
];

impl CropCategory {
    /// Categories in quota-priority order (Others is the catch-all)
    pub fn all() -> &'static [CropCategory] {
        &[
            CropCategory::Cereals,
            CropCategory::Vegetables,
            CropCategory::CashCrops,
            CropCategory::Oilseeds,
            CropCategory::Pulses,
            CropCategory::Fruits,
            CropCategory::SpicesTrees,
            CropCategory::Specialty,
            CropCategory::Others,
        ]
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            CropCategory::Cereals => CEREAL_KEYWORDS,
            CropCategory::Vegetables => VEGETABLE_KEYWORDS,
            CropCategory::CashCrops => CASH_CROP_KEYWORDS,
            CropCategory::Oilseeds => OILSEED_KEYWORDS,
            CropCategory::Pulses => PULSE_KEYWORDS,
            CropCategory::Fruits => FRUIT_KEYWORDS,
            CropCategory::SpicesTrees => SPICE_TREE_KEYWORDS,
            CropCategory::Specialty => SPECIALTY_KEYWORDS,
            CropCategory::Others => &[],
        }
    }

    /// Maximum contribution of this category to the diversified portion of
    /// the result. Vegetables and cereals are weighted higher because they
    /// dominate typical catalogs.
    pub fn quota(&self) -> usize {
        match self {
            CropCategory::Cereals => 2,
            CropCategory::Vegetables => 3,
            CropCategory::CashCrops => 1,
            CropCategory::Oilseeds => 2,
            CropCategory::Pulses => 1,
            CropCategory::Fruits => 2,
            CropCategory::SpicesTrees => 1,
            CropCategory::Specialty => 1,
            CropCategory::Others => 1,
        }
    }

    /// Friendly name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            CropCategory::Cereals => "Cereals",
            CropCategory::Vegetables => "Vegetables",
            CropCategory::CashCrops => "Cash crops",
            CropCategory::Oilseeds => "Oilseeds",
            CropCategory::Pulses => "Pulses",
            CropCategory::Fruits => "Fruits",
            CropCategory::SpicesTrees => "Spices & tree crops",
            CropCategory::Specialty => "Specialty",
            CropCategory::Others => "Others",
        }
    }

    /// Classify a crop name into exactly one category (first match wins)
    pub fn classify(name: &str) -> CropCategory {
        let name = name.to_lowercase();
        for category in Self::all() {
            if category
                .keywords()
                .iter()
                .any(|keyword| name.contains(keyword))
            {
                return *category;
            }
        }
        CropCategory::Others
    }
}

/// Select from the ranked list under per-category quotas, deduplicating by
/// case-insensitive crop name.
///
/// If the quota pass yields fewer than `min_results`, a second pass keeps
/// scanning the ranked list ignoring quotas until `min_results` is reached
/// or the list is exhausted. Quotas cap category contribution; they never
/// shrink the result when no alternatives exist.
pub fn diversify(
    ranked: &[ScoredCrop],
    catalog: &[CropProfile],
    min_results: usize,
) -> Vec<ScoredCrop> {
    let mut selected: Vec<ScoredCrop> = Vec::new();
    let mut seen_names: FxHashSet<String> = FxHashSet::default();
    let mut category_counts: FxHashMap<CropCategory, usize> = FxHashMap::default();

    // Quota pass
    for scored in ranked {
        let name = catalog[scored.index].name.to_lowercase();
        if seen_names.contains(&name) {
            continue;
        }

        let category = CropCategory::classify(&name);
        let count = category_counts.entry(category).or_insert(0);
        if *count < category.quota() {
            *count += 1;
            seen_names.insert(name);
            selected.push(scored.clone());
        }
    }

    // Relaxation pass: quotas are a preference, not a hard floor on size
    if selected.len() < min_results {
        for scored in ranked {
            if selected.len() >= min_results {
                break;
            }
            let name = catalog[scored.index].name.to_lowercase();
            if seen_names.insert(name) {
                selected.push(scored.clone());
            }
        }
    }

    tracing::debug!(
        ranked = ranked.len(),
        selected = selected.len(),
        "diversified ranked list"
    );
    selected
}
