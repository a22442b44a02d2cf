//! # Green Score Wire Types
//!
//! The response shape of the scoring backend's `/green-score` endpoint.
//!
//! ```text
//! GreenScoreResult
//! ├── zip: String
//! ├── coordinates: Coordinates        // [lat, lng] on the wire
//! ├── scores: BTreeMap<String, ScoreCategory>
//! │     ├── Success(CategoryMetrics)  // score + category-specific fields
//! │     └── Failure(CategoryFailure)  // { "error": ..., "timeout": bool }
//! └── overall_score: Option<f64>
//! ```
//!
//! The backend is trusted: unknown category keys are kept as-is and simply
//! ignored by presentation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geographic point. Serialized as a `[lat, lng]` pair.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

/// Category-specific fields of a successfully computed category.
///
/// Every field is optional; which ones are present depends on the category.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CategoryMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,

    // Air quality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_aqi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_pollutant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<serde_json::Value>,

    // Flood risk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zones: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_100_year: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfha: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_flood_distance_km: Option<f64>,

    // Traffic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_road_length: Option<f64>,

    // Green space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_distance_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_parks: Option<f64>,

    // Toxic sites
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_sites: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_distance_miles: Option<f64>,

    // Demographics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_population: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_male: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_female: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_white: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_black: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_hispanic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poverty_rate: Option<f64>,

    // Water, transit, sea level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_features: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stops_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inundated_feet: Option<serde_json::Value>,

    // Provenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquired: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl CategoryMetrics {
    /// Sea-level rise levels (in feet) at which the ZIP is inundated,
    /// in ascending order. Keys that are not numbers sort last.
    pub fn inundated_levels(&self) -> Vec<String> {
        let Some(serde_json::Value::Object(levels)) = &self.inundated_feet else {
            return Vec::new();
        };
        let mut flooded: Vec<&String> = levels
            .iter()
            .filter(|(_, v)| v.as_bool().unwrap_or(false))
            .map(|(k, _)| k)
            .collect();
        flooded.sort_by(|a, b| {
            match (a.parse::<f64>(), b.parse::<f64>()) {
                (Ok(x), Ok(y)) => x.total_cmp(&y),
                (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                (Err(_), Err(_)) => a.cmp(b),
            }
        });
        flooded.into_iter().cloned().collect()
    }
}

/// A category the backend failed to compute.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryFailure {
    pub error: String,
    #[serde(default)]
    pub timeout: bool,
}

/// Result for one environmental dimension.
///
/// An object with a string `error` field is a failure; anything else is a success.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ScoreCategory {
    Failure(CategoryFailure),
    Success(CategoryMetrics),
}

/// The twelve categories the client knows how to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    AirQuality,
    TreeCanopy,
    Pavement,
    StaticFloodRisk,
    RiverineFloodRisk,
    Traffic,
    GreenSpace,
    ToxicSites,
    Demographics,
    WaterAvailability,
    TransitAccess,
    SeaLevelRise,
}

impl CategoryKey {
    /// Presentation order. Demographics always comes last.
    pub const DISPLAY_ORDER: [CategoryKey; 12] = [
        CategoryKey::AirQuality,
        CategoryKey::TreeCanopy,
        CategoryKey::Pavement,
        CategoryKey::StaticFloodRisk,
        CategoryKey::RiverineFloodRisk,
        CategoryKey::Traffic,
        CategoryKey::GreenSpace,
        CategoryKey::ToxicSites,
        CategoryKey::WaterAvailability,
        CategoryKey::TransitAccess,
        CategoryKey::SeaLevelRise,
        CategoryKey::Demographics,
    ];

    /// Key used in the `scores` object.
    pub fn wire_name(self) -> &'static str {
        match self {
            CategoryKey::AirQuality => "air_quality",
            CategoryKey::TreeCanopy => "tree_canopy",
            CategoryKey::Pavement => "pavement",
            CategoryKey::StaticFloodRisk => "static_flood_risk",
            CategoryKey::RiverineFloodRisk => "riverine_flood_risk",
            CategoryKey::Traffic => "traffic",
            CategoryKey::GreenSpace => "green_space",
            CategoryKey::ToxicSites => "toxic_sites",
            CategoryKey::Demographics => "demographics",
            CategoryKey::WaterAvailability => "water_availability",
            CategoryKey::TransitAccess => "transit_access",
            CategoryKey::SeaLevelRise => "sea_level_rise",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryKey::AirQuality => "Air Quality",
            CategoryKey::TreeCanopy => "Tree Canopy",
            CategoryKey::Pavement => "Pavement",
            CategoryKey::StaticFloodRisk => "Static Flood Risk",
            CategoryKey::RiverineFloodRisk => "Flood Risk",
            CategoryKey::Traffic => "Traffic",
            CategoryKey::GreenSpace => "Green Space",
            CategoryKey::ToxicSites => "Toxic Sites",
            CategoryKey::Demographics => "Demographics",
            CategoryKey::WaterAvailability => "Water Availability",
            CategoryKey::TransitAccess => "Transit",
            CategoryKey::SeaLevelRise => "Sea Level Rise",
        }
    }
}

/// Aggregate green score for one ZIP code.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GreenScoreResult {
    pub zip: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub scores: BTreeMap<String, ScoreCategory>,
    #[serde(default)]
    pub overall_score: Option<f64>,
}

impl GreenScoreResult {
    pub fn category(&self, key: CategoryKey) -> Option<&ScoreCategory> {
        self.scores.get(key.wire_name())
    }

    /// Recognized categories present in the result, in display order.
    pub fn categories(&self) -> Vec<(CategoryKey, &ScoreCategory)> {
        CategoryKey::DISPLAY_ORDER
            .into_iter()
            .filter_map(|key| self.category(key).map(|cat| (key, cat)))
            .collect()
    }
}
