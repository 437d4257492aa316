use serde::{Deserialize, Serialize};

use super::OwnerProfile;

/// One secondary guess returned next to the primary breed. The response
/// schema does not require either field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlternateBreed {
    #[serde(rename = "breed", default, skip_serializing_if = "Option::is_none")]
    pub breed_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

/// Structured answer of the vision service, kept exactly as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    #[serde(rename = "breed")]
    pub breed_label: String,
    /// Nominally 0..=100; not clamped.
    pub certainty: f64,
    #[serde(rename = "estimatedWeight")]
    pub estimated_weight_range: String,
    #[serde(rename = "estimatedAge")]
    pub estimated_age_category: String,
    pub description: String,
    #[serde(rename = "characteristics")]
    pub owner_profile: OwnerProfile,
    #[serde(rename = "possibleBreeds")]
    pub alternate_breeds: Vec<AlternateBreed>,
}

/// A completed scan. Created once after a successful analysis and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanRecord {
    /// Three decimal digits, 100..=999.
    pub id: String,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    /// The submitted image as a `data:` URL.
    #[serde(rename = "imageUrl")]
    pub image_data: String,
    #[serde(rename = "data")]
    pub analysis: AnalysisResult,
}

impl ScanRecord {
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
    }
}
