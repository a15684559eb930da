//! Collection (farmer submission) models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::GeoLocation;

/// A farmer or collector submission; the root record of the supply chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    /// Human-facing batch label (e.g., "BATCH-ASH-2024-001")
    pub batch_id: String,
    pub collector_id: String,
    pub farmer: String,
    pub herb: String,
    /// Botanical name; falls back to `herb` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_name: Option<String>,
    /// Display magnitude with unit (e.g., "5 kg")
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: CollectionStatus,
    pub quality_grade: QualityGrade,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Collection {
    pub fn species_name(&self) -> &str {
        self.species_name.as_deref().unwrap_or(&self.herb)
    }

    pub fn submission_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Lifecycle state of a collection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CollectionStatus {
    Queued,
    Synced,
    Verified,
    Recalled,
}

impl CollectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionStatus::Queued => "Queued",
            CollectionStatus::Synced => "Synced",
            CollectionStatus::Verified => "Verified",
            CollectionStatus::Recalled => "Recalled",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CollectionStatus::Queued => 0,
            CollectionStatus::Synced => 1,
            CollectionStatus::Verified => 2,
            CollectionStatus::Recalled => 3,
        }
    }

    /// Forward moves along Queued -> Synced -> Verified, recall from anywhere.
    /// Recalled is terminal. Re-setting the current status is allowed.
    pub fn can_transition_to(&self, next: CollectionStatus) -> bool {
        match (self, next) {
            (CollectionStatus::Recalled, CollectionStatus::Recalled) => true,
            (CollectionStatus::Recalled, _) => false,
            (_, CollectionStatus::Recalled) => true,
            (current, next) => next.rank() >= current.rank(),
        }
    }

    /// Whether a collection in this state is eligible for the active batch view
    pub fn is_batch_ready(&self) -> bool {
        matches!(self, CollectionStatus::Synced | CollectionStatus::Verified)
    }
}

impl std::fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CollectionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "queued" => Ok(CollectionStatus::Queued),
            "synced" => Ok(CollectionStatus::Synced),
            "verified" => Ok(CollectionStatus::Verified),
            "recalled" => Ok(CollectionStatus::Recalled),
            other => Err(format!("Unknown collection status: {}", other)),
        }
    }
}

/// Quality grade assigned at submission.
///
/// Stored as its display label. Labels outside the three known grades are
/// preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QualityGrade {
    Premium,
    Standard,
    Basic,
    Other(String),
}

impl QualityGrade {
    pub fn label(&self) -> &str {
        match self {
            QualityGrade::Premium => "Premium (AA)",
            QualityGrade::Standard => "Standard (A)",
            QualityGrade::Basic => "Basic (B)",
            QualityGrade::Other(label) => label,
        }
    }

    /// Two-tier score used by the batch views: Premium is 98, everything else 92
    pub fn score(&self) -> u8 {
        match self {
            QualityGrade::Premium => 98,
            _ => 92,
        }
    }
}

impl Default for QualityGrade {
    fn default() -> Self {
        QualityGrade::Standard
    }
}

impl From<String> for QualityGrade {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Premium (AA)" => QualityGrade::Premium,
            "Standard (A)" => QualityGrade::Standard,
            "Basic (B)" => QualityGrade::Basic,
            _ => QualityGrade::Other(label),
        }
    }
}

impl From<QualityGrade> for String {
    fn from(grade: QualityGrade) -> Self {
        grade.label().to_string()
    }
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Input for a new submission from the farmer form
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCollection {
    #[validate(length(min = 1, message = "Herb name is required"))]
    pub herb: String,
    pub species_name: Option<String>,
    #[validate(length(min = 1, message = "Quantity is required"))]
    pub quantity: String,
    #[validate(length(min = 1, message = "Farmer is required"))]
    pub farmer: String,
    /// Defaults to `farmer` when absent
    pub collector_id: Option<String>,
    pub moisture: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub accuracy: Option<String>,
    pub location: Option<String>,
    pub status: Option<CollectionStatus>,
    pub quality_grade: Option<QualityGrade>,
}

impl NewCollection {
    /// Minimal submission; every optional field empty
    pub fn new(herb: impl Into<String>, quantity: impl Into<String>, farmer: impl Into<String>) -> Self {
        Self {
            herb: herb.into(),
            species_name: None,
            quantity: quantity.into(),
            farmer: farmer.into(),
            collector_id: None,
            moisture: None,
            latitude: None,
            longitude: None,
            accuracy: None,
            location: None,
            status: None,
            quality_grade: None,
        }
    }

    pub fn with_status(mut self, status: CollectionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Build the stored record with the given identity and creation time.
    /// Status defaults to Queued, grade to Standard.
    pub fn into_collection(self, ids: CollectionIds, now: DateTime<Utc>) -> Collection {
        let geo = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoLocation {
                latitude,
                longitude,
                accuracy: self.accuracy,
            }),
            _ => None,
        };
        let location = self
            .location
            .or_else(|| geo.as_ref().map(GeoLocation::coordinates));

        Collection {
            id: ids.id,
            batch_id: ids.batch_id,
            collector_id: self.collector_id.unwrap_or_else(|| self.farmer.clone()),
            farmer: self.farmer,
            herb: self.herb,
            species_name: self.species_name.filter(|s| !s.trim().is_empty()),
            quantity: self.quantity,
            moisture: self.moisture,
            geo,
            location,
            status: self.status.unwrap_or(CollectionStatus::Queued),
            quality_grade: self.quality_grade.unwrap_or_default(),
            created_at: now,
            last_updated: now,
        }
    }
}

/// Identity pair assigned to a new collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionIds {
    pub id: String,
    pub batch_id: String,
}

/// Generate `COL<suffix>` / `BATCH-<suffix>` identifiers from the last six
/// digits of the millisecond timestamp, bumping the suffix past any id for
/// which `taken` returns true.
pub fn generate_collection_ids(now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> CollectionIds {
    let mut suffix = now.timestamp_millis().rem_euclid(1_000_000);
    loop {
        let id = format!("COL{:06}", suffix);
        if !taken(&id) {
            return CollectionIds {
                id,
                batch_id: format!("BATCH-{:06}", suffix),
            };
        }
        suffix = (suffix + 1) % 1_000_000;
    }
}
