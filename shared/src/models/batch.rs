//! Batch view models
//!
//! Batches are never persisted; they are projected from collections and
//! their processing steps on every read (see [`crate::derivation`]).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{CollectionStatus, ProcessingStep, QualityGrade, StepStatus};

/// Fields shared by both batch views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchDetails {
    pub id: String,
    pub batch_id: String,
    pub herb: String,
    pub species_name: String,
    pub farmer: String,
    pub collector_id: String,
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub harvest_date: NaiveDate,
    pub status: CollectionStatus,
    pub quality_grade: QualityGrade,
    pub quality_score: u8,
    pub processing_steps: Vec<BatchStep>,
}

/// A step as shown on a batch timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchStep {
    pub step: String,
    pub status: StepStatus,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&ProcessingStep> for BatchStep {
    fn from(step: &ProcessingStep) -> Self {
        BatchStep {
            step: step.step_type.label().to_string(),
            status: step.status,
            date: step.date,
            duration: Some(step.duration.clone()).filter(|d| !d.is_empty()),
            temperature: step.temperature.clone(),
            notes: step.notes.clone(),
        }
    }
}

/// Synced or verified collection with no custom processing yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveBatch {
    #[serde(flatten)]
    pub details: BatchDetails,
}

/// Collection with at least one custom processing step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedBatch {
    #[serde(flatten)]
    pub details: BatchDetails,
    /// Completed share of default plus custom steps, in percent
    pub progress: u8,
    pub custom_step_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_processed: Option<DateTime<Utc>>,
}

/// Either batch view, tagged for lookups by batch id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Batch {
    Active(ActiveBatch),
    Processed(ProcessedBatch),
}

impl Batch {
    pub fn details(&self) -> &BatchDetails {
        match self {
            Batch::Active(batch) => &batch.details,
            Batch::Processed(batch) => &batch.details,
        }
    }

    pub fn batch_id(&self) -> &str {
        &self.details().batch_id
    }
}
