//! Processing step models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One manufacturing operation applied to a batch.
///
/// Steps are append-only and keyed by batch id in storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStep {
    pub step_type: StepType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: StepStatus,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}

impl ProcessingStep {
    pub fn is_completed(&self) -> bool {
        self.status == StepStatus::Completed
    }
}

/// Kind of processing operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepType {
    Drying,
    Grinding,
    Storage,
    QualityCheck,
    Packaging,
    Cleaning,
    Custom(String),
}

impl StepType {
    pub fn label(&self) -> &str {
        match self {
            StepType::Drying => "Drying",
            StepType::Grinding => "Grinding",
            StepType::Storage => "Storage",
            StepType::QualityCheck => "Quality Check",
            StepType::Packaging => "Packaging",
            StepType::Cleaning => "Cleaning",
            StepType::Custom(name) => name,
        }
    }
}

impl From<String> for StepType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Drying" => StepType::Drying,
            "Grinding" => StepType::Grinding,
            "Storage" => StepType::Storage,
            "Quality Check" => StepType::QualityCheck,
            "Packaging" => StepType::Packaging,
            "Cleaning" => StepType::Cleaning,
            _ => StepType::Custom(label),
        }
    }
}

impl From<StepType> for String {
    fn from(step: StepType) -> Self {
        step.label().to_string()
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StepStatus {
    #[default]
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
}

/// Input for recording a processing step
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProcessingStep {
    #[validate(length(min = 1, message = "Step type is required"))]
    pub step_type: String,
    pub temperature: Option<String>,
    #[serde(default)]
    pub duration: String,
    pub notes: Option<String>,
    /// Defaults to Completed
    pub status: Option<StepStatus>,
}

impl NewProcessingStep {
    pub fn new(step_type: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            step_type: step_type.into(),
            temperature: None,
            duration: duration.into(),
            notes: None,
            status: None,
        }
    }

    pub fn in_progress(mut self) -> Self {
        self.status = Some(StepStatus::InProgress);
        self
    }

    pub fn into_step(self, now: DateTime<Utc>) -> ProcessingStep {
        ProcessingStep {
            step_type: StepType::from(self.step_type),
            temperature: self.temperature.filter(|t| !t.trim().is_empty()),
            duration: self.duration,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            status: self.status.unwrap_or_default(),
            date: now.date_naive(),
            timestamp: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_status_serialization() {
        assert_eq!(
            serde_json::to_string(&StepStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::to_string(&StepStatus::Completed).unwrap(),
            "\"Completed\""
        );
    }

    #[test]
    fn test_new_step_defaults_to_completed() {
        let step = NewProcessingStep::new("Drying", "2h").into_step(Utc::now());
        assert_eq!(step.step_type, StepType::Drying);
        assert!(step.is_completed());
    }

    #[test]
    fn test_custom_step_type_preserved() {
        let step = StepType::from("Steam Distillation".to_string());
        assert_eq!(step.label(), "Steam Distillation");
    }
}
