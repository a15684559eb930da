//! Lab testing models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A laboratory test result attached to a batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    pub id: String,
    pub batch_id: String,
    pub test_type: String,
    pub result: LabVerdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purity_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pesticide_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub tested_at: DateTime<Utc>,
}

/// Outcome of a lab test
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum LabVerdict {
    Pass,
    Fail,
    #[default]
    Pending,
}

/// Input for recording a lab result
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewLabResult {
    #[validate(length(min = 1, message = "Test type is required"))]
    pub test_type: String,
    pub result: Option<LabVerdict>,
    pub moisture_percent: Option<Decimal>,
    pub purity_percent: Option<Decimal>,
    pub pesticide_level: Option<String>,
    pub lab_name: Option<String>,
    pub notes: Option<String>,
}

impl NewLabResult {
    pub fn new(test_type: impl Into<String>, result: LabVerdict) -> Self {
        Self {
            test_type: test_type.into(),
            result: Some(result),
            moisture_percent: None,
            purity_percent: None,
            pesticide_level: None,
            lab_name: None,
            notes: None,
        }
    }

    pub fn into_result(self, id: String, batch_id: &str, now: DateTime<Utc>) -> LabResult {
        LabResult {
            id,
            batch_id: batch_id.to_string(),
            test_type: self.test_type,
            result: self.result.unwrap_or_default(),
            moisture_percent: self.moisture_percent,
            purity_percent: self.purity_percent,
            pesticide_level: self.pesticide_level,
            lab_name: self.lab_name,
            notes: self.notes,
            tested_at: now,
        }
    }
}
