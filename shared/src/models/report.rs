//! Dashboard and report models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_collections: usize,
    pub queued_collections: usize,
    pub synced_collections: usize,
    pub verified_collections: usize,
    pub recalled_collections: usize,
    pub active_batches: usize,
    pub processed_batches: usize,
    pub lab_results: usize,
    /// Mock figure, not derived from stored data
    pub registered_farmers: u32,
    /// Mock figure, not derived from stored data
    pub network_uptime_percent: Decimal,
}

/// Per-herb harvest aggregation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HarvestSummary {
    pub herb: String,
    pub collections: usize,
    pub verified: usize,
    pub total_quantity_kg: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalReport {
    pub carbon_footprint_kg: Decimal,
    pub water_usage_liters: Decimal,
    pub sustainable_sourcing_percent: Decimal,
    pub geo_tagged_collections: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub compliance_rate_percent: Decimal,
    pub verified_collections: usize,
    pub total_collections: usize,
    pub batches_with_passing_lab_results: usize,
    pub standards: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Result of a simulated file upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub file_name: String,
    pub size_bytes: usize,
    /// Hex SHA-256 of the content
    pub content_hash: String,
    /// Simulated content address derived from the hash
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}
