//! Reporting service for the admin dashboard and regulator views
//!
//! Counts come from stored data. Figures with no stored source (farmer
//! registrations, uptime, environmental impact) are fixed demo values.

use chrono::Utc;
use rust_decimal::Decimal;
use shared::analytics::{compliance_rate, harvest_summary, status_counts};
use shared::derivation::{active_batches, processed_batches};
use shared::{
    CollectionRepository, ComplianceReport, DashboardStats, EnvironmentalReport, HarvestSummary,
    LabResultLog, ProcessingLog,
};

use crate::config::LatencyConfig;
use crate::error::AppResult;
use crate::services::simulate_latency;

const REGISTERED_FARMERS: u32 = 1247;
const NETWORK_UPTIME_PERCENT: Decimal = Decimal::from_parts(998, 0, 0, false, 1);

const CARBON_FOOTPRINT_KG: Decimal = Decimal::from_parts(24_500, 0, 0, false, 1);
const WATER_USAGE_LITERS: Decimal = Decimal::from_parts(15_800, 0, 0, false, 0);
const SUSTAINABLE_SOURCING_PERCENT: Decimal = Decimal::from_parts(875, 0, 0, false, 1);

const AYUSH_STANDARDS: [&str; 4] = [
    "AYUSH GMP",
    "WHO GACP",
    "NMPB Good Field Collection Practices",
    "Organic (NPOP)",
];

#[derive(Clone)]
pub struct ReportingService {
    collections: CollectionRepository,
    processing: ProcessingLog,
    lab: LabResultLog,
    latency: LatencyConfig,
}

impl ReportingService {
    pub fn new(
        collections: CollectionRepository,
        processing: ProcessingLog,
        lab: LabResultLog,
        latency: LatencyConfig,
    ) -> Self {
        Self {
            collections,
            processing,
            lab,
            latency,
        }
    }

    pub async fn get_dashboard_stats(&self) -> AppResult<DashboardStats> {
        simulate_latency(self.latency.read()).await;

        let collections = self.collections.list();
        let steps = self.processing.all();
        let counts = status_counts(&collections);

        Ok(DashboardStats {
            total_collections: counts.total(),
            queued_collections: counts.queued,
            synced_collections: counts.synced,
            verified_collections: counts.verified,
            recalled_collections: counts.recalled,
            active_batches: active_batches(&collections, &steps).len(),
            processed_batches: processed_batches(&collections, &steps).len(),
            lab_results: self.lab.count(),
            registered_farmers: REGISTERED_FARMERS,
            network_uptime_percent: NETWORK_UPTIME_PERCENT,
        })
    }

    pub async fn get_harvest_data(&self) -> AppResult<Vec<HarvestSummary>> {
        simulate_latency(self.latency.read()).await;
        Ok(harvest_summary(&self.collections.list()))
    }

    pub async fn get_environmental_report(&self) -> AppResult<EnvironmentalReport> {
        simulate_latency(self.latency.read()).await;

        let geo_tagged = self
            .collections
            .list()
            .iter()
            .filter(|c| c.geo.is_some())
            .count();

        Ok(EnvironmentalReport {
            carbon_footprint_kg: CARBON_FOOTPRINT_KG,
            water_usage_liters: WATER_USAGE_LITERS,
            sustainable_sourcing_percent: SUSTAINABLE_SOURCING_PERCENT,
            geo_tagged_collections: geo_tagged,
            generated_at: Utc::now(),
        })
    }

    pub async fn get_ayush_compliance(&self) -> AppResult<ComplianceReport> {
        simulate_latency(self.latency.read()).await;

        let counts = status_counts(&self.collections.list());
        Ok(ComplianceReport {
            compliance_rate_percent: compliance_rate(&counts),
            verified_collections: counts.verified,
            total_collections: counts.total(),
            batches_with_passing_lab_results: self.lab.passing_batches(),
            standards: AYUSH_STANDARDS.iter().map(|s| s.to_string()).collect(),
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mock_constants() {
        assert_eq!(NETWORK_UPTIME_PERCENT, Decimal::from_str("99.8").unwrap());
        assert_eq!(SUSTAINABLE_SOURCING_PERCENT, Decimal::from_str("87.5").unwrap());
        assert_eq!(CARBON_FOOTPRINT_KG, Decimal::from_str("2450.0").unwrap());
    }
}
