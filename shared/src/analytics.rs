//! Aggregations over collections for the dashboard reports

use rust_decimal::Decimal;

use crate::models::{Collection, CollectionStatus, HarvestSummary};
use crate::validation::parse_quantity_kg;

/// Collection counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub queued: usize,
    pub synced: usize,
    pub verified: usize,
    pub recalled: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.queued + self.synced + self.verified + self.recalled
    }
}

pub fn status_counts(collections: &[Collection]) -> StatusCounts {
    collections
        .iter()
        .fold(StatusCounts::default(), |mut counts, c| {
            match c.status {
                CollectionStatus::Queued => counts.queued += 1,
                CollectionStatus::Synced => counts.synced += 1,
                CollectionStatus::Verified => counts.verified += 1,
                CollectionStatus::Recalled => counts.recalled += 1,
            }
            counts
        })
}

/// Per-herb totals in first-seen order. Unparseable quantities count as a
/// collection but add nothing to the weight.
pub fn harvest_summary(collections: &[Collection]) -> Vec<HarvestSummary> {
    let mut summaries: Vec<HarvestSummary> = Vec::new();
    for collection in collections {
        let index = match summaries.iter().position(|s| s.herb == collection.herb) {
            Some(index) => index,
            None => {
                summaries.push(HarvestSummary {
                    herb: collection.herb.clone(),
                    collections: 0,
                    verified: 0,
                    total_quantity_kg: Decimal::ZERO,
                });
                summaries.len() - 1
            }
        };
        let summary = &mut summaries[index];
        summary.collections += 1;
        if collection.status == CollectionStatus::Verified {
            summary.verified += 1;
        }
        summary.total_quantity_kg += parse_quantity_kg(&collection.quantity).unwrap_or(Decimal::ZERO);
    }
    summaries
}

/// Verified share of all collections in percent, one decimal place; zero when empty
pub fn compliance_rate(counts: &StatusCounts) -> Decimal {
    let total = counts.total();
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(counts.verified as u64) * Decimal::from(100) / Decimal::from(total as u64)).round_dp(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_collections;
    use std::str::FromStr;

    #[test]
    fn test_status_counts_for_seed() {
        let counts = status_counts(&default_collections());
        assert_eq!(counts.verified, 2);
        assert_eq!(counts.synced, 1);
        assert_eq!(counts.queued, 1);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_harvest_summary_groups_by_herb() {
        let mut collections = default_collections();
        let mut extra = collections[0].clone();
        extra.id = "COL900".to_string();
        extra.quantity = "unknown".to_string();
        collections.push(extra);

        let summary = harvest_summary(&collections);
        assert_eq!(summary[0].herb, "Ashwagandha");
        assert_eq!(summary[0].collections, 2);
        assert_eq!(summary[0].verified, 2);
        assert_eq!(summary[0].total_quantity_kg, Decimal::from(25));
        assert_eq!(summary.len(), 4);
    }

    #[test]
    fn test_compliance_rate() {
        let counts = StatusCounts {
            queued: 1,
            synced: 1,
            verified: 1,
            recalled: 0,
        };
        assert_eq!(compliance_rate(&counts), Decimal::from_str("33.3").unwrap());
        assert_eq!(compliance_rate(&StatusCounts::default()), Decimal::ZERO);
    }
}
