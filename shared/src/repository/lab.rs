//! Lab result log, keyed by batch id

use std::collections::BTreeMap;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{LabResult, LabVerdict};
use crate::store::{StoreAdapter, LAB_RESULTS_KEY};

pub type LabResultsByBatch = BTreeMap<String, Vec<LabResult>>;

#[derive(Debug, Clone)]
pub struct LabResultLog {
    store: StoreAdapter,
}

impl LabResultLog {
    pub fn new(store: StoreAdapter) -> Self {
        Self { store }
    }

    pub fn all(&self) -> LabResultsByBatch {
        self.store.read(LAB_RESULTS_KEY)
    }

    pub fn results_for(&self, batch_id: &str) -> Vec<LabResult> {
        self.all().remove(batch_id).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.all().values().map(Vec::len).sum()
    }

    /// Batches whose most recent result is a pass
    pub fn passing_batches(&self) -> usize {
        self.all()
            .values()
            .filter(|results| {
                results
                    .last()
                    .map(|r| r.result == LabVerdict::Pass)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn append(&self, result: LabResult) -> RepositoryResult<()> {
        let batch_id = result.batch_id.clone();
        self.store
            .update(LAB_RESULTS_KEY, |results: &mut LabResultsByBatch| {
                results.entry(result.batch_id.clone()).or_default().push(result);
                Ok::<_, RepositoryError>(())
            })?;

        tracing::info!(batch_id = %batch_id, "Recorded lab result");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewLabResult;
    use chrono::Utc;

    #[test]
    fn test_passing_batches_uses_latest_result() {
        let log = LabResultLog::new(StoreAdapter::in_memory());
        let now = Utc::now();
        log.append(NewLabResult::new("Heavy metals", LabVerdict::Fail).into_result("L1".into(), "B1", now))
            .unwrap();
        log.append(NewLabResult::new("Heavy metals", LabVerdict::Pass).into_result("L2".into(), "B1", now))
            .unwrap();
        log.append(NewLabResult::new("Moisture", LabVerdict::Fail).into_result("L3".into(), "B2", now))
            .unwrap();

        assert_eq!(log.count(), 3);
        assert_eq!(log.passing_batches(), 1);
        assert_eq!(log.results_for("B1").len(), 2);
    }
}
