//! Property tests for the store, repository and batch derivation
//!
//! Covers:
//! - Storage round-trip fidelity
//! - Idempotent seeding
//! - Upsert correctness
//! - Active/processed partition
//! - Progress monotonicity

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use shared::derivation::{active_batches, processed_batches, progress};
use shared::seed::default_collections;
use shared::store::COLLECTIONS_KEY;
use shared::{
    Collection, CollectionIds, CollectionRepository, CollectionStatus, NewCollection,
    NewProcessingStep, ProcessingStep, StepsByBatch, StoreAdapter,
};

fn status_strategy() -> impl Strategy<Value = CollectionStatus> {
    prop_oneof![
        Just(CollectionStatus::Queued),
        Just(CollectionStatus::Synced),
        Just(CollectionStatus::Verified),
        Just(CollectionStatus::Recalled),
    ]
}

fn collection(n: usize, herb: &str, status: CollectionStatus) -> Collection {
    let created = Utc
        .with_ymd_and_hms(2024, 2, 1, 8, 0, 0)
        .single()
        .unwrap();
    NewCollection::new(herb, format!("{} kg", n + 1), "FARM-P")
        .with_status(status)
        .into_collection(
            CollectionIds {
                id: format!("COL{}", n),
                batch_id: format!("BATCH-{}", n),
            },
            created,
        )
}

fn step(completed: bool) -> ProcessingStep {
    let input = NewProcessingStep::new("Drying", "2h");
    let input = if completed { input } else { input.in_progress() };
    input.into_step(Utc::now())
}

prop_compose! {
    fn collections_strategy()(
        specs in prop::collection::vec(("[A-Z][a-z]{2,8}", status_strategy()), 0..12)
    ) -> Vec<Collection> {
        specs
            .into_iter()
            .enumerate()
            .map(|(n, (herb, status))| collection(n, &herb, status))
            .collect()
    }
}

// ============================================================================
// Round-trip: write(key, L); read(key) == L
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn property_store_round_trip(collections in collections_strategy()) {
        let store = StoreAdapter::in_memory();
        store.write(COLLECTIONS_KEY, &collections).unwrap();
        let read: Vec<Collection> = store.read(COLLECTIONS_KEY);
        prop_assert_eq!(read, collections);
    }

    #[test]
    fn property_upsert_length(collections in collections_strategy(), pick in any::<prop::sample::Index>()) {
        let repo = CollectionRepository::without_seed(StoreAdapter::in_memory());
        for c in &collections {
            repo.add(c.clone()).unwrap();
        }
        prop_assert_eq!(repo.list().len(), collections.len());

        // New id grows the list by one
        let fresh = collection(collections.len() + 100, "Amla", CollectionStatus::Synced);
        repo.add(fresh).unwrap();
        prop_assert_eq!(repo.list().len(), collections.len() + 1);

        // Existing id keeps the length and replaces the record in place
        if !collections.is_empty() {
            let index = pick.index(collections.len());
            let mut replacement = collections[index].clone();
            replacement.herb = "Replaced".to_string();
            repo.add(replacement.clone()).unwrap();

            let list = repo.list();
            prop_assert_eq!(list.len(), collections.len() + 1);
            prop_assert_eq!(&list[index], &replacement);
        }
    }

    #[test]
    fn property_active_and_processed_are_disjoint(
        collections in collections_strategy(),
        processed_mask in prop::collection::vec(0usize..3, 12),
    ) {
        let mut steps = StepsByBatch::new();
        for (c, count) in collections.iter().zip(processed_mask.iter()) {
            steps.insert(c.batch_id.clone(), (0..*count).map(|i| step(i % 2 == 0)).collect());
        }

        let active: HashSet<String> = active_batches(&collections, &steps)
            .into_iter()
            .map(|b| b.details.batch_id)
            .collect();
        let processed: Vec<String> = processed_batches(&collections, &steps)
            .into_iter()
            .map(|b| b.details.batch_id)
            .collect();

        for batch_id in &processed {
            prop_assert!(!active.contains(batch_id), "{} in both views", batch_id);
        }
        for batch_id in &active {
            prop_assert!(steps.get(batch_id).map_or(true, Vec::is_empty));
        }
    }

    #[test]
    fn property_views_follow_storage_order(collections in collections_strategy()) {
        let active = active_batches(&collections, &StepsByBatch::new());
        let expected: Vec<&str> = collections
            .iter()
            .filter(|c| matches!(c.status, CollectionStatus::Synced | CollectionStatus::Verified))
            .map(|c| c.batch_id.as_str())
            .collect();
        let actual: Vec<&str> = active.iter().map(|b| b.details.batch_id.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn property_progress_monotonic(completed in 0usize..20, pending in 0usize..20) {
        let total = completed + pending;
        let before = progress(completed, total);
        let after = progress(completed + 1, total + 1);
        prop_assert!(after >= before, "{} -> {}", before, after);
        prop_assert!(after <= 100);
    }

    #[test]
    fn property_progress_monotonic_on_view(pending in 0usize..6, completed in 0usize..6) {
        let collections = vec![collection(0, "Neem", CollectionStatus::Synced)];
        let mut custom: Vec<ProcessingStep> = (0..pending).map(|_| step(false)).collect();
        custom.extend((0..completed).map(|_| step(true)));
        custom.push(step(true));

        let mut steps = StepsByBatch::new();
        steps.insert("BATCH-0".to_string(), custom.clone());
        let before = processed_batches(&collections, &steps)[0].progress;

        custom.push(step(true));
        steps.insert("BATCH-0".to_string(), custom);
        let after = processed_batches(&collections, &steps)[0].progress;

        prop_assert!(after >= before);
    }
}

// ============================================================================
// Unit tests
// ============================================================================

#[test]
fn test_seeding_is_idempotent() {
    let repo = CollectionRepository::new(StoreAdapter::in_memory());
    assert_eq!(repo.list(), default_collections());
    assert_eq!(repo.list(), default_collections());
    assert_eq!(repo.list().len(), default_collections().len());
}

#[test]
fn test_seeding_skips_existing_data() {
    let store = StoreAdapter::in_memory();
    let own = vec![collection(1, "Neem", CollectionStatus::Synced)];
    store.write(COLLECTIONS_KEY, &own).unwrap();

    let repo = CollectionRepository::new(store);
    assert_eq!(repo.list(), own);
}

#[test]
fn test_update_status_bumps_last_updated() {
    let repo = CollectionRepository::new(StoreAdapter::in_memory());
    let before = repo.get("COL002").unwrap();

    let updated = repo.update_status("COL002", CollectionStatus::Verified).unwrap();
    assert_eq!(updated.status, CollectionStatus::Verified);
    assert!(updated.last_updated > before.last_updated);
    assert_eq!(repo.get("COL002").unwrap(), updated);
}

#[test]
fn test_unknown_status_update_leaves_store_untouched() {
    let repo = CollectionRepository::new(StoreAdapter::in_memory());
    repo.list();
    let before = repo.store().read_raw(COLLECTIONS_KEY);

    assert!(repo.update_status("COL999", CollectionStatus::Verified).is_err());
    assert_eq!(repo.store().read_raw(COLLECTIONS_KEY), before);
}
