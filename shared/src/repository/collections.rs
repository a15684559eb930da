//! Collection repository

use chrono::{DateTime, Utc};

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{generate_collection_ids, Collection, CollectionStatus, NewCollection};
use crate::seed;
use crate::store::{StoreAdapter, COLLECTIONS_KEY, LAST_UPDATE_KEY, LEGACY_BATCHES_KEY};

/// CRUD over the single list of collections
#[derive(Debug, Clone)]
pub struct CollectionRepository {
    store: StoreAdapter,
    seed_on_first_access: bool,
}

impl CollectionRepository {
    /// Repository that seeds the demo dataset when the collection key is absent
    pub fn new(store: StoreAdapter) -> Self {
        Self {
            store,
            seed_on_first_access: true,
        }
    }

    /// Repository that never seeds
    pub fn without_seed(store: StoreAdapter) -> Self {
        Self {
            store,
            seed_on_first_access: false,
        }
    }

    pub fn store(&self) -> &StoreAdapter {
        &self.store
    }

    fn ensure_seeded(&self) {
        if !self.seed_on_first_access {
            return;
        }
        match self.store.initialize(COLLECTIONS_KEY, seed::default_collections) {
            Ok(true) => tracing::info!("Seeded demo collections"),
            Ok(false) => {}
            Err(e) => tracing::error!(error = %e, "Failed to seed demo collections"),
        }
    }

    /// All collections in storage order
    pub fn list(&self) -> Vec<Collection> {
        self.ensure_seeded();
        self.store.read(COLLECTIONS_KEY)
    }

    pub fn get(&self, id: &str) -> Option<Collection> {
        self.list().into_iter().find(|c| c.id == id)
    }

    pub fn find_by_batch(&self, batch_id: &str) -> Option<Collection> {
        self.list().into_iter().find(|c| c.batch_id == batch_id)
    }

    /// Upsert by id: replace in place when present, append otherwise.
    /// A replaced record keeps its original `batch_id`.
    pub fn add(&self, collection: Collection) -> RepositoryResult<()> {
        self.ensure_seeded();
        let id = collection.id.clone();
        let replaced = self
            .store
            .update(COLLECTIONS_KEY, |collections: &mut Vec<Collection>| {
                match collections.iter_mut().find(|c| c.id == collection.id) {
                    Some(existing) => {
                        let batch_id = std::mem::take(&mut existing.batch_id);
                        *existing = Collection {
                            batch_id,
                            ..collection
                        };
                        Ok::<_, RepositoryError>(true)
                    }
                    None => {
                        collections.push(collection);
                        Ok(false)
                    }
                }
            })?;

        tracing::info!(id = %id, replaced, "Saved collection");
        Ok(())
    }

    /// Append a new submission. Ids are picked while the list is locked, so
    /// concurrent submissions never share an id.
    pub fn insert_new(&self, input: NewCollection, now: DateTime<Utc>) -> RepositoryResult<Collection> {
        self.ensure_seeded();
        let collection = self
            .store
            .update(COLLECTIONS_KEY, |collections: &mut Vec<Collection>| {
                let ids = generate_collection_ids(now, |id| collections.iter().any(|c| c.id == id));
                let collection = input.into_collection(ids, now);
                collections.push(collection.clone());
                Ok::<_, RepositoryError>(collection)
            })?;

        tracing::info!(id = %collection.id, batch_id = %collection.batch_id, "Inserted collection");
        Ok(collection)
    }

    /// Set a new status and refresh `last_updated`
    pub fn update_status(&self, id: &str, status: CollectionStatus) -> RepositoryResult<Collection> {
        self.ensure_seeded();
        let result = self
            .store
            .update(COLLECTIONS_KEY, |collections: &mut Vec<Collection>| -> RepositoryResult<Collection> {
                let collection = collections
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| RepositoryError::NotFound(format!("Collection {}", id)))?;

                if !collection.status.can_transition_to(status) {
                    return Err(RepositoryError::InvalidTransition {
                        from: collection.status,
                        to: status,
                    });
                }

                collection.status = status;
                collection.last_updated = Utc::now();
                Ok(collection.clone())
            });

        match &result {
            Ok(collection) => {
                tracing::info!(id, status = %collection.status, "Updated collection status")
            }
            Err(e) => tracing::warn!(id, error = %e, "Rejected collection status update"),
        }
        result
    }

    /// Remove the collection list, the legacy batch snapshot and the
    /// last-update stamp
    pub fn clear_all(&self) -> RepositoryResult<()> {
        self.store.remove(COLLECTIONS_KEY)?;
        self.store.remove(LEGACY_BATCHES_KEY)?;
        self.store.remove(LAST_UPDATE_KEY)?;
        tracing::info!("Cleared all collections");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CollectionIds, NewCollection};

    fn collection(id: &str, herb: &str) -> Collection {
        NewCollection::new(herb, "5 kg", "FARM-1").into_collection(
            CollectionIds {
                id: id.to_string(),
                batch_id: format!("B-{}", id),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_list_seeds_once() {
        let repo = CollectionRepository::new(StoreAdapter::in_memory());
        let first = repo.list();
        assert_eq!(first.len(), seed::default_collections().len());

        let second = repo.list();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unseeded_repository_starts_empty() {
        let repo = CollectionRepository::without_seed(StoreAdapter::in_memory());
        assert!(repo.list().is_empty());
    }

    #[test]
    fn test_add_appends_then_replaces() {
        let repo = CollectionRepository::without_seed(StoreAdapter::in_memory());
        repo.add(collection("C1", "Neem")).unwrap();
        repo.add(collection("C2", "Tulsi")).unwrap();
        repo.add(collection("C1", "Amla")).unwrap();

        let list = repo.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "C1");
        assert_eq!(list[0].herb, "Amla");
        assert_eq!(list[1].herb, "Tulsi");
    }

    #[test]
    fn test_replace_keeps_batch_id() {
        let repo = CollectionRepository::without_seed(StoreAdapter::in_memory());
        repo.add(collection("C1", "Neem")).unwrap();

        let mut changed = collection("C1", "Amla");
        changed.batch_id = "B-OTHER".to_string();
        repo.add(changed).unwrap();

        let stored = repo.get("C1").unwrap();
        assert_eq!(stored.herb, "Amla");
        assert_eq!(stored.batch_id, "B-C1");
    }

    #[test]
    fn test_insert_new_same_instant_gets_distinct_ids() {
        let repo = CollectionRepository::without_seed(StoreAdapter::in_memory());
        let now = Utc::now();
        let first = repo
            .insert_new(NewCollection::new("Neem", "5 kg", "FARM-1"), now)
            .unwrap();
        let second = repo
            .insert_new(NewCollection::new("Tulsi", "2 kg", "FARM-2"), now)
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first.batch_id, second.batch_id);
        assert_eq!(repo.list(), vec![first, second]);
    }

    #[test]
    fn test_insert_new_from_many_threads() {
        let repo = CollectionRepository::without_seed(StoreAdapter::in_memory());
        let now = Utc::now();
        std::thread::scope(|scope| {
            for i in 0..16 {
                let repo = repo.clone();
                scope.spawn(move || {
                    repo.insert_new(NewCollection::new("Neem", "1 kg", format!("FARM-{}", i)), now)
                        .unwrap();
                });
            }
        });

        let list = repo.list();
        assert_eq!(list.len(), 16);
        let mut ids: Vec<_> = list.iter().map(|c| c.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[test]
    fn test_update_status_unknown_id() {
        let repo = CollectionRepository::without_seed(StoreAdapter::in_memory());
        repo.add(collection("C1", "Neem")).unwrap();

        let result = repo.update_status("COL999", CollectionStatus::Verified);
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[test]
    fn test_update_status_rejects_backward_move() {
        let repo = CollectionRepository::without_seed(StoreAdapter::in_memory());
        repo.add(collection("C1", "Neem")).unwrap();
        repo.update_status("C1", CollectionStatus::Verified).unwrap();

        let result = repo.update_status("C1", CollectionStatus::Queued);
        assert!(matches!(
            result,
            Err(RepositoryError::InvalidTransition { .. })
        ));
        assert_eq!(repo.get("C1").unwrap().status, CollectionStatus::Verified);
    }

    #[test]
    fn test_clear_all_then_reseed() {
        let repo = CollectionRepository::new(StoreAdapter::in_memory());
        repo.add(collection("C1", "Neem")).unwrap();
        repo.clear_all().unwrap();

        assert!(!repo.store().contains(COLLECTIONS_KEY));
        assert!(repo.store().last_update().is_none());
        assert_eq!(repo.list(), seed::default_collections());
    }
}
