//! Profile Store: where extracted worker skills live between requests.
//!
//! `AppState` carries an `Arc<dyn ProfileStore>`; `InMemoryProfileStore` is the
//! default backend.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::worker::WorkerProfile;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("worker id must not be empty")]
    EmptyWorkerId,
}

/// Simple record read/write interface. Implement this to swap backends without
/// touching the handlers.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, worker_id: &str) -> Result<Option<WorkerProfile>, StoreError>;

    /// Inserts or replaces the profile for `profile.worker_id`.
    async fn put(&self, profile: WorkerProfile) -> Result<(), StoreError>;

    /// Sorted.
    async fn list_ids(&self) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, WorkerProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, worker_id: &str) -> Result<Option<WorkerProfile>, StoreError> {
        Ok(self.profiles.read().await.get(worker_id).cloned())
    }

    async fn put(&self, profile: WorkerProfile) -> Result<(), StoreError> {
        if profile.worker_id.trim().is_empty() {
            return Err(StoreError::EmptyWorkerId);
        }
        self.profiles
            .write()
            .await
            .insert(profile.worker_id.clone(), profile);
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut ids: Vec<String> = self.profiles.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::extractor::ExtractedSkillSet;

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let store = InMemoryProfileStore::new();
        store
            .put(WorkerProfile::new("w-1", ExtractedSkillSet::default()))
            .await
            .unwrap();

        let got = store.get("w-1").await.unwrap().unwrap();
        assert_eq!(got.worker_id, "w-1");
        assert!(store.get("w-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_existing_profile() {
        let store = InMemoryProfileStore::new();
        let first = WorkerProfile::new("w-1", ExtractedSkillSet::default());
        let mut second = first.clone();
        second.skills.lines_processed = 7;

        store.put(first).await.unwrap();
        store.put(second).await.unwrap();

        assert_eq!(store.get("w-1").await.unwrap().unwrap().skills.lines_processed, 7);
        assert_eq!(store.list_ids().await.unwrap(), vec!["w-1"]);
    }

    #[tokio::test]
    async fn test_rejects_blank_worker_id() {
        let store = InMemoryProfileStore::new();
        let err = store
            .put(WorkerProfile::new("  ", ExtractedSkillSet::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::EmptyWorkerId));
    }

    #[tokio::test]
    async fn test_list_ids_sorted() {
        let store = InMemoryProfileStore::new();
        for id in ["c", "a", "b"] {
            store
                .put(WorkerProfile::new(id, ExtractedSkillSet::default()))
                .await
                .unwrap();
        }
        assert_eq!(store.list_ids().await.unwrap(), vec!["a", "b", "c"]);
    }
}
