//! Per-technique mastery tracking persisted as a single blob in a
//! [`KeyValueStorage`] area.
//!
//! The store keeps no in-memory copy: every read goes back to storage, so a
//! write made through another handle on the same storage is visible at once.

use crate::models::{MasteryStatus, ProgressRecord};
use crate::storage::KeyValueStorage;
use chrono::Local;
use std::io;
use tracing::{debug, warn};

/// Storage key holding the serialized [`ProgressRecord`].
pub const PROGRESS_KEY: &str = "bjj-progress";

#[derive(Debug)]
pub struct ProgressStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> ProgressStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current record, or a fresh one when nothing usable is stored.
    pub async fn load(&self) -> ProgressRecord {
        let Some(raw) = self.storage.get_item(PROGRESS_KEY).await else {
            return ProgressRecord::new(today_string());
        };

        match serde_json::from_str::<ProgressRecord>(&raw) {
            Ok(mut record) => {
                record
                    .techniques
                    .retain(|_, status| *status != MasteryStatus::None);
                record
            }
            Err(err) => {
                warn!("stored progress is malformed, starting fresh: {err}");
                ProgressRecord::new(today_string())
            }
        }
    }

    /// Overwrites the stored blob with `record`.
    pub async fn save(&self, record: &ProgressRecord) -> io::Result<()> {
        let payload = serde_json::to_string(record)?;
        self.storage.set_item(PROGRESS_KEY, &payload).await
    }

    pub async fn get_status(&self, technique_id: &str) -> MasteryStatus {
        self.load().await.status(technique_id)
    }

    pub async fn set_status(&self, technique_id: &str, status: MasteryStatus) -> io::Result<()> {
        self.set_status_on(technique_id, status, today_string()).await
    }

    /// Sets `status` literally: `None` deletes the entry, anything else
    /// overwrites it. Ids are not checked against the catalog.
    pub async fn set_status_on(
        &self,
        technique_id: &str,
        status: MasteryStatus,
        visit_date: impl Into<String>,
    ) -> io::Result<()> {
        let mut record = self.load().await;
        if status == MasteryStatus::None {
            record.techniques.remove(technique_id);
        } else {
            record.techniques.insert(technique_id.to_string(), status);
        }
        record.last_visit = visit_date.into();

        self.save(&record).await?;
        debug!(technique_id, %status, "progress updated");
        Ok(())
    }

    /// Removes the stored blob; the next load starts from an empty record.
    pub async fn reset(&self) -> io::Result<()> {
        self.storage.remove_item(PROGRESS_KEY).await
    }
}

pub fn today_string() -> String {
    Local::now().date_naive().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn store() -> ProgressStore<MemoryStorage> {
        ProgressStore::new(MemoryStorage::new())
    }

    async fn stored_blob(store: &ProgressStore<MemoryStorage>) -> serde_json::Value {
        let raw = store
            .storage()
            .get_item(PROGRESS_KEY)
            .await
            .expect("blob stored");
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn unset_technique_has_no_status() {
        let store = store();
        assert_eq!(store.get_status("1-Armbar").await, MasteryStatus::None);
        assert_eq!(store.get_status("").await, MasteryStatus::None);
    }

    #[tokio::test]
    async fn first_load_is_empty_and_dated_today() {
        let record = store().load().await;
        assert!(record.techniques.is_empty());
        assert_eq!(record.last_visit, today_string());
    }

    #[tokio::test]
    async fn set_then_get_returns_each_status() {
        let store = store();
        for status in MasteryStatus::ASSIGNABLE {
            store.set_status("1-Armbar", status).await.unwrap();
            assert_eq!(store.get_status("1-Armbar").await, status);
        }
    }

    #[tokio::test]
    async fn setting_none_removes_the_entry() {
        let store = store();
        for status in MasteryStatus::ASSIGNABLE {
            store.set_status("1-Armbar", status).await.unwrap();
            store.set_status("1-Armbar", MasteryStatus::None).await.unwrap();

            assert_eq!(store.get_status("1-Armbar").await, MasteryStatus::None);
            let blob = stored_blob(&store).await;
            assert!(blob["techniques"].get("1-Armbar").is_none());
        }
    }

    #[tokio::test]
    async fn setting_twice_is_idempotent() {
        let store = store();
        store
            .set_status_on("2-Knee Cut", MasteryStatus::Average, "2026-01-05")
            .await
            .unwrap();
        let once = store.load().await;
        store
            .set_status_on("2-Knee Cut", MasteryStatus::Average, "2026-01-05")
            .await
            .unwrap();
        assert_eq!(store.load().await, once);
    }

    #[tokio::test]
    async fn mutation_stamps_last_visit() {
        let store = store();
        store
            .set_status_on("1-Armbar", MasteryStatus::Learning, "2026-01-05")
            .await
            .unwrap();
        assert_eq!(store.load().await.last_visit, "2026-01-05");
        store
            .set_status_on("1-Armbar", MasteryStatus::None, "2026-01-06")
            .await
            .unwrap();
        assert_eq!(store.load().await.last_visit, "2026-01-06");
    }

    #[tokio::test]
    async fn status_overwrites_previous_value() {
        let store = store();
        store.set_status("1-Armbar", MasteryStatus::Learning).await.unwrap();
        store.set_status("1-Armbar", MasteryStatus::Mastered).await.unwrap();
        let record = store.load().await;
        assert_eq!(record.techniques.len(), 1);
        assert_eq!(record.status("1-Armbar"), MasteryStatus::Mastered);
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let store = store();
        store.set_status("1-Armbar", MasteryStatus::Mastered).await.unwrap();
        store.set_status("1-Hip Bump", MasteryStatus::Learning).await.unwrap();

        store.reset().await.unwrap();

        assert!(store.storage().get_item(PROGRESS_KEY).await.is_none());
        assert_eq!(store.get_status("1-Armbar").await, MasteryStatus::None);
        assert_eq!(store.get_status("1-Hip Bump").await, MasteryStatus::None);
    }

    #[tokio::test]
    async fn malformed_blob_is_treated_as_absent() {
        let store = store();
        store.storage().set_item(PROGRESS_KEY, "{oops").await.unwrap();
        assert!(store.load().await.techniques.is_empty());

        store.set_status("1-Armbar", MasteryStatus::Bad).await.unwrap();
        assert_eq!(store.get_status("1-Armbar").await, MasteryStatus::Bad);
    }

    #[tokio::test]
    async fn explicit_none_in_blob_is_not_surfaced() {
        let store = store();
        store
            .storage()
            .set_item(
                PROGRESS_KEY,
                r#"{"techniques":{"1-Armbar":"none","1-Hip Bump":"mastered"},"lastVisit":"2026-01-01"}"#,
            )
            .await
            .unwrap();
        let record = store.load().await;
        assert_eq!(record.techniques.len(), 1);
        assert_eq!(record.last_visit, "2026-01-01");
    }

    #[tokio::test]
    async fn orphan_ids_are_accepted() {
        let store = store();
        store.set_status("999-Ghost", MasteryStatus::Mastered).await.unwrap();
        assert_eq!(store.get_status("999-Ghost").await, MasteryStatus::Mastered);
    }

    #[tokio::test]
    async fn reads_see_writes_from_another_handle() {
        let storage = Arc::new(MemoryStorage::new());
        let reader = ProgressStore::new(Arc::clone(&storage));
        let writer = ProgressStore::new(Arc::clone(&storage));

        assert_eq!(reader.get_status("1-Armbar").await, MasteryStatus::None);
        writer.set_status("1-Armbar", MasteryStatus::Learning).await.unwrap();
        assert_eq!(reader.get_status("1-Armbar").await, MasteryStatus::Learning);
        writer.reset().await.unwrap();
        assert_eq!(reader.get_status("1-Armbar").await, MasteryStatus::None);
    }
}
