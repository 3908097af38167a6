//! In-memory store - a reference [`Store`] with the same contract as the database store.
//!
//! Records live in a `BTreeMap` keyed by identifier behind a Tokio `RwLock`. Identifiers come
//! from a counter that starts at 1 and only ever grows, so deleted identifiers are never reused.

use crate::{
    core::Record,
    errors::{Error, Result},
    store::Store,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

struct Rows<R> {
    last_id: i64,
    records: BTreeMap<i64, R>,
}

/// Volatile store for tests and local runs without a database.
pub struct MemoryStore<R> {
    rows: RwLock<Rows<R>>,
}

impl<R> MemoryStore<R> {
    /// An empty store whose first identifier will be 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Rows {
                last_id: 0,
                records: BTreeMap::new(),
            }),
        }
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> Store<R> for MemoryStore<R> {
    #[instrument(skip(self, record), fields(entity = %R::KIND))]
    async fn create(&self, mut record: R) -> Result<R> {
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let now = chrono::Utc::now();
        record.set_id(rows.last_id);
        record.set_timestamps(now, now);
        rows.records.insert(record.id(), record.clone());
        debug!(id = record.id(), "Inserted record");
        Ok(record)
    }

    async fn read_by_id(&self, id: i64) -> Result<R> {
        self.rows
            .read()
            .await
            .records
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound {
                entity: R::KIND,
                id,
            })
    }

    async fn read_all(&self) -> Result<Vec<R>> {
        Ok(self.rows.read().await.records.values().cloned().collect())
    }

    #[instrument(skip(self, record), fields(entity = %R::KIND, id = record.id()))]
    async fn update(&self, mut record: R) -> Result<R> {
        let mut rows = self.rows.write().await;
        let id = record.id();
        let stored = rows.records.get_mut(&id).ok_or(Error::NotFound {
            entity: R::KIND,
            id,
        })?;
        record.set_timestamps(stored.created_at(), chrono::Utc::now());
        *stored = record.clone();
        Ok(record)
    }

    #[instrument(skip(self), fields(entity = %R::KIND))]
    async fn delete(&self, id: i64) -> Result<()> {
        self.rows
            .write()
            .await
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::NotFound {
                entity: R::KIND,
                id,
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{Transaction, User};
    use crate::test_utils::{sample_transaction, sample_user};

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() -> Result<()> {
        let store = MemoryStore::<Transaction>::new();

        let first = store.create(sample_transaction(0)).await?;
        let second = store.create(sample_transaction(0)).await?;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.read_by_id(2).await?, second);
        Ok(())
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() -> Result<()> {
        let store = MemoryStore::<User>::new();

        let first = store.create(sample_user(0)).await?;
        store.delete(first.id).await?;
        let second = store.create(sample_user(0)).await?;

        assert_eq!(second.id, 2);
        assert!(matches!(
            store.read_by_id(first.id).await.unwrap_err(),
            Error::NotFound { id: 1, .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_read_all_orders_by_id() -> Result<()> {
        let store = MemoryStore::<Transaction>::new();
        assert!(store.read_all().await?.is_empty());

        for _ in 0..3 {
            store.create(sample_transaction(0)).await?;
        }

        let ids: Vec<i64> = store.read_all().await?.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_overwrites_and_keeps_created_at() -> Result<()> {
        let store = MemoryStore::<Transaction>::new();
        let created = store.create(sample_transaction(0)).await?;

        let mut changed = created.clone();
        changed.note = "changed".to_string();
        let updated = store.update(changed).await?;

        assert_eq!(updated.note, "changed");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.read_by_id(created.id).await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let store = MemoryStore::<Transaction>::new();

        assert!(matches!(
            store.update(sample_transaction(9)).await.unwrap_err(),
            Error::NotFound { id: 9, .. }
        ));
        assert!(matches!(
            store.delete(9).await.unwrap_err(),
            Error::NotFound { id: 9, .. }
        ));
    }
}
