//! Shared test utilities.
//!
//! This module provides helpers for setting up test databases, building sample entities with
//! sensible defaults, and a call-counting store double for asserting which persistence
//! operations the resolver reached.

use crate::{
    core::{Arguments, Record},
    entities::{Transaction, User},
    errors::Result,
    store::{MemoryStore, Store},
};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Converts a `json!` object literal into an argument map.
///
/// # Panics
/// Panics if `value` is not a JSON object.
#[allow(clippy::panic)]
pub fn arguments(value: serde_json::Value) -> Arguments {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("arguments must be a JSON object, got {other}"),
    }
}

/// A transaction with sensible defaults.
///
/// # Defaults
/// * `value`: 25.0
/// * `note`: `"lunch"`
/// * `sender`: `"alice"`, `receiver`: `"bob"`
pub fn sample_transaction(id: i64) -> Transaction {
    let now = chrono::Utc::now();
    Transaction {
        id,
        value: 25.0,
        note: "lunch".to_string(),
        sender: "alice".to_string(),
        receiver: "bob".to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// A user with every field populated.
pub fn sample_user(id: i64) -> User {
    let now = chrono::Utc::now();
    User {
        id,
        email: "ada@example.com".to_string(),
        password: "hunter2".to_string(),
        last: "Lovelace".to_string(),
        middle: "King".to_string(),
        first: "Ada".to_string(),
        phone: "555-0199".to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// In-memory store that counts calls per operation.
pub struct CountingStore<R> {
    inner: MemoryStore<R>,
    reads: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
}

impl<R> CountingStore<R> {
    /// An empty store with all counters at zero.
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            reads: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    /// Calls to `read_by_id` so far.
    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Calls to `update` so far.
    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    /// Calls to `delete` so far.
    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: Record> Store<R> for CountingStore<R> {
    async fn create(&self, record: R) -> Result<R> {
        self.inner.create(record).await
    }

    async fn read_by_id(&self, id: i64) -> Result<R> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_by_id(id).await
    }

    async fn read_all(&self) -> Result<Vec<R>> {
        self.inner.read_all().await
    }

    async fn update(&self, record: R) -> Result<R> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(record).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id).await
    }
}
