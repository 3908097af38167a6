//! Persistence layer - the only writer of durable entity state.
//!
//! The resolver talks to storage exclusively through [`Store`], one implementation per backend.
//! Implementations validate nothing beyond identifiers and guarantee no more than single-row
//! atomicity.

/// SeaORM-backed store over relational tables
pub mod database;
/// In-memory reference store
pub mod memory;

pub use database::DatabaseStore;
pub use memory::MemoryStore;

use crate::core::Record;
use crate::errors::Result;
use async_trait::async_trait;

/// CRUD operations for one entity type.
#[async_trait]
pub trait Store<R: Record>: Send + Sync {
    /// Persists a new record and returns it with its assigned identifier.
    async fn create(&self, record: R) -> Result<R>;

    /// Fetches one record.
    ///
    /// # Errors
    /// Returns `Error::NotFound` when no record has this identifier.
    async fn read_by_id(&self, id: i64) -> Result<R>;

    /// Fetches every record, ordered by identifier.
    async fn read_all(&self) -> Result<Vec<R>>;

    /// Overwrites the whole stored record with the same identifier.
    ///
    /// # Errors
    /// Returns `Error::NotFound` when no record has this identifier.
    async fn update(&self, record: R) -> Result<R>;

    /// Removes one record.
    ///
    /// # Errors
    /// Returns `Error::NotFound` when no record has this identifier.
    async fn delete(&self, id: i64) -> Result<()>;
}
