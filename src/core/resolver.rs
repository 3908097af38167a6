//! Operation resolver - validates arguments for a named operation and dispatches to storage.
//!
//! One generic code path serves every entity: required-field checks, decoding, and merging are
//! driven by the entity's field descriptors. The resolver holds no mutable state of its own, so a
//! single instance can serve concurrent requests. Updates are read-merge-write against the latest
//! stored row and are not atomic; two interleaved updates of the same identifier can lose one
//! write.

use crate::{
    core::{
        arguments::{Arguments, check_required, decode_changes, positive_id, required_id},
        merge::{build, merge},
        record::{EntityKind, Record},
    },
    entities::{Transaction, User},
    errors::{Error, Result},
    store::Store,
};
use serde::Serialize;
use std::{fmt, sync::Arc};
use tracing::{debug, instrument};

/// The operation a request asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Insert a new record from the supplied fields
    Create,
    /// Fetch the record named by `ID`
    ReadOne,
    /// Fetch every record
    ReadAll,
    /// Merge the supplied fields into the record named by `ID`
    Update,
    /// Remove the record named by `ID`
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::ReadOne => "read_one",
            Self::ReadAll => "read_all",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// A record of any entity type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    /// A transaction record
    Transaction(Transaction),
    /// A user record
    User(User),
}

impl From<Transaction> for Entity {
    fn from(value: Transaction) -> Self {
        Self::Transaction(value)
    }
}

impl From<User> for Entity {
    fn from(value: User) -> Self {
        Self::User(value)
    }
}

/// Result of a single operation on one entity type.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<R> {
    /// Created, read, or updated record
    One(R),
    /// Every stored record
    Many(Vec<R>),
    /// Identifier of the removed record
    Deleted(i64),
}

/// Result of [`Resolver::resolve`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    /// Created, read, or updated record
    One(Entity),
    /// Every stored record of the requested type
    Many(Vec<Entity>),
    /// Identifier of the removed record
    Deleted(i64),
}

impl<R: Into<Entity>> From<Outcome<R>> for Resolved {
    fn from(outcome: Outcome<R>) -> Self {
        match outcome {
            Outcome::One(record) => Self::One(record.into()),
            Outcome::Many(records) => Self::Many(records.into_iter().map(Into::into).collect()),
            Outcome::Deleted(id) => Self::Deleted(id),
        }
    }
}

/// Entry point for every operation, wired to one store per entity type.
#[derive(Clone)]
pub struct Resolver {
    transactions: Arc<dyn Store<Transaction>>,
    users: Arc<dyn Store<User>>,
}

impl Resolver {
    /// Creates a resolver over the given stores.
    #[must_use]
    pub fn new(transactions: Arc<dyn Store<Transaction>>, users: Arc<dyn Store<User>>) -> Self {
        Self {
            transactions,
            users,
        }
    }

    /// Runs `operation` against `entity` with the given arguments.
    ///
    /// # Errors
    /// Returns a classified error (`MissingArgument`, `ArgumentType`, `InvalidIdentifier`,
    /// `NotFound`) for bad input, or `Storage` when the store fails.
    #[instrument(skip(self, arguments), fields(%operation, %entity))]
    pub async fn resolve(
        &self,
        operation: Operation,
        entity: EntityKind,
        arguments: &Arguments,
    ) -> Result<Resolved> {
        match entity {
            EntityKind::Transaction => resolve_with(self.transactions.as_ref(), operation, arguments)
                .await
                .map(Into::into),
            EntityKind::User => resolve_with(self.users.as_ref(), operation, arguments)
                .await
                .map(Into::into),
        }
    }
}

/// Runs `operation` for a single entity type against `store`.
///
/// # Errors
/// See [`Resolver::resolve`].
pub async fn resolve_with<R: Record>(
    store: &dyn Store<R>,
    operation: Operation,
    arguments: &Arguments,
) -> Result<Outcome<R>> {
    match operation {
        Operation::Create => create(store, arguments).await.map(Outcome::One),
        Operation::ReadOne => store
            .read_by_id(positive_id(arguments)?)
            .await
            .map(Outcome::One),
        Operation::ReadAll => store.read_all().await.map(Outcome::Many),
        Operation::Update => update(store, arguments).await.map(Outcome::One),
        Operation::Delete => delete(store, arguments).await.map(Outcome::Deleted),
    }
}

async fn create<R: Record>(store: &dyn Store<R>, arguments: &Arguments) -> Result<R> {
    check_required::<R>(arguments)?;
    let record = build::<R>(decode_changes::<R>(arguments)?)?;
    let created = store.create(record).await?;
    debug!(id = created.id(), "Created {}", R::KIND);
    Ok(created)
}

async fn update<R: Record>(store: &dyn Store<R>, arguments: &Arguments) -> Result<R> {
    let id = positive_id(arguments)?;
    let changes = decode_changes::<R>(arguments)?;
    let current = store.read_by_id(id).await?;
    let merged = merge(current, changes)?;
    store.update(merged).await
}

async fn delete<R: Record>(store: &dyn Store<R>, arguments: &Arguments) -> Result<i64> {
    let id = required_id(arguments)?;
    // Zero is the unset identifier; it must never reach the storage layer.
    if id <= 0 {
        return Err(Error::InvalidIdentifier { id });
    }
    store.delete(id).await?;
    Ok(id)
}
