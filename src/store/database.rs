//! Database store - SeaORM implementation of [`Store`] for transactions and users.
//!
//! Each entity maps to one table. Creates insert a fresh row and let the database assign the
//! identifier; updates overwrite every mutable column of the row with the same identifier;
//! deletes are hard deletes. Missing rows surface as `Error::NotFound`, every other database
//! failure propagates unchanged as `Error::Storage`.

use crate::{
    core::{EntityKind, Record},
    entities::{Transaction, TransactionColumn, TransactionEntity, User, UserColumn, UserEntity},
    entities::{transaction, user},
    errors::{Error, Result},
    store::Store,
};
use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Unchanged, DatabaseConnection, DbErr, DeleteResult, QueryOrder, Set, prelude::*,
};
use tracing::{debug, instrument};

/// Store backed by a SeaORM connection pool.
#[derive(Debug)]
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    /// Wraps an open connection. Tables must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn not_found(entity: EntityKind, id: i64) -> impl FnOnce() -> Error {
    move || Error::NotFound { entity, id }
}

/// `update` on a row that does not exist reports `RecordNotUpdated`.
fn map_update_error(entity: EntityKind, id: i64) -> impl FnOnce(DbErr) -> Error {
    move |err| match err {
        DbErr::RecordNotUpdated => Error::NotFound { entity, id },
        other => Error::Storage(other),
    }
}

fn ensure_deleted(result: &DeleteResult, entity: EntityKind, id: i64) -> Result<()> {
    if result.rows_affected == 0 {
        return Err(Error::NotFound { entity, id });
    }
    debug!(%entity, id, "Deleted row");
    Ok(())
}

#[async_trait]
impl Store<Transaction> for DatabaseStore {
    #[instrument(skip(self, record))]
    async fn create(&self, record: Transaction) -> Result<Transaction> {
        let now = chrono::Utc::now();
        let row = transaction::ActiveModel {
            value: Set(record.value),
            note: Set(record.note),
            sender: Set(record.sender),
            receiver: Set(record.receiver),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = row.insert(&self.db).await?;
        debug!(id = inserted.id, "Inserted transaction");
        Ok(inserted)
    }

    async fn read_by_id(&self, id: i64) -> Result<Transaction> {
        TransactionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(not_found(Transaction::KIND, id))
    }

    async fn read_all(&self) -> Result<Vec<Transaction>> {
        TransactionEntity::find()
            .order_by_asc(TransactionColumn::Id)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self, record), fields(id = record.id))]
    async fn update(&self, record: Transaction) -> Result<Transaction> {
        let id = record.id;
        let row = transaction::ActiveModel {
            id: Unchanged(id),
            value: Set(record.value),
            note: Set(record.note),
            sender: Set(record.sender),
            receiver: Set(record.receiver),
            created_at: Unchanged(record.created_at),
            updated_at: Set(chrono::Utc::now()),
        };
        row.update(&self.db)
            .await
            .map_err(map_update_error(Transaction::KIND, id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<()> {
        let result = TransactionEntity::delete_by_id(id).exec(&self.db).await?;
        ensure_deleted(&result, Transaction::KIND, id)
    }
}

#[async_trait]
impl Store<User> for DatabaseStore {
    #[instrument(skip(self, record))]
    async fn create(&self, record: User) -> Result<User> {
        let now = chrono::Utc::now();
        let row = user::ActiveModel {
            email: Set(record.email),
            password: Set(record.password),
            last: Set(record.last),
            middle: Set(record.middle),
            first: Set(record.first),
            phone: Set(record.phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = row.insert(&self.db).await?;
        debug!(id = inserted.id, "Inserted user");
        Ok(inserted)
    }

    async fn read_by_id(&self, id: i64) -> Result<User> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(not_found(User::KIND, id))
    }

    async fn read_all(&self) -> Result<Vec<User>> {
        UserEntity::find()
            .order_by_asc(UserColumn::Id)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self, record), fields(id = record.id))]
    async fn update(&self, record: User) -> Result<User> {
        let id = record.id;
        let row = user::ActiveModel {
            id: Unchanged(id),
            email: Set(record.email),
            password: Set(record.password),
            last: Set(record.last),
            middle: Set(record.middle),
            first: Set(record.first),
            phone: Set(record.phone),
            created_at: Unchanged(record.created_at),
            updated_at: Set(chrono::Utc::now()),
        };
        row.update(&self.db)
            .await
            .map_err(map_update_error(User::KIND, id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        ensure_deleted(&result, User::KIND, id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{sample_transaction, sample_user, setup_test_db};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_transaction_round_trip() -> Result<()> {
        let store = DatabaseStore::new(setup_test_db().await?);

        let created = Store::<Transaction>::create(&store, sample_transaction(0)).await?;
        assert!(created.id > 0);

        let read = Store::<Transaction>::read_by_id(&store, created.id).await?;
        assert_eq!(read.value, created.value);
        assert_eq!(read.note, created.note);
        assert_eq!(read.sender, created.sender);
        assert_eq!(read.receiver, created.receiver);
        Ok(())
    }

    #[tokio::test]
    async fn test_user_update_overwrites_row() -> Result<()> {
        let store = DatabaseStore::new(setup_test_db().await?);
        let created = Store::<User>::create(&store, sample_user(0)).await?;

        let mut changed = created.clone();
        changed.phone = String::new();
        changed.first = "Grace".to_string();
        Store::<User>::update(&store, changed).await?;

        let read = Store::<User>::read_by_id(&store, created.id).await?;
        assert_eq!(read.phone, "");
        assert_eq!(read.first, "Grace");
        assert_eq!(read.email, created.email);
        Ok(())
    }

    #[tokio::test]
    async fn test_read_all_returns_rows_in_id_order() -> Result<()> {
        let store = DatabaseStore::new(setup_test_db().await?);
        assert!(Store::<Transaction>::read_all(&store).await?.is_empty());

        for _ in 0..3 {
            Store::<Transaction>::create(&store, sample_transaction(0)).await?;
        }

        let ids: Vec<i64> = Store::<Transaction>::read_all(&store)
            .await?
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_rows_are_not_found() -> Result<()> {
        let store = DatabaseStore::new(setup_test_db().await?);

        assert!(matches!(
            Store::<User>::read_by_id(&store, 42).await.unwrap_err(),
            Error::NotFound {
                entity: EntityKind::User,
                id: 42
            }
        ));
        assert!(matches!(
            Store::<Transaction>::update(&store, sample_transaction(42))
                .await
                .unwrap_err(),
            Error::NotFound { id: 42, .. }
        ));
        assert!(matches!(
            Store::<Transaction>::delete(&store, 42).await.unwrap_err(),
            Error::NotFound { id: 42, .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_row() -> Result<()> {
        let store = DatabaseStore::new(setup_test_db().await?);
        let created = Store::<Transaction>::create(&store, sample_transaction(0)).await?;

        Store::<Transaction>::delete(&store, created.id).await?;

        assert!(matches!(
            Store::<Transaction>::read_by_id(&store, created.id)
                .await
                .unwrap_err(),
            Error::NotFound { .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_database_failure_is_storage_error() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let store = DatabaseStore::new(db);

        let result = Store::<Transaction>::read_by_id(&store, 1).await;

        assert!(matches!(result.unwrap_err(), Error::Storage(_)));
    }
}
