//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod transaction;
pub mod user;

// Re-export specific types to avoid conflicts
pub use transaction::{
    Column as TransactionColumn, Entity as TransactionEntity, Model as Transaction,
};
pub use user::{Column as UserColumn, Entity as UserEntity, Model as User};
