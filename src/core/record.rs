//! Field descriptors and the `Record` trait.
//!
//! Every entity the resolver handles describes its mutable fields as data: a name matching the
//! argument key clients send, a value kind, and whether the field must be supplied on create.
//! The merge engine and the resolver only ever work through these descriptors, so adding an
//! entity means declaring its fields rather than writing new control flow.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use std::fmt;

/// Name of the identifier argument shared by every entity.
pub const ID_FIELD: &str = "ID";

/// The entity types exposed through the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A monetary transfer between a sender and a receiver
    Transaction,
    /// An account holder
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transaction => f.write_str("Transaction"),
            Self::User => f.write_str("User"),
        }
    }
}

/// The value type a field accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed floating-point number
    Float,
    /// Free text
    Text,
}

/// A typed value for a single field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Value for a `FieldKind::Float` field
    Float(f64),
    /// Value for a `FieldKind::Text` field
    Text(String),
}

/// Describes one mutable field of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Argument key, case-sensitive
    pub name: &'static str,
    /// Accepted value type
    pub kind: FieldKind,
    /// Whether create fails when this field is not supplied
    pub required_on_create: bool,
}

impl FieldSpec {
    /// A field that must be supplied on create.
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required_on_create: true,
        }
    }

    /// A field that falls back to its zero value on create.
    #[must_use]
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required_on_create: false,
        }
    }
}

/// An entity the resolver can create, read, merge, and delete.
///
/// `Default` is the zero-valued entity that create overlays with the supplied arguments.
/// `FIELDS` lists the mutable fields in the order required fields are checked on create.
pub trait Record: Clone + Default + fmt::Debug + Send + Sync + 'static {
    /// Which entity this is
    const KIND: EntityKind;

    /// Mutable field descriptors, in check order
    const FIELDS: &'static [FieldSpec];

    /// The server-assigned identifier, zero before the record is persisted.
    fn id(&self) -> i64;

    /// Assigns the identifier. Only stores call this.
    fn set_id(&mut self, id: i64);

    /// When the record was first persisted.
    fn created_at(&self) -> DateTime<Utc>;

    /// Sets the server-assigned timestamps. Only stores call this.
    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>);

    /// Replaces a single field.
    ///
    /// # Errors
    /// Returns `Error::ArgumentType` when the field is unknown or the value kind does not match.
    fn set_field(&mut self, field: &'static str, value: FieldValue) -> Result<()>;
}

/// Shared mismatch error for `Record::set_field` implementations.
pub(crate) const fn type_mismatch(field: &'static str) -> Error {
    Error::ArgumentType { field }
}
