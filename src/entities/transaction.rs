//! Transaction entity - A monetary transfer from a sender to a receiver.
//!
//! `value` is signed, `note` is optional free text where an empty string is a real value,
//! and `sender`/`receiver` are required on creation. Timestamps are server-assigned metadata
//! and are never part of a merge.
use crate::core::{EntityKind, FieldKind, FieldSpec, FieldValue, Record, record::type_mismatch};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, Default, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    /// Unique identifier, assigned on insert and never reused
    #[sea_orm(primary_key)]
    #[serde(rename = "ID")]
    pub id: i64,
    /// Transferred amount
    pub value: f64,
    /// Free-form note, empty when not supplied
    pub note: String,
    /// Identifier of the sending party
    pub sender: String,
    /// Identifier of the receiving party
    pub receiver: String,
    /// When the row was inserted
    pub created_at: DateTimeUtc,
    /// When the row was last written
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Record for Model {
    const KIND: EntityKind = EntityKind::Transaction;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("Value", FieldKind::Float),
        FieldSpec::optional("Note", FieldKind::Text),
        FieldSpec::required("Sender", FieldKind::Text),
        FieldSpec::required("Receiver", FieldKind::Text),
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn created_at(&self) -> DateTimeUtc {
        self.created_at
    }

    fn set_timestamps(&mut self, created_at: DateTimeUtc, updated_at: DateTimeUtc) {
        self.created_at = created_at;
        self.updated_at = updated_at;
    }

    fn set_field(&mut self, field: &'static str, value: FieldValue) -> crate::errors::Result<()> {
        match (field, value) {
            ("Value", FieldValue::Float(value)) => self.value = value,
            ("Note", FieldValue::Text(note)) => self.note = note,
            ("Sender", FieldValue::Text(sender)) => self.sender = sender,
            ("Receiver", FieldValue::Text(receiver)) => self.receiver = receiver,
            (field, _) => return Err(type_mismatch(field)),
        }
        Ok(())
    }
}
