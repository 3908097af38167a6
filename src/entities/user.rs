//! User entity - An account holder.
//!
//! `email`, `password` and `last` are required on creation; `middle`, `first` and `phone`
//! default to empty strings.
use crate::core::{EntityKind, FieldKind, FieldSpec, FieldValue, Record, record::type_mismatch};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    /// Unique identifier, assigned on insert and never reused
    #[sea_orm(primary_key)]
    #[serde(rename = "ID")]
    pub id: i64,
    /// Contact address
    pub email: String,
    /// Stored as supplied; hashing belongs to the caller
    pub password: String,
    /// Family name
    pub last: String,
    /// Middle name, empty when not supplied
    pub middle: String,
    /// Given name
    pub first: String,
    /// Free-form phone number
    pub phone: String,
    /// When the row was inserted
    pub created_at: DateTimeUtc,
    /// When the row was last written
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Record for Model {
    const KIND: EntityKind = EntityKind::User;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("Email", FieldKind::Text),
        FieldSpec::required("Password", FieldKind::Text),
        FieldSpec::required("Last", FieldKind::Text),
        FieldSpec::optional("Middle", FieldKind::Text),
        FieldSpec::optional("First", FieldKind::Text),
        FieldSpec::optional("Phone", FieldKind::Text),
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
        let FieldValue::Text(text) = value else {
            return Err(type_mismatch(field));
        };
        match field {
            "Email" => self.email = text,
            "Password" => self.password = text,
            "Last" => self.last = text,
            "Middle" => self.middle = text,
            "First" => self.first = text,
            "Phone" => self.phone = text,
            _ => return Err(type_mismatch(field)),
        }
        Ok(())
    }
}
