//! Argument decoding - turns the untyped argument map a client sends into typed values.
//!
//! Each field argument is in exactly one of three states: absent (missing key or JSON `null`),
//! present with the declared type, or present with the wrong type. Decoding happens once, here,
//! so the merge engine only ever receives a clean `Changes` map.

use crate::core::record::{FieldKind, FieldSpec, FieldValue, ID_FIELD, Record};
use crate::errors::{Error, Result};
use serde_json::Value;

/// Untyped named arguments for one operation, as decoded from the request body.
pub type Arguments = serde_json::Map<String, Value>;

/// The state of a single argument after decoding.
#[derive(Clone, Debug, PartialEq)]
pub enum Presence {
    /// Key missing or explicitly `null`
    Absent,
    /// Key present with a value of the declared kind
    Present(FieldValue),
    /// Key present with a value of another kind
    WrongType,
}

/// Classifies the argument for `spec`.
///
/// Float fields accept any JSON number; text fields accept only JSON strings.
#[must_use]
pub fn presence(arguments: &Arguments, spec: &FieldSpec) -> Presence {
    match (arguments.get(spec.name), spec.kind) {
        (None | Some(Value::Null), _) => Presence::Absent,
        (Some(Value::Number(number)), FieldKind::Float) => number
            .as_f64()
            .map_or(Presence::WrongType, |value| {
                Presence::Present(FieldValue::Float(value))
            }),
        (Some(Value::String(text)), FieldKind::Text) => {
            Presence::Present(FieldValue::Text(text.clone()))
        }
        _ => Presence::WrongType,
    }
}

/// Sparse set of proposed field changes, in field declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Changes {
    entries: Vec<(&'static str, FieldValue)>,
}

impl Changes {
    /// An empty change set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds or replaces the proposed value for `field`.
    #[must_use]
    pub fn with(mut self, field: &'static str, value: FieldValue) -> Self {
        self.insert(field, value);
        self
    }

    /// Adds or replaces the proposed value for `field`.
    pub fn insert(&mut self, field: &'static str, value: FieldValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == field) {
            entry.1 = value;
        } else {
            self.entries.push((field, value));
        }
    }

    /// The proposed value for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// Whether no field is changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of changed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl IntoIterator for Changes {
    type Item = (&'static str, FieldValue);
    type IntoIter = std::vec::IntoIter<(&'static str, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Decodes every declared field of `R` into a change set.
///
/// Keys that are not declared fields (including `ID`) are ignored.
///
/// # Errors
/// Returns `Error::ArgumentType` naming the first field, in declaration order, whose value has
/// the wrong type.
pub fn decode_changes<R: Record>(arguments: &Arguments) -> Result<Changes> {
    let mut changes = Changes::new();
    for spec in R::FIELDS {
        match presence(arguments, spec) {
            Presence::Absent => {}
            Presence::Present(value) => changes.insert(spec.name, value),
            Presence::WrongType => return Err(Error::ArgumentType { field: spec.name }),
        }
    }
    Ok(changes)
}

/// Checks that every field `R` requires on create is supplied, in declaration order.
///
/// A required text field that is empty or whitespace-only counts as missing.
///
/// # Errors
/// Returns `Error::MissingArgument` naming the first required field that is absent, null,
/// mistyped, or blank.
pub fn check_required<R: Record>(arguments: &Arguments) -> Result<()> {
    for spec in R::FIELDS.iter().filter(|spec| spec.required_on_create) {
        match presence(arguments, spec) {
            Presence::Present(FieldValue::Text(text)) if text.trim().is_empty() => {
                return Err(Error::MissingArgument { field: spec.name });
            }
            Presence::Present(_) => {}
            Presence::Absent | Presence::WrongType => {
                return Err(Error::MissingArgument { field: spec.name });
            }
        }
    }
    Ok(())
}

/// Reads the `ID` argument.
///
/// # Errors
/// Returns `Error::MissingArgument("ID")` when the key is absent, null, or not an integer.
pub fn required_id(arguments: &Arguments) -> Result<i64> {
    arguments
        .get(ID_FIELD)
        .and_then(Value::as_i64)
        .ok_or(Error::MissingArgument { field: ID_FIELD })
}

/// Reads the `ID` argument of an operation that addresses an existing record.
///
/// # Errors
/// Returns `Error::MissingArgument("ID")` when the key is absent, null, not an integer, or not
/// positive.
pub fn positive_id(arguments: &Arguments) -> Result<i64> {
    required_id(arguments).and_then(|id| {
        if id > 0 {
            Ok(id)
        } else {
            Err(Error::MissingArgument { field: ID_FIELD })
        }
    })
}
