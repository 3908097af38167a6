//! Entity merge engine.
//!
//! Overlays a sparse set of proposed changes onto an existing record. Fields named in the
//! change set are replaced; every other field keeps its current value. There is no I/O here.

use crate::core::{arguments::Changes, record::Record};
use crate::errors::Result;

/// Produces `existing` with every field in `changes` replaced.
///
/// The identifier and server-assigned metadata are never touched, so `merge(e, empty)` is `e`.
///
/// # Errors
/// Returns `Error::ArgumentType` naming the field when a proposed value does not match the
/// field's kind, or the field is not one of the record's mutable fields.
pub fn merge<R: Record>(existing: R, changes: Changes) -> Result<R> {
    let mut merged = existing;
    for (field, value) in changes {
        merged.set_field(field, value)?;
    }
    Ok(merged)
}

/// Builds a new record from the zero value overlaid with `changes`.
///
/// # Errors
/// Same as [`merge`].
pub fn build<R: Record>(changes: Changes) -> Result<R> {
    merge(R::default(), changes)
}
