//! Core logic - framework-agnostic argument decoding, merging, and operation resolution.

/// Untyped argument map decoding
pub mod arguments;
/// Entity merge engine
pub mod merge;
/// Field descriptors and the `Record` trait
pub mod record;
/// Operation resolver
pub mod resolver;

pub use arguments::{Arguments, Changes, Presence};
pub use merge::{build, merge};
pub use record::{EntityKind, FieldKind, FieldSpec, FieldValue, ID_FIELD, Record};
pub use resolver::{Entity, Operation, Outcome, Resolved, Resolver};
