use crate::core::EntityKind;
use thiserror::Error;

/// Every failure the crate reports.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was absent, null, or of the wrong type.
    #[error("Missing required argument: {field}")]
    MissingArgument {
        /// Argument key
        field: &'static str,
    },

    /// An optional argument was present but could not be read as its declared type.
    #[error("Argument has the wrong type: {field}")]
    ArgumentType {
        /// Argument key
        field: &'static str,
    },

    /// Zero or negative identifier passed where a real row ID is required.
    #[error("Invalid identifier: {id}")]
    InvalidIdentifier {
        /// The rejected identifier
        id: i64,
    },

    /// No stored row has the requested identifier.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity type that was looked up
        entity: EntityKind,
        /// Identifier that matched nothing
        id: i64,
    },

    /// The database driver failed.
    #[error("Storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Socket or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
