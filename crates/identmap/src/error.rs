//! Error types for identmap

use thiserror::Error;

use crate::record::RecordType;

/// Result type alias for identmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for identity map operations
///
/// Lookup misses are not errors; they come back as `None` or as a shorter
/// `Vec`. Failures raised by a [`Finder`](crate::Finder) keep their own type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Caller broke an operation's contract (e.g. a multi-get with no ids)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Type was registered twice in the hierarchy
    #[error("Type already registered: {0}")]
    DuplicateType(RecordType),

    /// Subtype names a parent that is not registered yet
    #[error("Unknown parent type '{parent}' for '{ty}'")]
    UnknownParent {
        /// Type being registered
        ty: RecordType,
        /// Missing parent
        parent: RecordType,
    },
}
