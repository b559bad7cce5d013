//! Error types shared by the graph, the session and the persistence adapters.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed JSON or a document that does not match its schema.
    #[error("failed to parse {what}: {reason}")]
    Parse { what: &'static str, reason: String },

    /// Well-formed document whose contents contradict each other.
    #[error("invalid {what}: {reason}")]
    InvalidStructure { what: &'static str, reason: String },

    #[error("{what} exceeds limit of {limit}")]
    CapsExceeded { what: &'static str, limit: usize },

    #[error("{what} out of bounds")]
    OutOfBounds { what: &'static str },

    #[error("{what} version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        what: &'static str,
        found: u32,
        max_supported: u32,
    },

    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    /// Mutation or query referencing a stale or absent id.
    #[error("unknown {kind} id {id}")]
    UnknownEntity { kind: &'static str, id: u32 },

    #[error("a gesture is already in progress")]
    GestureActive,

    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("judge service error: {message}")]
    Remote { message: String },
}

impl Error {
    pub(crate) fn parse(what: &'static str, err: impl std::fmt::Display) -> Self {
        Error::Parse {
            what,
            reason: err.to_string(),
        }
    }

    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidStructure {
            what,
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown(kind: &'static str, id: u32) -> Self {
        Error::UnknownEntity { kind, id }
    }

    /// Stable snake_case code, used by the binding layer's error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Parse { .. } => "json_parse",
            Error::InvalidStructure { .. } => "invalid_structure",
            Error::CapsExceeded { .. } => "caps_exceeded",
            Error::OutOfBounds { .. } => "out_of_bounds",
            Error::UnsupportedVersion { .. } => "unsupported_version",
            Error::NotFound { .. } => "not_found",
            Error::UnknownEntity { .. } => "invalid_id",
            Error::GestureActive => "gesture_active",
            Error::Io { .. } => "io",
            Error::Remote { .. } => "remote",
        }
    }

    /// True for every failure that rejects a document's contents.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Error::Parse { .. }
                | Error::InvalidStructure { .. }
                | Error::CapsExceeded { .. }
                | Error::OutOfBounds { .. }
                | Error::UnsupportedVersion { .. }
        )
    }
}
