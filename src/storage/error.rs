use std::fmt;

use super::record::RecordKind;

/// Failures surfaced by the record store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The underlying database could not be opened or its schema created.
    #[error("Failed to open record store: {0}")]
    Initialization(String),

    /// A lookup failed after the store was open, or the store was never opened.
    #[error("Failed to read {kind} records: {message}")]
    Read { kind: RecordKind, message: String },

    /// A put, replace or delete failed.
    #[error("Failed to write {kind} records: {message}")]
    Write { kind: RecordKind, message: String },
}

impl StoreError {
    pub(crate) fn read(kind: RecordKind, err: impl fmt::Display) -> Self {
        Self::Read {
            kind,
            message: format!("{err:#}"),
        }
    }

    pub(crate) fn write(kind: RecordKind, err: impl fmt::Display) -> Self {
        Self::Write {
            kind,
            message: format!("{err:#}"),
        }
    }

    /// The record kind involved, if the failure was tied to one.
    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            StoreError::Initialization(_) => None,
            StoreError::Read { kind, .. } | StoreError::Write { kind, .. } => Some(*kind),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
