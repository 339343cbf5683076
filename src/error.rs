use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the parts store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Part number must be unique: '{part_number}' is already in use")]
    UniqueConstraintViolation { part_number: String },

    #[error("Part name must not be empty")]
    EmptyName,

    #[error("Part price must be a finite number, got {0}")]
    InvalidPrice(f64),

    #[error("Database file not found: {}", .0.display())]
    DatabaseNotFound(PathBuf),

    #[error("Database file already exists: {}", .0.display())]
    DatabaseExists(PathBuf),

    #[error("Database error: {0}")]
    Persistence(#[from] rusqlite::Error),
}

impl StoreError {
    /// True for file and schema level failures, as opposed to rejected input.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            StoreError::DatabaseNotFound(_)
                | StoreError::DatabaseExists(_)
                | StoreError::Persistence(_)
        )
    }

    /// Maps a failed write, recognising a collision on the unique part number.
    pub(crate) fn from_write(err: rusqlite::Error, part_number: Option<&str>) -> Self {
        if let (rusqlite::Error::SqliteFailure(failure, _), Some(part_number)) = (&err, part_number) {
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
                return StoreError::UniqueConstraintViolation {
                    part_number: part_number.to_string(),
                };
            }
        }

        StoreError::Persistence(err)
    }
}

/// A clipboard line that could not be turned into a part draft.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed row: {reason}")]
pub struct MalformedRow {
    pub reason: String,
}

impl MalformedRow {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
