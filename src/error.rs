use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::Programme;

/// Record field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Programme,
    Mark,
}

impl Field {
    /// User-facing explanation of the rule the field broke.
    pub fn rule(self) -> String {
        match self {
            Field::Id => "Invalid ID. Must be a 7-digit number not starting with 0.".to_string(),
            Field::Name => {
                "Invalid name. Name cannot be empty; only letters and spaces allowed (max 49)."
                    .to_string()
            }
            Field::Programme => format!("Invalid programme. Use {}.", Programme::codes()),
            Field::Mark => "Invalid mark. Must be a number between 1 and 100.".to_string(),
        }
    }
}

/// Failures surfaced by [`crate::store::RecordStore`]. None of them are fatal:
/// the store is left in its last valid state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}", .0.rule())]
    Validation(Field),
    #[error("No record found with ID {0}.")]
    NotFound(u32),
    #[error("A record with ID {0} already exists.")]
    Duplicate(u32),
    #[error("Cannot insert: database full ({0} records).")]
    Full(usize),
    #[error("A file path is required.")]
    EmptyPath,
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
