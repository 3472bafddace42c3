//! # Store Errors
//!
//! Everything a store operation can reject. Domain errors (duplicates,
//! unknown names, loan conflicts) leave state untouched. I/O errors carry
//! the path that failed so the message is useful on its own.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which kind of named entity an error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Tool,
    Borrower,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Tool => write!(f, "Tool"),
            EntityKind::Borrower => write!(f, "Borrower"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: EntityKind, name: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: EntityKind, name: String },

    #[error("Cannot delete '{tool}': it is currently borrowed by {borrower}")]
    ToolOnLoan { tool: String, borrower: String },

    #[error("Cannot delete '{borrower}': has {count} active loan(s)")]
    BorrowerHasLoans { borrower: String, count: usize },

    #[error("Tool '{tool}' is already borrowed by {borrower}")]
    AlreadyOnLoan { tool: String, borrower: String },

    #[error("Tool '{0}' is not on loan")]
    NotOnLoan(String),

    #[error("{0} name cannot be empty")]
    EmptyName(EntityKind),

    #[error("{kind} name is longer than {max} characters")]
    NameTooLong { kind: EntityKind, max: usize },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed data file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Change saved, but history log {} could not be written: {source}", .path.display())]
    History {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// True for errors caused by the request itself rather than the filesystem.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            StoreError::Io { .. } | StoreError::Parse { .. } | StoreError::History { .. }
        )
    }
}
