//! Storage module for persisting downloaded documents
//!
//! Documents live in a flat layout under a single root directory:
//! `root/<sanitized topic>/<sanitized filename>.pdf`. Folder creation is
//! idempotent and files with the same name are overwritten, last write wins.
//! No locking is applied; each file is written from a single in-memory buffer.

mod folder;

pub use folder::{FolderStore, TopicFolder};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create folder {path}: {source}")]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Topic '{0}' does not produce a usable folder name")]
    UnusableFolderName(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
