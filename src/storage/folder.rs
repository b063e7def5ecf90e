//! Per-topic folder store backed by the local filesystem

use crate::storage::{StorageError, StorageResult};
use crate::url::topic_folder_name;
use std::path::{Path, PathBuf};

/// Root of the document tree
#[derive(Debug, Clone)]
pub struct FolderStore {
    root: PathBuf,
}

/// A topic folder that exists on disk
#[derive(Debug, Clone)]
pub struct TopicFolder {
    name: String,
    path: PathBuf,
}

impl FolderStore {
    /// Creates a store rooted at `root`; nothing is touched on disk yet
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Folder path a topic maps to, without creating it
    ///
    /// # Returns
    ///
    /// * `Ok((name, path))` - The sanitized folder name and its full path
    /// * `Err(StorageError::UnusableFolderName)` - The name would be empty or a dot segment
    pub fn folder_path(&self, topic: &str) -> StorageResult<(String, PathBuf)> {
        let name = topic_folder_name(topic);
        if name.is_empty() || name.chars().all(|c| c == '.') {
            return Err(StorageError::UnusableFolderName(topic.to_string()));
        }
        let path = self.root.join(&name);
        Ok((name, path))
    }

    /// Creates the topic folder if absent and returns it
    ///
    /// An existing folder is reused as-is, so repeated calls for the same
    /// topic always land in the same place.
    pub async fn topic_folder(&self, topic: &str) -> StorageResult<TopicFolder> {
        let (name, path) = self.folder_path(topic)?;

        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| StorageError::CreateFolder {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Using folder {}", path.display());
        Ok(TopicFolder { name, path })
    }
}

impl TopicFolder {
    /// Sanitized folder name, as used in relative paths
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the folder
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `bytes` to `filename` inside the folder, replacing any existing file
    ///
    /// # Returns
    ///
    /// The path relative to the store root, `<folder>/<filename>`
    pub async fn write(&self, filename: &str, bytes: &[u8]) -> StorageResult<String> {
        let path = self.path.join(filename);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::WriteFile {
                path: path.clone(),
                source,
            })?;

        Ok(format!("{}/{}", self.name, filename))
    }
}
