//! Collection file storage.
//!
//! Persists a [`Collection`] as JSON. The default location is the platform data
//! directory, e.g. `~/.local/share/todolist/todolist.json` on Linux.
//!
//! Both synchronous and asynchronous I/O methods are provided:
//! - `save()`, `load()` - Synchronous methods using `std::fs`
//! - `save_async()`, `load_async()` - Asynchronous methods using `tokio::fs`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

use crate::Collection;

/// Default data filename.
const DATA_FILENAME: &str = "todolist.json";

/// Application qualifier (for platform paths).
const QUALIFIER: &str = "";

/// Application organization (for platform paths).
const ORGANIZATION: &str = "";

/// Application name (for platform paths).
const APPLICATION: &str = "todolist";

/// Errors that can occur during collection storage operations.
#[derive(Debug, Error)]
pub enum CollectionStoreError {
    /// Failed to determine the data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read data file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write data file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file delete.
    #[error("failed to delete data file '{path}': {source}")]
    DeleteError {
        /// The path that failed to delete.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CollectionStoreError {
    /// Returns true if this is a read error caused by a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CollectionStoreError::ReadError { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, CollectionStoreError>;

/// Persistent storage for a [`Collection`].
///
/// `CollectionStore` is [`Send`] and [`Sync`], but file operations are not
/// synchronized. Concurrent `save()` calls from several threads can interleave;
/// callers that share a store across threads must serialize access themselves.
///
/// # Example
///
/// ```no_run
/// use todolist_core::{Collection, CollectionStore};
///
/// let store = CollectionStore::new()?;
///
/// // Load existing data or start empty
/// let collection = store.load_or_default()?;
///
/// store.save(&collection)?;
/// # Ok::<(), todolist_core::CollectionStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CollectionStore {
    /// Path to the data file.
    path: PathBuf,
}

impl CollectionStore {
    /// Creates a new `CollectionStore` at the default platform data path.
    ///
    /// # Errors
    ///
    /// Returns `CollectionStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a new `CollectionStore` with a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default data file path.
    ///
    /// On Linux: `~/.local/share/todolist/todolist.json`
    /// On macOS: `~/Library/Application Support/todolist/todolist.json`
    /// On Windows: `C:\Users\<User>\AppData\Roaming\todolist\data\todolist.json`
    ///
    /// # Errors
    ///
    /// Returns `CollectionStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(CollectionStoreError::NoDataDir)?;

        Ok(project_dirs.data_dir().join(DATA_FILENAME))
    }

    /// Returns the path to the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the collection from disk.
    ///
    /// # Errors
    ///
    /// - Returns `CollectionStoreError::ReadError` if the file cannot be read
    ///   (including when it does not exist; see [`load_or_default()`](Self::load_or_default)).
    /// - Returns `CollectionStoreError::Json` if the file contains invalid JSON.
    pub fn load(&self) -> Result<Collection> {
        debug!(path = %self.path.display(), "loading collection");
        let contents =
            fs::read_to_string(&self.path).map_err(|e| CollectionStoreError::ReadError {
                path: self.path.clone(),
                source: e,
            })?;
        let collection: Collection = serde_json::from_str(&contents)?;
        debug!(
            todos = collection.todos.len(),
            tags = collection.tags.len(),
            "collection loaded"
        );
        Ok(collection)
    }

    /// Loads the collection, returning an empty one if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `CollectionStoreError::ReadError` for I/O errors other than "file not found".
    /// - Returns `CollectionStoreError::Json` if the file contains invalid JSON.
    pub fn load_or_default(&self) -> Result<Collection> {
        match self.load() {
            Ok(collection) => Ok(collection),
            Err(e) if e.is_not_found() => {
                debug!(path = %self.path.display(), "no data file, starting empty");
                Ok(Collection::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the collection to disk atomically.
    ///
    /// Creates the parent directory if needed and writes pretty-printed JSON
    /// to a temporary file that is then renamed over the data file.
    ///
    /// # Errors
    ///
    /// - Returns `CollectionStoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `CollectionStoreError::WriteError` if the file cannot be written.
    /// - Returns `CollectionStoreError::Json` if serialization fails.
    pub fn save(&self, collection: &Collection) -> Result<()> {
        if let Some(parent) = self.non_empty_parent() {
            fs::create_dir_all(parent).map_err(|e| CollectionStoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(collection)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| CollectionStoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| CollectionStoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), todos = collection.todos.len(), "collection saved");
        Ok(())
    }

    /// Returns true if the data file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Deletes the data file from disk.
    ///
    /// Does not return an error if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `CollectionStoreError::DeleteError` if the file cannot be deleted.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CollectionStoreError::DeleteError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    // =========================================================================
    // Async I/O Methods
    // =========================================================================

    /// Loads the collection from disk asynchronously.
    ///
    /// This is the async equivalent of [`load()`](Self::load).
    ///
    /// # Errors
    ///
    /// - Returns `CollectionStoreError::ReadError` if the file cannot be read.
    /// - Returns `CollectionStoreError::Json` if the file contains invalid JSON.
    pub async fn load_async(&self) -> Result<Collection> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CollectionStoreError::ReadError {
                path: self.path.clone(),
                source: e,
            })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads the collection asynchronously, returning an empty one if the file
    /// doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `CollectionStoreError::ReadError` for I/O errors other than "file not found".
    /// - Returns `CollectionStoreError::Json` if the file contains invalid JSON.
    pub async fn load_or_default_async(&self) -> Result<Collection> {
        match self.load_async().await {
            Ok(collection) => Ok(collection),
            Err(e) if e.is_not_found() => Ok(Collection::default()),
            Err(e) => Err(e),
        }
    }

    /// Saves the collection to disk asynchronously using atomic write.
    ///
    /// This is the async equivalent of [`save()`](Self::save).
    ///
    /// # Errors
    ///
    /// - Returns `CollectionStoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `CollectionStoreError::WriteError` if the file cannot be written.
    /// - Returns `CollectionStoreError::Json` if serialization fails.
    pub async fn save_async(&self, collection: &Collection) -> Result<()> {
        if let Some(parent) = self.non_empty_parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CollectionStoreError::CreateDirError {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let json = serde_json::to_string_pretty(collection)?;

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &json)
            .await
            .map_err(|e| CollectionStoreError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| CollectionStoreError::WriteError {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Returns the parent directory, skipping the empty parent of a bare filename.
    fn non_empty_parent(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}
