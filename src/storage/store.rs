use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::StorageError;

/// File holding the last-known submission id.
const SUBMISSION_ID_FILE: &str = "last_submission_id";

/// Remembers the id of the last saved submission across sessions.
///
/// The id is stored as a decimal string in a single file. There is no expiry
/// and no versioning.
#[derive(Debug, Clone)]
pub struct SubmissionStore {
    base_path: PathBuf,
}

impl SubmissionStore {
    /// Creates a store in the XDG data directory
    /// (`~/.local/share/sectorform/`), creating it if needed.
    pub fn new() -> Result<Self, StorageError> {
        Self::with_path(default_data_dir()?)
    }

    /// Creates a store rooted at the given directory, creating it if needed.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Returns the directory this store writes into.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn id_path(&self) -> PathBuf {
        self.base_path.join(SUBMISSION_ID_FILE)
    }

    /// Reads the remembered id.
    ///
    /// A missing file means nothing was saved yet. Content that is not an
    /// integer is treated the same way and logged.
    pub fn load(&self) -> Result<Option<i64>, StorageError> {
        let path = self.id_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<i64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                tracing::warn!(path = %path.display(), content = trimmed, "ignoring unreadable submission id");
                Ok(None)
            }
        }
    }

    /// Persists `id` as the remembered submission, replacing any previous one.
    pub fn remember(&self, id: i64) -> Result<(), StorageError> {
        fs::write(self.id_path(), id.to_string())?;
        tracing::debug!(id, "remembered submission id");
        Ok(())
    }
}

/// Returns `~/.local/share/sectorform` (or the platform equivalent).
pub fn default_data_dir() -> Result<PathBuf, StorageError> {
    let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
    Ok(data_dir.join("sectorform"))
}
