//! Film cache - the last complete collection, stored as JSON.
//!
//! The cache lives in the OS-standard data directory:
//! - Windows: %APPDATA%\mubi-parser\mubi.json
//! - macOS: ~/Library/Application Support/mubi-parser/mubi.json
//! - Linux: ~/.local/share/mubi-parser/mubi.json
//!
//! It is read once before a pipeline run and overwritten once after a
//! successful one. The file is small (at most `MAX_FILMS` records), so the
//! store is synchronous.

use std::path::{Path, PathBuf};

use crate::model::Film;

/// File name of the cache inside the data directory
pub const CACHE_FILE: &str = "mubi.json";

/// Persistent store for the film collection.
pub trait CacheStore: Send + Sync {
    /// Read the cached collection.
    fn load(&self) -> Result<Vec<Film>, CacheError>;

    /// Replace the cached collection.
    fn save(&self, films: &[Film]) -> Result<(), CacheError>;
}

/// Get the default data directory
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("mubi-parser"))
}

/// Cache stored as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonCache {
    path: PathBuf,
}

impl JsonCache {
    /// Cache at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache file inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CACHE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheStore for JsonCache {
    fn load(&self) -> Result<Vec<Film>, CacheError> {
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| CacheError::Read(self.path.clone(), e))?;
        let films: Vec<Film> = serde_json::from_str(&contents)
            .map_err(|e| CacheError::Decode(self.path.clone(), e))?;

        tracing::debug!("Loaded {} cached films from {:?}", films.len(), self.path);
        Ok(films)
    }

    fn save(&self, films: &[Film]) -> Result<(), CacheError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| CacheError::CreateDir(dir.to_path_buf(), e))?;
        }

        let contents = serde_json::to_string_pretty(films).map_err(CacheError::Encode)?;

        // Write atomically (write to temp, then rename)
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &contents)
            .map_err(|e| CacheError::Write(temp_path.clone(), e))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| CacheError::Rename(temp_path, self.path.clone(), e))?;

        tracing::info!("Saved {} films to {:?}", films.len(), self.path);
        Ok(())
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Cache errors
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Failed to read cache {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to decode cache {0}: {1}")]
    Decode(PathBuf, serde_json::Error),

    #[error("Failed to encode films: {0}")]
    Encode(serde_json::Error),

    #[error("Failed to create data directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to write cache to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}
