use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::domain::ProfileRecord;
use crate::error::ValidationError;

/// Persistence for the single farmer profile the CLI works with.
pub trait ProfileStore: Send + Sync {
    fn load(&self) -> Result<Option<ProfileRecord>, ProfileStoreError>;
    fn save(&self, record: &ProfileRecord) -> Result<(), ProfileStoreError>;
    fn clear(&self) -> Result<(), ProfileStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("profile storage failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored profile at {path} is unreadable: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not encode profile: {0}")]
    Encode(serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Profile kept as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn load(&self) -> Result<Option<ProfileRecord>, ProfileStoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|source| ProfileStoreError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, record: &ProfileRecord) -> Result<(), ProfileStoreError> {
        record.validate()?;
        let encoded = serde_json::to_vec_pretty(record).map_err(ProfileStoreError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, encoded)?;

        debug!(path = %self.path.display(), farmer = %record.farmer.id, "profile saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), ProfileStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
