// Passkeep — Metadata file store
//
// Single source of truth for organization/account metadata and flags.
// Persists the whole collection as pretty-printed JSON; an absent file
// self-heals to an empty collection on first read. Knows nothing about
// secrets.

use std::fs;
use std::path::{Path, PathBuf};

use super::models::OrgCollection;
use super::StoreError;

/// File name kept compatible with the metadata files written by earlier
/// versions of the tool.
const META_FILE: &str = "metaData.json";

/// JSON-file-backed metadata store.
pub struct MetaStore {
    path: PathBuf,
}

impl MetaStore {
    /// Store at an explicit path (used by tests and custom setups).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the per-OS standard config location,
    /// e.g. `~/.config/passkeep/metaData.json` on Linux.
    pub fn open_default() -> Result<Self, StoreError> {
        let base = dirs_next::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(base.join("passkeep").join(META_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection. If the file does not exist yet, persist an empty
    /// collection and return it.
    pub fn load(&self) -> Result<OrgCollection, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = OrgCollection::default();
                self.save(&empty)?;
                tracing::info!(path = %self.path.display(), "Initialized empty metadata store");
                Ok(empty)
            }
            Err(e) => Err(StoreError::Io {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Persist the complete collection, overwriting the whole file.
    pub fn save(&self, collection: &OrgCollection) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(collection)?;
        fs::write(&self.path, json).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            orgs = collection.orgs.len(),
            "Metadata persisted"
        );
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
