//! Reference data backed by a JSON file in the world's data directory.

use std::fs;
use std::path::{Path, PathBuf};

use super::ReferenceData;
use crate::ports::ReferenceDataStore;
use crate::{ModuleConfig, SpellFlagError};

/// Reads the per-world reference document from disk on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileReferenceStore {
    path: PathBuf,
}

impl JsonFileReferenceStore {
    /// Create a store reading the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store for the world copy described by the configuration.
    pub fn from_config(config: &ModuleConfig) -> Self {
        Self::new(config.reference_data_path())
    }

    /// Create a store for the configured world copy, seeding it from
    /// `default_json` first if the world has none.
    pub fn from_config_provisioned(
        config: &ModuleConfig,
        default_json: &str,
    ) -> Result<Self, SpellFlagError> {
        let store = Self::from_config(config);
        store.ensure_provisioned(default_json)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed the world copy from the module's default document.
    ///
    /// Only writes when no world copy exists yet; an existing copy is left
    /// untouched even if it differs from the default. Returns `true` when a
    /// copy was written.
    pub fn ensure_provisioned(&self, default_json: &str) -> Result<bool, SpellFlagError> {
        if self.path.exists() {
            return Ok(false);
        }

        ReferenceData::from_json_str(default_json)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, default_json)?;

        tracing::info!(
            path = %self.path.display(),
            "No reference data found in world, created a copy"
        );
        Ok(true)
    }
}

impl ReferenceDataStore for JsonFileReferenceStore {
    fn fetch_reference_data(&self) -> Result<ReferenceData, SpellFlagError> {
        let source = fs::read_to_string(&self.path).map_err(|e| {
            SpellFlagError::ReferenceDataUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        ReferenceData::from_json_str(&source)
    }
}
