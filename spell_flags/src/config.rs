//! Configuration for the spell flag layer.
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid configuration.

use mana_rules::SchemaVersion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::SpellFlagError;

/// Module settings.
///
/// # Examples
///
/// ```
/// use spell_flags::ModuleConfig;
///
/// let config = ModuleConfig::from_toml_str("debug = true").unwrap();
/// assert_eq!(config.module_id, "mana-spells");
/// assert!(config.debug);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Module identifier, also used as the log target filter.
    pub module_id: String,

    /// Version stamped on annotations; annotations with another version are
    /// rewritten on update.
    pub schema_version: String,

    /// Directory holding this world's copy of the reference data.
    pub world_data_dir: PathBuf,

    /// File name of the reference document inside `world_data_dir`.
    pub reference_file_name: String,

    /// Enable debug-level logging for the module.
    pub debug: bool,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            module_id: "mana-spells".to_string(),
            schema_version: "0.1.0".to_string(),
            world_data_dir: PathBuf::from("data").join("mana-spells"),
            reference_file_name: "circles.json".to_string(),
            debug: false,
        }
    }
}

impl ModuleConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, SpellFlagError> {
        let config: Self =
            toml::from_str(source).map_err(|e| SpellFlagError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpellFlagError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| SpellFlagError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Check field values that TOML parsing alone does not catch.
    pub fn validate(&self) -> Result<(), SpellFlagError> {
        if self.module_id.trim().is_empty() {
            return Err(SpellFlagError::Config("module_id must not be empty".into()));
        }
        if self.reference_file_name.trim().is_empty() {
            return Err(SpellFlagError::Config(
                "reference_file_name must not be empty".into(),
            ));
        }
        self.current_version()?;
        Ok(())
    }

    /// The configured schema version.
    pub fn current_version(&self) -> Result<SchemaVersion, SpellFlagError> {
        self.schema_version
            .parse()
            .map_err(|e: mana_rules::AnnotationError| SpellFlagError::Config(e.to_string()))
    }

    /// Full path of this world's reference document.
    pub fn reference_data_path(&self) -> PathBuf {
        self.world_data_dir.join(&self.reference_file_name)
    }
}
