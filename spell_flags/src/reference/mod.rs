//! Reference data - the authoritative spell name to circle list table.
//!
//! The document shape is `{ "spells": [ { "name": ..., "circles": [...] } ] }`.
//! A document without a `spells` array is rejected as a whole. Individual
//! entries that do not match the entry shape are dropped, so one broken entry
//! only makes that spell unfindable.

mod file_store;

pub use file_store::*;

use serde::{Deserialize, Serialize};

use crate::SpellFlagError;

/// Reference document shipped with the module, copied into each world.
pub const DEFAULT_REFERENCE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/circles.json"));

/// One spell in the reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSpellEntry {
    pub name: String,
    /// Circle names, order-significant.
    pub circles: Vec<String>,
}

impl ReferenceSpellEntry {
    pub fn new(name: impl Into<String>, circles: &[&str]) -> Self {
        Self {
            name: name.into(),
            circles: circles.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawReferenceData {
    spells: Vec<serde_json::Value>,
}

/// The full reference table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceData {
    pub spells: Vec<ReferenceSpellEntry>,
}

impl ReferenceData {
    pub fn new(spells: Vec<ReferenceSpellEntry>) -> Self {
        Self { spells }
    }

    /// Parse a reference document from JSON text.
    pub fn from_json_str(source: &str) -> Result<Self, SpellFlagError> {
        let value: serde_json::Value = serde_json::from_str(source)
            .map_err(|e| SpellFlagError::MalformedReferenceData(e.to_string()))?;
        Self::from_value(value)
    }

    /// Parse a reference document from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SpellFlagError> {
        let raw: RawReferenceData = serde_json::from_value(value)
            .map_err(|e| SpellFlagError::MalformedReferenceData(e.to_string()))?;

        let mut spells = Vec::with_capacity(raw.spells.len());
        for (index, entry) in raw.spells.into_iter().enumerate() {
            match serde_json::from_value::<ReferenceSpellEntry>(entry) {
                Ok(entry) => spells.push(entry),
                Err(e) => tracing::debug!(index, error = %e, "Skipping malformed reference entry"),
            }
        }
        Ok(Self { spells })
    }

    /// Find the first entry with exactly this name.
    pub fn find_spell(&self, name: &str) -> Option<&ReferenceSpellEntry> {
        self.spells.iter().find(|spell| spell.name == name)
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}
