//! Spell annotations - the versioned classification record stored on a spell item.
//!
//! In storage an annotation is a loosely-typed JSON blob owned by the host.
//! [`AnnotationRecord`] is the strict shape of that blob; reading one back
//! validates it against the catalog and fails closed on anything unexpected.

mod version;

pub use version::*;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::catalog::CircleCatalog;
use crate::mechanics::Circle;

/// Errors raised while building or decoding an annotation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("Malformed annotation: {0}")]
    Malformed(String),

    #[error("Annotation has no circles")]
    EmptyCircles,

    #[error("Annotation references unknown circle: {0}")]
    UnknownCircle(String),

    #[error("Invalid schema version: {0}")]
    InvalidVersion(String),
}

/// The resolved classification of one spell item.
///
/// Two annotations are equal when they carry the same spell name and the same
/// circles in the same order. Base level, the custom marker and the schema
/// version do not take part in the comparison.
#[derive(Debug, Clone)]
pub struct SpellAnnotation {
    pub name: String,
    pub base_level: u32,
    pub circles: Vec<Arc<Circle>>,
    /// Set when a user supplied the circles by hand. Custom annotations are
    /// never replaced automatically.
    pub custom: bool,
    pub schema_version: SchemaVersion,
}

impl SpellAnnotation {
    /// Build an annotation derived from reference data.
    pub fn derived(
        name: impl Into<String>,
        base_level: u32,
        circles: Vec<Arc<Circle>>,
        schema_version: SchemaVersion,
    ) -> Result<Self, AnnotationError> {
        Self::build(name.into(), base_level, circles, false, schema_version)
    }

    /// Build a user-authored annotation.
    pub fn custom(
        name: impl Into<String>,
        base_level: u32,
        circles: Vec<Arc<Circle>>,
        schema_version: SchemaVersion,
    ) -> Result<Self, AnnotationError> {
        Self::build(name.into(), base_level, circles, true, schema_version)
    }

    fn build(
        name: String,
        base_level: u32,
        circles: Vec<Arc<Circle>>,
        custom: bool,
        schema_version: SchemaVersion,
    ) -> Result<Self, AnnotationError> {
        if circles.is_empty() {
            return Err(AnnotationError::EmptyCircles);
        }
        Ok(Self {
            name,
            base_level,
            circles,
            custom,
            schema_version,
        })
    }

    /// Check if this annotation was produced by the given schema version.
    pub fn is_current(&self, version: &SchemaVersion) -> bool {
        &self.schema_version == version
    }

    /// Circle names in classification order.
    pub fn circle_names(&self) -> Vec<String> {
        self.circles.iter().map(|c| c.name.clone()).collect()
    }

    /// Convert to the stored record shape.
    pub fn to_record(&self) -> AnnotationRecord {
        AnnotationRecord {
            name: self.name.clone(),
            base_level: self.base_level,
            circles: self.circle_names(),
            custom: self.custom,
            schema_version: self.schema_version.to_string(),
        }
    }

    /// Serialize to the JSON blob handed to the host for storage.
    pub fn to_value(&self) -> Result<serde_json::Value, AnnotationError> {
        serde_json::to_value(self.to_record())
            .map_err(|e| AnnotationError::Malformed(e.to_string()))
    }

    /// Rebuild an annotation from a stored record, resolving circle names
    /// against the catalog.
    pub fn from_record(
        record: AnnotationRecord,
        catalog: &CircleCatalog,
    ) -> Result<Self, AnnotationError> {
        let schema_version = record
            .schema_version
            .parse::<SchemaVersion>()
            .map_err(|_| AnnotationError::InvalidVersion(record.schema_version.clone()))?;

        let circles = record
            .circles
            .iter()
            .map(|name| {
                catalog
                    .get_circle_from_name(name)
                    .ok_or_else(|| AnnotationError::UnknownCircle(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::build(
            record.name,
            record.base_level,
            circles,
            record.custom,
            schema_version,
        )
    }

    /// Decode and validate a stored JSON blob.
    pub fn from_value(
        value: serde_json::Value,
        catalog: &CircleCatalog,
    ) -> Result<Self, AnnotationError> {
        Self::from_record(AnnotationRecord::from_value(value)?, catalog)
    }
}

impl PartialEq for SpellAnnotation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.circles == other.circles
    }
}

impl Eq for SpellAnnotation {}

/// Stored form of a [`SpellAnnotation`]. Circles are kept by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnnotationRecord {
    pub name: String,
    pub base_level: u32,
    pub circles: Vec<String>,
    pub custom: bool,
    pub schema_version: String,
}

impl AnnotationRecord {
    /// Decode a stored JSON blob into the record shape.
    ///
    /// Only the shape is checked; circle names are resolved by
    /// [`SpellAnnotation::from_record`].
    pub fn from_value(value: serde_json::Value) -> Result<Self, AnnotationError> {
        serde_json::from_value(value).map_err(|e| AnnotationError::Malformed(e.to_string()))
    }
}
