//! Error types for spell flag operations.

use mana_rules::{AnnotationError, ItemId, OwnerId};
use thiserror::Error;

/// Errors that can occur while resolving, storing or reading spell flags.
///
/// None of these are fatal: single-item operations hand them back to the
/// caller, batch operations log them per item and keep going.
#[derive(Error, Debug)]
pub enum SpellFlagError {
    /// The spell name has no entry in the reference data.
    #[error("Spell not found in reference data: {0}")]
    SpellNotInReferenceData(String),

    /// A circle name has no entry in the circle catalog.
    #[error("Unknown circle: {0}")]
    UnknownCircle(String),

    /// Resolution produced an empty circle list for the named spell.
    #[error("Spell resolves to no circles: {0}")]
    NoCircles(String),

    /// The owner does not exist in the host registry.
    #[error("Owner not found: {0}")]
    OwnerNotFound(OwnerId),

    /// The item does not exist on the owner.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// The item exists but is not a spell.
    #[error("Item is not a spell: {0}")]
    NotASpell(ItemId),

    /// The operation needs an existing annotation and found none.
    #[error("Spell annotation missing")]
    AnnotationMissing,

    /// A stored annotation failed validation.
    #[error("Malformed spell annotation: {0}")]
    MalformedAnnotation(String),

    /// Reference data could not be fetched.
    #[error("Reference data unavailable: {0}")]
    ReferenceDataUnavailable(String),

    /// Reference data does not have the expected shape.
    #[error("Malformed reference data: {0}")]
    MalformedReferenceData(String),

    /// Annotation store transport error.
    #[error("Annotation store error: {0}")]
    Store(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<AnnotationError> for SpellFlagError {
    fn from(err: AnnotationError) -> Self {
        SpellFlagError::MalformedAnnotation(err.to_string())
    }
}
