//! Trait definitions for the host collaborators.
//!
//! The classification layer never reaches into host globals. Everything it
//! needs from the outside world comes through these traits, injected into
//! [`SpellAnnotationManager`](crate::SpellAnnotationManager) at construction.
//! In-memory implementations live in [`crate::memory`].

use mana_rules::{Item, ItemId, OwnerId, RuntimeSpell};

use crate::reference::ReferenceData;
use crate::SpellFlagError;

/// Source of the per-world reference data.
pub trait ReferenceDataStore {
    /// Fetch the current reference data. Called on every lookup; implementations
    /// should not cache.
    fn fetch_reference_data(&self) -> Result<ReferenceData, SpellFlagError>;
}

/// Per-item storage for one annotation blob, keyed by owner and item.
pub trait AnnotationStore {
    /// Get the stored blob, if any.
    fn get(&self, owner_id: &OwnerId, item_id: &ItemId)
        -> Result<Option<serde_json::Value>, SpellFlagError>;

    /// Store a blob, replacing any existing one.
    fn set(
        &mut self,
        owner_id: &OwnerId,
        item_id: &ItemId,
        value: serde_json::Value,
    ) -> Result<(), SpellFlagError>;

    /// Remove the stored blob. Removing an absent blob is not an error.
    fn unset(&mut self, owner_id: &OwnerId, item_id: &ItemId) -> Result<(), SpellFlagError>;
}

/// Read access to the host's owners and their items.
pub trait ItemRegistry {
    /// All owner IDs, in registry order.
    fn owner_ids(&self) -> Vec<OwnerId>;

    /// Get one item of an owner.
    ///
    /// Fails with `OwnerNotFound` or `ItemNotFound`.
    fn get_item(&self, owner_id: &OwnerId, item_id: &ItemId) -> Result<Item, SpellFlagError>;

    /// Get all items of an owner, in collection order.
    fn get_owner_items(&self, owner_id: &OwnerId) -> Result<Vec<Item>, SpellFlagError>;
}

/// The casting layer that consumes runtime spells.
pub trait SpellCaster {
    fn cast_spell(&mut self, owner_id: &OwnerId, spell: &RuntimeSpell) -> Result<(), SpellFlagError>;
}
