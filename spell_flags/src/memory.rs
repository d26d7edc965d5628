//! In-memory collaborators.
//!
//! Used by tests and by hosts that keep their data in process. They follow the
//! same contracts as real host adapters: the annotation store keeps opaque JSON
//! blobs, the reference store parses its document on every fetch.

use mana_rules::{Item, ItemId, Owner, OwnerId, RuntimeSpell};
use std::cell::Cell;
use std::collections::HashMap;

use crate::ports::{AnnotationStore, ItemRegistry, ReferenceDataStore, SpellCaster};
use crate::reference::ReferenceData;
use crate::SpellFlagError;

/// Owners and items held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRegistry {
    owners: Vec<Owner>,
}

impl InMemoryItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an owner, returning its ID.
    pub fn add_owner(&mut self, owner: Owner) -> OwnerId {
        let id = owner.id.clone();
        self.owners.push(owner);
        id
    }

    pub fn owner(&self, id: &OwnerId) -> Option<&Owner> {
        self.owners.iter().find(|owner| &owner.id == id)
    }

    pub fn owner_mut(&mut self, id: &OwnerId) -> Option<&mut Owner> {
        self.owners.iter_mut().find(|owner| &owner.id == id)
    }
}

impl ItemRegistry for InMemoryItemRegistry {
    fn owner_ids(&self) -> Vec<OwnerId> {
        self.owners.iter().map(|owner| owner.id.clone()).collect()
    }

    fn get_item(&self, owner_id: &OwnerId, item_id: &ItemId) -> Result<Item, SpellFlagError> {
        let owner = self
            .owner(owner_id)
            .ok_or_else(|| SpellFlagError::OwnerNotFound(owner_id.clone()))?;
        owner
            .get_item(item_id)
            .cloned()
            .ok_or_else(|| SpellFlagError::ItemNotFound(item_id.clone()))
    }

    fn get_owner_items(&self, owner_id: &OwnerId) -> Result<Vec<Item>, SpellFlagError> {
        self.owner(owner_id)
            .map(|owner| owner.items.clone())
            .ok_or_else(|| SpellFlagError::OwnerNotFound(owner_id.clone()))
    }
}

/// Annotation blobs keyed by owner and item.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnnotationStore {
    entries: HashMap<(OwnerId, ItemId), serde_json::Value>,
    writes: usize,
}

impl InMemoryAnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Raw stored blob, bypassing validation.
    pub fn raw(&self, owner_id: &OwnerId, item_id: &ItemId) -> Option<&serde_json::Value> {
        self.entries.get(&(owner_id.clone(), item_id.clone()))
    }
}

impl AnnotationStore for InMemoryAnnotationStore {
    fn get(
        &self,
        owner_id: &OwnerId,
        item_id: &ItemId,
    ) -> Result<Option<serde_json::Value>, SpellFlagError> {
        Ok(self.raw(owner_id, item_id).cloned())
    }

    fn set(
        &mut self,
        owner_id: &OwnerId,
        item_id: &ItemId,
        value: serde_json::Value,
    ) -> Result<(), SpellFlagError> {
        self.writes += 1;
        self.entries
            .insert((owner_id.clone(), item_id.clone()), value);
        Ok(())
    }

    fn unset(&mut self, owner_id: &OwnerId, item_id: &ItemId) -> Result<(), SpellFlagError> {
        self.entries.remove(&(owner_id.clone(), item_id.clone()));
        Ok(())
    }
}

/// A reference document held in memory.
///
/// The document is kept as raw JSON and parsed on every fetch, so a malformed
/// document surfaces the same way it would from disk.
#[derive(Debug, Clone)]
pub struct InMemoryReferenceStore {
    document: serde_json::Value,
    fetches: Cell<usize>,
}

impl InMemoryReferenceStore {
    pub fn new(data: ReferenceData) -> Self {
        let mut store = Self::from_value(serde_json::Value::Null);
        store.replace(data);
        store
    }

    /// Create a store over an arbitrary JSON document.
    pub fn from_value(document: serde_json::Value) -> Self {
        Self {
            document,
            fetches: Cell::new(0),
        }
    }

    /// Replace the reference data.
    pub fn replace(&mut self, data: ReferenceData) {
        self.document = serde_json::json!({ "spells": data.spells });
    }

    /// Replace the raw document.
    pub fn replace_value(&mut self, document: serde_json::Value) {
        self.document = document;
    }

    /// Number of fetches served.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl ReferenceDataStore for InMemoryReferenceStore {
    fn fetch_reference_data(&self) -> Result<ReferenceData, SpellFlagError> {
        self.fetches.set(self.fetches.get() + 1);
        ReferenceData::from_value(self.document.clone())
    }
}

/// A caster that records every spell it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingCaster {
    pub cast: Vec<(OwnerId, RuntimeSpell)>,
}

impl RecordingCaster {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpellCaster for RecordingCaster {
    fn cast_spell(&mut self, owner_id: &OwnerId, spell: &RuntimeSpell) -> Result<(), SpellFlagError> {
        self.cast.push((owner_id.clone(), spell.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceSpellEntry;
    use serde_json::json;

    #[test]
    fn test_registry_lookup_errors() {
        let mut registry = InMemoryItemRegistry::new();
        let mut owner = Owner::new("Elminster").with_id("o1");
        let item_id = owner.add_item(Item::spell("Fireball", 3));
        registry.add_owner(owner);

        let owner_id = OwnerId::new("o1");
        assert_eq!(registry.get_item(&owner_id, &item_id).unwrap().name, "Fireball");
        assert!(matches!(
            registry.get_item(&OwnerId::new("nobody"), &item_id),
            Err(SpellFlagError::OwnerNotFound(_))
        ));
        assert!(matches!(
            registry.get_item(&owner_id, &ItemId::new("nothing")),
            Err(SpellFlagError::ItemNotFound(_))
        ));
        assert!(matches!(
            registry.get_owner_items(&OwnerId::new("nobody")),
            Err(SpellFlagError::OwnerNotFound(_))
        ));
    }

    #[test]
    fn test_annotation_store_overwrite_and_unset() {
        let mut store = InMemoryAnnotationStore::new();
        let owner = OwnerId::new("o1");
        let item = ItemId::new("i1");

        store.set(&owner, &item, json!({ "a": 1 })).unwrap();
        store.set(&owner, &item, json!({ "a": 2 })).unwrap();
        assert_eq!(store.get(&owner, &item).unwrap(), Some(json!({ "a": 2 })));
        assert_eq!(store.len(), 1);
        assert_eq!(store.write_count(), 2);

        store.unset(&owner, &item).unwrap();
        store.unset(&owner, &item).unwrap();
        assert!(store.get(&owner, &item).unwrap().is_none());
    }

    #[test]
    fn test_reference_store_round_trips_entries() {
        let store = InMemoryReferenceStore::new(ReferenceData::new(vec![
            ReferenceSpellEntry::new("Shield", &["protection"]),
        ]));
        let data = store.fetch_reference_data().unwrap();
        assert_eq!(data.find_spell("Shield").unwrap().circles, vec!["protection"]);
        assert_eq!(store.fetch_count(), 1);
    }

    #[test]
    fn test_reference_store_malformed_document() {
        let store = InMemoryReferenceStore::from_value(json!(["not", "an", "object"]));
        assert!(matches!(
            store.fetch_reference_data(),
            Err(SpellFlagError::MalformedReferenceData(_))
        ));
    }
}
