//! Owner definitions.

use serde::{Deserialize, Serialize};

use super::{Item, ItemId, OwnerId};

/// An owner (actor) holding a collection of items.
///
/// Items keep their insertion order; batch operations walk them in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Owner {
    /// Create a new owner with a generated ID and no items.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: OwnerId::generate(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<OwnerId>) -> Self {
        self.id = id.into();
        self
    }

    /// Add an item, returning its ID.
    pub fn add_item(&mut self, item: Item) -> ItemId {
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Get an item by ID.
    pub fn get_item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Get a mutable item by ID.
    pub fn get_item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Iterate over spell items in collection order.
    pub fn spell_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.is_spell())
    }
}
