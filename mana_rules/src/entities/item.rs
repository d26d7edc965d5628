//! Item definitions.

use serde::{Deserialize, Serialize};

use super::ItemId;

/// Item type the classification layer acts on. Every other type is ignored.
pub const SPELL_ITEM_TYPE: &str = "spell";

/// Activation types starting with this prefix mark a spell cast as a reaction.
pub const REACTION_ACTIVATION_PREFIX: &str = "reaction";

/// An item held by an owner, as exposed by the host registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Host item type, e.g. `"spell"`, `"weapon"`, `"feat"`.
    #[serde(rename = "type")]
    pub item_type: String,
    /// Spell level for spells, 0 for cantrips and non-spell items.
    #[serde(default)]
    pub level: u32,
    /// Host activation type, e.g. `"action"`, `"bonus"`, `"reaction"`.
    #[serde(default)]
    pub activation_type: String,
}

impl Item {
    /// Create a spell item with a generated ID and a standard action activation.
    pub fn spell(name: impl Into<String>, level: u32) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            item_type: SPELL_ITEM_TYPE.to_string(),
            level,
            activation_type: "action".to_string(),
        }
    }

    /// Create a non-spell item of the given type.
    pub fn other(name: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            item_type: item_type.into(),
            level: 0,
            activation_type: "action".to_string(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_activation(mut self, activation_type: impl Into<String>) -> Self {
        self.activation_type = activation_type.into();
        self
    }

    /// Check if this item is a spell.
    pub fn is_spell(&self) -> bool {
        self.item_type == SPELL_ITEM_TYPE
    }

    /// Check if this item is a spell above cantrip level.
    pub fn is_leveled_spell(&self) -> bool {
        self.is_spell() && self.level > 0
    }

    /// Check if activating this item happens as a reaction.
    pub fn is_reaction(&self) -> bool {
        self.activation_type.starts_with(REACTION_ACTIVATION_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spell_item() {
        let item = Item::spell("Fireball", 3);
        assert!(item.is_spell());
        assert!(item.is_leveled_spell());
        assert!(!item.is_reaction());
    }

    #[test]
    fn test_cantrip_is_not_leveled() {
        let item = Item::spell("Fire Bolt", 0);
        assert!(item.is_spell());
        assert!(!item.is_leveled_spell());
    }

    #[test]
    fn test_non_spell_item() {
        let item = Item::other("Longsword", "weapon");
        assert!(!item.is_spell());
        assert!(!item.is_leveled_spell());
    }

    #[test]
    fn test_reaction_activation() {
        let shield = Item::spell("Shield", 1).with_activation("reaction");
        assert!(shield.is_reaction());

        let damaged = Item::spell("Hellish Rebuke", 1).with_activation("reactiondamage");
        assert!(damaged.is_reaction());
    }

    #[test]
    fn test_item_type_serialized_as_type() {
        let item = Item::spell("Shield", 1).with_id("it1");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "spell");
        assert_eq!(value["id"], "it1");
    }
}
