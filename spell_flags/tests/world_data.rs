//! Reference data provisioned into a world directory on disk.

use std::fs;
use std::sync::Arc;

use mana_rules::{CircleCatalog, Item, ItemId, Owner, OwnerId};
use spell_flags::memory::{InMemoryAnnotationStore, InMemoryItemRegistry};
use spell_flags::{
    JsonFileReferenceStore, ModuleConfig, SpellAnnotationManager, SpellFlagError, UpdateOutcome,
    DEFAULT_REFERENCE_JSON,
};
use tempfile::TempDir;

fn config_for(dir: &TempDir) -> ModuleConfig {
    let source = format!(
        "world_data_dir = {:?}\nschema_version = \"0.1.0\"\n",
        dir.path().join("worlds").join("test").join("mana-spells")
    );
    ModuleConfig::from_toml_str(&source).unwrap()
}

#[test]
fn test_provisioned_world_drives_manager() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);

    let unprovisioned = JsonFileReferenceStore::from_config(&config);
    assert!(matches!(
        spell_flags::ReferenceDataStore::fetch_reference_data(&unprovisioned),
        Err(SpellFlagError::ReferenceDataUnavailable(_))
    ));

    let store =
        JsonFileReferenceStore::from_config_provisioned(&config, DEFAULT_REFERENCE_JSON).unwrap();
    assert!(!store.ensure_provisioned(DEFAULT_REFERENCE_JSON).unwrap());

    let mut owner = Owner::new("Wizard").with_id("wizard");
    owner.add_item(Item::spell("Misty Step", 2).with_id("step"));
    let mut registry = InMemoryItemRegistry::new();
    registry.add_owner(owner);

    let mut manager = SpellAnnotationManager::new(
        registry,
        InMemoryAnnotationStore::new(),
        store,
        Arc::new(CircleCatalog::builtin().unwrap()),
        config.current_version().unwrap(),
    );
    let owner_id = OwnerId::new("wizard");
    let item_id = ItemId::new("step");

    let annotation = manager.initialize(&owner_id, &item_id).unwrap();
    assert_eq!(annotation.circle_names(), vec!["air", "transmutation"]);

    // A GM edits the world copy; the next update sees it without a restart.
    fs::write(
        config.reference_data_path(),
        r#"{"spells":[{"name":"Misty Step","circles":["air","illusion"]}]}"#,
    )
    .unwrap();

    match manager.update(&owner_id, &item_id).unwrap() {
        UpdateOutcome::Updated(updated) => {
            assert_eq!(updated.circle_names(), vec!["air", "illusion"]);
        }
        UpdateOutcome::NoChange => panic!("expected the edited reference data to apply"),
    }
}
