//! Spell resolver - turns spell names and circle names into catalog circles.

use mana_rules::{Circle, CircleCatalog};
use std::sync::Arc;

use crate::ports::ReferenceDataStore;
use crate::reference::ReferenceSpellEntry;
use crate::SpellFlagError;

/// Resolves spells against the reference data and the circle catalog.
#[derive(Debug, Clone)]
pub struct SpellResolver {
    catalog: Arc<CircleCatalog>,
}

impl SpellResolver {
    /// Create a resolver over a shared catalog.
    pub fn new(catalog: Arc<CircleCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CircleCatalog {
        &self.catalog
    }

    /// Resolve circle names to catalog circles, keeping input order.
    ///
    /// Stops at the first name the catalog does not know and reports it.
    pub fn resolve_circles<S: AsRef<str>>(
        &self,
        raw_names: &[S],
    ) -> Result<Vec<Arc<Circle>>, SpellFlagError> {
        raw_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.catalog
                    .get_circle_from_name(name)
                    .ok_or_else(|| SpellFlagError::UnknownCircle(name.to_string()))
            })
            .collect()
    }

    /// Find the reference entry for a spell.
    ///
    /// Fetches the reference data on every call.
    pub fn lookup_reference_entry<D: ReferenceDataStore + ?Sized>(
        &self,
        store: &D,
        spell_name: &str,
    ) -> Result<ReferenceSpellEntry, SpellFlagError> {
        let data = store.fetch_reference_data()?;
        data.find_spell(spell_name)
            .cloned()
            .ok_or_else(|| SpellFlagError::SpellNotInReferenceData(spell_name.to_string()))
    }

    /// Look up a spell and resolve its circles.
    ///
    /// An entry listing no circles is a failure, never an empty result.
    pub fn resolve_spell<D: ReferenceDataStore + ?Sized>(
        &self,
        store: &D,
        spell_name: &str,
    ) -> Result<Vec<Arc<Circle>>, SpellFlagError> {
        let entry = self.lookup_reference_entry(store, spell_name)?;
        if entry.circles.is_empty() {
            return Err(SpellFlagError::NoCircles(spell_name.to_string()));
        }
        self.resolve_circles(&entry.circles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryReferenceStore;
    use crate::reference::ReferenceData;

    fn resolver() -> SpellResolver {
        SpellResolver::new(Arc::new(CircleCatalog::builtin().unwrap()))
    }

    fn store() -> InMemoryReferenceStore {
        InMemoryReferenceStore::new(ReferenceData::new(vec![
            ReferenceSpellEntry::new("Fireball", &["fire", "destruction"]),
            ReferenceSpellEntry::new("Null Bolt", &[]),
            ReferenceSpellEntry::new("Bogus Bolt", &["fire", "bogus", "also-bogus"]),
        ]))
    }

    #[test]
    fn test_resolve_preserves_order() {
        let resolver = resolver();
        let circles = resolver.resolve_circles(&["fire", "air"]).unwrap();
        let names: Vec<_> = circles.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["fire", "air"]);

        let circles = resolver.resolve_circles(&["air", "fire"]).unwrap();
        let names: Vec<_> = circles.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["air", "fire"]);
    }

    #[test]
    fn test_resolve_fails_on_first_unknown() {
        let resolver = resolver();
        let err = resolver
            .resolve_circles(&["fire", "bogus", "also-bogus"])
            .unwrap_err();
        assert!(matches!(err, SpellFlagError::UnknownCircle(name) if name == "bogus"));
    }

    #[test]
    fn test_resolve_accepts_owned_strings() {
        let resolver = resolver();
        let names = vec!["water".to_string()];
        assert_eq!(resolver.resolve_circles(&names).unwrap().len(), 1);
    }

    #[test]
    fn test_lookup_reference_entry() {
        let resolver = resolver();
        let store = store();

        let entry = resolver.lookup_reference_entry(&store, "Fireball").unwrap();
        assert_eq!(entry.circles, vec!["fire", "destruction"]);

        let err = resolver.lookup_reference_entry(&store, "Wish").unwrap_err();
        assert!(matches!(err, SpellFlagError::SpellNotInReferenceData(name) if name == "Wish"));
    }

    #[test]
    fn test_lookup_refetches_every_call() {
        let resolver = resolver();
        let store = store();

        resolver.lookup_reference_entry(&store, "Fireball").unwrap();
        resolver.lookup_reference_entry(&store, "Fireball").unwrap();
        assert_eq!(store.fetch_count(), 2);
    }

    #[test]
    fn test_resolve_spell() {
        let resolver = resolver();
        let store = store();

        assert_eq!(resolver.resolve_spell(&store, "Fireball").unwrap().len(), 2);
        assert!(matches!(
            resolver.resolve_spell(&store, "Null Bolt"),
            Err(SpellFlagError::NoCircles(_))
        ));
        assert!(matches!(
            resolver.resolve_spell(&store, "Bogus Bolt"),
            Err(SpellFlagError::UnknownCircle(name)) if name == "bogus"
        ));
    }
}
