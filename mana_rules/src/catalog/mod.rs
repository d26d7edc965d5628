//! Circle catalog - the registry of known circles, keyed by name.
//!
//! The catalog is built once and is read-only afterwards, so it can be shared
//! behind an `Arc` and read from anywhere without locking.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::mechanics::Circle;

/// Circle definitions shipped with the crate.
const BUILTIN_CIRCLES: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/circles.toml"));

/// Errors raised while building a catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid circle definitions: {0}")]
    Parse(String),

    #[error("Circle defined more than once: {0}")]
    DuplicateCircle(String),

    #[error("Circle definition has an empty name")]
    EmptyName,
}

#[derive(Debug, Deserialize)]
struct CircleDefinitions {
    #[serde(rename = "circle", default)]
    circles: Vec<Circle>,
}

/// Read-only registry mapping circle names to circles.
#[derive(Debug, Clone, Default)]
pub struct CircleCatalog {
    circles: HashMap<String, Arc<Circle>>,
    /// Names in definition order.
    order: Vec<String>,
}

impl CircleCatalog {
    /// Build a catalog from a list of circles.
    pub fn new(circles: impl IntoIterator<Item = Circle>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for circle in circles {
            if circle.name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if catalog.circles.contains_key(&circle.name) {
                return Err(CatalogError::DuplicateCircle(circle.name));
            }
            catalog.order.push(circle.name.clone());
            catalog.circles.insert(circle.name.clone(), Arc::new(circle));
        }
        Ok(catalog)
    }

    /// Build the catalog from the built-in circle definitions.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CIRCLES)
    }

    /// Build a catalog from a TOML document of `[[circle]]` tables.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let definitions: CircleDefinitions =
            toml::from_str(source).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(definitions.circles)
    }

    /// Look up a circle by exact name.
    pub fn get_circle_from_name(&self, name: &str) -> Option<Arc<Circle>> {
        self.circles.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.circles.contains_key(name)
    }

    /// Circle names in definition order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::CircleAspect;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = CircleCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.contains("fire"));
        assert!(catalog.contains("destruction"));
        assert_eq!(catalog.names()[0], "fire");
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let catalog = CircleCatalog::builtin().unwrap();
        assert!(catalog.get_circle_from_name("fire").is_some());
        assert!(catalog.get_circle_from_name("Fire").is_none());
        assert!(catalog.get_circle_from_name(" fire").is_none());
    }

    #[test]
    fn test_lookups_share_instances() {
        let catalog = CircleCatalog::builtin().unwrap();
        let a = catalog.get_circle_from_name("fire").unwrap();
        let b = catalog.get_circle_from_name("fire").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_duplicate_circle_rejected() {
        let result = CircleCatalog::new(vec![
            Circle::new("fire", CircleAspect::Elemental, 2),
            Circle::new("fire", CircleAspect::Arcane, 1),
        ]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateCircle("fire".into()));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = CircleCatalog::new(vec![Circle::new("  ", CircleAspect::Arcane, 1)]);
        assert_eq!(result.unwrap_err(), CatalogError::EmptyName);
    }

    #[test]
    fn test_from_toml_str() {
        let source = r#"
            [[circle]]
            name = "frost"
            aspect = "Elemental"
            potency = 2
        "#;
        let catalog = CircleCatalog::from_toml_str(source).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            *catalog.get_circle_from_name("frost").unwrap(),
            Circle::new("frost", CircleAspect::Elemental, 2)
        );
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let source = "[[circle]]\nname = \"frost\"\naspect = \"Cosmic\"\npotency = 1\n";
        assert!(matches!(
            CircleCatalog::from_toml_str(source),
            Err(CatalogError::Parse(_))
        ));
    }
}
