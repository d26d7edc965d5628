//! Spell mechanics: circles and the runtime spell handed to the caster.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Broad family a circle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CircleAspect {
    Elemental,
    Arcane,
    Divine,
    Primal,
    Shadow,
}

/// A circle of magic - a classification tag attached to spells.
///
/// Circles are built once when the catalog is loaded and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Circle {
    pub name: String,
    pub aspect: CircleAspect,
    /// Relative strength of the circle, used by the casting layer.
    pub potency: u8,
}

impl Circle {
    /// Create a new circle.
    pub fn new(name: impl Into<String>, aspect: CircleAspect, potency: u8) -> Self {
        Self {
            name: name.into(),
            aspect,
            potency,
        }
    }
}

impl std::fmt::Display for Circle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A spell as cast at runtime, built from an annotation and the cast level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSpell {
    pub base_level: u32,
    pub cast_level: u32,
    pub circles: Vec<Arc<Circle>>,
    pub is_reaction: bool,
}

impl RuntimeSpell {
    /// Number of levels the spell is upcast by (0 when cast at or below base).
    pub fn upcast_levels(&self) -> u32 {
        self.cast_level.saturating_sub(self.base_level)
    }

    /// Names of the circles, in classification order.
    pub fn circle_names(&self) -> Vec<&str> {
        self.circles.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_equality_is_structural() {
        let a = Circle::new("fire", CircleAspect::Elemental, 2);
        let b = Circle::new("fire", CircleAspect::Elemental, 2);
        let c = Circle::new("fire", CircleAspect::Arcane, 2);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(Arc::new(a), Arc::new(b));
    }

    #[test]
    fn test_upcast_levels() {
        let spell = RuntimeSpell {
            base_level: 3,
            cast_level: 5,
            circles: vec![Arc::new(Circle::new("fire", CircleAspect::Elemental, 2))],
            is_reaction: false,
        };
        assert_eq!(spell.upcast_levels(), 2);
        assert_eq!(spell.circle_names(), vec!["fire"]);

        let lower = RuntimeSpell {
            cast_level: 1,
            ..spell
        };
        assert_eq!(lower.upcast_levels(), 0);
    }
}
