//! # Mana Rules
//!
//! The rules-data crate for Mana Spells - owners and their spell items, the
//! circle definitions spells are classified into, and the persisted spell
//! annotation ("spell flag") model. This crate performs no I/O; storage and
//! lookups live in `spell_flags`.

pub mod annotation;
pub mod catalog;
pub mod entities;
pub mod mechanics;

pub use annotation::*;
pub use catalog::*;
pub use entities::*;
pub use mechanics::*;
