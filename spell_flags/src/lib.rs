//! # Spell Flags
//!
//! The classification layer of Mana Spells. It resolves a spell's name to
//! the circles it belongs to, stores that resolution as a versioned
//! annotation ("spell flag") on the spell item, and keeps those annotations
//! current when the reference data or the schema version changes.
//!
//! ## Core Components
//!
//! - **resolver**: Reference data lookup and circle resolution
//! - **manager**: Initialize, update and remove annotations, per item or in bulk
//! - **activation**: Turns an annotation into a runtime spell when an item is used
//! - **ports**: Traits for the host collaborators (items, annotation storage,
//!   reference data, casting)
//! - **memory** / **reference**: In-memory and file-backed collaborators
//!
//! ## Design Philosophy
//!
//! - **Never clobber user intent**: custom annotations are never rewritten automatically
//! - **Fail per item**: one bad spell never blocks a batch
//! - **Always fresh**: reference data is fetched on every lookup

pub mod activation;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod memory;
pub mod ports;
pub mod reference;
pub mod resolver;

pub use activation::*;
pub use config::*;
pub use error::*;
pub use manager::*;
pub use ports::*;
pub use reference::*;
pub use resolver::*;
