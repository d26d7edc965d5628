//! Batch outcome reporting.

use mana_rules::{ItemId, OwnerId};

use crate::SpellFlagError;

/// A per-item failure inside a batch.
#[derive(Debug)]
pub struct BatchFailure {
    pub owner: OwnerId,
    pub item: ItemId,
    /// Item name at the time of the failure.
    pub spell: String,
    pub error: SpellFlagError,
}

/// Outcome of a bulk initialize or bulk update.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Items that received a new annotation.
    pub written: Vec<ItemId>,
    /// Items whose annotation was already current, or custom.
    pub unchanged: Vec<ItemId>,
    /// Items outside the operation's precondition.
    pub skipped: Vec<ItemId>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if every visited item succeeded or was skipped.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of spell items visited.
    pub fn visited(&self) -> usize {
        self.written.len() + self.unchanged.len() + self.skipped.len() + self.failures.len()
    }

    /// Append another report's results to this one.
    pub fn merge(&mut self, other: BatchReport) {
        self.written.extend(other.written);
        self.unchanged.extend(other.unchanged);
        self.skipped.extend(other.skipped);
        self.failures.extend(other.failures);
    }
}
