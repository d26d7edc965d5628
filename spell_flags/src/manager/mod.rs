//! Spell annotation manager - keeps spell flags on items in step with the
//! reference data.
//!
//! Per item, an annotation moves through these states:
//!
//! 1. **Unannotated**: no flag stored. `initialize` derives one from the
//!    reference data, `initialize_custom` stores a user-supplied one.
//! 2. **Derived**: a flag derived from the reference data at some schema
//!    version. `update` rewrites it when the reference data yields different
//!    circles or the version changed.
//! 3. **Custom**: a user-supplied flag. Never rewritten by `update`; only an
//!    explicit re-initialization or `unset` leaves this state.
//!
//! Batch operations walk an owner's spell items one at a time in collection
//! order. A failing item is logged and recorded, and the batch moves on.
//! Writes already made are kept if a batch is abandoned part way.

mod report;

pub use report::*;

use mana_rules::{
    AnnotationRecord, CircleCatalog, Item, ItemId, OwnerId, SchemaVersion, SpellAnnotation,
};
use std::sync::Arc;

use crate::ports::{AnnotationStore, ItemRegistry, ReferenceDataStore};
use crate::resolver::SpellResolver;
use crate::SpellFlagError;

/// Result of an update that did not fail.
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// A new annotation was written.
    Updated(SpellAnnotation),
    /// The stored annotation is current, or custom.
    NoChange,
}

impl UpdateOutcome {
    pub fn is_no_change(&self) -> bool {
        matches!(self, UpdateOutcome::NoChange)
    }
}

/// Orchestrates resolution and persistence of spell annotations.
pub struct SpellAnnotationManager<R, A, D> {
    registry: R,
    annotations: A,
    reference: D,
    resolver: SpellResolver,
    current_version: SchemaVersion,
}

impl<R, A, D> SpellAnnotationManager<R, A, D>
where
    R: ItemRegistry,
    A: AnnotationStore,
    D: ReferenceDataStore,
{
    /// Create a manager over the host collaborators.
    pub fn new(
        registry: R,
        annotations: A,
        reference: D,
        catalog: Arc<CircleCatalog>,
        current_version: SchemaVersion,
    ) -> Self {
        Self {
            registry,
            annotations,
            reference,
            resolver: SpellResolver::new(catalog),
            current_version,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    pub fn annotations(&self) -> &A {
        &self.annotations
    }

    pub fn reference(&self) -> &D {
        &self.reference
    }

    pub fn reference_mut(&mut self) -> &mut D {
        &mut self.reference
    }

    pub fn resolver(&self) -> &SpellResolver {
        &self.resolver
    }

    pub fn current_version(&self) -> &SchemaVersion {
        &self.current_version
    }

    /// Change the running schema version. Existing derived annotations become
    /// stale and are rewritten by the next update.
    pub fn set_current_version(&mut self, version: SchemaVersion) {
        self.current_version = version;
    }

    /// Read and validate the annotation stored on an item.
    ///
    /// Returns `Ok(None)` when the item has no annotation. A stored blob that
    /// does not decode is reported as `MalformedAnnotation`.
    pub fn get_annotation(
        &self,
        owner_id: &OwnerId,
        item_id: &ItemId,
    ) -> Result<Option<SpellAnnotation>, SpellFlagError> {
        self.spell_item(owner_id, item_id)?;
        self.read_annotation(owner_id, item_id)
    }

    /// Derive an annotation from the reference data and store it.
    ///
    /// Overwrites any annotation already present; callers check presence.
    pub fn initialize(
        &mut self,
        owner_id: &OwnerId,
        item_id: &ItemId,
    ) -> Result<SpellAnnotation, SpellFlagError> {
        let item = self.spell_item(owner_id, item_id)?;
        let annotation = self.derive_annotation(&item)?;
        self.write_annotation(owner_id, item_id, &annotation)?;

        tracing::debug!(
            owner = %owner_id,
            item = %item_id,
            spell = %item.name,
            "Initialized spell flag"
        );
        Ok(annotation)
    }

    /// Store a user-supplied annotation, bypassing the reference data.
    ///
    /// The result is marked custom, so `update` will leave it alone.
    pub fn initialize_custom<S: AsRef<str>>(
        &mut self,
        owner_id: &OwnerId,
        item_id: &ItemId,
        circle_names: &[S],
    ) -> Result<SpellAnnotation, SpellFlagError> {
        let item = self.spell_item(owner_id, item_id)?;
        if circle_names.is_empty() {
            return Err(SpellFlagError::NoCircles(item.name));
        }

        let circles = self.resolver.resolve_circles(circle_names)?;
        let annotation =
            SpellAnnotation::custom(item.name, item.level, circles, self.current_version)?;
        self.write_annotation(owner_id, item_id, &annotation)?;

        tracing::debug!(
            owner = %owner_id,
            item = %item_id,
            spell = %annotation.name,
            "Set custom spell flag"
        );
        Ok(annotation)
    }

    /// Bring a derived annotation up to date with the reference data.
    ///
    /// Custom annotations are never touched. A derived annotation is
    /// rewritten when the freshly resolved classification differs from it
    /// or when it was produced by another schema version.
    pub fn update(
        &mut self,
        owner_id: &OwnerId,
        item_id: &ItemId,
    ) -> Result<UpdateOutcome, SpellFlagError> {
        let item = self.spell_item(owner_id, item_id)?;
        let value = self
            .annotations
            .get(owner_id, item_id)?
            .ok_or(SpellFlagError::AnnotationMissing)?;

        // Custom annotations are left alone even if their circles no longer
        // resolve against the catalog.
        let record = AnnotationRecord::from_value(value)?;
        if record.custom {
            return Ok(UpdateOutcome::NoChange);
        }
        let existing = SpellAnnotation::from_record(record, self.resolver.catalog())?;

        let fresh = self.derive_annotation(&item)?;
        if fresh == existing && existing.is_current(&self.current_version) {
            return Ok(UpdateOutcome::NoChange);
        }

        self.write_annotation(owner_id, item_id, &fresh)?;
        tracing::debug!(
            owner = %owner_id,
            item = %item_id,
            spell = %item.name,
            from = %existing.schema_version,
            to = %fresh.schema_version,
            "Updated spell flag"
        );
        Ok(UpdateOutcome::Updated(fresh))
    }

    /// Initialize every unannotated spell item of an owner.
    ///
    /// Fails only when the owner does not exist; per-item failures are
    /// logged and collected in the report.
    pub fn bulk_initialize(&mut self, owner_id: &OwnerId) -> Result<BatchReport, SpellFlagError> {
        let items = self.registry.get_owner_items(owner_id)?;
        let mut report = BatchReport::new();

        for item in items.iter().filter(|item| item.is_spell()) {
            match self.annotations.get(owner_id, &item.id) {
                Ok(Some(_)) => report.skipped.push(item.id.clone()),
                Ok(None) => match self.initialize(owner_id, &item.id) {
                    Ok(_) => report.written.push(item.id.clone()),
                    Err(error) => record_failure(&mut report, owner_id, item, error, "initialise"),
                },
                Err(error) => record_failure(&mut report, owner_id, item, error, "initialise"),
            }
        }

        tracing::info!(
            owner = %owner_id,
            visited = report.visited(),
            written = report.written.len(),
            skipped = report.skipped.len(),
            failed = report.failure_count(),
            "Bulk spell flag initialization finished"
        );
        Ok(report)
    }

    /// Update every annotated spell item of an owner.
    ///
    /// Items without an annotation are skipped.
    pub fn bulk_update(&mut self, owner_id: &OwnerId) -> Result<BatchReport, SpellFlagError> {
        let items = self.registry.get_owner_items(owner_id)?;
        let mut report = BatchReport::new();

        for item in items.iter().filter(|item| item.is_spell()) {
            match self.annotations.get(owner_id, &item.id) {
                Ok(None) => report.skipped.push(item.id.clone()),
                Ok(Some(_)) => match self.update(owner_id, &item.id) {
                    Ok(UpdateOutcome::Updated(_)) => report.written.push(item.id.clone()),
                    Ok(UpdateOutcome::NoChange) => report.unchanged.push(item.id.clone()),
                    Err(error) => record_failure(&mut report, owner_id, item, error, "update"),
                },
                Err(error) => record_failure(&mut report, owner_id, item, error, "update"),
            }
        }

        tracing::info!(
            owner = %owner_id,
            visited = report.visited(),
            written = report.written.len(),
            unchanged = report.unchanged.len(),
            skipped = report.skipped.len(),
            failed = report.failure_count(),
            "Bulk spell flag update finished"
        );
        Ok(report)
    }

    /// Run [`bulk_initialize`](Self::bulk_initialize) for every owner.
    pub fn bulk_initialize_all(&mut self) -> BatchReport {
        let mut report = BatchReport::new();
        for owner_id in self.registry.owner_ids() {
            match self.bulk_initialize(&owner_id) {
                Ok(owner_report) => report.merge(owner_report),
                Err(error) => tracing::warn!(owner = %owner_id, %error, "Skipping owner"),
            }
        }
        report
    }

    /// Run [`bulk_update`](Self::bulk_update) for every owner.
    pub fn bulk_update_all(&mut self) -> BatchReport {
        let mut report = BatchReport::new();
        for owner_id in self.registry.owner_ids() {
            match self.bulk_update(&owner_id) {
                Ok(owner_report) => report.merge(owner_report),
                Err(error) => tracing::warn!(owner = %owner_id, %error, "Skipping owner"),
            }
        }
        report
    }

    /// Remove the annotation from one item. Removing an absent annotation is
    /// not an error.
    pub fn unset(&mut self, owner_id: &OwnerId, item_id: &ItemId) -> Result<(), SpellFlagError> {
        self.registry.get_item(owner_id, item_id)?;
        self.annotations.unset(owner_id, item_id)
    }

    /// Remove the annotations from all spell items of an owner.
    ///
    /// Returns the number of spell items visited.
    pub fn unset_all(&mut self, owner_id: &OwnerId) -> Result<usize, SpellFlagError> {
        let items = self.registry.get_owner_items(owner_id)?;
        let mut visited = 0;
        for item in items.iter().filter(|item| item.is_spell()) {
            self.annotations.unset(owner_id, &item.id)?;
            visited += 1;
        }
        tracing::debug!(owner = %owner_id, visited, "Unset all spell flags");
        Ok(visited)
    }

    /// Names of the owner's spell items that carry no annotation, in
    /// collection order.
    pub fn report_unannotated(&self, owner_id: &OwnerId) -> Result<Vec<String>, SpellFlagError> {
        let items = self.registry.get_owner_items(owner_id)?;
        let mut names = Vec::new();
        for item in items.iter().filter(|item| item.is_spell()) {
            if self.annotations.get(owner_id, &item.id)?.is_none() {
                tracing::info!(owner = %owner_id, spell = %item.name, "Spell is not initialised");
                names.push(item.name.clone());
            }
        }
        Ok(names)
    }

    fn spell_item(&self, owner_id: &OwnerId, item_id: &ItemId) -> Result<Item, SpellFlagError> {
        let item = self.registry.get_item(owner_id, item_id)?;
        if !item.is_spell() {
            return Err(SpellFlagError::NotASpell(item_id.clone()));
        }
        Ok(item)
    }

    fn derive_annotation(&self, item: &Item) -> Result<SpellAnnotation, SpellFlagError> {
        let circles = self.resolver.resolve_spell(&self.reference, &item.name)?;
        Ok(SpellAnnotation::derived(
            item.name.clone(),
            item.level,
            circles,
            self.current_version,
        )?)
    }

    fn read_annotation(
        &self,
        owner_id: &OwnerId,
        item_id: &ItemId,
    ) -> Result<Option<SpellAnnotation>, SpellFlagError> {
        self.annotations
            .get(owner_id, item_id)?
            .map(|value| SpellAnnotation::from_value(value, self.resolver.catalog()))
            .transpose()
            .map_err(SpellFlagError::from)
    }

    fn write_annotation(
        &mut self,
        owner_id: &OwnerId,
        item_id: &ItemId,
        annotation: &SpellAnnotation,
    ) -> Result<(), SpellFlagError> {
        let value = annotation.to_value()?;
        self.annotations.set(owner_id, item_id, value)
    }
}

fn record_failure(
    report: &mut BatchReport,
    owner_id: &OwnerId,
    item: &Item,
    error: SpellFlagError,
    action: &str,
) {
    tracing::warn!(
        owner = %owner_id,
        item = %item.id,
        spell = %item.name,
        %error,
        "Could not {action} spell flag"
    );
    report.failures.push(BatchFailure {
        owner: owner_id.clone(),
        item: item.id.clone(),
        spell: item.name.clone(),
        error,
    });
}
