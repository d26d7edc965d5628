//! Activation - builds the runtime spell handed to the caster when a spell
//! item is used.

use mana_rules::{ItemId, OwnerId, RuntimeSpell, SpellAnnotation};

use crate::manager::SpellAnnotationManager;
use crate::ports::{AnnotationStore, ItemRegistry, ReferenceDataStore, SpellCaster};
use crate::SpellFlagError;

/// Build the runtime spell for a cast.
///
/// Fails with `AnnotationMissing` when there is no annotation.
pub fn build_runtime_spell(
    annotation: Option<&SpellAnnotation>,
    cast_level: u32,
    is_reaction: bool,
) -> Result<RuntimeSpell, SpellFlagError> {
    let annotation = annotation.ok_or(SpellFlagError::AnnotationMissing)?;
    Ok(RuntimeSpell {
        base_level: annotation.base_level,
        cast_level,
        circles: annotation.circles.clone(),
        is_reaction,
    })
}

/// Handle an item being used.
///
/// Leveled spells are translated and passed to the caster, which receives the
/// item's current level as the cast level. Cantrips and non-spell items are
/// ignored and yield `Ok(None)`.
pub fn on_item_used<R, A, D, C>(
    manager: &SpellAnnotationManager<R, A, D>,
    caster: &mut C,
    owner_id: &OwnerId,
    item_id: &ItemId,
) -> Result<Option<RuntimeSpell>, SpellFlagError>
where
    R: ItemRegistry,
    A: AnnotationStore,
    D: ReferenceDataStore,
    C: SpellCaster + ?Sized,
{
    let item = manager.registry().get_item(owner_id, item_id)?;
    if !item.is_leveled_spell() {
        return Ok(None);
    }

    let annotation = manager.get_annotation(owner_id, item_id)?;
    let spell = build_runtime_spell(annotation.as_ref(), item.level, item.is_reaction())?;

    tracing::debug!(
        owner = %owner_id,
        spell = %item.name,
        base_level = spell.base_level,
        cast_level = spell.cast_level,
        upcast = spell.upcast_levels(),
        reaction = spell.is_reaction,
        "Casting spell"
    );
    caster.cast_spell(owner_id, &spell)?;
    Ok(Some(spell))
}
