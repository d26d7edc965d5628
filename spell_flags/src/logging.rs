//! Logging bootstrap.
//!
//! The library only emits `tracing` events. Hosts that want them printed call
//! [`init_logging`] once at startup.

use tracing_subscriber::EnvFilter;

use crate::{ModuleConfig, SpellFlagError};

/// Build the default filter directive for the module.
///
/// Targets are crate paths, so the module id is mapped onto the crate names.
pub fn default_directive(config: &ModuleConfig) -> String {
    let level = if config.debug { "debug" } else { "info" };
    format!("spell_flags={level},mana_rules={level}")
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this again
/// after a subscriber is installed is a no-op.
pub fn init_logging(config: &ModuleConfig) -> Result<(), SpellFlagError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(config)))
        .map_err(|e| SpellFlagError::Config(e.to_string()))?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(module = %config.module_id, "Logging initialized");
    }
    Ok(())
}
