//! Logging bootstrap. Runs in its own binary so the global subscriber it
//! installs does not leak into other tests.

use spell_flags::logging::init_logging;
use spell_flags::ModuleConfig;

#[test]
fn test_init_is_idempotent() {
    let config = ModuleConfig {
        debug: true,
        ..ModuleConfig::default()
    };
    assert!(init_logging(&config).is_ok());
    assert!(init_logging(&config).is_ok());
}
