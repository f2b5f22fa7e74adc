//! Test utilities for Reelscript pipeline tests.
//!
//! This module provides mock providers and test helpers.

use reelscript_core::GeneratorConfig;

pub mod mock_driver;
pub mod mock_lookup;

#[allow(unused_imports)]
pub use mock_driver::{MockBehavior, MockChatDriver, MockResponse};
#[allow(unused_imports)]
pub use mock_lookup::MockLookup;

/// Bundled defaults with a fixed credential, never reading the environment.
#[allow(dead_code)]
pub fn config_with_key() -> GeneratorConfig {
    GeneratorConfig::default().with_api_key("sk-test")
}
