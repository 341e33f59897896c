//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator runs them all and
//! collects every problem into a single `ConfigError`.

mod appearance;
mod content;
mod helpers;
mod window;


use webshim_common::ConfigError;

use crate::schema::ShimConfig;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ShimConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    window::validate_window(&mut errors, config);
    content::validate_content(&mut errors, config);
    appearance::validate_appearance(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
