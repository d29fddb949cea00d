//! Herald configuration system.
//!
//! Provides the TOML-backed Settings record read by the announcer: speech
//! voice/volume/rate, bot and name filters, and the six message templates.
//! All sections use defaults so partial configs work out of the box, and
//! edits on disk can be picked up live through [`ReloadManager`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use herald_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{HeraldConfig, MessageKey};
pub use toml_writer::{save_config, save_config_to_path};
pub use watcher::ConfigWatcher;

use herald_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating it if missing.
pub fn load_config() -> Result<HeraldConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path override.
pub fn load_config_from(path: &Path) -> Result<HeraldConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &HeraldConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
