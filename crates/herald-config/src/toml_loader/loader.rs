//! Reading the settings file.

use std::path::Path;

use herald_common::ConfigError;
use tracing::{info, warn};

use crate::schema::HeraldConfig;
use crate::validation;

use super::paths::{create_default_config, default_config_path};

/// Parse the settings file at `path`. Missing fields take their defaults.
///
/// This is the lenient path: values that fail validation are logged and
/// kept, and the speech layer clamps them when it builds options. Callers
/// that must reject bad values validate afterwards.
pub fn load_from_path(path: &Path) -> Result<HeraldConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    let config: HeraldConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "settings out of range, keeping them: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load the settings file from its default location, seeding it with the
/// commented defaults on first run.
pub fn load_default() -> Result<HeraldConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(&path)?;
            Ok(HeraldConfig::default())
        }
        other => other,
    }
}
