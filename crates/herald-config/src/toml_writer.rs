//! Persist the settings record as TOML.
//!
//! Contents are written to a `.tmp` sibling and renamed over the target so
//! readers, including the reload watcher, never see a half-written file.

use std::path::Path;

use herald_common::ConfigError;
use tracing::{debug, warn};

use crate::schema::HeraldConfig;
use crate::toml_loader::default_config_path;

/// Save to the default settings path.
pub fn save_config(config: &HeraldConfig) -> Result<(), ConfigError> {
    save_config_to_path(config, &default_config_path()?)
}

pub fn save_config_to_path(config: &HeraldConfig, path: &Path) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::WriteError(format!("failed to serialize settings: {e}")))?;
    write_atomically(path, &contents)?;
    debug!(path = %path.display(), "settings saved");
    Ok(())
}

pub(crate) fn write_atomically(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let io_err = |what: &str, at: &Path, e: std::io::Error| {
        ConfigError::WriteError(format!("failed to {what} {}: {e}", at.display()))
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err("create", parent, e))?;
    }

    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents).map_err(|e| io_err("write", &tmp, e))?;

    match std::fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(e) => {
            // Cross-device targets can't be renamed onto.
            warn!(error = %e, "rename into place failed, writing settings directly");
            let direct = std::fs::write(path, contents).map_err(|e| io_err("write", path, e));
            let _ = std::fs::remove_file(&tmp);
            direct
        }
    }
}
