//! Where the settings file lives, and seeding it on first run.

use std::path::{Path, PathBuf};

use herald_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "herald";
const FILE_NAME: &str = "config.toml";

/// `<config dir>/herald/config.toml`, e.g. `~/.config/herald/config.toml`
/// on Linux or `~/Library/Application Support/herald/config.toml` on macOS.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Write the commented default settings file to `path`.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    crate::toml_writer::write_atomically(path, default_config_toml())?;
    info!(path = %path.display(), "created default config");
    Ok(())
}
