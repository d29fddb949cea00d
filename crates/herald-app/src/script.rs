//! Replay scripts and stdin step parsing.

use std::path::Path;

use herald_common::HeraldError;
use herald_social::{HostSeed, PresenceStep};
use serde::Deserialize;

/// A recorded session: host state plus the presence changes to replay.
#[derive(Debug, Deserialize)]
pub struct ReplayScript {
    #[serde(flatten)]
    pub host: HostSeed,
    #[serde(default)]
    pub steps: Vec<PresenceStep>,
}

pub fn load_script(path: &Path) -> Result<ReplayScript, HeraldError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| HeraldError::Other(format!("invalid script {}: {e}", path.display())))
}

/// Parse one stdin line. Blank lines and `#` comments yield `None`.
pub fn parse_step(line: &str) -> Option<Result<PresenceStep, HeraldError>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(
        serde_json::from_str(line)
            .map_err(|e| HeraldError::Other(format!("invalid presence step {line:?}: {e}"))),
    )
}
