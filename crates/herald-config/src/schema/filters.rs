use serde::{Deserialize, Serialize};

/// Announcement filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Stay silent for transitions of bot accounts.
    pub bots: bool,
    /// Reduce substituted names to ASCII letters and digits.
    pub names: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            bots: false,
            names: true,
        }
    }
}
