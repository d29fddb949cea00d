//! Text-to-speech output settings.

use serde::{Deserialize, Serialize};

/// Text-to-speech output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Voice name as reported by the speech engine. `None` picks a default
    /// voice at start-up.
    pub voice: Option<String>,
    /// Output volume in percent (valid range: 0-100).
    pub volume: u32,
    /// Speaking rate multiplier (valid range: 0.1-10.0).
    pub rate: f64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice: None,
            volume: 100,
            rate: 1.0,
        }
    }
}
