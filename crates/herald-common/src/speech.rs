//! Contract between the announcer and whatever synthesizes audio.

use serde::{Deserialize, Serialize};

use crate::errors::SpeechError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 style tag, e.g. `en-US`.
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeakOptions {
    pub voice_name: String,
    /// 0-100.
    pub volume_percent: u32,
    /// Playback rate multiplier, 0.1-10.0.
    pub rate: f64,
}

/// A text-to-speech backend.
///
/// `speak` is fire-and-forget: it queues the utterance and returns without
/// waiting for playback. Overlapping utterances play in whatever order the
/// engine queues them.
pub trait SpeechEngine: Send + Sync {
    fn list_voices(&self) -> Vec<Voice>;

    fn speak(&self, text: &str, options: &SpeakOptions) -> Result<(), SpeechError>;
}

/// First `en-US` voice, otherwise the first voice listed.
pub fn default_voice(voices: &[Voice]) -> Option<&Voice> {
    voices
        .iter()
        .find(|v| v.lang == "en-US")
        .or_else(|| voices.first())
}
