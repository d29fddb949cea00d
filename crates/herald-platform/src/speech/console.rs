use herald_common::{SpeakOptions, SpeechEngine, SpeechError, Voice};
use tracing::info;

/// Prints what would be spoken. Used by `--dry-run`.
pub struct ConsoleSpeechEngine {
    voices: Vec<Voice>,
}

impl ConsoleSpeechEngine {
    pub fn new() -> Self {
        Self::with_voices(Vec::new())
    }

    /// Pretend to offer `voices`, so configured voice names resolve the same
    /// way they would against the real engine. An empty list falls back to
    /// a single `console` voice.
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        let voices = if voices.is_empty() {
            vec![Voice::new("console", "en-US")]
        } else {
            voices
        };
        Self { voices }
    }
}

impl Default for ConsoleSpeechEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechEngine for ConsoleSpeechEngine {
    fn list_voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&self, text: &str, options: &SpeakOptions) -> Result<(), SpeechError> {
        info!(
            voice = %options.voice_name,
            volume = options.volume_percent,
            rate = options.rate,
            "dry-run utterance"
        );
        println!("[{}] {text}", options.voice_name);
        Ok(())
    }
}
