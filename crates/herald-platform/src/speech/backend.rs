use herald_common::{SpeakOptions, Voice};

use super::parse::{parse_espeak_voices, parse_say_voices};

/// Words per minute both tools use at rate 1.0.
const BASE_WPM: f64 = 175.0;

/// External TTS program driven by [`SystemSpeechEngine`](super::SystemSpeechEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    EspeakNg,
    Say,
}

impl Backend {
    /// The backend native to the current platform, if any.
    pub fn detect() -> Option<Self> {
        platform_backend()
    }

    pub fn program(self) -> &'static str {
        match self {
            Backend::EspeakNg => "espeak-ng",
            Backend::Say => "say",
        }
    }

    pub fn list_args(self) -> &'static [&'static str] {
        match self {
            Backend::EspeakNg => &["--voices"],
            Backend::Say => &["-v", "?"],
        }
    }

    pub fn parse_voices(self, output: &str) -> Vec<Voice> {
        match self {
            Backend::EspeakNg => parse_espeak_voices(output),
            Backend::Say => parse_say_voices(output),
        }
    }

    /// Arguments for speaking `text`. The text is always the last argument.
    pub fn speak_args(self, text: &str, options: &SpeakOptions) -> Vec<String> {
        let wpm = (BASE_WPM * options.rate).round().max(1.0) as u32;
        match self {
            // espeak-ng amplitude runs 0-200 with 100 as normal volume.
            Backend::EspeakNg => vec![
                "-v".into(),
                options.voice_name.clone(),
                "-a".into(),
                options.volume_percent.min(100).to_string(),
                "-s".into(),
                wpm.to_string(),
                "--".into(),
                text.to_string(),
            ],
            // `say` has no volume flag; the [[volm]] embedded command sets it.
            Backend::Say => vec![
                "-v".into(),
                options.voice_name.clone(),
                "-r".into(),
                wpm.to_string(),
                "--".into(),
                format!(
                    "[[volm {:.2}]] {text}",
                    f64::from(options.volume_percent.min(100)) / 100.0
                ),
            ],
        }
    }
}

#[cfg(target_os = "linux")]
fn platform_backend() -> Option<Backend> {
    Some(Backend::EspeakNg)
}

#[cfg(target_os = "macos")]
fn platform_backend() -> Option<Backend> {
    Some(Backend::Say)
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn platform_backend() -> Option<Backend> {
    None
}
