use crate::schema::HeraldConfig;

use super::check_range;

/// Validate speech output constraints.
pub(crate) fn validate_speech(errors: &mut Vec<String>, config: &HeraldConfig) {
    check_range(errors, "speech.volume", config.speech.volume, 0..=100);
    check_range(errors, "speech.rate", config.speech.rate, 0.1..=10.0);

    if let Some(voice) = &config.speech.voice {
        if voice.trim().is_empty() {
            errors.push("speech.voice must not be blank (omit it to auto-select)".into());
        }
    }
}
