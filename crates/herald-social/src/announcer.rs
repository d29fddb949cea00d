//! Turns classified notifications into speech.

use std::sync::Arc;

use herald_common::{
    default_voice, HeraldError, Notification, NotificationQueue, SpeakOptions, SpeechEngine,
    SpeechError,
};
use herald_config::schema::SpeechConfig;
use herald_config::{HeraldConfig, MessageKey};
use tracing::{debug, info, warn};

use crate::classifier::NotificationEvent;
use crate::host::Host;
use crate::render::{preview_message, render_template, Placeholders};

const DIAGNOSTIC_TITLE: &str = "Voice announcements";

/// What happened to a notification once it reached the announcer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    /// Handed to the speech engine.
    Spoken(String),
    /// Rendered but not spoken; a diagnostic has been queued.
    Dropped(String),
    /// Filtered out by settings, or the template is blank.
    Suppressed,
}

pub struct Announcer {
    engine: Arc<dyn SpeechEngine>,
    diagnostics: NotificationQueue,
}

impl Announcer {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            diagnostics: NotificationQueue::default(),
        }
    }

    /// Start-up probe. Returns `false` (and queues a diagnostic) when the
    /// engine has no voices at all.
    pub fn check_voices(&mut self) -> bool {
        let voices = self.engine.list_voices();
        if voices.is_empty() {
            self.report(&SpeechError::NoVoicesAvailable);
            return false;
        }
        debug!(count = voices.len(), "speech voices available");
        true
    }

    /// Render and speak `event`. Host lookup failures are returned as
    /// errors; speech failures are reported as diagnostics and yield
    /// [`Announcement::Dropped`].
    pub fn announce(
        &mut self,
        event: &NotificationEvent,
        config: &HeraldConfig,
        host: &(impl Host + ?Sized),
    ) -> Result<Announcement, HeraldError> {
        let channel = host
            .channel(&event.channel_id)
            .ok_or_else(|| HeraldError::UnknownChannel(event.channel_id.clone()))?;
        let user = host
            .user(&event.user_id)
            .ok_or_else(|| HeraldError::UnknownUser(event.user_id.clone()))?;

        if config.filters.bots && user.bot {
            debug!(user_id = %event.user_id, kind = %event.kind, "bot notification suppressed");
            return Ok(Announcement::Suppressed);
        }

        let values = Placeholders::resolve(
            host,
            &event.user_id,
            &user,
            &channel,
            &config.messages.private_call,
        );
        let template = config.messages.get(event.kind.message_key());
        let text = render_template(template, &values, config.filters.names);

        Ok(self.say(text, &config.speech))
    }

    /// Speak a configured message with placeholder names read literally.
    pub fn preview(&mut self, key: MessageKey, config: &HeraldConfig) -> Announcement {
        let text = preview_message(config.messages.get(key));
        self.say(text, &config.speech)
    }

    pub fn diagnostics(&mut self) -> &mut NotificationQueue {
        &mut self.diagnostics
    }

    fn say(&mut self, text: String, speech: &SpeechConfig) -> Announcement {
        if text.trim().is_empty() {
            debug!("blank message, nothing to speak");
            return Announcement::Suppressed;
        }
        match self.speak(&text, speech) {
            Ok(()) => {
                info!(text = %text, "announced");
                Announcement::Spoken(text)
            }
            Err(e) => {
                self.report(&e);
                Announcement::Dropped(text)
            }
        }
    }

    fn speak(&self, text: &str, speech: &SpeechConfig) -> Result<(), SpeechError> {
        let voices = self.engine.list_voices();
        if voices.is_empty() {
            return Err(SpeechError::NoVoicesAvailable);
        }

        let voice = match &speech.voice {
            Some(name) => voices
                .iter()
                .find(|v| &v.name == name)
                .ok_or_else(|| SpeechError::MissingVoice(name.clone()))?,
            None => default_voice(&voices).ok_or(SpeechError::NoVoicesAvailable)?,
        };

        self.engine.speak(text, &speak_options(&voice.name, speech))
    }

    fn report(&mut self, error: &SpeechError) {
        warn!(error = %error, "speech unavailable, message dropped");
        let notification = match error {
            SpeechError::MissingVoice(_) => Notification::warning(DIAGNOSTIC_TITLE, error.to_string()),
            _ => Notification::error(DIAGNOSTIC_TITLE, error.to_string()),
        };
        self.diagnostics.push(notification);
    }
}

/// Out-of-range settings are clamped here; the config layer refuses them
/// on load.
fn speak_options(voice_name: &str, speech: &SpeechConfig) -> SpeakOptions {
    let rate = if speech.rate.is_finite() {
        speech.rate.clamp(0.1, 10.0)
    } else {
        1.0
    };
    SpeakOptions {
        voice_name: voice_name.to_string(),
        volume_percent: speech.volume.min(100),
        rate,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use herald_common::{ChannelId, UserId, Voice};

    use super::*;
    use crate::classifier::NotificationKind;
    use crate::host::{ChannelRecord, UserRecord};
    use crate::memory::InMemoryHost;

    #[derive(Default)]
    struct Recorder {
        voices: Vec<Voice>,
        spoken: Mutex<Vec<(String, SpeakOptions)>>,
    }

    impl Recorder {
        fn with_voices(voices: Vec<Voice>) -> Arc<Self> {
            Arc::new(Self {
                voices,
                spoken: Mutex::new(Vec::new()),
            })
        }

        fn spoken(&self) -> Vec<(String, SpeakOptions)> {
            self.spoken.lock().unwrap().clone()
        }
    }

    impl SpeechEngine for Recorder {
        fn list_voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn speak(&self, text: &str, options: &SpeakOptions) -> Result<(), SpeechError> {
            self.spoken.lock().unwrap().push((text.to_string(), options.clone()));
            Ok(())
        }
    }

    fn english() -> Vec<Voice> {
        vec![Voice::new("Anna", "de-DE"), Voice::new("Alex", "en-US")]
    }

    fn host() -> InMemoryHost {
        let host = InMemoryHost::new("1");
        host.add_user("1", UserRecord { username: "me".into(), bot: false });
        host.add_user("2", UserRecord { username: "al_ice".into(), bot: false });
        host.add_user("9", UserRecord { username: "beep".into(), bot: true });
        host.add_channel("A", ChannelRecord::guild("Lobby #1", "g1"));
        host.add_channel("D", ChannelRecord::direct("dm"));
        host.set_nickname("g1", "2", "Al-ice");
        host
    }

    fn event(kind: NotificationKind, user: &str, channel: &str) -> NotificationEvent {
        NotificationEvent {
            kind,
            user_id: UserId::from(user),
            channel_id: ChannelId::from(channel),
        }
    }

    #[test]
    fn speaks_with_nickname_and_default_voice() {
        let engine = Recorder::with_voices(english());
        let mut announcer = Announcer::new(engine.clone());

        let result = announcer
            .announce(&event(NotificationKind::Join, "2", "A"), &HeraldConfig::default(), &host())
            .unwrap();

        assert_eq!(result, Announcement::Spoken("Al ice joined Lobby  1".into()));
        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].1.voice_name, "Alex");
        assert_eq!(spoken[0].1.volume_percent, 100);
    }

    #[test]
    fn private_calls_use_label_and_username() {
        let engine = Recorder::with_voices(english());
        let mut announcer = Announcer::new(engine);
        let mut config = HeraldConfig::default();
        config.filters.names = false;
        config.messages.join = "$user joined $channel".into();

        let result = announcer
            .announce(&event(NotificationKind::Join, "2", "D"), &config, &host())
            .unwrap();
        assert_eq!(result, Announcement::Spoken("al_ice joined The call".into()));
    }

    #[test]
    fn bot_filter_suppresses_every_kind() {
        let engine = Recorder::with_voices(english());
        let mut announcer = Announcer::new(engine.clone());
        let mut config = HeraldConfig::default();
        config.filters.bots = true;

        for kind in [NotificationKind::Join, NotificationKind::Leave, NotificationKind::JoinSelf] {
            let result = announcer.announce(&event(kind, "9", "A"), &config, &host()).unwrap();
            assert_eq!(result, Announcement::Suppressed);
        }
        assert!(engine.spoken().is_empty());
    }

    #[test]
    fn bots_announced_when_filter_off() {
        let engine = Recorder::with_voices(english());
        let mut announcer = Announcer::new(engine.clone());

        let result = announcer
            .announce(&event(NotificationKind::Leave, "9", "A"), &HeraldConfig::default(), &host())
            .unwrap();
        assert_eq!(result, Announcement::Spoken("beep left Lobby  1".into()));
    }

    #[test]
    fn missing_voice_drops_message_with_diagnostic() {
        let engine = Recorder::with_voices(english());
        let mut announcer = Announcer::new(engine.clone());
        let mut config = HeraldConfig::default();
        config.speech.voice = Some("Nobody".into());

        let result = announcer
            .announce(&event(NotificationKind::JoinSelf, "1", "A"), &config, &host())
            .unwrap();

        assert!(matches!(result, Announcement::Dropped(_)));
        assert!(engine.spoken().is_empty());
        let diagnostics = announcer.diagnostics().drain();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].body.contains("Nobody"));
    }

    #[test]
    fn no_voices_reported_at_start_and_per_message() {
        let engine = Recorder::with_voices(Vec::new());
        let mut announcer = Announcer::new(engine);

        assert!(!announcer.check_voices());
        let result = announcer
            .announce(&event(NotificationKind::JoinSelf, "1", "A"), &HeraldConfig::default(), &host())
            .unwrap();

        assert!(matches!(result, Announcement::Dropped(_)));
        assert_eq!(announcer.diagnostics().len(), 2);
    }

    #[test]
    fn unknown_records_are_errors() {
        let engine = Recorder::with_voices(english());
        let mut announcer = Announcer::new(engine);
        let config = HeraldConfig::default();

        let err = announcer
            .announce(&event(NotificationKind::Join, "404", "A"), &config, &host())
            .unwrap_err();
        assert!(matches!(err, HeraldError::UnknownUser(_)));

        let err = announcer
            .announce(&event(NotificationKind::Join, "2", "Z"), &config, &host())
            .unwrap_err();
        assert!(matches!(err, HeraldError::UnknownChannel(_)));
    }

    #[test]
    fn missing_channel_is_an_error_even_for_filtered_bots() {
        let engine = Recorder::with_voices(english());
        let mut announcer = Announcer::new(engine);
        let mut config = HeraldConfig::default();
        config.filters.bots = true;

        let err = announcer
            .announce(&event(NotificationKind::Join, "9", "Z"), &config, &host())
            .unwrap_err();
        assert!(matches!(err, HeraldError::UnknownChannel(_)));
    }

    #[test]
    fn blank_template_is_silent() {
        let engine = Recorder::with_voices(english());
        let mut announcer = Announcer::new(engine.clone());
        let mut config = HeraldConfig::default();
        config.messages.leave = String::new();

        let result = announcer
            .announce(&event(NotificationKind::Leave, "2", "A"), &config, &host())
            .unwrap();
        assert_eq!(result, Announcement::Suppressed);
        assert_eq!(announcer.preview(MessageKey::Leave, &config), Announcement::Suppressed);
        assert!(engine.spoken().is_empty());
        assert!(announcer.diagnostics().is_empty());
    }

    #[test]
    fn preview_reads_placeholder_names() {
        let engine = Recorder::with_voices(english());
        let mut announcer = Announcer::new(engine.clone());

        let result = announcer.preview(MessageKey::Join, &HeraldConfig::default());
        assert_eq!(result, Announcement::Spoken("user joined channel".into()));
    }

    #[test]
    fn speak_options_clamp_out_of_range_values() {
        let speech = SpeechConfig {
            voice: None,
            volume: 250,
            rate: 40.0,
        };
        let options = speak_options("Alex", &speech);
        assert_eq!(options.volume_percent, 100);
        assert_eq!(options.rate, 10.0);
    }
}
