use std::sync::{Arc, Mutex};

use herald_common::{
    ChannelId, Event, EventBus, PresenceUpdate, SpeakOptions, SpeechEngine, SpeechError, UserId,
    Voice,
};
use herald_config::{HeraldConfig, MessageKey};

use super::VoiceEvents;
use crate::announcer::Announcement;
use crate::host::{ChannelRecord, UserRecord};
use crate::memory::InMemoryHost;

struct RecordingEngine {
    voices: Vec<Voice>,
    spoken: Mutex<Vec<String>>,
}

impl RecordingEngine {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            voices: vec![Voice::new("Alex", "en-US")],
            spoken: Mutex::new(Vec::new()),
        })
    }

    fn silent() -> Arc<Self> {
        Arc::new(Self {
            voices: Vec::new(),
            spoken: Mutex::new(Vec::new()),
        })
    }

    fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechEngine for RecordingEngine {
    fn list_voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&self, text: &str, _options: &SpeakOptions) -> Result<(), SpeechError> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

struct Fixture {
    host: Arc<InMemoryHost>,
    bus: Arc<EventBus>,
    engine: Arc<RecordingEngine>,
    service: VoiceEvents,
}

impl Fixture {
    fn new(config: HeraldConfig) -> Self {
        Self::with_engine(config, RecordingEngine::new())
    }

    fn with_engine(config: HeraldConfig, engine: Arc<RecordingEngine>) -> Self {
        let host = Arc::new(InMemoryHost::new("1"));
        host.add_user("1", UserRecord { username: "me".into(), bot: false });
        host.add_user("2", UserRecord { username: "bob".into(), bot: false });
        host.add_user("9", UserRecord { username: "Beep".into(), bot: true });
        host.add_channel("A", ChannelRecord::guild("Lobby", "g1"));
        host.add_channel("B", ChannelRecord::guild("Games", "g1"));

        let bus = Arc::new(EventBus::new());
        let service = VoiceEvents::new(host.clone(), bus.clone(), engine.clone(), config);
        Self {
            host,
            bus,
            engine,
            service,
        }
    }

    /// Update the host and dispatch the change the way a client would.
    fn step(&self, user: &str, channel: Option<&str>) {
        let update = self.host.set_voice_channel(user, channel.map(ChannelId::from));
        self.bus.publish(Event::VoiceStateUpdate(update));
    }

    fn subscribers(&self) -> usize {
        subscribers(&self.bus)
    }
}

/// Handlers reached by an update that announces nothing.
fn subscribers(bus: &EventBus) -> usize {
    bus.publish(Event::VoiceStateUpdate(PresenceUpdate::new("5", None)))
}

#[test]
fn local_user_join_move_leave_is_spoken() {
    let fx = Fixture::new(HeraldConfig::default());
    fx.service.start();

    fx.step("1", Some("A"));
    fx.step("1", Some("B"));
    fx.step("1", Some("B"));
    fx.step("1", None);

    assert_eq!(
        fx.engine.spoken(),
        vec!["You joined Lobby", "You were moved to Games", "You left Games"]
    );
}

#[test]
fn peers_are_announced_only_in_observed_channel() {
    let fx = Fixture::new(HeraldConfig::default());
    fx.host.set_voice_channel("1", Some(ChannelId::from("A")));
    fx.service.start();

    fx.step("2", Some("A"));
    fx.step("2", None);
    fx.step("2", Some("B"));

    assert_eq!(fx.engine.spoken(), vec!["bob joined Lobby", "bob left Lobby"]);
}

#[test]
fn peers_ignored_when_not_in_voice() {
    let fx = Fixture::new(HeraldConfig::default());
    fx.service.start();

    fx.step("2", Some("A"));
    fx.step("2", None);

    assert!(fx.engine.spoken().is_empty());
}

#[test]
fn bots_suppressed_across_kinds() {
    let mut config = HeraldConfig::default();
    config.filters.bots = true;
    let fx = Fixture::new(config);
    fx.host.set_voice_channel("1", Some(ChannelId::from("A")));
    fx.service.start();

    fx.step("9", Some("A"));
    fx.step("9", None);

    assert!(fx.engine.spoken().is_empty());
    // Suppressed notifications still refresh the snapshot.
    assert!(!fx.service.snapshot().contains(&UserId::from("9")));
}

#[test]
fn lookup_failure_does_not_break_subscription() {
    let fx = Fixture::new(HeraldConfig::default());
    fx.host.set_voice_channel("1", Some(ChannelId::from("A")));
    fx.service.start();

    // User 42 has no identity record.
    fx.step("42", Some("A"));
    fx.step("2", Some("A"));

    assert_eq!(fx.engine.spoken(), vec!["bob joined Lobby"]);
    assert!(fx.service.is_running());
}

#[test]
fn stop_unsubscribes_and_clears_snapshot() {
    let fx = Fixture::new(HeraldConfig::default());
    fx.host.set_voice_channel("1", Some(ChannelId::from("A")));
    fx.service.start();
    assert_eq!(fx.subscribers(), 1);
    assert!(!fx.service.snapshot().is_empty());

    fx.service.stop();
    assert!(!fx.service.is_running());
    assert_eq!(fx.subscribers(), 0);
    assert!(fx.service.snapshot().is_empty());

    fx.step("2", Some("A"));
    assert!(fx.engine.spoken().is_empty());
    let direct = fx
        .service
        .handle_update(&fx.host.set_voice_channel("2", None));
    assert!(direct.is_none());
}

#[test]
fn start_twice_subscribes_once() {
    let fx = Fixture::new(HeraldConfig::default());
    fx.service.start();
    fx.service.start();
    assert_eq!(fx.subscribers(), 1);
}

#[test]
fn dropping_service_unsubscribes() {
    let fx = Fixture::new(HeraldConfig::default());
    fx.service.start();
    let bus = fx.bus.clone();
    drop(fx);
    assert_eq!(subscribers(&bus), 0);
}

#[test]
fn updated_settings_apply_to_next_event() {
    let fx = Fixture::new(HeraldConfig::default());
    fx.service.start();
    fx.step("1", Some("A"));

    let mut config = HeraldConfig::default();
    config.messages.move_self = "Now in $channel".into();
    fx.service.update_settings(config);
    fx.step("1", Some("B"));

    assert_eq!(fx.engine.spoken(), vec!["You joined Lobby", "Now in Games"]);
    assert_eq!(fx.service.settings().messages.move_self, "Now in $channel");
}

#[test]
fn no_voices_reported_at_start() {
    let fx = Fixture::with_engine(HeraldConfig::default(), RecordingEngine::silent());
    fx.service.start();
    fx.step("1", Some("A"));

    let diagnostics = fx.service.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|n| n.body.contains("no speech synthesis voices")));
    assert!(fx.service.diagnostics().is_empty());
}

#[test]
fn preview_speaks_placeholder_names() {
    let fx = Fixture::new(HeraldConfig::default());
    let result = fx.service.preview(MessageKey::Leave);
    assert_eq!(result, Announcement::Spoken("user left channel".into()));
    assert_eq!(fx.engine.spoken(), vec!["user left channel"]);
}
