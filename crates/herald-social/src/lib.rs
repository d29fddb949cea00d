//! Voice-channel presence diffing and spoken announcements.
//!
//! Presence updates arrive one at a time from the host. The
//! [`TransitionClassifier`] compares each against a [`StateSnapshot`] of the
//! channel the local user is in and yields at most one
//! [`NotificationEvent`]; the [`Announcer`] renders it from the configured
//! template and hands it to a speech engine. [`VoiceEvents`] wires the two to
//! an event bus.

pub mod announcer;
pub mod classifier;
pub mod host;
pub mod memory;
pub mod render;
pub mod snapshot;
pub mod voice_events;

pub use announcer::{Announcement, Announcer};
pub use classifier::{NotificationEvent, NotificationKind, TransitionClassifier};
pub use host::{ChannelRecord, ChannelSource, Host, IdentitySource, MembershipSource, UserRecord};
pub use memory::{HostSeed, InMemoryHost, PresenceStep};
pub use render::{filter_name, preview_message, render_template, Placeholders};
pub use snapshot::{StateSnapshot, VoiceMembership};
pub use voice_events::VoiceEvents;
