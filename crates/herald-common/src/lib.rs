pub mod errors;
pub mod events;
pub mod id;
pub mod notifications;
pub mod speech;

pub use errors::{ConfigError, HeraldError, SpeechError};
pub use events::{Event, EventBus, EventKind, Handler, PresenceUpdate, SubscriptionId};
pub use id::{new_correlation_id, ChannelId, GuildId, UserId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use speech::{default_voice, SpeakOptions, SpeechEngine, Voice};
