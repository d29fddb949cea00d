//! Spoken message templates.
//!
//! Templates may contain `$user` (nickname, falling back to the account
//! name), `$username` (account name) and `$channel` (channel name, or the
//! `private_call` label for direct and group calls).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Another user joined the channel you are in.
    pub join: String,
    /// Another user left the channel you are in.
    pub leave: String,
    pub join_self: String,
    /// You were moved (or moved yourself) to a different channel.
    pub move_self: String,
    pub leave_self: String,
    /// Stands in for `$channel` in direct and group calls.
    pub private_call: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            join: "$user joined $channel".into(),
            leave: "$user left $channel".into(),
            join_self: "You joined $channel".into(),
            move_self: "You were moved to $channel".into(),
            leave_self: "You left $channel".into(),
            private_call: "The call".into(),
        }
    }
}

impl MessagesConfig {
    pub fn get(&self, key: MessageKey) -> &str {
        match key {
            MessageKey::Join => &self.join,
            MessageKey::Leave => &self.leave,
            MessageKey::JoinSelf => &self.join_self,
            MessageKey::MoveSelf => &self.move_self,
            MessageKey::LeaveSelf => &self.leave_self,
            MessageKey::PrivateCall => &self.private_call,
        }
    }
}

/// Names one of the configurable messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Join,
    Leave,
    JoinSelf,
    MoveSelf,
    LeaveSelf,
    PrivateCall,
}

impl MessageKey {
    pub const ALL: [MessageKey; 6] = [
        MessageKey::Join,
        MessageKey::Leave,
        MessageKey::JoinSelf,
        MessageKey::MoveSelf,
        MessageKey::LeaveSelf,
        MessageKey::PrivateCall,
    ];

    /// The TOML field name under `[messages]`.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::Join => "join",
            MessageKey::Leave => "leave",
            MessageKey::JoinSelf => "join_self",
            MessageKey::MoveSelf => "move_self",
            MessageKey::LeaveSelf => "leave_self",
            MessageKey::PrivateCall => "private_call",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown message \"{0}\" (expected one of join, leave, join_self, move_self, leave_self, private_call)")]
pub struct UnknownMessageKey(pub String);

impl FromStr for MessageKey {
    type Err = UnknownMessageKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        MessageKey::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| UnknownMessageKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_matching_template() {
        let messages = MessagesConfig::default();
        assert_eq!(messages.get(MessageKey::MoveSelf), "You were moved to $channel");
        assert_eq!(messages.get(MessageKey::PrivateCall), "The call");
    }

    #[test]
    fn key_parses_field_names() {
        for key in MessageKey::ALL {
            assert_eq!(key.as_str().parse::<MessageKey>().unwrap(), key);
        }
    }

    #[test]
    fn key_parse_accepts_dashes_and_case() {
        assert_eq!("Join-Self".parse::<MessageKey>().unwrap(), MessageKey::JoinSelf);
    }

    #[test]
    fn key_parse_rejects_unknown() {
        let err = "shout".parse::<MessageKey>().unwrap_err();
        assert!(err.to_string().contains("shout"));
    }
}
