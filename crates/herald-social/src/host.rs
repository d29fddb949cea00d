//! Narrow contracts for the host application's state.
//!
//! The announcer never owns voice, user, or channel state; it reads it
//! through these traits. All reads are synchronous lookups against the
//! host's in-memory stores.

use std::collections::HashMap;

use herald_common::{ChannelId, GuildId, UserId};
use serde::{Deserialize, Serialize};

use crate::snapshot::VoiceMembership;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub name: String,
    #[serde(default)]
    pub is_direct: bool,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
}

impl ChannelRecord {
    pub fn guild(name: impl Into<String>, guild_id: impl Into<GuildId>) -> Self {
        Self {
            name: name.into(),
            is_direct: false,
            is_group: false,
            guild_id: Some(guild_id.into()),
        }
    }

    pub fn direct(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_direct: true,
            is_group: false,
            guild_id: None,
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_direct: false,
            is_group: true,
            guild_id: None,
        }
    }

    /// Direct and group calls have no guild and no nicknames.
    pub fn is_private(&self) -> bool {
        self.is_direct || self.is_group
    }
}

/// Authoritative voice membership.
pub trait MembershipSource: Send + Sync {
    /// Everyone currently connected to `channel_id`.
    fn members_of(&self, channel_id: &ChannelId) -> HashMap<UserId, VoiceMembership>;

    /// The voice channel the local user currently occupies.
    fn current_channel_for_local_user(&self) -> Option<ChannelId>;
}

pub trait IdentitySource: Send + Sync {
    fn local_user_id(&self) -> UserId;

    fn user(&self, user_id: &UserId) -> Option<UserRecord>;

    /// Guild nickname, if one is set.
    fn display_name(&self, guild_id: &GuildId, user_id: &UserId) -> Option<String>;
}

pub trait ChannelSource: Send + Sync {
    fn channel(&self, channel_id: &ChannelId) -> Option<ChannelRecord>;
}

/// Everything the announcer needs from the host, as one object.
pub trait Host: MembershipSource + IdentitySource + ChannelSource {}

impl<T: MembershipSource + IdentitySource + ChannelSource> Host for T {}
