//! In-process host state: users, nicknames, channels and who sits where.
//!
//! Backs the replay and listen modes of the binary and the scenario tests.
//! Mutations update state first and then hand back the presence update a
//! real client would dispatch, so listeners always see the post-change
//! membership.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use herald_common::{ChannelId, GuildId, PresenceUpdate, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::host::{ChannelRecord, ChannelSource, IdentitySource, MembershipSource, UserRecord};
use crate::snapshot::VoiceMembership;

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub id: UserId,
    #[serde(flatten)]
    pub record: UserRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedChannel {
    pub id: ChannelId,
    #[serde(flatten)]
    pub record: ChannelRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedNickname {
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub nickname: String,
}

/// One user's voice channel, as written in seed and step files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceStep {
    pub user: UserId,
    #[serde(default)]
    pub channel: Option<ChannelId>,
}

/// Serializable description of a host's starting state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSeed {
    pub local_user: UserId,
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub channels: Vec<SeedChannel>,
    #[serde(default)]
    pub nicknames: Vec<SeedNickname>,
    /// Voice occupancy before the first step.
    #[serde(default)]
    pub initial: Vec<PresenceStep>,
}

// ---------------------------------------------------------------------------
// InMemoryHost
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct HostState {
    users: HashMap<UserId, UserRecord>,
    nicknames: HashMap<(GuildId, UserId), String>,
    channels: HashMap<ChannelId, ChannelRecord>,
    /// user -> voice channel. Absent means not in voice.
    voice: HashMap<UserId, ChannelId>,
}

pub struct InMemoryHost {
    local_user: UserId,
    state: RwLock<HostState>,
}

impl InMemoryHost {
    pub fn new(local_user: impl Into<UserId>) -> Self {
        Self {
            local_user: local_user.into(),
            state: RwLock::new(HostState::default()),
        }
    }

    pub fn from_seed(seed: HostSeed) -> Self {
        let host = Self::new(seed.local_user);
        for user in seed.users {
            host.add_user(user.id, user.record);
        }
        for channel in seed.channels {
            host.add_channel(channel.id, channel.record);
        }
        for nick in seed.nicknames {
            host.set_nickname(nick.guild_id, nick.user_id, nick.nickname);
        }
        for step in seed.initial {
            host.set_voice_channel(step.user, step.channel);
        }
        host
    }

    pub fn add_user(&self, user_id: impl Into<UserId>, record: UserRecord) {
        self.write().users.insert(user_id.into(), record);
    }

    pub fn add_channel(&self, channel_id: impl Into<ChannelId>, record: ChannelRecord) {
        self.write().channels.insert(channel_id.into(), record);
    }

    pub fn set_nickname(
        &self,
        guild_id: impl Into<GuildId>,
        user_id: impl Into<UserId>,
        nickname: impl Into<String>,
    ) {
        self.write()
            .nicknames
            .insert((guild_id.into(), user_id.into()), nickname.into());
    }

    /// Move a user into `channel_id` (or out of voice with `None`) and
    /// return the update describing the change.
    pub fn set_voice_channel(
        &self,
        user_id: impl Into<UserId>,
        channel_id: Option<ChannelId>,
    ) -> PresenceUpdate {
        let user_id = user_id.into();
        {
            let mut state = self.write();
            match &channel_id {
                Some(channel) => {
                    state.voice.insert(user_id.clone(), channel.clone());
                }
                None => {
                    state.voice.remove(&user_id);
                }
            }
        }
        debug!(user_id = %user_id, channel_id = ?channel_id, "voice state changed");
        PresenceUpdate::new(user_id, channel_id)
    }

    pub fn apply(&self, step: &PresenceStep) -> PresenceUpdate {
        self.set_voice_channel(step.user.clone(), step.channel.clone())
    }

    fn read(&self) -> RwLockReadGuard<'_, HostState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HostState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MembershipSource for InMemoryHost {
    fn members_of(&self, channel_id: &ChannelId) -> HashMap<UserId, VoiceMembership> {
        self.read()
            .voice
            .iter()
            .filter(|(_, channel)| *channel == channel_id)
            .map(|(user, channel)| {
                (
                    user.clone(),
                    VoiceMembership::new(user.clone(), Some(channel.clone())),
                )
            })
            .collect()
    }

    fn current_channel_for_local_user(&self) -> Option<ChannelId> {
        self.read().voice.get(&self.local_user).cloned()
    }
}

impl IdentitySource for InMemoryHost {
    fn local_user_id(&self) -> UserId {
        self.local_user.clone()
    }

    fn user(&self, user_id: &UserId) -> Option<UserRecord> {
        self.read().users.get(user_id).cloned()
    }

    fn display_name(&self, guild_id: &GuildId, user_id: &UserId) -> Option<String> {
        self.read()
            .nicknames
            .get(&(guild_id.clone(), user_id.clone()))
            .cloned()
    }
}

impl ChannelSource for InMemoryHost {
    fn channel(&self, channel_id: &ChannelId) -> Option<ChannelRecord> {
        self.read().channels.get(channel_id).cloned()
    }
}
