//! Recorded view of who occupies the observed voice channel.
//!
//! A snapshot is never patched. After every announced transition the
//! classifier throws it away and re-reads the channel's membership from the
//! host, so filtered, added, or concurrently removed users can't drift.

use std::collections::HashMap;

use herald_common::{ChannelId, UserId};
use serde::{Deserialize, Serialize};

use crate::host::MembershipSource;

/// One user's voice occupancy. `channel_id: None` means not in voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceMembership {
    pub user_id: UserId,
    pub channel_id: Option<ChannelId>,
}

impl VoiceMembership {
    pub fn new(user_id: impl Into<UserId>, channel_id: Option<ChannelId>) -> Self {
        Self {
            user_id: user_id.into(),
            channel_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    observed: Option<ChannelId>,
    members: HashMap<UserId, VoiceMembership>,
}

impl StateSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Full re-read of `observed`'s membership. `None` yields an empty
    /// snapshot.
    ///
    /// Entries whose channel disagrees with `observed` are dropped, so every
    /// recorded member is in the observed channel.
    pub fn rebuild(
        source: &(impl MembershipSource + ?Sized),
        observed: Option<&ChannelId>,
    ) -> Self {
        let Some(channel_id) = observed else {
            return Self::empty();
        };

        let members = source
            .members_of(channel_id)
            .into_iter()
            .filter(|(_, m)| m.channel_id.as_ref() == Some(channel_id))
            .collect();

        Self {
            observed: Some(channel_id.clone()),
            members,
        }
    }

    pub fn observed_channel(&self) -> Option<&ChannelId> {
        self.observed.as_ref()
    }

    pub fn get(&self, user_id: &UserId) -> Option<&VoiceMembership> {
        self.members.get(user_id)
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.members.contains_key(user_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMembers(HashMap<UserId, VoiceMembership>);

    impl MembershipSource for FixedMembers {
        fn members_of(&self, _channel_id: &ChannelId) -> HashMap<UserId, VoiceMembership> {
            self.0.clone()
        }

        fn current_channel_for_local_user(&self) -> Option<ChannelId> {
            None
        }
    }

    fn member(user: &str, channel: &str) -> (UserId, VoiceMembership) {
        (
            UserId::from(user),
            VoiceMembership::new(user, Some(ChannelId::from(channel))),
        )
    }

    #[test]
    fn rebuild_without_channel_is_empty() {
        let source = FixedMembers([member("1", "A")].into_iter().collect());
        let snapshot = StateSnapshot::rebuild(&source, None);
        assert!(snapshot.is_empty());
        assert!(snapshot.observed_channel().is_none());
    }

    #[test]
    fn rebuild_records_every_member() {
        let source = FixedMembers([member("1", "A"), member("2", "A")].into_iter().collect());
        let channel = ChannelId::from("A");
        let snapshot = StateSnapshot::rebuild(&source, Some(&channel));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.observed_channel(), Some(&channel));
        assert!(snapshot.contains(&UserId::from("2")));
        assert_eq!(
            snapshot.get(&UserId::from("1")).and_then(|m| m.channel_id.clone()),
            Some(channel)
        );
    }

    #[test]
    fn rebuild_discards_stale_entries() {
        let source = FixedMembers([member("1", "A"), member("2", "B")].into_iter().collect());
        let snapshot = StateSnapshot::rebuild(&source, Some(&ChannelId::from("A")));

        assert_eq!(snapshot.len(), 1);
        assert!(!snapshot.contains(&UserId::from("2")));
    }
}
