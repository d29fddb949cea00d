//! Turns raw presence updates into at most one announcement each.

use std::fmt;

use herald_common::{ChannelId, PresenceUpdate, UserId};
use herald_config::MessageKey;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::host::MembershipSource;
use crate::snapshot::StateSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    Join,
    Leave,
    JoinSelf,
    MoveSelf,
    LeaveSelf,
}

impl NotificationKind {
    pub fn message_key(self) -> MessageKey {
        match self {
            NotificationKind::Join => MessageKey::Join,
            NotificationKind::Leave => MessageKey::Leave,
            NotificationKind::JoinSelf => MessageKey::JoinSelf,
            NotificationKind::MoveSelf => MessageKey::MoveSelf,
            NotificationKind::LeaveSelf => MessageKey::LeaveSelf,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_key().as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub user_id: UserId,
    /// Channel named in the announcement: the one joined, moved to, or left.
    pub channel_id: ChannelId,
}

impl NotificationEvent {
    fn new(kind: NotificationKind, user_id: &UserId, channel_id: &ChannelId) -> Self {
        Self {
            kind,
            user_id: user_id.clone(),
            channel_id: channel_id.clone(),
        }
    }
}

/// Owns the snapshot of the observed channel and diffs each update
/// against it.
#[derive(Debug, Default)]
pub struct TransitionClassifier {
    snapshot: StateSnapshot,
}

impl TransitionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &StateSnapshot {
        &self.snapshot
    }

    /// Classify one update without touching the snapshot.
    pub fn classify(
        &self,
        update: &PresenceUpdate,
        local_user: &UserId,
        membership: &(impl MembershipSource + ?Sized),
    ) -> Option<NotificationEvent> {
        let prev = self.snapshot.get(&update.user_id);

        if &update.user_id == local_user {
            return match (&update.channel_id, prev) {
                (None, Some(prev)) => prev
                    .channel_id
                    .as_ref()
                    .map(|from| NotificationEvent::new(NotificationKind::LeaveSelf, local_user, from)),
                (None, None) => {
                    debug!(user_id = %local_user, "leave without recorded state, nothing to announce");
                    None
                }
                (Some(to), None) => {
                    Some(NotificationEvent::new(NotificationKind::JoinSelf, local_user, to))
                }
                (Some(to), Some(prev)) if prev.channel_id.as_ref() != Some(to) => {
                    Some(NotificationEvent::new(NotificationKind::MoveSelf, local_user, to))
                }
                (Some(_), Some(_)) => None,
            };
        }

        // Other users only matter while we sit in a channel ourselves
        let selected = membership.current_channel_for_local_user()?;

        match prev {
            None if update.channel_id.as_ref() == Some(&selected) => Some(NotificationEvent::new(
                NotificationKind::Join,
                &update.user_id,
                &selected,
            )),
            // Re-read membership instead of trusting update.channel_id: a
            // later update for the same user may already have landed.
            Some(_) if !membership.members_of(&selected).contains_key(&update.user_id) => Some(
                NotificationEvent::new(NotificationKind::Leave, &update.user_id, &selected),
            ),
            _ => None,
        }
    }

    /// Classify an update and, if it produced a notification, rebuild the
    /// snapshot from the host's current state.
    pub fn observe(
        &mut self,
        update: &PresenceUpdate,
        local_user: &UserId,
        membership: &(impl MembershipSource + ?Sized),
    ) -> Option<NotificationEvent> {
        let notification = self.classify(update, local_user, membership)?;
        self.rebuild(membership);
        Some(notification)
    }

    /// Replace the snapshot with a fresh read of the local user's channel.
    pub fn rebuild(&mut self, membership: &(impl MembershipSource + ?Sized)) {
        let observed = membership.current_channel_for_local_user();
        self.snapshot = StateSnapshot::rebuild(membership, observed.as_ref());
        debug!(
            channel_id = ?self.snapshot.observed_channel(),
            members = self.snapshot.len(),
            "voice state snapshot rebuilt"
        );
    }

    pub fn clear(&mut self) {
        self.snapshot = StateSnapshot::empty();
    }
}
