//! Message templates to spoken text.
//!
//! Placeholders are substituted in one left-to-right pass, longest token
//! first, so `$username` is never read as `$user` followed by `name`, and
//! substituted values are never rescanned for further placeholders.

use herald_common::UserId;

use crate::host::{ChannelRecord, IdentitySource, UserRecord};

const USERNAME: &str = "$username";
const USER: &str = "$user";
const CHANNEL: &str = "$channel";

/// Values substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    /// Guild nickname, falling back to the account name.
    pub user: String,
    pub username: String,
    pub channel: String,
}

impl Placeholders {
    /// Resolve display values for `user_id` in `channel`.
    ///
    /// Direct and group calls have no guild, so `$user` is the account name
    /// and `$channel` is the configured private-call label.
    pub fn resolve(
        identity: &(impl IdentitySource + ?Sized),
        user_id: &UserId,
        user: &UserRecord,
        channel: &ChannelRecord,
        private_call_label: &str,
    ) -> Self {
        if channel.is_private() {
            return Self {
                user: user.username.clone(),
                username: user.username.clone(),
                channel: private_call_label.to_string(),
            };
        }

        let nickname = channel
            .guild_id
            .as_ref()
            .and_then(|guild_id| identity.display_name(guild_id, user_id));

        Self {
            user: nickname.unwrap_or_else(|| user.username.clone()),
            username: user.username.clone(),
            channel: channel.name.clone(),
        }
    }

    /// The literal words used when previewing a template.
    pub fn preview() -> Self {
        Self {
            user: "user".into(),
            username: "username".into(),
            channel: "channel".into(),
        }
    }
}

/// Replace every character that is not an ASCII letter or digit with a
/// single space. Runs of spaces are kept as-is.
pub fn filter_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect()
}

pub fn render_template(template: &str, values: &Placeholders, filter_names: bool) -> String {
    let substitute = |value: &str| {
        if filter_names {
            filter_name(value)
        } else {
            value.to_string()
        }
    };

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let (token, value) = if tail.starts_with(USERNAME) {
            (USERNAME, Some(&values.username))
        } else if tail.starts_with(USER) {
            (USER, Some(&values.user))
        } else if tail.starts_with(CHANNEL) {
            (CHANNEL, Some(&values.channel))
        } else {
            ("$", None)
        };

        match value {
            Some(value) => out.push_str(&substitute(value.as_str())),
            None => out.push('$'),
        }
        rest = &tail[token.len()..];
    }

    out.push_str(rest);
    out
}

/// Render `template` with placeholder names spoken literally.
pub fn preview_message(template: &str) -> String {
    render_template(template, &Placeholders::preview(), false)
}
