//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Herald Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[speech]
# voice = "English (America)"   # unset: first en-US voice, else the first voice found
# volume = 100                   # 0-100
# rate = 1.0                     # 0.1-10.0

[filters]
# bots = false                   # stay silent for bot accounts
# names = true                   # reduce names to letters and digits

[messages]
# $user     nickname in the server (account name in direct/group calls)
# $username account name
# $channel  channel name, or private_call for direct/group calls
# join = "$user joined $channel"
# leave = "$user left $channel"
# join_self = "You joined $channel"
# move_self = "You were moved to $channel"
# leave_self = "You left $channel"
# private_call = "The call"

[logging]
# level = "INFO"                 # DEBUG, INFO, WARNING, ERROR
"##
}
