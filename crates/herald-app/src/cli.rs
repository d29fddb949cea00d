//! CLI definition using clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Herald: speaks voice-channel joins, leaves and moves.
#[derive(Parser, Debug)]
#[command(name = "herald", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. `herald=debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a recorded session from a JSON script
    Replay(ReplayOpts),
    /// Read JSON-lines presence steps from stdin, reloading config on change
    Listen(ListenOpts),
    /// List available speech voices
    Voices,
    /// Speak a configured message with placeholder names read literally
    Test {
        /// join, leave, join_self, move_self, leave_self or private_call
        message: String,
    },
    /// Print the effective config as JSON
    Config,
}

#[derive(clap::Args, Debug)]
pub struct ReplayOpts {
    /// Script with host state and presence steps
    pub script: PathBuf,

    /// Print announcements instead of speaking them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug)]
pub struct ListenOpts {
    /// Host state to start from (same format as a replay script; steps are ignored)
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Local user id when no seed is given
    #[arg(long, default_value = "1")]
    pub local_user: String,

    /// Print announcements instead of speaking them
    #[arg(long)]
    pub dry_run: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_replay_with_global_flags() {
        let args = Args::try_parse_from([
            "herald",
            "replay",
            "session.json",
            "--dry-run",
            "--config",
            "/tmp/herald.toml",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("/tmp/herald.toml")));
        match args.command {
            Command::Replay(opts) => {
                assert_eq!(opts.script, PathBuf::from("session.json"));
                assert!(opts.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_test_message() {
        let args = Args::try_parse_from(["herald", "--log-level", "herald=debug", "test", "join_self"]).unwrap();
        assert_eq!(args.log_level.as_deref(), Some("herald=debug"));
        assert!(matches!(args.command, Command::Test { ref message } if message == "join_self"));
    }

    #[test]
    fn command_is_required() {
        assert!(Args::try_parse_from(["herald"]).is_err());
    }
}
