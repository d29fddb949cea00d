use std::path::PathBuf;

use crate::id::{ChannelId, UserId};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),

    #[error("config write error: {0}")]
    WriteError(String),

    #[error("could not determine the user config directory")]
    NoConfigDir,
}

/// Failures reported by the speech layer. None of these are fatal: the
/// message is dropped and the service keeps running.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech voice \"{0}\" could not be found")]
    MissingVoice(String),

    #[error("no speech synthesis voices available")]
    NoVoicesAvailable,

    #[error("speech engine error: {0}")]
    EngineFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum HeraldError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Speech(#[from] SpeechError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    #[error("unknown channel: {0}")]
    UnknownChannel(ChannelId),

    #[error("{0}")]
    Other(String),
}
