//! Speech engines backed by the host OS.
//!
//! - Linux: spawns `espeak-ng`.
//! - macOS: spawns `say`.
//! - Other platforms: no voices, so every announcement is dropped with a
//!   `NoVoicesAvailable` diagnostic.
//!
//! [`ConsoleSpeechEngine`] prints utterances instead of speaking them and is
//! used for dry runs.

mod backend;
mod console;
pub mod parse;
mod system;

pub use backend::Backend;
pub use console::ConsoleSpeechEngine;
pub use system::SystemSpeechEngine;
