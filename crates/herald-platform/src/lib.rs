pub mod speech;

pub use speech::{Backend, ConsoleSpeechEngine, SystemSpeechEngine};
