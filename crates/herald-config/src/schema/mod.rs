//! Configuration schema types for Herald.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the announcer shipped with.

mod filters;
mod messages;
mod speech;
mod system;

pub use filters::*;
pub use messages::*;
pub use speech::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration: the process-wide Settings record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HeraldConfig {
    pub speech: SpeechConfig,
    pub filters: FilterConfig,
    pub messages: MessagesConfig,
    pub logging: LoggingConfig,
}
