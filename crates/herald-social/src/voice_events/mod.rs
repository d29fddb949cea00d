//! The running announcer service.
//!
//! Subscribes to voice-state updates on an [`EventBus`](herald_common::EventBus),
//! classifies each one against the snapshot of the observed channel, and
//! speaks the resulting notification. Every update is handled to completion
//! under one lock, so classification never overlaps and `stop` leaves no
//! half-processed event behind.

mod service;

pub use service::VoiceEvents;

#[cfg(test)]
mod tests;
