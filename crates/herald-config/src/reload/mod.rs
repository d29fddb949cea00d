//! Live config reload manager.
//!
//! Combines the file watcher with config loading so a running announcer
//! picks up edited settings without a restart.

mod manager;


pub use manager::ReloadManager;
