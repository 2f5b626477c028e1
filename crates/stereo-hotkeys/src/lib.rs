//! Host for the stereo hotkey engine.
//!
//! Loads a profile, owns the live parameters behind a lock, and drives a
//! [`hotkey_engine::HotkeyEngine`] from an input source on a fixed cadence.
//! The `stereo-hotkeys` binary is a thin CLI over [`commands`].

pub mod commands;
mod error;
pub mod params;
pub mod runner;
pub mod trace;

pub use error::{Error, Result};
