//! "Applied" and "stored" signals, and the sinks that receive them.

use std::fmt;

use tracing::{debug, info};

use crate::{HotkeyMode, StereoParams};

/// What an applied signal did to the backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AppliedKind {
    /// A hold slot engaged its target.
    HoldEngaged,
    /// A hold slot restored the values saved at engage time.
    HoldReleased,
    /// A toggle slot applied its target.
    ToggleOn,
    /// A toggle slot restored its saved values.
    ToggleOff,
    /// A switch slot applied its target.
    Switched,
}

/// Emitted whenever a slot writes to the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedEvent {
    /// Position of the slot in configuration order.
    pub slot_index: usize,
    /// The slot's label.
    pub slot_label: String,
    /// The slot's mode.
    pub mode: HotkeyMode,
    /// What happened.
    pub kind: AppliedKind,
    /// The values written.
    pub params: StereoParams,
}

/// Produced when a slot captures the backend's current values as its new target.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreNotification {
    /// The slot's label.
    pub slot_label: String,
    /// Position of the slot in configuration order.
    pub slot_index: usize,
    /// The captured values, now the slot's target.
    pub params: StereoParams,
}

impl fmt::Display for StoreNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hotkey {} updated", self.slot_label)
    }
}

/// Receives feedback for every slot that triggers during a tick.
///
/// Implementations must tolerate repeated signals: a switch slot reports
/// `applied` on every tick its binding is held, and a held store binding
/// reports `stored` on every tick.
pub trait FeedbackSink: Send {
    /// A slot wrote to the backend.
    fn applied(&mut self, event: &AppliedEvent);
    /// A slot captured new target values.
    fn stored(&mut self, note: &StoreNotification);
}

/// Writes feedback through `tracing`: applies at debug, stores at info.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn applied(&mut self, event: &AppliedEvent) {
        debug!(
            slot = event.slot_index,
            label = %event.slot_label,
            mode = %event.mode,
            kind = ?event.kind,
            depth = event.params.depth,
            convergence = event.params.convergence,
            "hotkey_applied"
        );
    }

    fn stored(&mut self, note: &StoreNotification) {
        info!(
            slot = note.slot_index,
            depth = note.params.depth,
            convergence = note.params.convergence,
            "{}",
            note
        );
    }
}
