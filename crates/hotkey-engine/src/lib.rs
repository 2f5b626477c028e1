//! Hotkey Engine
//!
//! The engine maps keyboard and controller input onto live stereo parameters.
//! Once per poll cycle the host hands it an [`InputSnapshot`] and a
//! [`ParameterBackend`]; every [`HotkeySlot`] advances its own state machine
//! in configuration order:
//! - `Hold` overrides the parameters while its binding is down and restores
//!   them exactly on release
//! - `Toggle` flips between its target and the values it replaced, gated by a
//!   tick-counted debounce
//! - `Switch` applies its target on every tick its binding is down
//! - a slot's store binding captures the current parameters as its new target
//!
//! Evaluation is synchronous and infallible. The engine holds no locks; hosts
//! that share it between threads serialize calls to [`HotkeyEngine::tick`].
use std::mem;

mod backend;
mod input;
mod notification;
mod slot;
pub mod test_support;

use tracing::{debug, warn};

pub use backend::{ParameterBackend, StereoParams};
pub use config::HotkeyMode;
pub use input::{InputSnapshot, InputSource, KeySet};
pub use notification::{AppliedEvent, AppliedKind, FeedbackSink, LogFeedback, StoreNotification};
pub use slot::HotkeySlot;
pub use win_keycode::{InputBinding, Key, PadButtons};

/// Process-wide evaluation settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Ticks a toggle slot waits before it may fire again.
    pub debounce_ticks_max: u32,
    /// Per-value tolerance when deciding whether a toggle is currently on.
    pub tolerance: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ticks_max: 30,
            tolerance: config::TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Settings taken from a profile.
    pub fn from_profile(profile: &config::Profile) -> Self {
        Self {
            debounce_ticks_max: profile.debounce_ticks_max(),
            tolerance: profile.tolerance(),
        }
    }
}

/// Owns the ordered hotkey slots and evaluates them once per tick.
///
/// Construct via [`HotkeyEngine::new`] or [`HotkeyEngine::from_profile`], then
/// call [`HotkeyEngine::tick`] once per poll cycle.
pub struct HotkeyEngine {
    /// Evaluation settings.
    config: EngineConfig,
    /// Slots in configuration order.
    slots: Vec<HotkeySlot>,
    /// Optional receiver for applied/stored signals.
    feedback: Option<Box<dyn FeedbackSink>>,
    /// Ticks evaluated since construction.
    ticks: u64,
}

impl HotkeyEngine {
    /// Create an engine over `slots`, evaluated in the given order.
    pub fn new(config: EngineConfig, slots: Vec<HotkeySlot>) -> Self {
        Self {
            config,
            slots,
            feedback: None,
            ticks: 0,
        }
    }

    /// Create an engine from a profile's settings and `user_settings`.
    pub fn from_profile(profile: &config::Profile) -> Self {
        Self::new(EngineConfig::from_profile(profile), slots_from_profile(profile))
    }

    /// Builder: route applied/stored signals to `sink`.
    pub fn with_feedback(mut self, sink: Box<dyn FeedbackSink>) -> Self {
        self.feedback = Some(sink);
        self
    }

    /// Evaluation settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Slots in evaluation order.
    pub fn slots(&self) -> &[HotkeySlot] {
        &self.slots
    }

    /// Number of ticks evaluated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Evaluate every slot once, in order.
    ///
    /// Returns the store notification of the last slot that stored this tick.
    /// Earlier stores in the same tick still update their slots and reach the
    /// feedback sink; only the return value is limited to one.
    pub fn tick<B: ParameterBackend + ?Sized>(
        &mut self,
        snapshot: &InputSnapshot,
        backend: &mut B,
    ) -> Option<StoreNotification> {
        self.ticks += 1;
        let mut last = None;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let outcome = slot.evaluate(index, snapshot, backend, &self.config);
            if let Some(sink) = self.feedback.as_mut() {
                if let Some(event) = &outcome.applied {
                    sink.applied(event);
                }
                if let Some(note) = &outcome.stored {
                    sink.stored(note);
                }
            }
            if outcome.stored.is_some() {
                last = outcome.stored;
            }
        }
        last
    }

    /// Restore every engaged hold slot, as if its binding had been released.
    ///
    /// Hosts call this before discarding the engine or its slots so a held
    /// override does not outlive the binding that created it.
    pub fn release_held<B: ParameterBackend + ?Sized>(&mut self, backend: &mut B) -> usize {
        let mut released = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(event) = slot.release(index, backend) {
                released += 1;
                if let Some(sink) = self.feedback.as_mut() {
                    sink.applied(&event);
                }
            }
        }
        released
    }

    /// Swap in a new slot collection, returning the old one.
    ///
    /// Takes `&mut self`, so no tick can observe a partially replaced set.
    pub fn replace_slots(&mut self, slots: Vec<HotkeySlot>) -> Vec<HotkeySlot> {
        debug!(old = self.slots.len(), new = slots.len(), "slots_replaced");
        mem::replace(&mut self.slots, slots)
    }

    /// Replace settings and slots together from a freshly loaded profile.
    pub fn reload(&mut self, profile: &config::Profile) -> Vec<HotkeySlot> {
        self.config = EngineConfig::from_profile(profile);
        self.replace_slots(slots_from_profile(profile))
    }

    /// Copy each slot's current target back into the matching profile entry.
    ///
    /// Used to persist values captured by store bindings.
    pub fn write_targets(&self, profile: &mut config::Profile) {
        if profile.user_settings.len() != self.slots.len() {
            warn!(
                profile = profile.user_settings.len(),
                engine = self.slots.len(),
                "slot count differs from profile; writing the common prefix"
            );
        }
        for (spec, slot) in profile.user_settings.iter_mut().zip(&self.slots) {
            let target = slot.target();
            spec.user_depth = target.depth;
            spec.user_convergence = target.convergence;
        }
    }
}

/// Slots for every `user_settings` entry, in order.
fn slots_from_profile(profile: &config::Profile) -> Vec<HotkeySlot> {
    profile
        .user_settings
        .iter()
        .map(HotkeySlot::from_spec)
        .collect()
}
