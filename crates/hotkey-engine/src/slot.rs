//! One configured hotkey and its per-tick state machine.

use config::HotkeySpec;
use tracing::{debug, trace};
use win_keycode::InputBinding;

use crate::{
    AppliedEvent, AppliedKind, EngineConfig, HotkeyMode, InputSnapshot, ParameterBackend,
    StereoParams, StoreNotification, backend::apply,
};

/// Everything one slot produced during a tick.
#[derive(Debug, Default)]
pub(crate) struct SlotOutcome {
    /// Set when the slot wrote to the backend.
    pub applied: Option<AppliedEvent>,
    /// Set when the store binding captured new targets.
    pub stored: Option<StoreNotification>,
}

/// One hotkey binding with its mode, target values and runtime state.
///
/// A toggle pressed while the backend already matches its target, before the
/// slot has ever saved values, has nothing to restore: the backend is left
/// alone and no [`AppliedEvent`] is produced, though the debounce still starts.
#[derive(Clone, Debug, PartialEq)]
pub struct HotkeySlot {
    /// Name used in notifications.
    label: String,
    /// Activates the slot.
    load_binding: InputBinding,
    /// Captures the backend's current values into `target`.
    store_binding: InputBinding,
    /// Activation semantics.
    mode: HotkeyMode,
    /// Values this slot applies.
    target: StereoParams,
    /// Backend values captured before this slot last overrode them.
    saved: Option<StereoParams>,
    /// A hold override is currently in effect.
    held_active: bool,
    /// Ticks left before a toggle may fire again.
    debounce_remaining: u32,
    /// Overrides the engine-wide toggle debounce.
    debounce_ticks: Option<u32>,
}

impl HotkeySlot {
    /// Create a slot with no saved values and no pending debounce.
    pub fn new(
        label: impl Into<String>,
        load_binding: InputBinding,
        store_binding: InputBinding,
        mode: HotkeyMode,
        target: StereoParams,
    ) -> Self {
        Self {
            label: label.into(),
            load_binding,
            store_binding,
            mode,
            target,
            saved: None,
            held_active: false,
            debounce_remaining: 0,
            debounce_ticks: None,
        }
    }

    /// Builder: use `ticks` instead of the engine-wide toggle debounce.
    pub fn with_debounce_ticks(mut self, ticks: u32) -> Self {
        self.debounce_ticks = Some(ticks);
        self
    }

    /// Build a slot from a profile entry.
    pub fn from_spec(spec: &HotkeySpec) -> Self {
        let slot = Self::new(
            spec.display_label(),
            spec.user_load_key,
            spec.user_store_key,
            spec.user_key_type,
            StereoParams::new(spec.user_depth, spec.user_convergence),
        );
        match spec.debounce_ticks {
            Some(t) => slot.with_debounce_ticks(t),
            None => slot,
        }
    }

    /// Name used in notifications.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Binding that activates the slot.
    pub fn load_binding(&self) -> &InputBinding {
        &self.load_binding
    }

    /// Binding that captures new target values.
    pub fn store_binding(&self) -> &InputBinding {
        &self.store_binding
    }

    /// Activation semantics.
    pub fn mode(&self) -> HotkeyMode {
        self.mode
    }

    /// Values this slot applies.
    pub fn target(&self) -> StereoParams {
        self.target
    }

    /// Values saved at the last activation, if the slot has activated.
    pub fn saved(&self) -> Option<StereoParams> {
        self.saved
    }

    /// True while a hold override is in effect.
    pub fn held_active(&self) -> bool {
        self.held_active
    }

    /// Ticks left before a toggle may fire again.
    pub fn debounce_remaining(&self) -> u32 {
        self.debounce_remaining
    }

    /// Debounce applied after a toggle fires, given the engine default.
    pub fn debounce_ticks_max(&self, config: &EngineConfig) -> u32 {
        self.debounce_ticks.unwrap_or(config.debounce_ticks_max)
    }

    /// Build the applied event for a write of `params`.
    fn applied(&self, index: usize, kind: AppliedKind, params: StereoParams) -> AppliedEvent {
        AppliedEvent {
            slot_index: index,
            slot_label: self.label.clone(),
            mode: self.mode,
            kind,
            params,
        }
    }

    /// Advance this slot by one tick.
    ///
    /// At most one apply or restore happens per call; the store check runs
    /// independently afterwards and sees the values that apply just wrote.
    pub(crate) fn evaluate<B: ParameterBackend + ?Sized>(
        &mut self,
        index: usize,
        snapshot: &InputSnapshot,
        backend: &mut B,
        config: &EngineConfig,
    ) -> SlotOutcome {
        self.debounce_remaining = self.debounce_remaining.saturating_sub(1);

        let applied = if snapshot.is_active(&self.load_binding) {
            self.on_load_pressed(index, backend, config)
        } else {
            self.on_load_released(index, backend)
        };

        let stored = if snapshot.is_active(&self.store_binding) {
            Some(self.store(index, backend))
        } else {
            None
        };

        SlotOutcome { applied, stored }
    }

    /// Load binding is down this tick.
    fn on_load_pressed<B: ParameterBackend + ?Sized>(
        &mut self,
        index: usize,
        backend: &mut B,
        config: &EngineConfig,
    ) -> Option<AppliedEvent> {
        match self.mode {
            HotkeyMode::Hold => {
                if self.held_active {
                    return None;
                }
                self.saved = Some(StereoParams::read(backend));
                self.held_active = true;
                apply(backend, self.target);
                trace!(slot = index, label = %self.label, "hold_engaged");
                Some(self.applied(index, AppliedKind::HoldEngaged, self.target))
            }
            HotkeyMode::Toggle => {
                if self.debounce_remaining > 0 {
                    return None;
                }
                self.debounce_remaining = self.debounce_ticks_max(config);

                let current = StereoParams::read(backend);
                if current.matches(&self.target, config.tolerance) {
                    let Some(saved) = self.saved else {
                        debug!(
                            slot = index,
                            label = %self.label,
                            "toggle_off_without_saved_values"
                        );
                        return None;
                    };
                    apply(backend, saved);
                    debug!(slot = index, label = %self.label, %saved, "toggle_off");
                    Some(self.applied(index, AppliedKind::ToggleOff, saved))
                } else {
                    self.saved = Some(current);
                    apply(backend, self.target);
                    debug!(slot = index, label = %self.label, target = %self.target, "toggle_on");
                    Some(self.applied(index, AppliedKind::ToggleOn, self.target))
                }
            }
            HotkeyMode::Switch => {
                apply(backend, self.target);
                trace!(slot = index, label = %self.label, "switched");
                Some(self.applied(index, AppliedKind::Switched, self.target))
            }
        }
    }

    /// Load binding is up this tick. Only an engaged hold has work to do.
    fn on_load_released<B: ParameterBackend + ?Sized>(
        &mut self,
        index: usize,
        backend: &mut B,
    ) -> Option<AppliedEvent> {
        if self.mode != HotkeyMode::Hold || !self.held_active {
            return None;
        }
        self.held_active = false;
        let saved = self.saved?;
        apply(backend, saved);
        trace!(slot = index, label = %self.label, "hold_released");
        Some(self.applied(index, AppliedKind::HoldReleased, saved))
    }

    /// Capture the backend's current values as the new target.
    fn store<B: ParameterBackend + ?Sized>(
        &mut self,
        index: usize,
        backend: &B,
    ) -> StoreNotification {
        self.target = StereoParams::read(backend);
        StoreNotification {
            slot_label: self.label.clone(),
            slot_index: index,
            params: self.target,
        }
    }

    /// Restore an engaged hold outside the normal tick flow (reload, shutdown).
    pub(crate) fn release<B: ParameterBackend + ?Sized>(
        &mut self,
        index: usize,
        backend: &mut B,
    ) -> Option<AppliedEvent> {
        self.on_load_released(index, backend)
    }
}

#[cfg(test)]
mod tests {
    use win_keycode::{Key, PadButtons};

    use super::*;

    fn cfg() -> EngineConfig {
        EngineConfig {
            debounce_ticks_max: 3,
            tolerance: 0.001,
        }
    }

    fn toggle_slot() -> HotkeySlot {
        HotkeySlot::new(
            "t",
            Key::F1.into(),
            Key::F2.into(),
            HotkeyMode::Toggle,
            StereoParams::new(0.065, 1.0),
        )
    }

    #[test]
    fn debounce_counts_down_even_when_idle() {
        let mut slot = toggle_slot();
        let mut backend = StereoParams::new(0.1, 1.0);
        let pressed = InputSnapshot::with_keys([Key::F1]);
        let idle = InputSnapshot::new();

        let out = slot.evaluate(0, &pressed, &mut backend, &cfg());
        assert_eq!(out.applied.map(|a| a.kind), Some(AppliedKind::ToggleOn));
        assert_eq!(slot.debounce_remaining(), 3);

        slot.evaluate(0, &idle, &mut backend, &cfg());
        slot.evaluate(0, &idle, &mut backend, &cfg());
        assert_eq!(slot.debounce_remaining(), 1);
        slot.evaluate(0, &idle, &mut backend, &cfg());
        assert_eq!(slot.debounce_remaining(), 0);
        slot.evaluate(0, &idle, &mut backend, &cfg());
        assert_eq!(slot.debounce_remaining(), 0);
    }

    #[test]
    fn per_slot_debounce_override() {
        let mut slot = toggle_slot().with_debounce_ticks(10);
        let mut backend = StereoParams::new(0.1, 1.0);
        slot.evaluate(0, &InputSnapshot::with_keys([Key::F1]), &mut backend, &cfg());
        assert_eq!(slot.debounce_remaining(), 10);
    }

    #[test]
    fn toggle_off_without_saved_values_leaves_backend() {
        let mut slot = toggle_slot();
        let mut backend = StereoParams::new(0.065, 1.0);
        let out = slot.evaluate(0, &InputSnapshot::with_keys([Key::F1]), &mut backend, &cfg());
        assert!(out.applied.is_none());
        assert_eq!(backend, StereoParams::new(0.065, 1.0));
        assert_eq!(slot.debounce_remaining(), 3);
    }

    #[test]
    fn held_flag_never_set_outside_hold() {
        let mut backend = StereoParams::new(0.1, 1.0);
        let pressed = InputSnapshot::new().with_gamepad(PadButtons::A);
        for mode in [HotkeyMode::Toggle, HotkeyMode::Switch] {
            let mut slot = HotkeySlot::new(
                "x",
                PadButtons::A.into(),
                Key::F2.into(),
                mode,
                StereoParams::new(0.2, 2.0),
            );
            for _ in 0..5 {
                slot.evaluate(0, &pressed, &mut backend, &cfg());
                assert!(!slot.held_active());
            }
        }
    }

    #[test]
    fn from_spec_uses_profile_values() {
        let profile = config::default_profile();
        let slot = HotkeySlot::from_spec(&profile.user_settings[1]);
        assert_eq!(slot.label(), "XINPUT_GAMEPAD_GUIDE");
        assert_eq!(slot.mode(), HotkeyMode::Toggle);
        assert_eq!(slot.target(), StereoParams::new(0.065, 1.0));
        assert_eq!(slot.saved(), None);
        assert_eq!(slot.debounce_ticks_max(&cfg()), 3);
    }
}
