// Defaults and constants for stereo profiles

use serde_json::Map;
use win_keycode::{InputBinding, Key, PadButtons};

use crate::{HotkeyMode, HotkeySpec, Profile};

/// File name of the generated default profile.
pub const DEFAULT_PROFILE_FILE: &str = "default_config.json";

/// Suffix appended to an application key to form its profile file name.
pub const PROFILE_SUFFIX: &str = "_config.json";

pub(crate) const DEPTH: f32 = 0.1;
pub(crate) const CONVERGENCE: f32 = 1.0;
pub(crate) const DISPLAY_FREQUENCY: f32 = 60.0;

/// Default tolerance for toggle matching.
pub const TOLERANCE: f32 = 0.001;

// Serde default functions
pub(crate) const fn depth() -> f32 {
    DEPTH
}
pub(crate) const fn convergence() -> f32 {
    CONVERGENCE
}
pub(crate) const fn display_frequency() -> f32 {
    DISPLAY_FREQUENCY
}
pub(crate) const fn key_type() -> HotkeyMode {
    HotkeyMode::Toggle
}
pub(crate) fn user_settings() -> Vec<HotkeySpec> {
    default_profile().user_settings
}

/// Toggle debounce derived from a display frequency: half a second of frames.
pub(crate) fn debounce_for_frequency(hz: f32) -> u32 {
    if hz.is_finite() && hz >= 2.0 {
        (hz / 2.0).floor() as u32
    } else {
        1
    }
}

/// A single default slot.
fn slot(load: InputBinding, store: Key, mode: HotkeyMode, depth: f32) -> HotkeySpec {
    HotkeySpec {
        user_load_key: load,
        user_store_key: InputBinding::Key(store),
        user_key_type: mode,
        user_depth: depth,
        user_convergence: CONVERGENCE,
        user_fov: None,
        debounce_ticks: None,
        label: None,
    }
}

/// The profile written when no configuration exists yet.
///
/// Three sample slots, one per mode: a switch on `VK_NUMPAD1`, a toggle on the
/// guide button and a hold on `VK_NUMPAD3`, stored with `VK_NUMPAD4..6`.
pub fn default_profile() -> Profile {
    Profile {
        depth: DEPTH,
        convergence: CONVERGENCE,
        display_frequency: DISPLAY_FREQUENCY,
        disable_hotkeys: false,
        debounce_ticks: None,
        tolerance: None,
        user_settings: vec![
            slot(
                Key::Numpad1.into(),
                Key::Numpad4,
                HotkeyMode::Switch,
                DEPTH,
            ),
            slot(
                PadButtons::GUIDE.into(),
                Key::Numpad5,
                HotkeyMode::Toggle,
                0.065,
            ),
            slot(Key::Numpad3.into(), Key::Numpad6, HotkeyMode::Hold, 0.065),
        ],
        extra: Map::new(),
    }
}
