//! Profile data types as they appear in the JSON files.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use win_keycode::InputBinding;

use crate::defaults;

/// Activation semantics of a hotkey slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotkeyMode {
    /// Momentary override while the load binding is held; restored on release.
    Hold,
    /// Flip between the target and the previously saved values, debounced.
    Toggle,
    /// Apply the target every tick the load binding is held; never restored.
    Switch,
}

impl fmt::Display for HotkeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hold => "hold",
            Self::Toggle => "toggle",
            Self::Switch => "switch",
        })
    }
}

/// One entry of the profile's `user_settings` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HotkeySpec {
    /// Binding that activates the slot.
    pub user_load_key: InputBinding,
    /// Binding that captures the current values into the slot.
    pub user_store_key: InputBinding,
    /// Activation semantics.
    #[serde(default = "defaults::key_type")]
    pub user_key_type: HotkeyMode,
    /// Depth applied on activation.
    pub user_depth: f32,
    /// Convergence applied on activation.
    pub user_convergence: f32,
    /// Field of view kept alongside the slot. Carried through saves, never applied here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_fov: Option<f32>,
    /// Per-slot override of the profile's toggle debounce, in ticks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ticks: Option<u32>,
    /// Name used in store notifications; defaults to the load binding spec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl HotkeySpec {
    /// The label reported for this slot.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.user_load_key.to_spec())
    }
}

/// A stereo profile: base parameters plus the hotkey slots.
///
/// Fields this crate does not interpret are kept in `extra` so that a profile
/// written by another tool survives a load/save round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Base depth (eye separation).
    #[serde(default = "defaults::depth")]
    pub depth: f32,
    /// Base convergence.
    #[serde(default = "defaults::convergence")]
    pub convergence: f32,
    /// Display refresh rate in Hz; used to derive the default toggle debounce.
    #[serde(default = "defaults::display_frequency")]
    pub display_frequency: f32,
    /// When set, hotkeys are not evaluated at all.
    #[serde(default)]
    pub disable_hotkeys: bool,
    /// Toggle debounce in ticks. Derived from `display_frequency` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ticks: Option<u32>,
    /// Match tolerance for toggle direction decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f32>,
    /// Hotkey slots, in evaluation order.
    #[serde(default = "defaults::user_settings")]
    pub user_settings: Vec<HotkeySpec>,
    /// Everything else found at the top level, merged back in when saving.
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Top-level keys this crate interprets; everything else lands in `extra`.
    pub const KNOWN_FIELDS: &'static [&'static str] = &[
        "depth",
        "convergence",
        "display_frequency",
        "disable_hotkeys",
        "debounce_ticks",
        "tolerance",
        "user_settings",
    ];

    /// Effective toggle debounce in ticks.
    ///
    /// Uses `debounce_ticks` when set, else half the display frequency (at least one tick).
    pub fn debounce_ticks_max(&self) -> u32 {
        self.debounce_ticks
            .unwrap_or_else(|| defaults::debounce_for_frequency(self.display_frequency))
    }

    /// Effective toggle tolerance.
    pub fn tolerance(&self) -> f32 {
        self.tolerance.unwrap_or(defaults::TOLERANCE)
    }
}

impl Default for Profile {
    fn default() -> Self {
        defaults::default_profile()
    }
}
