use std::{
    fmt,
    ops::{BitOr, BitOrAssign},
};

/// Analog trigger value above which a trigger counts as a pressed button.
///
/// Matches `XINPUT_GAMEPAD_TRIGGER_THRESHOLD`.
pub const TRIGGER_THRESHOLD: u8 = 30;

/// Expands the XInput button table into associated constants and a name lookup.
macro_rules! pad_table {
    ( $( $(#[$doc:meta])* $konst:ident = $bit:literal => $name:literal, )* ) => {
        impl PadButtons {
            $(
                $(#[$doc])*
                pub const $konst: Self = Self($bit);
            )*

            /// Every named button, in ascending bit order.
            pub const NAMED: &'static [(Self, &'static str)] = &[ $( (Self::$konst, $name), )* ];
        }
    };
}

/// A set of XInput gamepad buttons.
///
/// The low 16 bits mirror `XINPUT_GAMEPAD.wButtons`. Bits 16 and 17 are
/// synthetic: they stand for the left and right triggers once the analog axis
/// is folded in with [`PadButtons::fold_triggers`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PadButtons(u32);

pad_table! {
    DPAD_UP = 0x0001 => "XINPUT_GAMEPAD_DPAD_UP",
    DPAD_DOWN = 0x0002 => "XINPUT_GAMEPAD_DPAD_DOWN",
    DPAD_LEFT = 0x0004 => "XINPUT_GAMEPAD_DPAD_LEFT",
    DPAD_RIGHT = 0x0008 => "XINPUT_GAMEPAD_DPAD_RIGHT",
    START = 0x0010 => "XINPUT_GAMEPAD_START",
    BACK = 0x0020 => "XINPUT_GAMEPAD_BACK",
    LEFT_THUMB = 0x0040 => "XINPUT_GAMEPAD_LEFT_THUMB",
    RIGHT_THUMB = 0x0080 => "XINPUT_GAMEPAD_RIGHT_THUMB",
    LEFT_SHOULDER = 0x0100 => "XINPUT_GAMEPAD_LEFT_SHOULDER",
    RIGHT_SHOULDER = 0x0200 => "XINPUT_GAMEPAD_RIGHT_SHOULDER",
    /// Only reported by the extended state query.
    GUIDE = 0x0400 => "XINPUT_GAMEPAD_GUIDE",
    A = 0x1000 => "XINPUT_GAMEPAD_A",
    B = 0x2000 => "XINPUT_GAMEPAD_B",
    X = 0x4000 => "XINPUT_GAMEPAD_X",
    Y = 0x8000 => "XINPUT_GAMEPAD_Y",
    /// Synthetic: left trigger past [`TRIGGER_THRESHOLD`].
    LEFT_TRIGGER = 0x1_0000 => "XINPUT_GAMEPAD_LEFT_TRIGGER",
    /// Synthetic: right trigger past [`TRIGGER_THRESHOLD`].
    RIGHT_TRIGGER = 0x2_0000 => "XINPUT_GAMEPAD_RIGHT_TRIGGER",
}

impl PadButtons {
    /// No buttons.
    pub const NONE: Self = Self(0);

    /// Wrap a raw bitmask.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bitmask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine a raw `wButtons` word with the two trigger axes.
    ///
    /// A trigger sets its synthetic bit only when strictly above
    /// [`TRIGGER_THRESHOLD`].
    pub fn fold_triggers(buttons: u16, left_trigger: u8, right_trigger: u8) -> Self {
        let mut out = Self(u32::from(buttons));
        if left_trigger > TRIGGER_THRESHOLD {
            out |= Self::LEFT_TRIGGER;
        }
        if right_trigger > TRIGGER_THRESHOLD {
            out |= Self::RIGHT_TRIGGER;
        }
        out
    }

    /// True when every bit of `mask` is set in `self`.
    ///
    /// An empty mask never matches, so an unconfigured binding cannot fire.
    pub const fn contains(self, mask: Self) -> bool {
        mask.0 != 0 && (self.0 & mask.0) == mask.0
    }

    /// True when the two sets share at least one button.
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Look up a single named button (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(_, name)| s.eq_ignore_ascii_case(name))
            .map(|(b, _)| *b)
    }

    /// Parse a raw mask written the way `Display` prints leftover bits:
    /// `0x` followed by at least four hex digits (`0x0800`).
    ///
    /// Shorter hex such as `0x61` is left to key-code parsing.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
        if digits.len() < 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self)
    }

    /// Names of every named button present in this set, in bit order.
    pub fn names(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(b, _)| self.contains(*b))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for PadButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PadButtons {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for PadButtons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        let named = names
            .iter()
            .filter_map(|n| Self::from_name(n))
            .fold(Self::NONE, |acc, b| acc | b);
        let rest = self.0 & !named.0;
        let mut parts: Vec<String> = names.iter().map(|n| (*n).to_string()).collect();
        if rest != 0 || parts.is_empty() {
            parts.push(format!("{:#06x}", rest));
        }
        f.write_str(&parts.join("+"))
    }
}
