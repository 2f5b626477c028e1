use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Expands the virtual-key table into the `Key` enum plus its name and code lookups.
macro_rules! vk_table {
    ( $( $variant:ident = $code:literal => $name:literal, )* ) => {
        /// A Windows virtual-key code.
        ///
        /// Discriminants are the exact `VK_*` values. Letters and digits use the
        /// ASCII codes Windows assigns them (`VK_A` = 0x41, `VK_0` = 0x30).
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        #[allow(missing_docs)]
        pub enum Key {
            $( $variant = $code, )*
        }

        impl Key {
            /// Every known key, in ascending code order.
            pub const ALL: &'static [Key] = &[ $( Key::$variant, )* ];

            /// The canonical `VK_*` name of this key.
            pub fn name(self) -> &'static str {
                match self {
                    $( Key::$variant => $name, )*
                }
            }

            /// Look up a key by its `VK_*` name (case-insensitive).
            pub fn from_name(s: &str) -> Option<Self> {
                $(
                    if s.eq_ignore_ascii_case($name) {
                        return Some(Key::$variant);
                    }
                )*
                None
            }

            /// Look up a key by its numeric virtual-key code.
            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $( $code => Some(Key::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

vk_table! {
    LButton = 0x01 => "VK_LBUTTON",
    RButton = 0x02 => "VK_RBUTTON",
    Cancel = 0x03 => "VK_CANCEL",
    MButton = 0x04 => "VK_MBUTTON",
    XButton1 = 0x05 => "VK_XBUTTON1",
    XButton2 = 0x06 => "VK_XBUTTON2",
    Back = 0x08 => "VK_BACK",
    Tab = 0x09 => "VK_TAB",
    Clear = 0x0C => "VK_CLEAR",
    Return = 0x0D => "VK_RETURN",
    Shift = 0x10 => "VK_SHIFT",
    Control = 0x11 => "VK_CONTROL",
    Menu = 0x12 => "VK_MENU",
    Pause = 0x13 => "VK_PAUSE",
    Capital = 0x14 => "VK_CAPITAL",
    Escape = 0x1B => "VK_ESCAPE",
    Space = 0x20 => "VK_SPACE",
    Prior = 0x21 => "VK_PRIOR",
    Next = 0x22 => "VK_NEXT",
    End = 0x23 => "VK_END",
    Home = 0x24 => "VK_HOME",
    Left = 0x25 => "VK_LEFT",
    Up = 0x26 => "VK_UP",
    Right = 0x27 => "VK_RIGHT",
    Down = 0x28 => "VK_DOWN",
    Select = 0x29 => "VK_SELECT",
    Print = 0x2A => "VK_PRINT",
    Execute = 0x2B => "VK_EXECUTE",
    Snapshot = 0x2C => "VK_SNAPSHOT",
    Insert = 0x2D => "VK_INSERT",
    Delete = 0x2E => "VK_DELETE",
    Help = 0x2F => "VK_HELP",
    Digit0 = 0x30 => "VK_0",
    Digit1 = 0x31 => "VK_1",
    Digit2 = 0x32 => "VK_2",
    Digit3 = 0x33 => "VK_3",
    Digit4 = 0x34 => "VK_4",
    Digit5 = 0x35 => "VK_5",
    Digit6 = 0x36 => "VK_6",
    Digit7 = 0x37 => "VK_7",
    Digit8 = 0x38 => "VK_8",
    Digit9 = 0x39 => "VK_9",
    A = 0x41 => "VK_A",
    B = 0x42 => "VK_B",
    C = 0x43 => "VK_C",
    D = 0x44 => "VK_D",
    E = 0x45 => "VK_E",
    F = 0x46 => "VK_F",
    G = 0x47 => "VK_G",
    H = 0x48 => "VK_H",
    I = 0x49 => "VK_I",
    J = 0x4A => "VK_J",
    K = 0x4B => "VK_K",
    L = 0x4C => "VK_L",
    M = 0x4D => "VK_M",
    N = 0x4E => "VK_N",
    O = 0x4F => "VK_O",
    P = 0x50 => "VK_P",
    Q = 0x51 => "VK_Q",
    R = 0x52 => "VK_R",
    S = 0x53 => "VK_S",
    T = 0x54 => "VK_T",
    U = 0x55 => "VK_U",
    V = 0x56 => "VK_V",
    W = 0x57 => "VK_W",
    X = 0x58 => "VK_X",
    Y = 0x59 => "VK_Y",
    Z = 0x5A => "VK_Z",
    LWin = 0x5B => "VK_LWIN",
    RWin = 0x5C => "VK_RWIN",
    Apps = 0x5D => "VK_APPS",
    Sleep = 0x5F => "VK_SLEEP",
    Numpad0 = 0x60 => "VK_NUMPAD0",
    Numpad1 = 0x61 => "VK_NUMPAD1",
    Numpad2 = 0x62 => "VK_NUMPAD2",
    Numpad3 = 0x63 => "VK_NUMPAD3",
    Numpad4 = 0x64 => "VK_NUMPAD4",
    Numpad5 = 0x65 => "VK_NUMPAD5",
    Numpad6 = 0x66 => "VK_NUMPAD6",
    Numpad7 = 0x67 => "VK_NUMPAD7",
    Numpad8 = 0x68 => "VK_NUMPAD8",
    Numpad9 = 0x69 => "VK_NUMPAD9",
    Multiply = 0x6A => "VK_MULTIPLY",
    Add = 0x6B => "VK_ADD",
    Separator = 0x6C => "VK_SEPARATOR",
    Subtract = 0x6D => "VK_SUBTRACT",
    Decimal = 0x6E => "VK_DECIMAL",
    Divide = 0x6F => "VK_DIVIDE",
    F1 = 0x70 => "VK_F1",
    F2 = 0x71 => "VK_F2",
    F3 = 0x72 => "VK_F3",
    F4 = 0x73 => "VK_F4",
    F5 = 0x74 => "VK_F5",
    F6 = 0x75 => "VK_F6",
    F7 = 0x76 => "VK_F7",
    F8 = 0x77 => "VK_F8",
    F9 = 0x78 => "VK_F9",
    F10 = 0x79 => "VK_F10",
    F11 = 0x7A => "VK_F11",
    F12 = 0x7B => "VK_F12",
    F13 = 0x7C => "VK_F13",
    F14 = 0x7D => "VK_F14",
    F15 = 0x7E => "VK_F15",
    F16 = 0x7F => "VK_F16",
    F17 = 0x80 => "VK_F17",
    F18 = 0x81 => "VK_F18",
    F19 = 0x82 => "VK_F19",
    F20 = 0x83 => "VK_F20",
    F21 = 0x84 => "VK_F21",
    F22 = 0x85 => "VK_F22",
    F23 = 0x86 => "VK_F23",
    F24 = 0x87 => "VK_F24",
    NumLock = 0x90 => "VK_NUMLOCK",
    Scroll = 0x91 => "VK_SCROLL",
    LShift = 0xA0 => "VK_LSHIFT",
    RShift = 0xA1 => "VK_RSHIFT",
    LControl = 0xA2 => "VK_LCONTROL",
    RControl = 0xA3 => "VK_RCONTROL",
    LMenu = 0xA4 => "VK_LMENU",
    RMenu = 0xA5 => "VK_RMENU",
    VolumeMute = 0xAD => "VK_VOLUME_MUTE",
    VolumeDown = 0xAE => "VK_VOLUME_DOWN",
    VolumeUp = 0xAF => "VK_VOLUME_UP",
    MediaNextTrack = 0xB0 => "VK_MEDIA_NEXT_TRACK",
    MediaPrevTrack = 0xB1 => "VK_MEDIA_PREV_TRACK",
    MediaStop = 0xB2 => "VK_MEDIA_STOP",
    MediaPlayPause = 0xB3 => "VK_MEDIA_PLAY_PAUSE",
    Oem1 = 0xBA => "VK_OEM_1",
    OemPlus = 0xBB => "VK_OEM_PLUS",
    OemComma = 0xBC => "VK_OEM_COMMA",
    OemMinus = 0xBD => "VK_OEM_MINUS",
    OemPeriod = 0xBE => "VK_OEM_PERIOD",
    Oem2 = 0xBF => "VK_OEM_2",
    Oem3 = 0xC0 => "VK_OEM_3",
    Oem4 = 0xDB => "VK_OEM_4",
    Oem5 = 0xDC => "VK_OEM_5",
    Oem6 = 0xDD => "VK_OEM_6",
    Oem7 = 0xDE => "VK_OEM_7",
}

impl Key {
    /// The raw virtual-key code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_spec(&s).ok_or_else(|| de::Error::custom(format!("unknown key '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_winuser() {
        assert_eq!(Key::Numpad1.code(), 0x61);
        assert_eq!(Key::F24.code(), 0x87);
        assert_eq!(Key::A.code(), b'A');
        assert_eq!(Key::Digit7.code(), b'7');
        assert_eq!(Key::Oem7.code(), 0xDE);
    }

    #[test]
    fn code_lookup_is_total_over_table() {
        for k in Key::ALL {
            assert_eq!(Key::from_code(k.code()), Some(*k), "code lookup for {}", k);
            assert_eq!(Key::from_name(k.name()), Some(*k), "name lookup for {}", k);
        }
        assert_eq!(Key::from_code(0x00), None);
        assert_eq!(Key::from_code(0xFF), None);
    }

    #[test]
    fn table_is_sorted_and_unique() {
        for pair in Key::ALL.windows(2) {
            assert!(pair[0].code() < pair[1].code(), "{} before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&Key::Numpad5).unwrap();
        assert_eq!(json, "\"VK_NUMPAD5\"");
        let back: Key = serde_json::from_str("\"vk_numpad5\"").unwrap();
        assert_eq!(back, Key::Numpad5);
        assert!(serde_json::from_str::<Key>("\"VK_NOPE\"").is_err());
    }
}
