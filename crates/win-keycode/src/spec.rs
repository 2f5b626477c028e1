use crate::Key;

/// Prefix shared by every canonical key name.
const VK_PREFIX: &str = "VK_";

// Aliases that only apply to parsing specs (not emitted by to_spec).
macro_rules! key_spec_aliases {
    ($m:ident, $arg:expr) => {
        $m! { $arg,
            Return => "enter",
            Escape => "esc",
            Back => "backspace",
            Menu => "alt",
            Control => "ctrl",
            Capital => "capslock",
            Prior => "pageup",
            Prior => "pgup",
            Next => "pagedown",
            Next => "pgdn",
            Delete => "del",
            Insert => "ins",
            Snapshot => "printscreen",
            Add => "plus",
            Subtract => "minus",
        }
    };
}

macro_rules! from_spec_match {
    ( $s:expr, $( $k:ident => $v:expr, )* ) => {{
        match $s {
            $( $v => Some(Key::$k), )*
            _ => None,
        }
    }}
}

/// Parse a numeric virtual-key code written as hex (`0x61`) or decimal (`97`).
fn parse_code(s: &str) -> Option<u8> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).ok()
    } else if s.chars().all(|c| c.is_ascii_digit()) && s.len() > 1 {
        s.parse().ok()
    } else {
        None
    }
}

/// Parses a key specification into a `Key`.
///
/// Tries, in order: the full `VK_*` name, the name without its `VK_` prefix,
/// a numeric code (multi-digit decimal or `0x` hex), then the alias words.
/// Single letters and digits resolve through the prefix-less name (`"a"` is
/// `VK_A`, `"1"` is `VK_1`).
pub fn from_spec(s: &str) -> Option<Key> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(k) = Key::from_name(s) {
        return Some(k);
    }
    if let Some(k) = Key::from_name(&format!("{}{}", VK_PREFIX, s)) {
        return Some(k);
    }
    if let Some(code) = parse_code(s) {
        return Key::from_code(code);
    }
    let lowered = s.to_ascii_lowercase();
    key_spec_aliases!(from_spec_match, lowered.as_str())
}

impl Key {
    /// Parses a key specification string into a `Key`.
    ///
    /// Accepts canonical names (`VK_NUMPAD1`, any case), bare names
    /// (`NUMPAD1`, `a`, `1`), numeric codes (`0x61`, `97`) and a handful of
    /// alias words such as `esc`, `enter` or `pgdn`.
    pub fn from_spec(s: &str) -> Option<Self> {
        from_spec(s)
    }

    /// Returns the canonical spec string for this key, its `VK_*` name.
    pub fn to_spec(self) -> String {
        self.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roundtrip(k: Key) {
        let spec = k.to_spec();
        assert_eq!(from_spec(&spec), Some(k), "roundtrip failed for {}", spec);
    }

    #[test]
    fn canonical_and_bare_names() {
        assert_roundtrip(Key::Numpad1);
        assert_eq!(from_spec("VK_NUMPAD1"), Some(Key::Numpad1));
        assert_eq!(from_spec("vk_numpad1"), Some(Key::Numpad1));
        assert_eq!(from_spec("NUMPAD1"), Some(Key::Numpad1));
        assert_eq!(from_spec(" numpad1 "), Some(Key::Numpad1));
    }

    #[test]
    fn letters_and_digits() {
        assert_roundtrip(Key::Q);
        assert_eq!(from_spec("q"), Some(Key::Q));
        assert_eq!(from_spec("Q"), Some(Key::Q));
        assert_eq!(from_spec("7"), Some(Key::Digit7));
        assert_eq!(Key::Digit7.to_spec(), "VK_7");
    }

    #[test]
    fn numeric_codes() {
        assert_eq!(from_spec("0x61"), Some(Key::Numpad1));
        assert_eq!(from_spec("0X70"), Some(Key::F1));
        assert_eq!(from_spec("97"), Some(Key::Numpad1));
        assert_eq!(from_spec("0x07"), None);
        assert_eq!(from_spec("0xZZ"), None);
    }

    #[test]
    fn aliases() {
        assert_eq!(from_spec("esc"), Some(Key::Escape));
        assert_eq!(from_spec("Enter"), Some(Key::Return));
        assert_eq!(from_spec("pgdn"), Some(Key::Next));
        assert_eq!(from_spec("alt"), Some(Key::Menu));
    }

    #[test]
    fn rejects_unknown() {
        assert_eq!(from_spec(""), None);
        assert_eq!(from_spec("   "), None);
        assert_eq!(from_spec("VK_NOPE"), None);
        assert_eq!(from_spec("XINPUT_GAMEPAD_A"), None);
    }
}
