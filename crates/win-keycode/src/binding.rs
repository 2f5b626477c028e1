use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{Key, PadButtons, ParseError};

/// A physical input that can trigger a hotkey.
///
/// Keyboard bindings name exactly one virtual key. Gamepad bindings name one or
/// more XInput buttons joined with `+`, all of which must be held together.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InputBinding {
    /// A keyboard virtual key.
    Key(Key),
    /// A chord of gamepad buttons, matched by full containment.
    Pad(PadButtons),
}

impl InputBinding {
    /// Parses a binding spec of the form `VK_NUMPAD1` or
    /// `XINPUT_GAMEPAD_LEFT_SHOULDER+XINPUT_GAMEPAD_A`.
    ///
    /// - Components are separated by `+` and trimmed.
    /// - Gamepad button names are tried first, so `XINPUT_GAMEPAD_BACK` is a pad
    ///   button rather than a key alias.
    /// - Bits without a name are written as a hex mask of four or more digits
    ///   (`XINPUT_GAMEPAD_A+0x0800`), which is how `to_spec` prints them.
    /// - A key may only appear alone.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let spec = s.trim();
        if spec.is_empty() {
            return Err(ParseError::Empty {
                spec: s.to_string(),
            });
        }

        let mut pad = PadButtons::NONE;
        let mut key: Option<Key> = None;
        let mut parts = 0usize;
        for raw in spec.split('+') {
            let part = raw.trim();
            if part.is_empty() {
                return Err(ParseError::Empty {
                    spec: spec.to_string(),
                });
            }
            parts += 1;
            if let Some(b) = PadButtons::from_name(part).or_else(|| PadButtons::from_hex(part)) {
                pad |= b;
            } else if let Some(k) = Key::from_spec(part) {
                if key.is_some() {
                    return Err(ParseError::MixedBinding {
                        spec: spec.to_string(),
                    });
                }
                key = Some(k);
            } else {
                return Err(ParseError::UnknownName {
                    name: part.to_string(),
                    spec: spec.to_string(),
                });
            }
        }

        match key {
            Some(k) if parts == 1 => Ok(Self::Key(k)),
            Some(_) => Err(ParseError::MixedBinding {
                spec: spec.to_string(),
            }),
            None => Ok(Self::Pad(pad)),
        }
    }

    /// True for gamepad bindings.
    pub fn is_pad(&self) -> bool {
        matches!(self, Self::Pad(_))
    }

    /// True when the binding can never match (a gamepad binding with no buttons).
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Pad(p) if p.is_empty())
    }

    /// Canonical spec string for this binding.
    pub fn to_spec(&self) -> String {
        match self {
            Self::Key(k) => k.to_spec(),
            Self::Pad(p) => p.to_string(),
        }
    }
}

impl fmt::Display for InputBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_spec())
    }
}

impl FromStr for InputBinding {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Key> for InputBinding {
    fn from(k: Key) -> Self {
        Self::Key(k)
    }
}

impl From<PadButtons> for InputBinding {
    fn from(p: PadButtons) -> Self {
        Self::Pad(p)
    }
}

impl Serialize for InputBinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_spec())
    }
}

impl<'de> Deserialize<'de> for InputBinding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}
