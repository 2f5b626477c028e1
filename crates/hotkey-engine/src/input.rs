//! Per-tick input snapshots and the sources that produce them.

use win_keycode::{InputBinding, Key, PadButtons};

/// Set of virtual keys, one bit per possible code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySet([u64; 4]);

impl KeySet {
    /// An empty set.
    pub const fn new() -> Self {
        Self([0; 4])
    }

    /// Word index and bit mask for a key.
    fn slot(key: Key) -> (usize, u64) {
        let code = usize::from(key.code());
        (code / 64, 1u64 << (code % 64))
    }

    /// Mark a key as down.
    pub fn insert(&mut self, key: Key) {
        let (word, bit) = Self::slot(key);
        self.0[word] |= bit;
    }

    /// Mark a key as up.
    pub fn remove(&mut self, key: Key) {
        let (word, bit) = Self::slot(key);
        self.0[word] &= !bit;
    }

    /// True when the key is down.
    pub fn contains(&self, key: Key) -> bool {
        let (word, bit) = Self::slot(key);
        self.0[word] & bit != 0
    }

    /// True when no key is down.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|w| *w == 0)
    }

    /// Keys in the set, in code order.
    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.iter().copied().filter(|k| self.contains(*k))
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = Self::new();
        for k in iter {
            set.insert(k);
        }
        set
    }
}

/// Input state captured once per tick.
///
/// `gamepad` is `None` when no controller answered this tick; pad bindings
/// cannot match then, whatever their mask.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Keys currently down.
    keys: KeySet,
    /// Combined controller buttons, triggers already folded in.
    gamepad: Option<PadButtons>,
}

impl InputSnapshot {
    /// A snapshot with nothing pressed and no controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot with the given keys down and no controller.
    pub fn with_keys<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            gamepad: None,
        }
    }

    /// Builder: attach a controller reporting `buttons`.
    pub fn with_gamepad(mut self, buttons: PadButtons) -> Self {
        self.gamepad = Some(buttons);
        self
    }

    /// Mark a key as down.
    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    /// Replace the controller state; `None` means no controller present.
    pub fn set_gamepad(&mut self, buttons: Option<PadButtons>) {
        self.gamepad = buttons;
    }

    /// True when `key` is down.
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(key)
    }

    /// True when a controller answered this tick.
    pub fn gamepad_present(&self) -> bool {
        self.gamepad.is_some()
    }

    /// Combined controller buttons, empty when no controller is present.
    pub fn gamepad_buttons(&self) -> PadButtons {
        self.gamepad.unwrap_or(PadButtons::NONE)
    }

    /// Keys currently down.
    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    /// True when `binding` is satisfied by this snapshot.
    ///
    /// Key bindings need the key down. Pad bindings need a controller present
    /// and every bit of the mask set; an empty mask never matches.
    pub fn is_active(&self, binding: &InputBinding) -> bool {
        match binding {
            InputBinding::Key(k) => self.is_key_down(*k),
            InputBinding::Pad(mask) => self.gamepad.is_some_and(|b| b.contains(*mask)),
        }
    }
}

/// Produces one snapshot per tick.
///
/// Chosen once at startup and injected into the host loop; swapping the input
/// mechanism means constructing a different source, never mutating a global.
pub trait InputSource {
    /// Capture the current input state.
    fn sample(&mut self) -> InputSnapshot;
}

impl<F> InputSource for F
where
    F: FnMut() -> InputSnapshot,
{
    fn sample(&mut self) -> InputSnapshot {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyset_covers_all_words() {
        let mut set = KeySet::new();
        assert!(set.is_empty());
        for k in [Key::LButton, Key::A, Key::Numpad1, Key::F24, Key::Oem7] {
            set.insert(k);
            assert!(set.contains(k));
        }
        assert!(!set.contains(Key::B));
        set.remove(Key::A);
        assert!(!set.contains(Key::A));
        let keys: Vec<Key> = set.iter().collect();
        assert_eq!(keys, vec![Key::LButton, Key::Numpad1, Key::F24, Key::Oem7]);
    }

    #[test]
    fn key_binding_matches_key_state() {
        let snap = InputSnapshot::with_keys([Key::Numpad3]);
        assert!(snap.is_active(&InputBinding::Key(Key::Numpad3)));
        assert!(!snap.is_active(&InputBinding::Key(Key::Numpad4)));
    }

    #[test]
    fn pad_binding_needs_controller_and_full_mask() {
        let chord = InputBinding::Pad(PadButtons::LEFT_SHOULDER | PadButtons::A);

        let absent = InputSnapshot::new();
        assert!(!absent.is_active(&chord));
        assert_eq!(absent.gamepad_buttons(), PadButtons::NONE);

        let partial = InputSnapshot::new().with_gamepad(PadButtons::A);
        assert!(!partial.is_active(&chord));

        let full = InputSnapshot::new()
            .with_gamepad(PadButtons::A | PadButtons::LEFT_SHOULDER | PadButtons::B);
        assert!(full.is_active(&chord));
        assert!(full.gamepad_present());
    }

    #[test]
    fn empty_pad_binding_never_matches() {
        let snap = InputSnapshot::new().with_gamepad(PadButtons::from_bits(u32::MAX));
        assert!(!snap.is_active(&InputBinding::Pad(PadButtons::NONE)));
    }

    #[test]
    fn closures_are_sources() {
        let mut n = 0;
        let mut source = || {
            n += 1;
            if n % 2 == 0 {
                InputSnapshot::with_keys([Key::Space])
            } else {
                InputSnapshot::new()
            }
        };
        assert!(!source.sample().is_key_down(Key::Space));
        assert!(source.sample().is_key_down(Key::Space));
    }
}
