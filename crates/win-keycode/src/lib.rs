//! win-keycode: Windows virtual-key codes, XInput button masks and binding specs.
//!
//! - `Key`: Enum of Windows virtual-key codes (`repr(u8)`), named after the
//!   `VK_*` constants from `WinUser.h`.
//! - `PadButtons`: XInput button bitmask, with the analog triggers folded in as
//!   two synthetic bits above the 16-bit `wButtons` range.
//! - `InputBinding`: either a single key or a chord of pad buttons, parsed from
//!   spec strings such as `VK_NUMPAD1` or `XINPUT_GAMEPAD_A+XINPUT_GAMEPAD_B`.

mod binding;
mod error;
mod key;
mod pad;
mod spec;

pub use binding::InputBinding;
pub use error::ParseError;
pub use key::Key;
pub use pad::{PadButtons, TRIGGER_THRESHOLD};
