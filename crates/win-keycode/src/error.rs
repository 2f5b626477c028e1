use thiserror::Error;

/// Errors produced while parsing a binding spec string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The spec string was empty or contained an empty `+` component.
    #[error("empty binding spec '{spec}'")]
    Empty {
        /// The offending spec.
        spec: String,
    },

    /// A component matched neither a key nor a gamepad button name.
    #[error("unknown key or button '{name}' in '{spec}'")]
    UnknownName {
        /// The unrecognised component.
        name: String,
        /// The full spec it appeared in.
        spec: String,
    },

    /// A chord mixed a keyboard key with gamepad buttons, or named several keys.
    #[error("binding '{spec}' must be a single key or a chord of gamepad buttons")]
    MixedBinding {
        /// The offending spec.
        spec: String,
    },
}
