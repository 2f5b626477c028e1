//! Semantic checks applied after a profile parses.

use tracing::warn;
use win_keycode::InputBinding;

use crate::{Error, Profile};

/// Build a validation error without a path.
fn invalid(entry: Option<usize>, message: String) -> Error {
    Error::Validation {
        path: None,
        entry,
        message,
    }
}

/// Reject values the hotkey engine must never see.
///
/// Overlapping gamepad chords are allowed: the engine evaluates slots in
/// order, so the outcome is deterministic. They are reported at `warn`.
pub(crate) fn validate(profile: &Profile) -> Result<(), Error> {
    if !(profile.display_frequency.is_finite() && profile.display_frequency > 0.0) {
        return Err(invalid(
            None,
            format!(
                "display_frequency must be a positive number, got {}",
                profile.display_frequency
            ),
        ));
    }
    if let Some(tol) = profile.tolerance
        && !(tol.is_finite() && tol > 0.0)
    {
        return Err(invalid(
            None,
            format!("tolerance must be a positive number, got {}", tol),
        ));
    }
    check_params(None, profile.depth, profile.convergence)?;

    for (i, spec) in profile.user_settings.iter().enumerate() {
        check_binding(i, "user_load_key", &spec.user_load_key)?;
        check_binding(i, "user_store_key", &spec.user_store_key)?;
        check_params(Some(i), spec.user_depth, spec.user_convergence)?;

        for (j, earlier) in profile.user_settings[..i].iter().enumerate() {
            if earlier.user_load_key == spec.user_load_key {
                return Err(invalid(
                    Some(i),
                    format!(
                        "user_load_key {} is already bound by user_settings[{}]",
                        spec.user_load_key, j
                    ),
                ));
            }
            if let (InputBinding::Pad(a), InputBinding::Pad(b)) =
                (earlier.user_load_key, spec.user_load_key)
                && a.intersects(b)
            {
                warn!(
                    first = j,
                    second = i,
                    "overlapping gamepad bindings {} and {}; slot order decides",
                    a,
                    b
                );
            }
        }
    }
    Ok(())
}

/// Depth must be a non-negative finite number, convergence any finite number.
fn check_params(entry: Option<usize>, depth: f32, convergence: f32) -> Result<(), Error> {
    if !(depth.is_finite() && depth >= 0.0) {
        return Err(invalid(
            entry,
            format!("depth must be a non-negative number, got {}", depth),
        ));
    }
    if !convergence.is_finite() {
        return Err(invalid(
            entry,
            format!("convergence must be a finite number, got {}", convergence),
        ));
    }
    Ok(())
}

/// A binding that can never match is a configuration mistake.
fn check_binding(entry: usize, field: &str, binding: &InputBinding) -> Result<(), Error> {
    if binding.is_empty() {
        return Err(invalid(
            Some(entry),
            format!("{} names no buttons", field),
        ));
    }
    Ok(())
}
