//! Stereo profiles: the JSON files that configure base parameters and hotkey slots.

use std::{
    env,
    path::{Path, PathBuf},
};

mod defaults;
mod error;
mod loader;
mod types;
mod validation;

#[cfg(test)]
mod test_parse;

pub use defaults::{DEFAULT_PROFILE_FILE, PROFILE_SUFFIX, TOLERANCE, default_profile};
pub use error::{Error, excerpt_at};
pub use loader::{ensure_default_config, load_from_path, load_from_str, save_to_path, to_json_string};
pub use types::{HotkeyMode, HotkeySpec, Profile};
pub use win_keycode::InputBinding;

/// Name of the per-user profile directory.
const CONFIG_DIR_NAME: &str = ".stereo-hotkeys";

/// Determine the per-user profile directory (`~/.stereo-hotkeys`).
///
/// Falls back to `USERPROFILE` when `HOME` is not set.
pub fn config_dir() -> PathBuf {
    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .unwrap_or_default();
    let mut p = PathBuf::from(home);
    p.push(CONFIG_DIR_NAME);
    p
}

/// Determine the default profile path (`~/.stereo-hotkeys/default_config.json`).
pub fn default_config_path() -> PathBuf {
    config_dir().join(DEFAULT_PROFILE_FILE)
}

/// The profile file for an application key inside `dir` (`<app_key>_config.json`).
pub fn profile_path(dir: &Path, app_key: &str) -> PathBuf {
    dir.join(format!("{}{}", app_key, PROFILE_SUFFIX))
}

/// Resolve the effective profile path using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use `~/.stereo-hotkeys/default_config.json` when it exists.
/// 3) Else return a clear "no profile found" error pointing at `init`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let preferred = default_config_path();
    if preferred.exists() {
        return Ok(preferred);
    }

    Err(Error::Read {
        path: Some(preferred),
        message: "No profile found. Run `stereo-hotkeys init` to create the default profile"
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_path_appends_suffix() {
        let p = profile_path(Path::new("/tmp/profiles"), "steam.app.620");
        assert_eq!(p, PathBuf::from("/tmp/profiles/steam.app.620_config.json"));
    }

    #[test]
    fn explicit_path_wins() {
        let p = resolve_config_path(Some(Path::new("custom.json"))).unwrap();
        assert_eq!(p, PathBuf::from("custom.json"));
    }
}
