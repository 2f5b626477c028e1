//! Read, write and bootstrap profile files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{
    Map, Value,
    ser::{PrettyFormatter, Serializer},
};
use tracing::{debug, info};

use crate::{DEFAULT_PROFILE_FILE, Error, Profile, default_profile, validation::validate};

/// Indentation used when writing profiles.
const INDENT: &[u8] = b"    ";

/// Parse and validate a profile from JSON text.
///
/// `path` is only used to annotate errors.
pub fn load_from_str(source: &str, path: Option<&Path>) -> Result<Profile, Error> {
    let mut profile: Profile =
        serde_json::from_str(source).map_err(|e| Error::from_json(&e, source, path))?;
    let raw: Map<String, Value> =
        serde_json::from_str(source).map_err(|e| Error::from_json(&e, source, path))?;
    profile.extra = raw
        .into_iter()
        .filter(|(k, _)| !Profile::KNOWN_FIELDS.contains(&k.as_str()))
        .collect();
    validate(&profile).map_err(|e| match path {
        Some(p) => e.with_path(p),
        None => e,
    })?;
    Ok(profile)
}

/// Load a profile from a JSON file at `path`.
pub fn load_from_path(path: &Path) -> Result<Profile, Error> {
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let profile = load_from_str(&source, Some(path))?;
    debug!(
        path = %path.display(),
        slots = profile.user_settings.len(),
        "profile_loaded"
    );
    Ok(profile)
}

/// Serialized form of a profile: interpreted fields in declaration order,
/// followed by the preserved `extra` keys in the order they were read.
#[derive(Serialize)]
struct ProfileOut<'a> {
    /// Interpreted fields; `extra` itself is skipped by `Profile`.
    #[serde(flatten)]
    profile: &'a Profile,
    /// Preserved top-level keys that do not shadow an interpreted field.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Render a profile as pretty-printed JSON with four-space indentation.
///
/// Values are written with their own precision, so an `f32` depth of `0.065`
/// prints as `0.065`. An interpreted field always wins over an `extra` entry
/// of the same name.
pub fn to_json_string(profile: &Profile) -> Result<String, Error> {
    let extra = profile
        .extra
        .iter()
        .filter(|(k, _)| !Profile::KNOWN_FIELDS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let out = ProfileOut { profile, extra };

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    out.serialize(&mut ser).map_err(|e| Error::Encode {
        message: e.to_string(),
    })?;
    String::from_utf8(buf).map_err(|e| Error::Encode {
        message: e.to_string(),
    })
}

/// Write `profile` to `path`, creating parent directories as needed.
pub fn save_to_path(profile: &Profile, path: &Path) -> Result<(), Error> {
    let write_err = |message: String| Error::Write {
        path: path.to_path_buf(),
        message,
    };
    let mut text = to_json_string(profile).map_err(|e| write_err(e.to_string()))?;
    text.push('\n');
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }
    fs::write(path, text).map_err(|e| write_err(e.to_string()))?;
    info!(path = %path.display(), "profile_saved");
    Ok(())
}

/// Write the default profile into `dir` unless one is already there.
///
/// Returns the path of the default profile either way.
pub fn ensure_default_config(dir: &Path) -> Result<PathBuf, Error> {
    let path = dir.join(DEFAULT_PROFILE_FILE);
    if path.exists() {
        debug!(path = %path.display(), "default_profile_present");
        return Ok(path);
    }
    save_to_path(&default_profile(), &path)?;
    info!(path = %path.display(), "default_profile_created");
    Ok(path)
}
