use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Errors surfaced by the `stereo-hotkeys` commands.
#[derive(Debug, Error)]
pub enum Error {
    /// Loading, validating or saving a profile failed.
    #[error(transparent)]
    Config(#[from] config::Error),

    /// A replay trace could not be read or parsed.
    #[error("trace {path}: {message}")]
    Trace {
        /// Trace file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// A trace frame names a controller button that does not exist.
    #[error("trace frame {frame}: unknown controller button '{name}'")]
    UnknownButton {
        /// Zero-based frame index.
        frame: usize,
        /// The offending name.
        name: String,
    },

    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] io::Error),

    /// Poll rate must be a positive, finite number of hertz.
    #[error("invalid poll rate {0} Hz")]
    Rate(f64),
}

impl Error {
    /// Human-friendly rendering for the terminal.
    ///
    /// Profile errors keep their source excerpt; everything else uses `Display`.
    pub fn pretty(&self) -> String {
        match self {
            Self::Config(e) => e.pretty(),
            other => other.to_string(),
        }
    }
}

/// Result alias for host operations.
pub type Result<T> = StdResult<T, Error>;
