//! Error types for profile loading, validation and saving.

use std::{
    cmp::{max, min},
    fmt::Write as _,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error, Clone)]
/// Errors produced while loading, parsing, validating or saving a profile.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// JSON syntax or type error with a concrete line/column location and excerpt.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Human-readable error message.
        message: String,
        /// Rendered excerpt including a caret at the error location.
        excerpt: String,
    },
    #[error("{message}")]
    /// A well-formed profile whose values are rejected.
    Validation {
        /// Optional path associated with the validation error.
        path: Option<PathBuf>,
        /// Index of the offending `user_settings` entry, when there is one.
        entry: Option<usize>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// A profile could not be rendered as JSON.
    Encode {
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// Failure writing a profile back to disk.
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly error message including location and an excerpt when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse {
                path,
                line,
                col,
                message,
                excerpt,
            } => match path {
                Some(p) => format!(
                    "Profile parse error at {}:{}:{}\n{}\n{}",
                    p.display(),
                    line,
                    col,
                    message,
                    excerpt
                ),
                None => format!(
                    "Profile parse error at line {}, column {}\n{}\n{}",
                    line, col, message, excerpt
                ),
            },
            Self::Validation {
                path,
                entry,
                message,
            } => {
                let loc = entry
                    .map(|i| format!(" (user_settings[{}])", i))
                    .unwrap_or_default();
                match path {
                    Some(p) => format!(
                        "Profile validation error at {}{}\n{}",
                        p.display(),
                        loc,
                        message
                    ),
                    None => format!("Profile validation error{}\n{}", loc, message),
                }
            }
            Self::Encode { message } => format!("Profile encode error: {}", message),
            Self::Write { path, message } => {
                format!("Write error at {}: {}", path.display(), message)
            }
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                path.as_deref()
            }
            Self::Encode { .. } => None,
            Self::Write { path, .. } => Some(path.as_path()),
        }
    }

    /// Attach `path` to an error that was produced without one.
    pub(crate) fn with_path(self, p: &Path) -> Self {
        match self {
            Self::Read { path: None, message } => Self::Read {
                path: Some(p.to_path_buf()),
                message,
            },
            Self::Parse {
                path: None,
                line,
                col,
                message,
                excerpt,
            } => Self::Parse {
                path: Some(p.to_path_buf()),
                line,
                col,
                message,
                excerpt,
            },
            Self::Validation {
                path: None,
                entry,
                message,
            } => Self::Validation {
                path: Some(p.to_path_buf()),
                entry,
                message,
            },
            other => other,
        }
    }

    /// Build a `Parse` error from a `serde_json` failure against `source`.
    pub(crate) fn from_json(err: &serde_json::Error, source: &str, path: Option<&Path>) -> Self {
        let line = err.line().max(1);
        let col = err.column().max(1);
        Self::Parse {
            path: path.map(Path::to_path_buf),
            line,
            col,
            message: err.to_string(),
            excerpt: excerpt_at(source, line, col),
        }
    }
}

/// Build a small 2-3 line excerpt with a caret at `(line_no, col_no)`.
pub fn excerpt_at(source: &str, line_no: usize, col_no: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let total = lines.len();
    let start = max(1usize, line_no.saturating_sub(2));
    let end = min(total, line_no + 1);

    let mut out = String::new();
    for n in start..=end {
        let text = lines.get(n - 1).copied().unwrap_or("");
        let _ignored = writeln!(out, " {:>4} | {}", n, text);
        if n == line_no {
            let prefix = format!(" {:>4} | ", n);
            let _ignored = writeln!(
                out,
                "{}{}^",
                " ".repeat(prefix.len()),
                " ".repeat(col_no.saturating_sub(1))
            );
        }
    }
    out
}
