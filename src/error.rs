//! Error types for dictionary rendering, case conversion and command execution.
//!
//! This module provides error reporting with enough context to find the
//! offending entry in the source document.
//!
//! ## Error Categories
//!
//! - **Rendering Errors**: a value that has no dictionary representation
//!   ([`Error::UnsupportedValueKind`]) or a list element with more than one
//!   head label ([`Error::MalformedListElement`])
//! - **Loading Errors**: YAML/JSON/TOML parse failures and unknown file suffixes
//! - **Case Errors**: missing sections, bad static entries, invalid versions
//! - **Command Errors**: failed spawns and commands that have already run
//!
//! ## Error Context
//!
//! Rendering errors carry the key path of the offending value, joined with
//! `/` the same way output files are laid out on disk.
//!
//! ## Examples
//!
//! ```rust
//! use serde_foam::{format_value, Error, FoamValue};
//!
//! let err = format_value(&FoamValue::Null).unwrap_err();
//! assert!(matches!(err, Error::UnsupportedValueKind { .. }));
//! assert!(err.to_string().contains("null"));
//! ```

use crate::FoamValue;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A value whose kind has no dictionary representation
    #[error("Unsupported value kind `{kind}` at `{path}`: {value}")]
    UnsupportedValueKind {
        kind: String,
        path: String,
        /// JSON rendering of the value, cut to [`VALUE_PREVIEW_CHARS`] characters
        value: String,
    },

    /// A mapping-sequence element with more than one head label
    #[error("Malformed list element at `{path}`: at most one head label allowed, found {}", heads.join(", "))]
    MalformedListElement { path: String, heads: Vec<String> },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// YAML document could not be parsed
    #[error("YAML error: {0}")]
    Yaml(String),

    /// JSON document could not be parsed
    #[error("JSON error: {0}")]
    Json(String),

    /// TOML document could not be parsed
    #[error("TOML error: {0}")]
    Toml(String),

    /// File suffix or format name is not recognised
    #[error("Unsupported format \"{0}\"")]
    UnsupportedFormat(String),

    /// A section or key the operation depends on is absent
    #[error("Missing entry: {0}")]
    MissingSection(String),

    /// Static entry with an unknown type or unusable data
    #[error("Static entry `{name}`: {msg}")]
    Static { name: String, msg: String },

    /// Subprocess could not be started or waited for
    #[error("Command `{command}` failed: {msg}")]
    Command { command: String, msg: String },

    /// A pipeline command whose log file already exists
    #[error("{program} already run on {directory}: remove log file \"{log}\" to re-run")]
    AlreadyRun {
        program: String,
        directory: String,
        log: String,
    },

    /// Version string is not `major.minor[.other]`
    #[error("\"{0}\" is not a valid version string")]
    InvalidVersion(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates an unsupported value error for `value`, of kind `kind`,
    /// found at `path`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::{foam, Error};
    ///
    /// let err = Error::unsupported_value("null", &foam!(null), &["boundaryField", "inlet"]);
    /// assert!(err.to_string().contains("boundaryField/inlet"));
    /// assert!(err.to_string().ends_with(": null"));
    /// ```
    pub fn unsupported_value<S: AsRef<str>>(kind: &str, value: &FoamValue, path: &[S]) -> Self {
        Error::UnsupportedValueKind {
            kind: kind.to_string(),
            path: join_path(path),
            value: preview(value),
        }
    }

    /// Creates a malformed list element error listing every head label found.
    pub fn malformed_list_element<S: AsRef<str>>(path: &[S], heads: Vec<String>) -> Self {
        Error::MalformedListElement {
            path: join_path(path),
            heads,
        }
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an error for a static entry.
    pub fn static_entry(name: &str, msg: &str) -> Self {
        Error::Static {
            name: name.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a subprocess.
    pub fn command(command: &str, msg: &str) -> Self {
        Error::Command {
            command: command.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a missing entry error.
    pub fn missing(what: &str) -> Self {
        Error::MissingSection(what.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

/// Longest value rendering kept in [`Error::UnsupportedValueKind`].
pub const VALUE_PREVIEW_CHARS: usize = 64;

fn preview(value: &FoamValue) -> String {
    let text = serde_json::to_string(value).unwrap_or_else(|_| value.kind().to_string());
    match text.char_indices().nth(VALUE_PREVIEW_CHARS) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text,
    }
}

fn join_path<S: AsRef<str>>(path: &[S]) -> String {
    if path.is_empty() {
        return "<root>".to_string();
    }
    path.iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("/")
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_display() {
        let empty: [&str; 0] = [];
        let err = Error::unsupported_value("null", &FoamValue::Null, &empty);
        assert_eq!(err.to_string(), "Unsupported value kind `null` at `<root>`: null");
    }

    #[test]
    fn test_value_preview_is_truncated() {
        let long = FoamValue::Array(vec![FoamValue::from("x".repeat(200)), FoamValue::Null]);
        match Error::unsupported_value("sequence of string", &long, &["a"]) {
            Error::UnsupportedValueKind { value, .. } => {
                assert!(value.starts_with("[\"xxx"));
                assert!(value.ends_with("..."));
                assert_eq!(value.chars().count(), VALUE_PREVIEW_CHARS + 3);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_malformed_lists_heads() {
        let err = Error::malformed_list_element(
            &["regions", "0"],
            vec!["a".to_string(), "b".to_string()],
        );
        let msg = err.to_string();
        assert!(msg.contains("regions/0"));
        assert!(msg.contains("a, b"));
    }

    #[test]
    fn test_already_run_message() {
        let err = Error::AlreadyRun {
            program: "blockMesh".to_string(),
            directory: "/tmp/cavity".to_string(),
            log: "log.blockMesh".to_string(),
        };
        assert!(err.to_string().contains("remove log file \"log.blockMesh\""));
    }
}
