//! Document loading.
//!
//! Case descriptions are written as YAML, JSON or TOML. YAML and JSON may
//! hold several documents: the first is the `meta` document, the rest are the sections it
//! lists under `order`. This module reads such streams into [`FoamValue`]s
//! while keeping mapping order intact.
//!
//! ## Usage
//!
//! ```rust
//! use serde_foam::from_yaml_str;
//!
//! let docs = from_yaml_str("order: [meta, foam]\n---\nsystem: {}\n").unwrap();
//! assert_eq!(docs.len(), 2);
//! assert!(docs[1].pointer(&["system"]).is_some());
//! ```
//!
//! A JSON array at the top level is read as a list of documents:
//!
//! ```rust
//! use serde_foam::from_json_str;
//!
//! let docs = from_json_str(r#"[{"order": ["meta"]}, {"a": 1}]"#).unwrap();
//! assert_eq!(docs.len(), 2);
//! ```

use crate::{Error, FoamValue, Result};
use serde::Deserialize;
use std::path::Path;

/// Input format of a case description.
///
/// # Examples
///
/// ```rust
/// use serde_foam::Format;
///
/// assert_eq!(Format::from_suffix("yml").unwrap(), Format::Yaml);
/// assert_eq!(Format::Json.as_str(), "json");
/// assert_eq!(Format::from_suffix(".TOML").unwrap(), Format::Toml);
/// assert!(Format::from_suffix("pickle").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Returns the canonical name of this format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Toml => "toml",
        }
    }

    /// Picks a format from a file suffix or format name, with or without a
    /// leading dot.
    pub fn from_suffix(suffix: &str) -> Result<Self> {
        match suffix.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            _ => Err(Error::UnsupportedFormat(suffix.to_string())),
        }
    }

    /// Picks a format from the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let suffix = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        Format::from_suffix(suffix)
    }
}

/// Reads every document of a YAML stream, in order.
pub fn from_yaml_str(text: &str) -> Result<Vec<FoamValue>> {
    serde_yaml::Deserializer::from_str(text)
        .map(|document| FoamValue::deserialize(document).map_err(Error::from))
        .collect()
}

/// Reads JSON text. A top-level array is a list of documents, anything
/// else is a single document.
pub fn from_json_str(text: &str) -> Result<Vec<FoamValue>> {
    json_documents(serde_json::from_str(text)?)
}

/// Reads a TOML document. TOML has no multi-document form, so the result
/// always holds exactly one mapping.
pub fn from_toml_str(text: &str) -> Result<Vec<FoamValue>> {
    Ok(vec![toml::from_str(text)?])
}

/// Reads documents from raw bytes in the given format.
pub fn from_slice(bytes: &[u8], format: Format) -> Result<Vec<FoamValue>> {
    match format {
        Format::Yaml => serde_yaml::Deserializer::from_slice(bytes)
            .map(|document| FoamValue::deserialize(document).map_err(Error::from))
            .collect(),
        Format::Json => json_documents(serde_json::from_slice(bytes)?),
        Format::Toml => {
            let text = std::str::from_utf8(bytes).map_err(|e| Error::Toml(e.to_string()))?;
            from_toml_str(text)
        }
    }
}

/// Reads documents from a file, choosing the format from its suffix.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<FoamValue>> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let bytes = std::fs::read(path)
        .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), format = format.as_str(), "loading documents");
    from_slice(&bytes, format)
}

fn json_documents(value: FoamValue) -> Result<Vec<FoamValue>> {
    match value {
        FoamValue::Array(documents) => Ok(documents),
        other => Ok(vec![other]),
    }
}
