//! Static entries: auxiliary files copied or embedded into a saved case.
//!
//! Each element of the `static` section looks like
//!
//! ```yaml
//! - name: constant/triSurface/body.stl
//!   type: [path, raw]
//!   data: geometry/body.stl
//! ```
//!
//! `name` is the output path below the destination and `type` selects the
//! handler:
//!
//! | `type`                 | `data`                                      |
//! |------------------------|---------------------------------------------|
//! | `[embed, text]`        | file content, optional octal `permission`   |
//! | `[embed, binary]`      | sequence of byte values                     |
//! | `[path, raw]`          | file or directory relative to the case root |
//! | `[path, foam, yaml]`   | another YAML document to write as a case    |
//! | `[path, foam, json]`   | the same, as JSON                           |
//! | `[path, foam, toml]`   | the same, as TOML                           |
//! | `[]`                   | nothing is written                          |

use crate::case::write_text;
use crate::{from_slice, Case, CaseOptions, Error, FoamMap, FoamValue, Format, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a static entry does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaticKind {
    EmbedText,
    EmbedBinary,
    PathRaw,
    PathFoam(Format),
    Nothing,
}

impl StaticKind {
    /// Resolves the `type` list of an entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::{Format, StaticKind};
    ///
    /// assert_eq!(StaticKind::from_types(&["path", "foam", "json"]).unwrap(), StaticKind::PathFoam(Format::Json));
    /// assert!(StaticKind::from_types(&["embed", "7z"]).is_err());
    /// ```
    pub fn from_types<S: AsRef<str>>(types: &[S]) -> Result<Self> {
        let types: Vec<&str> = types.iter().map(|t| t.as_ref()).collect();
        match types.as_slice() {
            ["embed", "text"] => Ok(StaticKind::EmbedText),
            ["embed", "binary"] => Ok(StaticKind::EmbedBinary),
            ["path", "raw"] => Ok(StaticKind::PathRaw),
            ["path", "foam", "yaml"] => Ok(StaticKind::PathFoam(Format::Yaml)),
            ["path", "foam", "json"] => Ok(StaticKind::PathFoam(Format::Json)),
            ["path", "foam", "toml"] => Ok(StaticKind::PathFoam(Format::Toml)),
            [] => Ok(StaticKind::Nothing),
            _ => Err(Error::static_entry(
                "",
                &format!("unknown types \"{}\"", types.join(", ")),
            )),
        }
    }
}

/// One parsed element of the `static` section.
#[derive(Clone, Debug)]
pub struct StaticEntry<'a> {
    pub name: String,
    pub kind: StaticKind,
    pub data: Option<&'a FoamValue>,
    pub permission: Option<u32>,
}

impl<'a> StaticEntry<'a> {
    pub fn from_value(value: &'a FoamValue) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::static_entry("", &format!("expected a mapping, found {}", value.kind())))?;
        let name = map
            .get("name")
            .and_then(FoamValue::scalar_text)
            .ok_or_else(|| Error::static_entry("", "missing `name`"))?;

        let types: Vec<String> = match map.get("type") {
            Some(FoamValue::Array(types)) => types.iter().filter_map(FoamValue::scalar_text).collect(),
            Some(other) => other.scalar_text().into_iter().collect(),
            None => Vec::new(),
        };
        let kind = StaticKind::from_types(&types).map_err(|e| match e {
            Error::Static { msg, .. } => Error::static_entry(&name, &msg),
            other => other,
        })?;

        let permission = match map.get("permission") {
            None | Some(FoamValue::Null) => None,
            Some(mode) => Some(parse_permission(&name, mode)?),
        };

        Ok(StaticEntry {
            name,
            kind,
            data: map.get("data"),
            permission,
        })
    }

    fn data_text(&self) -> Result<String> {
        self.data
            .and_then(FoamValue::scalar_text)
            .ok_or_else(|| Error::static_entry(&self.name, "`data` must be a scalar"))
    }

    fn data_bytes(&self) -> Result<Vec<u8>> {
        let invalid = || Error::static_entry(&self.name, "`data` must be a sequence of bytes");
        self.data
            .and_then(FoamValue::as_array)
            .ok_or_else(invalid)?
            .iter()
            .map(|byte| {
                byte.as_i64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(invalid)
            })
            .collect()
    }
}

// `755` in a document means 0o755.
fn parse_permission(name: &str, mode: &FoamValue) -> Result<u32> {
    mode.scalar_text()
        .and_then(|text| u32::from_str_radix(&text, 8).ok())
        .ok_or_else(|| Error::static_entry(name, "`permission` must be an octal mode"))
}

/// Writes one static entry below `dest`, resolving source paths against `root`.
pub fn save_entry(value: &FoamValue, root: &Path, dest: &Path) -> Result<()> {
    let entry = StaticEntry::from_value(value)?;
    match entry.kind {
        StaticKind::Nothing => return Ok(()),
        StaticKind::EmbedText => {
            let out = output_path(dest, &entry.name)?;
            write_text(&out, &entry.data_text()?, entry.permission)?;
        }
        StaticKind::EmbedBinary => {
            let out = output_path(dest, &entry.name)?;
            fs::write(&out, entry.data_bytes()?)?;
        }
        StaticKind::PathRaw => {
            let source = root.join(entry.data_text()?);
            let out = output_path(dest, &entry.name)?;
            if source.is_dir() {
                copy_tree(&source, &out)?;
            } else if source.is_file() {
                fs::copy(&source, &out)?;
            } else {
                return Err(Error::static_entry(
                    &entry.name,
                    &format!("{} is neither a file nor a directory", source.display()),
                ));
            }
        }
        StaticKind::PathFoam(format) => save_nested_case(&entry, format, root, dest)?,
    }
    tracing::debug!(name = %entry.name, kind = ?entry.kind, "wrote static entry");
    Ok(())
}

fn output_path(dest: &Path, name: &str) -> Result<PathBuf> {
    let out = dest.join(name);
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(out)
}

fn copy_tree(source: &Path, out: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| Error::io(&e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::io(&e.to_string()))?;
        let target = out.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

// The loaded document is placed under `name` split on `/` and written as a
// case of its own into the same destination.
fn save_nested_case(entry: &StaticEntry<'_>, format: Format, root: &Path, dest: &Path) -> Result<()> {
    let source = root.join(entry.data_text()?);
    let bytes = fs::read(&source).map_err(|e| Error::io(&format!("{}: {}", source.display(), e)))?;
    let document = from_slice(&bytes, format)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::static_entry(&entry.name, "referenced file holds no document"))?;

    let keys: Vec<&str> = entry.name.split('/').collect();
    let mut foam = FoamValue::Object(FoamMap::new());
    foam.set_path(&keys, document)?;

    let meta = crate::foam!({ "order": ["meta", "foam"] });
    let nested_root = source.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut nested = Case::unchecked(vec![meta, foam], nested_root)?;
    nested.save(dest, &CaseOptions::new().with_paraview(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foam;

    #[test]
    fn test_parse_entry() {
        let value = foam!({ "name": "Allrun", "type": ["embed", "text"], "permission": 755, "data": "#!/bin/sh" });
        let entry = StaticEntry::from_value(&value).unwrap();
        assert_eq!(entry.kind, StaticKind::EmbedText);
        assert_eq!(entry.permission, Some(0o755));
        assert_eq!(entry.data_text().unwrap(), "#!/bin/sh");
    }

    #[test]
    fn test_unknown_type_names_entry() {
        let value = foam!({ "name": "mesh.7z", "type": ["embed", "7z"], "data": "" });
        let err = StaticEntry::from_value(&value).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("mesh.7z"));
        assert!(msg.contains("embed, 7z"));
    }

    #[test]
    fn test_bad_permission() {
        let value = foam!({ "name": "x", "type": ["embed", "text"], "permission": 789, "data": "" });
        assert!(StaticEntry::from_value(&value).is_err());
    }

    #[test]
    fn test_binary_data_range() {
        let ok = foam!({ "name": "b", "type": ["embed", "binary"], "data": [0, 127, 255] });
        assert_eq!(StaticEntry::from_value(&ok).unwrap().data_bytes().unwrap(), vec![0, 127, 255]);

        let bad = foam!({ "name": "b", "type": ["embed", "binary"], "data": [256] });
        assert!(StaticEntry::from_value(&bad).unwrap().data_bytes().is_err());
    }

    #[test]
    fn test_empty_type_is_nothing() {
        let value = foam!({ "name": "placeholder", "type": [] });
        assert_eq!(StaticEntry::from_value(&value).unwrap().kind, StaticKind::Nothing);
    }
}
