//! Cases: multi-document descriptions written out as OpenFOAM directory trees.
//!
//! A case is a list of documents. Document 0 is `meta`, and `meta.order`
//! names every document, so a YAML case usually looks like
//!
//! ```yaml
//! order: [meta, foam, static, other]
//! version: 0.13.4
//! openfoam: [7]
//! ---
//! system:
//!   controlDict:
//!     FoamFile: dictionary
//!     application: icoFoam
//! ---
//! - name: Allrun
//!   type: [embed, text]
//!   permission: 755
//!   data: |
//!     #!/bin/sh
//! ---
//! pipeline: [blockMesh, __app__]
//! ```
//!
//! Inside the `foam` section any mapping holding a `FoamFile` key is one
//! output file; its key path is the file's path below the destination.
//!
//! ## Examples
//!
//! ```rust
//! use serde_foam::{Case, Format};
//!
//! let text = "order: [meta, foam]\nversion: 0.13.4\n---\nsystem:\n  controlDict:\n    FoamFile: dictionary\n    application: icoFoam\n";
//! let case = Case::from_str(text, Format::Yaml, ".").unwrap();
//! assert_eq!(case.application().unwrap(), "icoFoam");
//!
//! let files = case.extract_files();
//! assert_eq!(files[0].0, vec!["system", "controlDict"]);
//! ```

use crate::statics;
use crate::version::Version;
use crate::{
    from_path, from_slice, CaseOptions, Command, Error, FoamMap, FoamValue, Format, Result,
    Serializer,
};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Key marking a mapping as a dictionary file.
pub const HEADER_KEY: &str = "FoamFile";

/// Name of the empty marker file ParaView opens a case through.
pub const PARAVIEW_MARKER: &str = "paraview.foam";

/// A loaded case description.
///
/// Cloning deep-copies the documents and keeps the destination, so a clone
/// can be edited and saved elsewhere without touching the original.
#[derive(Clone, Debug)]
pub struct Case {
    documents: Vec<FoamValue>,
    root: PathBuf,
    destination: Option<PathBuf>,
}

impl Case {
    /// Creates a case from its documents.
    ///
    /// `root` is the directory that relative static paths are resolved
    /// against. A `meta.version` that differs from
    /// [`DOCUMENT_VERSION`](crate::DOCUMENT_VERSION) in `major.minor` logs a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSection`] when there is no `meta` mapping and
    /// [`Error::InvalidVersion`] when `meta.version` cannot be parsed.
    pub fn new<P: Into<PathBuf>>(documents: Vec<FoamValue>, root: P) -> Result<Self> {
        let case = Case::unchecked(documents, root)?;
        case.check_versions()?;
        Ok(case)
    }

    pub(crate) fn unchecked<P: Into<PathBuf>>(documents: Vec<FoamValue>, root: P) -> Result<Self> {
        match documents.first() {
            Some(FoamValue::Object(_)) => Ok(Case {
                documents,
                root: root.into(),
                destination: None,
            }),
            _ => Err(Error::missing("meta")),
        }
    }

    /// Loads a case from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Case::new(from_path(path)?, root)
    }

    /// Parses a case from text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str<P: Into<PathBuf>>(text: &str, format: Format, root: P) -> Result<Self> {
        Case::new(from_slice(text.as_bytes(), format)?, root)
    }

    fn check_versions(&self) -> Result<()> {
        if let Ok(installed) = std::env::var("WM_PROJECT_VERSION") {
            let supported = self.openfoam_versions();
            if !supported.iter().any(|v| *v == installed) {
                tracing::warn!(root = %self.root.display(), %installed, "OpenFOAM version mismatch");
            }
        }

        let written = self
            .meta()
            .get("version")
            .and_then(FoamValue::scalar_text)
            .unwrap_or_else(|| "0.0.0".to_string());
        let written: Version = written.parse()?;
        match Version::current().compare_release(&written) {
            Ordering::Less => tracing::warn!(%written, "Forward compatibility is not yet guaranteed"),
            Ordering::Greater => tracing::warn!(%written, "Backward compatibility is not yet guaranteed"),
            Ordering::Equal => {}
        }
        Ok(())
    }

    pub fn documents(&self) -> &[FoamValue] {
        &self.documents
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the case was last saved to.
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// The `meta` document.
    pub fn meta(&self) -> &FoamMap {
        static EMPTY: std::sync::OnceLock<FoamMap> = std::sync::OnceLock::new();
        self.documents
            .first()
            .and_then(FoamValue::as_object)
            .unwrap_or_else(|| EMPTY.get_or_init(FoamMap::new))
    }

    /// OpenFOAM releases listed under `meta.openfoam`.
    pub fn openfoam_versions(&self) -> Vec<String> {
        self.meta()
            .get("openfoam")
            .and_then(FoamValue::as_array)
            .map(|versions| versions.iter().filter_map(FoamValue::scalar_text).collect())
            .unwrap_or_default()
    }

    fn section_index(&self, name: &str) -> Option<usize> {
        self.meta()
            .get("order")?
            .as_array()?
            .iter()
            .position(|entry| entry.as_str() == Some(name))
    }

    /// Looks a document up by its name in `meta.order`.
    ///
    /// Returns `None` when the name is not listed or the stream has fewer
    /// documents than `order` names.
    pub fn section(&self, name: &str) -> Option<&FoamValue> {
        self.section_index(name)
            .and_then(|index| self.documents.get(index))
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut FoamValue> {
        let index = self.section_index(name)?;
        self.documents.get_mut(index)
    }

    /// Every file-bearing mapping of the `foam` section with its key path.
    ///
    /// The search is depth-first in document order and does not look inside
    /// a mapping once it holds `FoamFile`. The mappings are copies.
    pub fn extract_files(&self) -> Vec<(Vec<String>, FoamMap)> {
        let mut files = Vec::new();
        if let Some(foam) = self.section("foam").and_then(FoamValue::as_object) {
            collect_files(foam, &mut Vec::new(), &mut files);
        }
        files
    }

    /// Renders the file at `keys` in the `foam` section, header included.
    pub fn render_file<S: AsRef<str>>(&self, keys: &[S], options: &CaseOptions) -> Result<String> {
        let keys: Vec<String> = keys.iter().map(|k| k.as_ref().to_string()).collect();
        let file = self
            .section("foam")
            .and_then(|foam| foam.pointer(&keys))
            .and_then(FoamValue::as_object)
            .ok_or_else(|| Error::missing(&format!("foam/{}", keys.join("/"))))?;
        let file = normalize_header(&keys, file, options.header_defaults);
        render_lines(&file, &keys)
    }

    /// Writes the case below `dest`.
    ///
    /// Dictionary files come first, then the `static` entries, then the
    /// `paraview.foam` marker when [`CaseOptions::paraview`] is set.
    pub fn save<P: AsRef<Path>>(&mut self, dest: P, options: &CaseOptions) -> Result<()> {
        let dest = dest.as_ref();
        if !options.overwrite && is_non_empty_dir(dest) {
            return Err(Error::io(&format!(
                "{} already exists and is not empty",
                dest.display()
            )));
        }
        self.destination = Some(dest.to_path_buf());
        self.write_to(dest, options)
    }

    pub(crate) fn write_to(&self, dest: &Path, options: &CaseOptions) -> Result<()> {
        fs::create_dir_all(dest)?;
        let files = self.extract_files();
        for (keys, file) in &files {
            if keys.is_empty() {
                return Err(Error::custom("the foam section itself holds a FoamFile header"));
            }
            let file = normalize_header(keys, file, options.header_defaults);
            let text = render_lines(&file, keys)?;
            let path = keys.iter().fold(dest.to_path_buf(), |path, key| path.join(key));
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            write_text(&path, &text, None)?;
            tracing::debug!(path = %path.display(), "wrote dictionary");
        }

        if let Some(entries) = self.section("static").and_then(FoamValue::as_array) {
            for entry in entries {
                statics::save_entry(entry, &self.root, dest)?;
            }
        }

        if options.paraview {
            write_text(&dest.join(PARAVIEW_MARKER), "", None)?;
        }
        tracing::info!(dest = %dest.display(), files = files.len(), "saved case");
        Ok(())
    }

    /// The solver named in `system/controlDict`.
    ///
    /// The first controlDict key starting with `application` is used.
    pub fn application(&self) -> Result<String> {
        self.foam_pointer(&["system", "controlDict"])
            .and_then(FoamValue::as_object)
            .and_then(|dict| {
                dict.iter()
                    .find(|(key, _)| key.starts_with("application"))
                    .and_then(|(_, value)| value.scalar_text())
            })
            .ok_or_else(|| Error::missing("system/controlDict/application"))
    }

    /// `numberOfSubdomains` from `system/decomposeParDict`, or 1.
    pub fn number_of_processors(&self) -> usize {
        self.foam_pointer(&["system", "decomposeParDict", "numberOfSubdomains"])
            .and_then(FoamValue::as_i64)
            .filter(|&n| n > 0)
            .map(|n| n as usize)
            .unwrap_or(1)
    }

    /// Commands listed under `other.pipeline`.
    pub fn pipeline(&self) -> Vec<FoamValue> {
        self.section("other")
            .and_then(|other| other.pointer(&["pipeline"]))
            .and_then(FoamValue::as_array)
            .cloned()
            .unwrap_or_default()
    }

    pub fn start_time(&self) -> Option<f64> {
        self.foam_pointer(&["system", "controlDict", "startTime"])
            .and_then(FoamValue::as_f64)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.foam_pointer(&["system", "controlDict", "endTime"])
            .and_then(FoamValue::as_f64)
    }

    /// Number of resolved dimensions of the `blockMeshDict` blocks.
    ///
    /// Each block's cell counts, the second parenthesised group of
    /// `hex (...) (nx ny nz) ...`, contribute the number of counts other than
    /// `1`; the smallest count over all blocks wins, starting from 3.
    /// Returns `None` without `blockMeshDict.blocks`, or when a block is not
    /// a string of that shape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::{foam, Case};
    ///
    /// let foam = foam!({ "system": { "blockMeshDict": {
    ///     "FoamFile": null,
    ///     "blocks": ["hex (0 1 2 3 4 5 6 7) (20 20 1) simpleGrading (1 1 1)"]
    /// } } });
    /// let case = Case::new(vec![foam!({ "order": ["meta", "foam"] }), foam], ".").unwrap();
    /// assert_eq!(case.ndim(), Some(2));
    /// ```
    pub fn ndim(&self) -> Option<usize> {
        let blocks = self
            .foam_pointer(&["system", "blockMeshDict"])?
            .as_object()?
            .get("blocks")?
            .as_array()?;
        blocks.iter().try_fold(3, |count, block| {
            let block = block.as_str()?;
            let rest = &block[block.find(')')? + 1..];
            let begin = rest.find('(')?;
            let end = rest.find(')')?;
            let cells: Vec<&str> = rest
                .get(begin + 1..end)
                .unwrap_or_default()
                .split_whitespace()
                .collect();
            let resolved = cells.iter().filter(|&&n| n != "1").count();
            Some(count.min(resolved))
        })
    }

    /// Field names: the `FoamFile.object` of every file under `0`.
    pub fn fields(&self) -> Vec<String> {
        self.foam_pointer(&["0"])
            .and_then(FoamValue::as_object)
            .map(|files| {
                files
                    .iter()
                    .filter_map(|(key, file)| {
                        match file.pointer(&[HEADER_KEY, "object"]) {
                            Some(object) => object.scalar_text(),
                            None => file.pointer(&[HEADER_KEY]).map(|_| key.clone()),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Command runner for the saved case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSection`] if [`Case::save`] has not been called.
    pub fn command(&self) -> Result<Command<'_>> {
        let dest = self
            .destination
            .as_deref()
            .ok_or_else(|| Error::missing("destination, call `Case::save` first"))?;
        Ok(Command::new(self, dest))
    }

    fn foam_pointer(&self, path: &[&str]) -> Option<&FoamValue> {
        self.section("foam")?.pointer(path)
    }
}

fn collect_files(map: &FoamMap, keys: &mut Vec<String>, files: &mut Vec<(Vec<String>, FoamMap)>) {
    if map.contains_key(HEADER_KEY) {
        files.push((keys.clone(), map.clone()));
        return;
    }
    for (key, value) in map.iter() {
        if let FoamValue::Object(child) = value {
            keys.push(key.clone());
            collect_files(child, keys, files);
            keys.pop();
        }
    }
}

/// Returns a copy of `file` with its `FoamFile` header normalised.
///
/// A `null` header is dropped and a string header becomes `{class: ...}`.
/// With `defaults`, missing `version`, `format` and `object` entries are
/// added, `object` being the last key of `keys`.
///
/// # Examples
///
/// ```rust
/// use serde_foam::{foam, normalize_header};
///
/// let file = foam!({ "FoamFile": "volVectorField", "dimensions": "[0 1 -1 0 0 0 0]" });
/// let file = normalize_header(&["0", "U"], file.as_object().unwrap(), true);
/// assert_eq!(
///     file.get("FoamFile"),
///     Some(&foam!({ "class": "volVectorField", "version": 2.0, "format": "ascii", "object": "U" }))
/// );
/// ```
pub fn normalize_header<S: AsRef<str>>(keys: &[S], file: &FoamMap, defaults: bool) -> FoamMap {
    let mut file = file.clone();
    match file.get(HEADER_KEY) {
        Some(FoamValue::Null) => {
            file.remove(HEADER_KEY);
        }
        Some(FoamValue::String(class)) => {
            let mut header = FoamMap::with_capacity(4);
            header.insert("class".to_string(), FoamValue::from(class.as_str()));
            file.insert(HEADER_KEY.to_string(), FoamValue::Object(header));
        }
        _ => {}
    }

    if defaults {
        if let Some(header) = file.get_mut(HEADER_KEY).and_then(FoamValue::as_object_mut) {
            let object = keys.last().map(|k| k.as_ref()).unwrap_or_default();
            header.get_or_insert_with("version", || FoamValue::from(2.0));
            header.get_or_insert_with("format", || FoamValue::from("ascii"));
            header.get_or_insert_with("object", || FoamValue::from(object));
        }
    }
    file
}

fn render_lines<S: AsRef<str>>(file: &FoamMap, keys: &[S]) -> Result<String> {
    let lines = Serializer::new()
        .lines_at(file, keys)
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

fn is_non_empty_dir(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Writes `text` with LF line endings and a single trailing newline.
///
/// An empty `text` produces an empty file. `permission` is an octal mode
/// such as `755`, applied on Unix only.
pub(crate) fn write_text(path: &Path, text: &str, permission: Option<u32>) -> Result<()> {
    fs::write(path, file_text(text)).map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
    if let Some(mode) = permission {
        set_permission(path, mode)?;
    }
    Ok(())
}

/// `text` with `\r\n` and `\r` turned into `\n`, ending in exactly one
/// newline unless empty.
pub(crate) fn file_text(text: &str) -> String {
    let mut text = text.replace("\r\n", "\n").replace('\r', "\n");
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(unix)]
fn set_permission(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_permission(path: &Path, mode: u32) -> Result<()> {
    tracing::debug!(path = %path.display(), mode = %format!("{:o}", mode), "permissions ignored on this platform");
    Ok(())
}
