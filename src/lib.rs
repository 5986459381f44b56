//! # serde_foam
//!
//! Turn YAML or JSON case descriptions into OpenFOAM dictionary files, and
//! run the solver on the result.
//!
//! ## What is a dictionary file?
//!
//! OpenFOAM reads its input from brace-delimited text files:
//!
//! ```text
//! FoamFile {version 2.0; format ascii; class volVectorField; object U;}
//! dimensions [0 1 -1 0 0 0 0];
//! boundaryField {movingWall {type fixedValue; value uniform (1 0 0);}}
//! ```
//!
//! Writing these by hand is tedious. This crate takes the same content as a
//! nested mapping and renders it, one line per top-level entry.
//!
//! ## Key Features
//!
//! - **Order Preserving**: entries come out in the order they were written
//! - **Head Labels**: `{movingWall: null, type: wall}` inside a list becomes
//!   `movingWall {type wall;}`
//! - **Key Quoting**: `div(phi,U)` and `(U|k|epsilon)` are quoted automatically
//! - **Whole Cases**: multi-document descriptions are written as complete
//!   case directories, static files included
//! - **Runner**: pipelines of OpenFOAM commands with log files and progress
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_foam::{foam, to_string};
//!
//! let u = foam!({
//!     "dimensions": "[0 1 -1 0 0 0 0]",
//!     "internalField": "uniform (0 0 0)",
//!     "boundaryField": {
//!         "movingWall": { "type": "fixedValue", "value": "uniform (1 0 0)" },
//!         "frontAndBack": { "type": "empty" }
//!     }
//! });
//!
//! let text = to_string(&u).unwrap();
//! assert_eq!(
//!     text,
//!     "dimensions [0 1 -1 0 0 0 0];\n\
//!      internalField uniform (0 0 0);\n\
//!      boundaryField {movingWall {type fixedValue; value uniform (1 0 0);} frontAndBack {type empty;}}"
//! );
//! ```
//!
//! ### From Rust types
//!
//! Anything implementing `Serialize` can be rendered:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_foam::to_lines;
//!
//! #[derive(Serialize)]
//! struct Piso {
//!     #[serde(rename = "nCorrectors")]
//!     n_correctors: u32,
//!     #[serde(rename = "pRefValue")]
//!     p_ref_value: f64,
//! }
//!
//! let lines = to_lines(&Piso { n_correctors: 2, p_ref_value: 0.0 }).unwrap();
//! assert_eq!(lines, vec!["nCorrectors 2;", "pRefValue 0.0;"]);
//! ```
//!
//! ### Whole cases
//!
//! ```rust,no_run
//! use serde_foam::{Case, CaseOptions, RunOptions};
//!
//! let mut case = Case::from_path("cavity.yaml").unwrap();
//! case.save("build/cavity", &CaseOptions::default()).unwrap();
//! let codes = case.command().unwrap().all_run(&RunOptions::all_run()).unwrap();
//! ```
//!
//! ## Value Rules
//!
//! | Value                          | Rendered as                   |
//! |--------------------------------|-------------------------------|
//! | `true` / `false`               | `true;` / `false;`            |
//! | number or string               | `1;` `0.005;` `uniform 0;`    |
//! | `[]` or list of scalars        | `(a b c);`                    |
//! | list of mappings               | `(head {..} {..});`           |
//! | mapping                        | `{a 1; b 2;}`                 |
//! | `null`, lists of lists         | error                         |
//!
//! Floats use Rust's shortest round-trip form, so `2.0` stays `2.0` and
//! `1e-5` is written `1e-5`.
//!
//! ## Logging
//!
//! The library reports through [`tracing`]; install a subscriber to see
//! written files, commands and solver progress.

pub mod case;
pub mod command;
pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod progress;
pub mod ser;
pub mod statics;
pub mod value;
pub mod version;

pub use case::{normalize_header, Case};
pub use command::{Command, PipelineItem, Process};
pub use de::{from_json_str, from_path, from_slice, from_toml_str, from_yaml_str, Format};
pub use error::{Error, Result};
pub use map::FoamMap;
pub use options::{CaseOptions, RunOptions};
pub use progress::{Progress, Tracker};
pub use ser::{Lines, Serializer, ValueSerializer};
pub use statics::{StaticEntry, StaticKind};
pub use value::{FoamValue, Number};
pub use version::{Version, DOCUMENT_VERSION};

use serde::Serialize;
use std::io;

/// Convert any `T: Serialize` to a `FoamValue`.
///
/// # Examples
///
/// ```rust
/// use serde_foam::{to_value, FoamValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: FoamValue = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized, e.g. a map with
/// non-scalar keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<FoamValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Renders any `T: Serialize` that serializes to a mapping, one line per entry.
///
/// # Errors
///
/// Returns [`Error::UnsupportedValueKind`] if `value` is not a mapping or
/// holds a value with no dictionary form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_lines<T>(value: &T) -> Result<Vec<String>>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        FoamValue::Object(map) => render_mapping(&map),
        other => Err(Error::unsupported_value(other.kind(), &other, &[] as &[&str])),
    }
}

/// Renders `value` as dictionary text, lines joined with `\n` and no
/// trailing newline.
///
/// # Errors
///
/// See [`to_lines`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_lines(value)?.join("\n"))
}

/// Writes `value` as a dictionary file: LF separated lines followed by one
/// newline. Carriage returns inside values become line feeds, the same as
/// in files written by [`Case::save`]; an empty mapping writes nothing.
///
/// # Examples
///
/// ```rust
/// use serde_foam::{foam, to_writer};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &foam!({ "a": 1 })).unwrap();
/// assert_eq!(buffer, b"a 1;\n");
/// ```
///
/// # Errors
///
/// Returns an error if rendering fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = case::file_text(&to_string(value)?);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Renders every entry of `map`. See [`Serializer::render_mapping`].
pub fn render_mapping(map: &FoamMap) -> Result<Vec<String>> {
    Serializer::new().render_mapping(map)
}

/// Formats a key. See [`Serializer::format_key`].
///
/// ```rust
/// assert_eq!(serde_foam::format_key("div(phi, U)"), "\"div(phi,U)\"");
/// ```
#[must_use]
pub fn format_key(key: &str) -> String {
    Serializer::new().format_key(key)
}

/// Formats a value. See [`Serializer::format_value`].
///
/// ```rust
/// use serde_foam::{foam, format_value};
///
/// assert_eq!(format_value(&foam!(true)).unwrap(), "true;");
/// assert_eq!(format_value(&foam!([1, 2, 3])).unwrap(), "(1 2 3);");
/// ```
pub fn format_value(value: &FoamValue) -> Result<String> {
    Serializer::new().format_value(value)
}

/// Reads documents from an I/O stream.
///
/// # Errors
///
/// Returns an error if reading fails or the input does not parse.
pub fn from_reader<R>(mut reader: R, format: Format) -> Result<Vec<FoamValue>>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foam;

    #[test]
    fn test_to_lines_requires_mapping() {
        assert!(matches!(
            to_lines(&vec![1, 2]),
            Err(Error::UnsupportedValueKind { .. })
        ));
    }

    #[test]
    fn test_serializer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Serializer>();
        assert_send_sync::<FoamValue>();
        assert_send_sync::<FoamMap>();
    }

    #[test]
    fn test_to_writer_drops_carriage_returns() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &foam!({ "a": "x\r\ny", "b": "z\r" })).unwrap();
        assert_eq!(buffer, b"a x\ny;\nb z\n;\n");
    }

    #[test]
    fn test_from_reader() {
        let docs = from_reader(&b"a: 1\n---\nb: 2\n"[..], Format::Yaml).unwrap();
        assert_eq!(docs.len(), 2);
    }
}
