//! Dictionary-file serialization.
//!
//! This module provides the [`Serializer`] that turns a mapping into the text
//! syntax of OpenFOAM dictionary files, and [`ValueSerializer`], which
//! converts any `T: Serialize` into a [`FoamValue`] first.
//!
//! ## Overview
//!
//! Every top-level entry of a mapping becomes one line `<key> <value>`:
//!
//! - **Scalars**: `key value;` (booleans as `true`/`false`)
//! - **Scalar sequences**: `key (a b c);`
//! - **Mapping sequences**: `key (head {a 1;} {b 2;});` where `head` comes
//!   from the single `null`-valued entry of an element
//! - **Mappings**: `key {a 1; b 2;}` inlined on the same line
//!
//! Keys lose their spaces (`div(phi, U)` becomes `div(phi,U)`) and are
//! double-quoted when they contain `(`, `)`, `*` or `|`.
//!
//! ## Usage
//!
//! ```rust
//! use serde_foam::{foam, Serializer};
//!
//! let data = foam!({
//!     "a": [true, false],
//!     "b": 1,
//!     "c": { "d": "e" }
//! });
//!
//! let serializer = Serializer::new();
//! let lines = serializer.render_mapping(data.as_object().unwrap()).unwrap();
//! assert_eq!(lines, vec!["a (true false);", "b 1;", "c {d e;}"]);
//! ```

use crate::{Error, FoamMap, FoamValue, Number, Result};
use serde::{ser, Serialize};

/// Characters that force a key to be double-quoted.
const QUOTE_TRIGGERS: [char; 4] = ['(', ')', '*', '|'];

/// Renders mappings as dictionary-file lines.
///
/// The serializer holds no state; one value can be shared freely between
/// threads and reused for any number of files.
#[derive(Clone, Copy, Debug, Default)]
pub struct Serializer;

impl Serializer {
    pub fn new() -> Self {
        Serializer
    }

    /// Lazily renders `map`, one line per entry.
    ///
    /// The iterator can be cloned to restart rendering from the current
    /// position.
    pub fn lines<'a>(&self, map: &'a FoamMap) -> Lines<'a> {
        self.lines_at(map, &[] as &[&str])
    }

    /// Like [`Serializer::lines`], prefixing error paths with `base`.
    pub fn lines_at<'a, S: AsRef<str>>(&self, map: &'a FoamMap, base: &[S]) -> Lines<'a> {
        Lines {
            serializer: *self,
            entries: map.iter(),
            base: base.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Renders every entry of `map`, failing on the first unsupported value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValueKind`] or [`Error::MalformedListElement`].
    pub fn render_mapping(&self, map: &FoamMap) -> Result<Vec<String>> {
        self.lines(map).collect()
    }

    /// Formats a key: spaces removed, quoted if it contains `(`, `)`, `*` or `|`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::Serializer;
    ///
    /// let ser = Serializer::new();
    /// assert_eq!(ser.format_key("div ( phi , U )"), "\"div(phi,U)\"");
    /// assert_eq!(ser.format_key("(U|k|epsilon)"), "\"(U|k|epsilon)\"");
    /// assert_eq!(ser.format_key("dimensions"), "dimensions");
    /// ```
    pub fn format_key(&self, key: &str) -> String {
        let key: String = key.chars().filter(|&c| c != ' ').collect();
        if key.contains(&QUOTE_TRIGGERS[..]) {
            format!("\"{}\"", key)
        } else {
            key
        }
    }

    /// Formats the value half of an entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValueKind`] for a top-level `null`, and for
    /// sequences whose elements are neither all scalars nor all mappings.
    pub fn format_value(&self, value: &FoamValue) -> Result<String> {
        self.value_at(value, &mut Vec::new())
    }

    fn value_at(&self, value: &FoamValue, path: &mut Vec<String>) -> Result<String> {
        match value {
            FoamValue::Bool(b) => Ok(format!("{};", b)),
            FoamValue::Number(n) => Ok(format!("{};", n)),
            FoamValue::String(s) => Ok(format!("{};", s)),
            FoamValue::Array(items) => self.sequence_at(items, path),
            FoamValue::Object(map) => Ok(format!("{{{}}}", self.block_at(map, path)?)),
            FoamValue::Null => Err(Error::unsupported_value(value.kind(), value, path)),
        }
    }

    // The first element decides how the whole sequence is written.
    fn sequence_at(&self, items: &[FoamValue], path: &mut Vec<String>) -> Result<String> {
        match items.first() {
            None => Ok("();".to_string()),
            Some(first) if first.is_scalar() => {
                let mut words = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match item.scalar_text() {
                        Some(word) => words.push(word),
                        None => {
                            path.push(i.to_string());
                            return Err(Error::unsupported_value(item.kind(), item, path));
                        }
                    }
                }
                Ok(format!("({});", words.join(" ")))
            }
            Some(FoamValue::Object(_)) => {
                let mut blocks = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    path.push(i.to_string());
                    let block = match item {
                        FoamValue::Object(element) => self.element_at(element, path)?,
                        other => return Err(Error::unsupported_value(other.kind(), other, path)),
                    };
                    path.pop();
                    blocks.push(block);
                }
                Ok(format!("({});", blocks.join(" ")))
            }
            Some(other) => Err(Error::unsupported_value(
                &format!("sequence of {}", other.kind()),
                other,
                path,
            )),
        }
    }

    fn element_at(&self, element: &FoamMap, path: &mut Vec<String>) -> Result<String> {
        let heads: Vec<&String> = element
            .iter()
            .filter(|(_, v)| v.is_null())
            .map(|(k, _)| k)
            .collect();

        match heads.as_slice() {
            [] => Ok(format!("{{{}}}", self.block_at(element, path)?)),
            [head] => {
                let rest = element.without(head);
                Ok(format!("{} {{{}}}", head, self.block_at(&rest, path)?))
            }
            _ => Err(Error::malformed_list_element(
                path,
                heads.into_iter().cloned().collect(),
            )),
        }
    }

    fn block_at(&self, map: &FoamMap, path: &mut Vec<String>) -> Result<String> {
        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map.iter() {
            entries.push(self.entry_at(key, value, path)?);
        }
        Ok(entries.join(" "))
    }

    fn entry_at(&self, key: &str, value: &FoamValue, path: &mut Vec<String>) -> Result<String> {
        path.push(key.to_string());
        let value = self.value_at(value, path)?;
        path.pop();
        Ok(format!("{} {}", self.format_key(key), value))
    }
}

/// Iterator over the rendered lines of a mapping.
///
/// Created by [`Serializer::lines`]. Yields one `Result` per entry; an
/// error covers only that entry.
#[derive(Clone, Debug)]
pub struct Lines<'a> {
    serializer: Serializer,
    entries: indexmap::map::Iter<'a, String, FoamValue>,
    base: Vec<String>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.entries.next()?;
        let mut path = self.base.clone();
        Some(self.serializer.entry_at(key, value, &mut path))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<'a> ExactSizeIterator for Lines<'a> {}

/// Converts `T: Serialize` into a [`FoamValue`].
///
/// Enum variants carrying data become single-entry mappings keyed by the
/// variant name.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<FoamValue>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: FoamMap,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

fn wrap_variant(variant: Option<&'static str>, value: FoamValue) -> FoamValue {
    match variant {
        Some(name) => {
            let mut map = FoamMap::with_capacity(1);
            map.insert(name.to_string(), value);
            FoamValue::Object(map)
        }
        None => value,
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = FoamValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<FoamValue> {
        Ok(FoamValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<FoamValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<FoamValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<FoamValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<FoamValue> {
        Ok(FoamValue::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<FoamValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u16(self, v: u16) -> Result<FoamValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u32(self, v: u32) -> Result<FoamValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u64(self, v: u64) -> Result<FoamValue> {
        if v <= i64::MAX as u64 {
            Ok(FoamValue::Number(Number::Integer(v as i64)))
        } else {
            Ok(FoamValue::Number(Number::Float(v as f64)))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<FoamValue> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<FoamValue> {
        Ok(FoamValue::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<FoamValue> {
        Ok(FoamValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<FoamValue> {
        Ok(FoamValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<FoamValue> {
        let vec = v
            .iter()
            .map(|&b| FoamValue::Number(Number::Integer(b as i64)))
            .collect();
        Ok(FoamValue::Array(vec))
    }

    fn serialize_none(self) -> Result<FoamValue> {
        Ok(FoamValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<FoamValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<FoamValue> {
        Ok(FoamValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<FoamValue> {
        Ok(FoamValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<FoamValue> {
        Ok(FoamValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<FoamValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<FoamValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(wrap_variant(Some(variant), to_foam_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_foam_value(value)?);
        Ok(())
    }

    fn finish(self) -> Result<FoamValue> {
        Ok(wrap_variant(self.variant, FoamValue::Array(self.vec)))
    }
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: FoamMap::new(),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> Result<FoamValue> {
        Ok(wrap_variant(self.variant, FoamValue::Object(self.map)))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = FoamValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<FoamValue> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = FoamValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<FoamValue> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = FoamValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<FoamValue> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = FoamValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<FoamValue> {
        self.finish()
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = FoamValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = to_foam_value(key)?;
        match key.scalar_text() {
            Some(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            None => Err(Error::custom(format!(
                "Map keys must be scalars, found {}",
                key.kind()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_foam_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<FoamValue> {
        self.finish()
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = FoamValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_foam_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<FoamValue> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = FoamValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_foam_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<FoamValue> {
        self.finish()
    }
}

fn to_foam_value<T: Serialize + ?Sized>(value: &T) -> Result<FoamValue> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foam;

    fn render(value: FoamValue) -> Vec<String> {
        Serializer::new()
            .render_mapping(value.as_object().unwrap())
            .unwrap()
    }

    #[test]
    fn test_key_spaces_removed_before_quoting() {
        let ser = Serializer::new();
        assert_eq!(ser.format_key("div ( phi , U )"), "\"div(phi,U)\"");
        assert_eq!(ser.format_key("div(phi, U)"), "\"div(phi,U)\"");
        assert_eq!(ser.format_key("field *"), "\"field*\"");
        assert_eq!(ser.format_key("a|b"), "\"a|b\"");
        assert_eq!(ser.format_key("default Scheme"), "defaultScheme");
    }

    #[test]
    fn test_plain_key_idempotent() {
        let ser = Serializer::new();
        for key in ["dimensions", "internalField", "0", "nOuterCorrectors"] {
            let once = ser.format_key(key);
            assert_eq!(once, key);
            assert_eq!(ser.format_key(&once), once);
        }
    }

    #[test]
    fn test_bool_is_never_numeric() {
        let ser = Serializer::new();
        assert_eq!(ser.format_value(&FoamValue::Bool(true)).unwrap(), "true;");
        assert_eq!(ser.format_value(&FoamValue::Bool(false)).unwrap(), "false;");
        assert_eq!(ser.format_value(&foam!([true, 1])).unwrap(), "(true 1);");
    }

    #[test]
    fn test_scalars() {
        let ser = Serializer::new();
        assert_eq!(ser.format_value(&FoamValue::from(1)).unwrap(), "1;");
        assert_eq!(ser.format_value(&FoamValue::from(0.005)).unwrap(), "0.005;");
        assert_eq!(ser.format_value(&FoamValue::from(2.0)).unwrap(), "2.0;");
        assert_eq!(
            ser.format_value(&FoamValue::from("[0 1 -1 0 0 0 0]")).unwrap(),
            "[0 1 -1 0 0 0 0];"
        );
    }

    #[test]
    fn test_scalar_sequences() {
        let ser = Serializer::new();
        assert_eq!(ser.format_value(&foam!([])).unwrap(), "();");
        assert_eq!(ser.format_value(&foam!([1, 2, 3])).unwrap(), "(1 2 3);");
        assert_eq!(
            ser.format_value(&foam!(["movingWall", "fixedWalls"])).unwrap(),
            "(movingWall fixedWalls);"
        );
    }

    #[test]
    fn test_mapping_sequence_with_and_without_head() {
        let ser = Serializer::new();
        let value = foam!([{ "a": null, "b": "c" }, { "d": "e" }]);
        assert_eq!(ser.format_value(&value).unwrap(), "(a {b c;} {d e;});");
    }

    #[test]
    fn test_head_label_position_does_not_matter() {
        let ser = Serializer::new();
        let value = foam!([{ "type": "wall", "movingWall": null, "faces": ["(3 7 6 2)"] }]);
        assert_eq!(
            ser.format_value(&value).unwrap(),
            "(movingWall {type wall; faces ((3 7 6 2));});"
        );
    }

    #[test]
    fn test_head_label_is_not_key_formatted() {
        let ser = Serializer::new();
        let value = foam!([{ "(a b)": null, "c": 1 }]);
        assert_eq!(ser.format_value(&value).unwrap(), "((a b) {c 1;});");
    }

    #[test]
    fn test_head_extraction_leaves_source_untouched() {
        let ser = Serializer::new();
        let value = foam!([{ "inlet": null, "type": "patch" }]);
        let before = value.clone();
        ser.format_value(&value).unwrap();
        ser.format_value(&value).unwrap();
        assert_eq!(value, before);
    }

    #[test]
    fn test_two_heads_rejected() {
        let ser = Serializer::new();
        let value = foam!([{ "a": null, "b": null }]);
        match ser.format_value(&value).unwrap_err() {
            Error::MalformedListElement { path, heads } => {
                assert_eq!(path, "0");
                assert_eq!(heads, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_nested_mapping_has_no_semicolon() {
        let ser = Serializer::new();
        let value = foam!({ "type": "fixedValue", "value": "uniform (1 0 0)" });
        assert_eq!(
            ser.format_value(&value).unwrap(),
            "{type fixedValue; value uniform (1 0 0);}"
        );
        assert_eq!(ser.format_value(&foam!({})).unwrap(), "{}");
    }

    #[test]
    fn test_top_level_null_rejected() {
        let ser = Serializer::new();
        assert!(matches!(
            ser.format_value(&FoamValue::Null),
            Err(Error::UnsupportedValueKind { .. })
        ));
    }

    #[test]
    fn test_unsupported_sequences() {
        let ser = Serializer::new();
        let err = ser.format_value(&foam!([[1, 2], [3]])).unwrap_err();
        assert!(err.to_string().contains("sequence of sequence"));
        assert!(ser.format_value(&foam!([null])).is_err());
        assert!(ser.format_value(&foam!([1, {"a": 1}])).is_err());
        assert!(ser.format_value(&foam!([{"a": 1}, 1])).is_err());
    }

    #[test]
    fn test_error_path_points_at_value() {
        let data = foam!({ "boundaryField": { "inlet": { "value": null } } });
        let err = Serializer::new()
            .render_mapping(data.as_object().unwrap())
            .unwrap_err();
        match err {
            Error::UnsupportedValueKind { kind, path, value } => {
                assert_eq!(kind, "null");
                assert_eq!(path, "boundaryField/inlet/value");
                assert_eq!(value, "null");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_lines_are_lazy_and_restartable() {
        let data = foam!({ "a": 1, "b": null, "c": 3 });
        let map = data.as_object().unwrap();
        let ser = Serializer::new();

        let mut lines = ser.lines(map);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.next().unwrap().unwrap(), "a 1;");
        let rest = lines.clone();
        assert!(lines.next().unwrap().is_err());
        assert_eq!(lines.next().unwrap().unwrap(), "c 3;");
        assert_eq!(rest.count(), 2);

        let again: Vec<_> = ser.lines(map).take(1).collect::<Result<_>>().unwrap();
        assert_eq!(again, vec!["a 1;".to_string()]);
    }

    #[test]
    fn test_lines_at_prefixes_path() {
        let data = foam!({ "value": null });
        let err = Serializer::new()
            .lines_at(data.as_object().unwrap(), &["0", "U"])
            .next()
            .unwrap()
            .unwrap_err();
        assert!(err.to_string().contains("0/U/value"));
    }

    #[test]
    fn test_render_mapping_example() {
        let lines = render(foam!({ "a": [true, false], "b": 1, "c": { "d": "e" } }));
        assert_eq!(lines, vec!["a (true false);", "b 1;", "c {d e;}"]);
    }

    #[test]
    fn test_value_serializer_variants() {
        #[derive(Serialize)]
        enum Patch {
            Wall,
            Fixed(f64),
            Inlet { speed: i32 },
        }

        assert_eq!(
            to_foam_value(&Patch::Wall).unwrap(),
            FoamValue::from("Wall")
        );
        assert_eq!(to_foam_value(&Patch::Fixed(1.5)).unwrap(), foam!({ "Fixed": 1.5 }));
        assert_eq!(
            to_foam_value(&Patch::Inlet { speed: 3 }).unwrap(),
            foam!({ "Inlet": { "speed": 3 } })
        );
    }
}
