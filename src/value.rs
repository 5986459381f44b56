//! Dynamic value representation for source documents.
//!
//! This module provides the [`FoamValue`] enum which represents one node of a
//! YAML/JSON document after loading. It is the input of the dictionary
//! renderer and of every case operation.
//!
//! ## Core Types
//!
//! - [`FoamValue`]: null, bool, number, string, sequence or mapping
//! - [`Number`]: integer or floating-point number
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_foam::{foam, FoamValue};
//!
//! let head = FoamValue::Null;
//! let flag = FoamValue::from(true);
//! let count = FoamValue::from(42);
//! let text = FoamValue::from("uniform 0");
//!
//! let patch = foam!({
//!     "type": "fixedValue",
//!     "value": "uniform (1 0 0)"
//! });
//! assert!(patch.is_object());
//! ```
//!
//! ### Key-Path Access
//!
//! ```rust
//! use serde_foam::{foam, FoamValue};
//!
//! let mut foam = foam!({ "system": { "controlDict": { "endTime": 0.5 } } });
//! assert_eq!(
//!     foam.pointer(&["system", "controlDict", "endTime"]).and_then(FoamValue::as_f64),
//!     Some(0.5)
//! );
//!
//! foam.set_path(&["system", "controlDict", "endTime"], FoamValue::from(1.0)).unwrap();
//! foam.set_path(&["system", "fvSchemes", "ddtSchemes"], FoamValue::from("Euler")).unwrap();
//! assert!(foam.contains_path(&["system", "fvSchemes"]));
//! ```

use crate::{Error, FoamMap, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed node of a source document.
///
/// `Null` doubles as the "no value" marker: inside an element of a
/// sequence of mappings, a key whose value is `Null` becomes the element's
/// head label.
///
/// # Examples
///
/// ```rust
/// use serde_foam::{FoamValue, Number};
///
/// let null = FoamValue::Null;
/// let num = FoamValue::Number(Number::Integer(42));
/// let text = FoamValue::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum FoamValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<FoamValue>),
    Object(FoamMap),
}

/// A numeric value, either an integer or a float.
///
/// Integers print in decimal; floats print in Rust's shortest round-trip
/// form and always keep a decimal point or exponent, so `2.0` stays `2.0`
/// and never collapses into the integer `2`.
///
/// # Examples
///
/// ```rust
/// use serde_foam::Number;
///
/// assert_eq!(Number::Integer(42).to_string(), "42");
/// assert_eq!(Number::Float(2.0).to_string(), "2.0");
/// assert_eq!(Number::Float(0.005).to_string(), "0.005");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it is an integer or a whole float in range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::Number;
    ///
    /// assert_eq!(Number::Integer(4).as_i64(), Some(4));
    /// assert_eq!(Number::Float(4.0).as_i64(), Some(4));
    /// assert_eq!(Number::Float(4.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{:?}", fl),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl FoamValue {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, FoamValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, FoamValue::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, FoamValue::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, FoamValue::String(_))
    }

    /// Returns `true` if the value is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, FoamValue::Array(_))
    }

    /// Returns `true` if the value is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, FoamValue::Object(_))
    }

    /// Returns `true` for booleans, numbers and strings.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            FoamValue::Bool(_) | FoamValue::Number(_) | FoamValue::String(_)
        )
    }

    /// Short name of the value's kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            FoamValue::Null => "null",
            FoamValue::Bool(_) => "bool",
            FoamValue::Number(Number::Integer(_)) => "integer",
            FoamValue::Number(Number::Float(_)) => "float",
            FoamValue::String(_) => "string",
            FoamValue::Array(_) => "sequence",
            FoamValue::Object(_) => "mapping",
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FoamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FoamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FoamValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Returns the value as `f64`, parsing numeric strings such as `"0.5"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::FoamValue;
    ///
    /// assert_eq!(FoamValue::from(3).as_f64(), Some(3.0));
    /// assert_eq!(FoamValue::from("0.5").as_f64(), Some(0.5));
    /// assert_eq!(FoamValue::from("latestTime").as_f64(), None);
    /// ```
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FoamValue::Number(n) => Some(n.as_f64()),
            FoamValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// If the value is a sequence, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<FoamValue>> {
        match self {
            FoamValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a mapping, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&FoamMap> {
        match self {
            FoamValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// If the value is a mapping, returns a mutable reference to it.
    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut FoamMap> {
        match self {
            FoamValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// The text a scalar contributes to a dictionary file, without the `;`.
    ///
    /// Returns `None` for null, sequences and mappings.
    #[must_use]
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            FoamValue::Bool(b) => Some(b.to_string()),
            FoamValue::Number(n) => Some(n.to_string()),
            FoamValue::String(s) => Some(s.clone()),
            FoamValue::Null | FoamValue::Array(_) | FoamValue::Object(_) => None,
        }
    }

    /// Follows a key path through mappings and sequences.
    ///
    /// Sequence segments must parse as an index.
    pub fn pointer<S: AsRef<str>>(&self, path: &[S]) -> Option<&FoamValue> {
        let mut node = self;
        for key in path {
            node = match node {
                FoamValue::Object(map) => map.get(key.as_ref())?,
                FoamValue::Array(arr) => arr.get(key.as_ref().parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Mutable counterpart of [`FoamValue::pointer`].
    pub fn pointer_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Option<&mut FoamValue> {
        let mut node = self;
        for key in path {
            node = match node {
                FoamValue::Object(map) => map.get_mut(key.as_ref())?,
                FoamValue::Array(arr) => arr.get_mut(key.as_ref().parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Returns `true` if [`FoamValue::pointer`] would find a value.
    #[must_use]
    pub fn contains_path<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.pointer(path).is_some()
    }

    /// Sets the value at a key path, creating missing mappings on the way.
    ///
    /// Sequences along the path are indexed, never grown.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty path, an out-of-range sequence index, or
    /// a path that runs through a scalar.
    pub fn set_path<S: AsRef<str>>(&mut self, path: &[S], value: FoamValue) -> Result<()> {
        let (last, parents) = path
            .split_last()
            .ok_or_else(|| Error::custom("cannot set a value at an empty key path"))?;

        let mut node = self;
        for (depth, key) in parents.iter().enumerate() {
            let key = key.as_ref();
            node = match node {
                FoamValue::Object(map) => {
                    map.get_or_insert_with(key, || FoamValue::Object(FoamMap::new()))
                }
                FoamValue::Array(arr) => index_mut(arr, key, &path[..=depth])?,
                other => {
                    return Err(Error::unsupported_value(other.kind(), other, &path[..depth]));
                }
            };
        }

        match node {
            FoamValue::Object(map) => {
                map.insert(last.as_ref().to_string(), value);
                Ok(())
            }
            FoamValue::Array(arr) => {
                *index_mut(arr, last.as_ref(), path)? = value;
                Ok(())
            }
            other => Err(Error::unsupported_value(other.kind(), other, parents)),
        }
    }
}

fn index_mut<'a, S: AsRef<str>>(
    arr: &'a mut [FoamValue],
    key: &str,
    path: &[S],
) -> Result<&'a mut FoamValue> {
    let len = arr.len();
    key.parse::<usize>()
        .ok()
        .and_then(move |i| arr.get_mut(i))
        .ok_or_else(|| {
            let at: Vec<&str> = path.iter().map(|s| s.as_ref()).collect();
            Error::custom(format!(
                "index `{}` out of range for sequence of length {} at `{}`",
                key,
                len,
                at.join("/")
            ))
        })
}

impl Serialize for FoamValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FoamValue::Null => serializer.serialize_unit(),
            FoamValue::Bool(b) => serializer.serialize_bool(*b),
            FoamValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            FoamValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            FoamValue::String(s) => serializer.serialize_str(s),
            FoamValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            FoamValue::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// Mapping key that accepts any scalar.
///
/// YAML allows `0:` or `1e-05:` as keys; time directories are written that
/// way, so keys are normalised to their string form.
struct MapKey(String);

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct MapKeyVisitor;

        impl<'de> Visitor<'de> for MapKeyVisitor {
            type Value = MapKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar mapping key")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<MapKey, E> {
                Ok(MapKey(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<MapKey, E> {
                Ok(MapKey(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<MapKey, E> {
                Ok(MapKey(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<MapKey, E> {
                Ok(MapKey(Number::Float(value).to_string()))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<MapKey, E> {
                Ok(MapKey(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<MapKey, E> {
                Ok(MapKey(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<MapKey, E> {
                Ok(MapKey("null".to_string()))
            }

            fn visit_seq<A>(self, _seq: A) -> std::result::Result<MapKey, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                Err(de::Error::custom("sequence used as a mapping key"))
            }

            fn visit_map<A>(self, _map: A) -> std::result::Result<MapKey, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                Err(de::Error::custom("mapping used as a mapping key"))
            }
        }

        deserializer.deserialize_any(MapKeyVisitor)
    }
}

impl<'de> Deserialize<'de> for FoamValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct FoamValueVisitor;

        impl<'de> Visitor<'de> for FoamValueVisitor {
            type Value = FoamValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any YAML or JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(FoamValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(FoamValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(FoamValue::Number(Number::Integer(value as i64)))
                } else {
                    Ok(FoamValue::Number(Number::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(FoamValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(FoamValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(FoamValue::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(FoamValue::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(FoamValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(FoamValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = FoamMap::new();
                while let Some((MapKey(key), value)) = map.next_entry::<MapKey, FoamValue>()? {
                    if values.insert(key.clone(), value).is_some() {
                        return Err(de::Error::custom(format!("duplicate key `{}`", key)));
                    }
                }
                Ok(FoamValue::Object(values))
            }
        }

        deserializer.deserialize_any(FoamValueVisitor)
    }
}

impl TryFrom<FoamValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: FoamValue) -> crate::Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| Error::custom(format!("expected integer, found {:?}", value)))
    }
}

impl TryFrom<FoamValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: FoamValue) -> crate::Result<Self> {
        match value {
            FoamValue::Number(n) => Ok(n.as_f64()),
            _ => Err(Error::custom(format!("expected number, found {:?}", value))),
        }
    }
}

impl TryFrom<FoamValue> for String {
    type Error = crate::Error;

    fn try_from(value: FoamValue) -> crate::Result<Self> {
        match value {
            FoamValue::String(s) => Ok(s),
            _ => Err(Error::custom(format!("expected string, found {:?}", value))),
        }
    }
}

impl From<bool> for FoamValue {
    fn from(value: bool) -> Self {
        FoamValue::Bool(value)
    }
}

impl From<i32> for FoamValue {
    fn from(value: i32) -> Self {
        FoamValue::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for FoamValue {
    fn from(value: i64) -> Self {
        FoamValue::Number(Number::Integer(value))
    }
}

impl From<u32> for FoamValue {
    fn from(value: u32) -> Self {
        FoamValue::Number(Number::Integer(value as i64))
    }
}

impl From<usize> for FoamValue {
    fn from(value: usize) -> Self {
        if value <= i64::MAX as usize {
            FoamValue::Number(Number::Integer(value as i64))
        } else {
            FoamValue::Number(Number::Float(value as f64))
        }
    }
}

impl From<f64> for FoamValue {
    fn from(value: f64) -> Self {
        FoamValue::Number(Number::Float(value))
    }
}

impl From<String> for FoamValue {
    fn from(value: String) -> Self {
        FoamValue::String(value)
    }
}

impl From<&str> for FoamValue {
    fn from(value: &str) -> Self {
        FoamValue::String(value.to_string())
    }
}

impl From<Vec<FoamValue>> for FoamValue {
    fn from(value: Vec<FoamValue>) -> Self {
        FoamValue::Array(value)
    }
}

impl From<FoamMap> for FoamValue {
    fn from(value: FoamMap) -> Self {
        FoamValue::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    fn sample() -> FoamValue {
        let mut control = FoamMap::new();
        control.insert("application".to_string(), FoamValue::from("icoFoam"));
        control.insert("endTime".to_string(), FoamValue::from(0.5));
        let mut system = FoamMap::new();
        system.insert("controlDict".to_string(), FoamValue::Object(control));
        system.insert(
            "blocks".to_string(),
            FoamValue::Array(vec![FoamValue::from("hex (0 1 2 3 4 5 6 7)")]),
        );
        let mut root = FoamMap::new();
        root.insert("system".to_string(), FoamValue::Object(system));
        FoamValue::Object(root)
    }

    #[test]
    fn test_float_keeps_decimal_point() {
        assert_eq!(Number::Float(2.0).to_string(), "2.0");
        assert_eq!(Number::Float(1e-5).to_string(), "1e-5");
        assert_eq!(Number::Integer(-3).to_string(), "-3");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FoamValue::Null.kind(), "null");
        assert_eq!(FoamValue::from(1).kind(), "integer");
        assert_eq!(FoamValue::from(1.0).kind(), "float");
        assert_eq!(FoamValue::Array(vec![]).kind(), "sequence");
    }

    #[test]
    fn test_pointer_through_sequence() {
        let value = sample();
        assert_eq!(
            value
                .pointer(&["system", "blocks", "0"])
                .and_then(FoamValue::as_str),
            Some("hex (0 1 2 3 4 5 6 7)")
        );
        assert!(value.pointer(&["system", "blocks", "1"]).is_none());
        assert!(value.pointer(&["system", "blocks", "x"]).is_none());
    }

    #[test]
    fn test_set_path_creates_mappings() {
        let mut value = sample();
        value
            .set_path(&["constant", "transportProperties", "nu"], FoamValue::from(0.01))
            .unwrap();
        assert_eq!(
            value
                .pointer(&["constant", "transportProperties", "nu"])
                .and_then(FoamValue::as_f64),
            Some(0.01)
        );
    }

    #[test]
    fn test_set_path_replaces_sequence_element() {
        let mut value = sample();
        value
            .set_path(&["system", "blocks", "0"], FoamValue::from("hex (7 6 5 4 3 2 1 0)"))
            .unwrap();
        assert_eq!(
            value
                .pointer(&["system", "blocks", "0"])
                .and_then(FoamValue::as_str),
            Some("hex (7 6 5 4 3 2 1 0)")
        );
        assert!(value
            .set_path(&["system", "blocks", "5"], FoamValue::Null)
            .is_err());
    }

    #[test]
    fn test_set_path_through_scalar_fails() {
        let mut value = sample();
        let err = value
            .set_path(
                &["system", "controlDict", "application", "x"],
                FoamValue::Null,
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedValueKind { .. }));
    }

    #[test]
    fn test_empty_path() {
        let mut value = sample();
        let empty: [&str; 0] = [];
        assert!(value.set_path(&empty, FoamValue::Null).is_err());
        assert_eq!(value.pointer(&empty), Some(&sample()));
    }

    #[test]
    fn test_tryfrom() {
        assert_eq!(i64::try_from(FoamValue::from(4.0)).unwrap(), 4);
        assert!(i64::try_from(FoamValue::from("4")).is_err());
        assert_eq!(f64::try_from(FoamValue::from(4)).unwrap(), 4.0);
        assert_eq!(
            String::try_from(FoamValue::from("noSlip")).unwrap(),
            "noSlip"
        );
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(FoamValue::from(true).scalar_text().as_deref(), Some("true"));
        assert_eq!(FoamValue::from(0.1).scalar_text().as_deref(), Some("0.1"));
        assert_eq!(FoamValue::Null.scalar_text(), None);
    }
}
