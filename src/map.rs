//! Ordered map type for dictionary mappings.
//!
//! This module provides [`FoamMap`], a wrapper around [`IndexMap`] that maintains
//! insertion order for mapping entries. Order matters for OpenFOAM dictionaries:
//! entries are emitted exactly in the order they were written in the source
//! document, and some solvers read entries positionally (`FoamFile` first).
//!
//! ## Examples
//!
//! ```rust
//! use serde_foam::{FoamMap, FoamValue};
//!
//! let mut map = FoamMap::new();
//! map.insert("type".to_string(), FoamValue::from("fixedValue"));
//! map.insert("value".to_string(), FoamValue::from("uniform 0"));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("type").and_then(|v| v.as_str()), Some("fixedValue"));
//! ```

use crate::FoamValue;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to document values.
///
/// This is a thin wrapper around [`IndexMap`] that maintains insertion order.
///
/// # Examples
///
/// ```rust
/// use serde_foam::{FoamMap, FoamValue};
///
/// let mut map = FoamMap::new();
/// map.insert("first".to_string(), FoamValue::from(1));
/// map.insert("second".to_string(), FoamValue::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FoamMap(IndexMap<String, FoamValue>);

impl FoamMap {
    /// Creates an empty `FoamMap`.
    #[must_use]
    pub fn new() -> Self {
        FoamMap(IndexMap::new())
    }

    /// Creates an empty `FoamMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FoamMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::{FoamMap, FoamValue};
    ///
    /// let mut map = FoamMap::new();
    /// assert!(map.insert("key".to_string(), FoamValue::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), FoamValue::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: FoamValue) -> Option<FoamValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FoamValue> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut FoamValue> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, shifting later entries down so the order of the rest is kept.
    pub fn remove(&mut self, key: &str) -> Option<FoamValue> {
        self.0.shift_remove(key)
    }

    /// Returns the value for `key`, inserting the result of `default` first if absent.
    pub fn get_or_insert_with<F>(&mut self, key: &str, default: F) -> &mut FoamValue
    where
        F: FnOnce() -> FoamValue,
    {
        self.0.entry(key.to_string()).or_insert_with(default)
    }

    /// Returns a copy of the map without `key`, leaving `self` untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::{FoamMap, FoamValue};
    ///
    /// let mut map = FoamMap::new();
    /// map.insert("wall".to_string(), FoamValue::Null);
    /// map.insert("type".to_string(), FoamValue::from("patch"));
    ///
    /// let trimmed = map.without("wall");
    /// assert_eq!(trimmed.len(), 1);
    /// assert_eq!(map.len(), 2);
    /// ```
    #[must_use]
    pub fn without(&self, key: &str) -> FoamMap {
        self.iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, FoamValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, FoamValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FoamValue> {
        self.0.iter()
    }
}

impl From<HashMap<String, FoamValue>> for FoamMap {
    fn from(map: HashMap<String, FoamValue>) -> Self {
        FoamMap(map.into_iter().collect())
    }
}

impl From<FoamMap> for HashMap<String, FoamValue> {
    fn from(map: FoamMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for FoamMap {
    type Item = (String, FoamValue);
    type IntoIter = indexmap::map::IntoIter<String, FoamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FoamMap {
    type Item = (&'a String, &'a FoamValue);
    type IntoIter = indexmap::map::Iter<'a, String, FoamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, FoamValue)> for FoamMap {
    fn from_iter<T: IntoIterator<Item = (String, FoamValue)>>(iter: T) -> Self {
        FoamMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_keeps_order() {
        let mut map: FoamMap = ["a", "b", "c"]
            .iter()
            .map(|k| (k.to_string(), FoamValue::from(1)))
            .collect();
        map.remove("b");
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut map = FoamMap::new();
        map.insert("a".to_string(), FoamValue::from(1));
        map.insert("b".to_string(), FoamValue::from(2));
        map.insert("a".to_string(), FoamValue::from(3));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&FoamValue::from(3)));
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut map = FoamMap::new();
        map.get_or_insert_with("system", || FoamValue::Object(FoamMap::new()));
        assert!(map.get("system").map(FoamValue::is_object).unwrap_or(false));
    }
}
