//! Set-valued wire fields
//!
//! The daemon encodes sets such as `ExposedPorts` and `Volumes` as JSON objects
//! whose values are all the empty object `{}`. Only key membership carries meaning.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// Empty marker value stored against every key of a [`KeySet`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {}

/// Set of keys transmitted as a mapping to empty markers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet(BTreeSet<String>);

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, returning false if it was already present
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a KeySet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for KeySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for key in &self.0 {
            map.serialize_entry(key, &Marker {})?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KeySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeySetVisitor;

        impl<'de> Visitor<'de> for KeySetVisitor {
            type Value = KeySet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping keys to empty objects, or null")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<KeySet, E> {
                Ok(KeySet::new())
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<KeySet, E> {
                Ok(KeySet::new())
            }

            fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<KeySet, D::Error> {
                deserializer.deserialize_map(self)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<KeySet, A::Error> {
                let mut set = KeySet::new();
                // Marker payloads are ignored; older daemons sometimes send null.
                while let Some((key, _)) = access.next_entry::<String, serde::de::IgnoredAny>()? {
                    set.insert(key);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_option(KeySetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let ports: KeySet = ["80/tcp", "80/tcp", "443/tcp"].into_iter().collect();
        assert_eq!(ports.len(), 2);
        assert!(ports.contains("80/tcp"));
        assert!(ports.contains("443/tcp"));
    }

    #[test]
    fn test_serializes_as_marker_map() {
        let volumes: KeySet = ["/data"].into_iter().collect();
        let json = serde_json::to_string(&volumes).unwrap();
        assert_eq!(json, r#"{"/data":{}}"#);
    }

    #[test]
    fn test_order_not_significant() {
        let a: KeySet = serde_json::from_str(r#"{"443/tcp":{},"80/tcp":{}}"#).unwrap();
        let b: KeySet = serde_json::from_str(r#"{"80/tcp":{},"443/tcp":{}}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_null_is_empty() {
        let set: KeySet = serde_json::from_str("null").unwrap();
        assert!(set.is_empty());
    }
}
