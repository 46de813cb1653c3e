//! The open settings model for plugin instances.
//!
//! Plugin configuration is an open key/value map: the host defines the two
//! mirrored keys below, and every plugin is free to define arbitrary extra
//! keys of its own. Unknown keys are never validated or rejected; they
//! round-trip verbatim so that newer plugin versions can read settings
//! written by older hosts and vice versa.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// Settings key mirroring the `enabled` flag of an instance.
pub const SETTING_ENABLED: &str = "enabled";

/// Settings key mirroring the `visible` flag of an instance.
pub const SETTING_VISIBLE: &str = "visible";

/// A single settings value.
///
/// The variant set mirrors what the settings persistence layer can
/// represent; nested arrays and maps are allowed so plugins can store
/// structured configuration without a fixed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingsValue {
    /// Null value.
    Null,

    /// Boolean value.
    Bool(bool),

    /// Integer value.
    Integer(i64),

    /// Floating-point value.
    Float(f64),

    /// String value.
    String(String),

    /// Array of values.
    Array(Vec<SettingsValue>),

    /// Map of values.
    Map(HashMap<String, SettingsValue>),
}

impl SettingsValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this value is a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get this value as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get this value as a floating-point number. Integers convert.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get this value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as an array.
    pub fn as_array(&self) -> Option<&[SettingsValue]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get this value as a map.
    pub fn as_map(&self) -> Option<&HashMap<String, SettingsValue>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl Default for SettingsValue {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for SettingsValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for SettingsValue {
    fn from(i: i32) -> Self {
        Self::Integer(i as i64)
    }
}

impl From<i64> for SettingsValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f32> for SettingsValue {
    fn from(f: f32) -> Self {
        Self::Float(f as f64)
    }
}

impl From<f64> for SettingsValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for SettingsValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for SettingsValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<SettingsValue>> From<Vec<T>> for SettingsValue {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SettingsValue>> From<HashMap<String, T>> for SettingsValue {
    fn from(m: HashMap<String, T>) -> Self {
        Self::Map(m.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl fmt::Display for SettingsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(fl) => write!(f, "{}", fl),
            Self::String(s) => write!(f, "\"{}\"", s),
            Self::Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Self::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\": {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// The settings map of a plugin instance.
///
/// A thin wrapper over a string-keyed map of [`SettingsValue`]s. On a live
/// instance the map always contains [`SETTING_ENABLED`] and
/// [`SETTING_VISIBLE`], equal to the instance's flags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    entries: HashMap<String, SettingsValue>,
}

impl Settings {
    /// Create an empty settings map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<SettingsValue>,
    ) -> Option<SettingsValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&SettingsValue> {
        self.entries.get(key)
    }

    /// Get a boolean value by key.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(SettingsValue::as_bool)
    }

    /// Get an integer value by key.
    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(SettingsValue::as_integer)
    }

    /// Get a floating-point value by key.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(SettingsValue::as_float)
    }

    /// Get a string value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SettingsValue::as_str)
    }

    /// Check if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<SettingsValue> {
        self.entries.remove(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingsValue)> {
        self.entries.iter()
    }

    /// Iterate over keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Merge another settings map into this one. Keys from `other`
    /// overwrite existing keys.
    pub fn merge(&mut self, other: Settings) {
        self.entries.extend(other.entries);
    }

    /// Serialize to a JSON string for the persistence layer.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize from a JSON string produced by [`Settings::to_json_string`].
    pub fn from_json_string(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }
}

impl FromIterator<(String, SettingsValue)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, SettingsValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<String, SettingsValue>> for Settings {
    fn from(entries: HashMap<String, SettingsValue>) -> Self {
        Self { entries }
    }
}
