//! # Property Bag
//!
//! The dynamic name → value mapping mirroring the JSON body of a remote object.
//!
//! Values are [`serde_json::Value`], so the legal wire shapes (null, bool, number,
//! text, sequence, mapping) are enumerated by the type itself. An absent key and
//! a stored `null` read back the same way: both are `None`.

use crate::framework::date;
use crate::framework::error::ResourceError;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::{Map, Value};
use std::fmt::Display;

/// The decoded form of a JSON object.
pub type PropertyMap = Map<String, Value>;

/// Key that makes an instance server-backed.
pub const ID: &str = "id";

/// Typed access over a [`PropertyMap`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    map: PropertyMap,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: PropertyMap) -> Self {
        Self { map }
    }

    /// Returns the raw value, or `None` when the key is absent or null.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name).filter(|value| !value.is_null())
    }

    /// Binds `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.map.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.map.remove(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Reads a wire-format timestamp.
    ///
    /// Absent, null, non-text and malformed values all yield `None`; read the raw
    /// property to tell them apart.
    pub fn get_date(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        self.get_str(name).and_then(date::parse_wire)
    }

    /// Stores `value` in wire format, keeping the timestamp's own offset.
    pub fn set_date<Tz>(&mut self, name: impl Into<String>, value: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.set(name, date::format_wire(value));
    }

    /// The `id` property as an integer.
    pub fn id(&self) -> Result<Option<i64>, ResourceError> {
        match self.get(ID) {
            Some(value) => parse_id(value),
            None => Ok(None),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn clear(&mut self) {
        self.map = PropertyMap::new();
    }

    pub fn as_map(&self) -> &PropertyMap {
        &self.map
    }

    pub fn into_map(self) -> PropertyMap {
        self.map
    }
}

impl From<PropertyMap> for PropertyBag {
    fn from(map: PropertyMap) -> Self {
        Self::from_map(map)
    }
}

/// Reads an id value: integers as-is, text holding an integer is parsed.
///
/// `null` counts as "no id".
pub fn parse_id(value: &Value) -> Result<Option<i64>, ResourceError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => number
            .as_i64()
            .map(Some)
            .ok_or_else(|| ResourceError::InvalidId(number.to_string())),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ResourceError::InvalidId(text.clone())),
        other => Err(ResourceError::InvalidId(other.to_string())),
    }
}
