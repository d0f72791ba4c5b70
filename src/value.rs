use std::{
    collections::{BTreeMap, btree_map},
    fmt,
};

use serde::Serialize;

/// A single value stored in a flash payload.
///
/// Every variant has a fixed textual form, which is what ends up in the cookie:
///
/// | variant | text |
/// |---------|------|
/// | `Bool`  | `true` / `false` |
/// | `Str`   | the string itself |
/// | `Int`   | base 10, e.g. `-12` |
/// | `Float` | shortest round-trip form, e.g. `1.5`, `3`, `NaN` |
#[derive(Debug, Clone, PartialEq)]
pub enum FlashValue {
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for FlashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for FlashValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FlashValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FlashValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i32> for FlashValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for FlashValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for FlashValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f32> for FlashValue {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<f64> for FlashValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Which flavour of flash message a write produces.
///
/// Every kind except [`FlashKind::Data`] tags the payload with a boolean `true` under its
/// own name before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Error,
    Success,
    Warn,
    Info,
    Data,
}

impl FlashKind {
    /// Key inserted into the payload for this kind, if any.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Self::Error => Some("error"),
            Self::Success => Some("success"),
            Self::Warn => Some("warn"),
            Self::Info => Some("info"),
            Self::Data => None,
        }
    }
}

/// The data a handler writes into the flash cookie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlashPayload(BTreeMap<String, FlashValue>);

impl FlashPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FlashPayload::insert`].
    #[must_use]
    pub fn with<K: Into<String>, V: Into<FlashValue>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<FlashValue>>(
        &mut self,
        key: K,
        value: V,
    ) -> Option<FlashValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FlashValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FlashValue> {
        self.0.iter()
    }

    pub(crate) fn tagged(mut self, kind: FlashKind) -> Self {
        if let Some(tag) = kind.tag() {
            self.insert(tag, true);
        }
        self
    }
}

impl<K: Into<String>, V: Into<FlashValue>> FromIterator<(K, V)> for FlashPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<FlashValue>, const N: usize> From<[(K, V); N]> for FlashPayload {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a FlashPayload {
    type Item = (&'a String, &'a FlashValue);
    type IntoIter = btree_map::Iter<'a, String, FlashValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Data recovered from an inbound flash cookie. Every value is the text it was encoded as.
///
/// Serializes as a flat JSON object, so it can be handed straight to a template or `Json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlashData(BTreeMap<String, String>);

impl FlashData {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether the payload was written with the tag for `kind`.
    ///
    /// Always `false` for [`FlashKind::Data`], which has no tag.
    pub fn is_kind(&self, kind: FlashKind) -> bool {
        kind.tag().and_then(|tag| self.get(tag)) == Some("true")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    pub(crate) fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_owned(), value.to_owned());
    }
}

impl IntoIterator for FlashData {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlashData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
