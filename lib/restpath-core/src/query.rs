//! Query options and their query-string encoding.
//!
//! Nested values use bracket notation (`filter[kind]=mobile`, `ids[0]=1`),
//! keys keep their insertion order and everything outside the RFC 3986
//! unreserved set is percent-encoded, so the same options always give the
//! same string.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Value};

use crate::{Error, ErrorCode, Result};

/// Everything but `A-Z a-z 0-9 - . _ ~`.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Key-value options appended to a request URL as a query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions(Map<String, Value>);

impl QueryOptions {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an option, replacing a previous value with the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Option by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` when there is no option.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Options from any serializable value.
    ///
    /// Objects keep their keys, arrays use their indices as keys and `null`
    /// gives empty options.
    pub fn from_serialize<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(|err| {
            Error::new(ErrorCode::BadRequest)
                .with_message("query options could not be serialized")
                .with_cause(err)
        })?;
        Self::try_from(value)
    }

    /// Encode as a query string, without the leading `?`.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            encode_value(&mut pairs, key.clone(), value);
        }
        pairs.join("&")
    }

    /// The underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn encode_value(pairs: &mut Vec<String>, key: String, value: &Value) {
    match value {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                encode_value(pairs, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(entries) => {
            for (name, item) in entries {
                encode_value(pairs, format!("{key}[{name}]"), item);
            }
        }
        Value::Null => pairs.push(format!("{}=", encode(&key))),
        Value::Bool(flag) => pairs.push(format!("{}={flag}", encode(&key))),
        Value::Number(number) => pairs.push(format!("{}={number}", encode(&key))),
        Value::String(text) => pairs.push(format!("{}={}", encode(&key), encode(text))),
    }
}

fn encode(text: &str) -> String {
    utf8_percent_encode(text, QUERY_ENCODE_SET).to_string()
}

impl From<Map<String, Value>> for QueryOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for QueryOptions {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Array(items) => Ok(Self(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect(),
            )),
            Value::Null => Ok(Self::new()),
            other => Err(Error::new(ErrorCode::BadRequest)
                .with_message("query options must be an object or an array")
                .with_info("options", other)),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for QueryOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
