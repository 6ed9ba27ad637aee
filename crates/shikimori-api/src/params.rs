//! Per-call request parameters
//!
//! Endpoint methods take a `RequestOptions` for the open-ended parts of a
//! call: extra headers, query parameters, and the multipart switch. Query
//! and header lists keep insertion order and allow duplicate keys, so a
//! caller's `page=1&page=2` reaches the server unchanged.

use std::fmt::Display;
use std::path::Path;

use serde_json::Value;

/// Ordered query parameters. Duplicate keys are retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.push(key, value);
        self
    }

    /// Append one parameter per value under the same key (`ids=1&ids=2`).
    pub fn with_all<V: Display>(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let key = key.into();
        for value in values {
            self.push(key.clone(), value);
        }
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Display) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove every pair stored under `key`, returning the first value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let mut removed = None;
        self.pairs.retain(|(k, v)| {
            if k != key {
                return true;
            }
            if removed.is_none() {
                removed = Some(v.clone());
            }
            false
        });
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Display, const N: usize> From<[(K, V); N]> for Query {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        query.extend(iter);
        query
    }
}

impl<K: Into<String>, V: Display> Extend<(K, V)> for Query {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.push(k, v);
        }
    }
}

impl IntoIterator for Query {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// Ordered caller-supplied headers. A `None` value means "not set" and the
/// header is dropped before dispatch instead of being sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, Option<String>)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((name.into(), Some(value.into())));
        self
    }

    pub fn with_optional(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.entries.push((name.into(), value));
        self
    }

    /// Headers that carry a value, in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Headers {
    fn from(entries: [(K, V); N]) -> Self {
        entries
            .into_iter()
            .fold(Headers::new(), |headers, (k, v)| headers.with(k, v))
    }
}

/// Open-ended part of a call: extra headers, query, and body encoding.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Headers,
    pub query: Query,
    /// Encode the body as `multipart/form-data` instead of JSON.
    pub as_form: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers = self.headers.with(name, value);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.query.push(key, value);
        self
    }

    pub fn as_form(mut self) -> Self {
        self.as_form = true;
        self
    }
}

impl From<Query> for RequestOptions {
    fn from(query: Query) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }
}

impl From<Headers> for RequestOptions {
    fn from(headers: Headers) -> Self {
        Self {
            headers,
            ..Self::default()
        }
    }
}

impl From<()> for RequestOptions {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

/// A file attached to a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a file from disk, naming the part after the file.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_owned());
        Ok(Self::new(file_name, bytes))
    }
}

/// One multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(Upload),
}

/// Ordered multipart fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(String, FormValue)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.fields
            .push((name.into(), FormValue::Text(value.to_string())));
        self
    }

    pub fn file(mut self, name: impl Into<String>, upload: Upload) -> Self {
        self.fields.push((name.into(), FormValue::File(upload)));
        self
    }

    /// Flatten a JSON object into text fields. Strings are sent unquoted,
    /// nulls are skipped, other values use their JSON text. Non-object
    /// values produce an empty form.
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::new();
        };
        map.iter().fold(Self::new(), |form, (name, value)| match value {
            Value::Null => form,
            Value::String(s) => form.text(name, s),
            other => form.text(name, other),
        })
    }

    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<(String, FormValue)> {
        self.fields
    }
}

/// Request body for POST and PUT.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Form(Form),
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

impl From<Form> for Body {
    fn from(form: Form) -> Self {
        Body::Form(form)
    }
}
