//! An ordered, `URLSearchParams`-like view of a query string.

use std::fmt;
use url::form_urlencoded;

/// Decoded query-string pairs, in the order they appeared or were appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse query text.
    ///
    /// Accepts a bare query (`a=1&b=2`), a `?`-prefixed query, or a full URL.
    /// Anything after `#` is ignored. A URL without a query yields no pairs.
    pub fn parse(input: &str) -> Self {
        let without_fragment = input.split('#').next().unwrap_or("");
        let query = match without_fragment.split_once('?') {
            Some((_, query)) => query,
            None if without_fragment.contains("://") => "",
            None => without_fragment,
        };

        let pairs = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { pairs }
    }

    /// The first value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Serializes as `application/x-www-form-urlencoded`, without a leading `?`.
impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        f.write_str(&encoded)
    }
}
