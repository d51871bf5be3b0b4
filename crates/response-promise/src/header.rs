//! Response header names and values.
//!
//! Header names are stored in their canonical form, see [`normalize_header_name`],
//! so lookups with any casing variant of a name hit the same entry.

use http::HeaderMap;
use std::collections::BTreeMap;
use std::collections::btree_map;
use tracing::warn;

/// Canonicalizes a header name: lowercase, then uppercase the first letter and
/// every letter that follows a `-`.
///
/// # Example
/// ```
/// use response_promise::normalize_header_name;
///
/// assert_eq!(normalize_header_name("content-TYPE"), "Content-Type");
/// assert_eq!(normalize_header_name("x-requested-with"), "X-Requested-With");
/// ```
pub fn normalize_header_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut word_start = true;

    for c in name.chars() {
        if word_start {
            normalized.extend(c.to_uppercase());
        } else {
            normalized.extend(c.to_lowercase());
        }
        word_start = c == '-';
    }

    normalized
}

/// The value(s) received for a single header name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HeaderValues {
    /// The header appeared once.
    One(String),
    /// The header appeared several times, values kept in arrival order.
    Many(Vec<String>),
}

impl HeaderValues {
    /// Returns the first value received.
    pub fn first(&self) -> Option<&str> {
        match self {
            HeaderValues::One(value) => Some(value),
            HeaderValues::Many(values) => values.first().map(String::as_str),
        }
    }

    /// Iterates every value in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            HeaderValues::One(value) => std::slice::from_ref(value),
            HeaderValues::Many(values) => values,
        };
        values.iter().map(String::as_str)
    }

    fn push(&mut self, value: String) {
        match self {
            HeaderValues::One(first) => {
                let first = std::mem::take(first);
                *self = HeaderValues::Many(vec![first, value]);
            }
            HeaderValues::Many(values) => values.push(value),
        }
    }
}

impl From<String> for HeaderValues {
    fn from(value: String) -> Self {
        HeaderValues::One(value)
    }
}

impl From<&str> for HeaderValues {
    fn from(value: &str) -> Self {
        HeaderValues::One(value.to_owned())
    }
}

impl From<Vec<String>> for HeaderValues {
    fn from(values: Vec<String>) -> Self {
        HeaderValues::Many(values)
    }
}

impl PartialEq<&str> for HeaderValues {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, HeaderValues::One(value) if value == other)
    }
}

/// Response headers keyed by normalized header name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers {
    inner: BTreeMap<String, HeaderValues>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value under the normalized `name`.
    ///
    /// A name seen before turns its entry into [`HeaderValues::Many`].
    pub fn insert<V: Into<String>>(&mut self, name: &str, value: V) {
        match self.inner.entry(normalize_header_name(name)) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(HeaderValues::One(value.into()));
            }
            btree_map::Entry::Occupied(mut entry) => entry.get_mut().push(value.into()),
        }
    }

    /// Looks up `name` in any casing.
    pub fn get(&self, name: &str) -> Option<&HeaderValues> {
        self.inner.get(&normalize_header_name(name))
    }

    pub(crate) fn remove_normalized(&mut self, normalized_name: &str) -> Option<HeaderValues> {
        self.inner.remove(normalized_name)
    }

    /// Removes `name` in any casing, returning its values.
    pub fn remove(&mut self, name: &str) -> Option<HeaderValues> {
        self.inner.remove(&normalize_header_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValues)> {
        self.inner.iter().map(|(name, values)| (name.as_str(), values))
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name.as_ref(), value);
        }
        headers
    }
}

impl From<&HeaderMap> for Headers {
    /// Values that are not visible ascii (obs-text) are decoded lossily.
    fn from(header_map: &HeaderMap) -> Self {
        let mut headers = Headers::new();
        for (name, value) in header_map {
            match value.to_str() {
                Ok(value) => headers.insert(name.as_str(), value),
                Err(_) => {
                    warn!(header = %name, "header value is not visible ascii, decoding lossily");
                    headers.insert(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
                }
            }
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(normalize_header_name("content-type"), "Content-Type");
        assert_eq!(normalize_header_name("CONTENT-TYPE"), "Content-Type");
        assert_eq!(normalize_header_name("Content-Type"), "Content-Type");
        assert_eq!(normalize_header_name("cOnTeNt-tYpE"), "Content-Type");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_header_name("x-forwarded-FOR");
        assert_eq!(once, "X-Forwarded-For");
        assert_eq!(normalize_header_name(&once), once);
    }

    #[test]
    fn normalize_edge_cases() {
        assert_eq!(normalize_header_name(""), "");
        assert_eq!(normalize_header_name("etag"), "Etag");
        assert_eq!(normalize_header_name("-x"), "-X");
        assert_eq!(normalize_header_name("a--b"), "A--B");
    }

    #[test]
    fn insert_normalizes_and_groups() {
        let mut headers = Headers::new();
        headers.insert("set-cookie", "a=1");
        headers.insert("SET-COOKIE", "b=2");
        headers.insert("content-type", "text/plain");

        assert_eq!(headers.len(), 2);
        assert_eq!(
            headers.get("Set-Cookie"),
            Some(&HeaderValues::Many(vec!["a=1".to_string(), "b=2".to_string()]))
        );
        assert_eq!(headers.get("CONTENT-type"), Some(&HeaderValues::One("text/plain".to_string())));
        assert!(headers.get("accept").is_none());
    }

    #[test]
    fn header_values_accessors() {
        let one = HeaderValues::from("gzip");
        assert_eq!(one.first(), Some("gzip"));
        assert_eq!(one.iter().collect::<Vec<_>>(), vec!["gzip"]);
        assert_eq!(one, "gzip");

        let many = HeaderValues::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(many.first(), Some("a"));
        assert_eq!(many.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_ne!(many, "a");
    }

    #[test]
    fn remove_any_casing() {
        let mut headers: Headers = [("Location", "/next")].into_iter().collect();
        assert!(headers.contains("location"));
        assert_eq!(headers.remove("LOCATION"), Some(HeaderValues::from("/next")));
        assert!(headers.is_empty());
    }

    #[test]
    fn from_header_map() {
        let mut header_map = HeaderMap::new();
        header_map.insert(http::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        header_map.append(http::header::VARY, HeaderValue::from_static("accept"));
        header_map.append(http::header::VARY, HeaderValue::from_static("origin"));

        let headers = Headers::from(&header_map);
        assert_eq!(headers.get("content-type"), Some(&HeaderValues::from("application/json")));
        assert_eq!(headers.get("vary").unwrap().iter().collect::<Vec<_>>(), vec!["accept", "origin"]);
    }

    #[test]
    fn from_header_map_keeps_opaque_value() {
        let mut header_map = HeaderMap::new();
        header_map.insert(http::header::SERVER, HeaderValue::from_bytes(b"caf\xe9").unwrap());
        header_map.insert(http::header::ETAG, HeaderValue::from_static("\"v1\""));

        let headers = Headers::from(&header_map);
        assert_eq!(headers.get("server"), Some(&HeaderValues::from("caf\u{fffd}")));
        assert_eq!(headers.get("etag"), Some(&HeaderValues::from("\"v1\"")));
    }

    #[test]
    fn iter_yields_normalized_names_in_order() {
        let headers: Headers = [("x-b", "2"), ("X-A", "1"), ("x-b", "3")].into_iter().collect();

        let entries = headers.iter().map(|(name, values)| (name, values.iter().collect::<Vec<_>>())).collect::<Vec<_>>();
        assert_eq!(entries, vec![("X-A", vec!["1"]), ("X-B", vec!["2", "3"])]);
    }
}
