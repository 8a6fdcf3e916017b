//! Ordered URL parameters.

use std::fmt::Display;

use indexmap::IndexMap;

/// Parameters passed to [`UrlMap::build`](crate::UrlMap::build).
///
/// Keys keep their insertion order; parameters that no placeholder consumes
/// land in the query string in that order. Values are stringified on
/// insertion, so anything `Display` works:
///
/// ```rust
/// use urlmap::Params;
///
/// let params = Params::new().with("id", 42).with("q", "a b");
/// assert_eq!(params.get("id"), Some("42"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(IndexMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter and returns `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a parameter. An existing key keeps its position and takes
    /// the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        self.0.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl<K: Into<String>, V: Display, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let params = Params::from([("b", "2"), ("a", "1"), ("c", "3")]);
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn reinsert_replaces_value_in_place() {
        let params = Params::new().with("a", 1).with("b", 2).with("a", 3);
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, [("a", "3"), ("b", "2")]);
    }

    #[test]
    fn stringifies_scalars() {
        let params = Params::new().with("n", 7).with("f", 1.5).with("t", true);
        assert_eq!(params.get("n"), Some("7"));
        assert_eq!(params.get("f"), Some("1.5"));
        assert_eq!(params.get("t"), Some("true"));
        assert!(params.get("missing").is_none());
    }
}
