//! Route table snapshot and the `url_for` algorithm.
//!
//! [`UrlMap`] is what the browser receives: every endpoint name mapped to
//! its patterns, in registration order.
//!
//! ```text
//! {
//!     "user": {
//!         "rules": [
//!             "/users/<int:id>/<tab>",
//!             "/users/<int:id>"
//!         ]
//!     }
//! }
//! ```
//!
//! [`UrlMap::build`] walks an endpoint's patterns in order and picks the
//! first one whose placeholders can all be filled. Parameters the chosen
//! pattern did not consume become the query string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::encode::encode;
use crate::error::Result;
use crate::params::Params;
use crate::rule::{Rule, Substitution};

/// The patterns registered under one endpoint name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRules {
    pub rules: Vec<String>,
}

/// An immutable endpoint → patterns table.
///
/// Endpoints are kept sorted by name so the serialized form is stable from
/// one request to the next.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlMap {
    endpoints: BTreeMap<String, EndpointRules>,
}

impl UrlMap {
    /// Groups `(endpoint, pattern)` pairs by endpoint.
    ///
    /// Patterns keep the order they arrive in. A pair seen twice (one route
    /// registered for several methods) is stored once.
    pub fn from_rules<I, E, P>(rules: I) -> Self
    where
        I: IntoIterator<Item = (E, P)>,
        E: Into<String>,
        P: Into<String>,
    {
        let mut endpoints: BTreeMap<String, EndpointRules> = BTreeMap::new();
        for (endpoint, pattern) in rules {
            let pattern = pattern.into();
            let entry = endpoints.entry(endpoint.into()).or_default();
            if !entry.rules.contains(&pattern) {
                entry.rules.push(pattern);
            }
        }
        Self { endpoints }
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Patterns for `endpoint`, in registration order.
    pub fn rules(&self, endpoint: &str) -> Option<&[String]> {
        self.endpoints.get(endpoint).map(|e| e.rules.as_slice())
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    /// Builds a URL for `endpoint`.
    ///
    /// Returns an empty string when the endpoint is unknown or when none of
    /// its patterns can be filled from `params`.
    ///
    /// ```rust
    /// use urlmap::{Params, UrlMap};
    ///
    /// let map = UrlMap::from_rules([
    ///     ("item", "/item/<id>/<sub>"),
    ///     ("item", "/item/<id>"),
    /// ]);
    ///
    /// let params = Params::new().with("id", 7).with("q", "a b");
    /// assert_eq!(map.build("item", &params), "/item/7?q=a+b");
    /// assert_eq!(map.build("nope", &params), "");
    /// ```
    pub fn build(&self, endpoint: &str, params: &Params) -> String {
        let Some(entry) = self.endpoints.get(endpoint) else {
            trace!(endpoint, "url_for: unknown endpoint");
            return String::new();
        };

        let chosen = entry.rules.iter().find_map(|pattern| {
            match Rule::new(pattern).substitute(params) {
                Substitution::Resolved { path, used } => Some((path, used)),
                Substitution::Unresolved { missing } => {
                    trace!(endpoint, pattern = pattern.as_str(), missing = missing.as_str(), "url_for: pattern skipped");
                    None
                }
            }
        });

        let Some((path, used)) = chosen else {
            trace!(endpoint, "url_for: no pattern could be filled");
            return String::new();
        };

        let query = params
            .iter()
            .filter(|(k, _)| !used.iter().any(|u| u.as_str() == *k))
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() { path } else { format!("{path}?{query}") }
    }

    /// Serializes the table as a JSON literal with a four-space indent.
    ///
    /// `U+2028` and `U+2029` are valid in JSON strings but end a line in
    /// older JavaScript engines, so they are escaped.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever writes valid UTF-8.
        let json = String::from_utf8_lossy(&buf);
        Ok(json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(rules: &[(&str, &str)]) -> UrlMap {
        UrlMap::from_rules(rules.iter().copied())
    }

    #[test]
    fn groups_by_endpoint_preserving_order() {
        let m = map(&[("a", "/a/<x>"), ("b", "/b"), ("a", "/a")]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.rules("a").unwrap(), ["/a/<x>", "/a"]);
        assert_eq!(m.rules("b").unwrap(), ["/b"]);
        assert!(m.rules("c").is_none());
    }

    #[test]
    fn duplicate_pairs_collapse() {
        let m = map(&[("user", "/u/<id>"), ("user", "/u/<id>")]);
        assert_eq!(m.rules("user").unwrap(), ["/u/<id>"]);
    }

    #[test]
    fn empty_input_is_empty_table() {
        let m = UrlMap::from_rules(Vec::<(String, String)>::new());
        assert!(m.is_empty());
        assert_eq!(m.to_json().unwrap(), "{}");
    }

    #[test]
    fn unknown_endpoint_is_empty() {
        let m = map(&[("a", "/a")]);
        assert_eq!(m.build("b", &Params::new()), "");
        assert_eq!(m.build("b", &Params::new().with("x", 1)), "");
    }

    #[test]
    fn literal_pattern_plus_query() {
        let m = map(&[("home", "/")]);
        assert_eq!(m.build("home", &Params::new()), "/");
        assert_eq!(m.build("home", &Params::new().with("page", 2)), "/?page=2");
    }

    #[test]
    fn single_placeholder() {
        let m = map(&[("item", "/item/<id>")]);
        assert_eq!(m.build("item", &Params::new().with("id", "42")), "/item/42");
    }

    #[test]
    fn first_satisfiable_pattern_wins() {
        let m = map(&[("item", "/item/<id>/<sub>"), ("item", "/item/<id>")]);
        assert_eq!(m.build("item", &Params::new().with("id", "7")), "/item/7");
        assert_eq!(
            m.build("item", &Params::new().with("id", "7").with("sub", "x")),
            "/item/7/x"
        );
    }

    #[test]
    fn earlier_pattern_preferred_over_more_specific_later_one() {
        let m = map(&[("item", "/item/<id>"), ("item", "/item/<id>/<sub>")]);
        assert_eq!(
            m.build("item", &Params::new().with("id", "7").with("sub", "x")),
            "/item/7?sub=x"
        );
    }

    #[test]
    fn all_patterns_unsatisfiable_is_empty() {
        let m = map(&[("item", "/item/<id>"), ("item", "/item/<id>/<sub>")]);
        assert_eq!(m.build("item", &Params::new().with("sub", "x")), "");
    }

    #[test]
    fn used_set_comes_from_chosen_pattern_only() {
        // `sub` is consumed by the failed first attempt but must still reach
        // the query string of the chosen second pattern.
        let m = map(&[("item", "/item/<sub>/<id>"), ("item", "/other/<other>")]);
        let params = Params::new().with("sub", "s").with("other", "o");
        assert_eq!(m.build("item", &params), "/other/o?sub=s");
    }

    #[test]
    fn value_encoding() {
        let m = map(&[("x", "/x/<v>")]);
        assert_eq!(m.build("x", &Params::new().with("v", "a b/c")), "/x/a+b%2Fc");
    }

    #[test]
    fn extra_params_become_query_in_order() {
        let m = map(&[("e", "/x/<id>")]);
        let params = Params::new().with("id", "1").with("q", "a b");
        assert_eq!(m.build("e", &params), "/x/1?q=a+b");

        let params = Params::new().with("z", 1).with("id", "1").with("a b", "c&d");
        assert_eq!(m.build("e", &params), "/x/1?z=1&a+b=c%26d");
    }

    #[test]
    fn empty_value_still_counts_as_present() {
        let m = map(&[("e", "/x/<id>")]);
        assert_eq!(m.build("e", &Params::new().with("id", "")), "/x/");
    }

    #[test]
    fn build_is_idempotent() {
        let m = map(&[("e", "/x/<id>"), ("e", "/x")]);
        let params = Params::new().with("id", "é").with("q", "1");
        assert_eq!(m.build("e", &params), m.build("e", &params));
    }

    #[test]
    fn json_shape() {
        let m = map(&[("b", "/b"), ("a", "/a/<id>")]);
        let expected = "{\n    \"a\": {\n        \"rules\": [\n            \"/a/<id>\"\n        ]\n    },\n    \"b\": {\n        \"rules\": [\n            \"/b\"\n        ]\n    }\n}";
        assert_eq!(m.to_json().unwrap(), expected);
    }

    #[test]
    fn json_keeps_unicode_but_escapes_line_separators() {
        let m = map(&[("café", "/caf\u{e9}/\u{2028}")]);
        let json = m.to_json().unwrap();
        assert!(json.contains("café"));
        assert!(json.contains("\\u2028"));
        assert!(!json.contains('\u{2028}'));
    }

    #[test]
    fn json_parses_back() {
        let m = map(&[("a", "/a/<id>"), ("a", "/a")]);
        let back: UrlMap = serde_json::from_str(&m.to_json().unwrap()).unwrap();
        assert_eq!(back, m);
    }
}
