//! Route patterns and placeholder substitution.
//!
//! A pattern is literal text with placeholders of the form `<name>` or
//! `<converter:name>`:
//!
//! ```text
//! /users/<int:id>/posts/<slug>
//!         ^^^^^^^^       ^^^^^^
//!         converter `int`, name `id`
//! ```
//!
//! Converters are type hints for the reader. Substitution only looks at the
//! name, and matching only treats the `path` converter specially (it may
//! span `/`).

use std::sync::LazyLock;

use regex::Regex;

use crate::encode::encode;
use crate::params::Params;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\s*((?:[A-Za-z0-9_]+:)*)([A-Za-z0-9_]+)\s*>").expect("placeholder regex")
});

/// One piece of a parsed [`Rule`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder {
        converter: Option<String>,
        name: String,
    },
}

/// Outcome of substituting parameters into one [`Rule`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Substitution {
    /// Every placeholder had a parameter. `used` lists the consumed names in
    /// pattern order.
    Resolved { path: String, used: Vec<String> },
    /// The first placeholder without a parameter.
    Unresolved { missing: String },
}

/// A parsed route pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    raw: String,
    segments: Vec<Segment>,
}

impl Rule {
    /// Parses a pattern. Never fails: text that does not look like a
    /// placeholder is literal.
    pub fn new(pattern: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(pattern) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                segments.push(Segment::Literal(pattern[last..whole.start()].to_owned()));
            }
            let converter = caps
                .get(1)
                .map(|m| m.as_str().trim_end_matches(':'))
                .filter(|c| !c.is_empty())
                .map(str::to_owned);
            let name = caps.get(2).map_or("", |m| m.as_str()).to_owned();
            segments.push(Segment::Placeholder { converter, name });
            last = whole.end();
        }
        if last < pattern.len() {
            segments.push(Segment::Literal(pattern[last..].to_owned()));
        }

        Self { raw: pattern.to_owned(), segments }
    }

    /// The pattern exactly as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in pattern order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Fills every placeholder from `params`, encoding the values.
    ///
    /// Stops at the first placeholder with no matching parameter.
    pub fn substitute(&self, params: &Params) -> Substitution {
        let mut path = String::with_capacity(self.raw.len());
        let mut used = Vec::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Placeholder { name, .. } => {
                    let Some(value) = params.get(name) else {
                        return Substitution::Unresolved { missing: name.clone() };
                    };
                    path.push_str(&encode(value));
                    used.push(name.clone());
                }
            }
        }

        Substitution::Resolved { path, used }
    }

    /// The same pattern in matchit's `{name}` syntax.
    ///
    /// `<path:name>` becomes the catch-all `{*name}`; literal braces are
    /// escaped.
    pub(crate) fn to_matchit(&self) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    out.push_str(&text.replace('{', "{{").replace('}', "}}"));
                }
                Segment::Placeholder { converter, name } => {
                    if converter.as_deref() == Some("path") {
                        out.push_str(&format!("{{*{name}}}"));
                    } else {
                        out.push_str(&format!("{{{name}}}"));
                    }
                }
            }
        }
        out
    }
}
