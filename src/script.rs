//! The generated `flask_util.js` script.
//!
//! The script is a fixed JavaScript skeleton with the route table pasted in
//! as an object literal. It defines one global:
//!
//! ```text
//! flask_util.url_for('user', {id: 42, tab: 'posts'})   // "/users/42/posts"
//! flask_util.url_encode('a b/c')                       // "a+b%2Fc"
//! ```
//!
//! `url_for` in the script follows [`UrlMap::build`] rule for rule; keep the
//! two in step when touching either.

use crate::error::Result;
use crate::url_map::UrlMap;

/// Content type the script is served with.
pub const CONTENT_TYPE: &str = "text/javascript; charset=UTF-8";

const HEAD: &str = "var flask_util = function() {\n    var url_map = ";

const TAIL: &str = r#";

    var placeholder = /<\s*((?:[A-Za-z0-9_]+:)*)([A-Za-z0-9_]+)\s*>/g;
    var unreserved = /^[a-zA-Z0-9\-_.]+/;

    function has(obj, key) {
        return Object.prototype.hasOwnProperty.call(obj, key);
    }

    function present(params, key) {
        return has(params, key) && params[key] !== undefined && params[key] !== null;
    }

    function url_encode(value) {
        var input = String(value);
        var output = '';
        var i = 0;
        while (i < input.length) {
            var run = unreserved.exec(input.slice(i));
            if (run !== null) {
                output += run[0];
                i += run[0].length;
                continue;
            }
            var code = input.charCodeAt(i);
            if (code === 32) {
                output += '+';
            } else {
                var hex = code.toString(16).toUpperCase();
                output += '%' + (hex.length < 2 ? '0' : '') + hex;
            }
            i++;
        }
        return output;
    }

    function substitute(rule, params) {
        var used = Object.create(null);
        var path = '';
        var last = 0;
        var match;
        placeholder.lastIndex = 0;
        while ((match = placeholder.exec(rule)) !== null) {
            var name = match[2];
            if (!present(params, name)) {
                return null;
            }
            path += rule.slice(last, match.index) + url_encode(params[name]);
            used[name] = true;
            last = placeholder.lastIndex;
        }
        return {path: path + rule.slice(last), used: used};
    }

    function url_for(endpoint, params) {
        params = params || {};
        if (!has(url_map, endpoint)) {
            return '';
        }
        var rules = url_map[endpoint].rules;

        var chosen = null;
        for (var i = 0; i < rules.length && chosen === null; i++) {
            chosen = substitute(rules[i], params);
        }
        if (chosen === null) {
            return '';
        }

        var query = [];
        for (var k in params) {
            if (!present(params, k) || chosen.used[k]) {
                continue;
            }
            query.push(url_encode(k) + '=' + url_encode(params[k]));
        }

        return query.length > 0 ? chosen.path + '?' + query.join('&') : chosen.path;
    }

    return {
        url_for: url_for,
        url_encode: url_encode
    };
}();
"#;

/// Renders the script for `map`.
pub fn render(map: &UrlMap) -> Result<String> {
    let json = map.to_json()?;
    let mut out = String::with_capacity(HEAD.len() + json.len() + TAIL.len());
    out.push_str(HEAD);
    out.push_str(&json);
    out.push_str(TAIL);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_route_table_literal() {
        let map = UrlMap::from_rules([("user", "/users/<int:id>")]);
        let js = render(&map).unwrap();
        assert!(js.starts_with("var flask_util = function() {\n    var url_map = {\n"));
        assert!(js.contains(r#""user": {"#));
        assert!(js.contains(r#""/users/<int:id>""#));
        assert!(js.trim_end().ends_with("}();"));
    }

    #[test]
    fn empty_table_renders_empty_object() {
        let js = render(&UrlMap::default()).unwrap();
        assert!(js.contains("var url_map = {};"));
    }

    #[test]
    fn exposes_url_for_and_url_encode() {
        let js = render(&UrlMap::default()).unwrap();
        assert!(js.contains("url_for: url_for"));
        assert!(js.contains("url_encode: url_encode"));
    }
}
