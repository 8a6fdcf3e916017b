//! The URL value encoding used by `url_for`.
//!
//! This is deliberately *not* RFC 3986 percent-encoding. The rules are:
//!
//! | Input | Output |
//! |---|---|
//! | `[a-zA-Z0-9-_.]` | copied unchanged |
//! | space | `+` |
//! | anything else | `%` + UTF-16 code unit in uppercase hex, at least two digits |
//!
//! So `/` is `%2F`, `é` is `%E9`, `中` is `%4E2D` and a character outside
//! the BMP is two units, `😀` → `%D83D%DE00`. This is what
//! `String.prototype.charCodeAt` yields in the browser, and the generated
//! script carries a JavaScript copy of [`encode`]; both must produce
//! byte-identical output for the same input.

use std::fmt::Write;

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Encodes a path or query value.
///
/// ```rust
/// assert_eq!(urlmap::encode("a b/c"), "a+b%2Fc");
/// assert_eq!(urlmap::encode("v1.2_x-y"), "v1.2_x-y");
/// assert_eq!(urlmap::encode("é"), "%E9");
/// ```
pub fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while !rest.is_empty() {
        let run = rest.find(|c: char| !is_unreserved(c)).unwrap_or(rest.len());
        if run > 0 {
            out.push_str(&rest[..run]);
            rest = &rest[run..];
            continue;
        }

        let Some(c) = rest.chars().next() else { break };
        if c == ' ' {
            out.push('+');
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units).iter() {
                // Writing to a String cannot fail.
                let _ = write!(out, "%{unit:02X}");
            }
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Reverses [`encode`] for characters up to `U+00FF`.
///
/// `+` becomes a space and `%XX` becomes the character with code `0xXX`.
/// A `%` that is not followed by two hex digits is kept as-is.
///
/// Escapes are read as exactly two digits, so anything [`encode`] wrote with
/// more (`%4E2D` for `中`) does not come back: it decodes to `N` followed by
/// the literal `2D`. Values that must round-trip through a path segment
/// should stay within Latin-1.
pub fn decode(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '+' => {
                out.push(' ');
                i += 1;
            }
            '%' => {
                let hi = chars.get(i + 1).and_then(|c| c.to_digit(16));
                let lo = chars.get(i + 2).and_then(|c| c.to_digit(16));
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        // Two hex digits always fit a Latin-1 code point.
                        out.push(char::from((hi * 16 + lo) as u8));
                        i += 3;
                    }
                    _ => {
                        out.push('%');
                        i += 1;
                    }
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}
