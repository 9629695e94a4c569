//! Single-quote escaping for shell-safe argument tokens.
//!
//! Transition rule: every `'` in the input is emitted as `''`, every other
//! character is emitted as-is, and the whole output is wrapped in one pair
//! of `'`.
//!
//! [`double_quote`] is the double-quoted counterpart used for scheduler
//! string lists.

const QUOTE: char = '\'';

/// Wrap `s` in single quotes, doubling any single quote it contains.
///
/// Not idempotent: an already-quoted string gets a second layer.
pub fn naively_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(QUOTE);
    for c in s.chars() {
        if c == QUOTE {
            out.push(QUOTE);
        }
        out.push(c);
    }
    out.push(QUOTE);
    out
}

/// Like [`naively_quote`], but strips one existing outer pair of single
/// quotes first, so quoting a quoted string does not add another layer.
pub fn quote(s: &str) -> String {
    naively_quote(strip_outer(s))
}

/// Wrap `s` in double quotes for a scheduler string list.
///
/// Only `"` and `\` are escaped (with a backslash). Every other character,
/// including control and non-ASCII characters, is emitted as-is.
pub fn double_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn strip_outer(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with(QUOTE) && s.ends_with(QUOTE) {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
