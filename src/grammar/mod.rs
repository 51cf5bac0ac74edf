//! The cloze grammar engine.
//!
//! Pure functions over the wire format `{<marks>:<TYPE>:<answers>}`:
//! [`scan`] finds snippets inside host text, [`decompose`] turns one snippet
//! into a [`SubQuestion`](crate::question::SubQuestion), and [`serialize`]
//! builds the canonical snippet text back. For snippets this engine produced
//! itself, `serialize(decompose(s)) == s` byte for byte.
//!
//! Malformed input is handled leniently rather than rejected: a malformed
//! answer token is dropped, an unrecognizable snippet decomposes to an empty
//! sub-question. The drops are reported on the `tracing` debug channel.

mod parse;
mod scan;
mod serialize;
#[cfg(test)]
mod tests;

pub use parse::decompose;
pub use scan::{Marker, replace_marker, scan};
pub use serialize::serialize;

/// Prefix every literal `#`, `}` or `~` with a backslash.
///
/// Exact inverse of [`unescape`]: `unescape(escape(t)) == t` for all `t`,
/// and no other character is touched.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '#' | '}' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Decode `\#`, `\}` and `\~` back to the literal character.
///
/// Any other backslash passes through unchanged, so text that never went
/// through [`escape`] is not mangled.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&next @ ('#' | '}' | '~')) => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
