//! Snippet recognition inside host text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Build the type-token alternation of the snippet anchor regex.
///
/// This is the historical token set of the wire format: the short forms
/// cover `MC`/`MR` with their layout suffixes, but not `MCS`/`MRS`, so
/// those two abbreviations are unrecognizable in existing text even though
/// the catalog can expand them. Existing corpora depend on that gap staying
/// where it is.
fn type_pattern(extended: bool) -> String {
    let mut pattern = String::from(
        "MULTICHOICE(?:_H|_V|_S|_HS|_VS)?|MULTIRESPONSE(?:_H|_S|_HS)?\
         |NUMERICAL|SHORTANSWER(?:_C)?|SAC?|NM|MWC?|M[CR](?:V|H|VS|HS)?",
    );
    if extended {
        pattern.push_str("|REGEXP(?:_C)?|RXC?");
    }
    pattern
}

fn snippet_regex_for(extended: bool) -> Regex {
    Regex::new(&format!(
        r"\{{(?<marks>[0-9]*):(?<qtype>{}):(?<answers>.*?)\}}",
        type_pattern(extended)
    ))
    .expect("snippet anchor pattern compiles")
}

static SNIPPET_BASE: LazyLock<Regex> = LazyLock::new(|| snippet_regex_for(false));
static SNIPPET_EXTENDED: LazyLock<Regex> = LazyLock::new(|| snippet_regex_for(true));

/// The type-anchored snippet regex. The lazy tail stops at the first `}`;
/// [`scan`] extends the match when the braces don't balance.
pub(crate) fn snippet_regex(extended: bool) -> &'static Regex {
    if extended {
        &SNIPPET_EXTENDED
    } else {
        &SNIPPET_BASE
    }
}

/// A transient addressable wrapper around one recognized snippet.
///
/// Markers exist only while an editing session is open: the scan creates
/// them at session start, and the host either splices final text over a
/// marker's range or discards the lot when the session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Byte range of the snippet within the host text.
    pub range: Range<usize>,
    /// The snippet text itself.
    pub snippet: String,
    /// True for a not-yet-confirmed new sub-question that has a position
    /// but no committed text yet.
    pub pending: bool,
}

impl Marker {
    /// A pending-insertion marker at the given byte offset.
    pub const fn pending_insertion(offset: usize) -> Self {
        Self {
            range: offset..offset,
            snippet: String::new(),
            pending: true,
        }
    }
}

/// Find every syntactically complete cloze snippet in `text`, in order.
///
/// A candidate is located with the type-anchored regex, whose lazy tail
/// stops at the first `}`. When the candidate contains more `{` than `}`
/// (literal braces inside answer text), the match is extended forward
/// through subsequent brace pairs with a nesting counter until balance
/// returns. If the braces never balance before the text runs out of them,
/// extension stops where it is; truncated output beats an endless loop on
/// hand-mangled input.
pub fn scan(text: &str, extended: bool) -> Vec<Marker> {
    let re = snippet_regex(extended);
    let mut markers = Vec::new();
    let mut pos = 0;
    while let Some(m) = re.find(&text[pos..]) {
        let start = pos + m.start();
        let mut end = pos + m.end();
        let mut level = brace_excess(&text[start..end]);
        while level > 0 {
            match text[end..].find(['{', '}']) {
                Some(i) => {
                    let brace = end + i;
                    if text.as_bytes()[brace] == b'{' {
                        level += 1;
                    } else {
                        level -= 1;
                    }
                    end = brace + 1;
                }
                None => {
                    tracing::trace!(start, "unbalanced braces, snippet truncated");
                    break;
                }
            }
        }
        markers.push(Marker {
            range: start..end,
            snippet: text[start..end].to_string(),
            pending: false,
        });
        pos = end;
    }
    markers
}

/// How many more `{` than `}` the string contains.
fn brace_excess(s: &str) -> i64 {
    s.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

/// Splice `replacement` over a marker's range in the host text.
pub fn replace_marker(text: &str, marker: &Marker, replacement: &str) -> String {
    let mut out =
        String::with_capacity(text.len() - marker.range.len() + replacement.len());
    out.push_str(&text[..marker.range.start]);
    out.push_str(replacement);
    out.push_str(&text[marker.range.end..]);
    out
}
