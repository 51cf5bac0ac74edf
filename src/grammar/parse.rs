//! Snippet decomposition: one snippet's text into a [`SubQuestion`].

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog;
use crate::question::{AnswerRecord, Fraction, SubQuestion, new_record_id};

use super::scan::snippet_regex;
use super::unescape;

/// The per-answer sub-grammar: an optional grade prefix (`%<signed decimal>%`
/// or a bare `=`), the answer text with escaped pairs allowed, and an
/// optional `#feedback` tail.
static ANSWER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:%(?<percent>-?[.0-9]+)%|(?<eq>=?))(?<answer>(?:\\.|[^#])*)#?(?<feedback>.*)")
        .expect("answer token pattern compiles")
});

/// Numeric answer text: `<value>[:<tolerance>]`.
static NUMERIC_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<value>[^:]*):?(?<tolerance>.*)").expect("numeric answer pattern compiles")
});

/// Decompose one snippet into marks, canonical type and answer list.
///
/// Lenient by policy: text that doesn't contain a recognizable snippet
/// yields an empty sub-question, and individual malformed answer tokens are
/// dropped. Hand-edited source is common and must not take the editor down
/// with it. Each drop emits a `tracing` debug event.
pub fn decompose(snippet: &str, extended: bool) -> SubQuestion {
    let Some(caps) = snippet_regex(extended).captures(snippet) else {
        tracing::debug!("no recognizable snippet, yielding an empty sub-question");
        return SubQuestion::empty();
    };
    let marks = caps["marks"].to_string();
    let qtype = catalog::canonicalize(&caps["qtype"], extended).to_string();
    let numeric = catalog::is_numeric(&qtype);

    let mut answers = Vec::new();
    for token in split_unescaped_tildes(&caps["answers"]) {
        if let Some(record) = parse_answer_token(token, numeric) {
            answers.push(record);
        } else if !token.is_empty() {
            tracing::debug!(token, "malformed answer token dropped");
        }
    }
    SubQuestion {
        marks,
        qtype,
        answers,
    }
}

/// Split the answers section on unescaped `~`. A `\~` pair is a literal
/// tilde inside an answer and never splits.
fn split_unescaped_tildes(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '~' => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Parse one answer token, or `None` when its core answer text is missing.
fn parse_answer_token(token: &str, numeric: bool) -> Option<AnswerRecord> {
    let caps = ANSWER_TOKEN.captures(token)?;
    let raw_answer = caps.name("answer").map_or("", |m| m.as_str());
    if raw_answer.is_empty() {
        return None;
    }

    let fraction = if let Some(percent) = caps.name("percent") {
        Fraction::Percent(percent.as_str().to_string())
    } else if caps.name("eq").is_some_and(|m| m.as_str() == "=") {
        Fraction::Exact
    } else {
        Fraction::Incorrect
    };
    let feedback = unescape(caps.name("feedback").map_or("", |m| m.as_str()));

    let (answer, tolerance) = if numeric {
        let parts = NUMERIC_ANSWER.captures(raw_answer)?;
        let tolerance = parts.name("tolerance").map_or("", |m| m.as_str());
        (
            unescape(&parts["value"]),
            (!tolerance.is_empty()).then(|| tolerance.to_string()),
        )
    } else {
        (unescape(raw_answer), None)
    };

    Some(AnswerRecord {
        id: new_record_id(),
        answer,
        feedback,
        fraction,
        tolerance,
    })
}
