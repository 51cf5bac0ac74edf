//! Core question types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog;

/// How close two grade percentages must be to count as the same value.
///
/// Grades are authored with at most a couple of decimal places, so anything
/// tighter than this is representation noise from parsing.
const GRADE_EPSILON: f64 = 1e-9;

/// The grade weight assigned to one answer alternative.
///
/// The percent variant keeps the raw spelling found between the `%` signs so
/// that re-serializing a parsed snippet reproduces it byte for byte
/// (`%50.0%` stays `%50.0%`, not `%50%`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fraction {
    /// Exact-match sentinel, serialized as a bare `=` prefix.
    Exact,
    /// No grade prefix at all: the answer is simply wrong.
    Incorrect,
    /// A percentage in `[-100, 100]`, serialized as `%<raw>%`.
    ///
    /// The payload is the raw text of the percentage. It may be free-form
    /// while the user is typing a custom grade; commit-time validation
    /// rejects anything that does not parse into range.
    Percent(String),
}

impl Fraction {
    /// Build a percent fraction from a numeric value.
    pub fn percent(value: f64) -> Self {
        Self::Percent(format_grade(value))
    }

    /// Interpret a raw editing-surface value: `=` is the exact-match
    /// sentinel, the empty string is "incorrect", anything else is kept
    /// verbatim as a percentage spelling.
    pub fn from_input(value: &str) -> Self {
        match value {
            "=" => Self::Exact,
            "" => Self::Incorrect,
            other => Self::Percent(other.to_string()),
        }
    }

    /// The numeric percentage, if this fraction has one that parses.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Exact | Self::Incorrect => None,
            Self::Percent(raw) => raw.trim().parse().ok(),
        }
    }

    /// Whether this fraction marks a fully correct answer (`=` or 100%).
    pub fn is_correct(&self) -> bool {
        match self {
            Self::Exact => true,
            Self::Incorrect => false,
            Self::Percent(_) => self.value().is_some_and(|v| (v - 100.0).abs() < GRADE_EPSILON),
        }
    }

    /// Whether this is a custom grade: a percentage whose value matches no
    /// entry of the given catalog. Unparseable percentage text is custom by
    /// definition (and caught at commit).
    pub fn is_custom(&self, catalog: &[f64]) -> bool {
        match self {
            Self::Exact | Self::Incorrect => false,
            Self::Percent(_) => self.value().is_none_or(|v| {
                !catalog.iter().any(|c| (c - v).abs() < GRADE_EPSILON)
            }),
        }
    }
}

/// Format a grade value the way the catalog spells it (no trailing `.0`).
pub(crate) fn format_grade(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// One answer alternative within a sub-question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Opaque id for UI binding. Never written to the wire format.
    pub id: String,
    /// Raw, unescaped answer text.
    pub answer: String,
    /// Raw, unescaped feedback text; empty means none.
    pub feedback: String,
    /// Grade weight.
    pub fraction: Fraction,
    /// Numeric-type tolerance, raw spelling. `None` means absent;
    /// a present `"0"` is preserved and re-serialized as `:0`.
    pub tolerance: Option<String>,
}

impl AnswerRecord {
    /// A blank answer with a fresh id and the given grade.
    pub fn blank(fraction: Fraction) -> Self {
        Self {
            id: new_record_id(),
            answer: String::new(),
            feedback: String::new(),
            fraction,
            tolerance: None,
        }
    }

    /// Structural equality ignoring the generated id.
    pub fn content_eq(&self, other: &Self) -> bool {
        self.answer == other.answer
            && self.feedback == other.feedback
            && self.fraction == other.fraction
            && self.tolerance == other.tolerance
    }
}

/// Generate an id for a new answer record.
pub(crate) fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// A single cloze sub-question: marks, type, and the ordered answer list.
///
/// Answer order is semantically significant (it defines display and grading
/// order) and is preserved exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubQuestion {
    /// Default mark, raw spelling. Empty means the platform default of 1.
    pub marks: String,
    /// Canonical question-type token (e.g. `MULTICHOICE_HS`), or whatever
    /// unknown token the source carried.
    pub qtype: String,
    /// Ordered answer alternatives.
    pub answers: Vec<AnswerRecord>,
}

impl SubQuestion {
    /// An empty sub-question with default marks and no type chosen yet.
    pub fn empty() -> Self {
        Self {
            marks: "1".to_string(),
            qtype: String::new(),
            answers: Vec::new(),
        }
    }

    /// The marks as a number, defaulting to 1 when unset or unparseable.
    pub fn marks_or_default(&self) -> u32 {
        self.marks.trim().parse().unwrap_or(1)
    }

    /// Whether this is a numeric question type (answers carry tolerances).
    pub fn is_numeric(&self) -> bool {
        catalog::is_numeric(&self.qtype)
    }

    /// Whether this type is semantically single-answer. The wire format
    /// still permits a list; the parser tolerates any count.
    pub fn is_single_answer(&self) -> bool {
        catalog::is_single_answer(&self.qtype)
    }

    /// Structural equality ignoring the generated answer ids.
    pub fn content_eq(&self, other: &Self) -> bool {
        self.marks == other.marks
            && self.qtype == other.qtype
            && self.answers.len() == other.answers.len()
            && self
                .answers
                .iter()
                .zip(&other.answers)
                .all(|(a, b)| a.content_eq(b))
    }
}

impl Default for SubQuestion {
    fn default() -> Self {
        Self::empty()
    }
}
