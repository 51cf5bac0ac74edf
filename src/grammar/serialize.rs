//! Recomposition: a [`SubQuestion`] back into canonical snippet text.

use crate::question::{Fraction, SubQuestion};

use super::escape;

/// Serialize a sub-question to `{<marks>:<TYPE>:<answer>[~<answer>]*}`.
///
/// Each answer is grade prefix, escaped answer text, `:<tolerance>` when a
/// tolerance is present (numeric types only), then `#` plus escaped
/// feedback when feedback is non-empty. Fraction and tolerance spellings
/// are emitted verbatim, so a parsed snippet serializes back byte for byte.
pub fn serialize(question: &SubQuestion) -> String {
    let numeric = question.is_numeric();
    let mut out = format!("{{{}:{}:", question.marks, question.qtype);
    for (i, answer) in question.answers.iter().enumerate() {
        if i > 0 {
            out.push('~');
        }
        match &answer.fraction {
            Fraction::Exact => out.push('='),
            Fraction::Incorrect => {}
            Fraction::Percent(raw) => {
                out.push('%');
                out.push_str(raw);
                out.push('%');
            }
        }
        out.push_str(&escape(&answer.answer));
        if numeric {
            if let Some(tolerance) = &answer.tolerance {
                out.push(':');
                out.push_str(tolerance);
            }
        }
        if !answer.feedback.is_empty() {
            out.push('#');
            out.push_str(&escape(&answer.feedback));
        }
    }
    out.push('}');
    out
}
