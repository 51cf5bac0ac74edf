//! Commit-time validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EditorConfig;

/// A user-visible problem found when committing a sub-question.
///
/// These are data, not failures: `commit` collects every applicable error so
/// one attempt surfaces all problems at once, and the host renders them.
/// Identical errors from multiple rows are de-duplicated before being
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    /// An answer text is empty after trimming.
    #[error("The answer must not be empty.")]
    EmptyAnswer,
    /// A custom grade does not parse as a number in `[-100, 100]`.
    #[error("The custom grade must be a number between -100 and 100.")]
    InvalidCustomGrade,
    /// No answer has the exact-match sentinel or a 100% grade.
    #[error("At least one answer must be marked correct.")]
    NoCorrectAnswer,
}

impl ValidationError {
    /// The strings-table key for this error's message.
    pub const fn string_key(self) -> &'static str {
        match self {
            Self::EmptyAnswer => "err_empty_answer",
            Self::InvalidCustomGrade => "err_custom_rate",
            Self::NoCorrectAnswer => "err_none_correct",
        }
    }

    /// The localized message for this error, falling back to the built-in
    /// English text.
    pub fn message<'a>(self, config: &'a EditorConfig) -> &'a str {
        config.string(self.string_key())
    }
}
