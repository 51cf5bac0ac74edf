//! The answer-set editor model.
//!
//! One [`EditorSession`] owns the sub-question currently being edited. The
//! host renders the answer rows, feeds edited values back in through
//! [`EditorSession::sync_rows`], drives the structural operations (insert,
//! delete, move), and finally calls [`EditorSession::commit`] to validate
//! and serialize.
//!
//! There is no global state anywhere: the session is constructed per edit
//! and carries its own [`EditorConfig`]. Everything is synchronous and
//! single-threaded; cancelling an edit is just dropping the session.


use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::config::EditorConfig;
use crate::error::ValidationError;
use crate::grammar;
use crate::question::{AnswerRecord, Fraction, SubQuestion, new_record_id};

/// How many blank rows a freshly chosen multi-answer type starts with.
const INITIAL_ANSWER_ROWS: usize = 3;

/// Grade percentages must stay within this range.
const GRADE_RANGE: std::ops::RangeInclusive<f64> = -100.0..=100.0;

/// Whether the session is still picking a question type or already editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// No type chosen yet; the host shows the type chooser.
    ChooseType,
    /// A sub-question is loaded and being edited.
    Edit,
}

/// Which answer-row field an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerField {
    Answer,
    Feedback,
    Fraction,
    Tolerance,
}

/// Reorder direction for [`EditorSession::move_answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// One answer row as currently rendered by the host.
///
/// The editing surface is the source of truth between renders, so
/// structural operations expect the host to pass the on-screen values back
/// through [`EditorSession::sync_rows`] first; otherwise edits typed into
/// other rows since the last render would be lost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowInput {
    /// Answer text as typed.
    pub answer: String,
    /// Feedback text as typed.
    pub feedback: String,
    /// Grade selector value: `=`, empty, or a percentage spelling.
    pub fraction: String,
    /// Tolerance as typed; ignored for non-numeric types.
    pub tolerance: String,
}

/// The in-memory editing model for one cloze sub-question.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    mode: SessionMode,
    question: SubQuestion,
    /// Which scanned marker in the host text this session edits; `None`
    /// while a new sub-question has not been positioned yet.
    selected_marker: Option<usize>,
}

impl EditorSession {
    /// Open a session for an existing snippet ("edit existing" mode).
    ///
    /// Unrecognizable text yields an empty sub-question rather than an
    /// error, per the grammar's leniency policy.
    pub fn for_snippet(config: EditorConfig, snippet: &str) -> Self {
        let question = grammar::decompose(snippet, config.extended_types);
        Self {
            config,
            mode: SessionMode::Edit,
            question,
            selected_marker: None,
        }
    }

    /// Open a session for a brand-new sub-question ("choose type" mode).
    pub fn for_new_question(config: EditorConfig) -> Self {
        Self {
            config,
            mode: SessionMode::ChooseType,
            question: SubQuestion::empty(),
            selected_marker: None,
        }
    }

    /// The session configuration.
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current mode.
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    /// The sub-question being edited.
    pub const fn question(&self) -> &SubQuestion {
        &self.question
    }

    /// The marker index this session edits, if any.
    pub const fn selected_marker(&self) -> Option<usize> {
        self.selected_marker
    }

    /// Remember which scanned marker the committed text replaces.
    pub const fn set_selected_marker(&mut self, index: Option<usize>) {
        self.selected_marker = index;
    }

    /// Pick the question type and seed the initial answer rows: one for
    /// single-answer types, [`INITIAL_ANSWER_ROWS`] otherwise. Single-answer
    /// rows start as exact matches, multi-answer rows as incorrect.
    ///
    /// # Panics
    ///
    /// Panics when called outside choose-type mode; picking a type twice is
    /// a host bug.
    pub fn choose_type(&mut self, qtype: &str) {
        assert!(
            self.mode == SessionMode::ChooseType,
            "choose_type called on a session that already has a type"
        );
        let canonical = catalog::canonicalize(qtype, self.config.extended_types).to_string();
        let single = catalog::is_single_answer(&canonical);
        let rows = if single { 1 } else { INITIAL_ANSWER_ROWS };
        let fraction = if single {
            Fraction::Exact
        } else {
            Fraction::Incorrect
        };
        self.question.qtype = canonical;
        self.question.answers = (0..rows)
            .map(|_| AnswerRecord::blank(fraction.clone()))
            .collect();
        self.mode = SessionMode::Edit;
    }

    /// Replace all answer fields from the rendered surface, keeping record
    /// ids positionally where rows line up.
    pub fn sync_rows(&mut self, rows: &[RowInput]) {
        let numeric = self.question.is_numeric();
        let answers = rows
            .iter()
            .enumerate()
            .map(|(i, row)| AnswerRecord {
                id: self
                    .question
                    .answers
                    .get(i)
                    .map_or_else(new_record_id, |a| a.id.clone()),
                answer: row.answer.clone(),
                feedback: row.feedback.clone(),
                fraction: Fraction::from_input(&row.fraction),
                tolerance: (numeric && !row.tolerance.is_empty())
                    .then(|| row.tolerance.clone()),
            })
            .collect();
        self.question.answers = answers;
    }

    /// Update the marks field from its rendered value.
    pub fn set_marks(&mut self, value: &str) {
        self.question.marks = value.to_string();
    }

    /// Insert a blank answer immediately after position `after`, or at the
    /// start for `None`. The new row inherits the grade and tolerance of
    /// the row it follows.
    ///
    /// # Panics
    ///
    /// Panics when `after` is out of range; that is a host bug, not user
    /// input.
    pub fn insert_answer(&mut self, after: Option<usize>) {
        let len = self.question.answers.len();
        if let Some(i) = after {
            assert!(i < len, "insert position {i} out of range for {len} answers");
        }
        let (fraction, tolerance) = after.map_or((Fraction::Incorrect, None), |i| {
            let row = &self.question.answers[i];
            (row.fraction.clone(), row.tolerance.clone())
        });
        let mut record = AnswerRecord::blank(fraction);
        record.tolerance = tolerance;
        self.question
            .answers
            .insert(after.map_or(0, |i| i + 1), record);
    }

    /// Remove the answer at `index`. Deleting the last remaining answer is
    /// allowed; an empty list is a valid transient state and the missing
    /// correct answer is caught at commit.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub fn delete_answer(&mut self, index: usize) {
        let len = self.question.answers.len();
        assert!(index < len, "delete index {index} out of range for {len} answers");
        self.question.answers.remove(index);
    }

    /// Swap the answer at `index` with its neighbor. Moving the first row
    /// up or the last row down is a silent no-op.
    pub fn move_answer(&mut self, index: usize, direction: Direction) {
        let len = self.question.answers.len();
        match direction {
            Direction::Up if index > 0 && index < len => {
                self.question.answers.swap(index - 1, index);
            }
            Direction::Down if index + 1 < len => {
                self.question.answers.swap(index, index + 1);
            }
            _ => {}
        }
    }

    /// Set one field of one answer row. The fraction field accepts catalog
    /// values, `=`, or arbitrary text (a custom grade being typed); range
    /// checking waits until commit so typing stays permissive.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub fn update_field(&mut self, index: usize, field: AnswerField, value: &str) {
        let len = self.question.answers.len();
        assert!(index < len, "row index {index} out of range for {len} answers");
        let numeric = self.question.is_numeric();
        let row = &mut self.question.answers[index];
        match field {
            AnswerField::Answer => row.answer = value.to_string(),
            AnswerField::Feedback => row.feedback = value.to_string(),
            AnswerField::Fraction => row.fraction = Fraction::from_input(value),
            AnswerField::Tolerance => {
                row.tolerance = (numeric && !value.is_empty()).then(|| value.to_string());
            }
        }
    }

    /// Run the commit-time checks and collect every applicable error, with
    /// identical messages de-duplicated. Never blocks intermediate edits.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut found_correct = false;
        for answer in &self.question.answers {
            if answer.answer.trim().is_empty() {
                push_unique(&mut errors, ValidationError::EmptyAnswer);
            }
            if answer.fraction.is_custom(&self.config.fractions)
                && !answer
                    .fraction
                    .value()
                    .is_some_and(|v| GRADE_RANGE.contains(&v))
            {
                push_unique(&mut errors, ValidationError::InvalidCustomGrade);
            }
            if answer.fraction.is_correct() {
                found_correct = true;
            }
        }
        if !found_correct {
            errors.push(ValidationError::NoCorrectAnswer);
        }
        errors
    }

    /// Validate and serialize. On success the canonical snippet text is
    /// returned for the host to splice into its content; on failure the
    /// collected errors come back as data and the session state is left
    /// untouched (no partial commit).
    ///
    /// # Errors
    ///
    /// Returns every validation problem found, de-duplicated.
    pub fn commit(&self) -> Result<String, Vec<ValidationError>> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(grammar::serialize(&self.question))
        } else {
            Err(errors)
        }
    }

    /// Localized messages for a set of errors, in order.
    pub fn error_messages(&self, errors: &[ValidationError]) -> Vec<String> {
        errors
            .iter()
            .map(|e| e.message(&self.config).to_string())
            .collect()
    }
}

/// Append an error unless an identical one was already collected.
fn push_unique(errors: &mut Vec<ValidationError>, error: ValidationError) {
    if !errors.contains(&error) {
        errors.push(error);
    }
}
