// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. question::SubQuestion)
    clippy::module_name_repetitions
)]

//! # Cloze-edit
//!
//! A parser, serializer, and editing model for embedded-answers (cloze)
//! questions in the `{marks:TYPE:answers}` wire format.
//!
//! The crate covers the full editing loop:
//! - Scanning host text for question snippets
//! - Decomposing a snippet into a structured sub-question
//! - An answer-set editing session (insert, delete, reorder, grade)
//! - Commit-time validation and canonical re-serialization
//!
//! ## Design
//!
//! Parsing is lenient and committing is strict: any snippet decomposes into
//! *some* sub-question (malformed pieces are dropped), while [`session`]
//! refuses to serialize until the answer set passes validation.
//!
//! ## Modules
//!
//! - [`grammar`]: Scan, decompose, escape, serialize
//! - [`session`]: The editing session and its operations
//! - [`question`]: Sub-question and answer data model
//! - [`catalog`]: The question-type catalog and abbreviations
//! - [`config`]: Host-supplied configuration
//! - [`error`]: Validation errors

pub mod catalog;
pub mod config;
pub mod error;
pub mod grammar;
pub mod question;
pub mod session;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::EditorConfig;
    pub use crate::error::ValidationError;
    pub use crate::grammar::{Marker, decompose, replace_marker, scan, serialize};
    pub use crate::question::{AnswerRecord, Fraction, SubQuestion};
    pub use crate::session::{AnswerField, Direction, EditorSession, RowInput, SessionMode};
}
