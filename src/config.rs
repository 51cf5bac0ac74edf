//! Editor configuration supplied by the host.
//!
//! The original plugin kept its language strings and feature flags in
//! module-level globals; here everything the host controls is one value the
//! caller constructs (or loads from JSON) and hands to the session.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_FRACTIONS;

/// Built-in English fallbacks for the strings a session needs even when the
/// host supplies no strings table at all.
const DEFAULT_STRINGS: &[(&str, &str)] = &[
    ("correct", "Correct"),
    ("incorrect", "Incorrect"),
    ("custom_grade", "Custom"),
    ("err_custom_rate", "The custom grade must be a number between -100 and 100."),
    ("err_empty_answer", "The answer must not be empty."),
    ("err_none_correct", "At least one answer must be marked correct."),
    ("multichoice", "Multiple choice - single response"),
    ("multiresponse", "Multiple choice - multiple response"),
    ("numerical", "Numerical answer"),
    ("shortanswer", "Short answer"),
    ("regexp", "Regular expression"),
];

/// Host-supplied configuration for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Whether the REGEXP/REGEXP_C question types are recognized and offered.
    pub extended_types: bool,
    /// The grade percentages offered as selector ticks; any other value is a
    /// "custom" grade rendered as an editable field.
    pub fractions: Vec<f64>,
    /// Localized display strings, keyed the way the catalog references them.
    pub strings: HashMap<String, String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            extended_types: false,
            fractions: DEFAULT_FRACTIONS.to_vec(),
            strings: HashMap::new(),
        }
    }
}

impl EditorConfig {
    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Resolve a display string: the host's table first, then the built-in
    /// English fallback, then the key itself.
    pub fn string<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(value) = self.strings.get(key) {
            return value;
        }
        DEFAULT_STRINGS
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(key, |(_, v)| *v)
    }
}
