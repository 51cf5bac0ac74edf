//! The static question-type catalog.
//!
//! Canonical long-form identifiers, the short abbreviations accepted on
//! parse, and the presentation metadata keys the host resolves through its
//! strings table.

/// Abbreviation lookup only applies to tokens shorter than this; every
/// canonical identifier is at least this long, which makes
/// canonicalization idempotent.
const ABBREVIATION_MAX_LEN: usize = 5;

/// The by-default offered grade percentages.
pub const DEFAULT_FRACTIONS: &[f64] = &[100.0, 50.0, 0.0];

/// One entry of the question-type catalog. Immutable, defined once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTypeDescriptor {
    /// Canonical long-form identifier, e.g. `MULTICHOICE_HS`.
    pub canonical: &'static str,
    /// Short codes accepted on parse, e.g. `MC`, `MCH`.
    pub abbreviations: &'static [&'static str],
    /// Whether the type is semantically single-answer (the editor seeds
    /// one row instead of three).
    pub single_answer: bool,
    /// Whether answers carry a `:tolerance` suffix.
    pub numeric: bool,
    /// Only recognized/offered when the extended type set is enabled.
    pub extended: bool,
    /// Strings-table key for the display name.
    pub name_key: &'static str,
    /// Strings-table key for the one-line summary.
    pub summary_key: &'static str,
    /// Strings-table keys for the option bullet points.
    pub option_keys: &'static [&'static str],
}

/// The full catalog, extended entries included. Order matters: it is the
/// order the types are offered in, with the regexp types sitting between
/// NUMERICAL and SHORTANSWER.
pub const QUESTION_TYPES: &[QuestionTypeDescriptor] = &[
    QuestionTypeDescriptor {
        canonical: "MULTICHOICE",
        abbreviations: &["MC"],
        single_answer: false,
        numeric: false,
        extended: false,
        name_key: "multichoice",
        summary_key: "summary_multichoice",
        option_keys: &["selectinline", "singleyes"],
    },
    QuestionTypeDescriptor {
        canonical: "MULTICHOICE_H",
        abbreviations: &["MCH"],
        single_answer: false,
        numeric: false,
        extended: false,
        name_key: "multichoice",
        summary_key: "summary_multichoice",
        option_keys: &["horizontal", "singleyes"],
    },
    QuestionTypeDescriptor {
        canonical: "MULTICHOICE_V",
        abbreviations: &["MCV"],
        single_answer: false,
        numeric: false,
        extended: false,
        name_key: "multichoice",
        summary_key: "summary_multichoice",
        option_keys: &["vertical", "singleyes"],
    },
    QuestionTypeDescriptor {
        canonical: "MULTICHOICE_S",
        abbreviations: &["MCS"],
        single_answer: false,
        numeric: false,
        extended: false,
        name_key: "multichoice",
        summary_key: "summary_multichoice",
        option_keys: &["selectinline", "shuffle", "singleyes"],
    },
    QuestionTypeDescriptor {
        canonical: "MULTICHOICE_HS",
        abbreviations: &["MCHS"],
        single_answer: false,
        numeric: false,
        extended: false,
        name_key: "multichoice",
        summary_key: "summary_multichoice",
        option_keys: &["horizontal", "shuffle", "singleyes"],
    },
    QuestionTypeDescriptor {
        canonical: "MULTICHOICE_VS",
        abbreviations: &["MCVS"],
        single_answer: false,
        numeric: false,
        extended: false,
        name_key: "multichoice",
        summary_key: "summary_multichoice",
        option_keys: &["vertical", "shuffle", "singleyes"],
    },
    QuestionTypeDescriptor {
        canonical: "MULTIRESPONSE",
        abbreviations: &["MR"],
        single_answer: false,
        numeric: false,
        extended: false,
        name_key: "multiresponse",
        summary_key: "summary_multichoice",
        option_keys: &["multi_vertical", "singleno"],
    },
    QuestionTypeDescriptor {
        canonical: "MULTIRESPONSE_H",
        abbreviations: &["MRH"],
        single_answer: false,
        numeric: false,
        extended: false,
        name_key: "multiresponse",
        summary_key: "summary_multichoice",
        option_keys: &["multi_horizontal", "singleno"],
    },
    QuestionTypeDescriptor {
        canonical: "MULTIRESPONSE_S",
        abbreviations: &["MRS"],
        single_answer: false,
        numeric: false,
        extended: false,
        name_key: "multiresponse",
        summary_key: "summary_multichoice",
        option_keys: &["multi_vertical", "shuffle", "singleno"],
    },
    QuestionTypeDescriptor {
        canonical: "MULTIRESPONSE_HS",
        abbreviations: &["MRHS"],
        single_answer: false,
        numeric: false,
        extended: false,
        name_key: "multiresponse",
        summary_key: "summary_multichoice",
        option_keys: &["multi_horizontal", "shuffle", "singleno"],
    },
    QuestionTypeDescriptor {
        canonical: "NUMERICAL",
        abbreviations: &["NM"],
        single_answer: true,
        numeric: true,
        extended: false,
        name_key: "numerical",
        summary_key: "summary_numerical",
        option_keys: &[],
    },
    QuestionTypeDescriptor {
        canonical: "REGEXP",
        abbreviations: &["RX"],
        single_answer: false,
        numeric: false,
        extended: true,
        name_key: "regexp",
        summary_key: "summary_regexp",
        option_keys: &["caseno"],
    },
    QuestionTypeDescriptor {
        canonical: "REGEXP_C",
        abbreviations: &["RXC"],
        single_answer: false,
        numeric: false,
        extended: true,
        name_key: "regexp",
        summary_key: "summary_regexp",
        option_keys: &["caseyes"],
    },
    QuestionTypeDescriptor {
        canonical: "SHORTANSWER",
        abbreviations: &["SA", "MW"],
        single_answer: true,
        numeric: false,
        extended: false,
        name_key: "shortanswer",
        summary_key: "summary_shortanswer",
        option_keys: &["caseno"],
    },
    QuestionTypeDescriptor {
        canonical: "SHORTANSWER_C",
        abbreviations: &["SAC", "MWC"],
        single_answer: true,
        numeric: false,
        extended: false,
        name_key: "shortanswer",
        summary_key: "summary_shortanswer",
        option_keys: &["caseyes"],
    },
];

/// The catalog entries available with the given feature set.
pub fn question_types(extended: bool) -> impl Iterator<Item = &'static QuestionTypeDescriptor> {
    QUESTION_TYPES
        .iter()
        .filter(move |d| extended || !d.extended)
}

/// Look up a descriptor by its canonical identifier.
pub fn descriptor(canonical: &str) -> Option<&'static QuestionTypeDescriptor> {
    QUESTION_TYPES.iter().find(|d| d.canonical == canonical)
}

/// Convert a short type token to its long form, e.g. `SA` to `SHORTANSWER`.
///
/// Only tokens below the abbreviation length threshold are looked up; an
/// unknown token is returned unchanged so a parse of hand-edited source can
/// degrade gracefully instead of failing.
pub fn canonicalize(token: &str, extended: bool) -> &str {
    if token.len() >= ABBREVIATION_MAX_LEN {
        return token;
    }
    question_types(extended)
        .find(|d| d.abbreviations.contains(&token))
        .map_or(token, |d| d.canonical)
}

/// Whether the type token names a numeric question (long or short form).
pub fn is_numeric(qtype: &str) -> bool {
    qtype == "NUMERICAL" || qtype == "NM"
}

/// Whether the type token is semantically single-answer.
pub fn is_single_answer(qtype: &str) -> bool {
    qtype.contains("SHORTANSWER") || is_numeric(qtype)
}
