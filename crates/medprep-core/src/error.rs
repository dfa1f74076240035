//! Error types for bank loading and answer evaluation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort loading a question bank. No partial bank is ever served.
#[derive(Debug, Error)]
pub enum BankError {
    /// The bank file could not be read.
    #[error("failed to read question bank {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is structurally invalid (not JSON, a section that is not
    /// a list, a record that is not an object, a field of the wrong type).
    #[error("malformed question bank: {source}")]
    Malformed {
        #[from]
        source: serde_json::Error,
    },
}

/// Errors raised while evaluating a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// An EMQ case's answer letter does not index into the shared options.
    /// `case_index` is zero-based and absent when the case is not one of the
    /// question's own cases.
    #[error("EMQ '{question_id}' {} has invalid answer '{answer}'", case_label(.case_index))]
    InvalidCaseAnswer {
        question_id: String,
        case_index: Option<usize>,
        answer: String,
    },

    /// The caller offered an option index outside the question's options.
    #[error("option index {index} out of range for question '{question_id}' ({len} options)")]
    OptionOutOfRange {
        question_id: String,
        index: usize,
        len: usize,
    },

    /// The option exists but sits past `Z`, so no letter can name it.
    #[error("option index {index} of question '{question_id}' has no letter (at most 26 options are answerable)")]
    NoOptionLetter { question_id: String, index: usize },
}

fn case_label(case_index: &Option<usize>) -> String {
    match case_index {
        Some(idx) => format!("case {}", idx + 1),
        None => "case".to_string(),
    }
}

/// Errors converting between option letters and indices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LetterError {
    #[error("not an option letter: '{0}'")]
    Invalid(String),

    #[error("option index {0} has no letter (maximum is 25)")]
    IndexTooLarge(usize),
}
