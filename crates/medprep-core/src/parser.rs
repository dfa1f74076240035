//! JSON question bank parser.
//!
//! Loads the bank document, resolves missing fields to their defaults,
//! validates the result, and caches one snapshot per process.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde::Deserialize;

use crate::error::BankError;
use crate::letter::{OptionLetter, MAX_OPTIONS};
use crate::model::{
    ChoiceQuestion, MatchingCase, MatchingQuestion, QuestionBank, StudyNote, System,
};

/// Intermediate structure for the bank document. Every field is optional;
/// defaults are applied in one place when converting to the model.
#[derive(Debug, Default, Deserialize)]
struct JsonBank {
    #[serde(default)]
    sba: Option<Vec<JsonChoice>>,
    #[serde(default)]
    mcq: Option<Vec<JsonChoice>>,
    #[serde(default)]
    emq: Option<Vec<JsonMatching>>,
    #[serde(default, rename = "shortNotes")]
    short_notes: Option<Vec<JsonNote>>,
}

/// Question ids appear as both numbers and strings in real banks.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonId {
    Text(String),
    Number(serde_json::Number),
}

impl JsonId {
    fn into_string(self) -> String {
        match self {
            JsonId::Text(s) => s,
            JsonId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonChoice {
    #[serde(default)]
    id: Option<JsonId>,
    #[serde(default)]
    system: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    explanation_correct: Option<String>,
    #[serde(default)]
    explanation_incorrect: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonMatching {
    #[serde(default)]
    id: Option<JsonId>,
    #[serde(default)]
    system: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    cases: Option<Vec<JsonCase>>,
}

#[derive(Debug, Deserialize)]
struct JsonCase {
    #[serde(default)]
    case: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonNote {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    system: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Answer letter assumed for an EMQ case that carries none.
const DEFAULT_CASE_ANSWER: &str = "A";

/// Resolve a record's system. An unrecognised label is kept alongside
/// `Unknown` so it can still be displayed.
fn resolve_system(raw: Option<String>) -> (System, Option<String>) {
    match raw {
        Some(label) => match System::from_label(&label) {
            Some(system) => (system, None),
            None => {
                tracing::warn!("unrecognised system '{label}', filtering it as Unknown");
                (System::Unknown, Some(label))
            }
        },
        None => {
            tracing::debug!("record without a system, using Unknown");
            (System::Unknown, None)
        }
    }
}

fn resolve_id(raw: Option<JsonId>) -> String {
    raw.map(JsonId::into_string).unwrap_or_default()
}

impl From<JsonChoice> for ChoiceQuestion {
    fn from(q: JsonChoice) -> Self {
        let (system, unrecognised_system) = resolve_system(q.system);
        ChoiceQuestion {
            id: resolve_id(q.id),
            system,
            unrecognised_system,
            question: q.question.unwrap_or_default(),
            options: q.options.unwrap_or_default(),
            correct_answer: q.correct_answer.unwrap_or_default(),
            explanation_correct: q.explanation_correct.unwrap_or_default(),
            explanation_incorrect: q.explanation_incorrect.unwrap_or_default(),
        }
    }
}

impl From<JsonMatching> for MatchingQuestion {
    fn from(q: JsonMatching) -> Self {
        let (system, unrecognised_system) = resolve_system(q.system);
        let id = resolve_id(q.id);
        MatchingQuestion {
            system,
            unrecognised_system,
            question: q.question.unwrap_or_default(),
            options: q.options.unwrap_or_default(),
            cases: q
                .cases
                .unwrap_or_default()
                .into_iter()
                .map(|c| MatchingCase {
                    case: c.case.unwrap_or_default(),
                    answer: c.answer.unwrap_or_else(|| {
                        tracing::debug!(question = %id, "case without an answer, using {DEFAULT_CASE_ANSWER}");
                        DEFAULT_CASE_ANSWER.to_string()
                    }),
                    explanation: c.explanation.unwrap_or_default(),
                })
                .collect(),
            id,
        }
    }
}

impl From<JsonNote> for StudyNote {
    fn from(n: JsonNote) -> Self {
        let (system, unrecognised_system) = resolve_system(n.system);
        StudyNote {
            title: n.title.unwrap_or_default(),
            system,
            unrecognised_system,
            content: n.content.unwrap_or_default(),
        }
    }
}

fn convert<R, T: From<R>>(raw: Option<Vec<R>>) -> Vec<T> {
    raw.unwrap_or_default().into_iter().map(T::from).collect()
}

/// Load a question bank from a JSON file.
pub fn load_bank(path: &Path) -> Result<QuestionBank, BankError> {
    let content = std::fs::read_to_string(path).map_err(|source| BankError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let bank = parse_bank_str(&content)?;
    tracing::info!(
        sba = bank.sba.len(),
        mcq = bank.mcq.len(),
        emq = bank.emq.len(),
        notes = bank.notes.len(),
        "loaded question bank from {}",
        path.display()
    );

    let warnings = validate_bank(&bank);
    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "question bank {} has data warnings",
            path.display()
        );
        for warning in &warnings {
            tracing::debug!(question = ?warning.question_id, "{}", warning.message);
        }
    }
    Ok(bank)
}

/// Parse a JSON string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str) -> Result<QuestionBank, BankError> {
    // Derived struct impls also accept a JSON array, so the top level is
    // checked before deserializing.
    if !content.trim_start().starts_with('{') {
        serde_json::from_str::<serde::de::IgnoredAny>(content)?;
        return Err(BankError::Malformed {
            source: serde::de::Error::custom("question bank must be a JSON object"),
        });
    }
    let parsed: JsonBank = serde_json::from_str(content)?;

    Ok(QuestionBank {
        sba: convert(parsed.sba),
        mcq: convert(parsed.mcq),
        emq: convert(parsed.emq),
        notes: convert(parsed.short_notes),
    })
}

/// Loads a bank at most once and hands out the same snapshot thereafter.
///
/// The snapshot is immutable, so the returned `Arc` can be shared across any
/// number of sessions without synchronisation.
#[derive(Debug)]
pub struct BankCache {
    path: PathBuf,
    cell: OnceLock<Arc<QuestionBank>>,
}

impl BankCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached bank, loading it on first use.
    ///
    /// A failed load caches nothing; the next call tries again.
    pub fn get(&self) -> Result<Arc<QuestionBank>, BankError> {
        if let Some(bank) = self.cell.get() {
            return Ok(Arc::clone(bank));
        }
        let loaded = Arc::new(load_bank(&self.path)?);
        // Another caller may have won the race; whichever snapshot landed is
        // the one everybody sees.
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a bank for common data issues. None of these stop the bank from
/// being served.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let choice = bank
        .sba
        .iter()
        .map(|q| ("SBA", q))
        .chain(bank.mcq.iter().map(|q| ("MCQ", q)));
    let ids_and_systems = choice
        .clone()
        .map(|(kind, q)| (kind, q.id.as_str(), q.system, q.options.len()))
        .chain(
            bank.emq
                .iter()
                .map(|q| ("EMQ", q.id.as_str(), q.system, q.options.len())),
        );

    let mut seen_ids = HashSet::new();
    for (kind, id, system, option_count) in ids_and_systems {
        if id.is_empty() {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("{kind} question without an id"),
            });
        } else if !seen_ids.insert(id) {
            warnings.push(ValidationWarning::question(
                id,
                format!("duplicate question id: {id}"),
            ));
        }
        if system == System::Unknown {
            warnings.push(ValidationWarning::question(id, "system is missing or unrecognised"));
        }
        if option_count < 2 {
            warnings.push(ValidationWarning::question(
                id,
                format!("only {option_count} option(s)"),
            ));
        } else if option_count > MAX_OPTIONS {
            warnings.push(ValidationWarning::question(
                id,
                format!(
                    "{option_count} options, but only the first {MAX_OPTIONS} (A-Z) can be answered"
                ),
            ));
        }
    }

    for (_, q) in choice {
        if q.correct_index().is_none() {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!(
                    "correct_answer '{}' does not match any of {} options",
                    q.correct_answer,
                    q.options.len()
                ),
            ));
        }
    }

    for q in &bank.emq {
        if q.cases.is_empty() {
            warnings.push(ValidationWarning::question(&q.id, "EMQ has no cases"));
        }
        for (idx, case) in q.cases.iter().enumerate() {
            let resolves = OptionLetter::parse(&case.answer)
                .ok()
                .and_then(|l| l.index_within(q.options.len()))
                .is_some();
            if !resolves {
                warnings.push(ValidationWarning::question(
                    &q.id,
                    format!("case {} answer '{}' does not match any option", idx + 1, case.answer),
                ));
            }
        }
    }

    for note in &bank.notes {
        if note.title.trim().is_empty() || note.content.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("study note '{}' has an empty title or content", note.title),
            });
        }
    }

    warnings
}
