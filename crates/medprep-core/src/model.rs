//! Core data model types for medprep.
//!
//! A [`QuestionBank`] is loaded once and never mutated. Every text field has
//! already been resolved to a concrete value by the parser, so query and
//! evaluation code never deals with missing data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::letter::OptionLetter;

/// Medical subject area used as a filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum System {
    Renal,
    #[serde(rename = "CNS")]
    Cns,
    Musculoskeletal,
    Reproductive,
    Cardiovascular,
    Respiratory,
    /// Absent or unrecognised `system` field on a record.
    Unknown,
}

impl System {
    /// The six recognised systems, in display order.
    pub const ALL: [System; 6] = [
        System::Renal,
        System::Cns,
        System::Musculoskeletal,
        System::Reproductive,
        System::Cardiovascular,
        System::Respiratory,
    ];

    /// Canonical label as it appears in the bank document.
    pub fn label(self) -> &'static str {
        match self {
            System::Renal => "Renal",
            System::Cns => "CNS",
            System::Musculoskeletal => "Musculoskeletal",
            System::Reproductive => "Reproductive",
            System::Cardiovascular => "Cardiovascular",
            System::Respiratory => "Respiratory",
            System::Unknown => "Unknown",
        }
    }

    /// Exact-match lookup of a bank label. Anything else is `None`.
    pub fn from_label(label: &str) -> Option<System> {
        System::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for System {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        System::ALL
            .into_iter()
            .find(|sys| sys.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown medical system: {wanted}"))
    }
}

/// The three question formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionKind {
    /// Single best answer.
    Sba,
    /// Multiple choice.
    Mcq,
    /// Extended matching.
    Emq,
}

impl QuestionKind {
    /// Fixed presentation order: SBA, then MCQ, then EMQ.
    pub const ALL: [QuestionKind; 3] = [QuestionKind::Sba, QuestionKind::Mcq, QuestionKind::Emq];

    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Sba => "SBA",
            QuestionKind::Mcq => "MCQ",
            QuestionKind::Emq => "EMQ",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sba" => Ok(QuestionKind::Sba),
            "mcq" => Ok(QuestionKind::Mcq),
            "emq" => Ok(QuestionKind::Emq),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// An SBA or MCQ question: one stem, lettered options, one correct letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub id: String,
    pub system: System,
    /// The bank's label when it named no known system (`system` is then
    /// `Unknown`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrecognised_system: Option<String>,
    pub question: String,
    pub options: Vec<String>,
    /// Answer key as written in the bank (normally a single letter).
    pub correct_answer: String,
    pub explanation_correct: String,
    pub explanation_incorrect: String,
}

impl ChoiceQuestion {
    /// The system as it should be displayed: the bank's own label, even when
    /// it names no known system.
    pub fn system_label(&self) -> &str {
        display_label(self.system, self.unrecognised_system.as_deref())
    }

    /// Index of the correct option, if the answer key resolves to one.
    pub fn correct_index(&self) -> Option<usize> {
        OptionLetter::parse(&self.correct_answer)
            .ok()
            .and_then(|l| l.index_within(self.options.len()))
    }
}

/// One scenario of an extended matching question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingCase {
    pub case: String,
    /// Letter into the owning question's shared options.
    pub answer: String,
    pub explanation: String,
}

/// An EMQ: several cases matched against one shared option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingQuestion {
    pub id: String,
    pub system: System,
    /// The bank's label when it named no known system (`system` is then
    /// `Unknown`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrecognised_system: Option<String>,
    /// Lead-in text. Most EMQ records carry none.
    pub question: String,
    pub options: Vec<String>,
    pub cases: Vec<MatchingCase>,
}

impl MatchingQuestion {
    pub fn system_label(&self) -> &str {
        display_label(self.system, self.unrecognised_system.as_deref())
    }
}

/// A short revision note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyNote {
    pub title: String,
    pub system: System,
    /// The bank's label when it named no known system (`system` is then
    /// `Unknown`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrecognised_system: Option<String>,
    pub content: String,
}

impl StudyNote {
    pub fn system_label(&self) -> &str {
        display_label(self.system, self.unrecognised_system.as_deref())
    }
}

fn display_label(system: System, unrecognised: Option<&str>) -> &str {
    unrecognised.unwrap_or(system.label())
}

/// The immutable, loaded-once question bank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub sba: Vec<ChoiceQuestion>,
    pub mcq: Vec<ChoiceQuestion>,
    pub emq: Vec<MatchingQuestion>,
    pub notes: Vec<StudyNote>,
}

impl QuestionBank {
    /// Number of questions of one kind.
    pub fn count(&self, kind: QuestionKind) -> usize {
        match kind {
            QuestionKind::Sba => self.sba.len(),
            QuestionKind::Mcq => self.mcq.len(),
            QuestionKind::Emq => self.emq.len(),
        }
    }

    pub fn total_questions(&self) -> usize {
        self.sba.len() + self.mcq.len() + self.emq.len()
    }
}

/// A borrowed question of any kind, tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionRef<'a> {
    Sba(&'a ChoiceQuestion),
    Mcq(&'a ChoiceQuestion),
    Emq(&'a MatchingQuestion),
}

impl<'a> QuestionRef<'a> {
    pub fn kind(&self) -> QuestionKind {
        match *self {
            QuestionRef::Sba(_) => QuestionKind::Sba,
            QuestionRef::Mcq(_) => QuestionKind::Mcq,
            QuestionRef::Emq(_) => QuestionKind::Emq,
        }
    }

    pub fn id(&self) -> &'a str {
        match *self {
            QuestionRef::Sba(q) | QuestionRef::Mcq(q) => &q.id,
            QuestionRef::Emq(q) => &q.id,
        }
    }

    pub fn system(&self) -> System {
        match *self {
            QuestionRef::Sba(q) | QuestionRef::Mcq(q) => q.system,
            QuestionRef::Emq(q) => q.system,
        }
    }

    pub fn system_label(&self) -> &'a str {
        match *self {
            QuestionRef::Sba(q) | QuestionRef::Mcq(q) => q.system_label(),
            QuestionRef::Emq(q) => q.system_label(),
        }
    }

    pub fn stem(&self) -> &'a str {
        match *self {
            QuestionRef::Sba(q) | QuestionRef::Mcq(q) => &q.question,
            QuestionRef::Emq(q) => &q.question,
        }
    }

    pub fn options(&self) -> &'a [String] {
        match *self {
            QuestionRef::Sba(q) | QuestionRef::Mcq(q) => &q.options,
            QuestionRef::Emq(q) => &q.options,
        }
    }

    /// The SBA/MCQ payload, if this is a choice question.
    pub fn as_choice(&self) -> Option<&'a ChoiceQuestion> {
        match *self {
            QuestionRef::Sba(q) | QuestionRef::Mcq(q) => Some(q),
            QuestionRef::Emq(_) => None,
        }
    }

    pub fn as_matching(&self) -> Option<&'a MatchingQuestion> {
        match *self {
            QuestionRef::Emq(q) => Some(q),
            _ => None,
        }
    }
}
