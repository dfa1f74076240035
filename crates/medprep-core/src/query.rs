//! Filtering the bank by question kind and medical system.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{QuestionBank, QuestionKind, QuestionRef, StudyNote, System};

/// Which question kinds to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KindFilter {
    #[default]
    All,
    Sba,
    Mcq,
    Emq,
}

impl KindFilter {
    pub fn matches(self, kind: QuestionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Sba => kind == QuestionKind::Sba,
            KindFilter::Mcq => kind == QuestionKind::Mcq,
            KindFilter::Emq => kind == QuestionKind::Emq,
        }
    }
}

impl From<QuestionKind> for KindFilter {
    fn from(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Sba => KindFilter::Sba,
            QuestionKind::Mcq => KindFilter::Mcq,
            QuestionKind::Emq => KindFilter::Emq,
        }
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindFilter::All => f.write_str("All"),
            KindFilter::Sba => f.write_str("SBA"),
            KindFilter::Mcq => f.write_str("MCQ"),
            KindFilter::Emq => f.write_str("EMQ"),
        }
    }
}

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(KindFilter::All);
        }
        s.parse::<QuestionKind>().map(KindFilter::from)
    }
}

impl TryFrom<String> for KindFilter {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<KindFilter> for String {
    fn from(filter: KindFilter) -> Self {
        filter.to_string()
    }
}

/// Either every system or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SystemFilter {
    #[default]
    All,
    Only(System),
}

impl SystemFilter {
    /// Questions with an `Unknown` system only ever match `All`.
    pub fn matches(self, system: System) -> bool {
        match self {
            SystemFilter::All => true,
            SystemFilter::Only(wanted) => wanted == system && system != System::Unknown,
        }
    }
}

impl fmt::Display for SystemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemFilter::All => f.write_str("All"),
            SystemFilter::Only(system) => write!(f, "{system}"),
        }
    }
}

impl FromStr for SystemFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(SystemFilter::All);
        }
        s.parse::<System>().map(SystemFilter::Only)
    }
}

impl TryFrom<String> for SystemFilter {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SystemFilter> for String {
    fn from(filter: SystemFilter) -> Self {
        filter.to_string()
    }
}

/// A question in a filtered listing, with its 1-based display number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredQuestion<'a> {
    pub number: usize,
    pub question: QuestionRef<'a>,
}

/// All questions of the bank in presentation order: SBA, then MCQ, then EMQ,
/// each in insertion order.
pub fn all_questions(bank: &QuestionBank) -> impl Iterator<Item = QuestionRef<'_>> {
    bank.sba
        .iter()
        .map(QuestionRef::Sba)
        .chain(bank.mcq.iter().map(QuestionRef::Mcq))
        .chain(bank.emq.iter().map(QuestionRef::Emq))
}

/// Filter questions by kind and system.
///
/// When `kind` is `All` the result is SBA, then MCQ, then EMQ; insertion order
/// is kept within each kind. Numbering follows that order, so it must not
/// change. An empty result is not an error.
pub fn filter_questions(
    bank: &QuestionBank,
    kind: KindFilter,
    system: SystemFilter,
) -> Vec<FilteredQuestion<'_>> {
    all_questions(bank)
        .filter(|q| kind.matches(q.kind()) && system.matches(q.system()))
        .enumerate()
        .map(|(idx, question)| FilteredQuestion {
            number: idx + 1,
            question,
        })
        .collect()
}

/// Filter study notes by system, keeping bank order.
pub fn filter_notes(bank: &QuestionBank, system: SystemFilter) -> Vec<&StudyNote> {
    bank.notes
        .iter()
        .filter(|n| system.matches(n.system))
        .collect()
}

/// Find a question by id. The first match in SBA, MCQ, EMQ order wins.
pub fn find_question<'a>(bank: &'a QuestionBank, id: &str) -> Option<QuestionRef<'a>> {
    all_questions(bank).find(|q| q.id() == id)
}
