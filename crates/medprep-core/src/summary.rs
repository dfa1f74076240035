//! Bank summary counts for overview screens.

use serde::{Deserialize, Serialize};

use crate::model::{QuestionBank, QuestionKind, System};
use crate::query::all_questions;

/// Questions and notes tagged with one system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemCount {
    pub system: System,
    pub questions: usize,
    pub notes: usize,
}

/// Counts describing a loaded bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankSummary {
    pub sba: usize,
    pub mcq: usize,
    pub emq: usize,
    /// Total EMQ cases across all EMQ questions.
    pub emq_cases: usize,
    pub total_questions: usize,
    pub notes: usize,
    /// The six systems in display order, followed by `Unknown` when any record
    /// lacks a recognised system.
    pub per_system: Vec<SystemCount>,
}

impl BankSummary {
    pub fn of(bank: &QuestionBank) -> Self {
        let count_for = |system: System| SystemCount {
            system,
            questions: all_questions(bank).filter(|q| q.system() == system).count(),
            notes: bank.notes.iter().filter(|n| n.system == system).count(),
        };

        let mut per_system: Vec<SystemCount> = System::ALL.into_iter().map(count_for).collect();
        let unknown = count_for(System::Unknown);
        if unknown.questions > 0 || unknown.notes > 0 {
            per_system.push(unknown);
        }

        Self {
            sba: bank.count(QuestionKind::Sba),
            mcq: bank.count(QuestionKind::Mcq),
            emq: bank.count(QuestionKind::Emq),
            emq_cases: bank.emq.iter().map(|q| q.cases.len()).sum(),
            total_questions: bank.total_questions(),
            notes: bank.notes.len(),
            per_system,
        }
    }

    /// Number of systems with at least one question or note.
    pub fn systems_covered(&self) -> usize {
        self.per_system
            .iter()
            .filter(|c| c.system != System::Unknown && (c.questions > 0 || c.notes > 0))
            .count()
    }
}
