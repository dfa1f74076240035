pub mod check;
pub mod init;
pub mod notes;
pub mod questions;
pub mod quiz;
pub mod stats;
pub mod validate;

use std::sync::Arc;

use anyhow::{Context, Result};

use medprep_core::config::{load_config_from, MedprepConfig};
use medprep_core::model::QuestionBank;
use medprep_core::parser::BankCache;

use crate::Source;

/// Resolve config and load the bank it points at.
pub fn open_bank(source: &Source) -> Result<(MedprepConfig, Arc<QuestionBank>)> {
    let mut config = load_config_from(source.config.as_deref())?;
    if let Some(bank) = &source.bank {
        config.bank_path = bank.clone();
    }

    let cache = BankCache::new(&config.bank_path);
    let bank = cache
        .get()
        .with_context(|| format!("failed to load question bank {}", cache.path().display()))?;
    Ok((config, bank))
}

/// Shorten text to at most `max` characters for table cells.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(3)).collect();
    short.push_str("...");
    short
}
