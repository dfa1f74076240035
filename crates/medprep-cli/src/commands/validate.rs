//! The `medprep validate` command.

use anyhow::Result;

use medprep_core::parser::validate_bank;
use medprep_core::summary::BankSummary;

use crate::Source;

pub fn execute(source: Source) -> Result<()> {
    let (config, bank) = super::open_bank(&source)?;
    let summary = BankSummary::of(&bank);

    println!(
        "Question bank: {} ({} questions, {} notes)",
        config.bank_path.display(),
        summary.total_questions,
        summary.notes
    );

    let warnings = validate_bank(&bank);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
