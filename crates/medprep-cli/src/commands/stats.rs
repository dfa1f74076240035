//! The `medprep stats` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use medprep_core::summary::BankSummary;

use crate::Source;

pub fn execute(source: Source, format: String) -> Result<()> {
    let (_, bank) = super::open_bank(&source)?;
    let summary = BankSummary::of(&bank);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "text" => print_summary(&summary),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_summary(summary: &BankSummary) {
    println!("Total questions: {}", summary.total_questions);
    println!("  SBA (Single Best Answer): {}", summary.sba);
    println!("  MCQ (Multiple Choice):    {}", summary.mcq);
    println!(
        "  EMQ (Extended Matching):  {} ({} cases)",
        summary.emq, summary.emq_cases
    );
    println!("Study notes: {}", summary.notes);
    println!("Medical systems covered: {}", summary.systems_covered());

    let mut table = Table::new();
    table.set_header(vec!["System", "Questions", "Notes"]);
    for count in &summary.per_system {
        table.add_row(vec![
            Cell::new(count.system),
            Cell::new(count.questions),
            Cell::new(count.notes),
        ]);
    }

    println!("\n{table}");
}
