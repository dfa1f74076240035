//! The `medprep questions` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use medprep_core::query::{filter_questions, KindFilter, SystemFilter};

use crate::Source;

pub fn execute(kind: Option<KindFilter>, system: Option<SystemFilter>, source: Source) -> Result<()> {
    let (config, bank) = super::open_bank(&source)?;
    let kind = kind.unwrap_or(config.default_kind);
    let system = system.unwrap_or(config.default_system);

    let questions = filter_questions(&bank, kind, system);
    if questions.is_empty() {
        println!("No questions found for the selected filters.");
        return Ok(());
    }

    println!("Found {} question(s)", questions.len());

    let mut table = Table::new();
    table.set_header(vec!["#", "Type", "System", "ID", "Question"]);
    for item in &questions {
        let q = item.question;
        let text = match q.as_matching() {
            Some(emq) if q.stem().is_empty() => format!("{} case(s)", emq.cases.len()),
            _ => super::truncate(q.stem(), 70),
        };
        table.add_row(vec![
            Cell::new(item.number),
            Cell::new(q.kind()),
            Cell::new(q.system_label()),
            Cell::new(q.id()),
            Cell::new(text),
        ]);
    }

    println!("{table}");
    Ok(())
}
