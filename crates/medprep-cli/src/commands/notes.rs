//! The `medprep notes` command.

use anyhow::Result;

use medprep_core::query::{filter_notes, SystemFilter};

use crate::Source;

pub fn execute(system: Option<SystemFilter>, source: Source) -> Result<()> {
    let (config, bank) = super::open_bank(&source)?;
    let system = system.unwrap_or(config.default_system);

    let notes = filter_notes(&bank, system);
    if notes.is_empty() {
        println!("No study notes found for the selected system.");
        return Ok(());
    }

    for note in notes {
        println!("## {} - {}", note.title, note.system_label());
        println!("{}\n", note.content);
    }

    Ok(())
}
