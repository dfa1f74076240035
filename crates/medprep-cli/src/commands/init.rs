//! The `medprep init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing("medprep.toml", SAMPLE_CONFIG)?;
    write_if_missing("questions_database.json", SAMPLE_BANK)?;

    println!("\nNext steps:");
    println!("  1. Replace questions_database.json with your own question bank");
    println!("  2. Run: medprep validate");
    println!("  3. Run: medprep quiz --kind sba --system renal");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if std::path::Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# medprep configuration

# Question bank document, relative to this file
bank_path = "questions_database.json"

# Filters used when --kind / --system are not given
default_kind = "All"
default_system = "All"
"#;

const SAMPLE_BANK: &str = include_str!("../../../../data/questions_database.json");
