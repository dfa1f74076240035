//! medprep CLI, the terminal front end for the question bank.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use medprep_core::letter::OptionLetter;
use medprep_core::query::{KindFilter, SystemFilter};

mod commands;

#[derive(Parser)]
#[command(name = "medprep", version, about = "Medical exam question bank")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct Source {
    /// Path to the question bank JSON (overrides config and MEDPREP_BANK)
    #[arg(long)]
    bank: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a question bank for data problems
    Validate {
        #[command(flatten)]
        source: Source,
    },

    /// Show question and note counts
    Stats {
        #[command(flatten)]
        source: Source,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List questions matching the filters
    Questions {
        /// Question type: all, sba, mcq, emq
        #[arg(long)]
        kind: Option<KindFilter>,

        /// Medical system, e.g. renal or cns (default: all)
        #[arg(long)]
        system: Option<SystemFilter>,

        #[command(flatten)]
        source: Source,
    },

    /// Show study notes
    Notes {
        /// Medical system (default: all)
        #[arg(long)]
        system: Option<SystemFilter>,

        #[command(flatten)]
        source: Source,
    },

    /// Check a single answer
    Check {
        /// Question id
        #[arg(long)]
        id: String,

        /// Chosen option letter
        #[arg(long)]
        answer: OptionLetter,

        /// EMQ case number, starting at 1
        #[arg(long)]
        case: Option<usize>,

        #[command(flatten)]
        source: Source,
    },

    /// Answer questions interactively
    Quiz {
        /// Question type: all, sba, mcq, emq
        #[arg(long)]
        kind: Option<KindFilter>,

        /// Medical system (default: all)
        #[arg(long)]
        system: Option<SystemFilter>,

        #[command(flatten)]
        source: Source,
    },

    /// Create a starter config and sample question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medprep=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { source } => commands::validate::execute(source),
        Commands::Stats { source, format } => commands::stats::execute(source, format),
        Commands::Questions {
            kind,
            system,
            source,
        } => commands::questions::execute(kind, system, source),
        Commands::Notes { system, source } => commands::notes::execute(system, source),
        Commands::Check {
            id,
            answer,
            case,
            source,
        } => commands::check::execute(id, answer, case, source),
        Commands::Quiz {
            kind,
            system,
            source,
        } => commands::quiz::execute(kind, system, source),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
