//! misassess CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod clipboard;
mod commands;
mod console;
mod status;

#[derive(Parser)]
#[command(
    name = "misassess",
    version,
    about = "MCQ assessment with rule-based evaluation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the assessment interactively
    Take {
        /// Question bank TOML (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Candidate name (prompted when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Candidate email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Output directory for exported files
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score an answers file
    Score {
        /// Answers file (.toml with an [answers] table, or .json)
        #[arg(long)]
        answers: PathBuf,

        /// Candidate name
        #[arg(long)]
        name: String,

        /// Candidate email
        #[arg(long)]
        email: String,

        /// Question bank TOML (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output format: text, json, html, all
        #[arg(long, default_value = "text")]
        format: String,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a question bank TOML file
    Validate {
        /// Question bank file (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Create a starter config and answers template
    Init,
}

#[tokio::main]
async fn main() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "misassess=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            bank,
            name,
            email,
            output,
            config,
        } => commands::take::execute(bank, name, email, output, config).await,
        Commands::Score {
            answers,
            name,
            email,
            bank,
            format,
            output,
            config,
        } => commands::score::execute(answers, name, email, bank, format, output, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
