//! proctor CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod submission;

#[derive(Parser)]
#[command(name = "proctor", version, about = "Deterministic assessment generation and grading")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a test plan from a seed
    Plan {
        /// Seed string; same seed, same plan
        #[arg(long)]
        seed: String,

        /// Section codes to include (e.g. "A,C,F"; default: all)
        #[arg(long)]
        sections: Option<String>,

        /// Write the plan JSON to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade a submission against a stored plan
    Grade {
        /// Plan JSON produced by `proctor plan`
        #[arg(long)]
        plan: PathBuf,

        /// Submission JSON with per-section responses
        #[arg(long)]
        responses: PathBuf,

        /// Write the grade report JSON to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: table, json, markdown
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Summarize a stored plan
    Inspect {
        /// Plan JSON produced by `proctor plan`
        #[arg(long)]
        plan: PathBuf,
    },

    /// Create a starter proctor.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("proctor=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan {
            seed,
            sections,
            output,
            config,
        } => commands::plan::execute(seed, sections, output, config),
        Commands::Grade {
            plan,
            responses,
            output,
            format,
        } => commands::grade::execute(plan, responses, output, format),
        Commands::Inspect { plan } => commands::inspect::execute(plan),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
