mod commands;
mod output;
mod sampler;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "solbench")]
#[command(about = "Benchmark tooling and AST checks for Solidity audit evaluation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze Solidity contract(s) for structural vulnerability patterns
    Analyze {
        /// Path to a .sol file or a directory of contracts
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Minimum severity to report
        #[arg(short, long, default_value = "low")]
        severity: SeverityFilter,

        /// Run only these detectors (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        detectors: Option<Vec<String>>,

        /// Exclude these detectors (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// Path to config file (default: .solbench.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Re-run solc even when a cached AST exists
        #[arg(long)]
        no_cache: bool,

        /// Suppress banner and summary
        #[arg(short, long)]
        quiet: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Check whether an answer label names the expected vulnerability class
    CheckLabel {
        /// Expected canonical label
        #[arg(long)]
        expected: String,

        /// Free-text label to score
        #[arg(long)]
        answer: String,
    },
    /// Produce a confirmed-invalid contract task by sampling a corpus
    ForgeInvalid {
        /// Directory of seed .sol files to sample from
        #[arg(long)]
        corpus: PathBuf,

        /// Attempt budget (default from config, 10)
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Write the task JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Sample seed files verbatim instead of mutating them
        #[arg(long)]
        no_mutate: bool,

        /// Path to config file (default: .solbench.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List all available detectors
    List,
    /// Generate a default .solbench.toml config file
    Init,
}

#[derive(ValueEnum, Clone)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone)]
enum SeverityFilter {
    High,
    Medium,
    Low,
    Info,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            severity,
            detectors,
            exclude,
            config,
            no_cache,
            quiet,
            no_color,
        } => commands::analyze::run(
            &path, format, severity, detectors, exclude, config, no_cache, quiet, no_color,
        ),
        Commands::CheckLabel { expected, answer } => commands::check_label::run(&expected, &answer),
        Commands::ForgeInvalid {
            corpus,
            max_attempts,
            out,
            no_mutate,
            config,
        } => commands::forge::run(&corpus, max_attempts, out, no_mutate, config),
        Commands::List => commands::list::run(),
        Commands::Init => commands::init::run(),
    }
}
