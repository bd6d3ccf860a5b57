//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::spec_cmd;
use crate::storage::GlobalConfig;

#[derive(Parser)]
#[command(name = "gpub")]
#[command(author, version, about = "Generate book specs from Go game records")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a raw spec from a book file
    Create {
        /// Path to the book TOML file
        book: PathBuf,

        /// Write the spec here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Expand every position of a spec
    Process {
        /// Path to the spec JSON (`-` for stdin)
        spec: PathBuf,

        /// Write the processed spec here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List the labels of generated positions in a processed spec
    Labels {
        /// Path to the processed spec JSON (`-` for stdin)
        spec: PathBuf,
    },
}

/// Routes library events to stderr; `RUST_LOG` overrides the level
fn init_tracing(verbose: bool) {
    let default = if verbose { "gpub=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let global = GlobalConfig::load()?;
    let format = cli
        .format
        .unwrap_or_else(|| OutputFormat::from(global.default_format));
    let output = Output::new(format, cli.verbose);

    output.verbose("gpub starting");

    match cli.command {
        Commands::Create { book, output: out } => {
            output.verbose_ctx("create", &format!("Reading book file: {}", book.display()));
            spec_cmd::create(&output, &global, &book, out.as_deref())?
        }
        Commands::Process { spec, output: out } => {
            output.verbose_ctx("process", &format!("Reading spec: {}", spec.display()));
            spec_cmd::process(&output, &spec, out.as_deref())?
        }
        Commands::Labels { spec } => spec_cmd::labels(&output, &spec)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
