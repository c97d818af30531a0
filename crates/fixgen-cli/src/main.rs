//! # fixgen-cli
//!
//! Command line front end for the fixture generators.
//!
//! Parses arguments, sets up logging and the panic hook, and dispatches to
//! the command handlers on a tokio runtime. Errors are printed with their
//! help text and cause chain, and turn into a non-zero exit status.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use fixgen_core::{FixResult, FixtureError};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Generate package-manager test fixtures
#[derive(Parser)]
#[command(name = "fixgen", version, about = "Generate package-manager test fixtures")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file to use instead of a discovered fixgen.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the conda repository index
    Repodata {
        /// Output file (default: output.json)
        #[arg(short, long, value_name = "PATH")]
        output: Option<Utf8PathBuf>,
        /// Indent the JSON instead of writing a single line
        #[arg(long)]
        pretty: bool,
    },
    /// Write the setup.py projects and upload each one
    Scaffold {
        /// Directory the project folders are created in
        #[arg(long, value_name = "DIR")]
        root: Option<Utf8PathBuf>,
        /// Only write the projects, skip the upload step
        #[arg(long)]
        no_upload: bool,
        /// Interpreter used to run setup.py
        #[arg(long, env = "FIXGEN_PYTHON", value_name = "BIN")]
        python: Option<String>,
        /// Package index name passed to `upload -r`
        #[arg(long, value_name = "NAME")]
        repository: Option<String>,
    },
    /// Verify a repodata file and report its dependency cycles
    Check {
        /// Repodata file to read
        path: Utf8PathBuf,
    },
    /// Print the dependency cycles of both datasets
    Cycles,
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    debug!("Starting fixgen v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> FixResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| FixtureError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new(cli.config).await?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "fixgen_cli={level},fixgen_core={level},fixgen_config={level},\
             fixgen_repodata={level},fixgen_scaffold={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("fixgen encountered an unexpected error: {}", panic_info);
        eprintln!("fixgen crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/fixgen/fixgen/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
