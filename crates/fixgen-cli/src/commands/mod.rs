//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking the parsed arguments and a
//! `CommandContext`. Relative paths are resolved against the context's
//! working directory, never against the process' one.

use camino::{Utf8Path, Utf8PathBuf};
use fixgen_config::{CliOverrides, ConfigLayering, ConfigLoader, ConfigSource, FixgenToml};
use fixgen_core::{datasets, FixResult, FixtureError, PackageRecord, PackageTable};
use tracing::{debug, info, warn};

pub mod check;
pub mod cycles;
pub mod repodata;
pub mod scaffold;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    /// Path given with `--config`
    pub config: Option<Utf8PathBuf>,
    /// Last directory searched for fixgen.toml; `None` searches up to the root
    pub config_ceiling: Option<Utf8PathBuf>,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a context for the process working directory
    pub async fn new(config: Option<Utf8PathBuf>) -> FixResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| FixtureError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| {
            FixtureError::config(
                "cwd",
                format!("working directory is not valid UTF-8: {}", path.display()),
            )
        })?;

        Ok(Self {
            cwd,
            config,
            config_ceiling: None,
            output: OutputHandler::new(),
        })
    }

    /// Load fixgen.toml and apply the command line overrides on top
    pub async fn load_config(&self, overrides: &CliOverrides) -> FixResult<FixgenToml> {
        let mut loader = ConfigLoader::new(self.cwd.clone());
        if let Some(ceiling) = &self.config_ceiling {
            loader = loader.with_ceiling(ceiling.clone());
        }
        let (config, source) = loader.load(self.config.as_deref()).await?;

        match &source {
            ConfigSource::Discovered(path) | ConfigSource::Explicit(path) => {
                info!("Using configuration from {}", path);
            }
            ConfigSource::Defaults => debug!("Using built-in configuration"),
        }

        Ok(ConfigLayering::merge(config, overrides))
    }

    /// Resolve a possibly relative path against the working directory
    pub fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        self.cwd.join(path)
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> FixResult<()> {
    match command {
        Commands::Repodata { output, pretty } => {
            debug!("Generating repodata (output: {:?}, pretty: {})", output, pretty);
            let overrides = CliOverrides {
                output,
                pretty,
                ..CliOverrides::default()
            };
            repodata::execute(&overrides, ctx).await
        }
        Commands::Scaffold {
            root,
            no_upload,
            python,
            repository,
        } => {
            debug!("Scaffolding projects (root: {:?}, no_upload: {})", root, no_upload);
            let overrides = CliOverrides {
                root,
                python,
                repository,
                no_upload,
                ..CliOverrides::default()
            };
            scaffold::execute(&overrides, ctx).await
        }
        Commands::Check { path } => {
            debug!("Checking {}", path);
            check::execute(&path, ctx).await
        }
        Commands::Cycles => cycles::execute(ctx).await,
        Commands::Version => show_version(ctx).await,
    }
}

/// Package table of the repository index: the configured packages if any,
/// otherwise the built-in dataset
pub fn repodata_table(config: &FixgenToml) -> PackageTable {
    if config.repodata.packages.is_empty() {
        return datasets::repodata_table();
    }
    collect_table(config.repodata.packages.iter().cloned())
}

/// Package table of the scaffolded projects, configured or built-in
pub fn scaffold_table(config: &FixgenToml) -> PackageTable {
    if config.scaffold.projects.is_empty() {
        return datasets::scaffold_table();
    }
    collect_table(config.scaffold.projects.iter().map(|p| p.to_record()))
}

/// Insert records in order; a repeated name and version replaces the earlier one
fn collect_table(records: impl IntoIterator<Item = PackageRecord>) -> PackageTable {
    let mut table = PackageTable::new();
    for record in records {
        if let Some(previous) = table.insert(record) {
            warn!("{} is defined more than once, keeping the last definition", previous.key());
        }
    }
    table
}

async fn show_version(ctx: &CommandContext) -> FixResult<()> {
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.line(&format!("fixgen v{}", env!("CARGO_PKG_VERSION")));
    ctx.output.info(&format!("Built: {}", env!("BUILD_DATE")));
    ctx.output.info(&format!("Target: {}", target));
    ctx.output.info(&format!("Rust: {}", env!("RUSTC_VERSION")));

    Ok(())
}
