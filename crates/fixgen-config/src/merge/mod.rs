//! Configuration discovery and layering of command line overrides

use crate::toml::FixgenToml;
use crate::{ConfigResult, CONFIG_FILE_NAME};
use camino::{Utf8Path, Utf8PathBuf};
use fixgen_core::FixtureError;
use tracing::debug;

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
    /// Last directory searched during discovery
    ceiling: Option<Utf8PathBuf>,
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// fixgen.toml found by walking up from the working directory
    Discovered(Utf8PathBuf),
    /// File passed with `--config`
    Explicit(Utf8PathBuf),
    /// No file, built-in defaults only
    Defaults,
}

/// Values given on the command line; `None` leaves the file value alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub output: Option<Utf8PathBuf>,
    pub pretty: bool,
    pub root: Option<Utf8PathBuf>,
    pub python: Option<String>,
    pub repository: Option<String>,
    pub no_upload: bool,
}

/// Layers defaults, the config file and command line overrides
pub struct ConfigLayering;

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd, ceiling: None }
    }

    /// Stop discovery after searching `ceiling` instead of the filesystem root
    pub fn with_ceiling(mut self, ceiling: Utf8PathBuf) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    /// Create a loader for the process working directory
    pub fn from_current_dir() -> ConfigResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| FixtureError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| {
            FixtureError::config(
                "cwd",
                format!("working directory is not valid UTF-8: {}", path.display()),
            )
        })?;
        Ok(Self::new(cwd))
    }

    /// Load the configuration, preferring an explicit path over discovery
    pub async fn load(&self, explicit: Option<&Utf8Path>) -> ConfigResult<(FixgenToml, ConfigSource)> {
        if let Some(path) = explicit {
            let path = self.cwd.join(path);
            let config = crate::toml::load_from_file(&path).await?;
            return Ok((config, ConfigSource::Explicit(path)));
        }

        match self.find_config_file() {
            Some(path) => {
                debug!("Using configuration from {}", path);
                let config = crate::toml::load_from_file(&path).await?;
                Ok((config, ConfigSource::Discovered(path)))
            }
            None => {
                debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                Ok((FixgenToml::default(), ConfigSource::Defaults))
            }
        }
    }

    /// Find fixgen.toml in the working directory or one of its parents,
    /// up to and including the ceiling if one is set
    pub fn find_config_file(&self) -> Option<Utf8PathBuf> {
        let mut current = Some(self.cwd.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }
            if self.ceiling.as_deref() == Some(dir) {
                break;
            }
            current = dir.parent();
        }

        None
    }
}

impl ConfigLayering {
    /// Apply command line overrides on top of a loaded configuration
    pub fn merge(mut config: FixgenToml, cli: &CliOverrides) -> FixgenToml {
        if let Some(output) = &cli.output {
            config.repodata.output = Some(output.clone());
        }
        if cli.pretty {
            config.repodata.pretty = Some(true);
        }
        if let Some(root) = &cli.root {
            config.scaffold.root = Some(root.clone());
        }
        if let Some(python) = &cli.python {
            config.scaffold.python = Some(python.clone());
        }
        if let Some(repository) = &cli.repository {
            config.scaffold.repository = Some(repository.clone());
        }
        if cli.no_upload {
            config.scaffold.upload = Some(false);
        }

        config
    }
}
