use std::path::PathBuf;

use crate::config::file::{load_config_file, ConfigFile};
use crate::config::{ConfigError, RunConfig, Verbosity};

/// Values supplied on the command line or through the environment. These
/// take precedence over anything in the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub prefix: Option<String>,
    pub config_path: Option<PathBuf>,
    pub verbose: u8,
    pub link_scheme: Option<String>,
}

pub fn resolve_config(overrides: ConfigOverrides) -> Result<RunConfig, ConfigError> {
    let file = match overrides.config_path.as_deref() {
        Some(path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };
    merge(overrides, file)
}

fn merge(overrides: ConfigOverrides, file: ConfigFile) -> Result<RunConfig, ConfigError> {
    let prefix = non_empty(overrides.prefix)
        .or_else(|| non_empty(file.prefix))
        .ok_or(ConfigError::MissingPrefix)?;

    let mut config = RunConfig::new(prefix)?;
    let file_verbosity = if file.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Quiet
    };
    config.verbosity = Verbosity::from_count(overrides.verbose).max(file_verbosity);
    if let Some(scheme) = non_empty(overrides.link_scheme).or_else(|| non_empty(file.link_scheme))
    {
        config.link_scheme = scheme;
    }
    Ok(config)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
