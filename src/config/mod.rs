pub mod file;
pub mod resolve;

pub use file::ConfigFile;
pub use resolve::{resolve_config, ConfigOverrides};

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_LINK_SCHEME: &str = "https";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("must provide a module prefix (--prefix or MODGRAPH_PREFIX)")]
    MissingPrefix,
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config at {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// How much diagnostic logging a run asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    #[default]
    Quiet,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Quiet,
            1 => Self::Verbose,
            _ => Self::Trace,
        }
    }
}

/// Settings for a single run, passed explicitly to every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub prefix: String,
    pub verbosity: Verbosity,
    pub link_scheme: String,
}

impl RunConfig {
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(ConfigError::MissingPrefix);
        }
        Ok(Self {
            prefix,
            verbosity: Verbosity::default(),
            link_scheme: DEFAULT_LINK_SCHEME.to_string(),
        })
    }

    /// Link target for a repository group, e.g. `https://github.com/acme/api`.
    pub fn repo_url(&self, repo: &str) -> String {
        format!("{}://{}{}", self.link_scheme, self.prefix, repo)
    }
}
