use std::path::Path;

use serde::Deserialize;

use crate::config::ConfigError;

/// Optional on-disk settings, e.g. `modgraph.toml`:
///
/// ```toml
/// prefix = "github.com/acme/"
/// verbose = true
/// link_scheme = "https"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub link_scheme: Option<String>,
}

pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}
