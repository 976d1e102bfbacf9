use std::fmt;

/// Identifier of one module in the dependency graph, with the namespace
/// prefix already stripped (for example `api/client`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading path segment, used to group modules of the same repository.
    /// A module without any `/` is its own repository.
    pub fn repo_key(&self) -> &str {
        repo_key(&self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

pub fn repo_key(path: &str) -> &str {
    path.split_once('/').map_or(path, |(repo, _)| repo)
}
