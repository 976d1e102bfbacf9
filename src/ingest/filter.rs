use tracing::info;

use crate::core::module::ModuleId;
use crate::ingest::scan::RawEdge;

/// Keeps only edges whose both ends live under `prefix` and strips it.
#[derive(Debug, Clone)]
pub struct PrefixFilter<'a> {
    prefix: &'a str,
}

impl<'a> PrefixFilter<'a> {
    pub fn new(prefix: &'a str) -> Self {
        Self { prefix }
    }

    pub fn apply(&self, edge: &RawEdge) -> Option<(ModuleId, ModuleId)> {
        let stripped = edge
            .module
            .strip_prefix(self.prefix)
            .zip(edge.dependency.strip_prefix(self.prefix));
        match stripped {
            Some((module, dependency)) => Some((ModuleId::new(module), ModuleId::new(dependency))),
            None => {
                info!(
                    module = %edge.module,
                    dependency = %edge.dependency,
                    prefix = self.prefix,
                    "prefix mismatch"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::module::ModuleId;
    use crate::ingest::filter::PrefixFilter;
    use crate::ingest::scan::RawEdge;

    fn raw(module: &str, dependency: &str) -> RawEdge {
        RawEdge {
            module: module.to_string(),
            dependency: dependency.to_string(),
        }
    }

    #[test]
    fn strips_prefix_from_both_ends() {
        let filter = PrefixFilter::new("github.com/acme/");
        let kept = filter.apply(&raw("github.com/acme/api/client", "github.com/acme/core"));
        assert_eq!(
            kept,
            Some((ModuleId::new("api/client"), ModuleId::new("core")))
        );
    }

    #[test]
    fn drops_pair_when_either_end_is_outside_namespace() {
        let filter = PrefixFilter::new("github.com/acme/");
        assert!(filter
            .apply(&raw("github.com/acme/api", "golang.org/x/text"))
            .is_none());
        assert!(filter
            .apply(&raw("golang.org/x/net", "github.com/acme/api"))
            .is_none());
    }

    #[test]
    fn empty_prefix_keeps_everything() {
        let filter = PrefixFilter::new("");
        assert_eq!(
            filter.apply(&raw("a", "b")),
            Some((ModuleId::new("a"), ModuleId::new("b")))
        );
    }
}
