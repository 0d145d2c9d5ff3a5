//! Exception types exempt from contract checking.

use std::sync::OnceLock;

use throwscan_core::config::AnalysisConfig;
use tracing::debug;

use crate::provider::TypeProvider;
use crate::types::TypeSet;

/// Configured type names, parsed into a [`TypeSet`] on first use.
///
/// The parsed set is built at most once per lifetime of the list, even when
/// several workers ask for it concurrently. [`IgnoreList::reset`] drops it so
/// the next use parses again. The cached ids belong to the provider that
/// built them, so every call must pass that same provider.
/// [`AnalysisSession`](super::AnalysisSession) pairs the list with one.
#[derive(Debug, Default)]
pub struct IgnoreList {
    configured: Vec<String>,
    cached: OnceLock<TypeSet>,
}

impl IgnoreList {
    pub fn new(configured: Vec<String>) -> Self {
        Self {
            configured,
            cached: OnceLock::new(),
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.ignored_exception_types.clone())
    }

    pub fn configured(&self) -> &[String] {
        &self.configured
    }

    /// The ignored types, parsing the configured names if needed.
    pub(crate) fn types(&self, provider: &dyn TypeProvider) -> &TypeSet {
        self.cached.get_or_init(|| self.build(provider))
    }

    /// Whether an expanded thrown type should still be checked.
    pub(crate) fn should_report(&self, expanded: &TypeSet, provider: &dyn TypeProvider) -> bool {
        let ignored = self.types(provider);
        ignored.is_empty() || !provider.can_cast(expanded, ignored)
    }

    pub fn is_initialized(&self) -> bool {
        self.cached.get().is_some()
    }

    /// Forget the parsed set.
    pub fn reset(&mut self) {
        self.cached.take();
    }

    fn build(&self, provider: &dyn TypeProvider) -> TypeSet {
        let mut ignored = TypeSet::empty();
        for name in &self.configured {
            if name.trim().is_empty() {
                continue;
            }
            let parsed = provider.parse_type_string(name);
            if parsed.is_empty() {
                debug!(entry = %name, "ignored exception type could not be parsed, skipping");
                continue;
            }
            ignored.extend(parsed.iter());
        }
        debug!(
            configured = self.configured.len(),
            types = ignored.len(),
            "ignore list built"
        );
        ignored
    }
}
