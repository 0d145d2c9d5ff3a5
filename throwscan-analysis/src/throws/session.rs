//! Per-configuration analysis state.

use std::fmt;

use throwscan_core::config::{AnalysisConfig, ThrowscanConfig};
use tracing::info;

use crate::provider::{CallableProvider, TypeProvider};
use crate::types::TypeSet;

use super::engine::{HandlerTable, ThrowChecker};
use super::ignore_list::IgnoreList;

/// Owns the ignore list and the installed site handlers, bound to the type
/// and callable providers every check of this session runs against.
///
/// The parsed ignore list holds types interned by `types`, so a session
/// never sees another provider. Build one per configuration and codebase and
/// borrow it for every file. A session can be shared by parallel workers; the
/// ignore list is parsed by whichever worker needs it first.
pub struct AnalysisSession<'p> {
    ignore_list: IgnoreList,
    handlers: HandlerTable,
    types: &'p dyn TypeProvider,
    callables: &'p dyn CallableProvider,
}

impl<'p> AnalysisSession<'p> {
    pub fn new(
        config: &AnalysisConfig,
        types: &'p dyn TypeProvider,
        callables: &'p dyn CallableProvider,
    ) -> Self {
        let handlers = HandlerTable::for_config(config);
        info!(
            check_invoked_callables = config.effective_check_invoked_callables(),
            ignored = config.ignored_exception_types.len(),
            "analysis session created"
        );
        Self::with_handlers(IgnoreList::from_config(config), handlers, types, callables)
    }

    pub fn from_config(
        config: &ThrowscanConfig,
        types: &'p dyn TypeProvider,
        callables: &'p dyn CallableProvider,
    ) -> Self {
        Self::new(&config.analysis, types, callables)
    }

    /// A session with a custom handler table.
    pub fn with_handlers(
        ignore_list: IgnoreList,
        handlers: HandlerTable,
        types: &'p dyn TypeProvider,
        callables: &'p dyn CallableProvider,
    ) -> Self {
        Self {
            ignore_list,
            handlers,
            types,
            callables,
        }
    }

    pub fn ignore_list(&self) -> &IgnoreList {
        &self.ignore_list
    }

    /// The ignored types as parsed by this session's type provider.
    pub fn ignored_types(&self) -> &TypeSet {
        self.ignore_list.types(self.types)
    }

    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    pub fn types(&self) -> &'p dyn TypeProvider {
        self.types
    }

    pub fn callables(&self) -> &'p dyn CallableProvider {
        self.callables
    }

    /// Drop cached state. The ignore list is parsed again on next use.
    pub fn reset(&mut self) {
        self.ignore_list.reset();
    }

    /// Replace the configuration, as on analyzer reload. The providers stay.
    pub fn reload(&mut self, config: &AnalysisConfig) {
        *self = Self::new(config, self.types, self.callables);
    }

    pub fn checker(&self) -> ThrowChecker<'_> {
        ThrowChecker::new(self)
    }
}

impl fmt::Debug for AnalysisSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisSession")
            .field("ignore_list", &self.ignore_list)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}
