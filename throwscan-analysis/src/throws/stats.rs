//! Per-run counters.

use throwscan_core::errors::AbstainReason;
use throwscan_core::types::FxHashMap;

/// What one check run looked at and how often it gave up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckStats {
    pub files_checked: usize,
    pub functions_visited: usize,
    pub throw_sites: usize,
    pub call_sites: usize,
    pub diagnostics: usize,
    /// Throw sites whose thrown expression had no inferable type.
    pub unknown_types: usize,
    pub abstentions: FxHashMap<AbstainReason, usize>,
}

impl CheckStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_abstention(&mut self, reason: AbstainReason) {
        *self.abstentions.entry(reason).or_default() += 1;
    }

    pub fn abstentions_for(&self, reason: AbstainReason) -> usize {
        self.abstentions.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_abstentions(&self) -> usize {
        self.abstentions.values().sum::<usize>() + self.unknown_types
    }

    pub fn merge(&mut self, other: &CheckStats) {
        self.files_checked += other.files_checked;
        self.functions_visited += other.functions_visited;
        self.throw_sites += other.throw_sites;
        self.call_sites += other.call_sites;
        self.diagnostics += other.diagnostics;
        self.unknown_types += other.unknown_types;
        for (reason, count) in &other.abstentions {
            *self.abstentions.entry(*reason).or_default() += count;
        }
    }
}
