//! Parallel checking of many files.

use rayon::prelude::*;
use tracing::info;

use crate::ast::SourceFile;

use super::diagnostics::Diagnostic;
use super::session::AnalysisSession;
use super::stats::CheckStats;

/// Result for one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: String,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: CheckStats,
}

/// Results for a batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub stats: CheckStats,
}

impl BatchReport {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|f| f.diagnostics.iter())
    }

    pub fn diagnostic_count(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }
}

/// Check `files` in parallel against one shared session.
pub fn check_files(session: &AnalysisSession<'_>, files: &[SourceFile]) -> BatchReport {
    let checker = session.checker();

    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|file| {
            let mut diagnostics = Vec::new();
            let stats = checker.check_file(file, &mut diagnostics);
            FileReport {
                path: file.path.clone(),
                diagnostics,
                stats,
            }
        })
        .collect();

    let mut stats = CheckStats::new();
    for report in &reports {
        stats.merge(&report.stats);
    }
    info!(
        files = stats.files_checked,
        diagnostics = stats.diagnostics,
        abstentions = stats.total_abstentions(),
        "batch checked"
    );
    BatchReport {
        files: reports,
        stats,
    }
}
