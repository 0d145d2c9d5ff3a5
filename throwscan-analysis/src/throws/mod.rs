//! Exception-flow checking.
//!
//! For every throw site (and, when enabled, every call site) inside a
//! function-like scope, the candidate exception types are narrowed by the
//! enclosing catch clauses and the configured ignore list, and whatever
//! survives is compared against the function's declared contract.
//!
//! Entry points are [`AnalysisSession`] (one per configuration and codebase) and the
//! [`ThrowChecker`] it hands out, or [`batch::check_files`] for many files
//! at once.

pub mod batch;
pub mod call_site;
pub mod caught_filter;
pub mod diagnostics;
pub mod engine;
pub mod handlers;
pub mod ignore_list;
pub mod session;
pub mod stats;
pub mod throw_site;

pub use batch::{check_files, BatchReport, FileReport};
pub use caught_filter::without_caught;
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
pub use engine::{CheckEnv, HandlerTable, Reporter, Site, SiteHandler, SiteKind, ThrowChecker};
pub use ignore_list::IgnoreList;
pub use session::AnalysisSession;
pub use stats::CheckStats;
