//! Configuration system for throwscan.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod throwscan_config;

pub use analysis_config::AnalysisConfig;
pub use throwscan_config::{CliOverrides, ThrowscanConfig};
