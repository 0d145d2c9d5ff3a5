//! Core types, errors, configuration, and tracing for throwscan.
//!
//! Everything here is shared by the analysis crate and by embedding hosts;
//! nothing in this crate knows about trees, types, or exception contracts.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;
