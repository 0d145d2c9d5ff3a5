//! Exception-flow analysis for throwscan.
//!
//! Checks that every exception a function may let escape, whether thrown
//! directly or declared by a callee it invokes, is covered by the function's
//! own declared exception contract once locally caught types are removed.
//!
//! The crate is organised leaves first:
//! - [`types`]: `Type` and the `TypeSet` algebra.
//! - [`ast`]: the lowered tree hosts hand in, and the scope chain built
//!   while walking it.
//! - [`provider`]: traits for the collaborators the analysis consumes
//!   (type inference, call resolution, contract lookup).
//! - [`codebase`]: an in-memory implementation of those traits.
//! - [`throws`]: handler resolution, caught-type filtering, the ignore list,
//!   the site analyzers, and the dispatch engine.

pub mod ast;
pub mod codebase;
pub mod provider;
pub mod throws;
pub mod types;
