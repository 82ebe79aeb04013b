//! # Workflows Module
//!
//! High-level entry points that assemble a system, its parameters and the evaluation
//! engine into complete tasks.
//!
//! ## Architecture
//!
//! - **Force Field** ([`forcefield`]) - A system with named pair parts that share one
//!   neighbor list and one exclusion table
//! - **Tabulation** ([`tabulate`]) - Sampling of every type-pair interaction over a
//!   distance grid, for export to external simulation codes
//!
//! Workflows report progress through [`crate::engine::progress::ProgressReporter`] and
//! return [`crate::engine::error::EngineError`].

pub mod forcefield;
pub mod tabulate;
