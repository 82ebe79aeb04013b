//! # Engine Module
//!
//! Evaluation machinery shared by all workflows: the periodic neighbor list, the pair
//! term that turns contacts into energies and gradients, and the configuration, progress
//! and error types used around them.
//!
//! ## Architecture
//!
//! - **Neighbor List** ([`neighbors`]) - Cached contacts within a cutoff, including all
//!   periodic images, with rebuild-if-stale semantics
//! - **Pair Term** ([`pair_term`]) - Energy, gradient and virial accumulation over the
//!   contacts with exclusion scaling
//! - **Configuration** ([`config`]) - Builders for engine and tabulation settings
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Aggregated error type for workflows
//!
//! ## Evaluation Cycle
//!
//! The bond graph is turned into exclusion scalings once. Each time positions change the
//! neighbor list is updated, which rebuilds it only when stale. Each pair term is then
//! evaluated once per energy/gradient request while the list is borrowed immutably.

pub mod config;
pub mod error;
pub mod neighbors;
pub mod pair_term;
pub mod progress;
