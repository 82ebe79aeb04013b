//! # pairpot Core Library
//!
//! A non-bonded pair-interaction engine for molecular force fields. Given particles,
//! a (possibly periodic) cell, a bond graph and per-particle parameters, it evaluates
//! the pairwise interaction energy, its analytic gradient and the virial.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`System`, `Cell`, `BondGraph`),
//!   the topological exclusion model (`Scalings`), pure pair kernels, parameter files
//!   and unit constants.
//!
//! - **[`engine`]: The Logic Core.** Stateful evaluation machinery: the cached
//!   `NeighborList` with its staleness tracking, and the `PairTerm` pass that combines
//!   contacts, scalings and a `PairPotential` into energy, gradient and virial.
//!
//! - **[`workflows`]: The Public API.** Composite force fields assembled from a system
//!   and a parameter file, and the single-contact tabulation mode.
//!
//! The [`analysis`] module holds post-processing that does not touch the engine, such as
//! the free-energy reconstruction from deposited Gaussian hills.

pub mod analysis;
pub mod core;
pub mod engine;
pub mod workflows;
