//! # Core Module
//!
//! The fundamental building blocks of the non-bonded engine.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Particles, bond graphs and systems
//! - **Periodic Geometry** ([`geometry`]) - Simulation cells and the minimum-image convention
//! - **Exclusions** ([`topology`]) - 1-2, 1-3 and 1-4 scaling derived from the bond graph
//! - **Pair Potentials** ([`forcefield`]) - Lennard-Jones and electrostatic kernels,
//!   truncation, parameter files and parameterization
//! - **File I/O** ([`io`]) - Reading systems from TOML files
//! - **Units** ([`units`]) - Conversion factors to the internal atomic units
//!
//! ## Scientific Foundation
//!
//! - **Lorentz-Berthelot mixing** for heteroatomic Lennard-Jones pairs
//! - **Ewald real-space screening** `erfc(alpha d)/d` for periodic electrostatics
//! - **Gaussian charge smearing** `erf(d/gamma)/d` for distributed charges
//! - **Fractional-coordinate wrapping** for triclinic cells

pub mod forcefield;
pub mod geometry;
pub mod io;
pub mod models;
pub mod topology;
pub mod units;
