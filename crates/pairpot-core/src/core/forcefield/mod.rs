//! # Force Field Module
//!
//! Pair potentials and the parameters that feed them.
//!
//! ## Overview
//!
//! Non-bonded interactions are described by a closed set of radial kernels:
//!
//! - **Lennard-Jones 12-6** with arithmetic/geometric mixing rules
//! - **Electrostatics** as a real-space Ewald term, optionally corrected for
//!   Gaussian-smeared charges and scaled by a dielectric constant
//!
//! Each kernel is wrapped in a [`pair_pot::PairPotential`] that adds a cutoff radius and a
//! truncation scheme (hard or cubic switching).
//!
//! ## Key Components
//!
//! - [`potentials`] - Inline radial kernels returning energy and radial derivative
//! - [`pair_pot`] - Kernel sum type, cutoff and truncation
//! - [`params`] - Parameter file format (TOML, angstrom and kcal/mol)
//! - [`parameterization`] - Assignment of per-atom parameters to a system
//! - [`term`] - Energy decomposition into van der Waals and electrostatic parts
//!
//! ## Usage
//!
//! ```ignore
//! use pairpot::core::forcefield::{params::Forcefield, parameterization::Parameterizer};
//!
//! let forcefield = Forcefield::load(Path::new("water.toml"))?;
//! let potentials = Parameterizer::new(&forcefield).build_potentials(&system)?;
//! ```

pub mod pair_pot;
pub mod parameterization;
pub mod params;
pub mod potentials;
pub mod term;
