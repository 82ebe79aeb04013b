//! # Core Models Module
//!
//! Data structures describing the particles the engine evaluates.
//!
//! ## Key Components
//!
//! - [`atom`] - Per-particle metadata: atomic number, atom type, optional charge and radius
//! - [`elements`] - Static element symbol lookup
//! - [`topology`] - Bonds and the bond graph used to derive exclusions
//! - [`system`] - Particles, positions, bond graph and cell bundled together
//!
//! ## Usage
//!
//! ```ignore
//! use pairpot::core::models::{atom::Particle, system::System};
//! use pairpot::core::geometry::cell::Cell;
//!
//! let particles = vec![Particle::new(8, "O"), Particle::new(1, "H"), Particle::new(1, "H")];
//! let system = System::new(particles, positions, &[(0, 1), (0, 2)], Cell::non_periodic())?;
//! ```

pub mod atom;
pub mod elements;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod system;
pub mod topology;
