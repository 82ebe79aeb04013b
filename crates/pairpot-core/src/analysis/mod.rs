//! # Analysis Module
//!
//! Post-processing of simulation output.
//!
//! - **Hills Sum** ([`hills`]) - Reconstruction of a free-energy surface from the Gaussian
//!   hills deposited by a metadynamics run

pub mod hills;
