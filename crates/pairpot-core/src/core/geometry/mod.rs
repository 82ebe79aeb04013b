//! Periodic simulation cells and minimum-image displacements.

pub mod cell;
