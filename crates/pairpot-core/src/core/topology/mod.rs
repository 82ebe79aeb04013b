//! Exclusion and scaling of near-bonded neighbors derived from the bond graph.

pub mod scalings;
