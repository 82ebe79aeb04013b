use super::atom::Particle;
use super::topology::{BondGraph, TopologyError};
use crate::core::geometry::cell::Cell;
use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SystemError {
    #[error("Expected {expected} positions, got {found}")]
    PositionCountMismatch { expected: usize, found: usize },
    #[error("Invalid bond topology: {0}")]
    Topology(#[from] TopologyError),
    #[error("Supercell repetitions must be positive and only span periodic directions")]
    InvalidRepetition,
}

/// A particle set with positions, bond graph and simulation cell.
///
/// All lengths are in bohr.
#[derive(Debug, Clone)]
pub struct System {
    particles: Vec<Particle>,
    positions: Vec<Vector3<f64>>,
    graph: BondGraph,
    cell: Cell,
}

impl System {
    pub fn new(
        particles: Vec<Particle>,
        positions: Vec<Vector3<f64>>,
        bonds: &[(usize, usize)],
        cell: Cell,
    ) -> Result<Self, SystemError> {
        if positions.len() != particles.len() {
            return Err(SystemError::PositionCountMismatch {
                expected: particles.len(),
                found: positions.len(),
            });
        }
        let graph = BondGraph::new(particles.len(), bonds)?;
        Ok(Self {
            particles,
            positions,
            graph,
            cell,
        })
    }

    pub fn natom(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    pub fn graph(&self) -> &BondGraph {
        &self.graph
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    pub fn set_positions(&mut self, positions: &[Vector3<f64>]) -> Result<(), SystemError> {
        if positions.len() != self.natom() {
            return Err(SystemError::PositionCountMismatch {
                expected: self.natom(),
                found: positions.len(),
            });
        }
        self.positions.copy_from_slice(positions);
        Ok(())
    }

    pub fn set_cell(&mut self, cell: Cell) {
        self.cell = cell;
    }

    /// Distinct atom types in order of first appearance.
    pub fn ffatypes(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for particle in &self.particles {
            if !seen.contains(&particle.ffatype.as_str()) {
                seen.push(particle.ffatype.as_str());
            }
        }
        seen
    }

    /// Replicates the system `reps[k]` times along each periodic direction.
    ///
    /// Bonds that cross a cell boundary are reconnected to the nearest image inside the
    /// enlarged cell, so a molecule wrapped across the boundary stays bonded.
    pub fn supercell(&self, reps: [usize; 3]) -> Result<Self, SystemError> {
        let nvec = self.cell.nvec();
        if reps.iter().any(|&r| r == 0) || reps[nvec..].iter().any(|&r| r != 1) {
            return Err(SystemError::InvalidRepetition);
        }
        let natom = self.natom();
        let ncopy: usize = reps.iter().product();

        let mut particles = Vec::with_capacity(natom * ncopy);
        let mut positions = Vec::with_capacity(natom * ncopy);
        let mut offsets = Vec::with_capacity(ncopy);
        for a in 0..reps[0] {
            for b in 0..reps[1] {
                for c in 0..reps[2] {
                    let offset = [a as i32, b as i32, c as i32];
                    let shift = self.cell.image_shift(offset);
                    particles.extend(self.particles.iter().cloned());
                    positions.extend(self.positions.iter().map(|r| r + shift));
                    offsets.push(offset);
                }
            }
        }

        let rvecs: Vec<Vector3<f64>> = self
            .cell
            .rvecs()
            .iter()
            .zip(reps)
            .map(|(r, n)| r * n as f64)
            .collect();
        let cell = Cell::new(&rvecs).map_err(|_| SystemError::InvalidRepetition)?;

        let index_of = |offset: [i32; 3], atom: usize| -> usize {
            let a = offset[0].rem_euclid(reps[0] as i32) as usize;
            let b = offset[1].rem_euclid(reps[1] as i32) as usize;
            let c = offset[2].rem_euclid(reps[2] as i32) as usize;
            ((a * reps[1] + b) * reps[2] + c) * natom + atom
        };

        let mut bonds = Vec::with_capacity(self.graph.bonds().len() * ncopy);
        for bond in self.graph.bonds() {
            let delta = self.positions[bond.j] - self.positions[bond.i];
            let wrap = self.cell.wrap_shift(&delta);
            for offset in &offsets {
                let partner = [
                    offset[0] - wrap[0],
                    offset[1] - wrap[1],
                    offset[2] - wrap[2],
                ];
                bonds.push((index_of(*offset, bond.i), index_of(partner, bond.j)));
            }
        }

        Self::new(particles, positions, &bonds, cell)
    }
}
