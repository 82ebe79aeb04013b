use super::pair_pot::{
    Electrostatic, ElectrostaticMode, LennardJones, PairKernel, PairPotential, PotentialError,
    Truncation,
};
use super::params::Forcefield;
use crate::core::models::system::System;
use crate::core::units::{ANGSTROM, KCALMOL};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum ParameterizationError {
    #[error("Missing Lennard-Jones parameters for atom type '{ffatype}' (atom {index})")]
    MissingVdwParams { ffatype: String, index: usize },
    #[error("Missing charge for atom type '{ffatype}' (atom {index})")]
    MissingCharge { ffatype: String, index: usize },
    #[error("Invalid pair potential: {0}")]
    Potential(#[from] PotentialError),
}

/// Pair potentials assigned to one system, one per configured force field part.
#[derive(Debug, Clone, Default)]
pub struct PotentialSet {
    pub lennard_jones: Option<PairPotential>,
    pub electrostatics: Option<PairPotential>,
}

/// Assigns per-atom parameters from a [`Forcefield`] to the particles of a [`System`].
///
/// A particle's own charge or radius takes precedence over its type entry. All values are
/// converted to atomic units.
pub struct Parameterizer<'a> {
    forcefield: &'a Forcefield,
    mode: ElectrostaticMode,
}

impl<'a> Parameterizer<'a> {
    pub fn new(forcefield: &'a Forcefield) -> Self {
        Self {
            forcefield,
            mode: ElectrostaticMode::Full,
        }
    }

    pub fn with_electrostatic_mode(mut self, mode: ElectrostaticMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build_potentials(&self, system: &System) -> Result<PotentialSet, ParameterizationError> {
        Ok(PotentialSet {
            lennard_jones: self.lennard_jones(system)?,
            electrostatics: self.electrostatics(system)?,
        })
    }

    pub fn lennard_jones(
        &self,
        system: &System,
    ) -> Result<Option<PairPotential>, ParameterizationError> {
        let Some(section) = &self.forcefield.lennard_jones else {
            return Ok(None);
        };

        let mut sigmas = Vec::with_capacity(system.natom());
        let mut epsilons = Vec::with_capacity(system.natom());
        for (index, particle) in system.particles().iter().enumerate() {
            let param = section.types.get(&particle.ffatype).ok_or_else(|| {
                ParameterizationError::MissingVdwParams {
                    ffatype: particle.ffatype.clone(),
                    index,
                }
            })?;
            sigmas.push(param.sigma * ANGSTROM);
            epsilons.push(param.epsilon * KCALMOL);
        }

        let kernel = PairKernel::LennardJones(LennardJones::new(sigmas, epsilons)?);
        let potential = PairPotential::new(kernel, section.cutoff * ANGSTROM)?
            .with_truncation(truncation(section.switch_width))?;
        debug!(rcut = potential.rcut(), "Assigned Lennard-Jones parameters");
        Ok(Some(potential))
    }

    pub fn electrostatics(
        &self,
        system: &System,
    ) -> Result<Option<PairPotential>, ParameterizationError> {
        let Some(section) = &self.forcefield.electrostatics else {
            return Ok(None);
        };

        let mut charges = Vec::with_capacity(system.natom());
        let mut radii = Vec::with_capacity(system.natom());
        for (index, particle) in system.particles().iter().enumerate() {
            let entry = section.types.get(&particle.ffatype);
            let charge = particle
                .charge
                .or(entry.map(|p| p.charge))
                .ok_or_else(|| ParameterizationError::MissingCharge {
                    ffatype: particle.ffatype.clone(),
                    index,
                })?;
            let radius = particle
                .radius
                .or(entry.map(|p| p.radius * ANGSTROM))
                .unwrap_or(0.0);
            charges.push(charge);
            radii.push(radius);
        }

        let mut ei = Electrostatic::new(charges, section.alpha / ANGSTROM)?
            .with_dielectric(section.dielectric)?
            .with_mode(self.mode);
        if radii.iter().any(|&r| r != 0.0) {
            ei = ei.with_radii(radii)?;
        }

        let potential = PairPotential::new(PairKernel::Electrostatic(ei), section.cutoff * ANGSTROM)?
            .with_truncation(truncation(section.switch_width))?;
        debug!(rcut = potential.rcut(), "Assigned electrostatic parameters");
        Ok(Some(potential))
    }
}

fn truncation(switch_width: Option<f64>) -> Truncation {
    match switch_width {
        Some(width) => Truncation::Switch3 {
            width: width * ANGSTROM,
        },
        None => Truncation::Hard,
    }
}
