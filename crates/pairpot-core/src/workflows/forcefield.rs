use crate::core::forcefield::pair_pot::{PairKernel, PairPotential};
use crate::core::forcefield::parameterization::Parameterizer;
use crate::core::forcefield::params::Forcefield;
use crate::core::forcefield::term::EnergyTerm;
use crate::core::geometry::cell::Cell;
use crate::core::models::system::System;
use crate::core::topology::scalings::Scalings;
use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::neighbors::{NeighborConfig, NeighborList, UpdateOutcome};
use crate::engine::pair_term::PairTerm;
use nalgebra::{Matrix3, Vector3};
use tracing::{debug, info, instrument};

/// One named pair contribution of a force field.
#[derive(Debug, Clone)]
pub struct ForcePart {
    name: String,
    potential: PairPotential,
    sign: f64,
}

impl ForcePart {
    pub fn new(name: impl Into<String>, potential: PairPotential) -> Self {
        Self {
            name: name.into(),
            potential,
            sign: 1.0,
        }
    }

    /// Subtracts this part instead of adding it.
    pub fn negated(mut self) -> Self {
        self.sign = -self.sign;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn potential(&self) -> &PairPotential {
        &self.potential
    }

    pub fn sign(&self) -> f64 {
        self.sign
    }

    pub fn is_vdw(&self) -> bool {
        matches!(self.potential.kernel(), PairKernel::LennardJones(_))
    }
}

/// A system together with its non-bonded force field parts.
///
/// All parts share one neighbor list, built with the largest part cutoff, and one table
/// of exclusion scalings.
#[derive(Debug)]
pub struct ForceField {
    system: System,
    nlist: NeighborList,
    scalings: Scalings,
    parts: Vec<ForcePart>,
}

impl ForceField {
    /// Assigns the parameters of `forcefield` to `system` and builds the neighbor list.
    #[instrument(skip_all, name = "forcefield_generate")]
    pub fn generate(
        system: System,
        forcefield: &Forcefield,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        let potentials = Parameterizer::new(forcefield)
            .with_electrostatic_mode(config.electrostatic_mode)
            .build_potentials(&system)?;

        let mut parts = Vec::new();
        if let Some(lj) = potentials.lennard_jones {
            parts.push(ForcePart::new("pair_lj", lj));
        }
        if let Some(ei) = potentials.electrostatics {
            parts.push(ForcePart::new("pair_ei", ei));
        }

        let scalings = Scalings::build(
            system.graph(),
            config.scalings.unwrap_or(forcefield.scalings),
        )?;
        Self::from_parts(system, scalings, parts, config)
    }

    pub fn from_parts(
        system: System,
        scalings: Scalings,
        parts: Vec<ForcePart>,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        if parts.is_empty() {
            return Err(EngineError::Initialization(
                "a force field needs at least one pair part".to_string(),
            ));
        }
        if scalings.len() != system.natom() {
            return Err(EngineError::Initialization(format!(
                "scalings cover {} particles, the system has {}",
                scalings.len(),
                system.natom()
            )));
        }
        for part in &parts {
            let covered = part.potential.kernel().natom();
            if covered != system.natom() {
                return Err(EngineError::Initialization(format!(
                    "part '{}' has parameters for {} particles, the system has {}",
                    part.name,
                    covered,
                    system.natom()
                )));
            }
        }

        let cutoff = parts
            .iter()
            .map(|part| part.potential.rcut())
            .fold(0.0, f64::max);
        let neighbor_config = NeighborConfig::new(cutoff)
            .with_skin(config.neighbor_skin)
            .with_rebuild_fraction(config.rebuild_fraction);
        let mut nlist = NeighborList::new(neighbor_config)?;
        nlist.update(system.positions(), system.cell());

        info!(
            natom = system.natom(),
            nffatypes = system.ffatypes().len(),
            nparts = parts.len(),
            cutoff,
            ncontacts = nlist.nneigh(),
            "Force field assembled"
        );

        Ok(Self {
            system,
            nlist,
            scalings,
            parts,
        })
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn nlist(&self) -> &NeighborList {
        &self.nlist
    }

    pub fn nlist_mut(&mut self) -> &mut NeighborList {
        &mut self.nlist
    }

    pub fn scalings(&self) -> &Scalings {
        &self.scalings
    }

    pub fn parts(&self) -> &[ForcePart] {
        &self.parts
    }

    pub fn part(&self, name: &str) -> Option<&ForcePart> {
        self.parts.iter().find(|part| part.name == name)
    }

    pub fn update_positions(
        &mut self,
        positions: &[Vector3<f64>],
    ) -> Result<UpdateOutcome, EngineError> {
        self.system.set_positions(positions)?;
        let outcome = self.nlist.update(self.system.positions(), self.system.cell());
        debug!(?outcome, "Updated positions");
        Ok(outcome)
    }

    pub fn update_cell(&mut self, cell: Cell) -> UpdateOutcome {
        self.system.set_cell(cell);
        self.nlist.update(self.system.positions(), self.system.cell())
    }

    /// Evaluates every part. Gradient and virial contributions are added to `gpos` and
    /// `vtens` when given.
    pub fn compute(
        &self,
        mut gpos: Option<&mut [Vector3<f64>]>,
        mut vtens: Option<&mut Matrix3<f64>>,
    ) -> EnergyTerm {
        let mut total = EnergyTerm::default();
        for part in &self.parts {
            let energy = self.compute_part(part, gpos.as_deref_mut(), vtens.as_deref_mut());
            if part.is_vdw() {
                total.vdw += energy;
            } else {
                total.electrostatic += energy;
            }
        }
        total
    }

    /// Signed energy of a single part.
    pub fn compute_part(
        &self,
        part: &ForcePart,
        gpos: Option<&mut [Vector3<f64>]>,
        vtens: Option<&mut Matrix3<f64>>,
    ) -> f64 {
        let term = PairTerm::new(&self.nlist, &self.scalings, &part.potential);
        if part.sign == 1.0 {
            return term.compute_with_virial(gpos, vtens);
        }

        let mut part_gpos = gpos.as_ref().map(|g| vec![Vector3::zeros(); g.len()]);
        let mut part_vtens = vtens.as_ref().map(|_| Matrix3::zeros());
        let energy = term.compute_with_virial(part_gpos.as_deref_mut(), part_vtens.as_mut());
        if let (Some(target), Some(source)) = (gpos, part_gpos) {
            for (t, s) in target.iter_mut().zip(source) {
                *t += s * part.sign;
            }
        }
        if let (Some(target), Some(source)) = (vtens, part_vtens) {
            *target += source * part.sign;
        }
        energy * part.sign
    }
}
