use super::forcefield::ForceField;
use crate::core::forcefield::pair_pot::{
    Electrostatic, ElectrostaticMode, PairKernel, PairPotential,
};
use crate::core::models::system::System;
use crate::engine::config::TableConfig;
use crate::engine::error::EngineError;
use crate::engine::pair_term::PairTerm;
use crate::engine::progress::{Progress, ProgressReporter};
use itertools::Itertools;
use nalgebra::Vector3;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error, PartialEq)]
pub enum TabulationError {
    #[error(
        "No pair of atoms with types '{type_a}' and '{type_b}' lies beyond the 1-4 band; \
         tabulate a supercell instead"
    )]
    NoValidPair { type_a: String, type_b: String },
    #[error("The force field has no pair parts that can be tabulated")]
    NothingToTabulate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    pub distance: f64,
    pub energy: f64,
    /// `-dE/dd`.
    pub force: f64,
}

/// A sampled pair interaction between two (possibly refined) atom types.
#[derive(Debug, Clone, PartialEq)]
pub struct PairTable {
    pub name: String,
    pub type_a: String,
    pub type_b: String,
    pub rows: Vec<TableRow>,
}

/// Largest cutoff among the parts that enter the tables.
///
/// Electrostatic parts only count when they carry Gaussian radii, since the screened
/// point-charge term itself is never tabulated.
pub fn tabulated_rcut(forcefield: &ForceField) -> Option<f64> {
    forcefield
        .parts()
        .iter()
        .filter(|part| match part.potential().kernel() {
            PairKernel::LennardJones(_) => true,
            PairKernel::Electrostatic(ei) => ei.has_smeared_charges(),
        })
        .map(|part| part.potential().rcut())
        .reduce(f64::max)
}

/// Per-particle type labels used for tabulation.
///
/// Without smeared charges these are the force-field types. Otherwise each type is split
/// by its distinct `(charge, radius)` combinations, rounded to 8 decimals, and the subtypes
/// are named `<type>_00000`, `<type>_00001`, ... in order of first appearance.
pub fn refine_ffatypes(system: &System, electrostatics: Option<&Electrostatic>) -> Vec<String> {
    let Some(ei) = electrostatics.filter(|ei| ei.has_smeared_charges()) else {
        return system
            .particles()
            .iter()
            .map(|p| p.ffatype.clone())
            .collect();
    };
    let radii = ei.radii().unwrap_or_default();

    let mut subtypes: HashMap<&str, Vec<(i64, i64)>> = HashMap::new();
    system
        .particles()
        .iter()
        .enumerate()
        .map(|(index, particle)| {
            let key = (
                round_key(ei.charges()[index]),
                round_key(radii.get(index).copied().unwrap_or(0.0)),
            );
            let seen = subtypes.entry(particle.ffatype.as_str()).or_default();
            let k = match seen.iter().position(|&s| s == key) {
                Some(k) => k,
                None => {
                    seen.push(key);
                    seen.len() - 1
                }
            };
            format!("{}_{:05}", particle.ffatype, k)
        })
        .collect()
}

fn round_key(value: f64) -> i64 {
    (value * 1e8).round() as i64
}

/// Tabulates energy and force of every pair of atom types over the distances of `config`.
///
/// Each table is sampled on a representative pair of particles by injecting a single
/// contact into the force field's neighbor list. The list is rebuilt from the system
/// afterwards, also when tabulation fails.
#[instrument(skip_all, name = "tabulation_workflow")]
pub fn run(
    forcefield: &mut ForceField,
    config: &TableConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<PairTable>, EngineError> {
    let result = tabulate(forcefield, config, reporter);
    restore_neighbor_list(forcefield);
    result
}

fn restore_neighbor_list(forcefield: &mut ForceField) {
    let positions = forcefield.system().positions().to_vec();
    let cell = forcefield.system().cell().clone();
    let nlist = forcefield.nlist_mut();
    nlist.invalidate();
    nlist.update(&positions, &cell);
}

fn tabulate(
    forcefield: &mut ForceField,
    config: &TableConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<PairTable>, EngineError> {
    // === Phase 1: Select parts and atom types ===
    reporter.report(Progress::PhaseStart {
        name: "Type selection",
    });

    let smeared = forcefield.parts().iter().find_map(|part| match part.potential().kernel() {
        PairKernel::Electrostatic(ei) if ei.has_smeared_charges() => Some((ei, part.potential())),
        _ => None,
    });
    let correction = smeared
        .map(|(ei, potential)| {
            let kernel = ei
                .without_screening()
                .with_mode(ElectrostaticMode::SmearingCorrection);
            PairPotential::new(PairKernel::Electrostatic(kernel), potential.rcut())?
                .with_truncation(potential.truncation())
        })
        .transpose()?;
    let has_vdw = forcefield.parts().iter().any(|part| part.is_vdw());
    if !has_vdw && correction.is_none() {
        return Err(TabulationError::NothingToTabulate.into());
    }

    let labels = refine_ffatypes(forcefield.system(), smeared.map(|(ei, _)| ei));
    let types: Vec<&str> = labels.iter().map(String::as_str).sorted().dedup().collect();
    info!(
        ntypes = types.len(),
        refined = correction.is_some(),
        "Atom types selected for tabulation"
    );

    let pairs = types
        .iter()
        .combinations_with_replacement(2)
        .map(|pair| {
            let (type_a, type_b) = (*pair[0], *pair[1]);
            representative_pair(forcefield, &labels, type_a, type_b)
                .map(|(i, j)| (type_a, type_b, i, j))
        })
        .collect::<Result<Vec<_>, _>>()?;

    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Sample every type pair ===
    reporter.report(Progress::PhaseStart { name: "Tabulation" });
    reporter.report(Progress::TaskStart {
        total_steps: pairs.len() as u64,
    });

    let distances = config.distances();
    debug!(
        rmin = config.rmin(),
        rmax = config.rmax(),
        nrows = config.nrows(),
        "Sampling distance grid"
    );
    let mut gpos = vec![Vector3::zeros(); forcefield.system().natom()];
    let mut tables = Vec::with_capacity(pairs.len());
    for (type_a, type_b, index0, index1) in pairs {
        let mut rows = Vec::with_capacity(distances.len());
        for &distance in &distances {
            forcefield.nlist_mut().inject_contact(index0, index1, distance)?;
            gpos[index0] = Vector3::zeros();
            gpos[index1] = Vector3::zeros();

            let mut energy = 0.0;
            for part in forcefield.parts().iter().filter(|part| part.is_vdw()) {
                energy += forcefield.compute_part(part, Some(&mut gpos), None);
            }
            if let Some(correction) = &correction {
                let term = PairTerm::new(forcefield.nlist(), forcefield.scalings(), correction);
                energy += term.compute(Some(&mut gpos));
            }
            rows.push(TableRow {
                distance,
                energy,
                force: -gpos[index0].z,
            });
        }

        // Larger type name first.
        let name = format!("{type_b}---{type_a}");
        if rows.iter().all(|row| row.energy == 0.0) {
            warn!(table = %name, "All tabulated energies are zero");
        }
        if rows.iter().all(|row| row.force == 0.0) {
            warn!(table = %name, "All tabulated forces are zero");
        }
        debug!(table = %name, index0, index1, "Tabulated pair");

        tables.push(PairTable {
            name,
            type_a: type_a.to_string(),
            type_b: type_b.to_string(),
            rows,
        });
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!(ntables = tables.len(), nrows = distances.len(), "Tabulation complete");
    Ok(tables)
}

/// The first particle of `type_a` and the first other particle of `type_b` outside its
/// 1-4 band.
fn representative_pair(
    forcefield: &ForceField,
    labels: &[String],
    type_a: &str,
    type_b: &str,
) -> Result<(usize, usize), TabulationError> {
    let no_pair = || TabulationError::NoValidPair {
        type_a: type_a.to_string(),
        type_b: type_b.to_string(),
    };
    let index0 = labels.iter().position(|l| l == type_a).ok_or_else(no_pair)?;
    let index1 = (0..labels.len())
        .find(|&j| {
            labels[j] == type_b && j != index0 && forcefield.scalings().band(index0, j).is_none()
        })
        .ok_or_else(no_pair)?;
    Ok((index0, index1))
}
