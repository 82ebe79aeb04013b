pub mod energy;
pub mod fes;
pub mod table;

use crate::cli::SystemArgs;
use crate::error::{CliError, Result};
use pairpot::core::forcefield::params::Forcefield;
use pairpot::core::io::system_file::read_system;
use pairpot::engine::config::EngineConfigBuilder;
use pairpot::engine::error::EngineError;
use pairpot::workflows::forcefield::ForceField;
use tracing::info;

/// Reads the system and parameter files and assembles the force field.
fn assemble_forcefield(input: &SystemArgs) -> Result<ForceField> {
    info!("Loading system from {:?}", &input.system);
    let mut system = read_system(&input.system).map_err(|e| CliError::FileParsing {
        path: input.system.clone(),
        source: e.into(),
    })?;
    if let Some(reps) = input.supercell {
        system = system.supercell(reps).map_err(EngineError::from)?;
        info!("Replicated system to {} particles.", system.natom());
    }

    info!("Loading parameters from {:?}", &input.params);
    let params = Forcefield::load(&input.params).map_err(|e| CliError::FileParsing {
        path: input.params.clone(),
        source: e.into(),
    })?;

    let config = EngineConfigBuilder::new()
        .electrostatic_mode(input.ei_mode.into())
        .build()
        .map_err(EngineError::from)?;
    Ok(ForceField::generate(system, &params, &config)?)
}
