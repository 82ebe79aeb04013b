use thiserror::Error;

use super::config::ConfigError;
use super::neighbors::NeighborError;
use crate::analysis::hills::HillsError;
use crate::core::forcefield::pair_pot::PotentialError;
use crate::core::forcefield::parameterization::ParameterizationError;
use crate::core::forcefield::params::ParamLoadError;
use crate::core::geometry::cell::CellError;
use crate::core::io::system_file::SystemFileError;
use crate::core::models::system::SystemError;
use crate::core::topology::scalings::ScalingError;
use crate::workflows::tabulate::TabulationError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid system: {0}")]
    System(#[from] SystemError),

    #[error("Failed to read system: {0}")]
    SystemFile(#[from] SystemFileError),

    #[error("Invalid cell: {0}")]
    Cell(#[from] CellError),

    #[error("Invalid exclusion scalings: {0}")]
    Scaling(#[from] ScalingError),

    #[error("Neighbor list error: {0}")]
    Neighbor(#[from] NeighborError),

    #[error("Invalid pair potential: {0}")]
    Potential(#[from] PotentialError),

    #[error("Parameter assignment failed: {0}")]
    Parameterization(#[from] ParameterizationError),

    #[error("Failed to load force field parameters: {0}")]
    ParamLoad(#[from] ParamLoadError),

    #[error("Tabulation failed: {0}")]
    Tabulation(#[from] TabulationError),

    #[error("Hills summation failed: {0}")]
    Hills(#[from] HillsError),
}
