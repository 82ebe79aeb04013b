use crate::core::geometry::cell::{Cell, CellError};
use crate::core::models::atom::Particle;
use crate::core::models::elements::atomic_number;
use crate::core::models::system::{System, SystemError};
use crate::core::units::ANGSTROM;
use nalgebra::Vector3;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Atom {index} needs either 'number' or 'element'")]
    MissingElement { index: usize },
    #[error("Atom {index} has unknown element symbol '{symbol}'")]
    UnknownElement { index: usize, symbol: String },
    #[error("Invalid cell: {0}")]
    Cell(#[from] CellError),
    #[error("Invalid system: {0}")]
    System(#[from] SystemError),
}

#[derive(Debug, Deserialize)]
struct AtomRecord {
    number: Option<u8>,
    element: Option<String>,
    ffatype: String,
    position: [f64; 3],
    charge: Option<f64>,
    radius: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SystemRecord {
    #[serde(default)]
    cell: Vec<[f64; 3]>,
    atoms: Vec<AtomRecord>,
    #[serde(default)]
    bonds: Vec<[usize; 2]>,
}

/// Reads a system from a TOML file. Positions, cell vectors and radii are given in
/// angstrom.
///
/// ```toml
/// cell = [[9.865, 0.0, 0.0], [0.0, 9.865, 0.0], [0.0, 0.0, 9.865]]
/// bonds = [[0, 1], [0, 2]]
///
/// [[atoms]]
/// element = "O"
/// ffatype = "OW"
/// position = [-4.583, 5.333, 1.560]
/// charge = -0.834
/// ```
pub fn read_system(path: &Path) -> Result<System, SystemFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| SystemFileError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let record: SystemRecord = toml::from_str(&content).map_err(|e| SystemFileError::Toml {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    build_system(record)
}

pub fn parse_system(content: &str) -> Result<System, SystemFileError> {
    let record: SystemRecord = toml::from_str(content).map_err(|e| SystemFileError::Toml {
        path: "<string>".to_string(),
        source: e,
    })?;
    build_system(record)
}

fn build_system(record: SystemRecord) -> Result<System, SystemFileError> {
    let mut particles = Vec::with_capacity(record.atoms.len());
    let mut positions = Vec::with_capacity(record.atoms.len());

    for (index, atom) in record.atoms.into_iter().enumerate() {
        let number = match (atom.number, &atom.element) {
            (Some(number), _) => number,
            (None, Some(symbol)) => {
                atomic_number(symbol).ok_or_else(|| SystemFileError::UnknownElement {
                    index,
                    symbol: symbol.clone(),
                })?
            }
            (None, None) => return Err(SystemFileError::MissingElement { index }),
        };
        particles.push(Particle {
            number,
            ffatype: atom.ffatype,
            charge: atom.charge,
            radius: atom.radius.map(|r| r * ANGSTROM),
        });
        positions.push(Vector3::from(atom.position) * ANGSTROM);
    }

    let rvecs: Vec<Vector3<f64>> = record
        .cell
        .iter()
        .map(|v| Vector3::from(*v) * ANGSTROM)
        .collect();
    let cell = Cell::new(&rvecs)?;
    let bonds: Vec<(usize, usize)> = record.bonds.iter().map(|b| (b[0], b[1])).collect();

    Ok(System::new(particles, positions, &bonds, cell)?)
}
