use crate::core::topology::scalings::ScalingConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct LennardJonesParam {
    /// Distance at which the interaction vanishes, in angstrom.
    pub sigma: f64,
    /// Well depth in kcal/mol.
    pub epsilon: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LennardJonesParams {
    /// Cutoff radius in angstrom.
    pub cutoff: f64,
    /// Width of the switching region below the cutoff, in angstrom.
    #[serde(default)]
    pub switch_width: Option<f64>,
    #[serde(default)]
    pub types: HashMap<String, LennardJonesParam>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ChargeParam {
    /// Partial charge in elementary charge units.
    pub charge: f64,
    /// Gaussian smearing radius in angstrom. Zero means a point charge.
    #[serde(default)]
    pub radius: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ElectrostaticParams {
    /// Cutoff radius in angstrom.
    pub cutoff: f64,
    /// Ewald screening parameter in 1/angstrom. Zero disables screening.
    #[serde(default)]
    pub alpha: f64,
    #[serde(default = "default_dielectric")]
    pub dielectric: f64,
    #[serde(default)]
    pub switch_width: Option<f64>,
    #[serde(default)]
    pub types: HashMap<String, ChargeParam>,
}

fn default_dielectric() -> f64 {
    1.0
}

/// Non-bonded force field parameters as read from a TOML file.
///
/// Lengths are in angstrom and energies in kcal/mol; conversion to atomic units happens
/// when the parameters are assigned to a system.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Forcefield {
    #[serde(default)]
    pub scalings: ScalingConfig,
    #[serde(default)]
    pub lennard_jones: Option<LennardJonesParams>,
    #[serde(default)]
    pub electrostatics: Option<ElectrostaticParams>,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
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
}

impl Forcefield {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ParamLoadError> {
        toml::from_str(content).map_err(|e| ParamLoadError::Toml {
            path: "<string>".to_string(),
            source: e,
        })
    }

    /// Largest cutoff of all configured parts, in angstrom.
    pub fn max_cutoff(&self) -> Option<f64> {
        let lj = self.lennard_jones.as_ref().map(|p| p.cutoff);
        let ei = self.electrostatics.as_ref().map(|p| p.cutoff);
        match (lj, ei) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const WATER_TOML: &str = r#"
        [scalings]
        scale_12 = 0.0
        scale_13 = 0.5
        scale_14 = 1.0

        [lennard_jones]
        cutoff = 9.0
        switch_width = 1.5

        [lennard_jones.types.OW]
        sigma = 3.15
        epsilon = 0.1521

        [lennard_jones.types.HW]
        sigma = 0.4
        epsilon = 0.046

        [electrostatics]
        cutoff = 9.0
        alpha = 0.3

        [electrostatics.types.OW]
        charge = -0.834
        radius = 0.6

        [electrostatics.types.HW]
        charge = 0.417
    "#;

    #[test]
    fn from_toml_str_reads_all_sections() {
        let ff = Forcefield::from_toml_str(WATER_TOML).unwrap();
        assert_eq!(ff.scalings, ScalingConfig::new(0.0, 0.5, 1.0));

        let lj = ff.lennard_jones.as_ref().unwrap();
        assert_eq!(lj.cutoff, 9.0);
        assert_eq!(lj.switch_width, Some(1.5));
        assert_eq!(lj.types["OW"].sigma, 3.15);

        let ei = ff.electrostatics.as_ref().unwrap();
        assert_eq!(ei.alpha, 0.3);
        assert_eq!(ei.dielectric, 1.0);
        assert_eq!(ei.switch_width, None);
        assert_eq!(ei.types["OW"].radius, 0.6);
        assert_eq!(ei.types["HW"].radius, 0.0);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let ff = Forcefield::from_toml_str("").unwrap();
        assert_eq!(ff.scalings, ScalingConfig::default());
        assert!(ff.lennard_jones.is_none());
        assert!(ff.electrostatics.is_none());
        assert_eq!(ff.max_cutoff(), None);
    }

    #[test]
    fn max_cutoff_takes_largest_part() {
        let ff = Forcefield::from_toml_str(
            "[lennard_jones]\ncutoff = 12.0\n[electrostatics]\ncutoff = 9.0\n",
        )
        .unwrap();
        assert_eq!(ff.max_cutoff(), Some(12.0));
    }

    #[test]
    fn load_succeeds_with_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("water.toml");
        let mut file = File::create(&file_path).unwrap();
        write!(file, "{WATER_TOML}").unwrap();

        let ff = Forcefield::load(&file_path).unwrap();
        assert_eq!(ff.lennard_jones.unwrap().types.len(), 2);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = Forcefield::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ParamLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.toml");
        std::fs::write(&file_path, "[lennard_jones\ncutoff = ").unwrap();
        let result = Forcefield::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }

    #[test]
    fn lennard_jones_section_requires_cutoff() {
        let result = Forcefield::from_toml_str("[lennard_jones.types.C]\nsigma = 3.4\nepsilon = 0.1\n");
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }
}
