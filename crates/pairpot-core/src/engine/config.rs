use crate::core::forcefield::pair_pot::ElectrostaticMode;
use crate::core::topology::scalings::ScalingConfig;
use crate::core::units::ANGSTROM;
use crate::engine::neighbors::MAX_REBUILD_FRACTION;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {value}")]
    InvalidValue { name: &'static str, value: f64 },
}

/// Settings for assembling and evaluating a force field. Lengths are in bohr.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub neighbor_skin: f64,
    pub rebuild_fraction: f64,
    pub electrostatic_mode: ElectrostaticMode,
    /// Replaces the scalings of the parameter file when set.
    pub scalings: Option<ScalingConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neighbor_skin: 0.0,
            rebuild_fraction: 0.5,
            electrostatic_mode: ElectrostaticMode::Full,
            scalings: None,
        }
    }
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    neighbor_skin: Option<f64>,
    rebuild_fraction: Option<f64>,
    electrostatic_mode: Option<ElectrostaticMode>,
    scalings: Option<ScalingConfig>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn neighbor_skin(mut self, skin: f64) -> Self {
        self.neighbor_skin = Some(skin);
        self
    }
    pub fn rebuild_fraction(mut self, fraction: f64) -> Self {
        self.rebuild_fraction = Some(fraction);
        self
    }
    pub fn electrostatic_mode(mut self, mode: ElectrostaticMode) -> Self {
        self.electrostatic_mode = Some(mode);
        self
    }
    pub fn scalings(mut self, scalings: ScalingConfig) -> Self {
        self.scalings = Some(scalings);
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let defaults = EngineConfig::default();
        let neighbor_skin = self.neighbor_skin.unwrap_or(defaults.neighbor_skin);
        if !(neighbor_skin >= 0.0 && neighbor_skin.is_finite()) {
            return Err(ConfigError::InvalidValue {
                name: "neighbor_skin",
                value: neighbor_skin,
            });
        }
        let rebuild_fraction = self.rebuild_fraction.unwrap_or(defaults.rebuild_fraction);
        if !(rebuild_fraction > 0.0 && rebuild_fraction <= MAX_REBUILD_FRACTION) {
            return Err(ConfigError::InvalidValue {
                name: "rebuild_fraction",
                value: rebuild_fraction,
            });
        }
        Ok(EngineConfig {
            neighbor_skin,
            rebuild_fraction,
            electrostatic_mode: self
                .electrostatic_mode
                .unwrap_or(defaults.electrostatic_mode),
            scalings: self.scalings,
        })
    }
}

/// Distance grid for tabulating pair potentials. Lengths are in bohr.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    rmin: f64,
    rmax: f64,
    nrows: usize,
}

impl TableConfig {
    pub fn rmin(&self) -> f64 {
        self.rmin
    }

    pub fn rmax(&self) -> f64 {
        self.rmax
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// The sampled distances: `nrows` points evenly spaced from `rmin` to `rmax`.
    pub fn distances(&self) -> Vec<f64> {
        let step = (self.rmax - self.rmin) / (self.nrows - 1) as f64;
        (0..self.nrows)
            .map(|k| self.rmin + step * k as f64)
            .collect()
    }
}

#[derive(Default)]
pub struct TableConfigBuilder {
    rmin: Option<f64>,
    rmax: Option<f64>,
    nrows: Option<usize>,
}

impl TableConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rmin(mut self, rmin: f64) -> Self {
        self.rmin = Some(rmin);
        self
    }
    pub fn rmax(mut self, rmax: f64) -> Self {
        self.rmax = Some(rmax);
        self
    }
    pub fn nrows(mut self, nrows: usize) -> Self {
        self.nrows = Some(nrows);
        self
    }

    pub fn build(self) -> Result<TableConfig, ConfigError> {
        let rmin = self.rmin.unwrap_or(0.5 * ANGSTROM);
        let rmax = self.rmax.ok_or(ConfigError::MissingParameter("rmax"))?;
        let nrows = self.nrows.unwrap_or(2500);
        if !(rmin > 0.0 && rmin.is_finite()) {
            return Err(ConfigError::InvalidValue {
                name: "rmin",
                value: rmin,
            });
        }
        if !(rmax > rmin && rmax.is_finite()) {
            return Err(ConfigError::InvalidValue {
                name: "rmax",
                value: rmax,
            });
        }
        if nrows < 2 {
            return Err(ConfigError::InvalidValue {
                name: "nrows",
                value: nrows as f64,
            });
        }
        Ok(TableConfig { rmin, rmax, nrows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_builder_uses_defaults() {
        let config = EngineConfigBuilder::new().build().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn engine_builder_sets_all_fields() {
        let config = EngineConfigBuilder::new()
            .neighbor_skin(1.0)
            .rebuild_fraction(0.25)
            .electrostatic_mode(ElectrostaticMode::PointOnly)
            .scalings(ScalingConfig::new(0.0, 0.5, 1.0))
            .build()
            .unwrap();
        assert_eq!(config.neighbor_skin, 1.0);
        assert_eq!(config.rebuild_fraction, 0.25);
        assert_eq!(config.electrostatic_mode, ElectrostaticMode::PointOnly);
        assert_eq!(config.scalings, Some(ScalingConfig::new(0.0, 0.5, 1.0)));
    }

    #[test]
    fn engine_builder_rejects_invalid_values() {
        assert_eq!(
            EngineConfigBuilder::new().neighbor_skin(-1.0).build(),
            Err(ConfigError::InvalidValue {
                name: "neighbor_skin",
                value: -1.0
            })
        );
        assert!(EngineConfigBuilder::new()
            .rebuild_fraction(0.0)
            .build()
            .is_err());
        assert_eq!(
            EngineConfigBuilder::new().rebuild_fraction(0.75).build(),
            Err(ConfigError::InvalidValue {
                name: "rebuild_fraction",
                value: 0.75
            })
        );
    }

    #[test]
    fn table_builder_requires_rmax() {
        assert_eq!(
            TableConfigBuilder::new().build(),
            Err(ConfigError::MissingParameter("rmax"))
        );
    }

    #[test]
    fn table_builder_applies_defaults() {
        let config = TableConfigBuilder::new().rmax(20.0).build().unwrap();
        assert_eq!(config.nrows(), 2500);
        assert_eq!(config.rmax(), 20.0);
        assert!((config.rmin() - 0.5 * ANGSTROM).abs() < 1e-12);
    }

    #[test]
    fn table_builder_rejects_inverted_range_and_tiny_grid() {
        assert!(TableConfigBuilder::new().rmin(5.0).rmax(4.0).build().is_err());
        assert!(TableConfigBuilder::new().rmax(4.0).nrows(1).build().is_err());
        assert_eq!(
            TableConfigBuilder::new().rmax(4.0).nrows(0).build(),
            Err(ConfigError::InvalidValue {
                name: "nrows",
                value: 0.0
            })
        );
    }

    #[test]
    fn distances_span_the_range_inclusively() {
        let config = TableConfigBuilder::new()
            .rmin(1.0)
            .rmax(3.0)
            .nrows(5)
            .build()
            .unwrap();
        assert_eq!(config.distances(), vec![1.0, 1.5, 2.0, 2.5, 3.0]);
    }
}
