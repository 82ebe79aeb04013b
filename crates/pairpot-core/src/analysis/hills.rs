use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error)]
pub enum HillsError {
    #[error("The grid must contain at least one point")]
    EmptyGrid,
    #[error("Expected {expected} collective variables, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("Hill width must be positive, got {0}")]
    NonPositiveWidth(f64),
    #[error("Period must be positive, got {0}")]
    NonPositivePeriod(f64),
    #[error("Column '{column}' is missing from '{path}'")]
    MissingColumn { path: String, column: String },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// A Gaussian bias deposited during metadynamics.
#[derive(Debug, Clone, PartialEq)]
pub struct Hill {
    pub center: Vec<f64>,
    pub width: Vec<f64>,
    pub height: f64,
}

/// Free-energy surface estimate on a fixed grid from a sum of Gaussian hills.
///
/// At a grid point `g` the estimate is `F(g) = -Σ_h K_h exp(-Σ_k (g_k - q0_hk)² / (2 σ_hk²))`.
/// Periodic collective variables use the minimum-image difference `g_k - q0_hk`.
#[derive(Debug, Clone)]
pub struct SumHills {
    grid: Vec<Vec<f64>>,
    periodicities: Vec<Option<f64>>,
    hills: Vec<Hill>,
}

impl SumHills {
    pub fn new(grid: Vec<Vec<f64>>) -> Result<Self, HillsError> {
        let ncv = grid.first().map(Vec::len).ok_or(HillsError::EmptyGrid)?;
        if let Some(point) = grid.iter().find(|point| point.len() != ncv) {
            return Err(HillsError::DimensionMismatch {
                expected: ncv,
                found: point.len(),
            });
        }
        Ok(Self {
            grid,
            periodicities: vec![None; ncv],
            hills: Vec::new(),
        })
    }

    /// Sets the period of each collective variable; `None` marks a non-periodic one.
    pub fn with_periodicities(
        mut self,
        periodicities: Vec<Option<f64>>,
    ) -> Result<Self, HillsError> {
        check_dimension(self.ncv(), periodicities.len())?;
        if let Some(period) = periodicities
            .iter()
            .flatten()
            .find(|p| p.is_nan() || **p <= 0.0)
        {
            return Err(HillsError::NonPositivePeriod(*period));
        }
        self.periodicities = periodicities;
        Ok(self)
    }

    pub fn ncv(&self) -> usize {
        self.periodicities.len()
    }

    pub fn grid(&self) -> &[Vec<f64>] {
        &self.grid
    }

    pub fn hills(&self) -> &[Hill] {
        &self.hills
    }

    pub fn add_hill(
        &mut self,
        center: Vec<f64>,
        width: Vec<f64>,
        height: f64,
    ) -> Result<(), HillsError> {
        check_dimension(self.ncv(), center.len())?;
        check_dimension(self.ncv(), width.len())?;
        if let Some(&w) = width.iter().find(|w| w.is_nan() || **w <= 0.0) {
            return Err(HillsError::NonPositiveWidth(w));
        }
        self.hills.push(Hill {
            center,
            width,
            height,
        });
        Ok(())
    }

    /// Appends the hills stored in a CSV file with columns `height`, `q0_<k>` and
    /// `sigma_<k>` for every collective variable `k`. Returns the number of hills read.
    pub fn load_csv(&mut self, path: &Path) -> Result<usize, HillsError> {
        let path_str = path.to_string_lossy().to_string();
        let mut reader = csv::Reader::from_path(path).map_err(|e| HillsError::Csv {
            path: path_str.clone(),
            source: e,
        })?;

        let column = |record: &HashMap<String, f64>, name: String| {
            record
                .get(&name)
                .copied()
                .ok_or_else(|| HillsError::MissingColumn {
                    path: path_str.clone(),
                    column: name,
                })
        };

        let mut count = 0;
        for result in reader.deserialize::<HashMap<String, f64>>() {
            let record = result.map_err(|e| HillsError::Csv {
                path: path_str.clone(),
                source: e,
            })?;
            let height = column(&record, "height".to_string())?;
            let center = (0..self.ncv())
                .map(|k| column(&record, format!("q0_{k}")))
                .collect::<Result<Vec<_>, _>>()?;
            let width = (0..self.ncv())
                .map(|k| column(&record, format!("sigma_{k}")))
                .collect::<Result<Vec<_>, _>>()?;
            self.add_hill(center, width, height)?;
            count += 1;
        }
        debug!(path = %path_str, count, "Loaded hills");
        Ok(count)
    }

    /// Evaluates the free-energy estimate at every grid point, in grid order.
    #[instrument(skip_all, name = "sum_hills")]
    pub fn compute_fes(&self) -> Vec<f64> {
        info!(
            npoints = self.grid.len(),
            nhills = self.hills.len(),
            "Summing hills"
        );

        #[cfg(not(feature = "parallel"))]
        let iterator = self.grid.iter();

        #[cfg(feature = "parallel")]
        let iterator = self.grid.par_iter();

        iterator.map(|point| self.evaluate(point)).collect()
    }

    fn evaluate(&self, point: &[f64]) -> f64 {
        -self
            .hills
            .iter()
            .map(|hill| {
                let exponent: f64 = point
                    .iter()
                    .zip(&hill.center)
                    .zip(&hill.width)
                    .zip(&self.periodicities)
                    .map(|(((g, q0), sigma), period)| {
                        let mut delta = g - q0;
                        if let Some(p) = period {
                            delta -= p * (delta / p).round();
                        }
                        delta * delta / (2.0 * sigma * sigma)
                    })
                    .sum();
                hill.height * (-exponent).exp()
            })
            .sum::<f64>()
    }
}

fn check_dimension(expected: usize, found: usize) -> Result<(), HillsError> {
    if expected != found {
        return Err(HillsError::DimensionMismatch { expected, found });
    }
    Ok(())
}

/// Reads grid points from a CSV file with a header row and one column per collective
/// variable.
pub fn load_grid_csv(path: &Path) -> Result<Vec<Vec<f64>>, HillsError> {
    let path_str = path.to_string_lossy().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|e| HillsError::Csv {
        path: path_str.clone(),
        source: e,
    })?;
    reader
        .deserialize::<Vec<f64>>()
        .map(|result| {
            result.map_err(|e| HillsError::Csv {
                path: path_str.clone(),
                source: e,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use std::fs;
    use tempfile::tempdir;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn square_grid() -> Vec<Vec<f64>> {
        let mut grid = Vec::new();
        for a in [-3.0, -0.5, 2.0] {
            for b in [2.0, 2.5, 3.0] {
                grid.push(vec![a, b]);
            }
        }
        grid
    }

    #[test]
    fn fes_matches_explicit_sum_over_hills() {
        let mut hills = SumHills::new(square_grid()).unwrap();
        hills.add_hill(vec![-1.0, 2.2], vec![0.5, 0.3], 1.5).unwrap();
        hills.add_hill(vec![1.0, 2.9], vec![0.4, 0.6], 0.7).unwrap();

        let fes = hills.compute_fes();
        assert_eq!(fes.len(), 9);
        for (point, f) in square_grid().iter().zip(&fes) {
            let mut expected = 0.0;
            for hill in hills.hills() {
                let exponent: f64 = (0..2)
                    .map(|k| (point[k] - hill.center[k]).powi(2) / 2.0 / hill.width[k].powi(2))
                    .sum();
                expected -= hill.height * (-exponent).exp();
            }
            assert!(f64_approx_equal(*f, expected));
        }
    }

    #[test]
    fn fes_without_hills_is_zero() {
        let hills = SumHills::new(square_grid()).unwrap();
        assert!(hills.compute_fes().iter().all(|&f| f == 0.0));
    }

    #[test]
    fn periodic_variables_use_minimum_image_difference() {
        let grid = vec![vec![3.0], vec![-3.0]];
        let mut hills = SumHills::new(grid)
            .unwrap()
            .with_periodicities(vec![Some(2.0 * PI)])
            .unwrap();
        hills.add_hill(vec![-3.0], vec![0.5], 1.0).unwrap();

        let fes = hills.compute_fes();
        let delta = 6.0 - 2.0 * PI;
        let expected = -(-delta * delta / (2.0 * 0.25)).exp();
        assert!(f64_approx_equal(fes[0], expected));
        assert!(f64_approx_equal(fes[1], -1.0));
    }

    #[test]
    fn new_rejects_empty_and_ragged_grids() {
        assert!(matches!(SumHills::new(vec![]), Err(HillsError::EmptyGrid)));
        assert!(matches!(
            SumHills::new(vec![vec![0.0, 1.0], vec![0.0]]),
            Err(HillsError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn add_hill_validates_dimension_and_width() {
        let mut hills = SumHills::new(square_grid()).unwrap();
        assert!(matches!(
            hills.add_hill(vec![0.0], vec![1.0, 1.0], 1.0),
            Err(HillsError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            hills.add_hill(vec![0.0, 0.0], vec![1.0, 0.0], 1.0),
            Err(HillsError::NonPositiveWidth(_))
        ));
        assert!(hills.hills().is_empty());
    }

    #[test]
    fn with_periodicities_rejects_wrong_length_and_non_positive_period() {
        let hills = SumHills::new(square_grid()).unwrap();
        assert!(matches!(
            hills.clone().with_periodicities(vec![None]),
            Err(HillsError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            hills.with_periodicities(vec![None, Some(-1.0)]),
            Err(HillsError::NonPositivePeriod(_))
        ));
    }

    #[test]
    fn load_csv_reads_hills_in_any_column_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hills.csv");
        fs::write(
            &path,
            "q0_0,q0_1,sigma_0,sigma_1,height\n-1.0,2.2,0.5,0.3,1.5\n1.0,2.9,0.4,0.6,0.7\n",
        )
        .unwrap();

        let mut hills = SumHills::new(square_grid()).unwrap();
        assert_eq!(hills.load_csv(&path).unwrap(), 2);
        assert_eq!(
            hills.hills()[1],
            Hill {
                center: vec![1.0, 2.9],
                width: vec![0.4, 0.6],
                height: 0.7
            }
        );
    }

    #[test]
    fn load_csv_fails_for_missing_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hills.csv");
        fs::write(&path, "q0_0,sigma_0,height\n0.0,0.5,1.0\n").unwrap();

        let mut hills = SumHills::new(square_grid()).unwrap();
        let err = hills.load_csv(&path).unwrap_err();
        assert!(matches!(err, HillsError::MissingColumn { ref column, .. } if column == "q0_1"));
    }

    #[test]
    fn load_csv_fails_for_nonexistent_file() {
        let mut hills = SumHills::new(square_grid()).unwrap();
        let result = hills.load_csv(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(HillsError::Csv { .. })));
    }

    #[test]
    fn load_grid_csv_reads_one_point_per_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.csv");
        fs::write(&path, "phi,psi\n-3.0,2.0\n-3.0,2.5\n").unwrap();
        assert_eq!(
            load_grid_csv(&path).unwrap(),
            vec![vec![-3.0, 2.0], vec![-3.0, 2.5]]
        );
    }
}
