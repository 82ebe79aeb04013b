use nalgebra::{Matrix3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CellError {
    #[error("A cell can have at most three lattice vectors, got {0}")]
    TooManyVectors(usize),
    #[error("Lattice vectors are linearly dependent (Gram determinant {0:e})")]
    DegenerateCell(f64),
}

const DEGENERACY_TOLERANCE: f64 = 1e-12;

/// A simulation cell with zero to three periodic lattice vectors.
///
/// Lattice vectors are the rows of the cell matrix `A`. Reciprocal vectors are the rows of
/// the pseudo-inverse `G = (A Aᵀ)⁻¹ A`, so that `g_k · a_l = δ_kl` for every periodic
/// direction even when fewer than three vectors are present. Components along
/// non-periodic directions are never wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    rvecs: Vec<Vector3<f64>>,
    gvecs: Vec<Vector3<f64>>,
    volume: f64,
}

impl Cell {
    pub fn new(rvecs: &[Vector3<f64>]) -> Result<Self, CellError> {
        let nvec = rvecs.len();
        if nvec > 3 {
            return Err(CellError::TooManyVectors(nvec));
        }
        if nvec == 0 {
            return Ok(Self::non_periodic());
        }

        let mut a = Matrix3::zeros();
        for (k, v) in rvecs.iter().enumerate() {
            a.set_row(k, &v.transpose());
        }
        let mut gram = a * a.transpose();
        for k in nvec..3 {
            gram[(k, k)] = 1.0;
        }

        let det = gram.determinant();
        let scale: f64 = rvecs.iter().map(|v| v.norm_squared()).product();
        if det.is_nan() || det <= DEGENERACY_TOLERANCE * scale {
            return Err(CellError::DegenerateCell(det));
        }
        let inverse = gram
            .try_inverse()
            .ok_or(CellError::DegenerateCell(det))?;
        let g = inverse * a;

        let gvecs = (0..nvec).map(|k| g.row(k).transpose()).collect();

        Ok(Self {
            rvecs: rvecs.to_vec(),
            gvecs,
            volume: det.sqrt(),
        })
    }

    /// A cell without periodic directions. Displacements are never wrapped.
    pub fn non_periodic() -> Self {
        Self {
            rvecs: Vec::new(),
            gvecs: Vec::new(),
            volume: 0.0,
        }
    }

    pub fn cubic(edge: f64) -> Result<Self, CellError> {
        Self::new(&[
            Vector3::new(edge, 0.0, 0.0),
            Vector3::new(0.0, edge, 0.0),
            Vector3::new(0.0, 0.0, edge),
        ])
    }

    pub fn nvec(&self) -> usize {
        self.rvecs.len()
    }

    pub fn is_periodic(&self) -> bool {
        !self.rvecs.is_empty()
    }

    pub fn rvecs(&self) -> &[Vector3<f64>] {
        &self.rvecs
    }

    pub fn gvecs(&self) -> &[Vector3<f64>] {
        &self.gvecs
    }

    /// Length, area or volume of the periodic part, depending on `nvec`.
    /// Zero for a non-periodic cell.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Fractional coordinates along the periodic directions. Unused components are zero.
    pub fn to_fractional(&self, cart: &Vector3<f64>) -> Vector3<f64> {
        let mut frac = Vector3::zeros();
        for (k, g) in self.gvecs.iter().enumerate() {
            frac[k] = g.dot(cart);
        }
        frac
    }

    pub fn to_cartesian(&self, frac: &Vector3<f64>) -> Vector3<f64> {
        self.rvecs
            .iter()
            .enumerate()
            .fold(Vector3::zeros(), |acc, (k, r)| acc + r * frac[k])
    }

    /// Integer lattice translation that brings `delta` into the primary image, i.e. the
    /// `n` for which `delta - Σ n_k a_k` has fractional components in `[-0.5, 0.5)`.
    pub fn wrap_shift(&self, delta: &Vector3<f64>) -> [i32; 3] {
        let mut shift = [0; 3];
        for (k, g) in self.gvecs.iter().enumerate() {
            shift[k] = (g.dot(delta) + 0.5).floor() as i32;
        }
        shift
    }

    pub fn image_shift(&self, n: [i32; 3]) -> Vector3<f64> {
        self.rvecs
            .iter()
            .enumerate()
            .fold(Vector3::zeros(), |acc, (k, r)| acc + r * f64::from(n[k]))
    }

    /// Applies the minimum-image convention to `delta`.
    pub fn minimum_image(&self, delta: &Vector3<f64>) -> Vector3<f64> {
        delta - self.image_shift(self.wrap_shift(delta))
    }

    /// Number of images to visit along each periodic direction so that every vector of
    /// length at most `radius` is reached from a minimum-image displacement.
    pub fn image_ranges(&self, radius: f64) -> [i32; 3] {
        let mut ranges = [0; 3];
        for (k, g) in self.gvecs.iter().enumerate() {
            ranges[k] = (radius * g.norm() + 0.5).ceil() as i32;
        }
        ranges
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::non_periodic()
    }
}
