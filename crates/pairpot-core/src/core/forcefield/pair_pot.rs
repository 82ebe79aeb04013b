use super::potentials::{
    gaussian_correction, lennard_jones_12_6, mix_epsilon, mix_sigma, screened_coulomb, switch3,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PotentialError {
    #[error("Cutoff must be positive and finite, got {0}")]
    InvalidCutoff(f64),
    #[error("Per-atom array '{name}' has length {found}, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Ewald screening parameter must be non-negative, got {0}")]
    NegativeAlpha(f64),
    #[error("Dielectric constant must be positive, got {0}")]
    InvalidDielectric(f64),
    #[error("Switching width must lie in (0, {rcut}], got {width}")]
    InvalidSwitchWidth { width: f64, rcut: f64 },
    #[error("Gaussian radius of atom {index} is negative ({radius})")]
    NegativeRadius { index: usize, radius: f64 },
    #[error("The smearing correction mode requires Gaussian radii")]
    MissingRadii,
}

/// 12-6 Lennard-Jones with arithmetic mixing of sigma and geometric mixing of epsilon.
#[derive(Debug, Clone, PartialEq)]
pub struct LennardJones {
    sigmas: Vec<f64>,
    epsilons: Vec<f64>,
}

impl LennardJones {
    pub fn new(sigmas: Vec<f64>, epsilons: Vec<f64>) -> Result<Self, PotentialError> {
        if sigmas.len() != epsilons.len() {
            return Err(PotentialError::LengthMismatch {
                name: "epsilons",
                expected: sigmas.len(),
                found: epsilons.len(),
            });
        }
        Ok(Self { sigmas, epsilons })
    }

    pub fn sigmas(&self) -> &[f64] {
        &self.sigmas
    }

    pub fn epsilons(&self) -> &[f64] {
        &self.epsilons
    }

    #[inline]
    fn evaluate(&self, i: usize, j: usize, dist: f64) -> (f64, f64) {
        let sigma = mix_sigma(self.sigmas[i], self.sigmas[j]);
        let epsilon = mix_epsilon(self.epsilons[i], self.epsilons[j]);
        lennard_jones_12_6(dist, sigma, epsilon)
    }
}

/// Which parts of the electrostatic interaction a kernel evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElectrostaticMode {
    /// Screened point-charge term plus the Gaussian smearing correction.
    #[default]
    Full,
    /// Screened point-charge term only; radii are ignored.
    PointOnly,
    /// Only the Gaussian smearing correction.
    SmearingCorrection,
}

/// Real-space electrostatics between (optionally Gaussian-smeared) charges.
#[derive(Debug, Clone, PartialEq)]
pub struct Electrostatic {
    charges: Vec<f64>,
    alpha: f64,
    radii: Option<Vec<f64>>,
    dielectric: f64,
    mode: ElectrostaticMode,
}

impl Electrostatic {
    pub fn new(charges: Vec<f64>, alpha: f64) -> Result<Self, PotentialError> {
        if alpha.is_nan() || alpha < 0.0 {
            return Err(PotentialError::NegativeAlpha(alpha));
        }
        Ok(Self {
            charges,
            alpha,
            radii: None,
            dielectric: 1.0,
            mode: ElectrostaticMode::Full,
        })
    }

    pub fn with_radii(mut self, radii: Vec<f64>) -> Result<Self, PotentialError> {
        if radii.len() != self.charges.len() {
            return Err(PotentialError::LengthMismatch {
                name: "radii",
                expected: self.charges.len(),
                found: radii.len(),
            });
        }
        if let Some((index, &radius)) = radii
            .iter()
            .enumerate()
            .find(|(_, r)| r.is_nan() || **r < 0.0)
        {
            return Err(PotentialError::NegativeRadius { index, radius });
        }
        self.radii = Some(radii);
        Ok(self)
    }

    pub fn with_dielectric(mut self, dielectric: f64) -> Result<Self, PotentialError> {
        if dielectric.is_nan() || dielectric <= 0.0 {
            return Err(PotentialError::InvalidDielectric(dielectric));
        }
        self.dielectric = dielectric;
        Ok(self)
    }

    pub fn with_mode(mut self, mode: ElectrostaticMode) -> Self {
        self.mode = mode;
        self
    }

    /// The same charge distributions without Ewald screening (`alpha = 0`).
    pub fn without_screening(&self) -> Self {
        Self {
            alpha: 0.0,
            ..self.clone()
        }
    }

    /// Whether any particle carries a Gaussian charge distribution of non-zero width.
    pub fn has_smeared_charges(&self) -> bool {
        self.radii
            .as_ref()
            .is_some_and(|radii| radii.iter().any(|&r| r != 0.0))
    }

    pub fn charges(&self) -> &[f64] {
        &self.charges
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn radii(&self) -> Option<&[f64]> {
        self.radii.as_deref()
    }

    pub fn dielectric(&self) -> f64 {
        self.dielectric
    }

    pub fn mode(&self) -> ElectrostaticMode {
        self.mode
    }

    fn validate(&self) -> Result<(), PotentialError> {
        if self.mode == ElectrostaticMode::SmearingCorrection && self.radii.is_none() {
            return Err(PotentialError::MissingRadii);
        }
        Ok(())
    }

    #[inline]
    fn evaluate(&self, i: usize, j: usize, dist: f64) -> (f64, f64) {
        let qprod = self.charges[i] * self.charges[j] / self.dielectric;
        let mut energy = 0.0;
        let mut derivative = 0.0;

        if self.mode != ElectrostaticMode::SmearingCorrection {
            let (e, de) = screened_coulomb(dist, qprod, self.alpha);
            energy += e;
            derivative += de;
        }
        if self.mode != ElectrostaticMode::PointOnly {
            if let Some(radii) = &self.radii {
                let gamma = (radii[i] * radii[i] + radii[j] * radii[j]).sqrt();
                if gamma > 0.0 {
                    let (e, de) = gaussian_correction(dist, qprod, gamma);
                    energy += e;
                    derivative += de;
                }
            }
        }
        (energy, derivative)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PairKernel {
    LennardJones(LennardJones),
    Electrostatic(Electrostatic),
}

impl PairKernel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LennardJones(_) => "lj",
            Self::Electrostatic(_) => "ei",
        }
    }

    /// Number of particles the per-atom parameter arrays cover.
    pub fn natom(&self) -> usize {
        match self {
            Self::LennardJones(lj) => lj.sigmas.len(),
            Self::Electrostatic(ei) => ei.charges.len(),
        }
    }

    #[inline]
    fn evaluate(&self, i: usize, j: usize, dist: f64) -> (f64, f64) {
        match self {
            Self::LennardJones(lj) => lj.evaluate(i, j, dist),
            Self::Electrostatic(ei) => ei.evaluate(i, j, dist),
        }
    }
}

/// How a kernel is brought to zero at the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Truncation {
    /// Plain truncation: the kernel is evaluated unmodified up to and including `rcut`.
    #[default]
    Hard,
    /// Multiplication with a cubic switching function on `[rcut - width, rcut]`.
    Switch3 { width: f64 },
}

/// A pair kernel together with its cutoff radius and truncation scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct PairPotential {
    kernel: PairKernel,
    rcut: f64,
    truncation: Truncation,
}

impl PairPotential {
    pub fn new(kernel: PairKernel, rcut: f64) -> Result<Self, PotentialError> {
        if !(rcut > 0.0 && rcut.is_finite()) {
            return Err(PotentialError::InvalidCutoff(rcut));
        }
        if let PairKernel::Electrostatic(ei) = &kernel {
            ei.validate()?;
        }
        Ok(Self {
            kernel,
            rcut,
            truncation: Truncation::Hard,
        })
    }

    pub fn with_truncation(mut self, truncation: Truncation) -> Result<Self, PotentialError> {
        if let Truncation::Switch3 { width } = truncation {
            if !(width > 0.0 && width <= self.rcut) {
                return Err(PotentialError::InvalidSwitchWidth {
                    width,
                    rcut: self.rcut,
                });
            }
        }
        self.truncation = truncation;
        Ok(self)
    }

    pub fn kernel(&self) -> &PairKernel {
        &self.kernel
    }

    pub fn rcut(&self) -> f64 {
        self.rcut
    }

    pub fn truncation(&self) -> Truncation {
        self.truncation
    }

    pub fn name(&self) -> &'static str {
        self.kernel.name()
    }

    pub fn energy(&self, i: usize, j: usize, dist: f64) -> f64 {
        self.energy_and_derivative(i, j, dist).0
    }

    /// Energy of the pair `(i, j)` at distance `dist` and its derivative with respect to
    /// `dist`. Both are zero beyond the cutoff.
    #[inline]
    pub fn energy_and_derivative(&self, i: usize, j: usize, dist: f64) -> (f64, f64) {
        debug_assert!(dist.is_finite() && dist > 0.0, "invalid pair distance {dist}");
        if dist > self.rcut {
            return (0.0, 0.0);
        }
        let (energy, derivative) = self.kernel.evaluate(i, j, dist);
        match self.truncation {
            Truncation::Hard => (energy, derivative),
            Truncation::Switch3 { width } => {
                let (s, ds) = switch3(dist, self.rcut, width);
                (energy * s, derivative * s + energy * ds)
            }
        }
    }
}
