//! Radial pair kernels. Every kernel returns the energy together with its derivative
//! with respect to the pair distance.

use std::f64::consts::PI;

#[inline]
pub fn mix_sigma(sigma_i: f64, sigma_j: f64) -> f64 {
    0.5 * (sigma_i + sigma_j)
}

#[inline]
pub fn mix_epsilon(epsilon_i: f64, epsilon_j: f64) -> f64 {
    (epsilon_i * epsilon_j).sqrt()
}

#[inline]
pub fn lennard_jones_12_6(dist: f64, sigma: f64, epsilon: f64) -> (f64, f64) {
    let x = (sigma / dist).powi(6);
    let energy = 4.0 * epsilon * x * (x - 1.0);
    let derivative = 4.0 * epsilon * (6.0 * x - 12.0 * x * x) / dist;
    (energy, derivative)
}

/// Real-space Ewald term `q erfc(alpha d) / d`. Reduces to the bare Coulomb
/// interaction for `alpha = 0`.
#[inline]
pub fn screened_coulomb(dist: f64, qprod: f64, alpha: f64) -> (f64, f64) {
    let erfc = libm::erfc(alpha * dist);
    let energy = qprod * erfc / dist;
    let gaussian = 2.0 * alpha / PI.sqrt() * (-(alpha * dist).powi(2)).exp();
    let derivative = -qprod * (gaussian + erfc / dist) / dist;
    (energy, derivative)
}

/// Correction `-q erfc(d / gamma) / d` that turns a point-charge interaction into the
/// interaction between two Gaussian charge distributions with combined width `gamma`.
#[inline]
pub fn gaussian_correction(dist: f64, qprod: f64, gamma: f64) -> (f64, f64) {
    let (energy, derivative) = screened_coulomb(dist, qprod, 1.0 / gamma);
    (-energy, -derivative)
}

/// Cubic switching function on `[rcut - width, rcut]`, returning `(s, ds/dd)`.
#[inline]
pub fn switch3(dist: f64, rcut: f64, width: f64) -> (f64, f64) {
    if dist <= rcut - width {
        return (1.0, 0.0);
    }
    if dist >= rcut {
        return (0.0, 0.0);
    }
    let x = (rcut - dist) / width;
    let s = x * x * (3.0 - 2.0 * x);
    let ds = -6.0 * x * (1.0 - x) / width;
    (s, ds)
}
