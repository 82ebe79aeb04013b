use std::ops::{Add, AddAssign};

/// Non-bonded energy split into its van der Waals and electrostatic parts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerm {
    pub vdw: f64,
    pub electrostatic: f64,
}

impl EnergyTerm {
    pub fn new(vdw: f64, electrostatic: f64) -> Self {
        Self { vdw, electrostatic }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.vdw + self.electrostatic
    }
}

impl Add for EnergyTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            vdw: self.vdw + rhs.vdw,
            electrostatic: self.electrostatic + rhs.electrostatic,
        }
    }
}

impl AddAssign for EnergyTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.vdw += rhs.vdw;
        self.electrostatic += rhs.electrostatic;
    }
}
