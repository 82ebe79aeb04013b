/// A single particle as seen by the non-bonded engine.
///
/// Positions are kept on the owning [`System`](super::system::System) so that a
/// position update never has to touch the per-particle metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Atomic number (1 for hydrogen, 8 for oxygen, ...).
    pub number: u8,
    /// The force field atom type label used for parameter lookup (e.g. "OW", "HW").
    pub ffatype: String,
    /// Partial charge in elementary charge units. Overrides the type table when set.
    pub charge: Option<f64>,
    /// Gaussian smearing radius in bohr. Overrides the type table when set.
    pub radius: Option<f64>,
}

impl Particle {
    pub fn new(number: u8, ffatype: impl Into<String>) -> Self {
        Self {
            number,
            ffatype: ffatype.into(),
            charge: None,
            radius: None,
        }
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = Some(charge);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
}
