use crate::core::geometry::cell::Cell;
use nalgebra::Vector3;
use thiserror::Error;
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Largest rebuild fraction for which refreshed contacts still cover every pair within
/// the cutoff.
pub const MAX_REBUILD_FRACTION: f64 = 0.5;

#[derive(Debug, Error, PartialEq)]
pub enum NeighborError {
    #[error("Neighbor cutoff must be positive and finite, got {0}")]
    InvalidCutoff(f64),
    #[error("Neighbor skin must be non-negative and finite, got {0}")]
    InvalidSkin(f64),
    #[error("Rebuild fraction must lie in (0, 0.5], got {0}")]
    InvalidRebuildFraction(f64),
    #[error("Injected contact distance must be positive and finite, got {0}")]
    InvalidDistance(f64),
    #[error("Particle index {index} is out of range for {natom} particles")]
    IndexOutOfRange { index: usize, natom: usize },
    #[error("Cannot restrict the list to {requested} contacts, only {available} are available")]
    NneighOutOfRange { requested: usize, available: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborConfig {
    pub cutoff: f64,
    /// Extra margin added to the cutoff so that a built list stays valid while particles
    /// move by less than `rebuild_fraction * skin`.
    pub skin: f64,
    /// At most 0.5: two particles each moving up to `rebuild_fraction * skin` towards each
    /// other must not close a gap wider than the skin.
    pub rebuild_fraction: f64,
}

impl NeighborConfig {
    pub fn new(cutoff: f64) -> Self {
        Self {
            cutoff,
            skin: 0.0,
            rebuild_fraction: 0.5,
        }
    }

    pub fn with_skin(mut self, skin: f64) -> Self {
        self.skin = skin;
        self
    }

    pub fn with_rebuild_fraction(mut self, fraction: f64) -> Self {
        self.rebuild_fraction = fraction;
        self
    }

    pub fn validate(&self) -> Result<(), NeighborError> {
        if !(self.cutoff > 0.0 && self.cutoff.is_finite()) {
            return Err(NeighborError::InvalidCutoff(self.cutoff));
        }
        if !(self.skin >= 0.0 && self.skin.is_finite()) {
            return Err(NeighborError::InvalidSkin(self.skin));
        }
        if !(self.rebuild_fraction > 0.0 && self.rebuild_fraction <= MAX_REBUILD_FRACTION) {
            return Err(NeighborError::InvalidRebuildFraction(self.rebuild_fraction));
        }
        Ok(())
    }
}

/// One interacting pair, or one particle with a periodic image of itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborContact {
    pub i: usize,
    pub j: usize,
    /// Lattice translation relative to the minimum image of the pair. `[0, 0, 0]` marks the
    /// minimum-image contact.
    pub image: [i32; 3],
    /// Lattice translation that brought `r_i - r_j` into the primary cell at build time.
    pub wrap: [i32; 3],
    /// Displacement from particle `j` to particle `i`, including the image translation.
    pub delta: Vector3<f64>,
    pub distance: f64,
    /// 1.0 for distinct particles, 0.5 for a particle interacting with its own image.
    pub weight: f64,
}

impl NeighborContact {
    pub fn is_self_image(&self) -> bool {
        self.i == self.j
    }

    pub fn is_minimum_image(&self) -> bool {
        self.image == [0, 0, 0]
    }

    fn translation(&self) -> [i32; 3] {
        [
            self.image[0] - self.wrap[0],
            self.image[1] - self.wrap[1],
            self.image[2] - self.wrap[2],
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Contacts were enumerated from scratch.
    Rebuilt,
    /// Contact geometry was recomputed for the existing contacts.
    Refreshed,
    /// Positions did not change since the last update.
    Unchanged,
    /// The list holds an injected or truncated contact set and was left untouched.
    Pinned,
}

/// Cached set of contacts within `cutoff + skin`.
///
/// Contacts are enumerated once per rebuild. While the list is valid, [`NeighborList::update`]
/// only recomputes the displacement and distance of the known contacts. The list goes
/// stale when it was never built, after [`NeighborList::invalidate`], when the particle
/// count or the cell changes, or when any particle moved further than
/// `rebuild_fraction * skin` from its position at the last rebuild.
#[derive(Debug, Clone)]
pub struct NeighborList {
    config: NeighborConfig,
    contacts: Vec<NeighborContact>,
    nneigh: usize,
    reference_positions: Vec<Vector3<f64>>,
    current_positions: Vec<Vector3<f64>>,
    reference_cell: Option<Cell>,
    invalidated: bool,
    pinned: bool,
}

impl NeighborList {
    pub fn new(config: NeighborConfig) -> Result<Self, NeighborError> {
        config.validate()?;
        Ok(Self {
            config,
            contacts: Vec::new(),
            nneigh: 0,
            reference_positions: Vec::new(),
            current_positions: Vec::new(),
            reference_cell: None,
            invalidated: true,
            pinned: false,
        })
    }

    pub fn config(&self) -> &NeighborConfig {
        &self.config
    }

    pub fn cutoff(&self) -> f64 {
        self.config.cutoff
    }

    /// The contacts evaluated by a pair term: the first [`NeighborList::nneigh`] entries.
    pub fn contacts(&self) -> &[NeighborContact] {
        &self.contacts[..self.nneigh]
    }

    pub fn nneigh(&self) -> usize {
        self.nneigh
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Forces a rebuild on the next update and releases a pinned list.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
        self.pinned = false;
    }

    pub fn is_stale(&self, positions: &[Vector3<f64>], cell: &Cell) -> bool {
        if self.invalidated || positions.len() != self.reference_positions.len() {
            return true;
        }
        if self.reference_cell.as_ref() != Some(cell) {
            return true;
        }
        let threshold = self.config.rebuild_fraction * self.config.skin;
        let threshold_sq = threshold * threshold;
        positions
            .iter()
            .zip(&self.reference_positions)
            .any(|(r, r0)| (r - r0).norm_squared() > threshold_sq)
    }

    pub fn update(&mut self, positions: &[Vector3<f64>], cell: &Cell) -> UpdateOutcome {
        if self.pinned {
            return UpdateOutcome::Pinned;
        }
        if self.is_stale(positions, cell) {
            self.rebuild(positions, cell);
            return UpdateOutcome::Rebuilt;
        }
        if positions == self.current_positions.as_slice() {
            return UpdateOutcome::Unchanged;
        }
        self.refresh(positions, cell);
        UpdateOutcome::Refreshed
    }

    /// Restricts evaluation to the first `n` contacts. The list stays pinned until
    /// [`NeighborList::invalidate`] is called.
    pub fn set_nneigh(&mut self, n: usize) -> Result<(), NeighborError> {
        if n > self.contacts.len() {
            return Err(NeighborError::NneighOutOfRange {
                requested: n,
                available: self.contacts.len(),
            });
        }
        self.nneigh = n;
        self.pinned = true;
        Ok(())
    }

    /// Replaces all contacts by a single synthetic contact between `i` and `j` at
    /// distance `d`, with displacement `(0, 0, d)`. Used to sample a pair potential.
    pub fn inject_contact(&mut self, i: usize, j: usize, d: f64) -> Result<(), NeighborError> {
        if !(d > 0.0 && d.is_finite()) {
            return Err(NeighborError::InvalidDistance(d));
        }
        let natom = self.reference_positions.len();
        for index in [i, j] {
            if index >= natom {
                return Err(NeighborError::IndexOutOfRange { index, natom });
            }
        }
        self.contacts.clear();
        self.contacts.push(NeighborContact {
            i,
            j,
            image: [0; 3],
            wrap: [0; 3],
            delta: Vector3::new(0.0, 0.0, d),
            distance: d,
            weight: 1.0,
        });
        self.nneigh = 1;
        self.pinned = true;
        Ok(())
    }

    #[instrument(skip_all, name = "neighbor_rebuild")]
    fn rebuild(&mut self, positions: &[Vector3<f64>], cell: &Cell) {
        let radius = self.config.cutoff + self.config.skin;
        let ranges = cell.image_ranges(radius);
        let natom = positions.len();

        #[cfg(not(feature = "parallel"))]
        let iterator = 0..natom;

        #[cfg(feature = "parallel")]
        let iterator = (0..natom).into_par_iter();

        let per_atom: Vec<Vec<NeighborContact>> = iterator
            .map(|i| contacts_of(i, positions, cell, ranges, radius))
            .collect();

        self.contacts = per_atom.into_iter().flatten().collect();
        self.nneigh = self.contacts.len();
        self.reference_positions = positions.to_vec();
        self.current_positions = positions.to_vec();
        self.reference_cell = Some(cell.clone());
        self.invalidated = false;

        debug!(
            natom,
            ncontacts = self.contacts.len(),
            radius,
            "Rebuilt neighbor list"
        );
    }

    fn refresh(&mut self, positions: &[Vector3<f64>], cell: &Cell) {
        for contact in &mut self.contacts {
            contact.delta =
                positions[contact.i] - positions[contact.j] + cell.image_shift(contact.translation());
            contact.distance = contact.delta.norm();
        }
        self.current_positions.copy_from_slice(positions);
        trace!(ncontacts = self.contacts.len(), "Refreshed neighbor contacts");
    }
}

/// Contacts of particle `i` with every `j < i` and with its own periodic images.
fn contacts_of(
    i: usize,
    positions: &[Vector3<f64>],
    cell: &Cell,
    ranges: [i32; 3],
    radius: f64,
) -> Vec<NeighborContact> {
    let mut contacts = Vec::new();
    for j in 0..=i {
        let raw = positions[i] - positions[j];
        let wrap = cell.wrap_shift(&raw);
        let minimum = raw - cell.image_shift(wrap);
        let weight = if i == j { 0.5 } else { 1.0 };

        for a in -ranges[0]..=ranges[0] {
            for b in -ranges[1]..=ranges[1] {
                for c in -ranges[2]..=ranges[2] {
                    let image = [a, b, c];
                    if i == j && image == [0, 0, 0] {
                        continue;
                    }
                    let delta = minimum + cell.image_shift(image);
                    let distance = delta.norm();
                    if distance <= radius {
                        contacts.push(NeighborContact {
                            i,
                            j,
                            image,
                            wrap,
                            delta,
                            distance,
                            weight,
                        });
                    }
                }
            }
        }
    }
    contacts
}
