use super::neighbors::{NeighborContact, NeighborList};
use crate::core::forcefield::pair_pot::PairPotential;
use crate::core::topology::scalings::Scalings;
use nalgebra::{Matrix3, Vector3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Contacts per unit of work. Energies are summed within a chunk first and then over
/// chunks in order, so the total does not depend on the thread count.
const CHUNK_SIZE: usize = 256;

/// Evaluates one pair potential over the contacts of a neighbor list.
///
/// The exclusion scale of a pair is looked up by particle indices and applied to the
/// minimum-image contact only. Further periodic images of a near-bonded pair interact at
/// full strength.
pub struct PairTerm<'a> {
    nlist: &'a NeighborList,
    scalings: &'a Scalings,
    potential: &'a PairPotential,
}

impl<'a> PairTerm<'a> {
    pub fn new(
        nlist: &'a NeighborList,
        scalings: &'a Scalings,
        potential: &'a PairPotential,
    ) -> Self {
        Self {
            nlist,
            scalings,
            potential,
        }
    }

    /// Energy of all contacts. When `gpos` is given, the gradient with respect to the
    /// particle positions is added to it.
    pub fn compute(&self, gpos: Option<&mut [Vector3<f64>]>) -> f64 {
        self.compute_with_virial(gpos, None)
    }

    /// Like [`PairTerm::compute`], additionally adding `Σ g δᵀ` to `vtens` when given.
    pub fn compute_with_virial(
        &self,
        gpos: Option<&mut [Vector3<f64>]>,
        vtens: Option<&mut Matrix3<f64>>,
    ) -> f64 {
        let contacts = self.nlist.contacts();

        #[cfg(not(feature = "parallel"))]
        let energy = self.compute_serial(contacts, gpos, vtens);

        #[cfg(feature = "parallel")]
        let energy = self.compute_parallel(contacts, gpos, vtens);

        energy
    }

    #[cfg(not(feature = "parallel"))]
    fn compute_serial(
        &self,
        contacts: &[NeighborContact],
        mut gpos: Option<&mut [Vector3<f64>]>,
        mut vtens: Option<&mut Matrix3<f64>>,
    ) -> f64 {
        contacts
            .chunks(CHUNK_SIZE)
            .map(|chunk| self.accumulate_chunk(chunk, gpos.as_deref_mut(), vtens.as_deref_mut()))
            .sum()
    }

    #[cfg(feature = "parallel")]
    fn compute_parallel(
        &self,
        contacts: &[NeighborContact],
        gpos: Option<&mut [Vector3<f64>]>,
        vtens: Option<&mut Matrix3<f64>>,
    ) -> f64 {
        let natom = gpos.as_ref().map(|g| g.len());
        let with_virial = vtens.is_some();

        let partial = contacts
            .par_chunks(CHUNK_SIZE)
            .enumerate()
            .fold(
                || Partial::new(natom, with_virial),
                |mut partial, (index, chunk)| {
                    let energy = self.accumulate_chunk(
                        chunk,
                        partial.gpos.as_deref_mut(),
                        partial.vtens.as_mut(),
                    );
                    partial.energies.push((index, energy));
                    partial
                },
            )
            .reduce(|| Partial::new(natom, with_virial), Partial::merge);

        if let (Some(target), Some(source)) = (gpos, &partial.gpos) {
            for (t, s) in target.iter_mut().zip(source) {
                *t += s;
            }
        }
        if let (Some(target), Some(source)) = (vtens, &partial.vtens) {
            *target += source;
        }

        let mut energies = partial.energies;
        energies.sort_unstable_by_key(|(index, _)| *index);
        energies.into_iter().map(|(_, energy)| energy).sum()
    }

    fn accumulate_chunk(
        &self,
        chunk: &[NeighborContact],
        mut gpos: Option<&mut [Vector3<f64>]>,
        mut vtens: Option<&mut Matrix3<f64>>,
    ) -> f64 {
        let mut energy = 0.0;
        for contact in chunk {
            let Some((e, de)) = self.evaluate(contact) else {
                continue;
            };
            energy += e;
            if gpos.is_none() && vtens.is_none() {
                continue;
            }
            let g = contact.delta * (de / contact.distance);
            if let Some(gpos) = gpos.as_deref_mut() {
                gpos[contact.i] += g;
                gpos[contact.j] -= g;
            }
            if let Some(vtens) = vtens.as_deref_mut() {
                *vtens += g * contact.delta.transpose();
            }
        }
        energy
    }

    /// Scaled energy and radial derivative of one contact, or `None` when the contact does
    /// not contribute.
    #[inline]
    fn evaluate(&self, contact: &NeighborContact) -> Option<(f64, f64)> {
        debug_assert!(
            contact.distance.is_finite() && contact.distance >= 0.0,
            "invalid contact distance {}",
            contact.distance
        );
        let scale = if contact.is_minimum_image() {
            self.scalings.lookup(contact.i, contact.j)
        } else {
            1.0
        };
        if scale == 0.0 || contact.distance > self.potential.rcut() {
            return None;
        }
        let (energy, derivative) =
            self.potential
                .energy_and_derivative(contact.i, contact.j, contact.distance);
        let factor = scale * contact.weight;
        Some((energy * factor, derivative * factor))
    }
}

#[cfg(feature = "parallel")]
struct Partial {
    energies: Vec<(usize, f64)>,
    gpos: Option<Vec<Vector3<f64>>>,
    vtens: Option<Matrix3<f64>>,
}

#[cfg(feature = "parallel")]
impl Partial {
    fn new(natom: Option<usize>, with_virial: bool) -> Self {
        Self {
            energies: Vec::new(),
            gpos: natom.map(|n| vec![Vector3::zeros(); n]),
            vtens: with_virial.then(Matrix3::zeros),
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.energies.extend(other.energies);
        if let (Some(a), Some(b)) = (self.gpos.as_mut(), other.gpos.as_ref()) {
            for (x, y) in a.iter_mut().zip(b) {
                *x += y;
            }
        }
        if let (Some(a), Some(b)) = (self.vtens.as_mut(), other.vtens.as_ref()) {
            *a += b;
        }
        self
    }
}
