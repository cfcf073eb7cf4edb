use itertools::iproduct;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::data::{fill_cell_info, RadiiOracle};

use super::error::GenError;
use super::lattice::Lattice;
use super::tolerance::POSITION_EPS;

/// One atom: an atomic number and a fractional-coordinate position.
/// Coordinates are only guaranteed to lie in `[0, 1)` after `wrap_atom`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Atom {
    pub atomic_number: u32,
    pub position: Vector3<f64>,
}

impl Atom {
    pub fn new(atomic_number: u32, position: Vector3<f64>) -> Self {
        Self {
            atomic_number,
            position,
        }
    }
}

/// The in-memory structure the Placement Engine mutates: a lattice plus an
/// append-order list of atoms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crystal {
    pub lattice: Lattice,
    pub atoms: Vec<Atom>,
}

fn wrap_coord(mut u: f64) -> f64 {
    u %= 1.0;
    if u < 0.0 {
        u += 1.0;
    }
    if (u - 1.0).abs() < POSITION_EPS {
        u = 0.0;
    }
    u
}

impl Crystal {
    pub fn new(lattice: Lattice) -> Self {
        Self {
            lattice,
            atoms: vec![],
        }
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Reduce a fractional position into `[0, 1)`, treating values within
    /// `POSITION_EPS` of `1` as `0`.
    pub fn wrap_position(position: Vector3<f64>) -> Vector3<f64> {
        Vector3::new(
            wrap_coord(position.x),
            wrap_coord(position.y),
            wrap_coord(position.z),
        )
    }

    pub fn wrap_atom(&mut self, index: usize) {
        self.atoms[index].position = Self::wrap_position(self.atoms[index].position);
    }

    fn wrap_all(&mut self) {
        for i in 0..self.atoms.len() {
            self.wrap_atom(i);
        }
    }

    /// True iff `a` and `b` differ by less than `POSITION_EPS` in every
    /// fractional coordinate, after wrapping both.
    pub fn same_position(a: &Atom, b: &Atom) -> bool {
        let wa = Self::wrap_position(a.position);
        let wb = Self::wrap_position(b.position);
        (wa.x - wb.x).abs() < POSITION_EPS
            && (wa.y - wb.y).abs() < POSITION_EPS
            && (wa.z - wb.z).abs() < POSITION_EPS
    }

    /// Wrap `atom`, then append it iff no existing atom of the same species
    /// already occupies that position. Returns whether it was added.
    pub fn add_if_empty(&mut self, mut atom: Atom) -> bool {
        atom.position = Self::wrap_position(atom.position);
        let occupied = self
            .atoms
            .iter()
            .any(|existing| existing.atomic_number == atom.atomic_number && Self::same_position(existing, &atom));
        if occupied {
            return false;
        }
        self.atoms.push(atom);
        true
    }

    /// Truncate the atom list back to a checkpoint.
    pub fn remove_atoms_appended_after(&mut self, index: usize) {
        self.atoms.truncate(index);
    }

    /// Shift every atom so atom `index` lands at `(0.5, 0.5, 0.5)`, then
    /// re-wrap. Used to evaluate nearest-neighbor distances under
    /// periodicity without explicitly building 27 images.
    pub fn center_on(&mut self, index: usize) {
        let p = self.atoms[index].position;
        let shift = Vector3::new(0.5 - p.x, 0.5 - p.y, 0.5 - p.z);
        for atom in self.atoms.iter_mut() {
            atom.position += shift;
        }
        self.wrap_all();
    }

    /// Euclidean distance between the Cartesian images of `a` and `b`. No
    /// periodic minimum-image convention is applied here; periodicity is
    /// handled by the caller via `center_on`.
    pub fn distance(&self, a: &Atom, b: &Atom) -> f64 {
        let ca = self.lattice.cartesian_coords(&a.position);
        let cb = self.lattice.cartesian_coords(&b.position);
        (ca - cb).norm()
    }

    /// `radii(z_a) + radii(z_b)`.
    pub fn min_iad(&self, a: &Atom, b: &Atom, radii: &RadiiOracle) -> Option<f64> {
        Some(radii.radius(a.atomic_number)? + radii.radius(b.atomic_number)?)
    }

    /// For every other atom `b`, require `distance(a, b) >= min_iad(a, b)`
    /// after centering a scratch copy on `a`.
    pub fn iads_ok_for(&self, index: usize, radii: &RadiiOracle) -> bool {
        let mut scratch = self.clone();
        scratch.center_on(index);
        let a = scratch.atoms[index];
        for (i, b) in scratch.atoms.iter().enumerate() {
            if i == index {
                continue;
            }
            let Some(min_iad) = scratch.min_iad(&a, b, radii) else {
                return false;
            };
            if scratch.distance(&a, b) < min_iad {
                return false;
            }
        }
        true
    }

    /// `radii` unused here by design: volume rescaling is purely geometric.
    pub fn rescale_volume(&mut self, new_volume: f64) -> Result<(), GenError> {
        self.lattice.rescale_volume(new_volume)
    }

    /// Generate the full orbit of atom `index` under space group `spg`:
    /// the Cartesian product of centering offsets and coset
    /// representatives, each evaluated at `index`'s fractional coordinates.
    ///
    /// On success every new image has passed `add_if_empty` and
    /// `iads_ok_for`. On failure the atom list is rolled back to its state
    /// before any image of `index` was added.
    pub fn fill_cell_with_atom(
        &mut self,
        spg: u16,
        index: usize,
        radii: &RadiiOracle,
    ) -> Result<bool, GenError> {
        let checkpoint = self.atoms.len();
        let seed = self.atoms[index];
        let info = fill_cell_info(spg)?;

        let offsets = info.centering.offsets();
        for (j, (offset, coset)) in iproduct!(offsets.iter(), info.coset_representatives.iter()).enumerate() {
            // Skip identity x identity: `seed` is already present.
            if j == 0 {
                continue;
            }
            let (cx, cy, cz) = coset.eval(seed.position.x, seed.position.y, seed.position.z);
            let new_position = Vector3::new(cx + offset.x, cy + offset.y, cz + offset.z);
            let new_atom = Atom::new(seed.atomic_number, new_position);
            if self.add_if_empty(new_atom) {
                let new_index = self.atoms.len() - 1;
                if !self.iads_ok_for(new_index, radii) {
                    self.remove_atoms_appended_after(checkpoint);
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Call `fill_cell_with_atom` once per atom present at the start of the
    /// call, by index snapshot rather than iterator, since filling appends
    /// to the list while iterating.
    pub fn fill_unit_cell(&mut self, spg: u16, radii: &RadiiOracle) -> Result<bool, GenError> {
        self.wrap_all();
        let initial_len = self.atoms.len();
        for i in 0..initial_len {
            if !self.fill_cell_with_atom(spg, i, radii)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
