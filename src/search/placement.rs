use nalgebra::Vector3;
use rand::Rng;

use crate::base::{Atom, Crystal, GenError, GenerationRequest, Verbosity};
use crate::data::RadiiOracle;

use super::combinatorics::{self, AssignmentEntry, OrbitGroup, SystemPossibility};
use super::lattice_sampler;

const MAX_SEED_RETRIES: u32 = 1000;

/// Draw (x, y, z) uniformly, evaluate the orbit template there, add and
/// verify the seed, then fill the rest of the orbit via `fill_cell_with_atom`.
/// Unique orbits skip the random draw (their template is fully numeric) and
/// get a single placement attempt.
///
/// Per-attempt failures are absorbed silently against the retry budget;
/// `orbit-retried` is only logged at debug level when `verbosity` is
/// `Verbose`.
fn add_wyckoff_atom_randomly(
    crystal: &mut Crystal,
    spg: u16,
    entry: &AssignmentEntry,
    radii: &RadiiOracle,
    verbosity: Verbosity,
    rng: &mut impl Rng,
) -> bool {
    let orbit = entry.orbit;

    if orbit.unique {
        // No free parameters to draw; a single placement attempt either
        // lands or the whole step fails.
        let (x, y, z) = orbit.template.eval(0.0, 0.0, 0.0);
        let atom = Atom::new(entry.atomic_number, Vector3::new(x, y, z));
        if !crystal.add_if_empty(atom) {
            if verbosity == Verbosity::Verbose {
                log::debug!(
                    "orbit-retried: unique letter '{}' for species {} already occupied",
                    orbit.letter,
                    entry.atomic_number
                );
            }
            return false;
        }
        let index = crystal.num_atoms() - 1;
        let ok = matches!(crystal.fill_cell_with_atom(spg, index, radii), Ok(true));
        if !ok && verbosity == Verbosity::Verbose {
            log::debug!(
                "orbit-retried: unique letter '{}' failed IAD check while filling the cell",
                orbit.letter
            );
        }
        ok
    } else {
        for _ in 0..MAX_SEED_RETRIES {
            let x: f64 = rng.gen_range(0.0..1.0);
            let y: f64 = rng.gen_range(0.0..1.0);
            let z: f64 = rng.gen_range(0.0..1.0);
            let (tx, ty, tz) = orbit.template.eval(x, y, z);
            let seed = Atom::new(entry.atomic_number, Vector3::new(tx, ty, tz));
            let checkpoint = crystal.num_atoms();

            if !crystal.add_if_empty(seed) {
                continue;
            }
            let seed_index = crystal.num_atoms() - 1;
            if !crystal.iads_ok_for(seed_index, radii) {
                crystal.remove_atoms_appended_after(checkpoint);
                continue;
            }
            match crystal.fill_cell_with_atom(spg, seed_index, radii) {
                Ok(true) => return true,
                _ => {
                    crystal.remove_atoms_appended_after(checkpoint);
                    continue;
                }
            }
        }
        if verbosity == Verbosity::Verbose {
            log::debug!(
                "orbit-retried: letter '{}' for species {} exhausted {MAX_SEED_RETRIES} seed retries",
                orbit.letter,
                entry.atomic_number
            );
        }
        false
    }
}

/// Turn one Assignment into a `Crystal`, retrying fresh lattice/assignment
/// draws up to `request.max_attempts` times. Each attempt runs the state
/// machine `DrawLattice -> DrawAssignment -> Place(i) -> Done | Fail`.
pub fn place(
    request: &GenerationRequest,
    possibilities: &[SystemPossibility],
    groups: &[OrbitGroup],
    radii: &RadiiOracle,
    rng: &mut impl Rng,
) -> Result<Option<Crystal>, GenError> {
    let verbose = request.verbosity == Verbosity::Verbose;

    for attempt in 0..request.max_attempts {
        let Some(lattice) = lattice_sampler::sample_lattice(
            request.spacegroup,
            request.lattice_mins,
            request.lattice_maxes,
            request.min_volume,
            request.max_volume,
            rng,
        )?
        else {
            if verbose {
                log::debug!("attempt-failed: attempt {attempt} could not draw a lattice");
            }
            continue;
        };

        let assignment =
            combinatorics::random_assignment(groups, possibilities, &request.forced_letters, rng);
        if assignment.is_empty() {
            return Err(GenError::Infeasible);
        }

        let mut crystal = Crystal::new(lattice);
        let mut ok = true;
        for entry in &assignment {
            if !add_wyckoff_atom_randomly(
                &mut crystal,
                request.spacegroup,
                entry,
                radii,
                request.verbosity,
                rng,
            ) {
                ok = false;
                break;
            }
        }

        if ok && crystal.num_atoms() == request.atoms.len() {
            if verbose {
                log::debug!("success: attempt {attempt} placed all {} atoms", crystal.num_atoms());
            }
            return Ok(Some(crystal));
        }
        if verbose {
            log::debug!("attempt-failed: attempt {attempt} could not place the full assignment");
        }
    }

    Ok(None)
}
