use rand::Rng;

use crate::base::{Crystal, GenError, GenerationRequest};
use crate::data::wyckoff_positions;
use crate::search::combinatorics;
use crate::search::placement;

/// Generate a random crystal belonging to `request.spacegroup`. Consults
/// the Combinatorial Solver once, prunes by forced letters and
/// `force_general`, then hands the surviving possibilities to the
/// Placement Engine. `AttemptsExhausted` surfaces as `Ok(None)`, not an
/// error; `InvalidSpaceGroup`/`InvalidBox`/`Infeasible`/`BadTemplate`/
/// `BadDatabase` are request-fatal and logged at error level here.
pub fn random_crystal(
    request: &GenerationRequest,
    rng: &mut impl Rng,
) -> Result<Option<Crystal>, GenError> {
    let orbits = match wyckoff_positions(request.spacegroup) {
        Ok(orbits) => orbits,
        Err(err) => {
            log::error!("space group {}: {err}", request.spacegroup);
            return Err(err);
        }
    };
    let groups = combinatorics::orbit_groups(orbits);
    let counts = combinatorics::species_counts(&request.atoms);

    let mut possibilities = match combinatorics::solve(request.spacegroup, &counts, false, false) {
        Ok(p) => p,
        Err(err) => {
            log::error!("space group {}: {err}", request.spacegroup);
            return Err(err);
        }
    };
    if possibilities.is_empty() {
        log::error!(
            "space group {}: no Wyckoff assignment exists for this species multiset",
            request.spacegroup
        );
        return Err(GenError::Infeasible);
    }

    for &(z, letter) in &request.forced_letters {
        possibilities =
            combinatorics::remove_possibilities_without_wyck_pos(&groups, possibilities, letter, 1, Some(z));
        if possibilities.is_empty() {
            log::error!(
                "space group {}: forcing letter '{letter}' for species {z} left no possibilities",
                request.spacegroup
            );
            return Err(GenError::Infeasible);
        }
    }

    if request.force_general {
        possibilities =
            combinatorics::remove_possibilities_without_general_wyck_pos(&groups, orbits, possibilities, 1);
        if possibilities.is_empty() {
            log::error!(
                "space group {}: force_general left no possibilities",
                request.spacegroup
            );
            return Err(GenError::Infeasible);
        }
    }

    let radii = request.radii_oracle();
    log::debug!(
        "space group {}: placing with {} surviving possibilities, max_attempts={}",
        request.spacegroup,
        possibilities.len(),
        request.max_attempts
    );

    let result = placement::place(request, &possibilities, &groups, &radii, rng)?;
    match &result {
        Some(crystal) => log::debug!(
            "space group {}: succeeded with {} atoms",
            request.spacegroup,
            crystal.num_atoms()
        ),
        None => log::debug!(
            "space group {}: exhausted {} attempts",
            request.spacegroup,
            request.max_attempts
        ),
    }
    Ok(result)
}

/// Wrapper that runs the solver with `find_only_one=true, only_non_unique=false`
/// and reports whether any possibility survives.
pub fn is_spg_possible(g: u16, atoms: &[u32]) -> bool {
    combinatorics::is_spg_possible(g, atoms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::LatticeParams;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_crystal_spg1_two_atoms() {
        let mins = LatticeParams::new(4.0, 4.0, 4.0, 90.0, 90.0, 90.0);
        let request = GenerationRequest::new(1, vec![1, 1], mins, mins);
        let mut rng = StdRng::seed_from_u64(99);
        let crystal = random_crystal(&request, &mut rng).unwrap().unwrap();
        assert_eq!(crystal.num_atoms(), 2);
    }

    #[test]
    fn test_random_crystal_spg230_single_atom_is_infeasible() {
        let mins = LatticeParams::new(4.0, 4.0, 4.0, 90.0, 90.0, 90.0);
        let maxes = LatticeParams::new(8.0, 8.0, 8.0, 90.0, 90.0, 90.0);
        let request = GenerationRequest::new(230, vec![8], mins, maxes);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            random_crystal(&request, &mut rng),
            Err(GenError::Infeasible)
        ));
    }

    #[test]
    fn test_determinism_same_seed_same_output() {
        let mins = LatticeParams::new(4.0, 5.0, 6.0, 90.0, 90.0, 90.0);
        let maxes = LatticeParams::new(6.0, 7.0, 8.0, 90.0, 90.0, 90.0);
        let request = GenerationRequest::new(1, vec![1, 1], mins, maxes);

        let mut rng1 = StdRng::seed_from_u64(2024);
        let mut rng2 = StdRng::seed_from_u64(2024);
        let c1 = random_crystal(&request, &mut rng1).unwrap().unwrap();
        let c2 = random_crystal(&request, &mut rng2).unwrap().unwrap();

        assert_eq!(c1.num_atoms(), c2.num_atoms());
        for (a, b) in c1.atoms.iter().zip(c2.atoms.iter()) {
            assert_eq!(a.atomic_number, b.atomic_number);
            assert_relative_eq!(a.position, b.position, epsilon = 1e-12);
        }
    }
}
