use std::collections::HashMap;

use rand::Rng;

use crate::base::GenError;
use crate::data::{wyckoff_positions, WyckoffOrbit};

/// Orbits of a space group sharing `(multiplicity, unique)`, in the order
/// their first member appears in the database. Interchangeable orbits are
/// collapsed into one group so the search treats them as a single resource
/// class instead of branching over each one individually.
#[derive(Debug, Clone)]
pub struct OrbitGroup {
    pub multiplicity: usize,
    pub unique: bool,
    pub orbits: Vec<&'static WyckoffOrbit>,
}

pub fn orbit_groups(orbits: &'static [WyckoffOrbit]) -> Vec<OrbitGroup> {
    let mut groups: Vec<OrbitGroup> = vec![];
    for orbit in orbits {
        if let Some(group) = groups
            .iter_mut()
            .find(|g| g.multiplicity == orbit.multiplicity && g.unique == orbit.unique)
        {
            group.orbits.push(orbit);
        } else {
            groups.push(OrbitGroup {
                multiplicity: orbit.multiplicity,
                unique: orbit.unique,
                orbits: vec![orbit],
            });
        }
    }
    groups
}

#[derive(Debug, Clone, Copy)]
struct UsageEntry {
    num_times_used: usize,
    keep_using: bool,
}

/// One (orbit-group, count) pair in a Single-Species Possibility.
#[derive(Debug, Clone)]
pub struct ChosenSubset {
    pub group_index: usize,
    pub k: usize,
}

#[derive(Debug, Clone)]
pub struct SingleSpeciesPossibility {
    pub atomic_number: u32,
    pub subsets: Vec<ChosenSubset>,
}

#[derive(Debug, Clone, Default)]
pub struct SystemPossibility {
    pub species: Vec<SingleSpeciesPossibility>,
}

fn first_available(groups: &[OrbitGroup], tracker: &[UsageEntry], only_non_unique: bool) -> Option<usize> {
    tracker.iter().enumerate().position(|(i, t)| {
        if only_non_unique && groups[i].unique {
            return false;
        }
        t.keep_using && (!groups[i].unique || t.num_times_used < groups[i].orbits.len())
    })
}

/// Recursive use-it-again/skip-it search for a single species. Collects
/// every Single-Species Possibility found into `out`, by way of the
/// (group_index, num_times_used) tracker at the leaf where `remaining`
/// reaches zero.
fn search_species(
    groups: &[OrbitGroup],
    tracker: Vec<UsageEntry>,
    remaining: usize,
    only_non_unique: bool,
    out: &mut Vec<Vec<ChosenSubset>>,
) {
    if remaining == 0 {
        let subsets = tracker
            .iter()
            .enumerate()
            .filter(|(_, t)| t.num_times_used > 0)
            .map(|(i, t)| ChosenSubset {
                group_index: i,
                k: t.num_times_used,
            })
            .collect();
        out.push(subsets);
        return;
    }

    let Some(idx) = first_available(groups, &tracker, only_non_unique) else {
        return; // dead end: non-zero remaining, nothing left to try
    };

    if groups[idx].multiplicity <= remaining {
        let mut used_again = tracker.clone();
        used_again[idx].num_times_used += 1;
        search_species(
            groups,
            used_again,
            remaining - groups[idx].multiplicity,
            only_non_unique,
            out,
        );
    }

    let mut skipped = tracker;
    skipped[idx].keep_using = false;
    search_species(groups, skipped, remaining, only_non_unique, out);
}

fn single_species_possibilities(
    groups: &[OrbitGroup],
    count: usize,
    only_non_unique: bool,
) -> Vec<Vec<ChosenSubset>> {
    let tracker = vec![
        UsageEntry {
            num_times_used: 0,
            keep_using: true,
        };
        groups.len()
    ];
    let mut out = vec![];
    search_species(groups, tracker, count, only_non_unique, &mut out);
    out
}

fn cross_species_unique_ok(groups: &[OrbitGroup], sys: &SystemPossibility) -> bool {
    let mut sums = vec![0usize; groups.len()];
    for sp in &sys.species {
        for c in &sp.subsets {
            sums[c.group_index] += c.k;
        }
    }
    groups
        .iter()
        .enumerate()
        .all(|(i, g)| !g.unique || sums[i] <= g.orbits.len())
}

/// Cartesian-extend one species' possibilities onto the accumulated system
/// list, dropping joins that exceed a unique orbit-group's capacity across
/// the whole system. When `find_one` is set, the accumulated list never
/// grows past one entry.
fn join_species(
    groups: &[OrbitGroup],
    accepted: Vec<SystemPossibility>,
    species_possibilities: &[SingleSpeciesPossibility],
    find_one: bool,
) -> Vec<SystemPossibility> {
    let mut next = vec![];
    'outer: for sys in &accepted {
        for sp in species_possibilities {
            let mut candidate = sys.clone();
            candidate.species.push(sp.clone());
            if cross_species_unique_ok(groups, &candidate) {
                next.push(candidate);
                if find_one {
                    break 'outer;
                }
            }
        }
    }
    next
}

fn collect_all(
    groups: &[OrbitGroup],
    species_sorted: &[(u32, usize)],
    only_non_unique_for: impl Fn(usize) -> bool,
    find_one: bool,
) -> Vec<SystemPossibility> {
    let mut accepted = vec![SystemPossibility::default()];
    for (i, &(z, count)) in species_sorted.iter().enumerate() {
        let only_non_unique = only_non_unique_for(i);
        let raw = single_species_possibilities(groups, count, only_non_unique);
        if raw.is_empty() {
            return vec![];
        }
        let possibilities: Vec<SingleSpeciesPossibility> = raw
            .into_iter()
            .map(|subsets| SingleSpeciesPossibility {
                atomic_number: z,
                subsets,
            })
            .collect();
        accepted = join_species(groups, accepted, &possibilities, find_one);
        if accepted.is_empty() {
            return vec![];
        }
    }
    accepted
}

/// Collapse a flat atom list into `(atomic_number, count)` pairs sorted by
/// descending count, to maximize early pruning during the search.
pub fn species_counts(atoms: &[u32]) -> Vec<(u32, usize)> {
    let mut map: HashMap<u32, usize> = HashMap::new();
    for &z in atoms {
        *map.entry(z).or_insert(0) += 1;
    }
    let mut counts: Vec<(u32, usize)> = map.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn fast_infeasible(groups: &[OrbitGroup], species_counts: &[(u32, usize)]) -> bool {
    groups.iter().all(|g| g.multiplicity % 2 == 0)
        && species_counts.iter().any(|&(_, c)| c % 2 == 1)
}

/// Produce System Possibilities for `species_counts` in space group `spg`.
/// `find_only_one` stops at the first successful join; `only_non_unique`
/// forbids unique orbit-groups from being chosen at all.
pub fn solve(
    spg: u16,
    species_counts_in: &[(u32, usize)],
    find_only_one: bool,
    only_non_unique: bool,
) -> Result<Vec<SystemPossibility>, GenError> {
    let orbits = wyckoff_positions(spg)?;
    let groups = orbit_groups(orbits);

    if fast_infeasible(&groups, species_counts_in) {
        return Ok(vec![]);
    }

    let mut species_sorted = species_counts_in.to_vec();
    species_sorted.sort_by(|a, b| b.1.cmp(&a.1));
    let n = species_sorted.len();

    if find_only_one {
        // Bias toward assignments that don't spend unique orbits on all but
        // the final species.
        let biased = collect_all(&groups, &species_sorted, |i| i + 1 < n, true);
        if !biased.is_empty() {
            return Ok(biased);
        }
        let relaxed = collect_all(&groups, &species_sorted, |_| only_non_unique, true);
        return Ok(relaxed);
    }

    Ok(collect_all(&groups, &species_sorted, |_| only_non_unique, false))
}

pub fn is_spg_possible(spg: u16, atoms: &[u32]) -> bool {
    let counts = species_counts(atoms);
    solve(spg, &counts, true, false)
        .map(|p| !p.is_empty())
        .unwrap_or(false)
}

/// Retain System Possibilities that use Wyckoff letter `letter` at least
/// `min_uses` times, optionally restricted to species `species`.
///
/// For a unique orbit-group this counts as a use of `letter` whenever any
/// orbit is chosen from that group (`k >= 1`) — the solver records group-
/// level counts, not which specific letter within a multi-letter group will
/// be drawn; this is therefore a necessary, not sufficient, pre-extraction
/// filter, resolved exactly once `random_assignment` draws concrete
/// letters.
pub fn remove_possibilities_without_wyck_pos(
    groups: &[OrbitGroup],
    possibilities: Vec<SystemPossibility>,
    letter: char,
    min_uses: usize,
    species: Option<u32>,
) -> Vec<SystemPossibility> {
    possibilities
        .into_iter()
        .filter(|sys| {
            let mut uses = 0usize;
            for sp in &sys.species {
                if let Some(z) = species {
                    if sp.atomic_number != z {
                        continue;
                    }
                }
                for c in &sp.subsets {
                    let group = &groups[c.group_index];
                    if c.k > 0 && group.orbits.iter().any(|o| o.letter == letter) {
                        uses += if group.unique { 1 } else { c.k };
                    }
                }
            }
            uses >= min_uses
        })
        .collect()
}

/// `remove_possibilities_without_wyck_pos` applied to the database's last
/// (general) orbit.
pub fn remove_possibilities_without_general_wyck_pos(
    groups: &[OrbitGroup],
    orbits: &'static [WyckoffOrbit],
    possibilities: Vec<SystemPossibility>,
    min_uses: usize,
) -> Vec<SystemPossibility> {
    let general_letter = orbits.last().expect("non-empty orbit list").letter;
    remove_possibilities_without_wyck_pos(groups, possibilities, general_letter, min_uses, None)
}

/// One (species, orbit) pair in a concrete Assignment.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentEntry {
    pub atomic_number: u32,
    pub orbit: &'static WyckoffOrbit,
}

pub type Assignment = Vec<AssignmentEntry>;

/// Draw a uniformly random System Possibility and concretize it into an
/// Assignment, honoring `forced` (species, letter) pairs first and drawing
/// the rest without replacement from each Chosen-Subset's group. Unique
/// orbits are removed from every remaining Chosen-Subset in the system once
/// drawn so a later draw cannot re-pick them.
pub fn random_assignment(
    groups: &[OrbitGroup],
    possibilities: &[SystemPossibility],
    forced: &[(u32, char)],
    rng: &mut impl Rng,
) -> Assignment {
    if possibilities.is_empty() {
        return vec![];
    }
    let idx = rng.gen_range(0..possibilities.len());
    let mut sys = possibilities[idx].clone();
    let mut assignment = Assignment::new();
    let mut removed_unique: Vec<(usize, char)> = vec![];

    for &(z, letter) in forced {
        'species: for sp in sys.species.iter_mut() {
            if sp.atomic_number != z {
                continue;
            }
            for c in sp.subsets.iter_mut() {
                let group = &groups[c.group_index];
                if c.k == 0 || !group.orbits.iter().any(|o| o.letter == letter) {
                    continue;
                }
                let orbit = group.orbits.iter().find(|o| o.letter == letter).unwrap();
                assignment.push(AssignmentEntry {
                    atomic_number: z,
                    orbit,
                });
                c.k -= 1;
                if group.unique {
                    removed_unique.push((c.group_index, letter));
                }
                break 'species;
            }
        }
    }

    for sp in &sys.species {
        for c in &sp.subsets {
            if c.k == 0 {
                continue;
            }
            let group = &groups[c.group_index];
            let mut available: Vec<&'static WyckoffOrbit> = group
                .orbits
                .iter()
                .filter(|o| !removed_unique.iter().any(|(gi, l)| *gi == c.group_index && *l == o.letter))
                .copied()
                .collect();
            for _ in 0..c.k {
                if available.is_empty() {
                    break;
                }
                let pick = rng.gen_range(0..available.len());
                let orbit = available[pick];
                assignment.push(AssignmentEntry {
                    atomic_number: sp.atomic_number,
                    orbit,
                });
                if group.unique {
                    available.remove(pick);
                    removed_unique.push((c.group_index, orbit.letter));
                }
            }
        }
    }

    assignment
}
