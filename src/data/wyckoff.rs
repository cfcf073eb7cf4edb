use std::collections::HashMap;
use std::sync::OnceLock;

use crate::base::GenError;
use crate::data::template::TemplateTriple;

/// One Wyckoff orbit: a letter, its multiplicity in the conventional cell,
/// its first-coordinate template, and whether it is site-symmetric
/// ("unique").
///
/// `unique` is derivable from `template` (no free variable appears) but is
/// stored to avoid re-deriving it on every lookup.
#[derive(Debug, Clone)]
pub struct WyckoffOrbit {
    pub letter: char,
    pub multiplicity: usize,
    pub template: TemplateTriple,
    pub unique: bool,
}

fn orbit(letter: char, multiplicity: usize, template: &str) -> WyckoffOrbit {
    let template = TemplateTriple::parse(template)
        .unwrap_or_else(|_| panic!("bad static Wyckoff template: {template}"));
    let unique = template.is_unique();
    WyckoffOrbit {
        letter,
        multiplicity,
        template,
        unique,
    }
}

/// Wyckoff orbits for a representative subset of space groups, one per
/// crystal family and Bravais centering type, transcribed from the
/// International Tables for Crystallography. A full 230-entry table is
/// outside this crate's hand-authored data budget; space groups outside the
/// embedded subset report `BadDatabase` rather than panicking. Orbits are
/// always returned ordered by increasing multiplicity, with the general
/// position last.
fn build_database() -> HashMap<u16, Vec<WyckoffOrbit>> {
    let mut db = HashMap::new();

    // 1: P1, triclinic, point group 1
    db.insert(1, vec![orbit('a', 1, "x,y,z")]);

    // 2: P-1, triclinic, point group -1
    db.insert(
        2,
        vec![
            orbit('a', 1, "0,0,0"),
            orbit('b', 1, "0,0,0.5"),
            orbit('c', 1, "0,0.5,0"),
            orbit('d', 1, "0.5,0,0"),
            orbit('e', 1, "0.5,0.5,0"),
            orbit('f', 1, "0.5,0,0.5"),
            orbit('g', 1, "0,0.5,0.5"),
            orbit('h', 1, "0.5,0.5,0.5"),
            orbit('i', 2, "x,y,z"),
        ],
    );

    // 12: C2/m, monoclinic (unique axis b), C-centered
    db.insert(
        12,
        vec![
            orbit('a', 2, "0,0,0"),
            orbit('b', 2, "0,0.5,0"),
            orbit('c', 2, "0,0,0.5"),
            orbit('d', 2, "0,0.5,0.5"),
            orbit('e', 4, "0.25,0.25,0"),
            orbit('f', 4, "0.25,0.25,0.5"),
            orbit('g', 4, "0,y,0"),
            orbit('h', 4, "0,y,0.5"),
            orbit('i', 4, "x,0,z"),
            orbit('j', 8, "x,y,z"),
        ],
    );

    // 47: Pmmm, orthorhombic, point group mmm
    db.insert(
        47,
        vec![
            orbit('a', 1, "0,0,0"),
            orbit('b', 1, "0.5,0,0"),
            orbit('c', 1, "0,0,0.5"),
            orbit('d', 1, "0.5,0,0.5"),
            orbit('e', 1, "0,0.5,0"),
            orbit('f', 1, "0.5,0.5,0"),
            orbit('g', 1, "0,0.5,0.5"),
            orbit('h', 1, "0.5,0.5,0.5"),
            orbit('i', 2, "x,0,0"),
            orbit('j', 2, "x,0,0.5"),
            orbit('k', 2, "x,0.5,0"),
            orbit('l', 2, "x,0.5,0.5"),
            orbit('m', 2, "0,y,0"),
            orbit('n', 2, "0,y,0.5"),
            orbit('o', 2, "0.5,y,0"),
            orbit('p', 2, "0.5,y,0.5"),
            orbit('q', 2, "0,0,z"),
            orbit('r', 2, "0,0.5,z"),
            orbit('s', 2, "0.5,0,z"),
            orbit('t', 2, "0.5,0.5,z"),
            orbit('u', 4, "0,y,z"),
            orbit('v', 4, "0.5,y,z"),
            orbit('w', 4, "x,0,z"),
            orbit('x', 4, "x,0.5,z"),
            orbit('y', 4, "x,y,0"),
            orbit('z', 4, "x,y,0.5"),
            orbit('A', 8, "x,y,z"),
        ],
    );

    // 62: Pnma, orthorhombic, non-symmorphic
    db.insert(
        62,
        vec![
            orbit('a', 4, "0,0,0"),
            orbit('b', 4, "0,0,0.5"),
            orbit('c', 4, "x,0.25,z"),
            orbit('d', 8, "x,y,z"),
        ],
    );

    // 75: P4, tetragonal, point group 4
    db.insert(
        75,
        vec![
            orbit('a', 1, "0,0,z"),
            orbit('b', 1, "0.5,0.5,z"),
            orbit('c', 2, "0,0.5,z"),
            orbit('d', 4, "x,y,z"),
        ],
    );

    // 146: R3, trigonal (hexagonal axes), R-centered, point group 3
    db.insert(146, vec![orbit('a', 3, "0,0,z"), orbit('b', 9, "x,y,z")]);

    // 195: P23, cubic, point group 23
    db.insert(
        195,
        vec![
            orbit('a', 1, "0,0,0"),
            orbit('b', 1, "0.5,0.5,0.5"),
            orbit('c', 3, "0,0.5,0.5"),
            orbit('d', 3, "0.5,0,0"),
            orbit('e', 4, "x,x,x"),
            orbit('f', 6, "x,0,0"),
            orbit('g', 6, "x,0,0.5"),
            orbit('h', 6, "x,0.5,0"),
            orbit('i', 6, "x,0.5,0.5"),
            orbit('j', 12, "x,y,z"),
        ],
    );

    // 225: Fm-3m, cubic, F-centered, point group m-3m
    db.insert(
        225,
        vec![
            orbit('a', 4, "0,0,0"),
            orbit('b', 4, "0.5,0.5,0.5"),
            orbit('c', 8, "0.25,0.25,0.25"),
            orbit('d', 24, "0,0.25,0.25"),
            orbit('e', 24, "x,0,0"),
            orbit('f', 32, "x,x,x"),
            orbit('g', 48, "x,0.25,0.25"),
            orbit('h', 48, "0,y,y"),
            orbit('i', 48, "0.5,y,y"),
            orbit('j', 96, "0,y,z"),
            orbit('k', 96, "x,x,z"),
            orbit('l', 192, "x,y,z"),
        ],
    );

    // 230: Ia-3d, cubic, I-centered, point group m-3m
    db.insert(
        230,
        vec![
            orbit('a', 16, "0,0,0"),
            orbit('b', 16, "0.125,0.125,0.125"),
            orbit('c', 24, "0.125,0,0.25"),
            orbit('d', 24, "0.375,0,0.25"),
            orbit('e', 32, "x,x,x"),
            orbit('f', 48, "x,0,0.25"),
            orbit('g', 48, "0.125,y,-y+0.25"),
            orbit('h', 96, "x,y,z"),
        ],
    );

    db
}

static DATABASE: OnceLock<HashMap<u16, Vec<WyckoffOrbit>>> = OnceLock::new();

/// The ordered list of Wyckoff orbits for space group `number`.
/// The last element is always the general orbit.
pub fn wyckoff_positions(number: u16) -> Result<&'static [WyckoffOrbit], GenError> {
    if !(1..=230).contains(&number) {
        return Err(GenError::InvalidSpaceGroup(number));
    }
    DATABASE
        .get_or_init(build_database)
        .get(&number)
        .map(|v| v.as_slice())
        .ok_or(GenError::BadDatabase(number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_position_is_last_and_non_unique() {
        for &spg in &[1, 2, 12, 47, 62, 75, 146, 195, 225, 230] {
            let orbits = wyckoff_positions(spg).unwrap();
            let general = orbits.last().unwrap();
            assert!(!general.unique, "spg {spg}: general orbit must be non-unique");
            assert!(
                orbits.iter().all(|o| o.multiplicity <= general.multiplicity),
                "spg {spg}: general orbit must have the largest multiplicity"
            );
        }
    }

    #[test]
    fn test_unknown_space_group() {
        assert!(matches!(
            wyckoff_positions(3),
            Err(GenError::BadDatabase(3))
        ));
    }

    #[test]
    fn test_out_of_range_space_group() {
        assert!(matches!(
            wyckoff_positions(0),
            Err(GenError::InvalidSpaceGroup(0))
        ));
        assert!(matches!(
            wyckoff_positions(231),
            Err(GenError::InvalidSpaceGroup(231))
        ));
    }
}
