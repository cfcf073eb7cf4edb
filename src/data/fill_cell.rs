use std::collections::HashMap;
use std::sync::OnceLock;

use crate::base::GenError;
use crate::data::centering::Centering;
use crate::data::template::TemplateTriple;

/// Lattice-centering offsets and point-group coset representatives for one
/// space group. Their Cartesian product, applied to a free-parameter seed,
/// generates the full orbit of any Wyckoff position in that group.
#[derive(Debug, Clone)]
pub struct FillCellInfo {
    pub centering: Centering,
    pub coset_representatives: Vec<TemplateTriple>,
}

fn templates(strs: &[&str]) -> Vec<TemplateTriple> {
    strs.iter()
        .map(|s| {
            TemplateTriple::parse(s).unwrap_or_else(|_| panic!("bad static coset template: {s}"))
        })
        .collect()
}

/// Point group `mmm` (order 8): all eight sign combinations of `(x, y, z)`.
fn mmm() -> Vec<&'static str> {
    vec![
        "x,y,z", "x,y,-z", "x,-y,z", "x,-y,-z", "-x,y,z", "-x,y,-z", "-x,-y,z", "-x,-y,-z",
    ]
}

/// Point group `23` (order 12): even permutations of `(x,y,z)` crossed with
/// the four sign patterns that flip an even number of axes. This is the
/// chiral-tetrahedral rotation group.
fn point_group_23() -> Vec<&'static str> {
    vec![
        "x,y,z", "x,-y,-z", "-x,y,-z", "-x,-y,z", "y,z,x", "y,-z,-x", "-y,z,-x", "-y,-z,x",
        "z,x,y", "z,-x,-y", "-z,x,-y", "-z,-x,y",
    ]
}

/// Point group `m-3m` (order 48): all six permutations of `(x,y,z)` crossed
/// with all eight sign patterns — the full signed-permutation group, i.e.
/// the complete octahedral point group `Oh`.
fn point_group_m3m() -> Vec<&'static str> {
    vec![
        "x,y,z", "x,y,-z", "x,-y,z", "x,-y,-z", "-x,y,z", "-x,y,-z", "-x,-y,z", "-x,-y,-z",
        "x,z,y", "x,z,-y", "x,-z,y", "x,-z,-y", "-x,z,y", "-x,z,-y", "-x,-z,y", "-x,-z,-y",
        "y,x,z", "y,x,-z", "y,-x,z", "y,-x,-z", "-y,x,z", "-y,x,-z", "-y,-x,z", "-y,-x,-z",
        "y,z,x", "y,z,-x", "y,-z,x", "y,-z,-x", "-y,z,x", "-y,z,-x", "-y,-z,x", "-y,-z,-x",
        "z,x,y", "z,x,-y", "z,-x,y", "z,-x,-y", "-z,x,y", "-z,x,-y", "-z,-x,y", "-z,-x,-y",
        "z,y,x", "z,y,-x", "z,-y,x", "z,-y,-x", "-z,y,x", "-z,y,-x", "-z,-y,x", "-z,-y,-x",
    ]
}

fn build_database() -> HashMap<u16, FillCellInfo> {
    let mut db = HashMap::new();

    db.insert(
        1,
        FillCellInfo {
            centering: Centering::P,
            coset_representatives: templates(&["x,y,z"]),
        },
    );
    db.insert(
        2,
        FillCellInfo {
            centering: Centering::P,
            coset_representatives: templates(&["x,y,z", "-x,-y,-z"]),
        },
    );
    // Point group 2/m, unique axis b: identity, 2-fold || b, inversion, mirror perp b.
    db.insert(
        12,
        FillCellInfo {
            centering: Centering::C,
            coset_representatives: templates(&["x,y,z", "-x,y,-z", "-x,-y,-z", "x,-y,z"]),
        },
    );
    db.insert(
        47,
        FillCellInfo {
            centering: Centering::P,
            coset_representatives: templates(&mmm()),
        },
    );
    // Pnma general position (standard setting), non-symmorphic.
    db.insert(
        62,
        FillCellInfo {
            centering: Centering::P,
            coset_representatives: templates(&[
                "x,y,z",
                "-x+0.5,-y,z+0.5",
                "-x,y+0.5,-z",
                "x+0.5,-y+0.5,-z+0.5",
                "-x,-y,-z",
                "x+0.5,y,-z+0.5",
                "x,-y+0.5,z",
                "-x+0.5,y+0.5,z+0.5",
            ]),
        },
    );
    // Point group 4, rotations about c.
    db.insert(
        75,
        FillCellInfo {
            centering: Centering::P,
            coset_representatives: templates(&["x,y,z", "-y,x,z", "-x,-y,z", "y,-x,z"]),
        },
    );
    // Point group 3, hexagonal axes.
    db.insert(
        146,
        FillCellInfo {
            centering: Centering::R,
            coset_representatives: templates(&["x,y,z", "-y,x-y,z", "-x+y,-x,z"]),
        },
    );
    db.insert(
        195,
        FillCellInfo {
            centering: Centering::P,
            coset_representatives: templates(&point_group_23()),
        },
    );
    db.insert(
        225,
        FillCellInfo {
            centering: Centering::F,
            coset_representatives: templates(&point_group_m3m()),
        },
    );
    db.insert(
        230,
        FillCellInfo {
            centering: Centering::I,
            coset_representatives: templates(&point_group_m3m()),
        },
    );

    db
}

static DATABASE: OnceLock<HashMap<u16, FillCellInfo>> = OnceLock::new();

/// Centering offsets and coset representatives for space group `number`.
pub fn fill_cell_info(number: u16) -> Result<&'static FillCellInfo, GenError> {
    if !(1..=230).contains(&number) {
        return Err(GenError::InvalidSpaceGroup(number));
    }
    DATABASE
        .get_or_init(build_database)
        .get(&number)
        .ok_or(GenError::BadDatabase(number))
}
