//! Generates random atomic crystal structures belonging to a caller-chosen
//! space group, given a species multiset, a feasible lattice-parameter box,
//! and per-species minimum interatomic distances.
//!
//! The center of gravity is three collaborating subsystems: the
//! [`search::combinatorics`] solver partitions a species multiset across a
//! space group's Wyckoff orbits, [`search::lattice_sampler`] draws a lattice
//! consistent with the space group's crystal family, and
//! [`search::placement`] turns one such partition into concrete atomic
//! coordinates under a bounded retry budget. [`driver::random_crystal`] is
//! the public entry point tying the three together.

#[macro_use]
extern crate approx;

pub mod base;
pub mod data;
mod driver;
mod search;

pub use base::{Atom, Crystal, GenError, GenerationRequest, Lattice, LatticeParams, Verbosity};
pub use driver::{is_spg_possible, random_crystal};
pub use search::combinatorics::SystemPossibility;
