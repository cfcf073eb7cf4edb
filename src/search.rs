pub mod combinatorics;
pub mod lattice_sampler;
pub mod placement;
