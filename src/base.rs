pub mod crystal;
pub mod error;
pub mod lattice;
pub mod request;
pub mod tolerance;

pub use crystal::{Atom, Crystal};
pub use error::GenError;
pub use lattice::{Lattice, LatticeParams};
pub use request::GenerationRequest;
pub use tolerance::{Verbosity, POSITION_EPS};
