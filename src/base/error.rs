use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
/// Error types for the **randspg** crate.
///
/// `AttemptsExhausted` is deliberately not a variant here: running out of
/// attempts is an expected outcome the caller is meant to retry with
/// different tolerances, so `random_crystal` surfaces it as `Ok(None)`
/// rather than an error.
pub enum GenError {
    #[error("space group {0} is not in the range 1..=230")]
    InvalidSpaceGroup(u16),
    #[error("lattice box is infeasible for this space group's crystal family")]
    InvalidBox,
    #[error("no Wyckoff assignment exists for the requested species multiset")]
    Infeasible,
    #[error("failed to parse a Wyckoff or cell-filling coordinate template")]
    BadTemplate,
    #[error("static database has no entry for space group {0}")]
    BadDatabase(u16),
}
