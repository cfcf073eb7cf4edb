/// Tolerance used by `Crystal::same_position` and the IAD checks.
pub const POSITION_EPS: f64 = 1e-5;

/// Verbosity levels accepted by the options-file grammar (`verbosity =
/// n|r|v`). The core only uses this to decide whether per-attempt failures
/// are logged at `debug` level; routing is the driver's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Verbosity {
    #[default]
    Normal,
    Reduced,
    Verbose,
}
