use serde::{Deserialize, Serialize};

use crate::data::RadiiOracle;

use super::lattice::LatticeParams;
use super::tolerance::Verbosity;

/// The request record the driver builds and `random_crystal` consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub spacegroup: u16,
    pub atoms: Vec<u32>,
    pub lattice_mins: LatticeParams,
    pub lattice_maxes: LatticeParams,
    pub iad_scaling: f64,
    pub min_radius: f64,
    pub manual_radii: Vec<(u32, f64)>,
    pub min_volume: Option<f64>,
    pub max_volume: Option<f64>,
    pub forced_letters: Vec<(u32, char)>,
    pub verbosity: Verbosity,
    pub max_attempts: u32,
    pub force_general: bool,
}

impl GenerationRequest {
    pub fn new(
        spacegroup: u16,
        atoms: Vec<u32>,
        lattice_mins: LatticeParams,
        lattice_maxes: LatticeParams,
    ) -> Self {
        Self {
            spacegroup,
            atoms,
            lattice_mins,
            lattice_maxes,
            iad_scaling: 1.0,
            min_radius: 0.0,
            manual_radii: vec![],
            min_volume: None,
            max_volume: None,
            forced_letters: vec![],
            verbosity: Verbosity::default(),
            max_attempts: 100,
            force_general: true,
        }
    }

    /// Builds the request-scoped `RadiiOracle` from `iad_scaling`,
    /// `min_radius` and `manual_radii`. Kept as an explicit, immutable value
    /// rather than a process-global mutable table so concurrent requests
    /// never interfere with each other's tuning.
    pub fn radii_oracle(&self) -> RadiiOracle {
        RadiiOracle::new(self.iad_scaling, self.min_radius, &self.manual_radii)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let mins = LatticeParams::new(4.0, 4.0, 4.0, 90.0, 90.0, 90.0);
        let maxes = mins;
        let request = GenerationRequest::new(1, vec![1, 1], mins, maxes);
        assert_relative_eq!(request.iad_scaling, 1.0);
        assert_relative_eq!(request.min_radius, 0.0);
        assert_eq!(request.max_attempts, 100);
        assert!(request.force_general);
        assert!(request.min_volume.is_none());
    }

    #[test]
    fn test_json_roundtrip_preserves_every_field() {
        let mins = LatticeParams::new(4.0, 4.5, 5.0, 90.0, 90.0, 90.0);
        let maxes = LatticeParams::new(6.0, 6.5, 7.0, 90.0, 90.0, 90.0);
        let mut request = GenerationRequest::new(225, vec![11, 17], mins, maxes);
        request.iad_scaling = 0.8;
        request.min_radius = 0.3;
        request.manual_radii = vec![(11, 1.1), (17, 1.0)];
        request.min_volume = Some(100.0);
        request.max_volume = Some(300.0);
        request.forced_letters = vec![(11, 'a')];
        request.verbosity = Verbosity::Verbose;
        request.max_attempts = 50;
        request.force_general = false;

        let json = serde_json::to_string(&request).unwrap();
        let roundtripped: GenerationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, roundtripped);
    }
}
