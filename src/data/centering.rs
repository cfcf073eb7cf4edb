use nalgebra::Vector3;
use strum_macros::EnumIter;

/// Bravais-lattice centering: the translational part of a space group's
/// symmetry beyond its point-group operations.
#[derive(Debug, Copy, Clone, PartialEq, EnumIter)]
pub enum Centering {
    P, // Primitive
    C, // C-face centered
    I, // Body centered
    F, // Face centered
    R, // Rhombohedral, obverse setting, hexagonal axes
}

impl Centering {
    /// Fractional-coordinate offsets, always starting with `(0,0,0)`.
    pub fn offsets(&self) -> Vec<Vector3<f64>> {
        match self {
            Centering::P => vec![Vector3::new(0.0, 0.0, 0.0)],
            Centering::C => vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.5, 0.5, 0.0),
            ],
            Centering::I => vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.5, 0.5, 0.5),
            ],
            Centering::F => vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.0, 0.5, 0.5),
                Vector3::new(0.5, 0.0, 0.5),
                Vector3::new(0.5, 0.5, 0.0),
            ],
            Centering::R => vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(2.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
                Vector3::new(1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0),
            ],
        }
    }

    pub fn order(&self) -> usize {
        match self {
            Centering::P => 1,
            Centering::C => 2,
            Centering::I => 2,
            Centering::F => 4,
            Centering::R => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_offsets_start_with_identity() {
        for centering in Centering::iter() {
            assert_relative_eq!(centering.offsets()[0].norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_order_matches_offset_count() {
        for centering in Centering::iter() {
            assert_eq!(centering.offsets().len(), centering.order());
        }
    }
}
