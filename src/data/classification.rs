use crate::base::GenError;

/// The six crystal families a space-group number determines, and the
/// metric equality each imposes on the six lattice parameters before
/// sampling: which lengths and angles must be tied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrystalFamily {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Hexagonal,
    Cubic,
}

impl CrystalFamily {
    pub fn from_space_group(number: u16) -> Result<Self, GenError> {
        match number {
            1..=2 => Ok(CrystalFamily::Triclinic),
            3..=15 => Ok(CrystalFamily::Monoclinic),
            16..=74 => Ok(CrystalFamily::Orthorhombic),
            75..=142 => Ok(CrystalFamily::Tetragonal),
            143..=194 => Ok(CrystalFamily::Hexagonal),
            195..=230 => Ok(CrystalFamily::Cubic),
            other => Err(GenError::InvalidSpaceGroup(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, CrystalFamily::Triclinic)]
    #[case(2, CrystalFamily::Triclinic)]
    #[case(3, CrystalFamily::Monoclinic)]
    #[case(15, CrystalFamily::Monoclinic)]
    #[case(16, CrystalFamily::Orthorhombic)]
    #[case(74, CrystalFamily::Orthorhombic)]
    #[case(75, CrystalFamily::Tetragonal)]
    #[case(142, CrystalFamily::Tetragonal)]
    #[case(143, CrystalFamily::Hexagonal)]
    #[case(194, CrystalFamily::Hexagonal)]
    #[case(195, CrystalFamily::Cubic)]
    #[case(230, CrystalFamily::Cubic)]
    fn test_family_ranges(#[case] number: u16, #[case] expect: CrystalFamily) {
        assert_eq!(CrystalFamily::from_space_group(number).unwrap(), expect);
    }

    #[test]
    fn test_out_of_range() {
        assert!(CrystalFamily::from_space_group(0).is_err());
        assert!(CrystalFamily::from_space_group(231).is_err());
    }
}
