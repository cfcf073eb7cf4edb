use rand::Rng;

use crate::base::{GenError, Lattice, LatticeParams};
use crate::data::CrystalFamily;

const MAX_RETRIES: u32 = 1000;

fn require_point(min: f64, max: f64, value: f64) -> Result<f64, GenError> {
    if value < min || value > max {
        return Err(GenError::InvalidBox);
    }
    Ok(value)
}

fn intersect(min1: f64, max1: f64, min2: f64, max2: f64) -> Result<(f64, f64), GenError> {
    let lo = min1.max(min2);
    let hi = max1.min(max2);
    if lo > hi {
        return Err(GenError::InvalidBox);
    }
    Ok((lo, hi))
}

fn intersect3(
    min1: f64,
    max1: f64,
    min2: f64,
    max2: f64,
    min3: f64,
    max3: f64,
) -> Result<(f64, f64), GenError> {
    let (lo, hi) = intersect(min1, max1, min2, max2)?;
    intersect(lo, hi, min3, max3)
}

fn sample(rng: &mut impl Rng, lo: f64, hi: f64) -> Result<f64, GenError> {
    if lo > hi {
        return Err(GenError::InvalidBox);
    }
    Ok(rng.gen_range(lo..=hi))
}

/// Draw one lattice satisfying `g`'s crystal-family metric equalities
/// within `[mins, maxes]`. Returns `Ok(None)` once 1,000 volume-rescale
/// retries are exhausted; returns `Err(InvalidBox)` if the family equalities
/// make the box empty before any sampling begins.
pub fn sample_lattice(
    g: u16,
    mins: LatticeParams,
    maxes: LatticeParams,
    min_volume: Option<f64>,
    max_volume: Option<f64>,
    rng: &mut impl Rng,
) -> Result<Option<Lattice>, GenError> {
    let family = CrystalFamily::from_space_group(g)?;

    for _ in 0..MAX_RETRIES {
        let params = match family {
            CrystalFamily::Triclinic => LatticeParams::new(
                sample(rng, mins.a, maxes.a)?,
                sample(rng, mins.b, maxes.b)?,
                sample(rng, mins.c, maxes.c)?,
                sample(rng, mins.alpha, maxes.alpha)?,
                sample(rng, mins.beta, maxes.beta)?,
                sample(rng, mins.gamma, maxes.gamma)?,
            ),
            CrystalFamily::Monoclinic => {
                let alpha = require_point(mins.alpha, maxes.alpha, 90.0)?;
                let gamma = require_point(mins.gamma, maxes.gamma, 90.0)?;
                LatticeParams::new(
                    sample(rng, mins.a, maxes.a)?,
                    sample(rng, mins.b, maxes.b)?,
                    sample(rng, mins.c, maxes.c)?,
                    alpha,
                    sample(rng, mins.beta, maxes.beta)?,
                    gamma,
                )
            }
            CrystalFamily::Orthorhombic => {
                let alpha = require_point(mins.alpha, maxes.alpha, 90.0)?;
                let beta = require_point(mins.beta, maxes.beta, 90.0)?;
                let gamma = require_point(mins.gamma, maxes.gamma, 90.0)?;
                LatticeParams::new(
                    sample(rng, mins.a, maxes.a)?,
                    sample(rng, mins.b, maxes.b)?,
                    sample(rng, mins.c, maxes.c)?,
                    alpha,
                    beta,
                    gamma,
                )
            }
            CrystalFamily::Tetragonal => {
                let alpha = require_point(mins.alpha, maxes.alpha, 90.0)?;
                let beta = require_point(mins.beta, maxes.beta, 90.0)?;
                let gamma = require_point(mins.gamma, maxes.gamma, 90.0)?;
                let (lo, hi) = intersect(mins.a, maxes.a, mins.b, maxes.b)?;
                let ab = sample(rng, lo, hi)?;
                LatticeParams::new(ab, ab, sample(rng, mins.c, maxes.c)?, alpha, beta, gamma)
            }
            CrystalFamily::Hexagonal => {
                // Always the hexagonal-axes setting; rhombohedral-axis
                // trigonal cells are deliberately not supported.
                let alpha = require_point(mins.alpha, maxes.alpha, 90.0)?;
                let beta = require_point(mins.beta, maxes.beta, 90.0)?;
                let gamma = require_point(mins.gamma, maxes.gamma, 120.0)?;
                let (lo, hi) = intersect(mins.a, maxes.a, mins.b, maxes.b)?;
                let ab = sample(rng, lo, hi)?;
                LatticeParams::new(ab, ab, sample(rng, mins.c, maxes.c)?, alpha, beta, gamma)
            }
            CrystalFamily::Cubic => {
                let alpha = require_point(mins.alpha, maxes.alpha, 90.0)?;
                let beta = require_point(mins.beta, maxes.beta, 90.0)?;
                let gamma = require_point(mins.gamma, maxes.gamma, 90.0)?;
                let (lo, hi) = intersect3(mins.a, maxes.a, mins.b, maxes.b, mins.c, maxes.c)?;
                let abc = sample(rng, lo, hi)?;
                LatticeParams::new(abc, abc, abc, alpha, beta, gamma)
            }
        };

        let mut lattice = Lattice::new(params);

        if let (Some(min_v), Some(max_v)) = (min_volume, max_volume) {
            let current = lattice.volume();
            if current < min_v || current > max_v {
                let target = sample(rng, min_v, max_v)?;
                if lattice.rescale_volume(target).is_err() {
                    continue;
                }
                let rescaled = lattice.params();
                let in_box = (mins.a..=maxes.a).contains(&rescaled.a)
                    && (mins.b..=maxes.b).contains(&rescaled.b)
                    && (mins.c..=maxes.c).contains(&rescaled.c);
                if !in_box {
                    continue;
                }
            }
        }

        return Ok(Some(lattice));
    }

    Ok(None)
}
