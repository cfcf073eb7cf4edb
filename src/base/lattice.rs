use std::cell::RefCell;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use super::error::GenError;

/// Six lattice parameters: `(a, b, c, alpha, beta, gamma)` with lengths in
/// Ångström and angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl LatticeParams {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }
}

/// A crystal lattice, stored as its six scalar parameters.
///
/// The fractional-to-Cartesian conversion matrix is a pure function of
/// `params`; it is computed on first use and cached, the cache invalidated
/// whenever `params` is replaced. Modeled as a lattice-owned derived value
/// rather than a cache shared back-and-forth with the crystal that uses it,
/// so there is no cyclic ownership to reason about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lattice {
    params: LatticeParams,
    #[serde(skip)]
    cart_conv: RefCell<Option<Matrix3<f64>>>,
}

impl Lattice {
    pub fn new(params: LatticeParams) -> Self {
        Self {
            params,
            cart_conv: RefCell::new(None),
        }
    }

    pub fn params(&self) -> LatticeParams {
        self.params
    }

    pub fn set_params(&mut self, params: LatticeParams) {
        self.params = params;
        *self.cart_conv.borrow_mut() = None;
    }

    /// Unit-cell volume, in units of Å³.
    pub fn volume(&self) -> f64 {
        let p = self.params;
        let (alpha, beta, gamma) = (p.alpha.to_radians(), p.beta.to_radians(), p.gamma.to_radians());
        let unit_volume = (1.0 - alpha.cos().powi(2) - beta.cos().powi(2) - gamma.cos().powi(2)
            + 2.0 * alpha.cos() * beta.cos() * gamma.cos())
        .max(0.0)
        .sqrt();
        p.a * p.b * p.c * unit_volume
    }

    /// Fractional-to-Cartesian conversion matrix, cached. Standard
    /// lower-triangular lattice-vector construction with `a` along x and
    /// `b` in the xy-plane.
    pub fn cartesian_matrix(&self) -> Matrix3<f64> {
        if let Some(m) = *self.cart_conv.borrow() {
            return m;
        }
        let p = self.params;
        let (alpha, beta, gamma) = (p.alpha.to_radians(), p.beta.to_radians(), p.gamma.to_radians());
        let unit_volume = (1.0 - alpha.cos().powi(2) - beta.cos().powi(2) - gamma.cos().powi(2)
            + 2.0 * alpha.cos() * beta.cos() * gamma.cos())
        .max(0.0)
        .sqrt();
        #[rustfmt::skip]
        let m = Matrix3::new(
            p.a, p.b * gamma.cos(), p.c * beta.cos(),
            0.0, p.b * gamma.sin(), p.c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin(),
            0.0, 0.0, p.c * unit_volume / gamma.sin(),
        );
        *self.cart_conv.borrow_mut() = Some(m);
        m
    }

    pub fn cartesian_coords(&self, fractional: &Vector3<f64>) -> Vector3<f64> {
        self.cartesian_matrix() * fractional
    }

    /// Multiply `a`, `b`, `c` by `(new_volume / volume()).cbrt()`, leaving
    /// angles unchanged.
    pub fn rescale_volume(&mut self, new_volume: f64) -> Result<(), GenError> {
        if new_volume <= 0.0 {
            return Err(GenError::InvalidBox);
        }
        let factor = (new_volume / self.volume()).cbrt();
        let mut p = self.params;
        p.a *= factor;
        p.b *= factor;
        p.c *= factor;
        self.set_params(p);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_volume() {
        let lattice = Lattice::new(LatticeParams::new(2.0, 2.0, 2.0, 90.0, 90.0, 90.0));
        assert_relative_eq!(lattice.volume(), 8.0, epsilon = 1e-8);
    }

    #[test]
    fn test_cache_invalidated_on_set_params() {
        let mut lattice = Lattice::new(LatticeParams::new(1.0, 1.0, 1.0, 90.0, 90.0, 90.0));
        let m1 = lattice.cartesian_matrix();
        lattice.set_params(LatticeParams::new(2.0, 2.0, 2.0, 90.0, 90.0, 90.0));
        let m2 = lattice.cartesian_matrix();
        assert!((m1 - m2).norm() > 1e-6);
    }

    #[test]
    fn test_rescale_volume() {
        let mut lattice = Lattice::new(LatticeParams::new(2.0, 2.0, 2.0, 90.0, 90.0, 90.0));
        lattice.rescale_volume(64.0).unwrap();
        assert_relative_eq!(lattice.volume(), 64.0, epsilon = 1e-6);
    }
}
