//! Roe approximate Riemann solver for the Euler equations.
//!
//! The Roe solver linearizes the Riemann problem at each interface using
//! Roe-averaged states:
//!
//! F* = ½(F_L + F_R) - ½ Σ |λ_k| α_k r_k
//!
//! The dissipation is assembled in the normal-velocity form (acoustic
//! waves λ = V ∓ c, entropy and shear waves λ = V), which is valid in any
//! dimension. Small eigenvalues are smoothed with Harten's entropy fix.
//!
//! Reference: Blazek, "Computational Fluid Dynamics: Principles and
//! Applications", §4.3.3

use super::RiemannFlux;
use crate::equations::{Euler, PhysicalFluxModel, dot};

/// Default Harten entropy fix, as a fraction of the Roe sound speed.
pub const DEFAULT_ENTROPY_FIX: f64 = 0.1;

/// Roe flux with Harten entropy fix.
#[derive(Clone, Copy, Debug)]
pub struct RoeFlux {
    /// Width of the entropy fix relative to the Roe-averaged sound speed
    pub entropy_fix: f64,
}

impl Default for RoeFlux {
    fn default() -> Self {
        Self {
            entropy_fix: DEFAULT_ENTROPY_FIX,
        }
    }
}

impl RoeFlux {
    pub fn new(entropy_fix: f64) -> Self {
        Self { entropy_fix }
    }

    /// Harten's smoothing of |λ| near zero.
    #[inline]
    fn harten(&self, lambda: f64, delta: f64) -> f64 {
        let abs = lambda.abs();
        if abs < delta {
            (lambda * lambda + delta * delta) / (2.0 * delta)
        } else {
            abs
        }
    }
}

impl RiemannFlux<Euler> for RoeFlux {
    fn compute_flux(
        &self,
        model: &Euler,
        left: &[f64],
        right: &[f64],
        unit_normal: &[f64],
    ) -> Vec<f64> {
        let dim = model.dim();
        let n_eqs = model.n_eqs();
        let gm1 = model.gamma - 1.0;

        let data_l = model.physical_data(left);
        let data_r = model.physical_data(right);
        let f_l = model.flux(&data_l, unit_normal);
        let f_r = model.flux(&data_r, unit_normal);

        // Roe averages
        let sqrt_l = data_l.rho.sqrt();
        let sqrt_r = data_r.rho.sqrt();
        let inv_sum = 1.0 / (sqrt_l + sqrt_r);
        let rho = sqrt_l * sqrt_r;
        let mut vel = [0.0; 3];
        for d in 0..dim {
            vel[d] = (sqrt_l * data_l.vel[d] + sqrt_r * data_r.vel[d]) * inv_sum;
        }
        let h = (sqrt_l * data_l.h + sqrt_r * data_r.h) * inv_sum;
        let q2 = dot(&vel[..dim], &vel[..dim]);
        let c = (gm1 * (h - 0.5 * q2)).max(f64::MIN_POSITIVE).sqrt();
        let vn = dot(&vel[..dim], unit_normal);

        // Jumps
        let d_rho = data_r.rho - data_l.rho;
        let d_p = data_r.p - data_l.p;
        let mut d_vel = [0.0; 3];
        for d in 0..dim {
            d_vel[d] = data_r.vel[d] - data_l.vel[d];
        }
        let d_vn = dot(&d_vel[..dim], unit_normal);

        let delta = self.entropy_fix * c;
        let lambda_minus = self.harten(vn - c, delta);
        let lambda_mid = self.harten(vn, delta);
        let lambda_plus = self.harten(vn + c, delta);

        let c2 = c * c;
        let alpha_minus = lambda_minus * (d_p - rho * c * d_vn) / (2.0 * c2);
        let alpha_plus = lambda_plus * (d_p + rho * c * d_vn) / (2.0 * c2);
        let alpha_entropy = lambda_mid * (d_rho - d_p / c2);

        let mut dissipation = vec![0.0; n_eqs];

        // Acoustic waves
        dissipation[0] += alpha_minus + alpha_plus;
        for d in 0..dim {
            dissipation[d + 1] += alpha_minus * (vel[d] - c * unit_normal[d])
                + alpha_plus * (vel[d] + c * unit_normal[d]);
        }
        dissipation[dim + 1] += alpha_minus * (h - c * vn) + alpha_plus * (h + c * vn);

        // Entropy wave
        dissipation[0] += alpha_entropy;
        for d in 0..dim {
            dissipation[d + 1] += alpha_entropy * vel[d];
        }
        dissipation[dim + 1] += alpha_entropy * 0.5 * q2;

        // Shear waves
        let mut shear_energy = 0.0;
        for d in 0..dim {
            let shear = d_vel[d] - d_vn * unit_normal[d];
            dissipation[d + 1] += lambda_mid * rho * shear;
            shear_energy += vel[d] * d_vel[d];
        }
        dissipation[dim + 1] += lambda_mid * rho * (shear_energy - vn * d_vn);

        f_l.iter()
            .zip(&f_r)
            .zip(&dissipation)
            .map(|((fl, fr), diss)| 0.5 * (fl + fr - diss))
            .collect()
    }

    fn name(&self) -> &'static str {
        "roe"
    }
}
