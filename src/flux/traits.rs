//! Trait-based Riemann flux abstraction.
//!
//! # Example
//! ```
//! use fr_rs::equations::LinearAdvection;
//! use fr_rs::flux::{RiemannFlux, RusanovFlux};
//!
//! let model = LinearAdvection::new_1d(1.0);
//! let flux = RusanovFlux.compute_flux(&model, &[2.0], &[1.0], &[1.0]);
//! // Upwinded: a * u_L
//! assert!((flux[0] - 2.0).abs() < 1e-14);
//! ```

use crate::equations::PhysicalFluxModel;

/// Common flux at a face from two extrapolated states.
///
/// The returned flux is F*·n with `unit_normal` pointing from the LEFT
/// state into the RIGHT state.
///
/// # Implementation Notes
///
/// - Fluxes must be consistent: F*(q, q; n) = F(q)·n
/// - Fluxes must be conservative: F*(q_l, q_r; n) = -F*(q_r, q_l; -n)
pub trait RiemannFlux<M: PhysicalFluxModel>: Send + Sync {
    /// Compute the common normal flux.
    fn compute_flux(&self, model: &M, left: &[f64], right: &[f64], unit_normal: &[f64])
    -> Vec<f64>;

    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;
}

/// Rusanov (local Lax-Friedrichs) flux.
///
/// F* = ½(F_L + F_R) - ½ λ_max (q_R - q_L)
///
/// Simple and robust but diffusive.
#[derive(Clone, Copy, Debug, Default)]
pub struct RusanovFlux;

impl<M: PhysicalFluxModel> RiemannFlux<M> for RusanovFlux {
    fn compute_flux(
        &self,
        model: &M,
        left: &[f64],
        right: &[f64],
        unit_normal: &[f64],
    ) -> Vec<f64> {
        let data_l = model.physical_data(left);
        let data_r = model.physical_data(right);
        let f_l = model.flux(&data_l, unit_normal);
        let f_r = model.flux(&data_r, unit_normal);
        let lambda = model
            .max_abs_eigenvalue(&data_l, unit_normal)
            .max(model.max_abs_eigenvalue(&data_r, unit_normal));

        f_l.iter()
            .zip(&f_r)
            .zip(left.iter().zip(right))
            .map(|((fl, fr), (ql, qr))| 0.5 * (fl + fr) - 0.5 * lambda * (qr - ql))
            .collect()
    }

    fn name(&self) -> &'static str {
        "rusanov"
    }
}

/// Central flux F* = ½(F_L + F_R).
///
/// Non-dissipative; mostly useful for testing.
#[derive(Clone, Copy, Debug, Default)]
pub struct CentralFlux;

impl<M: PhysicalFluxModel> RiemannFlux<M> for CentralFlux {
    fn compute_flux(
        &self,
        model: &M,
        left: &[f64],
        right: &[f64],
        unit_normal: &[f64],
    ) -> Vec<f64> {
        let f_l = model.state_flux(left, unit_normal);
        let f_r = model.state_flux(right, unit_normal);
        f_l.iter().zip(&f_r).map(|(fl, fr)| 0.5 * (fl + fr)).collect()
    }

    fn name(&self) -> &'static str {
        "central"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::{Burgers1D, Euler, LinearAdvection};

    fn assert_consistent<M: PhysicalFluxModel, F: RiemannFlux<M>>(
        flux: &F,
        model: &M,
        q: &[f64],
        n: &[f64],
    ) {
        let common = flux.compute_flux(model, q, q, n);
        let exact = model.state_flux(q, n);
        for (c, e) in common.iter().zip(&exact) {
            assert!(
                (c - e).abs() < 1e-12,
                "{} flux should be consistent: {} vs {}",
                flux.name(),
                c,
                e
            );
        }
    }

    #[test]
    fn test_consistency() {
        let euler = Euler::air(2);
        let q = euler.conservative_from_primitive(1.1, &[0.3, -0.2], 0.9);
        let n = [0.6, -0.8];
        assert_consistent(&RusanovFlux, &euler, &q, &n);
        assert_consistent(&CentralFlux, &euler, &q, &n);

        let burgers = Burgers1D::new();
        assert_consistent(&RusanovFlux, &burgers, &[-0.7], &[1.0]);
    }

    #[test]
    fn test_conservation() {
        let euler = Euler::air(2);
        let q_l = euler.conservative_from_primitive(1.0, &[0.5, 0.1], 1.0);
        let q_r = euler.conservative_from_primitive(0.5, &[-0.2, 0.3], 0.4);
        let n = [0.8, 0.6];
        let minus_n = [-0.8, -0.6];

        let forward = RusanovFlux.compute_flux(&euler, &q_l, &q_r, &n);
        let backward = RusanovFlux.compute_flux(&euler, &q_r, &q_l, &minus_n);
        for (f, b) in forward.iter().zip(&backward) {
            assert!((f + b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rusanov_upwinds_linear_advection() {
        let model = LinearAdvection::new_1d(-2.0);
        let flux = RusanovFlux.compute_flux(&model, &[1.0], &[3.0], &[1.0]);
        // Leftward wind: a * u_R
        assert!((flux[0] + 6.0).abs() < 1e-14);

        let central = CentralFlux.compute_flux(&model, &[1.0], &[3.0], &[1.0]);
        assert!((central[0] + 4.0).abs() < 1e-14);
    }
}
