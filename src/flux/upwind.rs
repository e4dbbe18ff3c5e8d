//! Exact upwind fluxes for scalar laws.
//!
//! For linear advection the flux is taken from the side the wind blows
//! from. For Burgers the exact Godunov flux is used:
//!
//! F* = max(f(max(u_L, 0)), f(min(u_R, 0)))   if u_L > u_R (shock)
//! F* = min(f(u_L), f(u_R))                    otherwise
//!
//! written for the normal-projected flux (n·e_x = ±1).

use super::RiemannFlux;
use crate::equations::{Burgers1D, LinearAdvection};

/// Exact upwind flux.
#[derive(Clone, Copy, Debug, Default)]
pub struct UpwindFlux;

impl RiemannFlux<LinearAdvection> for UpwindFlux {
    fn compute_flux(
        &self,
        model: &LinearAdvection,
        left: &[f64],
        right: &[f64],
        unit_normal: &[f64],
    ) -> Vec<f64> {
        let an = model.normal_velocity(unit_normal);
        let upwind = if an >= 0.0 { left[0] } else { right[0] };
        vec![an * upwind]
    }

    fn name(&self) -> &'static str {
        "upwind"
    }
}

impl RiemannFlux<Burgers1D> for UpwindFlux {
    fn compute_flux(
        &self,
        _model: &Burgers1D,
        left: &[f64],
        right: &[f64],
        unit_normal: &[f64],
    ) -> Vec<f64> {
        // Project onto the normal: v = n u turns the problem into a
        // standard Burgers problem along n
        let n = unit_normal[0];
        let v_l = n * left[0];
        let v_r = n * right[0];
        let f = |v: f64| 0.5 * v * v;

        let godunov = if v_l > v_r {
            f(v_l.max(0.0)).max(f(v_r.min(0.0)))
        } else if v_l > 0.0 {
            f(v_l)
        } else if v_r < 0.0 {
            f(v_r)
        } else {
            0.0
        };
        // Flux of v along n back to flux of u: divide by n = ±1
        vec![godunov * n]
    }

    fn name(&self) -> &'static str {
        "upwind"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::PhysicalFluxModel;

    #[test]
    fn test_upwind_direction() {
        let model = LinearAdvection::new_1d(1.5);
        let flux = UpwindFlux.compute_flux(&model, &[2.0], &[5.0], &[1.0]);
        assert!((flux[0] - 3.0).abs() < 1e-14);

        // Same face seen from the other side
        let flux = UpwindFlux.compute_flux(&model, &[5.0], &[2.0], &[-1.0]);
        assert!((flux[0] + 3.0).abs() < 1e-14);
    }

    #[test]
    fn test_upwind_2d_oblique() {
        let model = LinearAdvection::new_2d(1.0, 1.0);
        let n = [std::f64::consts::FRAC_1_SQRT_2, -std::f64::consts::FRAC_1_SQRT_2];
        // a·n = 0: zero flux whichever state is picked
        let flux = UpwindFlux.compute_flux(&model, &[1.0], &[2.0], &n);
        assert!(flux[0].abs() < 1e-14);
    }

    #[test]
    fn test_burgers_godunov() {
        let model = Burgers1D::new();
        // Rarefaction through zero: sonic point, zero flux
        let flux = UpwindFlux.compute_flux(&model, &[-1.0], &[1.0], &[1.0]);
        assert!(flux[0].abs() < 1e-14);

        // Right-moving shock takes the left flux
        let flux = UpwindFlux.compute_flux(&model, &[2.0], &[1.0], &[1.0]);
        assert!((flux[0] - 2.0).abs() < 1e-14);

        // Consistency on both normal orientations
        for n in [1.0, -1.0] {
            for u in [-1.3, 0.4] {
                let flux = UpwindFlux.compute_flux(&model, &[u], &[u], &[n]);
                assert!((flux[0] - model.state_flux(&[u], &[n])[0]).abs() < 1e-14);
            }
        }
    }
}
