//! Inviscid Burgers equation.
//!
//! ∂u/∂t + ∂(u²/2)/∂x = 0

use super::PhysicalFluxModel;

/// 1D inviscid Burgers equation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Burgers1D;

impl Burgers1D {
    pub fn new() -> Self {
        Self
    }
}

impl PhysicalFluxModel for Burgers1D {
    type PhysicalData = f64;

    fn n_eqs(&self) -> usize {
        1
    }

    fn dim(&self) -> usize {
        1
    }

    fn physical_data(&self, state: &[f64]) -> f64 {
        debug_assert_eq!(state.len(), 1);
        state[0]
    }

    fn flux(&self, u: &f64, direction: &[f64]) -> Vec<f64> {
        vec![0.5 * u * u * direction[0]]
    }

    fn max_abs_eigenvalue(&self, u: &f64, direction: &[f64]) -> f64 {
        (u * direction[0]).abs()
    }
}
