//! Linear advection.
//!
//! ∂u/∂t + ∇·(a u) = 0
//!
//! with a constant velocity vector a of any dimension.

use super::{PhysicalFluxModel, dot};

/// Scalar linear advection with constant velocity.
#[derive(Clone, Debug)]
pub struct LinearAdvection {
    /// Advection velocity, one component per dimension
    pub velocity: Vec<f64>,
}

impl LinearAdvection {
    /// Create a model with the given velocity vector.
    pub fn new(velocity: Vec<f64>) -> Self {
        assert!(!velocity.is_empty(), "Velocity needs at least one component");
        Self { velocity }
    }

    /// 1D advection with speed `a`.
    pub fn new_1d(a: f64) -> Self {
        Self::new(vec![a])
    }

    /// 2D advection with velocity (ax, ay).
    pub fn new_2d(ax: f64, ay: f64) -> Self {
        Self::new(vec![ax, ay])
    }

    /// Normal velocity a·n.
    #[inline]
    pub fn normal_velocity(&self, direction: &[f64]) -> f64 {
        dot(&self.velocity, direction)
    }
}

impl PhysicalFluxModel for LinearAdvection {
    type PhysicalData = f64;

    fn n_eqs(&self) -> usize {
        1
    }

    fn dim(&self) -> usize {
        self.velocity.len()
    }

    fn physical_data(&self, state: &[f64]) -> f64 {
        debug_assert_eq!(state.len(), 1);
        state[0]
    }

    fn flux(&self, u: &f64, direction: &[f64]) -> Vec<f64> {
        vec![self.normal_velocity(direction) * u]
    }

    fn max_abs_eigenvalue(&self, _u: &f64, direction: &[f64]) -> f64 {
        self.normal_velocity(direction).abs()
    }
}
