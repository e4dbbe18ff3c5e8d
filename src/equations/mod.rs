//! Physical flux models.
//!
//! A model maps a state vector to its physical flux projected on a
//! direction, and to the largest absolute eigenvalue of the flux Jacobian
//! in that direction:
//!
//! ∂q/∂t + ∇·F(q) = 0,    F_n(q) = F(q)·n
//!
//! The direction is not necessarily a unit vector. The residual projects
//! fluxes on mapped-coordinate normals whose length carries the local
//! metric, so both `flux` and `max_abs_eigenvalue` scale linearly with
//! `|n|`.

mod advection;
mod burgers;
mod euler;

pub use advection::LinearAdvection;
pub use burgers::Burgers1D;
pub use euler::{Euler, EulerData};

/// A hyperbolic conservation law with a projected physical flux.
///
/// Evaluation is split in two steps, like an update variable set: first
/// the derived quantities of a state are computed once
/// ([`physical_data`](Self::physical_data)), then fluxes and eigenvalues
/// are evaluated from them for as many directions as needed.
pub trait PhysicalFluxModel: Clone + Send + Sync {
    /// Derived quantities of one state (velocity, pressure, ...).
    type PhysicalData: Clone + Send + Sync;

    /// Number of conserved variables.
    fn n_eqs(&self) -> usize;

    /// Spatial dimension.
    fn dim(&self) -> usize;

    /// Compute the derived quantities of a state.
    fn physical_data(&self, state: &[f64]) -> Self::PhysicalData;

    /// Physical flux projected on `direction`, length `n_eqs`.
    fn flux(&self, data: &Self::PhysicalData, direction: &[f64]) -> Vec<f64>;

    /// Largest absolute eigenvalue of the flux Jacobian along `direction`.
    fn max_abs_eigenvalue(&self, data: &Self::PhysicalData, direction: &[f64]) -> f64;

    /// Convenience: projected flux straight from a state.
    fn state_flux(&self, state: &[f64], direction: &[f64]) -> Vec<f64> {
        self.flux(&self.physical_data(state), direction)
    }
}

/// Dot product of two direction-sized slices.
#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
#[inline]
pub(crate) fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}
