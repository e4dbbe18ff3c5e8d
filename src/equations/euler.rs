//! Compressible Euler equations for an ideal gas.
//!
//! Conservative variables q = (ρ, ρu_1, .., ρu_d, ρE) in d = 1, 2 or 3
//! dimensions:
//!
//! ∂ρ/∂t   + ∇·(ρu)         = 0
//! ∂ρu/∂t  + ∇·(ρu⊗u + pI)  = 0
//! ∂ρE/∂t  + ∇·((ρE + p)u)  = 0
//!
//! with p = (γ - 1)(ρE - ρ|u|²/2).

use super::{PhysicalFluxModel, dot, norm};

/// Ideal-gas Euler equations.
#[derive(Clone, Debug)]
pub struct Euler {
    /// Ratio of specific heats
    pub gamma: f64,
    dim: usize,
}

/// Derived quantities of an Euler state.
#[derive(Clone, Debug, PartialEq)]
pub struct EulerData {
    /// Density
    pub rho: f64,
    /// Velocity (first `dim` entries used)
    pub vel: [f64; 3],
    /// Pressure
    pub p: f64,
    /// Speed of sound
    pub a: f64,
    /// Total specific enthalpy (ρE + p) / ρ
    pub h: f64,
}

impl Euler {
    /// Create the Euler equations with the given γ and dimension.
    pub fn new(gamma: f64, dim: usize) -> Self {
        assert!((1..=3).contains(&dim), "Euler dimension must be 1, 2 or 3");
        assert!(gamma > 1.0, "Ratio of specific heats must exceed 1");
        Self { gamma, dim }
    }

    /// Air (γ = 1.4).
    pub fn air(dim: usize) -> Self {
        Self::new(1.4, dim)
    }

    /// Conservative state from density, velocity and pressure.
    pub fn conservative_from_primitive(&self, rho: f64, vel: &[f64], p: f64) -> Vec<f64> {
        debug_assert_eq!(vel.len(), self.dim);
        let mut q = Vec::with_capacity(self.dim + 2);
        q.push(rho);
        q.extend(vel.iter().map(|u| rho * u));
        let kinetic = 0.5 * rho * dot(vel, vel);
        q.push(p / (self.gamma - 1.0) + kinetic);
        q
    }

    /// Pressure of a conservative state.
    pub fn pressure(&self, state: &[f64]) -> f64 {
        self.physical_data(state).p
    }
}

impl PhysicalFluxModel for Euler {
    type PhysicalData = EulerData;

    fn n_eqs(&self) -> usize {
        self.dim + 2
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn physical_data(&self, state: &[f64]) -> EulerData {
        debug_assert_eq!(state.len(), self.n_eqs());
        let rho = state[0];
        let mut vel = [0.0; 3];
        for (d, v) in vel.iter_mut().take(self.dim).enumerate() {
            *v = state[d + 1] / rho;
        }
        let rho_e = state[self.dim + 1];
        let kinetic = 0.5 * rho * dot(&vel, &vel);
        let p = (self.gamma - 1.0) * (rho_e - kinetic);
        let a = (self.gamma * p / rho).sqrt();
        let h = (rho_e + p) / rho;
        EulerData { rho, vel, p, a, h }
    }

    fn flux(&self, data: &EulerData, direction: &[f64]) -> Vec<f64> {
        let vn = dot(&data.vel[..self.dim], direction);
        let mass = data.rho * vn;

        let mut flux = Vec::with_capacity(self.n_eqs());
        flux.push(mass);
        for d in 0..self.dim {
            flux.push(mass * data.vel[d] + data.p * direction[d]);
        }
        flux.push(mass * data.h);
        flux
    }

    fn max_abs_eigenvalue(&self, data: &EulerData, direction: &[f64]) -> f64 {
        let vn = dot(&data.vel[..self.dim], direction);
        vn.abs() + data.a * norm(direction)
    }
}
