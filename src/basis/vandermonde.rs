//! 1D Vandermonde matrix and Lagrange interpolation at solution points.
//!
//! V[i,j] = φ_j(r_i) with φ_j the normalized Legendre polynomial
//! sqrt((2j+1)/2) P_j. The Lagrange polynomial ℓ_j attached to solution
//! point r_j is then
//!
//! ℓ_j(x) = Σ_k φ_k(x) V^{-1}[k,j]
//!
//! which lets us evaluate the solution polynomial (and its derivative) at
//! flux points or any other mapped coordinate without building the
//! Lagrange products explicitly.

use crate::polynomial::legendre_and_derivative;
use faer::{Mat, linalg::solvers::Solve};

/// 1D Vandermonde matrix on a solution point set, and its inverse.
#[derive(Clone)]
pub struct Vandermonde1D {
    /// V[i,j] = φ_j(r_i)
    pub v: Mat<f64>,
    /// V^{-1}
    pub v_inv: Mat<f64>,
    /// Solution point coordinates r_i
    pub nodes: Vec<f64>,
}

impl Vandermonde1D {
    /// Build the Vandermonde matrix for the given solution points.
    ///
    /// The polynomial degree is `nodes.len() - 1`.
    pub fn new(nodes: &[f64]) -> Self {
        let n = nodes.len();
        assert!(n > 0, "Need at least one solution point");

        let mut v = Mat::zeros(n, n);
        for (i, &r) in nodes.iter().enumerate() {
            let row = normalized_modes(n, r);
            for j in 0..n {
                v[(i, j)] = row[j].0;
            }
        }

        let lu = v.as_ref().full_piv_lu();
        let mut v_inv = Mat::zeros(n, n);
        for j in 0..n {
            let mut rhs = Mat::zeros(n, 1);
            rhs[(j, 0)] = 1.0;
            let col = lu.solve(&rhs);
            for i in 0..n {
                v_inv[(i, j)] = col[(i, 0)];
            }
        }

        Self {
            v,
            v_inv,
            nodes: nodes.to_vec(),
        }
    }

    /// Number of solution points.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Lagrange basis values ℓ_j(x) and derivatives ℓ'_j(x) at one point.
    pub fn lagrange_at(&self, x: f64) -> (Vec<f64>, Vec<f64>) {
        let n = self.n_nodes();
        let modes = normalized_modes(n, x);

        let mut vals = vec![0.0; n];
        let mut derivs = vec![0.0; n];
        for j in 0..n {
            for (k, &(phi, dphi)) in modes.iter().enumerate() {
                vals[j] += phi * self.v_inv[(k, j)];
                derivs[j] += dphi * self.v_inv[(k, j)];
            }
        }
        (vals, derivs)
    }

    /// Interpolation matrix I[p,j] = ℓ_j(x_p).
    pub fn interpolation_matrix(&self, points: &[f64]) -> Mat<f64> {
        let n = self.n_nodes();
        let mut interp = Mat::zeros(points.len(), n);
        for (p, &x) in points.iter().enumerate() {
            let (vals, _) = self.lagrange_at(x);
            for j in 0..n {
                interp[(p, j)] = vals[j];
            }
        }
        interp
    }

    /// Derivative matrix D[p,j] = ℓ'_j(x_p).
    pub fn derivative_matrix(&self, points: &[f64]) -> Mat<f64> {
        let n = self.n_nodes();
        let mut deriv = Mat::zeros(points.len(), n);
        for (p, &x) in points.iter().enumerate() {
            let (_, derivs) = self.lagrange_at(x);
            for j in 0..n {
                deriv[(p, j)] = derivs[j];
            }
        }
        deriv
    }
}

/// Normalized Legendre modes (φ_k(x), φ'_k(x)) for k < n.
fn normalized_modes(n: usize, x: f64) -> Vec<(f64, f64)> {
    (0..n)
        .map(|k| {
            let norm = ((2 * k + 1) as f64 / 2.0).sqrt();
            let (p, dp) = legendre_and_derivative(k, x);
            (norm * p, norm * dp)
        })
        .collect()
}
