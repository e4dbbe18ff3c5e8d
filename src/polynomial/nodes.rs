//! Gauss-Legendre and Gauss-Lobatto-Legendre nodes and weights.
//!
//! Gauss-Legendre (GL) nodes are the roots of P_n and do not include the
//! interval endpoints, which makes them the usual FR choice for solution
//! points: flux points then sit on the faces, strictly outside the
//! solution point set. The same GL nodes parametrise the face flux points
//! of tensor-product elements, where the weights act as face integration
//! coefficients.
//!
//! Gauss-Lobatto-Legendre (GLL) nodes are the roots of (1-x²)P'_N and
//! include x = ±1.

use super::legendre::{legendre, legendre_and_derivative};
use std::f64::consts::PI;

const NEWTON_TOL: f64 = 1e-15;
const NEWTON_MAX_ITER: usize = 100;

/// Compute `n_points` Gauss-Legendre nodes in ascending order.
///
/// Newton iteration on P_n from the Tricomi initial guess.
pub fn gauss_legendre_nodes(n_points: usize) -> Vec<f64> {
    let n = n_points;
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![0.0];
    }

    let mut nodes = vec![0.0; n];
    for (i, node) in nodes.iter_mut().enumerate() {
        // Descending guess; reversed at the end
        let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        for _ in 0..NEWTON_MAX_ITER {
            let (p, dp) = legendre_and_derivative(n, x);
            let update = p / dp;
            x -= update;
            if update.abs() < NEWTON_TOL {
                break;
            }
        }
        *node = x;
    }

    nodes.reverse();

    // Exact symmetry about zero
    for i in 0..n / 2 {
        let avg = 0.5 * (nodes[n - 1 - i] - nodes[i]);
        nodes[i] = -avg;
        nodes[n - 1 - i] = avg;
    }
    if n % 2 == 1 {
        nodes[n / 2] = 0.0;
    }

    nodes
}

/// Gauss-Legendre weights for the given nodes: w = 2 / ((1-x²) P'_n(x)²).
pub fn gauss_legendre_weights(nodes: &[f64]) -> Vec<f64> {
    let n = nodes.len();
    if n == 1 {
        return vec![2.0];
    }

    nodes
        .iter()
        .map(|&x| {
            let (_, dp) = legendre_and_derivative(n, x);
            2.0 / ((1.0 - x * x) * dp * dp)
        })
        .collect()
}

/// Compute Gauss-Lobatto-Legendre nodes for polynomial order N.
///
/// Returns N+1 nodes in [-1, 1], including the endpoints.
pub fn gauss_lobatto_nodes(order: usize) -> Vec<f64> {
    let n = order;
    if n == 0 {
        return vec![0.0];
    }

    let mut nodes: Vec<f64> = (0..=n).map(|j| -(PI * j as f64 / n as f64).cos()).collect();
    nodes[0] = -1.0;
    nodes[n] = 1.0;

    // Interior nodes are zeros of L_N = (1-x²)P'_N, whose derivative
    // reduces to -N(N+1)P_N.
    let nn1 = (n * (n + 1)) as f64;
    for node in nodes.iter_mut().take(n).skip(1) {
        let mut x = *node;
        for _ in 0..NEWTON_MAX_ITER {
            let (p, dp) = legendre_and_derivative(n, x);
            let update = (1.0 - x * x) * dp / (nn1 * p);
            x += update;
            if update.abs() < NEWTON_TOL {
                break;
            }
        }
        *node = x;
    }

    nodes
}

/// Gauss-Lobatto-Legendre weights: w_j = 2 / (N(N+1) P_N(x_j)²).
pub fn gauss_lobatto_weights(order: usize, nodes: &[f64]) -> Vec<f64> {
    if order == 0 {
        return vec![2.0];
    }
    let nn1 = (order * (order + 1)) as f64;
    nodes
        .iter()
        .map(|&x| {
            let p = legendre(order, x);
            2.0 / (nn1 * p * p)
        })
        .collect()
}
