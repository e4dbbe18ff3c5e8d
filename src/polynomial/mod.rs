//! Polynomial evaluation and 1D node sets.
//!
//! FR elements are built from tensor products of 1D node sets:
//! - Gauss-Legendre nodes serve as solution points and as face flux points
//! - Gauss-Lobatto-Legendre nodes are available as an alternate solution point set
//! - Legendre polynomials feed the Vandermonde matrices and the correction functions

mod legendre;
mod nodes;

pub use legendre::{legendre, legendre_and_derivative, legendre_derivative};
pub use nodes::{
    gauss_legendre_nodes, gauss_legendre_weights, gauss_lobatto_nodes, gauss_lobatto_weights,
};
