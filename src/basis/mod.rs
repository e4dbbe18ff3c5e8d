//! Element shapes and FR basis tables.
//!
//! - [`Vandermonde1D`]: nodal Lagrange basis on a 1D solution point set
//! - [`ElementShape`]: reference elements and face numbering
//! - [`FrElementData`]: solution/flux point layout, orientation tables and
//!   polynomial evaluation for one element type

mod element_data;
mod shape;
mod vandermonde;

pub use element_data::{FrElementData, MAX_ORDER, SolutionPointSet};
pub use shape::ElementShape;
pub use vandermonde::Vandermonde1D;
