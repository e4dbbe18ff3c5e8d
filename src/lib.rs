//! # fr-rs
//!
//! Convective residual assembly for high-order Flux Reconstruction
//! (FR/CPR) discretizations of hyperbolic conservation laws.
//!
//! This crate provides the building blocks of one residual step:
//! - Polynomial toolkit (Legendre, Gauss and Gauss-Lobatto points)
//! - FR element data for line and quadrilateral cells
//! - VCJH correction functions
//! - Physical flux models (linear advection, Burgers, Euler)
//! - Riemann fluxes (upwind, Rusanov, Roe, central)
//! - Unstructured meshes with orientation buckets and partition faces
//! - The convective residual command with its face and cell sweeps
//!
//! # Example
//! ```
//! use fr_rs::{
//!     ConvRhsConfig, ConvRhsFluxReconstruction, ConvRhsSockets, ElementShape,
//!     FaceJacobVecSizes, FrElementData, FrMesh, LinearAdvection, SolutionPointSet,
//!     StateField, UpwindFlux, VcjhCorrection,
//! };
//!
//! let mesh = FrMesh::uniform_line_periodic(0.0, 1.0, 8, 2).unwrap();
//! let data = FrElementData::new(ElementShape::Line, 2, SolutionPointSet::GaussLegendre).unwrap();
//! let sizes = FaceJacobVecSizes::compute(&mesh, &data).unwrap();
//!
//! let mut states = StateField::for_mesh(&mesh, 1);
//! states.set_uniform(&[1.0]);
//!
//! let mut command = ConvRhsFluxReconstruction::new(
//!     LinearAdvection::new_1d(1.0),
//!     UpwindFlux,
//!     VcjhCorrection::dg(),
//!     ConvRhsConfig::default(),
//! );
//! command.setup(data).unwrap();
//!
//! let mut rhs = vec![0.0; mesh.n_states];
//! let mut update_coeff = vec![0.0; mesh.n_states];
//! let mut sockets = ConvRhsSockets::new(&mut rhs, &mut update_coeff, &sizes);
//! command.execute(&mesh, &states, &mut sockets).unwrap();
//!
//! // Uniform state: no residual
//! assert!(rhs.iter().all(|r| r.abs() < 1e-12));
//! ```

pub mod basis;
pub mod correction;
pub mod equations;
pub mod error;
pub mod flux;
pub mod mesh;
pub mod polynomial;
pub mod solver;
pub mod types;

// Re-export main types for convenience
pub use basis::{ElementShape, FrElementData, SolutionPointSet, Vandermonde1D};
pub use correction::{CorrectionFunction, VcjhCorrection, VcjhParameter};
pub use equations::{Burgers1D, Euler, LinearAdvection, PhysicalFluxModel};
pub use error::{FrError, Result};
pub use flux::{CentralFlux, RiemannFlux, RoeFlux, RusanovFlux, UpwindFlux};
pub use mesh::{CellBuilder, FaceBuilder, FaceJacobVecSizes, FrMesh, Trs};
pub use solver::{
    ConvRhsConfig, ConvRhsFluxReconstruction, ConvRhsSockets, StateField, SweepStats,
    needs_sockets,
};
pub use types::{Side, SidePair};
