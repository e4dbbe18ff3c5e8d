//! Mesh representation and geometric entities.
//!
//! - [`FrMesh`]: nodes, cells, and face regions sorted by orientation
//! - [`Cell`] and [`Face`]: geometric entities built for one sweep
//! - [`CellBuilder`] and [`FaceBuilder`]: scoped build/release of entities
//! - [`FaceJacobVecSizes`]: face Jacobian sizes at the flux points

mod builder;
mod face_jacobian;
mod geometry;
mod topology;

pub use builder::{BuiltCell, BuiltFace, CellBuilder, FaceBuilder};
pub use face_jacobian::FaceJacobVecSizes;
pub use geometry::{Cell, CellGeometry, Face};
pub use topology::{
    CellRecord, ElementFace, ElementTypeData, FaceRecord, FrMesh, Trs, n_sol_pnts,
};
