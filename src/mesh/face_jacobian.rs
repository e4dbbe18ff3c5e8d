//! Face Jacobian vector sizes at the face flux points.
//!
//! Stored per face ID, so interior and partition faces share one table.

use super::builder::FaceBuilder;
use super::topology::{FrMesh, Trs};
use crate::basis::FrElementData;
use crate::equations::norm;
use crate::error::Result;

/// `|face Jacobian vector|` at every 1D flux point of every face.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaceJacobVecSizes {
    sizes: Vec<Vec<f64>>,
}

impl FaceJacobVecSizes {
    /// Compute the sizes for all interior and partition faces.
    pub fn compute(mesh: &FrMesh, data: &FrElementData) -> Result<Self> {
        let mut sizes = vec![Vec::new(); mesh.n_faces_total()];
        for trs in [Trs::InnerFaces, Trs::PartitionFaces] {
            let mut builder = FaceBuilder::new(mesh, trs)?;
            for idx in 0..mesh.trs_size(trs) {
                let face = builder.build(idx)?;
                sizes[face.id()] = face
                    .face_jacob_det_vectors(data.flx_pnt_coords_1d())
                    .iter()
                    .map(|v| norm(v))
                    .collect();
            }
        }
        Ok(Self { sizes })
    }

    /// Sizes at the flux points of one face.
    pub fn get(&self, face_id: usize) -> &[f64] {
        &self.sizes[face_id]
    }

    /// Number of faces covered.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
