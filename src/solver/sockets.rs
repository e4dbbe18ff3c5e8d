//! Shared buffers read and written by the residual command.
//!
//! The residual and update coefficient buffers are owned by the enclosing
//! solver, which zeroes them before each step.

use crate::error::{FrError, Result};
use crate::mesh::{FaceJacobVecSizes, FrMesh};

/// Names of the data sockets the command depends on.
///
/// `gradients` and `normals` are declared for the diffusive terms that
/// share the same sockets; the convective residual does not read them.
pub const CONV_RHS_SOCKETS: [&str; 5] = [
    "gradients",
    "normals",
    "rhs",
    "updateCoeff",
    "faceJacobVecSizeFaceFlxPnts",
];

/// List the data sockets needed by the convective residual.
pub fn needs_sockets() -> &'static [&'static str] {
    &CONV_RHS_SOCKETS
}

/// Buffers handed to one residual sweep.
#[derive(Debug)]
pub struct ConvRhsSockets<'a> {
    /// Residual, `[n_states * n_eqs]`, accumulated with `+=`
    pub rhs: &'a mut [f64],
    /// Update coefficients, `[n_states]`, accumulated then rescaled
    pub update_coeff: &'a mut [f64],
    /// Face Jacobian vector sizes, indexed by face ID
    pub face_jacob_vec_sizes: &'a FaceJacobVecSizes,
}

impl<'a> ConvRhsSockets<'a> {
    pub fn new(
        rhs: &'a mut [f64],
        update_coeff: &'a mut [f64],
        face_jacob_vec_sizes: &'a FaceJacobVecSizes,
    ) -> Self {
        Self {
            rhs,
            update_coeff,
            face_jacob_vec_sizes,
        }
    }

    /// Check the buffer sizes against the mesh and the flux points per face.
    pub fn validate(&self, mesh: &FrMesh, n_eqs: usize, n_flx_pnts_1d: usize) -> Result<()> {
        if self.rhs.len() != mesh.n_states * n_eqs {
            return Err(FrError::size_mismatch(
                "rhs",
                mesh.n_states * n_eqs,
                self.rhs.len(),
            ));
        }
        if self.update_coeff.len() != mesh.n_states {
            return Err(FrError::size_mismatch(
                "updateCoeff",
                mesh.n_states,
                self.update_coeff.len(),
            ));
        }
        if self.face_jacob_vec_sizes.len() != mesh.n_faces_total() {
            return Err(FrError::size_mismatch(
                "faceJacobVecSizeFaceFlxPnts",
                mesh.n_faces_total(),
                self.face_jacob_vec_sizes.len(),
            ));
        }
        let sizes = self.face_jacob_vec_sizes;
        if let Some(face_sizes) = (0..sizes.len())
            .map(|face_id| sizes.get(face_id))
            .find(|face_sizes| face_sizes.len() != n_flx_pnts_1d)
        {
            return Err(FrError::size_mismatch(
                "faceJacobVecSizeFaceFlxPnts flux points",
                n_flx_pnts_1d,
                face_sizes.len(),
            ));
        }
        Ok(())
    }
}
