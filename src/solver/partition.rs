//! Wave speed contributions across partition faces.
//!
//! Only the resident (LEFT) cell is known locally. Its extrapolated
//! states give the wave speed that the remote cell would have produced on
//! an interior face; no common flux and no correction are computed here.

use super::assembler::update_wave_speed;
use super::conv_rhs::{ConvRhsFluxReconstruction, SweepStats};
use super::interface::compute_wave_speed_update;
use super::sockets::ConvRhsSockets;
use super::state::StateField;
use crate::correction::CorrectionFunction;
use crate::equations::PhysicalFluxModel;
use crate::error::{FrError, Result};
use crate::flux::RiemannFlux;
use crate::mesh::{FaceBuilder, FrMesh, Trs};
use crate::types::Side;
use log::trace;

impl<M, R, C> ConvRhsFluxReconstruction<M, R, C>
where
    M: PhysicalFluxModel,
    R: RiemannFlux<M>,
    C: CorrectionFunction,
{
    pub(super) fn add_partition_faces_correction(
        &mut self,
        mesh: &FrMesh,
        states: &StateField,
        sockets: &mut ConvRhsSockets<'_>,
        stats: &mut SweepStats,
    ) -> Result<()> {
        let tables = self.tables.as_ref().ok_or(FrError::NotSetUp)?;
        let coefs = tables.data.face_integration_coefs();
        let start_idxs = mesh.face_start_idxs(Trs::PartitionFaces)?;

        let mut builder = FaceBuilder::new(mesh, Trs::PartitionFaces)?;
        for bucket in start_idxs.windows(2) {
            for idx in bucket[0]..bucket[1] {
                let face = builder.build(idx)?;
                self.face_data.set_face_data(
                    &self.model,
                    tables,
                    &face,
                    sockets.face_jacob_vec_sizes.get(face.id()),
                    states,
                );
                stats.n_partition_faces += 1;

                let cell = face.neighbour(Side::Left);
                let wave_speed =
                    compute_wave_speed_update(&self.face_data, &self.model, coefs, Side::Left);
                update_wave_speed(sockets.update_coeff, cell.states(), wave_speed);
                if self.config.trace_cell == Some(cell.id()) {
                    trace!(
                        "Cell {}: wave speed {} from partition face {}",
                        cell.id(),
                        wave_speed,
                        face.id()
                    );
                }
            }
        }
        stats.n_faces_released += builder.n_released();
        Ok(())
    }
}
