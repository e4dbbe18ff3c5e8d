//! Convective residual command for Flux Reconstruction.
//!
//! One call to [`ConvRhsFluxReconstruction::execute`] performs a full
//! step:
//!
//! 1. interior faces, bucket by bucket: common flux, correction of both
//!    neighbours and wave speed updates;
//! 2. partition faces: wave speed of the resident side only;
//! 3. cells: discontinuous flux divergence, then the Jacobian rescale of
//!    the update coefficients.
//!
//! The `rhs` and `update_coeff` buffers are zeroed by the caller.

use super::assembler::{divide_by_jacob_det, update_rhs, update_wave_speed};
use super::cell_residual::compute_res_updates;
use super::config::ConvRhsConfig;
use super::face_data::FaceFluxData;
use super::interface::{compute_correction, compute_interface_flx_correction, compute_wave_speed_updates};
use super::sockets::ConvRhsSockets;
use super::state::StateField;
use super::tables::FrTables;
use crate::basis::FrElementData;
use crate::correction::CorrectionFunction;
use crate::equations::PhysicalFluxModel;
use crate::error::{FrError, Result};
use crate::flux::RiemannFlux;
use crate::mesh::{CellBuilder, FaceBuilder, FrMesh, Trs};
use crate::types::Side;
use log::{debug, info, trace};

/// Counters of the last executed step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Interior faces visited
    pub n_faces: usize,
    /// Interior faces without any updatable neighbour state
    pub n_faces_skipped: usize,
    pub n_partition_faces: usize,
    pub n_cells: usize,
    /// Cells without any updatable state
    pub n_cells_skipped: usize,
    /// Faces released by the builders (interior and partition)
    pub n_faces_released: usize,
    pub n_cells_released: usize,
}

/// Convective residual of an FR discretization.
///
/// # Type Parameters
/// * `M` - physical flux model
/// * `R` - Riemann flux at interior faces
/// * `C` - correction function
pub struct ConvRhsFluxReconstruction<M, R, C>
where
    M: PhysicalFluxModel,
    R: RiemannFlux<M>,
    C: CorrectionFunction,
{
    pub(super) model: M,
    riemann: R,
    correction: C,
    pub(super) config: ConvRhsConfig,
    pub(super) tables: Option<FrTables>,
    pub(super) face_data: FaceFluxData,
    /// Per solution point correction or divergence, `[sol][eq]`
    contributions: Vec<Vec<f64>>,
    stats: SweepStats,
}

impl<M, R, C> ConvRhsFluxReconstruction<M, R, C>
where
    M: PhysicalFluxModel,
    R: RiemannFlux<M>,
    C: CorrectionFunction,
{
    pub fn new(model: M, riemann: R, correction: C, config: ConvRhsConfig) -> Self {
        Self {
            model,
            riemann,
            correction,
            config,
            tables: None,
            face_data: FaceFluxData::default(),
            contributions: Vec::new(),
            stats: SweepStats::default(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &ConvRhsConfig {
        &self.config
    }

    /// Tables of the current setup.
    pub fn tables(&self) -> Option<&FrTables> {
        self.tables.as_ref()
    }

    pub fn is_set_up(&self) -> bool {
        self.tables.is_some()
    }

    /// Counters of the last successful `execute`.
    pub fn last_stats(&self) -> SweepStats {
        self.stats
    }

    /// Precompute the polynomial and correction tables and size the
    /// scratch buffers for one element type.
    pub fn setup(&mut self, data: FrElementData) -> Result<()> {
        if data.dim() != self.model.dim() {
            return Err(FrError::size_mismatch(
                "dimension",
                self.model.dim(),
                data.dim(),
            ));
        }

        let n_eqs = self.model.n_eqs();
        let tables = FrTables::new(data, &self.correction);
        let data = &tables.data;
        self.face_data = FaceFluxData::new(data.n_flx_pnts_1d(), n_eqs, data.dim());
        self.contributions = vec![vec![0.0; n_eqs]; data.n_sol_pnts()];

        info!(
            "FR convective residual: {} order {} ({} solution points, {} flux points), {} correction, {} flux",
            data.shape(),
            data.order(),
            data.n_sol_pnts(),
            data.n_flx_pnts(),
            self.correction.name(),
            self.riemann.name(),
        );
        self.tables = Some(tables);
        Ok(())
    }

    /// Drop the tables and scratch buffers.
    pub fn unsetup(&mut self) {
        self.tables = None;
        self.face_data = FaceFluxData::default();
        self.contributions.clear();
    }

    /// Run one residual step, accumulating into `sockets`.
    ///
    /// Preconditions are checked before any buffer is written.
    pub fn execute(
        &mut self,
        mesh: &FrMesh,
        states: &StateField,
        sockets: &mut ConvRhsSockets<'_>,
    ) -> Result<()> {
        self.check_preconditions(mesh, states, sockets)?;

        let mut stats = SweepStats::default();
        self.add_interior_faces_correction(mesh, states, sockets, &mut stats)?;
        self.add_partition_faces_correction(mesh, states, sockets, &mut stats)?;
        self.add_cells_residual(mesh, states, sockets, &mut stats)?;
        self.finish(stats);
        Ok(())
    }

    fn check_preconditions(
        &self,
        mesh: &FrMesh,
        states: &StateField,
        sockets: &ConvRhsSockets<'_>,
    ) -> Result<()> {
        let tables = self.tables.as_ref().ok_or(FrError::NotSetUp)?;
        let data = &tables.data;

        if mesh.element_type_data.len() != 1 {
            return Err(FrError::MultipleElementTypes {
                found: mesh.element_type_data.len(),
            });
        }
        let etd = &mesh.element_type_data[0];
        if etd.shape != data.shape() {
            return Err(FrError::InvalidMesh(format!(
                "Mesh holds {} cells, residual set up for {}",
                etd.shape,
                data.shape()
            )));
        }
        if etd.order != data.order() {
            return Err(FrError::InvalidOrder { order: etd.order });
        }
        if etd.n_sol_pnts != data.n_sol_pnts() {
            return Err(FrError::size_mismatch(
                "solution points per cell",
                data.n_sol_pnts(),
                etd.n_sol_pnts,
            ));
        }

        let n_eqs = self.model.n_eqs();
        if states.n_eqs() != n_eqs {
            return Err(FrError::size_mismatch("equations", n_eqs, states.n_eqs()));
        }
        if states.n_states() != mesh.n_states {
            return Err(FrError::size_mismatch(
                "states",
                mesh.n_states,
                states.n_states(),
            ));
        }
        sockets.validate(mesh, n_eqs, data.n_flx_pnts_1d())
    }

    fn add_interior_faces_correction(
        &mut self,
        mesh: &FrMesh,
        states: &StateField,
        sockets: &mut ConvRhsSockets<'_>,
        stats: &mut SweepStats,
    ) -> Result<()> {
        let tables = self.tables.as_ref().ok_or(FrError::NotSetUp)?;
        let data = &tables.data;
        let n_eqs = self.model.n_eqs();
        let res_factor = self.config.res_factor;
        let start_idxs = mesh.face_start_idxs(Trs::InnerFaces)?;

        let mut builder = FaceBuilder::new(mesh, Trs::InnerFaces)?;
        for (orient, bucket) in start_idxs.windows(2).enumerate() {
            let flx_conn = &data.face_flx_pnt_conn_per_orient()[orient];
            for idx in bucket[0]..bucket[1] {
                let face = builder.build(idx)?;
                self.face_data.set_face_data(
                    &self.model,
                    tables,
                    &face,
                    sockets.face_jacob_vec_sizes.get(face.id()),
                    states,
                );
                stats.n_faces += 1;

                let updatable = Side::BOTH
                    .iter()
                    .any(|&side| states.any_par_updatable(face.neighbour(side).states()));
                if updatable {
                    compute_interface_flx_correction(&mut self.face_data, &self.model, &self.riemann);
                    for side in Side::BOTH {
                        let cell = face.neighbour(side);
                        compute_correction(
                            &self.face_data,
                            side,
                            &flx_conn[side],
                            &tables.corr_fct_div,
                            &mut self.contributions,
                        );
                        update_rhs(sockets.rhs, cell.states(), &self.contributions, res_factor, n_eqs);
                        if self.config.trace_cell == Some(cell.id()) {
                            trace!(
                                "Cell {}: {} correction from face {}: {:?}",
                                cell.id(),
                                side,
                                face.id(),
                                self.contributions
                            );
                        }
                    }
                } else {
                    trace!("Face {}: no updatable neighbour, wave speed only", face.id());
                    stats.n_faces_skipped += 1;
                }

                let wave_speeds =
                    compute_wave_speed_updates(&self.face_data, &self.model, data.face_integration_coefs());
                for side in Side::BOTH {
                    let cell = face.neighbour(side);
                    update_wave_speed(sockets.update_coeff, cell.states(), wave_speeds[side]);
                    if self.config.trace_cell == Some(cell.id()) {
                        trace!(
                            "Cell {}: wave speed {} from face {} ({})",
                            cell.id(),
                            wave_speeds[side],
                            face.id(),
                            side
                        );
                    }
                }
            }
        }
        stats.n_faces_released += builder.n_released();
        Ok(())
    }

    fn add_cells_residual(
        &mut self,
        mesh: &FrMesh,
        states: &StateField,
        sockets: &mut ConvRhsSockets<'_>,
        stats: &mut SweepStats,
    ) -> Result<()> {
        let tables = self.tables.as_ref().ok_or(FrError::NotSetUp)?;
        let sol_coords = tables.data.sol_pnt_coords();
        let n_eqs = self.model.n_eqs();
        let res_factor = self.config.res_factor;

        let mut builder = CellBuilder::new(mesh);
        for etd in &mesh.element_type_data {
            for idx in etd.start_idx..etd.end_idx {
                let cell = builder.build(idx)?;
                stats.n_cells += 1;

                if states.any_par_updatable(cell.states()) {
                    compute_res_updates(
                        &self.model,
                        tables,
                        &cell,
                        states,
                        self.config.residual_eps,
                        &mut self.contributions,
                    );
                    update_rhs(sockets.rhs, cell.states(), &self.contributions, res_factor, n_eqs);
                } else {
                    stats.n_cells_skipped += 1;
                }

                let jacob_dets = cell.jacob_dets(sol_coords);
                divide_by_jacob_det(sockets.update_coeff, cell.states(), &jacob_dets, cell.volume());

                if self.config.trace_cell == Some(cell.id()) {
                    let coeffs: Vec<f64> =
                        cell.states().iter().map(|&id| sockets.update_coeff[id]).collect();
                    trace!(
                        "Cell {}: divergence {:?}, update coefficients {:?}",
                        cell.id(),
                        self.contributions,
                        coeffs
                    );
                }
            }
        }
        stats.n_cells_released += builder.n_released();
        Ok(())
    }

    fn finish(&mut self, stats: SweepStats) {
        debug!(
            "FR convective residual: {} faces ({} skipped), {} partition faces, {} cells ({} skipped)",
            stats.n_faces,
            stats.n_faces_skipped,
            stats.n_partition_faces,
            stats.n_cells,
            stats.n_cells_skipped
        );
        self.stats = stats;
    }
}

#[cfg(feature = "parallel")]
impl<M, R, C> ConvRhsFluxReconstruction<M, R, C>
where
    M: PhysicalFluxModel,
    R: RiemannFlux<M>,
    C: CorrectionFunction,
{
    /// Same step as [`execute`](Self::execute) with the cell divergences
    /// computed on the rayon pool.
    ///
    /// Contributions are assembled serially in ascending cell order, so
    /// the buffers match `execute` bit for bit.
    pub fn execute_parallel(
        &mut self,
        mesh: &FrMesh,
        states: &StateField,
        sockets: &mut ConvRhsSockets<'_>,
    ) -> Result<()> {
        use rayon::prelude::*;

        self.check_preconditions(mesh, states, sockets)?;

        let mut stats = SweepStats::default();
        self.add_interior_faces_correction(mesh, states, sockets, &mut stats)?;
        self.add_partition_faces_correction(mesh, states, sockets, &mut stats)?;

        let tables = self.tables.as_ref().ok_or(FrError::NotSetUp)?;
        let model = &self.model;
        let eps = self.config.residual_eps;
        let n_eqs = model.n_eqs();
        let n_sol = tables.data.n_sol_pnts();
        let sol_coords = tables.data.sol_pnt_coords();

        let per_cell = (0..mesh.n_cells())
            .into_par_iter()
            .map_init(
                || CellBuilder::new(mesh),
                |builder, idx| -> Result<_> {
                    let released_before = builder.n_released();
                    let cell = builder.build(idx)?;
                    let residual = if states.any_par_updatable(cell.states()) {
                        let mut residuals = vec![vec![0.0; n_eqs]; n_sol];
                        compute_res_updates(model, tables, &cell, states, eps, &mut residuals);
                        Some(residuals)
                    } else {
                        None
                    };
                    let cell_states = cell.states().to_vec();
                    let jacob_dets = cell.jacob_dets(sol_coords);
                    let volume = cell.volume();
                    drop(cell);
                    let released = builder.n_released() - released_before;
                    Ok((cell_states, residual, jacob_dets, volume, released))
                },
            )
            .collect::<Result<Vec<_>>>()?;

        for (cell_states, residual, jacob_dets, volume, released) in &per_cell {
            stats.n_cells += 1;
            stats.n_cells_released += released;
            match residual {
                Some(residual) => {
                    update_rhs(sockets.rhs, cell_states, residual, self.config.res_factor, n_eqs)
                }
                None => stats.n_cells_skipped += 1,
            }
            divide_by_jacob_det(sockets.update_coeff, cell_states, jacob_dets, *volume);
        }

        self.finish(stats);
        Ok(())
    }
}
