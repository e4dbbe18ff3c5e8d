//! Face data staging.
//!
//! For one face, extrapolates the neighbour states to the face flux points
//! and evaluates the discontinuous normal fluxes there. Interior faces fill
//! both sides; partition faces only the resident (LEFT) side.

use super::state::StateField;
use super::tables::FrTables;
use crate::equations::PhysicalFluxModel;
use crate::mesh::{Cell, Face};
use crate::types::{Side, SidePair};

/// Flux point data of the face being processed.
///
/// Reused from face to face; only the first `n_flx_pnts` entries of each
/// table are meaningful.
#[derive(Clone, Debug, Default)]
pub struct FaceFluxData {
    /// Unit normal (LEFT outward) at each flux point
    pub unit_normals: Vec<Vec<f64>>,
    /// Face Jacobian vector size at each flux point
    pub jacob_abs: Vec<f64>,
    /// Jacobian size signed by each side's mapped coordinate direction
    pub jacob_signed: Vec<SidePair<f64>>,
    /// Extrapolated states `[side][flx][eq]`
    pub states: SidePair<Vec<Vec<f64>>>,
    /// Discontinuous normal fluxes `[side][flx][eq]`; replaced by the
    /// correction drivers once the common flux is known
    pub fluxes: SidePair<Vec<Vec<f64>>>,
    /// Common (Riemann) flux at each flux point
    pub riemann_fluxes: Vec<Vec<f64>>,
}

impl FaceFluxData {
    /// Allocate for `n_flx_pnts` face flux points.
    pub fn new(n_flx_pnts: usize, n_eqs: usize, dim: usize) -> Self {
        let per_flx = |len: usize| vec![vec![0.0; len]; n_flx_pnts];
        Self {
            unit_normals: per_flx(dim),
            jacob_abs: vec![0.0; n_flx_pnts],
            jacob_signed: vec![SidePair::uniform(0.0); n_flx_pnts],
            states: SidePair::uniform(per_flx(n_eqs)),
            fluxes: SidePair::uniform(per_flx(n_eqs)),
            riemann_fluxes: per_flx(n_eqs),
        }
    }

    pub fn n_flx_pnts(&self) -> usize {
        self.jacob_abs.len()
    }

    /// Stage the flux point data of a built face.
    ///
    /// `jacob_sizes` are the face Jacobian vector sizes of this face.
    pub fn set_face_data<M: PhysicalFluxModel>(
        &mut self,
        model: &M,
        tables: &FrTables,
        face: &Face,
        jacob_sizes: &[f64],
        states: &StateField,
    ) {
        let data = &tables.data;
        let n_flx = self.n_flx_pnts();
        debug_assert_eq!(jacob_sizes.len(), n_flx);

        let jacob_vecs = face.face_jacob_det_vectors(data.flx_pnt_coords_1d());
        let orient = face.orientation();

        // Local flux point indices and mapped directions per side
        let (conn, dirs) = if face.is_partition() {
            let conn = &data.face_flx_pnt_conn()[orient];
            let dir = data.face_mapped_coord_dir(orient);
            (SidePair::new(conn, conn), SidePair::new(dir, 0.0))
        } else {
            let conn = &data.face_flx_pnt_conn_per_orient()[orient];
            (
                SidePair::new(&conn.left, &conn.right),
                data.face_mapped_coord_dir_per_orient()[orient],
            )
        };
        let sides: &[Side] = if face.is_partition() {
            &[Side::Left]
        } else {
            &Side::BOTH
        };

        for flx in 0..n_flx {
            let size = jacob_sizes[flx];
            self.jacob_abs[flx] = size;
            self.jacob_signed[flx] = SidePair::new(size * dirs.left, size * dirs.right);
            for (n, v) in self.unit_normals[flx].iter_mut().zip(&jacob_vecs[flx]) {
                *n = v / size;
            }

            for &side in sides {
                let cell = face.neighbour(side);
                let flx_idx = conn[side][flx];
                extrapolate_state(
                    states,
                    cell,
                    &tables.sol_poly_vals_at_flx_pnts[flx_idx],
                    &mut self.states[side][flx],
                );
                let pdata = model.physical_data(&self.states[side][flx]);
                self.fluxes[side][flx] = model.flux(&pdata, &self.unit_normals[flx]);
            }
        }
    }
}

/// Extrapolate a cell's solution to one point: Σ_j ℓ_j(x) u_j.
pub fn extrapolate_state(states: &StateField, cell: &Cell, poly_vals: &[f64], out: &mut [f64]) {
    out.fill(0.0);
    for (&id, &l) in cell.states().iter().zip(poly_vals) {
        for (o, u) in out.iter_mut().zip(states.state(id)) {
            *o += l * u;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::{ElementShape, FrElementData, SolutionPointSet};
    use crate::correction::VcjhCorrection;
    use crate::equations::LinearAdvection;
    use crate::mesh::{FaceBuilder, FaceJacobVecSizes, FrMesh, Trs};

    #[test]
    fn test_stage_linear_field_1d() {
        let mesh = FrMesh::uniform_line(0.0, 2.0, 2, 2).unwrap();
        let data = FrElementData::new(ElementShape::Line, 2, SolutionPointSet::GaussLegendre)
            .unwrap();
        let tables = FrTables::new(data.clone(), &VcjhCorrection::dg());
        let sizes = FaceJacobVecSizes::compute(&mesh, &data).unwrap();
        let mut states = StateField::for_mesh(&mesh, 1);
        states
            .set_from_function(&mesh, &data, |x| vec![3.0 * x[0]])
            .unwrap();

        let model = LinearAdvection::new_1d(2.0);
        let mut face_data = FaceFluxData::new(data.n_flx_pnts_1d(), 1, 1);
        let mut builder = FaceBuilder::new(&mesh, Trs::InnerFaces).unwrap();
        let face = builder.build(0).unwrap();
        face_data.set_face_data(&model, &tables, &face, sizes.get(face.id()), &states);

        // Both sides see u(1) = 3 at the shared point x = 1
        assert!((face_data.states.left[0][0] - 3.0).abs() < 1e-12);
        assert!((face_data.states.right[0][0] - 3.0).abs() < 1e-12);
        assert_eq!(face_data.unit_normals[0], vec![1.0]);
        assert!((face_data.fluxes.left[0][0] - 6.0).abs() < 1e-12);
        assert_eq!(face_data.jacob_signed[0], SidePair::new(1.0, 1.0));
    }

    #[test]
    fn test_stage_quad_face_points_coincide() {
        // Smooth field, p = 3: both sides extrapolate the same cubic
        let mesh = FrMesh::uniform_quad(0.0, 2.0, 0.0, 1.0, 2, 1, 3).unwrap();
        let data =
            FrElementData::new(ElementShape::Quadrilateral, 3, SolutionPointSet::GaussLegendre)
                .unwrap();
        let tables = FrTables::new(data.clone(), &VcjhCorrection::dg());
        let sizes = FaceJacobVecSizes::compute(&mesh, &data).unwrap();
        let mut states = StateField::for_mesh(&mesh, 1);
        let f = |x: &[f64]| vec![x[0] * x[0] * x[1] + x[1].powi(3)];
        states.set_from_function(&mesh, &data, f).unwrap();

        let model = LinearAdvection::new_2d(1.0, 0.5);
        let mut face_data = FaceFluxData::new(data.n_flx_pnts_1d(), 1, 2);
        let mut builder = FaceBuilder::new(&mesh, Trs::InnerFaces).unwrap();
        let face = builder.build(0).unwrap();
        face_data.set_face_data(&model, &tables, &face, sizes.get(face.id()), &states);

        for flx in 0..data.n_flx_pnts_1d() {
            let l = face_data.states.left[flx][0];
            let r = face_data.states.right[flx][0];
            assert!((l - r).abs() < 1e-12, "Extrapolations differ: {} vs {}", l, r);
            assert!((face_data.unit_normals[flx][0] - 1.0).abs() < 1e-14);
            assert!(face_data.unit_normals[flx][1].abs() < 1e-14);
        }
    }
}
