//! Interface flux correction.
//!
//! At every face flux point the common flux F* replaces the jump
//! F* - F_side of each side's discontinuous flux. Scaled by the side's
//! signed face Jacobian, this jump drives the correction of all solution
//! points of that side's cell:
//!
//! corr[sol] = -Σ_flx driver[flx] · div g_flx(x_sol)

use super::face_data::FaceFluxData;
use crate::equations::PhysicalFluxModel;
use crate::flux::RiemannFlux;
use crate::types::{Side, SidePair};
use faer::Mat;

/// Compute the common flux and turn both sides' discontinuous fluxes into
/// correction drivers `(F* - F_side) · signed_jacobian[side]`.
pub fn compute_interface_flx_correction<M, R>(data: &mut FaceFluxData, model: &M, riemann: &R)
where
    M: PhysicalFluxModel,
    R: RiemannFlux<M> + ?Sized,
{
    for flx in 0..data.n_flx_pnts() {
        let common = riemann.compute_flux(
            model,
            &data.states.left[flx],
            &data.states.right[flx],
            &data.unit_normals[flx],
        );
        for side in Side::BOTH {
            let jacob = data.jacob_signed[flx][side];
            for (f, c) in data.fluxes[side][flx].iter_mut().zip(&common) {
                *f = (c - *f) * jacob;
            }
        }
        data.riemann_fluxes[flx] = common;
    }
}

/// Wave speed update of one side: Σ_flx |J| w_flx λ_max(u_side, n).
pub fn compute_wave_speed_update<M: PhysicalFluxModel>(
    data: &FaceFluxData,
    model: &M,
    face_integration_coefs: &[f64],
    side: Side,
) -> f64 {
    (0..data.n_flx_pnts())
        .map(|flx| {
            let jacob_x_int_coef = data.jacob_abs[flx] * face_integration_coefs[flx];
            let pdata = model.physical_data(&data.states[side][flx]);
            jacob_x_int_coef * model.max_abs_eigenvalue(&pdata, &data.unit_normals[flx])
        })
        .sum()
}

/// Wave speed updates of both sides of an interior face.
pub fn compute_wave_speed_updates<M: PhysicalFluxModel>(
    data: &FaceFluxData,
    model: &M,
    face_integration_coefs: &[f64],
) -> SidePair<f64> {
    SidePair::new(
        compute_wave_speed_update(data, model, face_integration_coefs, Side::Left),
        compute_wave_speed_update(data, model, face_integration_coefs, Side::Right),
    )
}

/// Correction of every solution point of one side's cell.
///
/// `flx_conn` maps face flux points to the cell's local flux points;
/// `corrections` is `[sol][eq]` and is overwritten.
pub fn compute_correction(
    data: &FaceFluxData,
    side: Side,
    flx_conn: &[usize],
    corr_fct_div: &Mat<f64>,
    corrections: &mut [Vec<f64>],
) {
    debug_assert_eq!(corrections.len(), corr_fct_div.nrows());
    let drivers = &data.fluxes[side];
    for (sol, correction) in corrections.iter_mut().enumerate() {
        correction.fill(0.0);
        for (flx, driver) in drivers.iter().enumerate() {
            let div = corr_fct_div[(sol, flx_conn[flx])];
            for (c, d) in correction.iter_mut().zip(driver) {
                *c -= d * div;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::{ElementShape, FrElementData, SolutionPointSet};
    use crate::correction::VcjhCorrection;
    use crate::equations::{Euler, LinearAdvection};
    use crate::flux::{RoeFlux, RusanovFlux, UpwindFlux};
    use crate::mesh::{FaceBuilder, FaceJacobVecSizes, FrMesh, Trs};
    use crate::solver::state::StateField;
    use crate::solver::tables::FrTables;

    /// Returns the LEFT state's own physical flux.
    struct LeftFlux;

    impl<M: PhysicalFluxModel> RiemannFlux<M> for LeftFlux {
        fn compute_flux(&self, model: &M, left: &[f64], _: &[f64], n: &[f64]) -> Vec<f64> {
            model.state_flux(left, n)
        }

        fn name(&self) -> &'static str {
            "left"
        }
    }

    struct Setup {
        mesh: FrMesh,
        tables: FrTables,
        sizes: FaceJacobVecSizes,
    }

    fn quad_setup(order: usize) -> Setup {
        let coords = vec![
            [0.0, 0.0],
            [1.0, 0.1],
            [2.1, 0.0],
            [0.1, 1.0],
            [0.9, 1.2],
            [2.0, 1.1],
        ];
        let mesh = FrMesh::quad_grid(2, 1, coords, order).unwrap();
        let data = FrElementData::new(
            ElementShape::Quadrilateral,
            order,
            SolutionPointSet::GaussLegendre,
        )
        .unwrap();
        let sizes = FaceJacobVecSizes::compute(&mesh, &data).unwrap();
        Setup {
            mesh,
            tables: FrTables::new(data, &VcjhCorrection::hu()),
            sizes,
        }
    }

    fn staged<M: PhysicalFluxModel>(
        setup: &Setup,
        model: &M,
        states: &StateField,
    ) -> FaceFluxData {
        let data = &setup.tables.data;
        let mut face_data = FaceFluxData::new(data.n_flx_pnts_1d(), model.n_eqs(), data.dim());
        let mut builder = FaceBuilder::new(&setup.mesh, Trs::InnerFaces).unwrap();
        let face = builder.build(0).unwrap();
        face_data.set_face_data(model, &setup.tables, &face, setup.sizes.get(face.id()), states);
        face_data
    }

    fn euler_states(setup: &Setup, euler: &Euler) -> StateField {
        let mut states = StateField::for_mesh(&setup.mesh, 4);
        states
            .set_from_function(&setup.mesh, &setup.tables.data, |x| {
                euler.conservative_from_primitive(
                    1.0 + 0.2 * x[0],
                    &[0.3 - 0.1 * x[1], 0.2 * x[0]],
                    1.0 + 0.1 * x[0] * x[1],
                )
            })
            .unwrap();
        states
    }

    #[test]
    fn test_zero_correction_when_riemann_is_own_flux() {
        let setup = quad_setup(2);
        let euler = Euler::air(2);
        let states = euler_states(&setup, &euler);
        let mut face_data = staged(&setup, &euler, &states);

        compute_interface_flx_correction(&mut face_data, &euler, &LeftFlux);
        for driver in &face_data.fluxes.left {
            assert!(driver.iter().all(|&d| d == 0.0), "LEFT driver must vanish");
        }
    }

    #[test]
    fn test_drivers_share_one_common_flux() {
        // driver_side / J_side + F_side = F* on both sides
        let setup = quad_setup(2);
        let euler = Euler::air(2);
        let states = euler_states(&setup, &euler);
        let mut face_data = staged(&setup, &euler, &states);
        let disc = face_data.fluxes.clone();

        compute_interface_flx_correction(&mut face_data, &euler, &RoeFlux::default());
        for flx in 0..face_data.n_flx_pnts() {
            for side in Side::BOTH {
                let jacob = face_data.jacob_signed[flx][side];
                for eq in 0..4 {
                    let recovered = face_data.fluxes[side][flx][eq] / jacob + disc[side][flx][eq];
                    assert!((recovered - face_data.riemann_fluxes[flx][eq]).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_relabeling_symmetry() {
        // Swapping the sides and the normal leaves the common flux unchanged
        // up to the sign of the normal, and swaps the drivers' roles.
        let setup = quad_setup(1);
        let euler = Euler::air(2);
        let states = euler_states(&setup, &euler);
        let mut face_data = staged(&setup, &euler, &states);

        let mut swapped = face_data.clone();
        swapped.states = face_data.states.clone().swapped();
        swapped.fluxes = face_data.fluxes.clone().swapped();
        for flx in 0..swapped.n_flx_pnts() {
            swapped.jacob_signed[flx] = face_data.jacob_signed[flx].swapped().map(|j| -j);
            for n in swapped.unit_normals[flx].iter_mut() {
                *n = -*n;
            }
            for side in Side::BOTH {
                for f in swapped.fluxes[side][flx].iter_mut() {
                    *f = -*f;
                }
            }
        }

        compute_interface_flx_correction(&mut face_data, &euler, &RusanovFlux);
        compute_interface_flx_correction(&mut swapped, &euler, &RusanovFlux);
        for flx in 0..face_data.n_flx_pnts() {
            for eq in 0..4 {
                assert!(
                    (face_data.riemann_fluxes[flx][eq] + swapped.riemann_fluxes[flx][eq]).abs()
                        < 1e-12
                );
                assert!(
                    (face_data.fluxes.left[flx][eq] - swapped.fluxes.right[flx][eq]).abs() < 1e-12
                );
                assert!(
                    (face_data.fluxes.right[flx][eq] - swapped.fluxes.left[flx][eq]).abs() < 1e-12
                );
            }
        }
    }

    #[test]
    fn test_wave_speed_non_negative() {
        let setup = quad_setup(2);
        for a in [(1.0, 0.0), (-2.0, 0.5), (0.0, -1.0)] {
            let model = LinearAdvection::new_2d(a.0, a.1);
            let mut states = StateField::for_mesh(&setup.mesh, 1);
            states
                .set_from_function(&setup.mesh, &setup.tables.data, |x| vec![x[0] - x[1]])
                .unwrap();
            let face_data = staged(&setup, &model, &states);
            let coefs = setup.tables.data.face_integration_coefs();
            let speeds = compute_wave_speed_updates(&face_data, &model, coefs);
            assert!(speeds.left >= 0.0 && speeds.right >= 0.0);
            // Linear advection: both sides see the same |a·n|
            assert!((speeds.left - speeds.right).abs() < 1e-14);
        }
    }

    #[test]
    fn test_correction_1d_upwind() {
        // u = 1 on the left cell, 0 on the right, a = 1: the right cell
        // receives F* - F_R = 1 at its left face, the left cell nothing.
        let mesh = FrMesh::uniform_line(0.0, 2.0, 2, 2).unwrap();
        let data = FrElementData::new(ElementShape::Line, 2, SolutionPointSet::GaussLegendre)
            .unwrap();
        let corr = VcjhCorrection::dg();
        let sizes = FaceJacobVecSizes::compute(&mesh, &data).unwrap();
        let setup = Setup {
            mesh,
            tables: FrTables::new(data.clone(), &corr),
            sizes,
        };
        let mut states = StateField::for_mesh(&setup.mesh, 1);
        for &id in &setup.mesh.cells[0].states {
            states.state_mut(id)[0] = 1.0;
        }

        let model = LinearAdvection::new_1d(1.0);
        let mut face_data = staged(&setup, &model, &states);
        compute_interface_flx_correction(&mut face_data, &model, &UpwindFlux);
        assert_eq!(face_data.fluxes.left[0], vec![0.0]);
        assert!((face_data.fluxes.right[0][0] - 1.0).abs() < 1e-12);

        let orient = data.orientation_of(1, 0);
        let conn = &data.face_flx_pnt_conn_per_orient()[orient].right;
        let mut corrections = vec![vec![0.0]; 3];
        compute_correction(&face_data, Side::Right, conn, &setup.tables.corr_fct_div, &mut corrections);
        for (i, c) in corrections.iter().enumerate() {
            let xi = data.sol_pnt_coords_1d()[i];
            let expected = -corr.left_derivative(2, xi);
            assert!((c[0] - expected).abs() < 1e-12);
        }
    }
}
