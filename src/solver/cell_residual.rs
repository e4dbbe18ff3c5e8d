//! Discontinuous flux divergence inside one cell.
//!
//! With contravariant fluxes F̃_d = F · m_d, where m_d is the mapped
//! coordinate plane normal of axis d, the volume part of the residual is
//!
//! res[i] = -Σ_d Σ_j ∂ℓ_j/∂ξ_d(x_i) F̃_d(u_j)
//!
//! It is unscaled by the Jacobian determinant, like the face corrections.
//!
//! The snap to zero is applied once to the accumulated sum, not to each
//! partial sum; the two differ only by amounts of the order of the
//! snap threshold.

use super::state::StateField;
use super::tables::FrTables;
use crate::equations::PhysicalFluxModel;
use crate::mesh::Cell;

/// Compute `-div F` at every solution point of a cell.
///
/// `residuals` is `[sol][eq]` and is overwritten. Components whose
/// magnitude ends up below `eps` are set to exactly zero.
pub fn compute_res_updates<M: PhysicalFluxModel>(
    model: &M,
    tables: &FrTables,
    cell: &Cell,
    states: &StateField,
    eps: f64,
    residuals: &mut [Vec<f64>],
) {
    let data = &tables.data;
    let dim = data.dim();
    debug_assert_eq!(residuals.len(), data.n_sol_pnts());
    debug_assert_eq!(cell.states().len(), data.n_sol_pnts());

    let normals = cell.mapped_coord_plane_normals(data.sol_pnt_coords());

    // Contravariant fluxes [sol][axis][eq]
    let fluxes: Vec<Vec<Vec<f64>>> = cell
        .states()
        .iter()
        .zip(&normals)
        .map(|(&id, plane_normals)| {
            let pdata = model.physical_data(states.state(id));
            plane_normals
                .iter()
                .map(|m| model.flux(&pdata, m))
                .collect()
        })
        .collect();

    for (i, residual) in residuals.iter_mut().enumerate() {
        residual.fill(0.0);
        let derivs = &tables.sol_poly_derivs_at_sol_pnts[i];
        for d in 0..dim {
            for (j, flux) in fluxes.iter().enumerate() {
                let deriv = derivs[d][j];
                if deriv == 0.0 {
                    continue;
                }
                for (r, f) in residual.iter_mut().zip(&flux[d]) {
                    *r -= deriv * f;
                }
            }
        }
        for r in residual.iter_mut() {
            if r.abs() < eps {
                *r = 0.0;
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
    use crate::mesh::{CellBuilder, FrMesh};

    fn tables(shape: ElementShape, order: usize) -> FrTables {
        let data = FrElementData::new(shape, order, SolutionPointSet::GaussLegendre).unwrap();
        FrTables::new(data, &VcjhCorrection::dg())
    }

    #[test]
    fn test_linear_field_divergence_1d() {
        // u = x on [0, 2] with one cell: J = 1, -d(a u)/dξ = -a
        let mesh = FrMesh::uniform_line(0.0, 2.0, 1, 3).unwrap();
        let tables = tables(ElementShape::Line, 3);
        let mut states = StateField::for_mesh(&mesh, 1);
        states
            .set_from_function(&mesh, &tables.data, |x| vec![x[0]])
            .unwrap();

        let model = LinearAdvection::new_1d(2.5);
        let mut builder = CellBuilder::new(&mesh);
        let cell = builder.build(0).unwrap();
        let mut residuals = vec![vec![0.0]; 4];
        compute_res_updates(&model, &tables, &cell, &states, f64::EPSILON, &mut residuals);
        for r in &residuals {
            assert!((r[0] + 2.5).abs() < 1e-12, "Expected -2.5, got {}", r[0]);
        }
    }

    #[test]
    fn test_constant_state_snaps_to_zero() {
        let coords = vec![[0.0, 0.0], [1.3, 0.2], [0.1, 0.9], [1.5, 1.4]];
        let mesh = FrMesh::quad_grid(1, 1, coords, 3).unwrap();
        let tables = tables(ElementShape::Quadrilateral, 3);
        let euler = Euler::air(2);
        let mut states = StateField::for_mesh(&mesh, 4);
        states.set_uniform(&euler.conservative_from_primitive(1.2, &[0.4, -0.3], 0.8));

        let mut builder = CellBuilder::new(&mesh);
        let cell = builder.build(0).unwrap();
        let mut residuals = vec![vec![1.0; 4]; 16];
        compute_res_updates(&euler, &tables, &cell, &states, 1e-12, &mut residuals);
        for r in &residuals {
            assert!(r.iter().all(|&v| v == 0.0), "Residual not snapped: {:?}", r);
        }
    }

    #[test]
    fn test_affine_quad_divergence() {
        // Parallelogram cell, u = x + 2y, a = (1, 1):
        // div(a u) = 3 and res = -3 J at every solution point
        let coords = vec![[0.0, 0.0], [2.0, 0.0], [0.5, 1.0], [2.5, 1.0]];
        let mesh = FrMesh::quad_grid(1, 1, coords, 2).unwrap();
        let tables = tables(ElementShape::Quadrilateral, 2);
        let mut states = StateField::for_mesh(&mesh, 1);
        states
            .set_from_function(&mesh, &tables.data, |x| vec![x[0] + 2.0 * x[1]])
            .unwrap();

        let model = LinearAdvection::new_2d(1.0, 1.0);
        let mut builder = CellBuilder::new(&mesh);
        let cell = builder.build(0).unwrap();
        let jacob = cell.jacob_dets(tables.data.sol_pnt_coords());
        let mut residuals = vec![vec![0.0]; 9];
        compute_res_updates(&model, &tables, &cell, &states, f64::EPSILON, &mut residuals);
        for (r, j) in residuals.iter().zip(&jacob) {
            assert!((r[0] + 3.0 * j).abs() < 1e-12, "Expected {}, got {}", -3.0 * j, r[0]);
        }
    }
}
