//! Tables precomputed once at setup.

use crate::basis::FrElementData;
use crate::correction::CorrectionFunction;
use faer::Mat;

/// Element data plus the polynomial and correction tables used by every
/// face and cell of a sweep.
#[derive(Clone, Debug)]
pub struct FrTables {
    pub data: FrElementData,
    /// Solution polynomial values at the flux points, `[flx][sol]`
    pub sol_poly_vals_at_flx_pnts: Vec<Vec<f64>>,
    /// Solution polynomial derivatives at the solution points,
    /// `[sol][dim][sol]`
    pub sol_poly_derivs_at_sol_pnts: Vec<Vec<Vec<f64>>>,
    /// Correction function divergence, `(sol, flx)`
    pub corr_fct_div: Mat<f64>,
}

impl FrTables {
    pub fn new<C: CorrectionFunction + ?Sized>(data: FrElementData, correction: &C) -> Self {
        let sol_poly_vals_at_flx_pnts = data.sol_poly_vals_at_nodes(data.flx_pnt_coords());
        let sol_poly_derivs_at_sol_pnts = data.sol_poly_derivs_at_nodes(data.sol_pnt_coords());
        let corr_fct_div = correction.compute_div_correction_function(&data);
        Self {
            data,
            sol_poly_vals_at_flx_pnts,
            sol_poly_derivs_at_sol_pnts,
            corr_fct_div,
        }
    }
}
