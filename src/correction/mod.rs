//! Correction functions for Flux Reconstruction.
//!
//! A correction function distributes the jump between the common face flux
//! and the discontinuous flux at a flux point back onto the solution
//! points. The residual only ever needs its divergence, tabulated once per
//! element type as `[sol_pnt][flx_pnt]`.

mod vcjh;

pub use vcjh::{VcjhCorrection, VcjhParameter};

use crate::basis::FrElementData;
use faer::Mat;

/// Provider of the correction function divergence table.
pub trait CorrectionFunction: Send + Sync {
    /// Divergence of the correction function of every flux point,
    /// evaluated at every solution point: `table[(sol_pnt, flx_pnt)]`.
    fn compute_div_correction_function(&self, data: &FrElementData) -> Mat<f64>;

    /// Name of the correction function (for logging).
    fn name(&self) -> &'static str;
}
