//! Accumulation into the shared residual and update coefficient buffers.
//!
//! All writes are additive except the final Jacobian rescale, which
//! multiplies each state's coefficient once per step. Applying it twice
//! is not idempotent.

/// Add `res_factor * contributions[sol][eq]` to the residual of the
/// cell's states.
pub fn update_rhs(
    rhs: &mut [f64],
    cell_states: &[usize],
    contributions: &[Vec<f64>],
    res_factor: f64,
    n_eqs: usize,
) {
    debug_assert_eq!(cell_states.len(), contributions.len());
    for (&id, contribution) in cell_states.iter().zip(contributions) {
        let start = id * n_eqs;
        for (r, c) in rhs[start..start + n_eqs].iter_mut().zip(contribution) {
            *r += res_factor * c;
        }
    }
}

/// Add one face side's wave speed to every state of the cell.
pub fn update_wave_speed(update_coeff: &mut [f64], cell_states: &[usize], wave_speed: f64) {
    for &id in cell_states {
        update_coeff[id] += wave_speed;
    }
}

/// Convert the cell's coefficients to physical space: c *= J(sol) / volume.
pub fn divide_by_jacob_det(
    update_coeff: &mut [f64],
    cell_states: &[usize],
    jacob_dets: &[f64],
    volume: f64,
) {
    debug_assert_eq!(cell_states.len(), jacob_dets.len());
    for (&id, &jacob) in cell_states.iter().zip(jacob_dets) {
        update_coeff[id] *= jacob / volume;
    }
}
