//! Vincent-Castonguay-Jameson-Huynh (VCJH) correction functions.
//!
//! For degree k the left and right correction polynomials are
//!
//! g_L(ξ) = (-1)^k / 2 · [P_k - (η_k P_{k-1} + P_{k+1}) / (1 + η_k)]
//! g_R(ξ) =          1 / 2 · [P_k + (η_k P_{k-1} + P_{k+1}) / (1 + η_k)]
//!
//! with η_k = c (2k+1) (a_k k!)² / 2 and a_k = (2k)! / (2^k (k!)²).
//! g_L is one at ξ = -1 and zero at ξ = +1; g_R mirrors it. c = 0 gives
//! the Radau polynomials, which recover nodal DG.

use super::CorrectionFunction;
use crate::basis::{ElementShape, FrElementData};
use crate::polynomial::legendre_derivative;
use faer::Mat;

/// Choice of the VCJH energy-stability parameter.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum VcjhParameter {
    /// c = 0: nodal discontinuous Galerkin
    #[default]
    Dg,
    /// Spectral difference recovery
    Sd,
    /// Huynh's g2 scheme
    Hu,
    /// Explicit value of c
    Value(f64),
}

/// VCJH correction function family.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct VcjhCorrection {
    parameter: VcjhParameter,
}

impl VcjhCorrection {
    pub fn new(c: f64) -> Self {
        Self {
            parameter: VcjhParameter::Value(c),
        }
    }

    pub fn dg() -> Self {
        Self {
            parameter: VcjhParameter::Dg,
        }
    }

    pub fn sd() -> Self {
        Self {
            parameter: VcjhParameter::Sd,
        }
    }

    pub fn hu() -> Self {
        Self {
            parameter: VcjhParameter::Hu,
        }
    }

    pub fn parameter(&self) -> VcjhParameter {
        self.parameter
    }

    /// η_k for polynomial degree k.
    ///
    /// At k = 0 only η = 0 keeps g_L(1) = 0, so every family collapses to
    /// the linear correction.
    pub fn eta(&self, k: usize) -> f64 {
        if k == 0 {
            return 0.0;
        }
        let kf = k as f64;
        match self.parameter {
            VcjhParameter::Dg => 0.0,
            VcjhParameter::Sd => kf / (kf + 1.0),
            VcjhParameter::Hu => (kf + 1.0) / kf,
            VcjhParameter::Value(c) => {
                let ak_kfact = factorial(2 * k) / (2f64.powi(k as i32) * factorial(k));
                c * (2.0 * kf + 1.0) * ak_kfact * ak_kfact / 2.0
            }
        }
    }

    /// Derivative of the left correction polynomial g_L at ξ.
    pub fn left_derivative(&self, k: usize, xi: f64) -> f64 {
        let eta = self.eta(k);
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        let bracket = legendre_derivative(k, xi)
            - (eta * lower_derivative(k, xi) + legendre_derivative(k + 1, xi)) / (1.0 + eta);
        0.5 * sign * bracket
    }

    /// Derivative of the right correction polynomial g_R at ξ.
    pub fn right_derivative(&self, k: usize, xi: f64) -> f64 {
        let eta = self.eta(k);
        let bracket = legendre_derivative(k, xi)
            + (eta * lower_derivative(k, xi) + legendre_derivative(k + 1, xi)) / (1.0 + eta);
        0.5 * bracket
    }
}

/// P'_{k-1}, with P_{-1} taken as zero.
fn lower_derivative(k: usize, xi: f64) -> f64 {
    if k == 0 {
        0.0
    } else {
        legendre_derivative(k - 1, xi)
    }
}

fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0, |acc, i| acc * i as f64)
}

impl CorrectionFunction for VcjhCorrection {
    fn compute_div_correction_function(&self, data: &FrElementData) -> Mat<f64> {
        let k = data.order();
        let nodes = data.sol_pnt_coords_1d();
        let n1 = nodes.len();
        let n_flx_1d = data.n_flx_pnts_1d();
        let mut table = Mat::zeros(data.n_sol_pnts(), data.n_flx_pnts());

        match data.shape() {
            ElementShape::Line => {
                for (i, &xi) in nodes.iter().enumerate() {
                    table[(i, 0)] = self.left_derivative(k, xi);
                    table[(i, 1)] = self.right_derivative(k, xi);
                }
            }
            ElementShape::Quadrilateral => {
                // Each face flux point corrects the single line of
                // solution points it sits on.
                let p = n1 - 1;
                for face in 0..4 {
                    for m in 0..n_flx_1d {
                        let flx = data.face_flx_pnt_conn()[face][m];
                        for a in 0..n1 {
                            let (sol, value) = match face {
                                0 => (a * n1 + m, self.left_derivative(k, nodes[a])),
                                1 => (m * n1 + a, self.right_derivative(k, nodes[a])),
                                2 => (a * n1 + (p - m), self.right_derivative(k, nodes[a])),
                                _ => ((p - m) * n1 + a, self.left_derivative(k, nodes[a])),
                            };
                            table[(sol, flx)] = value;
                        }
                    }
                }
            }
        }
        table
    }

    fn name(&self) -> &'static str {
        match self.parameter {
            VcjhParameter::Dg => "VCJH(DG)",
            VcjhParameter::Sd => "VCJH(SD)",
            VcjhParameter::Hu => "VCJH(HU)",
            VcjhParameter::Value(_) => "VCJH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::SolutionPointSet;
    use crate::polynomial::legendre;

    /// g_L itself, for checking the endpoint values.
    fn g_left(corr: &VcjhCorrection, k: usize, xi: f64) -> f64 {
        let eta = corr.eta(k);
        let lower = if k == 0 { 0.0 } else { legendre(k - 1, xi) };
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        0.5 * sign * (legendre(k, xi) - (eta * lower + legendre(k + 1, xi)) / (1.0 + eta))
    }

    #[test]
    fn test_endpoint_values() {
        for corr in [VcjhCorrection::dg(), VcjhCorrection::sd(), VcjhCorrection::hu()] {
            for k in 0..6 {
                assert!((g_left(&corr, k, -1.0) - 1.0).abs() < 1e-13);
                assert!(g_left(&corr, k, 1.0).abs() < 1e-13);
            }
        }
    }

    #[test]
    fn test_named_parameters_match_explicit_c() {
        // c_sd = 2k / ((2k+1)(k+1)(a_k k!)²); at k = 2, a_k k! = 3
        let k = 2;
        let c_sd = 4.0 / (5.0 * 3.0 * 9.0);
        assert!((VcjhCorrection::new(c_sd).eta(k) - VcjhCorrection::sd().eta(k)).abs() < 1e-14);
    }

    #[test]
    fn test_right_is_mirror_of_left() {
        let corr = VcjhCorrection::hu();
        for k in 1..5 {
            for &xi in &[-0.8, -0.1, 0.5] {
                let l = corr.left_derivative(k, -xi);
                let r = corr.right_derivative(k, xi);
                assert!((l + r).abs() < 1e-12, "g_R'(ξ) = -g_L'(-ξ)");
            }
        }
    }

    #[test]
    fn test_div_integrates_to_minus_one() {
        // ∫ g_L' dξ = g_L(1) - g_L(-1) = -1, and Gauss quadrature is exact
        // for the degree-k derivative.
        let data = FrElementData::new(ElementShape::Line, 3, SolutionPointSet::GaussLegendre)
            .unwrap();
        let table = VcjhCorrection::sd().compute_div_correction_function(&data);
        let weights = data.sol_pnt_weights_1d();
        let left: f64 = (0..4).map(|i| weights[i] * table[(i, 0)]).sum();
        let right: f64 = (0..4).map(|i| weights[i] * table[(i, 1)]).sum();
        assert!((left + 1.0).abs() < 1e-12);
        assert!((right - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quad_table_sparsity() {
        let data =
            FrElementData::new(ElementShape::Quadrilateral, 2, SolutionPointSet::GaussLegendre)
                .unwrap();
        let table = VcjhCorrection::dg().compute_div_correction_function(&data);
        // Each flux point touches exactly one line of three solution points
        for flx in 0..data.n_flx_pnts() {
            let nonzero = (0..data.n_sol_pnts())
                .filter(|&sol| table[(sol, flx)] != 0.0)
                .count();
            assert_eq!(nonzero, 3);
        }
    }
}
