//! Configuration of the convective residual command.

/// Options of [`ConvRhsFluxReconstruction`](super::ConvRhsFluxReconstruction).
#[derive(Clone, Debug, PartialEq)]
pub struct ConvRhsConfig {
    /// Factor applied to every residual contribution (pseudo-time or
    /// Runge-Kutta stage factor)
    pub res_factor: f64,
    /// Cell divergence components below this magnitude are set to zero
    pub residual_eps: f64,
    /// Cell ID whose coefficients and residual contributions are logged at
    /// `trace` level
    pub trace_cell: Option<usize>,
}

impl Default for ConvRhsConfig {
    fn default() -> Self {
        Self {
            res_factor: 1.0,
            residual_eps: f64::EPSILON,
            trace_cell: None,
        }
    }
}

impl ConvRhsConfig {
    /// Create a configuration with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the residual factor.
    pub fn with_res_factor(mut self, res_factor: f64) -> Self {
        self.res_factor = res_factor;
        self
    }

    /// Set the snap-to-zero threshold of the cell divergence.
    pub fn with_residual_eps(mut self, residual_eps: f64) -> Self {
        self.residual_eps = residual_eps;
        self
    }

    /// Trace the contributions to one cell.
    pub fn with_trace_cell(mut self, cell_id: usize) -> Self {
        self.trace_cell = Some(cell_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ConvRhsConfig::new()
            .with_res_factor(0.5)
            .with_residual_eps(0.0)
            .with_trace_cell(3);
        assert_eq!(config.res_factor, 0.5);
        assert_eq!(config.residual_eps, 0.0);
        assert_eq!(config.trace_cell, Some(3));
        assert_eq!(ConvRhsConfig::default().residual_eps, f64::EPSILON);
    }
}
