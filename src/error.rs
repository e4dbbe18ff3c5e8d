//! Error types for FR residual assembly.
//!
//! Only precondition violations are errors: configuration or sizing
//! problems that make the step meaningless. Numerical noise and
//! non-updatable neighbours are handled inline and never surface here.

use thiserror::Error;

/// Errors raised by setup or by a residual sweep.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrError {
    /// The mesh carries more element types than the residual command supports.
    #[error("Expected exactly one element type, found {found}")]
    MultipleElementTypes { found: usize },

    /// `execute` was called before `setup`.
    #[error("Residual command used before setup")]
    NotSetUp,

    /// A buffer or table does not have the size the discretization requires.
    #[error("Size mismatch for {what}: expected {expected}, got {actual}")]
    SizeMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// A topological region set name that the mesh does not provide.
    #[error("Unknown topological region set: {0}")]
    UnknownRegion(String),

    /// Mesh construction or lookup failed.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Polynomial order not supported by the requested element data.
    #[error("Invalid polynomial order {order}")]
    InvalidOrder { order: usize },
}

impl FrError {
    /// Create a size mismatch error.
    pub fn size_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FrError>;
