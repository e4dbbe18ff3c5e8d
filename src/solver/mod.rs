//! FR convective residual.
//!
//! # Submodules
//!
//! - [`conv_rhs`]: the residual command and its per-step sweep
//! - [`face_data`]: flux point data staged for one face
//! - [`interface`]: common flux, correction drivers and wave speeds
//! - [`cell_residual`]: discontinuous flux divergence inside a cell
//! - [`assembler`]: accumulation into the shared buffers
//! - [`state`], [`sockets`], [`config`]: inputs and outputs of a step

pub mod assembler;
pub mod cell_residual;
pub mod config;
pub mod conv_rhs;
pub mod face_data;
pub mod interface;
mod partition;
pub mod sockets;
pub mod state;
pub mod tables;

pub use config::ConvRhsConfig;
pub use conv_rhs::{ConvRhsFluxReconstruction, SweepStats};
pub use face_data::FaceFluxData;
pub use sockets::{CONV_RHS_SOCKETS, ConvRhsSockets, needs_sockets};
pub use state::StateField;
pub use tables::FrTables;
