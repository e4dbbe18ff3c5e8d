//! Riemann (numerical) flux functions.
//!
//! A Riemann flux computes the single common normal flux at a face flux
//! point from the two extrapolated states:
//! - [`RusanovFlux`]: local Lax-Friedrichs, works for any model
//! - [`CentralFlux`]: arithmetic average, works for any model
//! - [`UpwindFlux`]: exact upwinding for linear advection and Burgers
//! - [`RoeFlux`]: Roe solver for the Euler equations
//!
//! # Flux Trait
//!
//! The [`RiemannFlux`] trait is generic over the physical model, so a flux
//! that only makes sense for one model (Roe for Euler) is only available
//! for that model.

mod roe;
pub mod traits;
mod upwind;

pub use roe::RoeFlux;
pub use traits::{CentralFlux, RiemannFlux, RusanovFlux};
pub use upwind::UpwindFlux;
