//! Synthetic patient sources for the triage calibration game.
//!
//! The engine crate treats patient generation as an external capability
//! behind [`PatientProvider`](triage_engine::PatientProvider). This crate
//! supplies the stochastic implementation: a seeded Dirichlet "fake
//! classifier" producing confidence vectors, an optional belief-distorting
//! simplex transform (for simulating miscalibration), and a provider that
//! turns classifier samples into [`Patient`](triage_engine::Patient) values.

pub use self::{classifier::*, provider::*, seed::*, transform::*};

pub mod classifier;
pub mod provider;
pub mod seed;
pub mod transform;

use triage_engine::Disease;

/// Dirichlet concentration parameters were rejected (every entry must be
/// positive and finite).
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("invalid Dirichlet concentration parameters {alpha:?}")]
pub struct InvalidAlphaError {
    /// The rejected parameter vector.
    pub alpha: [f64; Disease::LEN],
}
