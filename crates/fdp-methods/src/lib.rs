//! # fdp-methods
//!
//! Numerical methods: the penalty-method Crank-Nicolson finite difference
//! scheme for claims with an early-exercise (conversion) floor.
//!
//! # Modules
//!
//! * [`finite_differences`] — coefficient model, penalty time stepper, and
//!   the backward-marching engine

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Finite difference methods: coefficients, penalty iteration, engine.
pub mod finite_differences;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use finite_differences::{
    penalty_fd_price, CoefficientModel, FdSolution, PenaltyFdEngine, PenaltyTimeStepper,
    UpperBoundary,
};
