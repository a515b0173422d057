//! Finite difference methods for the early-exercise pricing PDE.
//!
//! # Overview
//!
//! * [`CoefficientModel`] — Crank-Nicolson rows of the discretised PDE
//! * [`PenaltyTimeStepper`] — penalty iteration enforcing the floor `R·S`
//! * [`PenaltyFdEngine`] — backward time march and final interpolation

pub mod coefficients;
pub mod engine;
pub mod penalty;

pub use coefficients::{CoefficientModel, StencilRow, UpperBoundary};
pub use engine::{penalty_fd_price, FdSolution, PenaltyFdEngine, DEFAULT_INTERPOLATION_ORDER};
pub use penalty::{LayerOutcome, PenaltyTimeStepper};
