//! # fdp-math
//!
//! Numerical building blocks of the finite-difference pricer: the Thomas
//! algorithm for tridiagonal systems and local Lagrange interpolation on a
//! uniform grid.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// 1D interpolation schemes.
pub mod interpolations;

/// Tridiagonal linear systems.
pub mod tridiagonal;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use interpolations::{lagrange_interpolation, Interpolation1D, LocalLagrangeInterpolation};
pub use tridiagonal::{thomas_solve, TridiagonalSystem};
