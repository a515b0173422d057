//! # fdp-core
//!
//! Core types, model parameters, and error definitions for fdpricer.
//!
//! This crate provides the foundational building blocks shared across the
//! other crates in the workspace: type aliases, the error hierarchy, and the
//! immutable [`Parameters`] aggregate that configures a pricing run.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_post!` macros.
pub mod errors;

/// Model, grid, and numerical-control parameters.
pub mod parameters;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use parameters::Parameters;
