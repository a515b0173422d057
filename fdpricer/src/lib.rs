//! # fdpricer
//!
//! Penalty-method Crank-Nicolson finite difference pricer for claims that
//! pay a face value at maturity and may be converted at any time into a
//! multiple of the underlying.
//!
//! This crate is a **façade** that re-exports the public items of the
//! workspace crates, plus the environment-driven run configuration used by
//! the `fdpricer` binary.
//!
//! ## Quick start
//!
//! ```rust
//! use fdpricer::{Parameters, PenaltyFdEngine};
//!
//! let params = Parameters::default().with_grid(20, 40);
//! let value = PenaltyFdEngine::new(&params).price().unwrap();
//! assert!(value.is_finite());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, parameters, and error definitions.
pub use fdp_core as core;

/// Tridiagonal solver and interpolation.
pub use fdp_math as math;

/// Finite difference engine.
pub use fdp_methods as methods;

/// Environment-driven run configuration.
pub mod config;

pub use config::PricerConfig;
pub use fdp_core::{Error, Parameters, Result};
pub use fdp_methods::{penalty_fd_price, FdSolution, PenaltyFdEngine, UpperBoundary};
