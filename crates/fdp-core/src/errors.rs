//! Error types for fdpricer.
//!
//! A single `thiserror`-derived enum covers every failure the pricer can
//! report. Pre- and postcondition checks go through the `ensure!` and
//! `ensure_post!` macros defined here.

use thiserror::Error;

/// The top-level error type used throughout fdpricer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Invalid argument, typically a malformed configuration value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The penalty iteration of a time layer hit its iteration cap
    /// without meeting the convergence tolerance.
    #[error("no convergence at time layer {layer} after {iterations} penalty iterations")]
    ConvergenceFailure {
        /// Time-layer index `i` that failed.
        layer: usize,
        /// Number of penalty iterations performed.
        iterations: usize,
    },

    /// An interpolation was requested with no usable sample points.
    #[error("degenerate interpolation request: {0}")]
    DegenerateInterpolation(String),

    /// A zero or non-finite pivot appeared during tridiagonal elimination.
    #[error("singular tridiagonal system: zero pivot at row {row}")]
    SingularSystem {
        /// Row whose pivot vanished.
        row: usize,
    },
}

/// Shorthand `Result` type used throughout fdpricer.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use fdp_core::{ensure, errors::Error};
/// fn positive(x: f64) -> fdp_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use fdp_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> fdp_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result.is_finite(), "result must be finite, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(f64::INFINITY).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}
