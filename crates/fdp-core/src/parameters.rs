//! Model, grid, and numerical-control parameters for the penalty PDE.
//!
//! [`Parameters`] is created once, validated, and then only read. Every
//! component of the pricer takes it by reference instead of a long list of
//! positional numeric arguments.

use crate::{errors::Result, Price, Rate, Real, Size, Time, Volatility};

/// Immutable configuration of one pricing run.
///
/// The short-rate-like underlying `S` mean-reverts towards the
/// deterministic level `theta(t) = (1 + mu) X e^{mu t}` at speed `kappa`,
/// with local volatility `sigma S^beta`. The claim pays a continuous coupon
/// `C e^{-alpha t}`, returns `F` at maturity, and may be converted at any
/// time into `R S`.
///
/// `Default` is the reference configuration (`T = 2`, `F = 50`, `S_max = 5F`,
/// 100 × 100 grid).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters {
    /// Maturity `T` in years.
    pub maturity: Time,
    /// Face value `F` paid at maturity.
    pub face_value: Price,
    /// Conversion / recovery ratio `R`; the early-exercise floor is `R S`.
    pub recovery_rate: Real,
    /// Risk-free rate `r`.
    pub risk_free_rate: Rate,
    /// Mean-reversion speed `kappa`.
    pub kappa: Real,
    /// Drift `mu` of the reversion level.
    pub mu: Real,
    /// Spot price `S0` at which the value is reported.
    pub spot: Price,
    /// Strike `X` scaling the reversion level.
    pub strike: Price,
    /// Coupon rate `C`.
    pub coupon: Real,
    /// Coupon decay exponent `alpha`.
    pub alpha: Real,
    /// Elasticity exponent `beta` of the local volatility.
    pub beta: Real,
    /// Volatility `sigma`.
    pub sigma: Volatility,
    /// Number of time steps `i_max`.
    pub time_steps: Size,
    /// Number of space steps `j_max`; the grid has `j_max + 1` nodes.
    pub space_steps: Size,
    /// Upper end `S_max` of the spatial grid.
    pub s_max: Price,
    /// Penalty weight `rho`.
    pub penalty: Real,
    /// Convergence tolerance of the penalty iteration.
    pub tolerance: Real,
    /// Iteration cap of the penalty iteration, per time layer.
    pub max_iterations: Size,
}

impl Default for Parameters {
    fn default() -> Self {
        let face_value = 50.0;
        Self {
            maturity: 2.0,
            face_value,
            recovery_rate: 1.0,
            risk_free_rate: 0.0114,
            kappa: 0.125,
            mu: 0.0174,
            spot: 50.5,
            strike: 50.5,
            coupon: 0.285,
            alpha: 0.01,
            beta: 0.869,
            sigma: 0.668,
            time_steps: 100,
            space_steps: 100,
            s_max: 5.0 * face_value,
            penalty: 1e8,
            tolerance: 1e-4,
            max_iterations: 10_000,
        }
    }
}

impl Parameters {
    /// Replace the grid resolution.
    pub fn with_grid(mut self, time_steps: Size, space_steps: Size) -> Self {
        self.time_steps = time_steps;
        self.space_steps = space_steps;
        self
    }

    /// Replace the penalty-iteration controls.
    pub fn with_penalty(mut self, penalty: Real, tolerance: Real, max_iterations: Size) -> Self {
        self.penalty = penalty;
        self.tolerance = tolerance;
        self.max_iterations = max_iterations;
        self
    }

    /// Time step `dt = T / i_max`.
    #[inline]
    pub fn dt(&self) -> Time {
        self.maturity / self.time_steps as Real
    }

    /// Space step `dS = S_max / j_max`.
    #[inline]
    pub fn ds(&self) -> Real {
        self.s_max / self.space_steps as Real
    }

    /// Check that the configuration describes a solvable problem.
    ///
    /// # Errors
    /// Returns [`Error::Precondition`](crate::Error::Precondition) naming the
    /// first offending field.
    pub fn validate(&self) -> Result<()> {
        let reals = [
            ("maturity", self.maturity),
            ("face_value", self.face_value),
            ("recovery_rate", self.recovery_rate),
            ("risk_free_rate", self.risk_free_rate),
            ("kappa", self.kappa),
            ("mu", self.mu),
            ("spot", self.spot),
            ("strike", self.strike),
            ("coupon", self.coupon),
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("sigma", self.sigma),
            ("s_max", self.s_max),
            ("penalty", self.penalty),
            ("tolerance", self.tolerance),
        ];
        for (name, value) in reals {
            crate::ensure!(value.is_finite(), "{name} must be finite, got {value}");
        }
        crate::ensure!(self.maturity > 0.0, "maturity must be positive, got {}", self.maturity);
        crate::ensure!(self.s_max > 0.0, "s_max must be positive, got {}", self.s_max);
        crate::ensure!(self.spot >= 0.0, "spot must be non-negative, got {}", self.spot);
        crate::ensure!(self.sigma >= 0.0, "sigma must be non-negative, got {}", self.sigma);
        crate::ensure!(self.penalty > 0.0, "penalty must be positive, got {}", self.penalty);
        crate::ensure!(
            self.tolerance > 0.0,
            "tolerance must be positive, got {}",
            self.tolerance
        );
        crate::ensure!(self.time_steps >= 1, "time_steps must be at least 1");
        crate::ensure!(
            self.space_steps >= 2,
            "space_steps must be at least 2, got {}",
            self.space_steps
        );
        Ok(())
    }
}
