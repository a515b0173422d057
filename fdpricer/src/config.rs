//! Run configuration read from the environment.
//!
//! Every field of [`Parameters`] can be overridden by an `FDP_*` variable;
//! anything unset keeps the reference value. A `.env` file in the working
//! directory is loaded first.

use std::fmt::Display;
use std::str::FromStr;

use fdp_core::{errors::Result, Error, Parameters};
use fdp_methods::finite_differences::{PenaltyFdEngine, UpperBoundary, DEFAULT_INTERPOLATION_ORDER};

/// Parameters plus the engine settings of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PricerConfig {
    /// Model, grid, and penalty parameters.
    pub params: Parameters,
    /// Condition imposed at `S_max`.
    pub upper_boundary: UpperBoundary,
    /// Stencil size of the final interpolation.
    pub interpolation_order: usize,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            params: Parameters::default(),
            upper_boundary: UpperBoundary::default(),
            interpolation_order: DEFAULT_INTERPOLATION_ORDER,
        }
    }
}

impl PricerConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// `FDP_S_MAX` defaults to five times the (possibly overridden) face value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Parameters::default();
        let face_value = parse_or(&lookup, "FDP_FACE_VALUE", d.face_value)?;
        let params = Parameters {
            maturity: parse_or(&lookup, "FDP_MATURITY", d.maturity)?,
            face_value,
            recovery_rate: parse_or(&lookup, "FDP_RECOVERY_RATE", d.recovery_rate)?,
            risk_free_rate: parse_or(&lookup, "FDP_RISK_FREE_RATE", d.risk_free_rate)?,
            kappa: parse_or(&lookup, "FDP_KAPPA", d.kappa)?,
            mu: parse_or(&lookup, "FDP_MU", d.mu)?,
            spot: parse_or(&lookup, "FDP_SPOT", d.spot)?,
            strike: parse_or(&lookup, "FDP_STRIKE", d.strike)?,
            coupon: parse_or(&lookup, "FDP_COUPON", d.coupon)?,
            alpha: parse_or(&lookup, "FDP_ALPHA", d.alpha)?,
            beta: parse_or(&lookup, "FDP_BETA", d.beta)?,
            sigma: parse_or(&lookup, "FDP_SIGMA", d.sigma)?,
            time_steps: parse_or(&lookup, "FDP_TIME_STEPS", d.time_steps)?,
            space_steps: parse_or(&lookup, "FDP_SPACE_STEPS", d.space_steps)?,
            s_max: parse_or(&lookup, "FDP_S_MAX", 5.0 * face_value)?,
            penalty: parse_or(&lookup, "FDP_PENALTY", d.penalty)?,
            tolerance: parse_or(&lookup, "FDP_TOLERANCE", d.tolerance)?,
            max_iterations: parse_or(&lookup, "FDP_MAX_ITERATIONS", d.max_iterations)?,
        };
        params.validate()?;

        Ok(Self {
            params,
            upper_boundary: parse_or(&lookup, "FDP_UPPER_BOUNDARY", UpperBoundary::default())?,
            interpolation_order: parse_or(
                &lookup,
                "FDP_INTERPOLATION_ORDER",
                DEFAULT_INTERPOLATION_ORDER,
            )?,
        })
    }

    /// Engine configured from this run configuration.
    pub fn engine(&self) -> PenaltyFdEngine<'_> {
        PenaltyFdEngine::new(&self.params)
            .with_upper_boundary(self.upper_boundary)
            .with_interpolation_order(self.interpolation_order)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::InvalidArgument(format!("{key}: {e}"))),
        None => Ok(default),
    }
}
