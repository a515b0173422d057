//! Backward time march of the penalised Crank-Nicolson scheme.
//!
//! [`PenaltyFdEngine`] sets the terminal payoff `max(F, R·S)` on the grid,
//! solves every time layer from `i_max − 1` down to `0` with the
//! [`PenaltyTimeStepper`], and reads the value at the spot off the final
//! layer with an 8-point local Lagrange polynomial.

use std::time::Instant;

use fdp_core::{errors::Result, Parameters, Price, Real};
use fdp_math::interpolations::{lagrange_interpolation, LocalLagrangeInterpolation};

use super::{CoefficientModel, PenaltyTimeStepper, UpperBoundary};

/// Stencil size used to read the value off the grid.
pub const DEFAULT_INTERPOLATION_ORDER: usize = 8;

/// Penalty-method Crank-Nicolson finite difference engine.
///
/// # Example
/// ```
/// use fdp_core::Parameters;
/// use fdp_methods::PenaltyFdEngine;
///
/// let params = Parameters::default().with_grid(20, 40);
/// let value = PenaltyFdEngine::new(&params).price().unwrap();
/// assert!(value.is_finite() && value > params.face_value * 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct PenaltyFdEngine<'a> {
    params: &'a Parameters,
    upper_boundary: UpperBoundary,
    interpolation_order: usize,
}

impl<'a> PenaltyFdEngine<'a> {
    /// Create an engine with the default boundary and interpolation order.
    pub fn new(params: &'a Parameters) -> Self {
        Self {
            params,
            upper_boundary: UpperBoundary::default(),
            interpolation_order: DEFAULT_INTERPOLATION_ORDER,
        }
    }

    /// Select the condition imposed at `S_max`.
    pub fn with_upper_boundary(mut self, upper_boundary: UpperBoundary) -> Self {
        self.upper_boundary = upper_boundary;
        self
    }

    /// Select the number of points of the final interpolation stencil.
    pub fn with_interpolation_order(mut self, order: usize) -> Self {
        self.interpolation_order = order;
        self
    }

    /// Nodes `S_j = j·dS`, `j = 0..=j_max`.
    pub fn grid(&self) -> Vec<Price> {
        let ds = self.params.ds();
        (0..=self.params.space_steps)
            .map(|j| j as Real * ds)
            .collect()
    }

    /// Terminal payoff `max(F, R·S_j)`.
    pub fn terminal_values(&self, grid: &[Price]) -> Vec<Real> {
        let p = self.params;
        grid.iter()
            .map(|&s| p.face_value.max(p.recovery_rate * s))
            .collect()
    }

    /// March the scheme back to `t = 0` and return the whole solution.
    ///
    /// # Errors
    /// Fails on invalid parameters, on the first layer whose penalty
    /// iteration does not converge, or on a singular system.
    pub fn solve(&self) -> Result<FdSolution> {
        let p = self.params;
        p.validate()?;
        let started = Instant::now();
        tracing::info!(
            time_steps = p.time_steps,
            space_steps = p.space_steps,
            upper_boundary = ?self.upper_boundary,
            "penalty finite difference solve started"
        );

        let grid = self.grid();
        let model = CoefficientModel::new(p, self.upper_boundary);
        let stepper = PenaltyTimeStepper::new(p, &grid);

        let mut v_old = self.terminal_values(&grid);
        let mut layer_iterations = vec![0; p.time_steps];
        for i in (0..p.time_steps).rev() {
            let base = model.build_system(i, &v_old)?;
            let outcome = stepper.step(i, &base, v_old)?;
            layer_iterations[i] = outcome.iterations;
            v_old = outcome.values;
        }

        let solution = FdSolution {
            grid,
            values: v_old,
            layer_iterations,
            interpolation_order: self.interpolation_order,
        };
        tracing::info!(
            time_steps = p.time_steps,
            space_steps = p.space_steps,
            total_iterations = solution.total_iterations(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "penalty finite difference solve finished"
        );
        Ok(solution)
    }

    /// Value at the configured spot and `t = 0`.
    pub fn price(&self) -> Result<Real> {
        self.solve()?.value_at(self.params.spot)
    }
}

/// Converged values at `t = 0` plus per-layer diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct FdSolution {
    grid: Vec<Price>,
    values: Vec<Real>,
    layer_iterations: Vec<usize>,
    interpolation_order: usize,
}

impl FdSolution {
    /// Grid nodes.
    pub fn grid(&self) -> &[Price] {
        &self.grid
    }

    /// Values at `t = 0` on the grid.
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// Penalty iterations used by each layer, indexed by layer `i`.
    pub fn layer_iterations(&self) -> &[usize] {
        &self.layer_iterations
    }

    /// Sum of penalty iterations over all layers.
    pub fn total_iterations(&self) -> usize {
        self.layer_iterations.iter().sum()
    }

    /// Largest iteration count of any single layer.
    pub fn max_layer_iterations(&self) -> usize {
        self.layer_iterations.iter().copied().max().unwrap_or(0)
    }

    /// Interpolated value at `spot`.
    ///
    /// # Errors
    /// [`Error::Postcondition`](fdp_core::Error::Postcondition) if the
    /// polynomial overflows, e.g. for a spot far outside the grid.
    pub fn value_at(&self, spot: Price) -> Result<Real> {
        let value =
            lagrange_interpolation(&self.values, &self.grid, spot, self.interpolation_order)?;
        fdp_core::ensure_post!(
            value.is_finite(),
            "interpolated value at S = {spot} is not finite"
        );
        Ok(value)
    }

    /// Reusable interpolation of the value profile, for querying many spots.
    pub fn interpolation(&self) -> Result<LocalLagrangeInterpolation> {
        LocalLagrangeInterpolation::new(&self.grid, &self.values, self.interpolation_order)
    }
}

/// Price the claim described by `params` with the default engine settings.
pub fn penalty_fd_price(params: &Parameters) -> Result<Real> {
    PenaltyFdEngine::new(params).price()
}
