//! Penalty iteration enforcing the early-exercise floor within one layer.
//!
//! Starting from the previous layer's solution, each pass copies the base
//! Crank-Nicolson system, stiffens every interior row whose current value
//! lies below the floor `R·S_j`, and re-solves. The layer has converged once
//! two successive solutions differ by less than the tolerance in the
//! Euclidean norm; reaching the iteration cap first is fatal.

use fdp_core::{errors::Result, Error, Parameters, Real};
use fdp_math::TridiagonalSystem;

/// Converged values of one time layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerOutcome {
    /// Option values on the grid.
    pub values: Vec<Real>,
    /// Number of penalised linear solves that were needed.
    pub iterations: usize,
}

/// Solves one backward time step under the obstacle constraint.
#[derive(Debug, Clone)]
pub struct PenaltyTimeStepper {
    obstacle: Vec<Real>,
    penalty: Real,
    tolerance: Real,
    max_iterations: usize,
}

impl PenaltyTimeStepper {
    /// Create a stepper for the floor `R·S_j` on `grid`.
    pub fn new(params: &Parameters, grid: &[Real]) -> Self {
        Self {
            obstacle: grid.iter().map(|&s| params.recovery_rate * s).collect(),
            penalty: params.penalty,
            tolerance: params.tolerance,
            max_iterations: params.max_iterations,
        }
    }

    /// The floor `R·S_j` at every node.
    pub fn obstacle(&self) -> &[Real] {
        &self.obstacle
    }

    /// Stiffen the rows of `system` whose `candidate` value breaches the floor.
    ///
    /// Boundary rows keep their own equations and are never penalised.
    fn apply_penalty(&self, system: &mut TridiagonalSystem, candidate: &[Real]) {
        let n = system.size();
        for j in 1..n.saturating_sub(1) {
            if candidate[j] < self.obstacle[j] {
                system.diag[j] += self.penalty;
                system.rhs[j] += self.penalty * self.obstacle[j];
            }
        }
    }

    /// Run the penalty iteration for layer `layer`.
    ///
    /// `base` is the unpenalised system of the layer and `guess` the starting
    /// candidate, normally the converged values of the later layer.
    ///
    /// # Errors
    /// * [`Error::ConvergenceFailure`] if `max_iterations` passes do not bring
    ///   the squared update below `tolerance²`.
    /// * [`Error::SingularSystem`] if a penalised system cannot be solved.
    pub fn step(
        &self,
        layer: usize,
        base: &TridiagonalSystem,
        guess: Vec<Real>,
    ) -> Result<LayerOutcome> {
        fdp_core::ensure!(
            base.size() == self.obstacle.len() && guess.len() == self.obstacle.len(),
            "layer {layer}: system size {} and guess size {} must match grid size {}",
            base.size(),
            guess.len(),
            self.obstacle.len()
        );

        let threshold = self.tolerance * self.tolerance;
        let mut candidate = guess;
        for pass in 0..self.max_iterations {
            let mut system = base.clone();
            self.apply_penalty(&mut system, &candidate);
            let next = system.solve()?;

            let error: Real = next
                .iter()
                .zip(&candidate)
                .map(|(new, old)| (new - old) * (new - old))
                .sum();
            candidate = next;

            if error < threshold {
                tracing::debug!(layer, iterations = pass + 1, "penalty iteration converged");
                return Ok(LayerOutcome {
                    values: candidate,
                    iterations: pass + 1,
                });
            }
        }

        tracing::error!(
            layer,
            iterations = self.max_iterations,
            "penalty iteration did not converge"
        );
        Err(Error::ConvergenceFailure {
            layer,
            iterations: self.max_iterations,
        })
    }
}
