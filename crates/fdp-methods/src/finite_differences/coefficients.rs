//! Crank-Nicolson coefficients of the penalised pricing PDE.
//!
//! The value `V(S, t)` solves, backward in time,
//!
//! ```text
//! ∂V/∂t + ½σ²S^{2β}·∂²V/∂S² + κ(θ(t) − S)·∂V/∂S − rV + C e^{−αt} = 0
//! ```
//!
//! on the uniform grid `S_j = j·dS`. [`CoefficientModel`] assembles one
//! row of the Crank-Nicolson system per grid node; the two boundary rows
//! use their own closed-form equations.

use std::str::FromStr;

use fdp_core::{errors::Result, Error, Parameters, Real};
use fdp_math::TridiagonalSystem;

/// Condition imposed at the top of the grid, `S = S_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpperBoundary {
    /// Dirichlet pin at the conversion value: `V = R·S_max`.
    #[default]
    RecoveryPin,
    /// Large-`S` asymptotic value of the claim, floored at `R·S_max`.
    ///
    /// `max(R·S_max, R(S_max − X)e^{−(κ+r)τ} + C/(α+r)·e^{−αt}
    ///  + (XR − C/(α+r)·e^{−αT})e^{−rτ})` with `τ = T − t`. The top row is
    /// never penalised, so the floor keeps `V ≥ R·S` at `S_max` too.
    Asymptotic,
}

impl FromStr for UpperBoundary {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pin" | "recovery" | "recovery_pin" => Ok(Self::RecoveryPin),
            "asymptotic" => Ok(Self::Asymptotic),
            other => Err(Error::InvalidArgument(format!(
                "unknown upper boundary '{other}', expected 'pin' or 'asymptotic'"
            ))),
        }
    }
}

/// Stencil coefficients of one interior row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StencilRow {
    /// Coefficient of `V[j−1]` at the new time layer.
    pub lower: Real,
    /// Coefficient of `V[j]` at the new time layer.
    pub diag: Real,
    /// Coefficient of `V[j+1]` at the new time layer.
    pub upper: Real,
}

/// Space- and time-dependent coefficients of the discretised PDE.
#[derive(Debug, Clone)]
pub struct CoefficientModel<'a> {
    params: &'a Parameters,
    dt: Real,
    ds: Real,
    upper_boundary: UpperBoundary,
}

impl<'a> CoefficientModel<'a> {
    /// Create the coefficient model for `params`.
    pub fn new(params: &'a Parameters, upper_boundary: UpperBoundary) -> Self {
        Self {
            params,
            dt: params.dt(),
            ds: params.ds(),
            upper_boundary,
        }
    }

    /// Mean-reversion level `θ(t_i) = (1 + μ)·X·e^{μ·i·dt}`.
    #[inline]
    pub fn theta(&self, i: usize) -> Real {
        let p = self.params;
        (1.0 + p.mu) * p.strike * (p.mu * i as Real * self.dt).exp()
    }

    /// Grid-scaled diffusion `σ²·j^{2β}·dS^{2(β−1)}`, i.e. `σ²S^{2β}/dS²`.
    #[inline]
    fn diffusion(&self, j: usize) -> Real {
        let p = self.params;
        p.sigma * p.sigma
            * (j as Real).powf(2.0 * p.beta)
            * self.ds.powf(2.0 * (p.beta - 1.0))
    }

    /// Central-difference drift weight `κ/(4dS)·(θ(t_i) − j·dS)`.
    #[inline]
    fn drift(&self, i: usize, j: usize) -> Real {
        self.params.kappa / (4.0 * self.ds) * (self.theta(i) - j as Real * self.ds)
    }

    /// Implicit-side coefficients of interior row `j` at layer `i`.
    pub fn interior(&self, i: usize, j: usize) -> StencilRow {
        let s2 = self.diffusion(j);
        let k = self.drift(i, j);
        StencilRow {
            lower: -0.25 * s2 + k,
            diag: 1.0 / self.dt + 0.5 * s2 + 0.5 * self.params.risk_free_rate,
            upper: -0.25 * s2 - k,
        }
    }

    /// Explicit-side right-hand side of interior row `j`, from the later
    /// layer `v_old`, including the coupon accrued at layer `i`.
    pub(crate) fn interior_rhs(&self, i: usize, j: usize, v_old: &[Real]) -> Real {
        let p = self.params;
        let s2 = self.diffusion(j);
        let k = self.drift(i, j);
        (0.25 * s2 - k) * v_old[j - 1]
            + (1.0 / self.dt - 0.5 * s2 - 0.5 * p.risk_free_rate) * v_old[j]
            + (0.25 * s2 + k) * v_old[j + 1]
            + p.coupon * (-p.alpha * i as Real * self.dt).exp()
    }

    /// Row at `S = 0`, where the diffusion vanishes and the drift points
    /// into the domain: `(diag, upper, rhs)`.
    pub(crate) fn lower_boundary(&self, i: usize, v_old: &[Real]) -> (Real, Real, Real) {
        let p = self.params;
        let pull = p.kappa * self.theta(i) / self.ds;
        let diag = -1.0 / self.dt - pull - 0.5 * p.risk_free_rate;
        // The coupon on this row decays at unit rate, not at alpha.
        let rhs = (-1.0 / self.dt + 0.5 * p.risk_free_rate) * v_old[0]
            - p.coupon * (-(i as Real) * self.dt).exp();
        (diag, pull, rhs)
    }

    /// Pinned value at `S = S_max` for layer `i`.
    pub fn upper_boundary_value(&self, i: usize) -> Real {
        let p = self.params;
        match self.upper_boundary {
            UpperBoundary::RecoveryPin => p.recovery_rate * p.s_max,
            UpperBoundary::Asymptotic => {
                let t = i as Real * self.dt;
                let tau = p.maturity - t;
                let annuity = p.coupon / (p.alpha + p.risk_free_rate);
                let asymptote = p.recovery_rate
                    * (p.s_max - p.strike)
                    * (-(p.kappa + p.risk_free_rate) * tau).exp()
                    + annuity * (-p.alpha * t).exp()
                    + (p.strike * p.recovery_rate - annuity * (-p.alpha * p.maturity).exp())
                        * (-p.risk_free_rate * tau).exp();
                asymptote.max(p.recovery_rate * p.s_max)
            }
        }
    }

    /// Assemble the unpenalised system for layer `i` from the later layer.
    ///
    /// # Errors
    /// [`Error::Precondition`] if `v_old` has fewer than three nodes.
    pub fn build_system(&self, i: usize, v_old: &[Real]) -> Result<TridiagonalSystem> {
        let n = v_old.len();
        fdp_core::ensure!(
            n >= 3,
            "layer {i}: need at least three grid nodes, got {n}"
        );
        let j_max = n - 1;
        let mut system = TridiagonalSystem::new(n);

        let (diag, upper, rhs) = self.lower_boundary(i, v_old);
        system.set_row(0, 0.0, diag, upper, rhs);

        for j in 1..j_max {
            let row = self.interior(i, j);
            system.set_row(j, row.lower, row.diag, row.upper, self.interior_rhs(i, j, v_old));
        }

        system.set_row(j_max, 0.0, 1.0, 0.0, self.upper_boundary_value(i));
        Ok(system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn theta_at_maturity_and_origin() {
        let p = Parameters::default();
        let m = CoefficientModel::new(&p, UpperBoundary::RecoveryPin);
        assert_abs_diff_eq!(m.theta(0), 1.0174 * 50.5, epsilon = 1e-12);
        let expected = 1.0174 * 50.5 * (0.0174_f64 * 2.0).exp();
        assert_abs_diff_eq!(m.theta(p.time_steps), expected, epsilon = 1e-12);
    }

    #[test]
    fn interior_row_matches_closed_form() {
        let p = Parameters::default();
        let m = CoefficientModel::new(&p, UpperBoundary::RecoveryPin);
        let (i, j) = (10, 20);
        let ds: f64 = 2.5;
        let s2 = 0.668 * 0.668 * (20.0_f64).powf(2.0 * 0.869) * ds.powf(2.0 * (0.869 - 1.0));
        let k = 0.125 / (4.0 * ds) * (m.theta(i) - 20.0 * ds);
        let row = m.interior(i, j);
        assert_abs_diff_eq!(row.lower, -0.25 * s2 + k, epsilon = 1e-12);
        assert_abs_diff_eq!(row.diag, 50.0 + 0.5 * s2 + 0.0057, epsilon = 1e-12);
        assert_abs_diff_eq!(row.upper, -0.25 * s2 - k, epsilon = 1e-12);
    }

    #[test]
    fn interior_rows_are_diagonally_dominant() {
        let p = Parameters::default();
        let m = CoefficientModel::new(&p, UpperBoundary::RecoveryPin);
        for i in [0, 50, 99] {
            for j in 1..p.space_steps {
                let row = m.interior(i, j);
                assert!(row.diag > row.lower.abs() + row.upper.abs(), "row {j} at layer {i}");
            }
        }
    }

    #[test]
    fn rhs_of_constant_vector_with_zero_volatility() {
        // With σ = 0 only drift, discounting, and coupon remain.
        let p = Parameters {
            sigma: 0.0,
            ..Parameters::default()
        };
        let m = CoefficientModel::new(&p, UpperBoundary::RecoveryPin);
        let v = vec![1.0; p.space_steps + 1];
        let rhs = m.interior_rhs(0, 5, &v);
        assert_abs_diff_eq!(rhs, 50.0 - 0.0057 + 0.285, epsilon = 1e-12);
    }

    #[test]
    fn built_system_has_pinned_boundaries() {
        let p = Parameters::default();
        let m = CoefficientModel::new(&p, UpperBoundary::RecoveryPin);
        let v_old = vec![50.0; p.space_steps + 1];
        let sys = m.build_system(42, &v_old).unwrap();
        let top = p.space_steps;
        assert_eq!(sys.size(), top + 1);
        assert_eq!(sys.lower[0], 0.0);
        assert_eq!((sys.lower[top], sys.diag[top], sys.upper[top]), (0.0, 1.0, 0.0));
        assert_abs_diff_eq!(sys.rhs[top], 250.0, epsilon = 1e-12);
        assert!(sys.diag[0] < 0.0 && sys.upper[0] > 0.0);
        assert!(sys.diag[0].abs() > sys.upper[0].abs());
    }

    #[test]
    fn lower_boundary_row_matches_closed_form() {
        let p = Parameters::default();
        let m = CoefficientModel::new(&p, UpperBoundary::RecoveryPin);
        let mut v_old = vec![0.0; p.space_steps + 1];
        v_old[0] = 48.0;
        let i = 10;
        let pull = 0.125 * m.theta(i) / 2.5;
        let (diag, upper, rhs) = m.lower_boundary(i, &v_old);
        assert_abs_diff_eq!(diag, -50.0 - pull - 0.0057, epsilon = 1e-12);
        assert_abs_diff_eq!(upper, pull, epsilon = 1e-12);
        // i·dt = 0.2, decayed at unit rate.
        let expected = (-50.0 + 0.0057) * 48.0 - 0.285 * (-0.2_f64).exp();
        assert_abs_diff_eq!(rhs, expected, epsilon = 1e-10);
    }

    #[test]
    fn short_layer_is_rejected() {
        let p = Parameters::default();
        let m = CoefficientModel::new(&p, UpperBoundary::RecoveryPin);
        for n in 0..3 {
            assert!(matches!(
                m.build_system(0, &vec![1.0; n]),
                Err(Error::Precondition(_))
            ));
        }
    }

    #[test]
    fn asymptotic_boundary_never_drops_below_conversion() {
        let p = Parameters::default();
        let m = CoefficientModel::new(&p, UpperBoundary::Asymptotic);
        for i in 0..=p.time_steps {
            assert!(m.upper_boundary_value(i) >= p.recovery_rate * p.s_max, "layer {i}");
        }
        // Far from maturity the raw asymptote sits below R·S_max.
        assert_abs_diff_eq!(m.upper_boundary_value(0), 250.0, epsilon = 1e-12);
    }

    #[test]
    fn asymptotic_boundary_at_maturity() {
        let p = Parameters::default();
        let m = CoefficientModel::new(&p, UpperBoundary::Asymptotic);
        let annuity = 0.285 / (0.01 + 0.0114);
        let decay = (-0.01_f64 * 2.0).exp();
        // τ = 0: R(S_max − X) + C/(α+r)·e^{−αT} + XR − C/(α+r)·e^{−αT}
        let expected = (250.0 - 50.5) + annuity * decay + 50.5 - annuity * decay;
        assert_abs_diff_eq!(m.upper_boundary_value(p.time_steps), expected, epsilon = 1e-10);
    }

    #[test]
    fn upper_boundary_parses_from_str() {
        assert_eq!("pin".parse::<UpperBoundary>(), Ok(UpperBoundary::RecoveryPin));
        assert_eq!(" Asymptotic ".parse::<UpperBoundary>(), Ok(UpperBoundary::Asymptotic));
        assert!(matches!(
            "linear".parse::<UpperBoundary>(),
            Err(Error::InvalidArgument(_))
        ));
    }
}
