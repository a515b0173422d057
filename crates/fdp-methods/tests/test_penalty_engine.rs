//! End-to-end scenarios for the penalty finite difference engine.
//!
//! These integration tests exercise `PenaltyFdEngine` on the reference
//! configuration and on its degenerate and refined variants.

use fdp_core::{Error, Parameters};
use fdp_methods::{PenaltyFdEngine, UpperBoundary};

fn reference() -> Parameters {
    Parameters::default()
}

// ───────────────────────── reference scenario ─────────────────────────

#[test]
fn test_reference_scenario_converges_near_face_value() {
    let p = reference();
    assert_eq!(p.s_max, 250.0);
    let value = PenaltyFdEngine::new(&p).price().unwrap();
    assert!(value.is_finite());
    assert!(
        (30.0..=70.0).contains(&value),
        "reference value {value} outside [30, 70]"
    );
}

#[test]
fn test_value_dominates_conversion_at_spot() {
    // The floor R·S0 = 50.5 binds only up to the penalty and tolerance slack.
    let p = reference();
    let value = PenaltyFdEngine::new(&p).price().unwrap();
    assert!(value >= p.recovery_rate * p.spot - 1e-3, "value {value}");
}

fn assert_floor_respected(p: &Parameters, boundary: UpperBoundary) {
    let solution = PenaltyFdEngine::new(p)
        .with_upper_boundary(boundary)
        .solve()
        .unwrap();
    let (grid, values) = (solution.grid(), solution.values());
    for j in 0..=p.space_steps {
        assert!(
            values[j] >= p.recovery_rate * grid[j] - 1e-3,
            "{boundary:?} node {j}: V = {} < R·S = {}",
            values[j],
            p.recovery_rate * grid[j]
        );
    }
}

#[test]
fn test_solution_respects_floor_everywhere() {
    assert_floor_respected(&reference(), UpperBoundary::RecoveryPin);
}

#[test]
fn test_asymptotic_boundary_respects_floor_everywhere() {
    assert_floor_respected(&reference(), UpperBoundary::Asymptotic);
}

// ───────────────────────── failure modes ─────────────────────────

#[test]
fn test_zero_iteration_cap_fails_on_first_layer() {
    let p = reference().with_penalty(1e8, 1e-4, 0);
    let err = PenaltyFdEngine::new(&p).price().unwrap_err();
    assert_eq!(
        err,
        Error::ConvergenceFailure {
            layer: p.time_steps - 1,
            iterations: 0,
        }
    );
}

#[test]
fn test_tight_iteration_cap_aborts_whole_run() {
    // The first solve always moves the terminal payoff by more than the tolerance.
    let p = reference().with_penalty(1e8, 1e-4, 1);
    let r = PenaltyFdEngine::new(&p).solve();
    assert!(matches!(r, Err(Error::ConvergenceFailure { iterations: 1, .. })));
}

// ───────────────────────── qualitative behaviour ─────────────────────────

#[test]
fn test_value_is_monotone_in_face_value() {
    let low = reference();
    let high = Parameters {
        face_value: 55.0,
        ..reference()
    };
    let v_low = PenaltyFdEngine::new(&low).price().unwrap();
    let v_high = PenaltyFdEngine::new(&high).price().unwrap();
    assert!(v_high >= v_low, "F = 55 gives {v_high} < F = 50 gives {v_low}");
}

#[test]
fn test_terminal_payoff_is_monotone_in_face_value() {
    let faces = [40.0, 50.0, 55.0, 80.0];
    let payoffs: Vec<Vec<f64>> = faces
        .iter()
        .map(|&face_value| {
            let p = Parameters {
                face_value,
                ..reference()
            };
            let engine = PenaltyFdEngine::new(&p);
            engine.terminal_values(&engine.grid())
        })
        .collect();
    for (pair, faces) in payoffs.windows(2).zip(faces.windows(2)) {
        for (j, (lo, hi)) in pair[0].iter().zip(&pair[1]).enumerate() {
            assert!(hi >= lo, "node {j}: F = {} gives {hi} < F = {} gives {lo}", faces[1], faces[0]);
        }
    }
}

#[test]
fn test_grid_refinement_is_consistent() {
    let coarse = reference();
    let fine = reference().with_grid(2 * coarse.time_steps, 2 * coarse.space_steps);
    let v_coarse = PenaltyFdEngine::new(&coarse).price().unwrap();
    let v_fine = PenaltyFdEngine::new(&fine).price().unwrap();
    let rel = (v_fine - v_coarse).abs() / v_coarse;
    assert!(rel < 0.02, "coarse {v_coarse}, fine {v_fine}, rel diff {rel}");
}

#[test]
fn test_asymptotic_upper_boundary_also_converges() {
    let p = reference();
    let value = PenaltyFdEngine::new(&p)
        .with_upper_boundary(UpperBoundary::Asymptotic)
        .price()
        .unwrap();
    assert!(value.is_finite());
    assert!((30.0..=70.0).contains(&value), "value {value}");
}

#[test]
fn test_lower_interpolation_order_stays_close() {
    let p = reference();
    let solution = PenaltyFdEngine::new(&p).solve().unwrap();
    let v8 = solution.value_at(p.spot).unwrap();
    let v4 = PenaltyFdEngine::new(&p)
        .with_interpolation_order(4)
        .price()
        .unwrap();
    assert!((v8 - v4).abs() < 0.05 * v8, "order 8: {v8}, order 4: {v4}");
}
