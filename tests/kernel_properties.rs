//! End-to-end properties of the integration and inversion kernel.
//!
//! These tests drive the public API only.

use std::sync::Once;

use shannon_numerics::{
    effective_shannon_probability_avg, effective_shannon_probability_rms, inverse_cdf,
    inverse_shannon_capacity, phi, romberg, shannon_capacity, GaussianCdf, InverseCdfSolver,
    IntegrationState, NewtonConfig, NumericError, RombergConfig, RombergIntegrator,
    TrapezoidRefiner,
};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[test]
fn test_phi_anchor_points() {
    init_tracing();
    assert!((phi(0.0).unwrap() - 0.5).abs() < 1e-9);
    for (x, expected) in [(1.0, 0.8413), (1.96, 0.9750), (2.58, 0.9951)] {
        let value = phi(x).unwrap();
        assert!((value - expected).abs() < 1e-4, "phi({}) = {}", x, value);
    }
}

#[test]
fn test_phi_non_decreasing_over_sampled_range() {
    let cdf = GaussianCdf::default();
    let values: Vec<f64> = (0..=800)
        .map(|i| cdf.phi(-4.0 + i as f64 * 0.01).unwrap())
        .collect();
    assert!(values.windows(2).all(|w| w[1] >= w[0]));
    assert!(values[0] > 0.0 && values[800] < 1.0);
}

#[test]
fn test_inverse_round_trip() {
    init_tracing();
    for x in [-2.5, -1.0, 0.0, 1.0, 2.5] {
        let recovered = inverse_cdf(phi(x).unwrap()).unwrap();
        assert!((recovered - x).abs() < 1e-6, "x = {}, recovered {}", x, recovered);
    }
}

#[test]
fn test_constant_integrand_is_exact() {
    let integrator = RombergIntegrator::new(RombergConfig {
        extrapolation_points: 2,
        ..RombergConfig::default()
    })
    .unwrap();
    let result = integrator.integrate(&|_x: f64| 1.0, 0.0, 1.0).unwrap();
    assert_eq!(result.value, 1.0);
    assert!(result.iterations <= 2, "took {} iterations", result.iterations);
}

#[test]
fn test_constant_integrand_with_default_config() {
    // Convergence is first tested once k = 5 estimates exist.
    let config = RombergConfig::default();
    let result = RombergIntegrator::default()
        .integrate(&|_x: f64| 1.0, 0.0, 1.0)
        .unwrap();
    assert_eq!(result.value, 1.0);
    assert_eq!(result.iterations, config.extrapolation_points);
}

#[test]
fn test_deep_tail_inverse_is_not_trusted() {
    init_tracing();
    for p in [1e-300, 1e-15] {
        match inverse_cdf(p) {
            Err(NumericError::DidNotConverge { estimate, .. }) => {
                assert!(estimate.is_finite() && estimate < -7.0, "estimate {}", estimate);
            }
            other => panic!("expected DidNotConverge for {}, got {:?}", p, other),
        }
    }
}

#[test]
fn test_phi_stays_in_unit_interval() {
    for x in [-1000.0, -20.0, -9.0, 9.0, 100.0, 1000.0] {
        let value = phi(x).unwrap();
        assert!((0.0..=1.0).contains(&value), "phi({}) = {}", x, value);
    }
    assert!(phi(100.0).unwrap() <= phi(1000.0).unwrap());
}

#[test]
fn test_capacity_inverse_near_even_odds() {
    let p = inverse_shannon_capacity(shannon_capacity(0.5001).unwrap()).unwrap();
    assert!((p - 0.5001).abs() < 1e-9);
    assert!(inverse_shannon_capacity(1e-9).is_ok());
}

#[test]
fn test_degenerate_interval() {
    let result = RombergIntegrator::default()
        .integrate(&|x: f64| 1.0 / (1.0 + x * x), 0.7, 0.7)
        .unwrap();
    assert_eq!(result.value, 0.0);
    assert_eq!(result.iterations, 0);
}

#[test]
fn test_interleaved_states_do_not_interfere() {
    // Drive two integrations step by step, alternating between them.
    let f = |x: f64| x.exp();
    let g = |x: f64| 1.0 / (1.0 + x);

    let mut refiner_f = TrapezoidRefiner::new();
    let mut refiner_g = TrapezoidRefiner::new();
    let mut state_f = IntegrationState::new();
    let mut state_g = IntegrationState::new();

    for n in 1..=10 {
        state_f.push(refiner_f.refine(&f, 0.0, 1.0, n).unwrap());
        state_g.push(refiner_g.refine(&g, 0.0, 1.0, n).unwrap());
    }

    let value_f = state_f.extrapolate(5).unwrap().value;
    let value_g = state_g.extrapolate(5).unwrap().value;
    assert!((value_f - (std::f64::consts::E - 1.0)).abs() < 1e-12);
    assert!((value_g - std::f64::consts::LN_2).abs() < 1e-12);

    // Same answers as uninterrupted runs.
    assert!((value_f - romberg(&f, 0.0, 1.0).unwrap()).abs() < 1e-12);
    assert!((value_g - romberg(&g, 0.0, 1.0).unwrap()).abs() < 1e-12);
}

#[test]
fn test_concurrent_evaluation_across_threads() {
    init_tracing();
    let solver = InverseCdfSolver::default();
    let targets = [0.05, 0.25, 0.5, 0.75, 0.95, 0.99];

    let sequential: Vec<f64> = targets.iter().map(|&p| solver.solve(p).unwrap()).collect();
    let concurrent: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = targets
            .iter()
            .map(|&p| {
                let solver = &solver;
                scope.spawn(move || solver.solve(p))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect()
    });

    assert_eq!(sequential, concurrent);
}

#[test]
fn test_out_of_range_targets_are_errors() {
    for p in [0.0, 1.0] {
        match inverse_cdf(p) {
            Err(NumericError::InvalidProbability { value }) => assert_eq!(value, p),
            other => panic!("expected InvalidProbability for {}, got {:?}", p, other),
        }
    }
}

#[test]
fn test_newton_cap_is_honoured() {
    let solver = InverseCdfSolver::new(
        RombergConfig::default(),
        NewtonConfig {
            tolerance: 1e-15,
            max_iterations: 2,
        },
    )
    .unwrap();
    match solver.solve(0.995) {
        Err(NumericError::DidNotConverge { iterations, estimate, .. }) => {
            assert_eq!(iterations, 2);
            assert!(estimate.is_finite());
        }
        other => panic!("expected DidNotConverge, got {:?}", other),
    }
}

#[test]
fn test_capacity_round_trip() {
    for p in [0.52, 0.6, 0.8, 0.95] {
        let recovered = inverse_shannon_capacity(shannon_capacity(p).unwrap()).unwrap();
        assert!((recovered - p).abs() < 1e-9);
    }
}

#[test]
fn test_effective_probability_below_raw_probability() {
    init_tracing();
    let rms = effective_shannon_probability_rms(0.02, 100).unwrap();
    assert!(rms.effective_probability < rms.probability);
    assert!(rms.confidence > 0.5 && rms.confidence < 1.0);

    let avg = effective_shannon_probability_avg(0.0016, 0.04, 10_000).unwrap();
    assert!(avg.effective_probability < avg.probability);
    assert!(avg.error_level > 0.0);
}

#[test]
fn test_config_from_partial_json() {
    let config: RombergConfig = serde_json::from_str(r#"{"tolerance": 1e-10}"#).unwrap();
    assert!((config.tolerance - 1e-10).abs() < 1e-24);
    assert_eq!(config.max_iterations, RombergConfig::default().max_iterations);

    let integrator = RombergIntegrator::new(config).unwrap();
    let value = integrator.integrate(&|x: f64| x.cos(), 0.0, 1.0).unwrap().value;
    assert!((value - 1f64.sin()).abs() < 1e-9);
}
