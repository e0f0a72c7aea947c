//! Proptest strategies and property tests for the numerical kernel.

use proptest::prelude::*;

use crate::capacity::{inverse_shannon_capacity, shannon_capacity};
use crate::inverse::inverse_cdf;
use crate::normal::phi;
use crate::romberg::romberg;

/// Abscissas where Φ stays well clear of 0 and 1 in double precision.
pub fn central_abscissa() -> impl Strategy<Value = f64> {
    -5.0f64..5.0
}

/// Abscissas reaching far past the point where Φ saturates.
pub fn wide_abscissa() -> impl Strategy<Value = f64> {
    -40.0f64..40.0
}

/// Probabilities whose quantiles lie within a few standard deviations.
pub fn moderate_probability() -> impl Strategy<Value = f64> {
    0.001f64..0.999
}

/// Shannon probabilities strictly above one half.
pub fn favourable_probability() -> impl Strategy<Value = f64> {
    0.501f64..0.999
}

/// Positive cubic coefficients, so the integral over (0, b) stays away from zero.
pub fn cubic_coefficients() -> impl Strategy<Value = [f64; 4]> {
    prop::array::uniform4(0.1f64..10.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn phi_is_a_probability(x in wide_abscissa()) {
        let value = phi(x).unwrap();
        prop_assert!((0.0..=1.0).contains(&value), "Φ({}) = {}", x, value);
    }

    #[test]
    fn phi_is_symmetric(x in central_abscissa()) {
        let sum = phi(x).unwrap() + phi(-x).unwrap();
        prop_assert!((sum - 1.0).abs() < 1e-12, "Φ({0}) + Φ(-{0}) = {1}", x, sum);
    }

    #[test]
    fn phi_is_monotone(x in wide_abscissa(), dx in 0.01f64..1.0) {
        let (low, high) = (phi(x).unwrap(), phi(x + dx).unwrap());
        prop_assert!(high >= low, "Φ({}) = {} > Φ({}) = {}", x, low, x + dx, high);
    }

    #[test]
    fn inverse_cdf_round_trips(p in moderate_probability()) {
        let x = inverse_cdf(p).unwrap();
        let recovered = phi(x).unwrap();
        prop_assert!((recovered - p).abs() < 1e-9, "Φ(Φ⁻¹({})) = {}", p, recovered);
    }

    #[test]
    fn capacity_round_trips(p in favourable_probability()) {
        let c = shannon_capacity(p).unwrap();
        let recovered = inverse_shannon_capacity(c).unwrap();
        prop_assert!((recovered - p).abs() < 1e-8, "p = {}, recovered {}", p, recovered);
    }

    #[test]
    fn romberg_integrates_cubics(coefficients in cubic_coefficients(), b in 0.5f64..4.0) {
        let [c0, c1, c2, c3] = coefficients;
        let f = |x: f64| c0 + c1 * x + c2 * x * x + c3 * x * x * x;
        let exact = c0 * b + c1 * b * b / 2.0 + c2 * b.powi(3) / 3.0 + c3 * b.powi(4) / 4.0;
        let value = romberg(&f, 0.0, b).unwrap();
        prop_assert!((value - exact).abs() < 1e-10 * exact, "got {}, exact {}", value, exact);
    }
}
