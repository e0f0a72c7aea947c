//! Shannon information capacity of a biased wager.
//!
//! ```text
//! C(p)  = 1 + p·log₂(p) + (1 − p)·log₂(1 − p)
//! C'(p) = (ln p − ln(1 − p)) / ln 2
//! ```
//!
//! C is convex and increasing on (0.5, 1), running from 0 to 1. Given a
//! measured growth exponent `C` (from `2^(C·t)`), the inverse recovers the
//! Shannon probability `p`.
//!
//! Reference: Schroeder, *Fractals, Chaos, Power Laws* (1991), pp. 128, 151.

use std::f64::consts::LN_2;

use tracing::{debug, warn};

use crate::adaptive::{capacity_tolerance, stall_threshold};
use crate::error::{NumericError, NumericResult};
use crate::types::NewtonConfig;

/// Newton starting point, midway through (0.5, 1).
const CAPACITY_START: f64 = 0.75;

fn check_probability(p: f64) -> NumericResult<()> {
    if p.is_finite() && p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(NumericError::InvalidProbability { value: p })
    }
}

/// Shannon information capacity C(p), in bits per wager.
///
/// # Example
///
/// ```rust
/// use shannon_numerics::shannon_capacity;
///
/// let c = shannon_capacity(0.55).unwrap();
/// assert!((c - 0.0072).abs() < 1e-4);
/// ```
pub fn shannon_capacity(p: f64) -> NumericResult<f64> {
    check_probability(p)?;
    Ok(1.0 + (p * p.ln() + (1.0 - p) * (1.0 - p).ln()) / LN_2)
}

/// Derivative of the Shannon capacity, dC/dp.
pub fn shannon_capacity_derivative(p: f64) -> NumericResult<f64> {
    check_probability(p)?;
    Ok((p.ln() - (1.0 - p).ln()) / LN_2)
}

/// Shannon probability `p ∈ (0.5, 1)` whose capacity is `capacity`.
///
/// Uses a step tolerance of 100 × machine epsilon and the iteration cap of
/// the default [`NewtonConfig`].
pub fn inverse_shannon_capacity(capacity: f64) -> NumericResult<f64> {
    inverse_shannon_capacity_with(
        capacity,
        &NewtonConfig {
            tolerance: capacity_tolerance(),
            ..NewtonConfig::default()
        },
    )
}

/// [`inverse_shannon_capacity`] with explicit Newton settings.
pub fn inverse_shannon_capacity_with(capacity: f64, config: &NewtonConfig) -> NumericResult<f64> {
    config.validate()?;
    if !(capacity.is_finite() && capacity > 0.0 && capacity < 1.0) {
        return Err(NumericError::invalid(
            "capacity",
            format!("must lie strictly between 0 and 1, got {}", capacity),
        ));
    }

    let mut p = CAPACITY_START;
    let mut last_step = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let step = (shannon_capacity(p)? - capacity) / shannon_capacity_derivative(p)?;
        let mut next = p - step;

        // Convexity can throw an iterate from below the root past 1.
        if next >= 1.0 {
            next = 0.5 * (p + 1.0);
        } else if next <= 0.5 {
            next = 0.5 * (p + 0.5);
        }

        // Near p = 0.5 the slope is tiny and rounding in C dominates the
        // step long before it reaches the tolerance.
        let stalled = step.abs() >= last_step && last_step <= stall_threshold(p);
        last_step = (next - p).abs();
        p = next;

        if step.abs() <= config.tolerance || stalled {
            debug!(iterations = iteration, p, capacity, "capacity inversion converged");
            return Ok(p);
        }
    }

    warn!(capacity, estimate = p, "capacity inversion exhausted its iteration budget");
    Err(NumericError::DidNotConverge {
        context: "inverse_shannon_capacity",
        iterations: config.max_iterations,
        tolerance: config.tolerance,
        estimate: p,
        error_estimate: last_step,
    })
}
