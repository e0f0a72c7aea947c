//! Tolerances derived from machine epsilon.
//!
//! Every stopping threshold in the kernel is a multiple of `f64::EPSILON`,
//! scaled to the quantity it guards.

// ============================================================================
// Search Widths
// ============================================================================

/// Width below which a search interval around `operand` is exhausted.
///
/// 100 × machine epsilon, scaled by `max(|operand|, 1)` so bracketing
/// searches over large ranges stop at a width they can still represent.
///
/// # Example
///
/// ```rust
/// use shannon_numerics::relative_epsilon;
///
/// assert_eq!(relative_epsilon(0.25), relative_epsilon(1.0));
/// assert!(relative_epsilon(3.0) > relative_epsilon(1.0));
/// ```
#[inline]
pub fn relative_epsilon(operand: f64) -> f64 {
    f64::EPSILON * 100.0 * operand.abs().max(1.0)
}

// ============================================================================
// Newton Stopping Thresholds
// ============================================================================

/// Final-step bound for inverting the normal CDF: 10 × machine epsilon.
#[inline]
pub fn newton_tolerance() -> f64 {
    f64::EPSILON * 10.0
}

/// Final-step bound for inverting the Shannon capacity: 100 × machine epsilon.
#[inline]
pub fn capacity_tolerance() -> f64 {
    f64::EPSILON * 100.0
}

/// Smallest residual `|Φ(x) - p|` the kernel can resolve.
///
/// Φ is formed as `0.5 + s` with `s` a sum of many kernel evaluations, so
/// its absolute rounding granularity is a few ulps of numbers in [0.5, 1).
#[inline]
pub fn cdf_residual_floor() -> f64 {
    f64::EPSILON * 4.0
}

/// Smallest tail probability `min(p, 1 − p)` the inverse CDF resolves.
///
/// Below it the residual floor exceeds √ε of the tail itself, so an
/// iterate accepted on the residual carries no reliable digits.
#[inline]
pub fn cdf_tail_floor() -> f64 {
    cdf_residual_floor() / f64::EPSILON.sqrt()
}

/// Step size below which a Newton step that fails to shrink is rounding
/// noise rather than progress.
#[inline]
pub fn stall_threshold(x: f64) -> f64 {
    f64::EPSILON.sqrt() * x.abs().max(1.0)
}
