//! Standard normal CDF by Romberg integration.
//!
//! | Function | Definition |
//! |----------|------------|
//! | `normal_kernel(t)` | exp(−t²/2) |
//! | `phi(x)` | 0.5 + ∫₀ˣ exp(−t²/2) dt / √(2π) |
//! | `phi_derivative(x)` | exp(−x²/2) / √(2π) |
//! | `erf(x)` | 2·(Φ(x·√2) − 0.5) |
//!
//! The kernel is left unnormalized inside the integral; the 1/√(2π) factor
//! is applied once outside, and the derivative applies the same factor.
//!
//! The integral is summed over unit panels from 0 towards x, so every panel
//! meets the relative tolerance on its own share of the area and the tails
//! are not swamped by the error of the central mass. Beyond |x| = 10 the
//! remaining area is below the rounding granularity of `0.5 + s`, so the
//! limit is clamped there and the result clamped to [0, 1].

use std::f64::consts::{PI, SQRT_2};

use crate::error::{NumericError, NumericResult};
use crate::romberg::RombergIntegrator;
use crate::types::RombergConfig;

/// Width of the panels Φ is summed over.
const PANEL_WIDTH: f64 = 1.0;

/// |x| beyond which Φ no longer changes in double precision.
const TAIL_CUTOFF: f64 = 10.0;

/// √(2π)
#[inline]
fn sqrt_two_pi() -> f64 {
    (2.0 * PI).sqrt()
}

/// Unnormalized Gaussian kernel, exp(−t²/2).
#[inline]
pub fn normal_kernel(t: f64) -> f64 {
    (-(t * t) / 2.0).exp()
}

/// Standard normal CDF evaluated through a configurable Romberg integrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianCdf {
    integrator: RombergIntegrator,
}

impl GaussianCdf {
    pub fn new(config: RombergConfig) -> NumericResult<Self> {
        Ok(Self {
            integrator: RombergIntegrator::new(config)?,
        })
    }

    pub fn integrator(&self) -> &RombergIntegrator {
        &self.integrator
    }

    /// Φ(x).
    pub fn phi(&self, x: f64) -> NumericResult<f64> {
        if !x.is_finite() {
            return Err(NumericError::invalid(
                "x",
                format!("abscissa must be finite, got {}", x),
            ));
        }
        let limit = x.clamp(-TAIL_CUTOFF, TAIL_CUTOFF);
        let panel = PANEL_WIDTH.copysign(limit);

        let mut area = 0.0;
        let mut start = 0.0;
        while start != limit {
            let end = if (limit - start).abs() > PANEL_WIDTH {
                start + panel
            } else {
                limit
            };
            area += self.integrator.integrate(&normal_kernel, start, end)?.value;
            start = end;
        }

        Ok((0.5 + area / sqrt_two_pi()).clamp(0.0, 1.0))
    }

    /// Φ'(x), the standard normal density.
    pub fn derivative(&self, x: f64) -> f64 {
        normal_kernel(x) / sqrt_two_pi()
    }

    /// Error function, erf(x) = 2·(Φ(x·√2) − 0.5).
    pub fn erf(&self, x: f64) -> NumericResult<f64> {
        Ok(2.0 * (self.phi(x * SQRT_2)? - 0.5))
    }
}

/// Standard normal CDF with the default integrator.
///
/// # Example
///
/// ```rust
/// use shannon_numerics::phi;
///
/// assert!((phi(0.0).unwrap() - 0.5).abs() < 1e-12);
/// assert!((phi(1.96).unwrap() - 0.9750).abs() < 1e-4);
/// ```
pub fn phi(x: f64) -> NumericResult<f64> {
    GaussianCdf::default().phi(x)
}

/// Standard normal density.
pub fn phi_derivative(x: f64) -> f64 {
    normal_kernel(x) / sqrt_two_pi()
}

/// Error function with the default integrator.
pub fn erf(x: f64) -> NumericResult<f64> {
    GaussianCdf::default().erf(x)
}
