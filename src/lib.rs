//! Numerical kernel for fractal time-series analysis and Shannon probabilities.
//!
//! The standard normal CDF Φ is evaluated by Romberg integration of the
//! Gaussian kernel, and inverted by Newton-Raphson. Shannon capacity and
//! Shannon probability helpers are built on top.
//!
//! All state is created per call; every function is reentrant and safe to
//! call concurrently.
//!
//! # Components
//!
//! | Layer | Items |
//! |-------|-------|
//! | Quadrature | [`TrapezoidRefiner`], [`neville_extrapolate`], [`RombergIntegrator`] |
//! | Normal distribution | [`phi`], [`phi_derivative`], [`erf`], [`inverse_cdf`] |
//! | Shannon | [`shannon_capacity`], [`inverse_shannon_capacity`], [`effective_shannon_probability_rms`] |
//!
//! # Example
//!
//! ```rust
//! use shannon_numerics::{inverse_cdf, phi, romberg};
//!
//! let area = romberg(&|x: f64| x * x, 0.0, 3.0).unwrap();
//! assert!((area - 9.0).abs() < 1e-10);
//!
//! let p = phi(1.0).unwrap();
//! let x = inverse_cdf(p).unwrap();
//! assert!((x - 1.0).abs() < 1e-6);
//! ```

pub mod adaptive;
pub mod capacity;
pub mod confidence;
pub mod error;
pub mod extrapolate;
pub mod inverse;
pub mod normal;
pub mod romberg;
pub mod trapezoid;
pub mod types;

#[cfg(feature = "python")]
mod python;

#[cfg(test)]
mod proptest_strategies;

// Re-export public API
pub use error::{NumericError, NumericResult};
pub use types::{
    ConfidenceConfig, Convergence, EffectiveShannon, Extrapolation, NewtonConfig, RombergConfig,
};

// Quadrature
pub use extrapolate::neville_extrapolate;
pub use romberg::{romberg, IntegrationState, RombergIntegrator};
pub use trapezoid::{Evaluable, TrapezoidRefiner};

// Normal distribution
pub use inverse::{inverse_cdf, InverseCdfSolver};
pub use normal::{erf, normal_kernel, phi, phi_derivative, GaussianCdf};

// Shannon probability
pub use capacity::{
    inverse_shannon_capacity, inverse_shannon_capacity_with, shannon_capacity,
    shannon_capacity_derivative,
};
pub use confidence::{
    effective_shannon_probability_avg, effective_shannon_probability_rms,
    shannon_probability_from_avg, shannon_probability_from_avg_rms, shannon_probability_from_rms,
    wager_fraction, ShannonEstimator,
};

// Tolerances
pub use adaptive::{
    capacity_tolerance, cdf_residual_floor, cdf_tail_floor, newton_tolerance, relative_epsilon,
    stall_threshold,
};
