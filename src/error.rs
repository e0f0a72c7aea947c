//! Error types for the numerical kernel.
//!
//! Every failure is returned as a value; nothing in this crate panics or
//! exits on bad input or exhausted iteration budgets.

use thiserror::Error;

/// Result type for kernel operations.
pub type NumericResult<T> = Result<T, NumericError>;

/// Errors that can occur in integration, extrapolation, and root finding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    /// The iteration budget was exhausted before the tolerance was met.
    ///
    /// Recoverable: `estimate` is the best value available when the budget
    /// ran out, and callers may accept it or retry with looser settings.
    #[error("{context}: did not converge after {iterations} iterations (tolerance: {tolerance:.2e}, best estimate: {estimate}, error estimate: {error_estimate:.2e})")]
    DidNotConverge {
        context: &'static str,
        iterations: usize,
        tolerance: f64,
        estimate: f64,
        error_estimate: f64,
    },

    /// Two extrapolation abscissas coincide, so the tableau divides by zero.
    #[error("degenerate interpolation: abscissa {abscissa} at index {index} duplicates another sample")]
    DegenerateInterpolation { index: usize, abscissa: f64 },

    /// A trapezoid refiner was called out of its `1, 2, 3, ...` sequence.
    #[error("trapezoid refinement out of sequence: expected stage {expected}, got {got}")]
    RefinementOutOfSequence { expected: usize, got: usize },

    /// A probability outside the open interval (0, 1).
    #[error("invalid probability {value}: must lie strictly between 0 and 1")]
    InvalidProbability { value: f64 },

    /// Invalid parameter value.
    #[error("invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },

    /// Not enough samples behind a statistical estimate.
    #[error("insufficient samples: expected at least {expected}, got {actual}")]
    InsufficientSamples { expected: usize, actual: usize },
}

impl NumericError {
    /// Best available estimate carried by a non-converged result.
    pub fn best_estimate(&self) -> Option<f64> {
        match self {
            Self::DidNotConverge { estimate, .. } => Some(*estimate),
            _ => None,
        }
    }

    /// True for failures a caller may recover from by accepting the estimate
    /// or retrying with a larger budget.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DidNotConverge { .. })
    }

    pub(crate) fn invalid(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }
}
