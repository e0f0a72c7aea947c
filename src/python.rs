//! Python bindings for shannon-numerics using PyO3.
//!
//! Exposes the normal CDF, its inverse, Shannon capacity and the effective
//! Shannon probability estimators, with NumPy input for the vectorized CDF.

#![cfg(feature = "python")]

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::cell::RefCell;

use crate::error::NumericError;
use crate::types::EffectiveShannon;

fn to_py_err(err: NumericError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

// ============================================================================
// Normal Distribution
// ============================================================================

/// Standard normal cumulative distribution function.
///
/// Args:
///     x: Abscissa (float)
///
/// Returns:
///     Φ(x) in [0, 1]
#[pyfunction]
fn phi(x: f64) -> PyResult<f64> {
    crate::phi(x).map_err(to_py_err)
}

/// Standard normal density, the derivative of Φ.
#[pyfunction]
fn phi_derivative(x: f64) -> f64 {
    crate::phi_derivative(x)
}

/// Error function, computed as 2·(Φ(x·√2) − 0.5).
#[pyfunction]
fn erf(x: f64) -> PyResult<f64> {
    crate::erf(x).map_err(to_py_err)
}

/// Inverse of the standard normal CDF.
///
/// Args:
///     p: Probability strictly inside (0, 1)
///
/// Returns:
///     x such that Φ(x) = p
#[pyfunction]
fn inverse_cdf(p: f64) -> PyResult<f64> {
    crate::inverse_cdf(p).map_err(to_py_err)
}

/// Evaluate Φ over a NumPy array.
///
/// Args:
///     x: NumPy array of abscissas (float64)
///
/// Returns:
///     NumPy array of Φ values
#[pyfunction]
fn phi_array<'py>(
    py: Python<'py>,
    x: PyReadonlyArray1<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let slice = x
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let cdf = crate::GaussianCdf::default();
    let values = slice
        .iter()
        .map(|&v| cdf.phi(v))
        .collect::<Result<Vec<f64>, _>>()
        .map_err(to_py_err)?;
    Ok(PyArray1::from_vec(py, values))
}

/// Integrate a Python callable over [a, b] by Romberg's method.
///
/// Args:
///     f: Callable taking and returning a float
///     a: Lower limit
///     b: Upper limit
///
/// Returns:
///     The integral estimate
#[pyfunction]
fn romberg(py: Python<'_>, f: PyObject, a: f64, b: f64) -> PyResult<f64> {
    let callback_error: RefCell<Option<PyErr>> = RefCell::new(None);
    let integrand = |x: f64| -> f64 {
        match f.call1(py, (x,)).and_then(|v| v.extract::<f64>(py)) {
            Ok(v) => v,
            Err(e) => {
                callback_error.borrow_mut().get_or_insert(e);
                f64::NAN
            }
        }
    };
    let result = crate::romberg(&integrand, a, b);
    if let Some(e) = callback_error.into_inner() {
        return Err(e);
    }
    result.map_err(to_py_err)
}

// ============================================================================
// Shannon Probability
// ============================================================================

/// Shannon information capacity C(p) = 1 + p·log₂p + (1 − p)·log₂(1 − p).
#[pyfunction]
fn shannon_capacity(p: f64) -> PyResult<f64> {
    crate::shannon_capacity(p).map_err(to_py_err)
}

/// Shannon probability in (0.5, 1) whose capacity is `c`.
#[pyfunction]
fn inverse_shannon_capacity(c: f64) -> PyResult<f64> {
    crate::inverse_shannon_capacity(c).map_err(to_py_err)
}

/// Shannon probability from the rms of normalized increments.
#[pyfunction]
fn shannon_probability_from_rms(rms: f64) -> PyResult<f64> {
    crate::shannon_probability_from_rms(rms).map_err(to_py_err)
}

/// Shannon probability from the average of normalized increments.
#[pyfunction]
fn shannon_probability_from_avg(avg: f64) -> PyResult<f64> {
    crate::shannon_probability_from_avg(avg).map_err(to_py_err)
}

/// Shannon probability from both avg and rms.
#[pyfunction]
fn shannon_probability_from_avg_rms(avg: f64, rms: f64) -> PyResult<f64> {
    crate::shannon_probability_from_avg_rms(avg, rms).map_err(to_py_err)
}

/// Python wrapper for EffectiveShannon.
#[pyclass(name = "EffectiveShannon", frozen)]
#[derive(Clone)]
pub struct PyEffectiveShannon {
    #[pyo3(get)]
    pub probability: f64,
    #[pyo3(get)]
    pub confidence: f64,
    #[pyo3(get)]
    pub effective_probability: f64,
    #[pyo3(get)]
    pub error_level: f64,
    #[pyo3(get)]
    pub sigma: f64,
}

impl From<EffectiveShannon> for PyEffectiveShannon {
    fn from(result: EffectiveShannon) -> Self {
        Self {
            probability: result.probability,
            confidence: result.confidence,
            effective_probability: result.effective_probability,
            error_level: result.error_level,
            sigma: result.sigma,
        }
    }
}

#[pymethods]
impl PyEffectiveShannon {
    /// Optimal wager fraction at the effective probability.
    fn wager_fraction(&self) -> f64 {
        crate::wager_fraction(self.effective_probability)
    }

    fn __repr__(&self) -> String {
        format!(
            "EffectiveShannon(probability={:.6}, confidence={:.6}, effective_probability={:.6}, error_level={:.6})",
            self.probability, self.confidence, self.effective_probability, self.error_level
        )
    }
}

/// Effective Shannon probability from rms measured on `n` samples.
#[pyfunction]
fn effective_shannon_probability_rms(rms: f64, n: usize) -> PyResult<PyEffectiveShannon> {
    crate::effective_shannon_probability_rms(rms, n)
        .map(PyEffectiveShannon::from)
        .map_err(to_py_err)
}

/// Effective Shannon probability from avg and rms measured on `n` samples.
#[pyfunction]
fn effective_shannon_probability_avg(
    avg: f64,
    rms: f64,
    n: usize,
) -> PyResult<PyEffectiveShannon> {
    crate::effective_shannon_probability_avg(avg, rms, n)
        .map(PyEffectiveShannon::from)
        .map_err(to_py_err)
}

// ============================================================================
// Utilities
// ============================================================================

/// Search-width threshold relative to an operand.
#[pyfunction]
fn relative_epsilon(operand: f64) -> f64 {
    crate::relative_epsilon(operand)
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Normal distribution
    m.add_function(wrap_pyfunction!(phi, m)?)?;
    m.add_function(wrap_pyfunction!(phi_derivative, m)?)?;
    m.add_function(wrap_pyfunction!(erf, m)?)?;
    m.add_function(wrap_pyfunction!(inverse_cdf, m)?)?;
    m.add_function(wrap_pyfunction!(phi_array, m)?)?;
    m.add_function(wrap_pyfunction!(romberg, m)?)?;

    // Shannon probability
    m.add_function(wrap_pyfunction!(shannon_capacity, m)?)?;
    m.add_function(wrap_pyfunction!(inverse_shannon_capacity, m)?)?;
    m.add_function(wrap_pyfunction!(shannon_probability_from_rms, m)?)?;
    m.add_function(wrap_pyfunction!(shannon_probability_from_avg, m)?)?;
    m.add_function(wrap_pyfunction!(shannon_probability_from_avg_rms, m)?)?;
    m.add_function(wrap_pyfunction!(effective_shannon_probability_rms, m)?)?;
    m.add_function(wrap_pyfunction!(effective_shannon_probability_avg, m)?)?;

    // Utilities
    m.add_function(wrap_pyfunction!(relative_epsilon, m)?)?;

    // Classes
    m.add_class::<PyEffectiveShannon>()?;

    Ok(())
}
