//! Shannon probability estimators and data-set-size compensation.
//!
//! The Shannon probability P of a time series is the likelihood that it
//! moves favourably in the next interval, measured from the average (avg)
//! and root mean square (rms) of its normalized increments:
//!
//! | Estimator | P |
//! |-----------|---|
//! | rms | (rms + 1) / 2 |
//! | avg | (√avg + 1) / 2 |
//! | avg and rms | (avg / rms + 1) / 2 |
//!
//! Measuring rms or avg on N samples carries an error e. The effective
//! Shannon probability reduces P by the confidence level c = Φ(esigma) that
//! the error is below e, where esigma is e in standard deviations of the
//! measurement error. c is the root of a transcendental balance equation,
//! found here by bisection on esigma.

use tracing::debug;

use crate::adaptive::relative_epsilon;
use crate::error::{NumericError, NumericResult};
use crate::normal::GaussianCdf;
use crate::types::{ConfidenceConfig, EffectiveShannon, RombergConfig};

// ============================================================================
// Closed-Form Estimators
// ============================================================================

/// P = (rms + 1) / 2, for rms in [0, 1].
pub fn shannon_probability_from_rms(rms: f64) -> NumericResult<f64> {
    check_unit("rms", rms)?;
    Ok((rms + 1.0) / 2.0)
}

/// P = (√avg + 1) / 2, for avg in [0, 1].
pub fn shannon_probability_from_avg(avg: f64) -> NumericResult<f64> {
    check_unit("avg", avg)?;
    Ok((avg.sqrt() + 1.0) / 2.0)
}

/// P = (avg / rms + 1) / 2, for rms > 0 and |avg| ≤ rms.
pub fn shannon_probability_from_avg_rms(avg: f64, rms: f64) -> NumericResult<f64> {
    if !(rms.is_finite() && rms > 0.0) {
        return Err(NumericError::invalid(
            "rms",
            format!("must be finite and positive, got {}", rms),
        ));
    }
    if !(avg.is_finite() && avg.abs() <= rms) {
        return Err(NumericError::invalid(
            "avg",
            format!("magnitude must not exceed rms {}, got {}", rms, avg),
        ));
    }
    Ok((avg / rms + 1.0) / 2.0)
}

/// Normalized increments keep rms and avg in [0, 1]; outside it P leaves [0, 1].
fn check_unit(parameter: &'static str, value: f64) -> NumericResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(NumericError::invalid(
            parameter,
            format!("must lie in [0, 1], got {}", value),
        ))
    }
}

/// Optimal fraction of capital to wager at Shannon probability `p`, 2p − 1.
pub fn wager_fraction(p: f64) -> f64 {
    2.0 * p - 1.0
}

// ============================================================================
// Effective Shannon Probability
// ============================================================================

/// Computes confidence-compensated Shannon probabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShannonEstimator {
    cdf: GaussianCdf,
    config: ConfidenceConfig,
}

impl ShannonEstimator {
    pub fn new(romberg: RombergConfig, config: ConfidenceConfig) -> NumericResult<Self> {
        config.validate()?;
        Ok(Self {
            cdf: GaussianCdf::new(romberg)?,
            config,
        })
    }

    /// Effective Shannon probability from rms measured on `n` samples.
    ///
    /// Balances `rms − rms·esigma/√(2N) + 1 = (rms + 1)·Φ(esigma)`.
    pub fn from_rms(&self, rms: f64, n: usize) -> NumericResult<EffectiveShannon> {
        check_samples(n)?;
        let probability = shannon_probability_from_rms(rms)?;

        let scale = rms / (2.0 * n as f64).sqrt();
        let sigma = self.bisect(self.config.sigma_limit, |esigma| {
            Ok(rms - scale * esigma + 1.0 - (rms + 1.0) * self.cdf.phi(esigma)?)
        })?;

        let confidence = self.cdf.phi(sigma)?;
        let result = EffectiveShannon {
            probability,
            confidence,
            effective_probability: probability * confidence,
            error_level: scale * sigma,
            sigma,
        };
        debug!(rms, n, ?result, "effective shannon probability from rms");
        Ok(result)
    }

    /// Effective Shannon probability from avg and rms measured on `n`
    /// samples.
    ///
    /// Balances `√(avg − rms·esigma/√N) + 1 = (√avg + 1)·Φ(esigma)`, with
    /// the search kept below `esigma = (avg / rms)·√N` so the radical stays
    /// real. A negative avg or non-positive rms has no interesting solution
    /// and yields P = 0.5 at confidence 0.5; an avg above 1 is rejected.
    pub fn from_avg(&self, avg: f64, rms: f64, n: usize) -> NumericResult<EffectiveShannon> {
        check_samples(n)?;
        if !(avg.is_finite() && rms.is_finite()) {
            return Err(NumericError::invalid(
                "avg/rms",
                format!("must be finite, got avg {} and rms {}", avg, rms),
            ));
        }

        if avg > 1.0 {
            return Err(NumericError::invalid(
                "avg",
                format!("must not exceed 1, got {}", avg),
            ));
        }
        if avg < 0.0 || rms <= 0.0 {
            return Ok(EffectiveShannon {
                probability: 0.5,
                confidence: 0.5,
                effective_probability: 0.25,
                error_level: 0.0,
                sigma: 0.0,
            });
        }

        let scale = rms / (n as f64).sqrt();
        let root_avg = avg.sqrt();
        let top = (avg / scale).min(self.config.sigma_limit);
        let sigma = self.bisect(top, |esigma| {
            let radicand = (avg - scale * esigma).max(0.0);
            Ok(radicand.sqrt() + 1.0 - (root_avg + 1.0) * self.cdf.phi(esigma)?)
        })?;

        let confidence = self.cdf.phi(sigma)?;
        let probability = (root_avg + 1.0) / 2.0;
        let result = EffectiveShannon {
            probability,
            confidence,
            effective_probability: probability * confidence,
            error_level: scale * sigma,
            sigma,
        };
        debug!(avg, rms, n, ?result, "effective shannon probability from avg");
        Ok(result)
    }

    /// Largest esigma in `[0, top]` where the decreasing `decision` is still
    /// non-negative.
    fn bisect<D>(&self, top: f64, decision: D) -> NumericResult<f64>
    where
        D: Fn(f64) -> NumericResult<f64>,
    {
        let mut low = 0.0;
        let mut high = top;
        for _ in 0..self.config.max_bisections {
            if high - low <= relative_epsilon(top) {
                break;
            }
            let middle = 0.5 * (low + high);
            if decision(middle)? < 0.0 {
                high = middle;
            } else {
                low = middle;
            }
        }
        Ok(0.5 * (low + high))
    }
}

fn check_samples(n: usize) -> NumericResult<()> {
    if n == 0 {
        return Err(NumericError::InsufficientSamples {
            expected: 1,
            actual: 0,
        });
    }
    Ok(())
}

/// Effective Shannon probability from rms with default settings.
///
/// # Example
///
/// ```rust
/// use shannon_numerics::effective_shannon_probability_rms;
///
/// let result = effective_shannon_probability_rms(0.02, 100).unwrap();
/// assert!((result.probability - 0.51).abs() < 1e-12);
/// assert!(result.effective_probability < result.probability);
/// ```
pub fn effective_shannon_probability_rms(rms: f64, n: usize) -> NumericResult<EffectiveShannon> {
    ShannonEstimator::default().from_rms(rms, n)
}

/// Effective Shannon probability from avg and rms with default settings.
pub fn effective_shannon_probability_avg(
    avg: f64,
    rms: f64,
    n: usize,
) -> NumericResult<EffectiveShannon> {
    ShannonEstimator::default().from_avg(avg, rms, n)
}
