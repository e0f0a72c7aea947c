//! Neville polynomial extrapolation.
//!
//! Builds the tableau of differences `c` (upward) and `d` (downward) column
//! by column. After each column the correction that keeps the path through
//! the tableau centered on the target abscissa is added, so the final
//! correction is the error indication.

use crate::error::{NumericError, NumericResult};
use crate::types::Extrapolation;

/// Interpolate (or extrapolate) the polynomial through `(xa[i], ya[i])` at `x`.
///
/// Returns [`NumericError::DegenerateInterpolation`] if two abscissas are
/// identical, and [`NumericError::InvalidParameter`] for empty or mismatched
/// inputs.
///
/// # Example
///
/// ```rust
/// use shannon_numerics::neville_extrapolate;
///
/// // y = 1 + x^2 sampled at three points, extrapolated to x = 0.
/// let xa = [1.0, 0.25, 0.0625];
/// let ya: Vec<f64> = xa.iter().map(|x| 1.0 + x * x).collect();
/// let result = neville_extrapolate(&xa, &ya, 0.0).unwrap();
/// assert!((result.value - 1.0).abs() < 1e-12);
/// ```
pub fn neville_extrapolate(xa: &[f64], ya: &[f64], x: f64) -> NumericResult<Extrapolation> {
    let n = xa.len();
    if n == 0 {
        return Err(NumericError::invalid("xa", "at least one sample is required"));
    }
    if ya.len() != n {
        return Err(NumericError::invalid(
            "ya",
            format!("expected {} ordinates, got {}", n, ya.len()),
        ));
    }

    // Start from the sample closest to the target.
    let mut closest = 0;
    let mut dif = (x - xa[0]).abs();
    for (i, &xi) in xa.iter().enumerate().skip(1) {
        let dift = (x - xi).abs();
        if dift < dif {
            closest = i;
            dif = dift;
        }
    }

    let mut c = ya.to_vec();
    let mut d = ya.to_vec();
    let mut y = ya[closest];
    let mut dy = 0.0;

    // Position in the tableau; the next downward correction reads d[ns - 1].
    let mut ns = closest;

    for m in 1..n {
        for i in 0..n - m {
            let ho = xa[i] - x;
            let hp = xa[i + m] - x;
            let w = c[i + 1] - d[i];
            let den = ho - hp;
            if den == 0.0 {
                return Err(NumericError::DegenerateInterpolation {
                    index: i + m,
                    abscissa: xa[i + m],
                });
            }
            let den = w / den;
            d[i] = hp * den;
            c[i] = ho * den;
        }

        dy = if 2 * ns < n - m {
            c[ns]
        } else {
            ns -= 1;
            d[ns]
        };
        y += dy;
    }

    Ok(Extrapolation { value: y, error: dy })
}
