use crate::{WpError, WpResult};

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Relative difference of `a` against reference `b`, falling back to the
/// absolute difference when `b` is zero.
pub fn relative_error(a: Real, b: Real) -> Real {
    let diff = (a - b).abs();
    if b == 0.0 { diff } else { diff / b.abs() }
}

pub fn ensure_finite(v: Real, what: &'static str) -> WpResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(WpError::NonFinite { what, value: v })
    }
}

/// Sign with zero counted as nonnegative: `+1` for `v >= 0`, `-1` otherwise.
///
/// `-0.0` compares equal to zero and therefore maps to `+1`.
#[inline]
pub fn sign_nonneg(v: Real) -> Real {
    if v >= 0.0 { 1.0 } else { -1.0 }
}

/// `min(|a|,|b|) / max(|a|,|b|)`, in `[0, 1]`.
///
/// Returns 1 when both magnitudes are zero.
pub fn magnitude_ratio(a: Real, b: Real) -> Real {
    let (a, b) = (a.abs(), b.abs());
    let hi = a.max(b);
    if hi == 0.0 { 1.0 } else { a.min(b) / hi }
}
