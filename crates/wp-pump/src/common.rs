//! Common utilities for kernel calculations.

use crate::error::{PumpError, PumpResult};
use wp_core::numeric::ensure_finite;

/// Ensure a value is finite, returning PumpError if not.
pub fn check_finite(value: f64, what: &'static str) -> PumpResult<()> {
    ensure_finite(value, what).map_err(|_| PumpError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> PumpResult<()> {
    check_finite(value, what)?;
    if value <= 0.0 {
        return Err(PumpError::InvalidArg { what });
    }
    Ok(())
}

/// Ensure a value is finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> PumpResult<()> {
    check_finite(value, what)?;
    if value < 0.0 {
        return Err(PumpError::InvalidArg { what });
    }
    Ok(())
}
