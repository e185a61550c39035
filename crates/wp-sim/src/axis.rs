//! Linear grid axes for efficiency maps.

use crate::error::{SimError, SimResult};
use std::fmt;

/// Uniformly spaced axis between two bounds (inclusive).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridAxis {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
}

impl GridAxis {
    /// Create an axis.
    ///
    /// # Errors
    /// `InvalidArg` for fewer than two points, non-finite or coincident bounds.
    pub fn new(start: f64, end: f64, num_points: usize) -> SimResult<Self> {
        let axis = Self {
            start,
            end,
            num_points,
        };
        axis.validate()?;
        Ok(axis)
    }

    /// Axis from `-max` to `max`.
    pub fn symmetric(max: f64, num_points: usize) -> SimResult<Self> {
        Self::new(-max, max, num_points)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.num_points < 2 {
            return Err(SimError::InvalidArg {
                what: "grid axis must have at least 2 points",
            });
        }
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SimError::InvalidArg {
                what: "grid axis bounds must be finite",
            });
        }
        if (self.start - self.end).abs() < 1e-12 {
            return Err(SimError::InvalidArg {
                what: "grid axis start and end must differ",
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.num_points
    }

    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    /// All axis points, endpoint exact.
    pub fn points(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }

        let delta = (self.end - self.start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start + i as f64 * delta)
            .collect();

        // Ensure exact endpoint
        points[self.num_points - 1] = self.end;
        points
    }
}

impl fmt::Display for GridAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} ({} points)",
            self.start, self.end, self.num_points
        )
    }
}
