//! Fixed-interval quadrature rules for power-to-energy integration.

/// Trait for quadrature rules over one sample interval.
pub trait Quadrature {
    /// Integral of a sampled signal over `[t0, t0 + dt]` given its endpoint values.
    fn interval(&self, dt: f64, start: f64, end: f64) -> f64;
}

/// Left rectangle rule: holds the interval's first value.
#[derive(Clone, Debug)]
pub struct Rectangular;

impl Quadrature for Rectangular {
    fn interval(&self, dt: f64, start: f64, _end: f64) -> f64 {
        start * dt
    }
}

/// Trapezoidal rule.
#[derive(Clone, Debug)]
pub struct Trapezoidal;

impl Quadrature for Trapezoidal {
    fn interval(&self, dt: f64, start: f64, end: f64) -> f64 {
        0.5 * (start + end) * dt
    }
}

/// Integration rule selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegrationRule {
    /// Left rectangle rule (sample-and-hold).
    Rectangular,
    /// Trapezoidal rule (default).
    #[default]
    Trapezoidal,
}

impl IntegrationRule {
    pub fn interval(self, dt: f64, start: f64, end: f64) -> f64 {
        match self {
            IntegrationRule::Rectangular => Rectangular.interval(dt, start, end),
            IntegrationRule::Trapezoidal => Trapezoidal.interval(dt, start, end),
        }
    }
}
