//! Error types for series evaluation and map generation.

use thiserror::Error;

/// Errors encountered while evaluating a PTO time series or efficiency map.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Domain error: {what}")]
    Domain { what: &'static str },

    #[error("Sample {index} at t={time} s: {source}")]
    Sample {
        index: usize,
        time: f64,
        #[source]
        source: Box<SimError>,
    },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<wp_pump::PumpError> for SimError {
    fn from(e: wp_pump::PumpError) -> Self {
        match e {
            wp_pump::PumpError::Domain { what } => SimError::Domain { what },
            wp_pump::PumpError::NonPhysical { what } => SimError::NonPhysical { what },
            wp_pump::PumpError::InvalidArg { what } => SimError::InvalidArg { what },
        }
    }
}

impl From<wp_core::error::WpError> for SimError {
    fn from(e: wp_core::error::WpError) -> Self {
        match e {
            wp_core::error::WpError::NonFinite { what, .. } => SimError::NonPhysical { what },
        }
    }
}
