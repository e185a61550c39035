//! Error types for pump/motor kernel operations.

use thiserror::Error;

/// Errors that can occur while evaluating the pump/motor model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PumpError {
    #[error("Domain error: {what}")]
    Domain { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type PumpResult<T> = Result<T, PumpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PumpError::Domain {
            what: "shaft speed is zero",
        };
        assert!(err.to_string().contains("shaft speed"));
    }
}
