//! wp-core: shared foundation for the WavePTO workspace.
//!
//! Contains:
//! - units (uom SI types + constructors and unit conversions)
//! - numeric (Real + tolerances + sign and float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{WpError, WpResult};
pub use numeric::*;
pub use units::*;
