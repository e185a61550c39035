//! wp-pump: variable-displacement pump/motor kernel.
//!
//! Provides:
//! - Quadrant classification from pressure differential and shaft speed
//! - Flow and torque loss model shared by every caller
//! - Two-branch closed-form fractional displacement solve
//!
//! All functions are pure and deterministic given a [`PumpMotorParameters`].
//!
//! # Example
//!
//! ```
//! use wp_pump::{OperatingPoint, PumpMotorParameters, Quadrant, solve_frac_disp};
//!
//! let params = PumpMotorParameters::reference_hecm();
//! let sol = solve_frac_disp(0.003, 5.0e6, params.speed, &params).unwrap();
//!
//! let op = OperatingPoint::evaluate(sol.frac_disp, 5.0e6, params.speed, &params);
//! assert_eq!(op.quadrant, Quadrant::First);
//! assert!((op.q_act - 0.003).abs() < 1e-12);
//! ```

pub mod common;
pub mod error;
pub mod loss;
pub mod operating_point;
pub mod params;
pub mod quadrant;
pub mod solver;

// Re-exports
pub use error::{PumpError, PumpResult};
pub use operating_point::OperatingPoint;
pub use params::{FluidProperties, LossCoefficients, PumpMotorParameters};
pub use quadrant::Quadrant;
pub use solver::{FracDispSolution, SolveBranch, reconstructed_flow, solve_frac_disp};
