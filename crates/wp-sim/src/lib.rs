//! Series aggregation and efficiency maps for the PTO kernel.
//!
//! Provides:
//! - Per-sample solve of `(time, force, velocity)` into losses and powers
//! - Energy fold over the ordered series with windowed averages
//! - Rectangular and trapezoidal quadrature
//! - Displacement × pressure efficiency maps at fixed speed

pub mod axis;
pub mod device;
pub mod energy;
pub mod error;
pub mod integrator;
pub mod map;
pub mod sample;
pub mod sim;

// Re-exports for public API
pub use axis::GridAxis;
pub use device::{DeviceParameters, ElectricalSplit, GeneratorModel};
pub use energy::{AveragingWindow, EnergyAccumulator, EnergySummary, WaveResource};
pub use error::{SimError, SimResult};
pub use integrator::{IntegrationRule, Quadrature, Rectangular, Trapezoidal};
pub use map::{EfficiencyGridPoint, EfficiencyMap, MapRequest, generate_efficiency_map};
pub use sample::{PowerSplit, Sample, SolvedSample, solve_sample};
pub use sim::{AnalysisOptions, SeriesResult, run_series};
