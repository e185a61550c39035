//! Project schema definitions.
//!
//! Field names carry their unit; conversion to SI happens in [`crate::convert`].

use serde::{Deserialize, Serialize};
use wp_core::numeric::Tolerances;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub device: DeviceDef,
    pub pump: PumpDef,
    pub fluid: FluidDef,
    #[serde(default)]
    pub losses: LossesDef,
    #[serde(default)]
    pub analysis: AnalysisDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave: Option<WaveDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<MapDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceDef {
    pub rod_area_m2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_motor_speed_rpm: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PumpDef {
    pub displacement_cc_per_rev: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    pub speed_rpm: f64,
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluidDef {
    pub kinematic_viscosity_cst: f64,
    pub density_kg_m3: f64,
    /// Omit for an incompressible fluid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_modulus_pa: Option<f64>,
}

/// Empirical loss coefficients; omitted entries are zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LossesDef {
    pub cf: f64,
    pub ch: f64,
    pub cv: f64,
    pub cs: f64,
    pub cst: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationDef {
    Rectangular,
    #[default]
    Trapezoidal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisDef {
    #[serde(default)]
    pub integration: IntegrationDef,
    #[serde(default)]
    pub transient_s: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_end_s: Option<f64>,
    #[serde(default = "default_generator_efficiency")]
    pub generator_efficiency: f64,
    #[serde(default = "default_residual_tol")]
    pub residual_tol: Tolerances,
}

impl Default for AnalysisDef {
    fn default() -> Self {
        Self {
            integration: IntegrationDef::default(),
            transient_s: 0.0,
            window_end_s: None,
            generator_efficiency: default_generator_efficiency(),
            residual_tol: default_residual_tol(),
        }
    }
}

fn default_generator_efficiency() -> f64 {
    0.9
}

fn default_residual_tol() -> Tolerances {
    Tolerances {
        abs: 1e-12,
        rel: 1e-8,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaveDef {
    pub power_per_width_w_per_m: f64,
    pub reference_width_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxisDef {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapDef {
    pub frac_disp: AxisDef,
    pub delta_p_bar: AxisDef,
    /// Overrides the pump speed for the map only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_rpm: Option<f64>,
    /// Overrides the pump scale for the map only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}
