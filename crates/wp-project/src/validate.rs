//! Project validation logic.
//!
//! Field checks are collected rather than stopping at the first failure so a
//! single run reports everything wrong with a file.

use crate::schema::{AxisDef, Project};
use std::fmt;

pub const SCHEMA_VERSION: u32 = 1;

/// One rejected field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: String,
    pub value: String,
    pub reason: &'static str,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} ({})", self.field, self.value, self.reason)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid values: {}", join_issues(.issues))]
    InvalidValues { issues: Vec<FieldIssue> },

    #[error("Unsupported version: {version} (expected {})", SCHEMA_VERSION)]
    UnsupportedVersion { version: u32 },
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Default)]
struct Issues(Vec<FieldIssue>);

impl Issues {
    fn check(&mut self, ok: bool, field: &str, value: impl fmt::Display, reason: &'static str) {
        if !ok {
            self.0.push(FieldIssue {
                field: field.to_string(),
                value: value.to_string(),
                reason,
            });
        }
    }

    fn positive(&mut self, field: &str, v: f64) {
        self.check(v.is_finite() && v > 0.0, field, v, "must be positive and finite");
    }

    fn non_negative(&mut self, field: &str, v: f64) {
        self.check(v.is_finite() && v >= 0.0, field, v, "must be non-negative and finite");
    }

    fn axis(&mut self, field: &str, axis: &AxisDef) {
        self.check(
            axis.start.is_finite() && axis.end.is_finite(),
            field,
            format!("{}..{}", axis.start, axis.end),
            "bounds must be finite",
        );
        self.check(axis.start != axis.end, field, axis.start, "start and end must differ");
        self.check(axis.points >= 2, field, axis.points, "needs at least 2 points");
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version != SCHEMA_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut issues = Issues::default();

    issues.positive("device.rod_area_m2", project.device.rod_area_m2);
    if let Some(limit) = project.device.max_motor_speed_rpm {
        issues.positive("device.max_motor_speed_rpm", limit);
        issues.check(
            project.pump.speed_rpm.abs() <= limit,
            "pump.speed_rpm",
            project.pump.speed_rpm,
            "exceeds device.max_motor_speed_rpm",
        );
    }

    let pump = &project.pump;
    issues.positive("pump.displacement_cc_per_rev", pump.displacement_cc_per_rev);
    issues.positive("pump.scale", pump.scale);
    issues.check(
        pump.speed_rpm.is_finite() && pump.speed_rpm != 0.0,
        "pump.speed_rpm",
        pump.speed_rpm,
        "must be finite and non-zero",
    );

    let fluid = &project.fluid;
    issues.positive("fluid.kinematic_viscosity_cst", fluid.kinematic_viscosity_cst);
    issues.positive("fluid.density_kg_m3", fluid.density_kg_m3);
    if let Some(b) = fluid.bulk_modulus_pa {
        issues.positive("fluid.bulk_modulus_pa", b);
    }

    let losses = &project.losses;
    for (field, v) in [
        ("losses.cf", losses.cf),
        ("losses.ch", losses.ch),
        ("losses.cv", losses.cv),
        ("losses.cs", losses.cs),
        ("losses.cst", losses.cst),
    ] {
        issues.non_negative(field, v);
    }

    let analysis = &project.analysis;
    issues.non_negative("analysis.transient_s", analysis.transient_s);
    if let Some(end) = analysis.window_end_s {
        // Absolute time; whether it clears the transient depends on the series start
        issues.check(end.is_finite(), "analysis.window_end_s", end, "must be finite");
    }
    issues.check(
        analysis.generator_efficiency > 0.0 && analysis.generator_efficiency <= 1.0,
        "analysis.generator_efficiency",
        analysis.generator_efficiency,
        "must be in (0, 1]",
    );
    issues.non_negative("analysis.residual_tol.abs", analysis.residual_tol.abs);
    issues.non_negative("analysis.residual_tol.rel", analysis.residual_tol.rel);

    if let Some(wave) = &project.wave {
        issues.positive("wave.power_per_width_w_per_m", wave.power_per_width_w_per_m);
        issues.positive("wave.reference_width_m", wave.reference_width_m);
    }

    if let Some(map) = &project.map {
        issues.axis("map.frac_disp", &map.frac_disp);
        issues.axis("map.delta_p_bar", &map.delta_p_bar);
        if let Some(speed) = map.speed_rpm {
            issues.check(
                speed.is_finite() && speed != 0.0,
                "map.speed_rpm",
                speed,
                "must be finite and non-zero",
            );
        }
        if let Some(scale) = map.scale {
            issues.positive("map.scale", scale);
        }
    }

    if issues.0.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValues { issues: issues.0 })
    }
}
