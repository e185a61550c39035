//! Steady-state efficiency surface over displacement and pressure.

use crate::axis::GridAxis;
use crate::error::SimResult;
use rayon::prelude::*;
use wp_core::numeric::magnitude_ratio;
use wp_pump::{OperatingPoint, PumpMotorParameters, Quadrant};

/// Axes of an efficiency map. Speed and scale come from the parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapRequest {
    pub frac_disp: GridAxis,
    /// Pressure differential axis (Pa)
    pub delta_p: GridAxis,
}

impl MapRequest {
    pub fn validate(&self) -> SimResult<()> {
        self.frac_disp.validate()?;
        self.delta_p.validate()
    }
}

/// One evaluated map cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EfficiencyGridPoint {
    pub frac_disp: f64,
    pub delta_p: f64,
    pub quadrant: Quadrant,
    pub q_ideal: f64,
    pub t_ideal: f64,
    pub q_loss: f64,
    pub t_loss: f64,
    pub q_act: f64,
    pub t_act: f64,
    /// `min(|q_ideal|,|q_act|) / max(|q_ideal|,|q_act|)`
    pub volumetric_efficiency: f64,
    /// `min(|t_ideal|,|t_act|) / max(|t_ideal|,|t_act|)`
    pub torque_efficiency: f64,
}

impl EfficiencyGridPoint {
    pub fn from_operating_point(op: &OperatingPoint) -> Self {
        Self {
            frac_disp: op.frac_disp,
            delta_p: op.delta_p,
            quadrant: op.quadrant,
            q_ideal: op.q_ideal,
            t_ideal: op.t_ideal,
            q_loss: op.q_loss,
            t_loss: op.t_loss,
            q_act: op.q_act,
            t_act: op.t_act,
            volumetric_efficiency: magnitude_ratio(op.q_ideal, op.q_act),
            torque_efficiency: magnitude_ratio(op.t_ideal, op.t_act),
        }
    }

    /// Product of volumetric and torque efficiency.
    pub fn overall_efficiency(&self) -> f64 {
        self.volumetric_efficiency * self.torque_efficiency
    }
}

/// Efficiency surface at fixed speed and scale.
///
/// Cells are row-major: row `i` is `frac_disp[i]`, column `j` is `delta_p[j]`.
#[derive(Clone, Debug)]
pub struct EfficiencyMap {
    pub frac_disp: Vec<f64>,
    pub delta_p: Vec<f64>,
    pub speed: f64,
    pub scale: f64,
    pub cells: Vec<EfficiencyGridPoint>,
}

impl EfficiencyMap {
    pub fn rows(&self) -> usize {
        self.frac_disp.len()
    }

    pub fn cols(&self) -> usize {
        self.delta_p.len()
    }

    pub fn cell(&self, i: usize, j: usize) -> Option<&EfficiencyGridPoint> {
        if i >= self.rows() || j >= self.cols() {
            return None;
        }
        self.cells.get(i * self.cols() + j)
    }

    pub fn volumetric_surface(&self) -> Vec<Vec<f64>> {
        self.surface(|c| c.volumetric_efficiency)
    }

    pub fn torque_surface(&self) -> Vec<Vec<f64>> {
        self.surface(|c| c.torque_efficiency)
    }

    fn surface(&self, f: impl Fn(&EfficiencyGridPoint) -> f64) -> Vec<Vec<f64>> {
        self.cells
            .chunks(self.cols().max(1))
            .map(|row| row.iter().map(&f).collect())
            .collect()
    }

    /// Cell with the highest overall efficiency.
    pub fn best(&self) -> Option<&EfficiencyGridPoint> {
        self.cells
            .iter()
            .max_by(|a, b| a.overall_efficiency().total_cmp(&b.overall_efficiency()))
    }
}

/// Evaluate the loss model on every `(frac_disp, delta_p)` cell.
///
/// # Errors
/// Invalid parameters or axes.
pub fn generate_efficiency_map(
    params: &PumpMotorParameters,
    req: &MapRequest,
) -> SimResult<EfficiencyMap> {
    params.validate()?;
    req.validate()?;

    let frac_disp = req.frac_disp.points();
    let delta_p = req.delta_p.points();
    let w = params.speed;

    let columns = &delta_p;
    let cells: Vec<EfficiencyGridPoint> = frac_disp
        .par_iter()
        .flat_map_iter(move |&x| {
            columns.iter().map(move |&dp| {
                EfficiencyGridPoint::from_operating_point(&OperatingPoint::evaluate(
                    x, dp, w, params,
                ))
            })
        })
        .collect();

    tracing::debug!(
        rows = frac_disp.len(),
        cols = delta_p.len(),
        speed = w,
        scale = params.scale,
        "efficiency map generated"
    );

    Ok(EfficiencyMap {
        frac_disp,
        delta_p,
        speed: w,
        scale: params.scale,
        cells,
    })
}
