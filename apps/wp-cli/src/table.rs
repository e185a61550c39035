//! CSV input and output tables.

use crate::error::CliResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use wp_sim::{EfficiencyMap, Sample, SolvedSample};

#[derive(Debug, Deserialize)]
struct SampleRow {
    time: f64,
    force: f64,
    velocity: f64,
}

#[derive(Debug, Serialize)]
struct SolvedRow {
    time: f64,
    q_cmd: f64,
    delta_p: f64,
    frac_disp: f64,
    branch: String,
    quadrant: u8,
    q_loss: f64,
    t_loss: f64,
    q_ideal: f64,
    t_ideal: f64,
    q_act_calc: f64,
    t_act: f64,
    p_in: f64,
    p_out: f64,
    p_leak: f64,
    p_mech: f64,
    p_electrical_loss: f64,
    infeasible: bool,
    residual_mismatch: bool,
}

impl From<&SolvedSample> for SolvedRow {
    fn from(s: &SolvedSample) -> Self {
        Self {
            time: s.time,
            q_cmd: s.q_cmd,
            delta_p: s.delta_p,
            frac_disp: s.frac_disp,
            branch: format!("{:?}", s.branch),
            quadrant: s.quadrant.number(),
            q_loss: s.q_loss,
            t_loss: s.t_loss,
            q_ideal: s.q_ideal,
            t_ideal: s.t_ideal,
            q_act_calc: s.q_act_calc,
            t_act: s.t_act,
            p_in: s.p_in,
            p_out: s.p_out,
            p_leak: s.p_leak,
            p_mech: s.p_mech,
            p_electrical_loss: s.p_electrical_loss,
            infeasible: s.infeasible,
            residual_mismatch: s.residual_mismatch,
        }
    }
}

#[derive(Debug, Serialize)]
struct MapRow {
    frac_disp: f64,
    delta_p: f64,
    quadrant: u8,
    q_act: f64,
    t_act: f64,
    volumetric_efficiency: f64,
    torque_efficiency: f64,
}

/// Read a `time,force,velocity` series.
pub fn read_series(path: &Path) -> CliResult<Vec<Sample>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut samples = Vec::new();
    for result in reader.deserialize() {
        let row: SampleRow = result?;
        samples.push(Sample::new(row.time, row.force, row.velocity));
    }
    Ok(samples)
}

pub fn write_solved(path: &Path, solved: &[SolvedSample]) -> CliResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for s in solved {
        writer.serialize(SolvedRow::from(s))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_map(path: &Path, map: &EfficiencyMap) -> CliResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for c in &map.cells {
        writer.serialize(MapRow {
            frac_disp: c.frac_disp,
            delta_p: c.delta_p,
            quadrant: c.quadrant.number(),
            q_act: c.q_act,
            t_act: c.t_act,
            volumetric_efficiency: c.volumetric_efficiency,
            torque_efficiency: c.torque_efficiency,
        })?;
    }
    writer.flush()?;
    Ok(())
}
