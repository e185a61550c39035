//! Per-sample solve: actuator sample → pump/motor operating state and powers.

use crate::device::{DeviceParameters, GeneratorModel};
use crate::error::SimResult;
use wp_core::numeric::{Tolerances, ensure_finite, nearly_equal};
use wp_pump::{OperatingPoint, Quadrant, SolveBranch, solve_frac_disp};

/// One time step from the device simulator (actuator frame).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Time (s)
    pub time: f64,
    /// Actuator force (N)
    pub force: f64,
    /// Actuator velocity (m/s)
    pub velocity: f64,
}

impl Sample {
    pub fn new(time: f64, force: f64, velocity: f64) -> Self {
        Self {
            time,
            force,
            velocity,
        }
    }
}

/// Fully evaluated sample.
///
/// Power sign convention: positive flows from the electrical side towards the
/// device (motoring), negative when the PTO generates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolvedSample {
    pub time: f64,
    /// Commanded flow `velocity * rod_area` (m³/s)
    pub q_cmd: f64,
    /// Pressure differential `force / rod_area` (Pa)
    pub delta_p: f64,
    pub frac_disp: f64,
    pub branch: SolveBranch,
    pub quadrant: Quadrant,
    pub q_loss: f64,
    pub t_loss: f64,
    pub q_ideal: f64,
    pub t_ideal: f64,
    /// Flow reconstructed from `frac_disp`; should equal `q_cmd`
    pub q_act_calc: f64,
    pub t_act: f64,
    /// Hydraulic power at the actuator `force * velocity` (W)
    pub p_in: f64,
    /// Electrical power after the generator split (W)
    pub p_out: f64,
    /// Shaft power `w * t_act` (W)
    pub p_shaft: f64,
    /// Leakage power `|dp * q_loss|` (W)
    pub p_leak: f64,
    /// Mechanical loss power `|w| * t_loss` (W)
    pub p_mech: f64,
    pub p_electrical_loss: f64,
    /// `|frac_disp| > 1`: the unit cannot deliver `q_cmd` at this speed
    pub infeasible: bool,
    /// `q_act_calc` disagrees with `q_cmd` beyond the residual tolerance
    pub residual_mismatch: bool,
}

impl SolvedSample {
    pub fn is_flagged(&self) -> bool {
        self.infeasible || self.residual_mismatch
    }

    /// Split-sign instantaneous efficiency.
    ///
    /// ```text
    /// (hydraulic_out + mechanical_out) / (hydraulic_in + mechanical_in)
    /// ```
    ///
    /// `None` when nothing flows in either direction.
    pub fn efficiency(&self) -> Option<f64> {
        let split = PowerSplit::new(self.p_in, self.p_out);
        split.efficiency()
    }
}

/// Sign-split power flows of one sample, seen from the PTO (all nonnegative).
///
/// - `hydraulic_in`: absorbed from the device (`p_in < 0`)
/// - `hydraulic_out`: delivered to the device (`p_in > 0`)
/// - `mechanical_in`: drawn from the electrical side (`p_out > 0`)
/// - `mechanical_out`: delivered to the electrical side (`p_out < 0`)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PowerSplit {
    pub hydraulic_in: f64,
    pub hydraulic_out: f64,
    pub mechanical_in: f64,
    pub mechanical_out: f64,
}

impl PowerSplit {
    pub fn new(p_in: f64, p_out: f64) -> Self {
        Self {
            hydraulic_in: (-p_in).max(0.0),
            hydraulic_out: p_in.max(0.0),
            mechanical_in: p_out.max(0.0),
            mechanical_out: (-p_out).max(0.0),
        }
    }

    pub fn input(&self) -> f64 {
        self.hydraulic_in + self.mechanical_in
    }

    pub fn output(&self) -> f64 {
        self.hydraulic_out + self.mechanical_out
    }

    pub fn efficiency(&self) -> Option<f64> {
        let input = self.input();
        if input > 0.0 {
            Some(self.output() / input)
        } else {
            None
        }
    }
}

/// Evaluate one sample against the device.
///
/// # Errors
/// Non-finite sample values, or a domain error from the displacement solve.
pub fn solve_sample(
    sample: &Sample,
    device: &DeviceParameters,
    generator: &GeneratorModel,
    residual_tol: Tolerances,
) -> SimResult<SolvedSample> {
    ensure_finite(sample.time, "sample time")?;
    ensure_finite(sample.force, "sample force")?;
    ensure_finite(sample.velocity, "sample velocity")?;

    let pump = &device.pump;
    let w = pump.speed;
    let q_cmd = device.commanded_flow(sample.velocity);
    let delta_p = device.pressure_differential(sample.force);

    let solution = solve_frac_disp(q_cmd, delta_p, w, pump)?;
    let op = OperatingPoint::evaluate(solution.frac_disp, delta_p, w, pump);
    let electrical = generator.split(w, op.t_act);

    Ok(SolvedSample {
        time: sample.time,
        q_cmd,
        delta_p,
        frac_disp: solution.frac_disp,
        branch: solution.branch,
        quadrant: op.quadrant,
        q_loss: op.q_loss,
        t_loss: op.t_loss,
        q_ideal: op.q_ideal,
        t_ideal: op.t_ideal,
        q_act_calc: op.q_act,
        t_act: op.t_act,
        p_in: sample.force * sample.velocity,
        p_out: electrical.p_out,
        p_shaft: op.shaft_power(),
        p_leak: (delta_p * op.q_loss).abs(),
        p_mech: w.abs() * op.t_loss,
        p_electrical_loss: electrical.p_loss,
        infeasible: !solution.is_feasible(),
        residual_mismatch: !nearly_equal(op.q_act, q_cmd, residual_tol),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wp_pump::PumpMotorParameters;

    fn device() -> DeviceParameters {
        DeviceParameters::new(0.01, None, PumpMotorParameters::reference_hecm()).unwrap()
    }

    fn solve(sample: Sample) -> SolvedSample {
        solve_sample(
            &sample,
            &device(),
            &GeneratorModel::default(),
            Tolerances::default(),
        )
        .unwrap()
    }

    #[test]
    fn derived_flow_and_pressure() {
        let s = solve(Sample::new(0.0, 5e4, 0.2));
        assert!((s.q_cmd - 0.002).abs() < 1e-15);
        assert!((s.delta_p - 5e6).abs() < 1e-6);
        assert!((s.p_in - 1e4).abs() < 1e-9);
        assert_eq!(s.quadrant, Quadrant::First);
        assert!(!s.is_flagged());
    }

    #[test]
    fn generating_sample() {
        // Force opposes velocity: device pushes fluid through the motor
        let s = solve(Sample::new(1.0, 5e4, -0.2));
        assert!(s.frac_disp < 0.0);
        assert_eq!(s.branch, SolveBranch::FallbackNegative);
        assert!(s.t_act < 0.0);
        assert!(s.p_in < 0.0);
        assert!(s.p_out < 0.0);
        assert!(s.p_out.abs() < s.p_in.abs());
        let eff = s.efficiency().unwrap();
        assert!(eff > 0.0 && eff < 1.0);
    }

    #[test]
    fn oversized_demand_is_flagged_not_failed() {
        let s = solve(Sample::new(0.0, 5e4, 0.6));
        assert!(s.infeasible);
        assert!(!s.residual_mismatch);
        assert!((s.q_act_calc - s.q_cmd).abs() < 1e-12);
    }

    #[test]
    fn losses_as_power() {
        let s = solve(Sample::new(0.0, 1e5, 0.1));
        let w = PumpMotorParameters::reference_hecm().speed;
        assert!((s.p_leak - (s.delta_p * s.q_loss).abs()).abs() < 1e-9);
        assert!((s.p_mech - w.abs() * s.t_loss).abs() < 1e-9);
        assert!((s.p_shaft - w * s.t_act).abs() < 1e-9);
    }

    #[test]
    fn reverse_spin_generating_sample_has_positive_losses() {
        let pump = PumpMotorParameters::reference_hecm();
        let pump = pump.with_speed(-pump.speed).unwrap();
        let device = DeviceParameters::new(0.01, None, pump).unwrap();
        let s = solve_sample(
            &Sample::new(1.0, 5e4, -0.2),
            &device,
            &GeneratorModel::default(),
            Tolerances::default(),
        )
        .unwrap();

        assert!(!s.is_flagged());
        assert!(s.p_shaft < 0.0);
        assert!(s.p_out < 0.0);
        assert!(s.p_out.abs() < s.p_shaft.abs());
        assert!(s.p_mech > 0.0);
        assert!(s.p_electrical_loss > 0.0);
        let losses = s.p_electrical_loss + s.p_mech + s.p_leak;
        assert!(((s.p_out - s.p_in) - losses).abs() < 1e-6 * s.p_in.abs());
    }

    #[test]
    fn non_finite_sample_rejected() {
        let res = solve_sample(
            &Sample::new(0.0, f64::NAN, 0.1),
            &device(),
            &GeneratorModel::default(),
            Tolerances::default(),
        );
        assert!(res.is_err());
    }

    #[test]
    fn idle_sample_has_no_efficiency() {
        let split = PowerSplit::new(0.0, 0.0);
        assert_eq!(split.efficiency(), None);
    }

    #[test]
    fn power_split_motoring() {
        // Electrical power in, hydraulic power out to the actuator
        let split = PowerSplit::new(30.0, 40.0);
        assert_eq!(split.hydraulic_in, 0.0);
        assert_eq!(split.hydraulic_out, 30.0);
        assert_eq!(split.mechanical_in, 40.0);
        assert_eq!(split.mechanical_out, 0.0);
        assert_eq!(split.efficiency(), Some(0.75));
    }

    #[test]
    fn power_split_generating() {
        let split = PowerSplit::new(-100.0, -60.0);
        assert_eq!(split.hydraulic_in, 100.0);
        assert_eq!(split.mechanical_out, 60.0);
        assert_eq!(split.efficiency(), Some(0.6));
    }

    #[test]
    fn absorbing_while_drawing_power_has_zero_efficiency() {
        let split = PowerSplit::new(-10.0, 5.0);
        assert_eq!(split.efficiency(), Some(0.0));
    }
}
