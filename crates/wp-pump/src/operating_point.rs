//! Steady operating point: quadrant + losses + actual flow and torque.

use crate::loss::{flow_loss, ideal_flow, ideal_torque, torque_loss};
use crate::params::PumpMotorParameters;
use crate::quadrant::Quadrant;

/// Fully evaluated pump/motor state at one `(x, dp, w)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OperatingPoint {
    pub frac_disp: f64,
    pub delta_p: f64,
    pub speed: f64,
    pub quadrant: Quadrant,
    pub q_ideal: f64,
    pub t_ideal: f64,
    pub q_loss: f64,
    pub t_loss: f64,
    pub q_act: f64,
    pub t_act: f64,
}

impl OperatingPoint {
    /// Evaluate the operating point for a given displacement, pressure and speed.
    pub fn evaluate(frac_disp: f64, delta_p: f64, w: f64, p: &PumpMotorParameters) -> Self {
        let quadrant = Quadrant::classify(delta_p, w);
        let q_ideal = ideal_flow(frac_disp, w, p);
        let t_ideal = ideal_torque(frac_disp, delta_p, p);
        let q_loss = flow_loss(frac_disp, delta_p, w, p);
        let t_loss = torque_loss(frac_disp, delta_p, w, p);

        Self {
            frac_disp,
            delta_p,
            speed: w,
            quadrant,
            q_ideal,
            t_ideal,
            q_loss,
            t_loss,
            q_act: quadrant.actual_flow(q_ideal, q_loss),
            t_act: quadrant.actual_torque(t_ideal, t_loss),
        }
    }

    /// Shaft power `w * T_act` (W). Positive when the shaft drives the unit.
    pub fn shaft_power(&self) -> f64 {
        self.speed * self.t_act
    }

    /// Hydraulic power `dp * Q_act` (W).
    pub fn hydraulic_power(&self) -> f64 {
        self.delta_p * self.q_act
    }
}
