//! Operating quadrant classification.

use std::fmt;
use wp_core::numeric::sign_nonneg;

/// Operating quadrant of the pump/motor in the `(w, dp)` plane.
///
/// | Quadrant | dp  | w   | Q_act             | T_act             |
/// |----------|-----|-----|-------------------|-------------------|
/// | 1        | ≥ 0 | ≥ 0 | Q_ideal − Q_loss  | T_ideal + T_loss  |
/// | 2        | ≥ 0 | < 0 | Q_ideal − Q_loss  | T_ideal − T_loss  |
/// | 3        | < 0 | < 0 | Q_ideal + Q_loss  | T_ideal − T_loss  |
/// | 4        | < 0 | ≥ 0 | Q_ideal + Q_loss  | T_ideal + T_loss  |
///
/// Zero counts as nonnegative on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    First,
    Second,
    Third,
    Fourth,
}

impl Quadrant {
    /// Classify from pressure differential and shaft speed. Total over all reals.
    pub fn classify(delta_p: f64, w: f64) -> Self {
        match (delta_p >= 0.0, w >= 0.0) {
            (true, true) => Quadrant::First,
            (true, false) => Quadrant::Second,
            (false, false) => Quadrant::Third,
            (false, true) => Quadrant::Fourth,
        }
    }

    /// Conventional quadrant number, 1 to 4.
    pub fn number(self) -> u8 {
        match self {
            Quadrant::First => 1,
            Quadrant::Second => 2,
            Quadrant::Third => 3,
            Quadrant::Fourth => 4,
        }
    }

    /// Multiplier `σ_Q` applied to the flow loss: `Q_act = Q_ideal + σ_Q * Q_loss`.
    pub fn flow_loss_sign(self) -> f64 {
        match self {
            Quadrant::First | Quadrant::Second => -1.0,
            Quadrant::Third | Quadrant::Fourth => 1.0,
        }
    }

    /// Multiplier `σ_T` applied to the torque loss: `T_act = T_ideal + σ_T * T_loss`.
    pub fn torque_loss_sign(self) -> f64 {
        match self {
            Quadrant::First | Quadrant::Fourth => 1.0,
            Quadrant::Second | Quadrant::Third => -1.0,
        }
    }

    pub fn actual_flow(self, q_ideal: f64, q_loss: f64) -> f64 {
        q_ideal + self.flow_loss_sign() * q_loss
    }

    pub fn actual_torque(self, t_ideal: f64, t_loss: f64) -> f64 {
        t_ideal + self.torque_loss_sign() * t_loss
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

/// Sign of `dp` as used by the flow balance: `+1` for `dp >= 0`, `-1` otherwise.
///
/// Always equals `-flow_loss_sign()` of the quadrant `dp` falls in.
#[inline]
pub fn pressure_sign(delta_p: f64) -> f64 {
    sign_nonneg(delta_p)
}
