//! Device-side parameters: actuator geometry, motor limits, generator.

use crate::error::{SimError, SimResult};
use wp_pump::PumpMotorParameters;

/// PTO hardware seen by the sample pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceParameters {
    /// Hydraulic cylinder rod-side area (m²). Converts actuator force and
    /// velocity to pressure differential and flow.
    pub rod_area: f64,
    /// Maximum shaft speed of the electrical machine (rad/s), if limited.
    pub max_motor_speed: Option<f64>,
    pub pump: PumpMotorParameters,
}

impl DeviceParameters {
    /// Create validated device parameters.
    ///
    /// # Errors
    /// Returns error if the rod area is not positive, the pump parameters are
    /// invalid, or the pump speed exceeds `max_motor_speed`.
    pub fn new(
        rod_area: f64,
        max_motor_speed: Option<f64>,
        pump: PumpMotorParameters,
    ) -> SimResult<Self> {
        let device = Self {
            rod_area,
            max_motor_speed,
            pump,
        };
        device.validate()?;
        Ok(device)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.rod_area.is_finite() || self.rod_area <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "rod area must be positive",
            });
        }
        self.pump.validate()?;
        if let Some(limit) = self.max_motor_speed {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(SimError::InvalidArg {
                    what: "max motor speed must be positive",
                });
            }
            if self.pump.speed.abs() > limit {
                return Err(SimError::InvalidArg {
                    what: "shaft speed exceeds max motor speed",
                });
            }
        }
        Ok(())
    }

    /// Commanded flow `velocity * rod_area` (m³/s).
    #[inline]
    pub fn commanded_flow(&self, velocity: f64) -> f64 {
        velocity * self.rod_area
    }

    /// Pressure differential `force / rod_area` (Pa).
    #[inline]
    pub fn pressure_differential(&self, force: f64) -> f64 {
        force / self.rod_area
    }
}

/// Electrical machine attached to the pump/motor shaft.
///
/// Applies a fixed efficiency in both directions, keyed on shaft power
/// `P_shaft = w * T_act` so either spin direction works:
///
/// ```text
/// P_shaft < 0 (generating): P_out = eta * P_shaft,   P_loss = -(1 - eta) * P_shaft
/// P_shaft ≥ 0 (motoring):   P_out = P_shaft / eta,   P_loss = (1/eta - 1) * P_shaft
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorModel {
    /// Conversion efficiency (0 < eta <= 1)
    pub efficiency: f64,
}

impl Default for GeneratorModel {
    fn default() -> Self {
        Self { efficiency: 0.9 }
    }
}

/// Electrical side of one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElectricalSplit {
    /// Electrical power, same sign as shaft power (W)
    pub p_out: f64,
    /// Conversion loss (W)
    pub p_loss: f64,
}

impl GeneratorModel {
    pub fn new(efficiency: f64) -> SimResult<Self> {
        let model = Self { efficiency };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(SimError::InvalidArg {
                what: "generator efficiency must be in (0,1]",
            });
        }
        Ok(())
    }

    pub fn split(&self, w: f64, t_act: f64) -> ElectricalSplit {
        let eta = self.efficiency;
        let shaft = w * t_act;
        if shaft < 0.0 {
            ElectricalSplit {
                p_out: eta * shaft,
                p_loss: -(1.0 - eta) * shaft,
            }
        } else {
            ElectricalSplit {
                p_out: shaft / eta,
                p_loss: (1.0 / eta - 1.0) * shaft,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_creation() {
        let dev = DeviceParameters::new(0.01, None, PumpMotorParameters::reference_hecm());
        assert!(dev.is_ok());
    }

    #[test]
    fn device_invalid_rod_area() {
        let dev = DeviceParameters::new(0.0, None, PumpMotorParameters::reference_hecm());
        assert!(dev.is_err());
    }

    #[test]
    fn device_speed_limit() {
        let pump = PumpMotorParameters::reference_hecm();
        assert!(DeviceParameters::new(0.01, Some(pump.speed * 1.1), pump).is_ok());
        assert!(DeviceParameters::new(0.01, Some(pump.speed * 0.9), pump).is_err());
    }

    #[test]
    fn rod_area_conversions() {
        let dev = DeviceParameters::new(0.02, None, PumpMotorParameters::reference_hecm()).unwrap();
        assert!((dev.commanded_flow(0.5) - 0.01).abs() < 1e-15);
        assert!((dev.pressure_differential(1e5) - 5e6).abs() < 1e-6);
    }

    #[test]
    fn generating_split() {
        let g = GeneratorModel::default();
        let s = g.split(100.0, -10.0);
        assert!((s.p_out + 900.0).abs() < 1e-9);
        assert!((s.p_loss - 100.0).abs() < 1e-9);
    }

    #[test]
    fn motoring_split() {
        let g = GeneratorModel::default();
        let s = g.split(100.0, 9.0);
        assert!((s.p_out - 1000.0).abs() < 1e-9);
        assert!((s.p_loss - 100.0).abs() < 1e-9);
    }

    #[test]
    fn loss_closes_balance() {
        let g = GeneratorModel::new(0.85).unwrap();
        for (w, t) in [
            (150.0, -20.0),
            (150.0, 20.0),
            (150.0, 0.0),
            (-150.0, 20.0),
            (-150.0, -20.0),
        ] {
            let s = g.split(w, t);
            assert!(s.p_loss >= 0.0);
            assert!((s.p_out - s.p_loss - w * t).abs() < 1e-9);
        }
    }

    #[test]
    fn reverse_spin_generating_split() {
        let g = GeneratorModel::default();
        // Negative speed with positive torque still delivers power to the grid
        let s = g.split(-100.0, 10.0);
        assert!((s.p_out + 900.0).abs() < 1e-9);
        assert!((s.p_loss - 100.0).abs() < 1e-9);

        let s = g.split(-100.0, -9.0);
        assert!((s.p_out - 1000.0).abs() < 1e-9);
        assert!((s.p_loss - 100.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_efficiency() {
        assert!(GeneratorModel::new(0.0).is_err());
        assert!(GeneratorModel::new(1.2).is_err());
        assert!(GeneratorModel::new(f64::NAN).is_err());
    }
}
