//! Pump/motor parameter bundle.

use crate::common::{check_finite, check_non_negative, check_positive};
use crate::error::{PumpError, PumpResult};
use uom::si::angular_velocity::radian_per_second;
use uom::si::dynamic_viscosity::pascal_second;
use wp_core::units::{cc, centistokes, displacement_per_radian, dynamic_viscosity, kg_per_m3, rpm};

/// Hydraulic fluid properties.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidProperties {
    /// Dynamic viscosity `mu` (Pa·s)
    pub viscosity: f64,
    /// Bulk modulus `B` (Pa). `f64::INFINITY` models an incompressible fluid.
    pub bulk_modulus: f64,
    /// Density `rho` (kg/m³)
    pub density: f64,
}

impl FluidProperties {
    /// Mineral hydraulic oil, 32 cSt at 870 kg/m³.
    pub fn hydraulic_oil() -> Self {
        let rho = kg_per_m3(870.0);
        Self {
            viscosity: dynamic_viscosity(centistokes(32.0), rho).get::<pascal_second>(),
            bulk_modulus: 1.7e9,
            density: 870.0,
        }
    }

    fn validate(&self) -> PumpResult<()> {
        check_positive(self.viscosity, "fluid viscosity must be positive")?;
        check_positive(self.density, "fluid density must be positive")?;
        if self.bulk_modulus.is_nan() || self.bulk_modulus <= 0.0 {
            return Err(PumpError::InvalidArg {
                what: "bulk modulus must be positive",
            });
        }
        Ok(())
    }
}

/// Empirical loss coefficients.
///
/// Torque losses: `cf` (Coulomb friction), `ch` (churning), `cv` (viscous).
/// Flow losses: `cs` (laminar leakage), `cst` (turbulent leakage).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LossCoefficients {
    pub cf: f64,
    pub ch: f64,
    pub cv: f64,
    pub cs: f64,
    pub cst: f64,
}

impl LossCoefficients {
    /// Coefficients for the 107 cc/rev reference unit.
    pub fn reference_hecm() -> Self {
        Self {
            cf: 53.7e-3,
            ch: 53.6,
            cv: 23.5e3,
            cs: 4.26e-9,
            cst: 0.0,
        }
    }

    /// All coefficients zero (lossless machine apart from fluid compressibility).
    pub fn lossless() -> Self {
        Self::default()
    }

    fn validate(&self) -> PumpResult<()> {
        check_non_negative(self.cf, "friction coefficient cannot be negative")?;
        check_non_negative(self.ch, "churning coefficient cannot be negative")?;
        check_non_negative(self.cv, "viscous coefficient cannot be negative")?;
        check_non_negative(self.cs, "laminar leakage coefficient cannot be negative")?;
        check_non_negative(self.cst, "turbulent leakage coefficient cannot be negative")?;
        Ok(())
    }
}

/// Variable-displacement pump/motor.
///
/// ## Model
///
/// Ideal flow and torque scale with the fractional displacement `x`:
///
/// ```text
/// Q_ideal = x * d * w * scale
/// T_ideal = x * d * dp * scale
/// ```
///
/// Loss magnitudes come from [`crate::loss`], and the quadrant decides how they
/// combine with the ideal values.
///
/// ## Sign Conventions
///
/// - `speed` is the shaft angular velocity and must be non-zero
/// - `scale` multiplies every flow and torque term linearly
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PumpMotorParameters {
    /// Displacement per radian at full stroke `d` (m³/rad)
    pub displacement: f64,
    /// Size multiplier relative to the reference unit
    pub scale: f64,
    /// Shaft angular velocity `w` (rad/s)
    pub speed: f64,
    pub fluid: FluidProperties,
    pub losses: LossCoefficients,
}

impl PumpMotorParameters {
    /// Create a validated parameter set.
    ///
    /// # Errors
    /// - `Domain` if `speed` is zero
    /// - `InvalidArg`/`NonPhysical` for non-positive or non-finite values
    pub fn new(
        displacement: f64,
        scale: f64,
        speed: f64,
        fluid: FluidProperties,
        losses: LossCoefficients,
    ) -> PumpResult<Self> {
        let params = Self {
            displacement,
            scale,
            speed,
            fluid,
            losses,
        };
        params.validate()?;
        Ok(params)
    }

    /// 107 cc/rev unit at 2000 rpm in mineral oil.
    pub fn reference_hecm() -> Self {
        Self {
            displacement: displacement_per_radian(cc(107.0)),
            scale: 1.0,
            speed: rpm(2000.0).get::<radian_per_second>(),
            fluid: FluidProperties::hydraulic_oil(),
            losses: LossCoefficients::reference_hecm(),
        }
    }

    pub fn validate(&self) -> PumpResult<()> {
        check_positive(self.displacement, "displacement must be positive")?;
        check_positive(self.scale, "scale must be positive")?;
        check_finite(self.speed, "shaft speed")?;
        if self.speed == 0.0 {
            return Err(PumpError::Domain {
                what: "shaft speed must be non-zero",
            });
        }
        self.fluid.validate()?;
        self.losses.validate()?;
        Ok(())
    }

    /// Copy with a different size multiplier.
    pub fn with_scale(self, scale: f64) -> PumpResult<Self> {
        let params = Self { scale, ..self };
        params.validate()?;
        Ok(params)
    }

    /// Copy with a different shaft speed.
    pub fn with_speed(self, speed: f64) -> PumpResult<Self> {
        let params = Self { speed, ..self };
        params.validate()?;
        Ok(params)
    }

    /// Copy with different loss coefficients.
    pub fn with_losses(self, losses: LossCoefficients) -> PumpResult<Self> {
        let params = Self { losses, ..self };
        params.validate()?;
        Ok(params)
    }

    /// Ideal flow per unit fractional displacement at speed `w`: `w * d * scale`.
    #[inline]
    pub fn flow_gain(&self, w: f64) -> f64 {
        w * self.displacement * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn reference_unit_is_valid() {
        let p = PumpMotorParameters::reference_hecm();
        assert!(p.validate().is_ok());
        assert!((p.displacement - 107.0e-6 / (2.0 * PI)).abs() < 1e-15);
        assert!((p.speed - 2000.0 * 2.0 * PI / 60.0).abs() < 1e-9);
        assert!((p.fluid.viscosity - 32.0e-6 * 870.0).abs() < 1e-12);
    }

    #[test]
    fn zero_speed_is_domain_error() {
        let p = PumpMotorParameters::reference_hecm();
        assert!(matches!(p.with_speed(0.0), Err(PumpError::Domain { .. })));
    }

    #[test]
    fn non_positive_scale_rejected() {
        let p = PumpMotorParameters::reference_hecm();
        assert!(p.with_scale(0.0).is_err());
        assert!(p.with_scale(-2.0).is_err());
        assert!(p.with_scale(2.0).is_ok());
    }

    #[test]
    fn incompressible_fluid_allowed() {
        let mut fluid = FluidProperties::hydraulic_oil();
        fluid.bulk_modulus = f64::INFINITY;
        let p = PumpMotorParameters::new(
            1e-5,
            1.0,
            100.0,
            fluid,
            LossCoefficients::lossless(),
        );
        assert!(p.is_ok());
    }

    #[test]
    fn negative_loss_coefficient_rejected() {
        let losses = LossCoefficients {
            cv: -1.0,
            ..LossCoefficients::reference_hecm()
        };
        let p = PumpMotorParameters::reference_hecm().with_losses(losses);
        assert!(matches!(p, Err(PumpError::InvalidArg { .. })));
    }
}
