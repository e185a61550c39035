//! Conversion from project definitions into runtime parameter types.

use crate::ProjectResult;
use crate::schema::{AxisDef, IntegrationDef, Project};
use uom::si::angular_velocity::radian_per_second;
use uom::si::dynamic_viscosity::pascal_second;
use uom::si::pressure::pascal;
use wp_core::units::{bar, cc, centistokes, displacement_per_radian, dynamic_viscosity, kg_per_m3, rpm};
use wp_pump::{FluidProperties, LossCoefficients, PumpMotorParameters};
use wp_sim::{
    AnalysisOptions, DeviceParameters, GeneratorModel, GridAxis, IntegrationRule, MapRequest,
    WaveResource,
};

fn rad_per_s_from_rpm(v: f64) -> f64 {
    rpm(v).get::<radian_per_second>()
}

impl Project {
    pub fn fluid_properties(&self) -> FluidProperties {
        let rho = kg_per_m3(self.fluid.density_kg_m3);
        FluidProperties {
            viscosity: dynamic_viscosity(centistokes(self.fluid.kinematic_viscosity_cst), rho)
                .get::<pascal_second>(),
            bulk_modulus: self.fluid.bulk_modulus_pa.unwrap_or(f64::INFINITY),
            density: self.fluid.density_kg_m3,
        }
    }

    pub fn loss_coefficients(&self) -> LossCoefficients {
        let l = &self.losses;
        LossCoefficients {
            cf: l.cf,
            ch: l.ch,
            cv: l.cv,
            cs: l.cs,
            cst: l.cst,
        }
    }

    pub fn pump_parameters(&self) -> ProjectResult<PumpMotorParameters> {
        Ok(PumpMotorParameters::new(
            displacement_per_radian(cc(self.pump.displacement_cc_per_rev)),
            self.pump.scale,
            rad_per_s_from_rpm(self.pump.speed_rpm),
            self.fluid_properties(),
            self.loss_coefficients(),
        )?)
    }

    pub fn device_parameters(&self) -> ProjectResult<DeviceParameters> {
        Ok(DeviceParameters::new(
            self.device.rod_area_m2,
            self.device.max_motor_speed_rpm.map(rad_per_s_from_rpm),
            self.pump_parameters()?,
        )?)
    }

    pub fn analysis_options(&self) -> ProjectResult<AnalysisOptions> {
        let a = &self.analysis;
        let opts = AnalysisOptions {
            integration: match a.integration {
                IntegrationDef::Rectangular => IntegrationRule::Rectangular,
                IntegrationDef::Trapezoidal => IntegrationRule::Trapezoidal,
            },
            transient_s: a.transient_s,
            window_end: a.window_end_s,
            generator: GeneratorModel::new(a.generator_efficiency)?,
            residual_tol: a.residual_tol,
            wave: self.wave.as_ref().map(|w| WaveResource {
                power_per_width: w.power_per_width_w_per_m,
                reference_width: w.reference_width_m,
            }),
        };
        opts.validate()?;
        Ok(opts)
    }

    /// Pump parameters and axes for the efficiency map, if the project defines one.
    ///
    /// The map's speed and scale overrides apply here only.
    pub fn map_request(&self) -> ProjectResult<Option<(PumpMotorParameters, MapRequest)>> {
        let Some(map) = &self.map else {
            return Ok(None);
        };

        let mut params = self.pump_parameters()?;
        if let Some(speed) = map.speed_rpm {
            params = params.with_speed(rad_per_s_from_rpm(speed))?;
        }
        if let Some(scale) = map.scale {
            params = params.with_scale(scale)?;
        }

        let req = MapRequest {
            frac_disp: axis(&map.frac_disp, |v| v)?,
            delta_p: axis(&map.delta_p_bar, |v| bar(v).get::<pascal>())?,
        };
        Ok(Some((params, req)))
    }
}

fn axis(def: &AxisDef, to_si: impl Fn(f64) -> f64) -> ProjectResult<GridAxis> {
    Ok(GridAxis::new(to_si(def.start), to_si(def.end), def.points)?)
}
