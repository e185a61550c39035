// wp-core/src/units.rs

use uom::si::f64::{
    Angle as UomAngle, AngularVelocity as UomAngularVelocity,
    DiffusionCoefficient as UomDiffusionCoefficient, DynamicViscosity as UomDynamicViscosity,
    Energy as UomEnergy, MassDensity as UomMassDensity,
    Power as UomPower, Pressure as UomPressure, Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type AngularVelocity = UomAngularVelocity;
pub type DynVisc = UomDynamicViscosity;
pub type Energy = UomEnergy;
/// Kinematic viscosity (m²/s). uom files centistokes under diffusion coefficient.
pub type KinVisc = UomDiffusionCoefficient;
pub type Density = UomMassDensity;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Volume = UomVolume;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn rad_per_s(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

#[inline]
pub fn rpm(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::revolution_per_minute;
    AngularVelocity::new::<revolution_per_minute>(v)
}

#[inline]
pub fn cc(v: f64) -> Volume {
    use uom::si::volume::cubic_centimeter;
    Volume::new::<cubic_centimeter>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn j(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn centistokes(v: f64) -> KinVisc {
    use uom::si::diffusion_coefficient::centistokes;
    KinVisc::new::<centistokes>(v)
}

/// Displacement per shaft radian (m³/rad) from displacement per revolution.
pub fn displacement_per_radian(per_rev: Volume) -> f64 {
    use uom::si::angle::{radian, revolution};
    use uom::si::volume::cubic_meter;
    per_rev.get::<cubic_meter>() / Angle::new::<revolution>(1.0).get::<radian>()
}

/// Dynamic viscosity (Pa·s) from kinematic viscosity and density.
pub fn dynamic_viscosity(nu: KinVisc, rho: Density) -> DynVisc {
    nu * rho
}
