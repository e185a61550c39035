//! Flow and torque loss model.
//!
//! Every function here is pure and returns a nonnegative magnitude for losses.
//! The sample pipeline and the efficiency map both evaluate losses through this
//! module only.
//!
//! ```text
//! Q_loss = S|d Cs dp / mu| + S|x d w dp / B| + S|d^(2/3) Cst sqrt(2|dp|/rho)|
//! T_loss = S(|d Cv mu w| + |d dp Cf| + |x Ch w² rho d^(5/3) / 2|)
//! ```

use crate::params::PumpMotorParameters;

/// Laminar leakage `S|d Cs dp / mu|` (m³/s).
#[inline]
pub fn laminar_leakage(delta_p: f64, p: &PumpMotorParameters) -> f64 {
    p.scale * (p.displacement * p.losses.cs * delta_p / p.fluid.viscosity).abs()
}

/// Turbulent leakage `S|d^(2/3) Cst sqrt(2|dp|/rho)|` (m³/s).
#[inline]
pub fn turbulent_leakage(delta_p: f64, p: &PumpMotorParameters) -> f64 {
    let d_23 = p.displacement.powf(2.0 / 3.0);
    p.scale * (d_23 * p.losses.cst * (2.0 * delta_p.abs() / p.fluid.density).sqrt()).abs()
}

/// Compressibility flow loss per unit `|x|`: `S|d w dp / B|`.
///
/// The only flow-loss term that depends on displacement, and it does so linearly.
#[inline]
pub fn compressibility_gain(delta_p: f64, w: f64, p: &PumpMotorParameters) -> f64 {
    p.scale * (p.displacement * w * delta_p / p.fluid.bulk_modulus).abs()
}

/// Total flow loss magnitude (m³/s).
pub fn flow_loss(frac_disp: f64, delta_p: f64, w: f64, p: &PumpMotorParameters) -> f64 {
    laminar_leakage(delta_p, p)
        + frac_disp.abs() * compressibility_gain(delta_p, w, p)
        + turbulent_leakage(delta_p, p)
}

/// Total torque loss magnitude (N·m).
pub fn torque_loss(frac_disp: f64, delta_p: f64, w: f64, p: &PumpMotorParameters) -> f64 {
    let d = p.displacement;
    let viscous = (d * p.losses.cv * p.fluid.viscosity * w).abs();
    let friction = (d * delta_p * p.losses.cf).abs();
    let churning =
        (frac_disp * p.losses.ch * w * w * p.fluid.density * d.powf(5.0 / 3.0) / 2.0).abs();
    p.scale * (viscous + friction + churning)
}

/// Ideal (lossless) flow `x d w S` (m³/s).
#[inline]
pub fn ideal_flow(frac_disp: f64, w: f64, p: &PumpMotorParameters) -> f64 {
    frac_disp * p.flow_gain(w)
}

/// Ideal (lossless) torque `dp d x S` (N·m).
#[inline]
pub fn ideal_torque(frac_disp: f64, delta_p: f64, p: &PumpMotorParameters) -> f64 {
    delta_p * p.displacement * frac_disp * p.scale
}
