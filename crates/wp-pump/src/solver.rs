//! Fractional displacement solve.
//!
//! Finds `x` such that the actual flow equals the commanded flow:
//!
//! ```text
//! Q_cmd = w d S x − sign(dp) Q_loss(x, dp, w)
//! ```
//!
//! `Q_loss` is linear in `|x|` (compressibility term only), so the balance is
//! linear once the sign of `x` is fixed:
//!
//! ```text
//! N  = Q_cmd + sign(dp) (laminar + turbulent)
//! D+ = w d S − sign(dp) K        (x ≥ 0)
//! D− = w d S + sign(dp) K        (x < 0)
//! ```
//!
//! with `K = S|d w dp / B|`. The positive branch is tried first; a result
//! `≤ 0`, or a vanishing `D+`, falls through to the negative branch, which is
//! accepted as is.

use crate::common::check_finite;
use crate::error::{PumpError, PumpResult};
use crate::loss::{compressibility_gain, laminar_leakage, turbulent_leakage};
use crate::params::PumpMotorParameters;
use crate::quadrant::pressure_sign;

/// Which sign assumption produced the solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolveBranch {
    /// `x ≥ 0` assumed and confirmed (`x > 0`).
    AssumedPositive,
    /// Positive branch gave `x ≤ 0`; solved with the `x < 0` denominator.
    FallbackNegative,
}

/// Solved fractional displacement tagged with the branch taken.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FracDispSolution {
    pub frac_disp: f64,
    pub branch: SolveBranch,
    /// Whether `frac_disp` agrees in sign with the branch that produced it.
    ///
    /// The fallback branch is never re-validated; `false` here means the
    /// returned value will not reproduce `Q_cmd`.
    pub assumption_held: bool,
}

impl FracDispSolution {
    /// `|x| <= 1`: the unit can deliver the commanded flow.
    pub fn is_feasible(&self) -> bool {
        self.frac_disp.abs() <= 1.0
    }
}

/// Solve for fractional displacement at shaft speed `w`.
///
/// # Errors
/// - `Domain` if `w == 0` (both denominators vanish)
/// - `NonPhysical` for non-finite inputs
pub fn solve_frac_disp(
    q_cmd: f64,
    delta_p: f64,
    w: f64,
    p: &PumpMotorParameters,
) -> PumpResult<FracDispSolution> {
    check_finite(q_cmd, "commanded flow")?;
    check_finite(delta_p, "pressure differential")?;
    check_finite(w, "shaft speed")?;
    if w == 0.0 {
        return Err(PumpError::Domain {
            what: "cannot solve displacement at zero shaft speed",
        });
    }

    let sign = pressure_sign(delta_p);
    let gain = p.flow_gain(w);
    let k = compressibility_gain(delta_p, w, p);
    let numerator =
        q_cmd + sign * laminar_leakage(delta_p, p) + sign * turbulent_leakage(delta_p, p);

    // D+ vanishes at |dp| = B; only the negative branch is defined there
    let d_pos = gain - sign * k;
    if d_pos != 0.0 {
        let positive = numerator / d_pos;
        if positive > 0.0 {
            return Ok(FracDispSolution {
                frac_disp: positive,
                branch: SolveBranch::AssumedPositive,
                assumption_held: true,
            });
        }
    }

    let negative = numerator / (gain + sign * k);
    if negative > 0.0 {
        tracing::trace!(
            q_cmd,
            delta_p,
            frac_disp = negative,
            "fallback displacement branch contradicts its sign assumption"
        );
    }

    Ok(FracDispSolution {
        frac_disp: negative,
        branch: SolveBranch::FallbackNegative,
        assumption_held: negative <= 0.0,
    })
}

/// Actual flow reconstructed from a solved displacement.
///
/// Uses the same loss model as the solve; equals `Q_cmd` to rounding when the
/// branch assumption held.
pub fn reconstructed_flow(frac_disp: f64, delta_p: f64, w: f64, p: &PumpMotorParameters) -> f64 {
    crate::operating_point::OperatingPoint::evaluate(frac_disp, delta_p, w, p).q_act
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{FluidProperties, LossCoefficients};
    use wp_core::numeric::{Tolerances, nearly_equal};

    fn reference() -> PumpMotorParameters {
        PumpMotorParameters::reference_hecm()
    }

    #[test]
    fn zero_speed_is_domain_error() {
        let p = reference();
        let err = solve_frac_disp(0.001, 1e6, 0.0, &p).unwrap_err();
        assert!(matches!(err, PumpError::Domain { .. }));
    }

    #[test]
    fn nan_flow_rejected() {
        let p = reference();
        let err = solve_frac_disp(f64::NAN, 1e6, p.speed, &p).unwrap_err();
        assert!(matches!(err, PumpError::NonPhysical { .. }));
    }

    #[test]
    fn positive_flow_takes_positive_branch() {
        let p = reference();
        let sol = solve_frac_disp(0.003, 5e6, p.speed, &p).unwrap();
        assert_eq!(sol.branch, SolveBranch::AssumedPositive);
        assert!(sol.assumption_held);
        assert!(sol.frac_disp > 0.0 && sol.frac_disp < 1.0);
    }

    #[test]
    fn negative_flow_falls_back() {
        let p = reference();
        let sol = solve_frac_disp(-0.003, 5e6, p.speed, &p).unwrap();
        assert_eq!(sol.branch, SolveBranch::FallbackNegative);
        assert!(sol.assumption_held);
        assert!(sol.frac_disp < 0.0);

        let q = reconstructed_flow(sol.frac_disp, 5e6, p.speed, &p);
        assert!(nearly_equal(q, -0.003, Tolerances::default()));
    }

    #[test]
    fn leakage_only_flow_gives_zero_stroke_via_fallback() {
        // Q_cmd exactly cancels leakage -> numerator zero
        let p = reference()
            .with_losses(LossCoefficients {
                cst: 0.0,
                ..LossCoefficients::reference_hecm()
            })
            .unwrap();
        let dp = 1e7;
        let q_cmd = -laminar_leakage(dp, &p);
        let sol = solve_frac_disp(q_cmd, dp, p.speed, &p).unwrap();
        assert_eq!(sol.branch, SolveBranch::FallbackNegative);
        assert_eq!(sol.frac_disp, 0.0);
        assert!(sol.assumption_held);
    }

    #[test]
    fn negative_speed_reconstructs() {
        let p = reference();
        let w = -p.speed;
        for (q, dp) in [(0.002, 8e6), (-0.002, 8e6), (0.002, -8e6), (-0.002, -8e6)] {
            let sol = solve_frac_disp(q, dp, w, &p).unwrap();
            assert!(sol.assumption_held);
            let q_act = reconstructed_flow(sol.frac_disp, dp, w, &p);
            assert!(
                nearly_equal(q_act, q, Tolerances::default()),
                "q={q} dp={dp} q_act={q_act}"
            );
        }
    }

    #[test]
    fn zero_loss_reduces_to_geometric_ratio() {
        let fluid = FluidProperties {
            bulk_modulus: f64::INFINITY,
            ..FluidProperties::hydraulic_oil()
        };
        let p = PumpMotorParameters::new(2e-5, 1.5, 150.0, fluid, LossCoefficients::lossless())
            .unwrap();
        for q in [0.004, -0.0025] {
            let sol = solve_frac_disp(q, 1.2e7, p.speed, &p).unwrap();
            assert_eq!(sol.frac_disp, q / (p.speed * p.displacement * p.scale));
        }
    }

    #[test]
    fn super_bulk_pressure_breaks_fallback_assumption() {
        // |dp| > B flips the sign of D+; the fallback result is returned unverified
        let fluid = FluidProperties {
            bulk_modulus: 1e6,
            ..FluidProperties::hydraulic_oil()
        };
        let p = PumpMotorParameters::new(
            1e-5,
            1.0,
            100.0,
            fluid,
            LossCoefficients::lossless(),
        )
        .unwrap();
        let sol = solve_frac_disp(1e-4, 2e6, p.speed, &p).unwrap();
        assert_eq!(sol.branch, SolveBranch::FallbackNegative);
        assert!(!sol.assumption_held);
        let q_act = reconstructed_flow(sol.frac_disp, 2e6, p.speed, &p);
        assert!(!nearly_equal(q_act, 1e-4, Tolerances::default()));
    }

    #[test]
    fn bulk_modulus_pressure_skips_singular_positive_branch() {
        // Powers of two keep D+ exactly zero at dp = B
        let fluid = FluidProperties {
            bulk_modulus: 1_048_576.0,
            ..FluidProperties::hydraulic_oil()
        };
        let p = PumpMotorParameters::new(
            1.0 / 65_536.0,
            1.0,
            128.0,
            fluid,
            LossCoefficients::lossless(),
        )
        .unwrap();
        let sol = solve_frac_disp(1e-3, 1_048_576.0, p.speed, &p).unwrap();
        assert_eq!(sol.branch, SolveBranch::FallbackNegative);
        assert!(sol.frac_disp.is_finite());
        assert!(!sol.assumption_held);
    }
}
