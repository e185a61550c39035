//! Integration tests for the pump/motor kernel.

use proptest::prelude::*;
use wp_core::numeric::{Tolerances, nearly_equal};
use wp_pump::loss::{flow_loss, ideal_flow, ideal_torque, torque_loss};
use wp_pump::{
    FluidProperties, LossCoefficients, OperatingPoint, PumpMotorParameters, Quadrant, SolveBranch,
    reconstructed_flow, solve_frac_disp,
};

#[test]
fn reference_scenario_at_full_demand() {
    // 0.006 m³/s is ~360 L/min, above the ~214 L/min a 107 cc/rev unit moves at 2000 rpm
    let p = PumpMotorParameters::reference_hecm();
    let dp = 5.0e6;
    let q_cmd = 0.006;

    assert_eq!(Quadrant::classify(dp, p.speed), Quadrant::First);

    let sol = solve_frac_disp(q_cmd, dp, p.speed, &p).unwrap();
    assert_eq!(sol.branch, SolveBranch::AssumedPositive);
    assert!(sol.frac_disp > 0.0);
    assert!((sol.frac_disp - 1.6909).abs() < 1e-3, "x = {}", sol.frac_disp);
    assert!(!sol.is_feasible());

    let q_act = reconstructed_flow(sol.frac_disp, dp, p.speed, &p);
    assert!(nearly_equal(q_act, q_cmd, Tolerances::default()));
}

#[test]
fn reference_scenario_with_doubled_unit_is_feasible() {
    let p = PumpMotorParameters::reference_hecm().with_scale(2.0).unwrap();
    let dp = 5.0e6;
    let q_cmd = 0.006;

    let sol = solve_frac_disp(q_cmd, dp, p.speed, &p).unwrap();
    assert!(sol.frac_disp > 0.0 && sol.frac_disp < 1.0);
    assert!(sol.is_feasible());

    let op = OperatingPoint::evaluate(sol.frac_disp, dp, p.speed, &p);
    assert_eq!(op.quadrant, Quadrant::First);
    assert!(nearly_equal(op.q_act, q_cmd, Tolerances::default()));
}

#[test]
fn doubling_scale_doubles_every_term() {
    let p1 = PumpMotorParameters::reference_hecm()
        .with_losses(LossCoefficients {
            cst: 0.01,
            ..LossCoefficients::reference_hecm()
        })
        .unwrap();
    let p2 = p1.with_scale(2.0 * p1.scale).unwrap();

    for (x, dp, w) in [(0.4, 7e6, 180.0), (-0.9, -2e7, 90.0), (0.1, 3e5, -250.0)] {
        assert_eq!(ideal_flow(x, w, &p2), 2.0 * ideal_flow(x, w, &p1));
        assert_eq!(ideal_torque(x, dp, &p2), 2.0 * ideal_torque(x, dp, &p1));
        assert_eq!(flow_loss(x, dp, w, &p2), 2.0 * flow_loss(x, dp, w, &p1));
        assert_eq!(torque_loss(x, dp, w, &p2), 2.0 * torque_loss(x, dp, w, &p1));
    }
}

#[test]
fn actual_values_continuous_across_zero_pressure() {
    let p = PumpMotorParameters::reference_hecm()
        .with_losses(LossCoefficients {
            cst: 0.01,
            ..LossCoefficients::reference_hecm()
        })
        .unwrap();
    let x = 0.6;
    let w = p.speed;

    let mut last_gap = f64::INFINITY;
    for eps in [1e3, 1.0, 1e-3, 1e-9] {
        let above = OperatingPoint::evaluate(x, eps, w, &p);
        let below = OperatingPoint::evaluate(x, -eps, w, &p);
        assert_eq!(above.quadrant, Quadrant::First);
        assert_eq!(below.quadrant, Quadrant::Fourth);

        let gap = (above.q_act - below.q_act).abs() + (above.t_act - below.t_act).abs();
        assert!(gap < last_gap);
        last_gap = gap;
    }
    assert!(last_gap < 1e-8, "gap = {last_gap}");
}

#[test]
fn actual_flow_continuous_across_zero_speed() {
    let p = PumpMotorParameters::reference_hecm();
    let x = -0.3;
    let dp = 1.5e7;

    for eps in [1e-8, 1e-10] {
        let fwd = OperatingPoint::evaluate(x, dp, eps, &p);
        let rev = OperatingPoint::evaluate(x, dp, -eps, &p);
        assert_eq!(fwd.quadrant, Quadrant::First);
        assert_eq!(rev.quadrant, Quadrant::Second);
        assert!((fwd.q_act - rev.q_act).abs() < 1e-12);
    }
}

#[test]
fn torque_continuous_across_zero_speed_without_coulomb_friction() {
    let p = PumpMotorParameters::reference_hecm()
        .with_losses(LossCoefficients {
            cf: 0.0,
            ..LossCoefficients::reference_hecm()
        })
        .unwrap();
    let fwd = OperatingPoint::evaluate(0.5, 1e7, 1e-9, &p);
    let rev = OperatingPoint::evaluate(0.5, 1e7, -1e-9, &p);
    assert!((fwd.t_act - rev.t_act).abs() < 1e-9);
}

#[test]
fn coulomb_friction_jumps_at_zero_speed() {
    let p = PumpMotorParameters::reference_hecm();
    let dp = 1e7;
    let fwd = OperatingPoint::evaluate(0.5, dp, 1e-12, &p);
    let rev = OperatingPoint::evaluate(0.5, dp, -1e-12, &p);
    let friction = p.scale * (p.displacement * dp * p.losses.cf).abs();
    assert!(((fwd.t_act - rev.t_act) - 2.0 * friction).abs() < 1e-6);
}

fn arb_params() -> impl Strategy<Value = PumpMotorParameters> {
    (0.1_f64..10.0, 0.0_f64..0.05).prop_map(|(scale, cst)| {
        PumpMotorParameters::reference_hecm()
            .with_scale(scale)
            .and_then(|p| {
                p.with_losses(LossCoefficients {
                    cst,
                    ..LossCoefficients::reference_hecm()
                })
            })
            .unwrap()
    })
}

fn arb_speed() -> impl Strategy<Value = f64> {
    (20.0_f64..400.0, any::<bool>()).prop_map(|(w, neg)| if neg { -w } else { w })
}

proptest! {
    #[test]
    fn solved_displacement_reproduces_commanded_flow(
        p in arb_params(),
        q_cmd in -0.02_f64..0.02,
        dp in -3.5e7_f64..3.5e7,
        w in arb_speed(),
    ) {
        let sol = solve_frac_disp(q_cmd, dp, w, &p).unwrap();
        prop_assert!(sol.assumption_held);
        let q_act = reconstructed_flow(sol.frac_disp, dp, w, &p);
        prop_assert!(
            nearly_equal(q_act, q_cmd, Tolerances { abs: 1e-12, rel: 1e-9 }),
            "q_cmd={} q_act={}", q_cmd, q_act
        );
    }

    #[test]
    fn lossless_incompressible_solve_is_geometric(
        q_cmd in -0.02_f64..0.02,
        dp in -3.5e7_f64..3.5e7,
        w in arb_speed(),
        scale in 0.1_f64..10.0,
    ) {
        let fluid = FluidProperties { bulk_modulus: f64::INFINITY, ..FluidProperties::hydraulic_oil() };
        let p = PumpMotorParameters::new(1.7e-5, scale, w, fluid, LossCoefficients::lossless()).unwrap();
        let sol = solve_frac_disp(q_cmd, dp, w, &p).unwrap();
        prop_assert_eq!(sol.frac_disp, q_cmd / (w * p.displacement * p.scale));
    }

    #[test]
    fn positive_branch_only_for_positive_result(
        q_cmd in -0.02_f64..0.02,
        dp in -3.5e7_f64..3.5e7,
        w in arb_speed(),
    ) {
        let p = PumpMotorParameters::reference_hecm();
        let sol = solve_frac_disp(q_cmd, dp, w, &p).unwrap();
        match sol.branch {
            SolveBranch::AssumedPositive => prop_assert!(sol.frac_disp > 0.0),
            SolveBranch::FallbackNegative => prop_assert!(sol.frac_disp <= 0.0),
        }
    }
}
