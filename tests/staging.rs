use rocket_staging::vehicle::{compute_pop_out, compute_three_stage};
use rocket_staging::{InputMode, PhysicalConstants, StageResult};

const KG_TO_LBS: f64 = 2.20462;
const M_TO_IN: f64 = 39.3700787402;
const G: f64 = 9.80665;

fn relative_close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

fn sum_matches_total(r: &StageResult) {
    let sum: f64 = r.stage_delta_vs.iter().sum();
    assert!(
        relative_close(sum, r.delta_v, 1e-9),
        "sum {sum} != total {}",
        r.delta_v
    );
}

#[test]
fn total_delta_v_is_sum_of_stage_delta_vs() {
    let c = PhysicalConstants::default();
    let inputs = [
        ([5000.0, 3000.0, 1000.0], InputMode::Mass),
        ([12_000.0, 800.0, 400.0], InputMode::Mass),
        ([5.0, 3.0, 2.0], InputMode::Length),
        ([1.2, 4.5, 0.9], InputMode::Length),
    ];
    for (stages, mode) in inputs {
        let three = compute_three_stage(&c, stages, mode).unwrap();
        assert!(three.is_feasible(), "{stages:?} {mode:?}");
        sum_matches_total(&three);

        let pop = compute_pop_out(&c, stages[0], stages[1], stages[2], mode).unwrap();
        assert!(pop.is_feasible(), "{stages:?} {mode:?}");
        sum_matches_total(&pop);
    }
}

#[test]
fn absent_and_unknown_mode_flags_agree() {
    let c = PhysicalConstants::default();
    let stages = [5.0, 3.0, 2.0];
    let absent = compute_three_stage(&c, stages, InputMode::from_flag(None)).unwrap();
    let other = compute_three_stage(&c, stages, InputMode::from_flag(Some("length"))).unwrap();
    let junk = compute_three_stage(&c, stages, InputMode::from_flag(Some("kg"))).unwrap();
    assert_eq!(absent, other);
    assert_eq!(absent, junk);
}

#[test]
fn own_mass_fraction_rises_with_own_mass() {
    let c = PhysicalConstants::default();
    let base = [5000.0, 3000.0, 1000.0];
    let steps = [500.0, 1000.0, 2000.0, 4000.0, 8000.0];
    for stage in 0..3 {
        let fractions: Vec<f64> = steps
            .iter()
            .map(|m| {
                let mut stages = base;
                stages[stage] = *m;
                compute_three_stage(&c, stages, InputMode::Mass).unwrap().mass_fractions[stage]
            })
            .collect();
        for pair in fractions.windows(2) {
            assert!(
                pair[1] > pair[0],
                "stage {} fractions not increasing: {fractions:?}",
                stage + 1
            );
        }
    }
}

#[test]
fn heavier_upper_stage_lowers_first_stage_fraction() {
    let c = PhysicalConstants::default();
    let light = compute_three_stage(&c, [5000.0, 1000.0, 1000.0], InputMode::Mass).unwrap();
    let heavy = compute_three_stage(&c, [5000.0, 8000.0, 1000.0], InputMode::Mass).unwrap();
    assert!(heavy.mass_fractions[0] < light.mass_fractions[0]);
}

#[test]
fn worked_example_matches_spreadsheet() {
    let c = PhysicalConstants::default();
    let r = compute_three_stage(&c, [5000.0, 3000.0, 1000.0], InputMode::Mass).unwrap();

    let payload = 250.0 * KG_TO_LBS;
    let w: Vec<f64> = [5000.0, 3000.0, 1000.0]
        .iter()
        .map(|m| m * KG_TO_LBS + payload)
        .collect();
    let f: Vec<f64> = w.iter().map(|x| x * 0.22 + payload).collect();
    let mf = [
        (w[0] + w[1] + w[2]) / (w[1] + w[2] + f[0]),
        (w[1] + w[2]) / (w[2] + f[1]),
        w[2] / f[2],
    ];
    let v_eq = G * 250.0;
    let dv = [
        mf[0].ln() * v_eq - G * 10.0,
        mf[1].ln() * v_eq,
        mf[2].ln() * v_eq,
    ];

    for i in 0..3 {
        assert!((r.mass_fractions[i] - mf[i]).abs() < 1e-6);
        assert!((r.stage_delta_vs[i] - dv[i]).abs() < 1e-6);
    }
    assert!((r.delta_v - (dv[0] + dv[1] + dv[2])).abs() < 1e-6);
}

#[test]
fn length_mode_uses_one_metre_diameter() {
    let c = PhysicalConstants::default();
    let r = compute_three_stage(&c, [5.0, 3.0, 2.0], InputMode::Length).unwrap();
    let payload = 250.0 * KG_TO_LBS;
    let w3 = 0.04 * (2.0 * M_TO_IN) * M_TO_IN * M_TO_IN + payload;
    assert!((r.mass_fractions[2] - w3 / (w3 * 0.22 + payload)).abs() < 1e-9);
}

#[test]
fn pop_out_and_three_stage_diverge() {
    let c = PhysicalConstants::default();
    for mode in [InputMode::Mass, InputMode::Length] {
        let stages = match mode {
            InputMode::Mass => [5000.0, 3000.0, 1000.0],
            InputMode::Length => [5.0, 3.0, 2.0],
        };
        let three = compute_three_stage(&c, stages, mode).unwrap();
        let pop = compute_pop_out(&c, stages[0], stages[1], stages[2], mode).unwrap();
        assert_ne!(three.mass_fractions, pop.mass_fractions);
    }
}

#[test]
fn custom_constants_flow_through() {
    let base = PhysicalConstants::default();
    let hot = PhysicalConstants::new(300.0, 250.0);
    let a = compute_three_stage(&base, [5.0, 3.0, 2.0], InputMode::Length).unwrap();
    let b = compute_three_stage(&hot, [5.0, 3.0, 2.0], InputMode::Length).unwrap();
    assert_eq!(a.mass_fractions, b.mass_fractions);
    assert!(b.delta_v > a.delta_v);
}
