use approx::{assert_abs_diff_eq, assert_relative_eq};
use livestock_returns::returns::{solve_livestock_irr, CashFlowSchedule, Termination};
use livestock_returns::sensitivity::{evaluate_matrix, DEFAULT_VARIATIONS};
use livestock_returns::{
    calculate_livestock_irr, convert_monthly_to_annual_rate, FatteningInputs, MatrixMetric,
};

#[test]
fn zero_duration_short_circuits_for_any_inputs() {
    for &(w, p, c, s) in &[(200.0, 14.5, 135.0, 4000.0), (0.0, 0.0, 0.0, 0.0), (-5.0, 3.0, 1e6, -2.0)] {
        assert_eq!(calculate_livestock_irr(w, p, c, s, 0.0), 0.0);
    }
}

#[test]
fn solver_output_is_a_root_of_the_schedule() {
    let cases = [
        (200.0, 14.50, 135.0, 4000.0, 8.2),
        (200.0, 14.50, 135.0, 4800.0, 8.2),
        (300.0, 13.20, 290.0, 5900.0, 5.0),
        (180.0, 12.90, 120.0, 3500.0, 11.75),
    ];
    for &(w, p, c, s, n) in &cases {
        let solution = solve_livestock_irr(w, p, c, s, n);
        assert_eq!(solution.termination, Termination::Converged);

        let schedule = CashFlowSchedule::new(w, p, c, s, n);
        assert_abs_diff_eq!(schedule.npv(solution.rate_pct / 100.0), 0.0, epsilon = 1e-4);
    }
}

#[test]
fn default_calculator_scenario() {
    let inputs = FatteningInputs::default();
    assert!((inputs.permanence_months() - 8.2).abs() < 0.01);

    let outcome = inputs.evaluate();
    assert!(outcome.irr_converged);
    assert!(outcome.monthly_irr_pct > -10.0 && outcome.monthly_irr_pct < 10.0);
}

#[test]
fn output_is_continuous_across_whole_months() {
    let irr = |n: f64| calculate_livestock_irr(200.0, 14.50, 135.0, 4000.0, n);
    for whole in [3.0, 7.0, 12.0] {
        let below = irr(whole - 1e-6);
        let at = irr(whole);
        let above = irr(whole + 1e-6);
        assert_abs_diff_eq!(below, at, epsilon = 1e-4);
        assert_abs_diff_eq!(above, at, epsilon = 1e-4);
    }
}

#[test]
fn repeated_calls_are_identical() {
    let a = calculate_livestock_irr(250.0, 13.0, 150.0, 4600.0, 9.7);
    let b = calculate_livestock_irr(250.0, 13.0, 150.0, 4600.0, 9.7);
    assert_eq!(a.to_bits(), b.to_bits());

    let first = evaluate_matrix(&FatteningInputs::default(), &DEFAULT_VARIATIONS, &DEFAULT_VARIATIONS, MatrixMetric::MonthlyIrr);
    let second = evaluate_matrix(&FatteningInputs::default(), &DEFAULT_VARIATIONS, &DEFAULT_VARIATIONS, MatrixMetric::MonthlyIrr);
    assert_eq!(first, second);
}

#[test]
fn annualizer_properties() {
    assert_eq!(convert_monthly_to_annual_rate(0.0), 0.0);

    let mut previous = convert_monthly_to_annual_rate(-60.0);
    let mut x = -50.0;
    while x < 30.0 {
        let current = convert_monthly_to_annual_rate(x);
        assert!(current > previous, "not increasing at {}", x);
        assert_relative_eq!(current, ((1.0_f64 + x / 100.0).powi(12) - 1.0) * 100.0, max_relative = 1e-9);
        previous = current;
        x += 0.37;
    }
}

#[test]
fn annual_matrix_is_annualized_monthly_matrix() {
    let inputs = FatteningInputs::default();
    let monthly = evaluate_matrix(&inputs, &DEFAULT_VARIATIONS, &DEFAULT_VARIATIONS, MatrixMetric::MonthlyIrr);
    let annual = evaluate_matrix(&inputs, &DEFAULT_VARIATIONS, &DEFAULT_VARIATIONS, MatrixMetric::AnnualIrr);

    for (m_row, a_row) in monthly.cells.iter().zip(&annual.cells) {
        for (m, a) in m_row.iter().zip(a_row) {
            assert_eq!(*a, convert_monthly_to_annual_rate(*m));
        }
    }
    assert!(annual.min <= annual.max);
}
