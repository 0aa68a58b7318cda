use co2_reimbursement_toolbox::reimbursement::{
    compute, compute_positional, percent_saving, ModelError, PriceReimbursementInput,
    PriceReimbursementModel, Scenario,
};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(1.0)
}

fn reference() -> PriceReimbursementInput {
    Scenario::default().to_model_input()
}

#[test]
fn reference_year_2024() {
    let r = compute(reference()).expect("reference scenario");
    assert!(close(r.gas_incidence, 64.285_714_285_714, 1e-12));
    assert!(close(r.co2_incidence, 23.4, 1e-12));
    assert!(close(r.other_costs, 21.314_285_714_286, 1e-12));
    assert!(close(r.price_net_of_co2, 85.6, 1e-12));
    assert!(close(r.gas_energy, 114.0e6, 1e-12));
    assert!(close(r.reimbursement_cost, 2.6676e9, 1e-12));
    assert!(close(r.psoc, 9.36, 1e-12));
    assert!(close(r.equivalent_price, 94.96, 1e-12));
    assert!(close(r.net_benefit, 4.0014e9, 1e-9), "net_benefit={}", r.net_benefit);
    assert!(close(r.leverage, 1.5, 1e-9), "leverage={}", r.leverage);
    assert!(close(
        percent_saving(109.0, r.equivalent_price),
        12.880_733_944_954,
        1e-9
    ));
}

#[test]
fn higher_co2_price_raises_reference_costs() {
    let base = compute(reference()).expect("reference");
    let mut input = reference();
    input.co2_price = 66.0;
    let r = compute(input).expect("co2 +1");
    assert!(close(r.co2_incidence, 23.76, 1e-12));
    assert!(close(r.reimbursement_cost, 2.70864e9, 1e-12));
    assert!(close(r.psoc, 9.504, 1e-12));
    assert!(r.co2_incidence > base.co2_incidence);
    assert!(r.reimbursement_cost > base.reimbursement_cost);
    assert!(r.psoc > base.psoc);
    assert!(close(r.leverage, base.leverage, 1e-12));
}

#[test]
fn zero_carbon_price_leaves_price_unchanged() {
    let mut input = reference();
    input.co2_price = 0.0;
    let r = compute(input).expect("zero carbon");
    assert_eq!(r.co2_incidence, 0.0);
    assert_eq!(r.reimbursement_cost, 0.0);
    assert_eq!(r.psoc, 0.0);
    assert_eq!(r.equivalent_price, r.price_net_of_co2);
    assert!(close(r.equivalent_price, input.clearing_price, 1e-12));
    assert!(r.net_benefit.abs() < 1e-3);
    assert_eq!(r.leverage, f64::INFINITY);
    assert!(!r.has_finite_leverage());
}

#[test]
fn full_gas_share_has_no_benefit() {
    let mut input = reference();
    input.gas_share = 1.0;
    let r = compute(input).expect("full gas");
    assert_eq!(r.gas_energy, input.traded_energy);
    assert!(close(r.psoc, r.co2_incidence, 1e-12));
    assert!(close(r.equivalent_price, input.clearing_price, 1e-12));
    assert!(r.net_benefit.abs() < 1.0, "net_benefit={}", r.net_benefit);
    assert!(r.leverage.abs() < 1e-9);
}

#[test]
fn zero_share_means_infinite_leverage() {
    let mut input = reference();
    input.gas_share = 0.0;
    let r = compute(input).expect("no gas");
    assert_eq!(r.reimbursement_cost, 0.0);
    assert!(close(r.net_benefit, r.co2_incidence * input.traded_energy, 1e-12));
    assert_eq!(r.leverage, f64::INFINITY);
}

#[test]
fn unrealistic_inputs_still_compute() {
    let mut input = reference();
    input.clearing_price = 50.0;
    let r = compute(input).expect("low PUN");
    assert!(r.other_costs < 0.0);

    input.gas_share = 1.4;
    let r = compute(input).expect("share above one");
    assert!(r.net_benefit < 0.0);
    assert!(r.leverage < 0.0);
}

#[test]
fn undefined_inputs_are_rejected() {
    let mut input = reference();
    input.gas_efficiency = 0.0;
    assert_eq!(compute(input), Err(ModelError::ZeroEfficiency));

    let mut input = reference();
    input.traded_energy = 0.0;
    assert_eq!(compute(input), Err(ModelError::ZeroTradedEnergy));

    let mut input = reference();
    input.co2_price = f64::NAN;
    assert!(matches!(
        compute(input),
        Err(ModelError::NonFinite {
            parameter: "co2_price",
            ..
        })
    ));
}

#[test]
fn entry_points_agree() {
    let input = reference();
    let a = compute(input).expect("struct form");
    let b = compute_positional(36.0, 109.0, 65.0, 0.36, 285e6, 0.40, 0.56).expect("positional");
    let c = PriceReimbursementModel.compute(input).expect("handle");
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(a, compute(input).expect("repeat"));
}
