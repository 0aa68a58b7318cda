//! 가격 모델의 항등식/단조성 성질 테스트.

use co2_reimbursement_toolbox::reimbursement::{
    compute, PriceReimbursementInput, PriceReimbursementResult,
};
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = PriceReimbursementInput> {
    (
        0.0f64..300.0,
        0.0f64..500.0,
        0.0f64..200.0,
        0.0f64..1.0,
        1.0f64..1.0e9,
        0.01f64..1.0,
        0.05f64..1.0,
    )
        .prop_map(
            |(gas_price, clearing_price, co2_price, ef, traded_energy, gas_share, gas_efficiency)| {
                PriceReimbursementInput {
                    gas_price,
                    clearing_price,
                    co2_price,
                    emission_factor: ef,
                    traded_energy,
                    gas_share,
                    gas_efficiency,
                }
            },
        )
}

fn rel_close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

/// 가격 항의 크기. 상쇄 오차의 허용 기준으로 쓴다.
fn price_scale(input: &PriceReimbursementInput, r: &PriceReimbursementResult) -> f64 {
    input.clearing_price + r.gas_incidence + r.co2_incidence + 1.0
}

proptest! {
    /// 가스 + 탄소 + 기타 = PUN
    #[test]
    fn decomposition_sums_to_clearing_price(input in input_strategy()) {
        let r = compute(input).unwrap();
        let tol = 1e-12 * price_scale(&input, &r);
        let total = r.gas_incidence + r.co2_incidence + r.other_costs;
        prop_assert!((total - input.clearing_price).abs() <= tol, "total={total}");
        prop_assert!((r.price_net_of_co2 + r.co2_incidence - input.clearing_price).abs() <= tol);
    }

    /// 순편익 + 환급 비용 = 탄소 몫 × 거래량
    #[test]
    fn benefit_plus_cost_is_carbon_bill(input in input_strategy()) {
        let r = compute(input).unwrap();
        let tol = 1e-12 * price_scale(&input, &r) * input.traded_energy;
        let bill = r.co2_incidence * input.traded_energy;
        prop_assert!((r.net_benefit + r.reimbursement_cost - bill).abs() <= tol);
        prop_assert!(rel_close(r.psoc * input.traded_energy, r.reimbursement_cost, 1e-12));
    }

    /// 환급 비용이 0이 아니면 레버리지 = (1 - 비중) / 비중
    #[test]
    fn leverage_depends_only_on_share(input in input_strategy()) {
        let r = compute(input).unwrap();
        if r.reimbursement_cost == 0.0 {
            prop_assert_eq!(r.leverage, f64::INFINITY);
        } else if r.co2_incidence > 1e-6 * price_scale(&input, &r) {
            let expected = (1.0 - input.gas_share) / input.gas_share;
            prop_assert!(rel_close(r.leverage, expected, 1e-6), "leverage={} expected={expected}", r.leverage);
        }
    }

    /// 비중 <= 1이면 CO2 가격이 오를수록 순편익은 줄지 않고 등가 가격은 오르지 않는다.
    #[test]
    fn net_benefit_monotone_in_co2_price(input in input_strategy(), bump in 0.0f64..100.0) {
        let low = compute(input).unwrap();
        let mut higher = input;
        higher.co2_price += bump;
        let high = compute(higher).unwrap();
        let tol = 1e-12 * price_scale(&higher, &high);
        prop_assert!(high.equivalent_price <= low.equivalent_price + tol);
        prop_assert!(high.net_benefit >= low.net_benefit - tol * input.traded_energy);
    }

    /// 0 < 비중 < 1, 배출계수 > 0이면 CO2 가격 인상은 탄소 몫, 환급 비용, Psoc를 모두 올린다.
    #[test]
    fn co2_price_strictly_raises_costs(
        input in input_strategy(),
        gas_share in 0.01f64..0.99,
        ef in 0.01f64..1.0,
        bump in 0.01f64..100.0,
    ) {
        let mut base = input;
        base.gas_share = gas_share;
        base.emission_factor = ef;
        let mut higher = base;
        higher.co2_price += bump;
        let low = compute(base).unwrap();
        let high = compute(higher).unwrap();
        prop_assert!(high.co2_incidence > low.co2_incidence);
        prop_assert!(high.reimbursement_cost > low.reimbursement_cost);
        prop_assert!(high.psoc > low.psoc);
    }

    /// 순편익은 가격 차 × 거래량, 레버리지는 순편익 / 환급 비용
    #[test]
    fn benefit_and_leverage_definitions(input in input_strategy()) {
        let r = compute(input).unwrap();
        prop_assert_eq!(
            r.net_benefit,
            (input.clearing_price - r.equivalent_price) * input.traded_energy
        );
        if r.reimbursement_cost != 0.0 {
            prop_assert_eq!(r.leverage, r.net_benefit / r.reimbursement_cost);
        }
    }

    /// 같은 입력이면 같은 결과
    #[test]
    fn deterministic(input in input_strategy()) {
        prop_assert_eq!(compute(input).unwrap(), compute(input).unwrap());
    }
}
