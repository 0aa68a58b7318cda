//! CO2(ETS) 비용 환급이 전력 도매가격(PUN)에 미치는 영향을 계산하는 폐형식 모델.
//!
//! 입력 7개로부터 가격 분해, 환급 비용, 사회화 단가(Psoc), 등가 가격, 시스템 순편익,
//! 레버리지를 한 번에 계산한다. 상태나 입출력이 없으며 같은 입력이면 항상 같은 결과를 낸다.
//! 금액은 모두 기본 단위(€, €/MWh)로 반환하며 표시 단위 환산은 `report`에서 처리한다.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// 환급 시뮬레이션 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceReimbursementInput {
    /// 연평균 가스 가격 [€/MWh 열량]
    pub gas_price: f64,
    /// 연평균 도매 전력 가격(PUN) [€/MWh 전력]
    pub clearing_price: f64,
    /// ETS 배출권 가격 [€/tCO2]
    pub co2_price: f64,
    /// 기준 가스 발전소 배출계수 [tCO2/MWh 전력]
    pub emission_factor: f64,
    /// 거래소 연간 거래 전력량 [MWh/년]
    pub traded_energy: f64,
    /// 거래 전력량 중 가스 발전 비중(0~1)
    pub gas_share: f64,
    /// 가스 발전소 평균 효율(0~1, 0 초과)
    pub gas_efficiency: f64,
}

/// 환급 시뮬레이션 결과. 모든 값은 입력에서 파생된다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceReimbursementResult {
    /// 연료비가 PUN에 기여하는 몫 [€/MWh]
    pub gas_incidence: f64,
    /// 탄소비가 PUN에 기여하는 몫 [€/MWh]
    pub co2_incidence: f64,
    /// 잔여 마진/스프레드 [€/MWh]. 입력이 비현실적이면 음수가 될 수 있다.
    pub other_costs: f64,
    /// 탄소비를 제외한 가격 [€/MWh]
    pub price_net_of_co2: f64,
    /// 가스 발전 전력량 [MWh/년]
    pub gas_energy: f64,
    /// 연간 환급 비용 [€/년]
    pub reimbursement_cost: f64,
    /// 환급 비용을 전체 거래량에 분담한 단가 [€/MWh]
    pub psoc: f64,
    /// 환급 재원을 균일 부과금으로 충당했을 때의 등가 가격 [€/MWh]
    pub equivalent_price: f64,
    /// 시장 전체 순편익 [€/년]. 양수면 소비자 절감.
    pub net_benefit: f64,
    /// 순편익 / 환급 비용.
    ///
    /// 환급 비용이 정확히 0이면 `f64::INFINITY`로 정의한다.
    pub leverage: f64,
}

impl PriceReimbursementResult {
    /// 레버리지가 유한한 값인지 확인한다(환급 비용 0이면 false).
    pub fn has_finite_leverage(&self) -> bool {
        self.leverage.is_finite()
    }
}

/// 모델 계산이 정의되지 않는 입력.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// 효율 0: 1/효율이 정의되지 않는다.
    #[error("gas efficiency must be non-zero")]
    ZeroEfficiency,
    /// 거래량 0: Psoc가 정의되지 않는다.
    #[error("traded energy must be non-zero")]
    ZeroTradedEnergy,
    /// NaN/무한대 입력
    #[error("parameter `{parameter}` is not finite ({value})")]
    NonFinite { parameter: &'static str, value: f64 },
}

fn ensure_finite(input: &PriceReimbursementInput) -> Result<(), ModelError> {
    let fields = [
        ("gas_price", input.gas_price),
        ("clearing_price", input.clearing_price),
        ("co2_price", input.co2_price),
        ("emission_factor", input.emission_factor),
        ("traded_energy", input.traded_energy),
        ("gas_share", input.gas_share),
        ("gas_efficiency", input.gas_efficiency),
    ];
    match fields.iter().find(|(_, v)| !v.is_finite()) {
        Some(&(parameter, value)) => Err(ModelError::NonFinite { parameter, value }),
        None => Ok(()),
    }
}

/// 환급 효과를 계산한다.
///
/// 범위 제약(음수 가격, 비중 > 1 등)은 검사하지 않고 그대로 계산한다.
/// 0으로 나누는 두 경우(효율, 거래량)만 오류로 돌려준다.
pub fn compute(input: PriceReimbursementInput) -> Result<PriceReimbursementResult, ModelError> {
    ensure_finite(&input)?;
    if input.gas_efficiency == 0.0 {
        return Err(ModelError::ZeroEfficiency);
    }
    if input.traded_energy == 0.0 {
        return Err(ModelError::ZeroTradedEnergy);
    }

    let gas_per_electric_unit = 1.0 / input.gas_efficiency;
    let gas_incidence = input.gas_price * gas_per_electric_unit;
    let co2_incidence = input.co2_price * input.emission_factor;
    let other_costs = input.clearing_price - (gas_incidence + co2_incidence);
    let price_net_of_co2 = gas_incidence + other_costs;

    let gas_energy = input.gas_share * input.traded_energy;
    let reimbursement_cost = input.co2_price * input.emission_factor * gas_energy;
    let psoc = reimbursement_cost / input.traded_energy;
    let equivalent_price = price_net_of_co2 + psoc;
    let net_benefit = (input.clearing_price - equivalent_price) * input.traded_energy;
    let leverage = if reimbursement_cost != 0.0 {
        net_benefit / reimbursement_cost
    } else {
        f64::INFINITY
    };

    let result = PriceReimbursementResult {
        gas_incidence,
        co2_incidence,
        other_costs,
        price_net_of_co2,
        gas_energy,
        reimbursement_cost,
        psoc,
        equivalent_price,
        net_benefit,
        leverage,
    };
    debug!(?input, ?result, "price reimbursement computed");
    Ok(result)
}

/// 위치 인자 형태의 `compute`.
#[allow(clippy::too_many_arguments)]
pub fn compute_positional(
    gas_price: f64,
    clearing_price: f64,
    co2_price: f64,
    emission_factor: f64,
    traded_energy: f64,
    gas_share: f64,
    gas_efficiency: f64,
) -> Result<PriceReimbursementResult, ModelError> {
    compute(PriceReimbursementInput {
        gas_price,
        clearing_price,
        co2_price,
        emission_factor,
        traded_energy,
        gas_share,
        gas_efficiency,
    })
}

/// 상태 없는 모델 핸들. CLI/GUI/배치 어디서든 동일하게 호출한다.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceReimbursementModel;

impl PriceReimbursementModel {
    pub fn compute(
        &self,
        input: PriceReimbursementInput,
    ) -> Result<PriceReimbursementResult, ModelError> {
        compute(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> PriceReimbursementInput {
        PriceReimbursementInput {
            gas_price: 36.0,
            clearing_price: 109.0,
            co2_price: 65.0,
            emission_factor: 0.36,
            traded_energy: 285_000_000.0,
            gas_share: 0.40,
            gas_efficiency: 0.56,
        }
    }

    #[test]
    fn zero_efficiency_is_rejected() {
        let mut input = reference();
        input.gas_efficiency = 0.0;
        assert_eq!(compute(input), Err(ModelError::ZeroEfficiency));
    }

    #[test]
    fn zero_traded_energy_is_rejected() {
        let mut input = reference();
        input.traded_energy = 0.0;
        assert_eq!(compute(input), Err(ModelError::ZeroTradedEnergy));
    }

    #[test]
    fn nan_input_reports_parameter() {
        let mut input = reference();
        input.co2_price = f64::NAN;
        match compute(input) {
            Err(ModelError::NonFinite { parameter, .. }) => assert_eq!(parameter, "co2_price"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn negative_inputs_still_compute() {
        let mut input = reference();
        input.gas_price = -10.0;
        input.gas_share = 1.5;
        let res = compute(input).expect("finite inputs always compute");
        assert!(res.gas_incidence < 0.0);
        assert!((res.gas_energy - 1.5 * 285_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn model_handle_matches_free_function() {
        let model = PriceReimbursementModel;
        assert_eq!(model.compute(reference()), compute(reference()));
    }
}
