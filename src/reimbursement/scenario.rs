//! 입력 수집 계층: 기준 연도 기본값, 파라미터 제약표, 범위 검증.
//!
//! 모델(`price_model::compute`)은 범위를 검사하지 않으므로 CLI/GUI는
//! 계산 전에 여기서 검증하거나 위젯 범위로 값을 제한한다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::price_model::PriceReimbursementInput;
use crate::i18n::keys;

/// 사용자가 편집하는 시나리오. 설정 파일에 마지막 값이 저장된다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub gas_price: f64,
    pub clearing_price: f64,
    pub co2_price: f64,
    pub emission_factor: f64,
    pub traded_energy: f64,
    pub gas_share: f64,
    pub gas_efficiency: f64,
}

impl Default for Scenario {
    /// 2024년 기준값 (GME, Terna, ARERA).
    fn default() -> Self {
        Self {
            gas_price: 36.0,
            clearing_price: 109.0,
            co2_price: 65.0,
            emission_factor: 0.36,
            traded_energy: 285_000_000.0,
            gas_share: 0.40,
            gas_efficiency: 0.56,
        }
    }
}

/// 시나리오 파라미터 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    GasPrice,
    ClearingPrice,
    Co2Price,
    EmissionFactor,
    TradedEnergy,
    GasShare,
    GasEfficiency,
}

/// 파라미터 허용 범위.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    /// true면 `min` 자체는 허용하지 않는다(효율 > 0).
    pub min_exclusive: bool,
    pub max: Option<f64>,
}

impl Bounds {
    const fn at_least(min: f64) -> Self {
        Self {
            min,
            min_exclusive: false,
            max: None,
        }
    }

    const fn unit_interval() -> Self {
        Self {
            min: 0.0,
            min_exclusive: false,
            max: Some(1.0),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        let above = if self.min_exclusive {
            value > self.min
        } else {
            value >= self.min
        };
        above && self.max.map_or(true, |max| value <= max)
    }
}

impl Parameter {
    pub const ALL: [Parameter; 7] = [
        Parameter::GasPrice,
        Parameter::ClearingPrice,
        Parameter::Co2Price,
        Parameter::EmissionFactor,
        Parameter::TradedEnergy,
        Parameter::GasShare,
        Parameter::GasEfficiency,
    ];

    /// 설정 파일/CLI에서 쓰는 키.
    pub fn key(self) -> &'static str {
        match self {
            Parameter::GasPrice => "gas_price",
            Parameter::ClearingPrice => "clearing_price",
            Parameter::Co2Price => "co2_price",
            Parameter::EmissionFactor => "emission_factor",
            Parameter::TradedEnergy => "traded_energy",
            Parameter::GasShare => "gas_share",
            Parameter::GasEfficiency => "gas_efficiency",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Parameter::GasPrice => "€/MWh",
            Parameter::ClearingPrice => "€/MWh",
            Parameter::Co2Price => "€/tCO2",
            Parameter::EmissionFactor => "tCO2/MWh",
            Parameter::TradedEnergy => "MWh",
            Parameter::GasShare | Parameter::GasEfficiency => "0-1",
        }
    }

    pub fn bounds(self) -> Bounds {
        match self {
            Parameter::GasPrice | Parameter::ClearingPrice | Parameter::Co2Price => {
                Bounds::at_least(0.0)
            }
            Parameter::EmissionFactor | Parameter::GasShare => Bounds::unit_interval(),
            Parameter::TradedEnergy => Bounds::at_least(1.0),
            Parameter::GasEfficiency => Bounds {
                min: 0.0,
                min_exclusive: true,
                max: Some(1.0),
            },
        }
    }

    /// 화면 라벨의 i18n 키.
    pub fn label_key(self) -> &'static str {
        match self {
            Parameter::GasPrice => keys::PARAM_GAS_PRICE,
            Parameter::ClearingPrice => keys::PARAM_CLEARING_PRICE,
            Parameter::Co2Price => keys::PARAM_CO2_PRICE,
            Parameter::EmissionFactor => keys::PARAM_EMISSION_FACTOR,
            Parameter::TradedEnergy => keys::PARAM_TRADED_ENERGY,
            Parameter::GasShare => keys::PARAM_GAS_SHARE,
            Parameter::GasEfficiency => keys::PARAM_GAS_EFFICIENCY,
        }
    }

    /// 원래 UI는 비중과 효율을 %로 받는다.
    pub fn is_percent_input(self) -> bool {
        matches!(self, Parameter::GasShare | Parameter::GasEfficiency)
    }
}

/// 범위를 벗어난 파라미터 하나.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeViolation {
    pub parameter: Parameter,
    pub value: f64,
    pub bounds: Bounds,
}

impl std::fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lower = if self.bounds.min_exclusive { ">" } else { ">=" };
        write!(
            f,
            "{} = {} (expected {lower} {}",
            self.parameter.key(),
            self.value,
            self.bounds.min
        )?;
        if let Some(max) = self.bounds.max {
            write!(f, ", <= {max}")?;
        }
        write!(f, ")")
    }
}

/// 검증 실패. 위반 항목을 모두 담는다.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} parameter(s) out of range: {}", .violations.len(), join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<RangeViolation>,
}

fn join_violations(v: &[RangeViolation]) -> String {
    v.iter().map(|x| x.to_string()).collect::<Vec<_>>().join("; ")
}

impl Scenario {
    pub fn get(&self, p: Parameter) -> f64 {
        match p {
            Parameter::GasPrice => self.gas_price,
            Parameter::ClearingPrice => self.clearing_price,
            Parameter::Co2Price => self.co2_price,
            Parameter::EmissionFactor => self.emission_factor,
            Parameter::TradedEnergy => self.traded_energy,
            Parameter::GasShare => self.gas_share,
            Parameter::GasEfficiency => self.gas_efficiency,
        }
    }

    pub fn set(&mut self, p: Parameter, value: f64) {
        let slot = match p {
            Parameter::GasPrice => &mut self.gas_price,
            Parameter::ClearingPrice => &mut self.clearing_price,
            Parameter::Co2Price => &mut self.co2_price,
            Parameter::EmissionFactor => &mut self.emission_factor,
            Parameter::TradedEnergy => &mut self.traded_energy,
            Parameter::GasShare => &mut self.gas_share,
            Parameter::GasEfficiency => &mut self.gas_efficiency,
        };
        *slot = value;
    }

    /// 제약표에 따라 모든 파라미터를 검사한다. NaN은 어떤 범위에도 속하지 않는다.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let violations: Vec<RangeViolation> = Parameter::ALL
            .into_iter()
            .filter_map(|parameter| {
                let value = self.get(parameter);
                let bounds = parameter.bounds();
                (!bounds.contains(value)).then_some(RangeViolation {
                    parameter,
                    value,
                    bounds,
                })
            })
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }

    pub fn to_model_input(&self) -> PriceReimbursementInput {
        PriceReimbursementInput {
            gas_price: self.gas_price,
            clearing_price: self.clearing_price,
            co2_price: self.co2_price,
            emission_factor: self.emission_factor,
            traded_energy: self.traded_energy,
            gas_share: self.gas_share,
            gas_efficiency: self.gas_efficiency,
        }
    }
}

pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

pub fn fraction_to_percent(fraction: f64) -> f64 {
    fraction * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Scenario::default().validate().is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let mut s = Scenario::default();
        s.gas_price = -1.0;
        s.gas_share = 1.2;
        s.gas_efficiency = 0.0;
        s.traded_energy = 0.5;
        let err = s.validate().unwrap_err();
        let params: Vec<_> = err.violations.iter().map(|v| v.parameter).collect();
        assert_eq!(
            params,
            vec![
                Parameter::GasPrice,
                Parameter::TradedEnergy,
                Parameter::GasShare,
                Parameter::GasEfficiency
            ]
        );
        assert!(err.to_string().starts_with("4 parameter(s) out of range"));
    }

    #[test]
    fn efficiency_lower_bound_is_exclusive() {
        let b = Parameter::GasEfficiency.bounds();
        assert!(!b.contains(0.0));
        assert!(b.contains(1e-9));
        assert!(b.contains(1.0));
        assert!(!b.contains(f64::NAN));
    }

    #[test]
    fn keys_match_config_fields() {
        let text = toml::to_string(&Scenario::default()).unwrap();
        let table: toml::Table = toml::from_str(&text).unwrap();
        assert_eq!(table.len(), Parameter::ALL.len());
        for p in Parameter::ALL {
            assert!(table.contains_key(p.key()), "{}", p.key());
        }
    }

    #[test]
    fn set_then_get() {
        let mut s = Scenario::default();
        s.set(Parameter::Co2Price, 80.0);
        assert_eq!(s.get(Parameter::Co2Price), 80.0);
        assert_eq!(s.to_model_input().co2_price, 80.0);
    }

    #[test]
    fn percent_helpers() {
        assert!((percent_to_fraction(56.0) - 0.56).abs() < 1e-12);
        assert!((fraction_to_percent(0.4) - 40.0).abs() < 1e-12);
    }
}
