use serde::{Deserialize, Serialize};

/// 비율 표기. 내부 기준은 0~1 소수이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FractionUnit {
    Fraction,
    Percent,
}

/// 비율을 변환한다.
pub fn convert_fraction(value: f64, from: FractionUnit, to: FractionUnit) -> f64 {
    let base = match from {
        FractionUnit::Fraction => value,
        FractionUnit::Percent => value / 100.0,
    };
    match to {
        FractionUnit::Fraction => base,
        FractionUnit::Percent => base * 100.0,
    }
}
