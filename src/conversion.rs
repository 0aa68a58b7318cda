use thiserror::Error;

use crate::quantity::{QuantityKind, QuantityValue};
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    /// 숫자로 읽을 수 없는 입력
    #[error("not a number: {0}")]
    InvalidNumber(String),
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `EUR`, `mld`, `bn€`, `MWh`, `TWh`, `%` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Money => {
            let from = parse_money_unit(from_unit_str)?;
            let to = parse_money_unit(to_unit_str)?;
            Ok(convert_money(value, from, to))
        }
        QuantityKind::EnergyVolume => {
            let from = parse_energy_volume_unit(from_unit_str)?;
            let to = parse_energy_volume_unit(to_unit_str)?;
            Ok(convert_energy_volume(value, from, to))
        }
        QuantityKind::Fraction => {
            let from = parse_fraction_unit(from_unit_str)?;
            let to = parse_fraction_unit(to_unit_str)?;
            Ok(convert_fraction(value, from, to))
        }
    }
}

/// 단위 문자열이 붙은 값을 기준 단위 값으로 만든다.
pub fn to_base(kind: QuantityKind, value: f64, unit_str: &str) -> Result<QuantityValue, ConversionError> {
    let base_unit = match kind {
        QuantityKind::Money => "eur",
        QuantityKind::EnergyVolume => "mwh",
        QuantityKind::Fraction => "fraction",
    };
    let value_base = convert(kind, value, unit_str, base_unit)?;
    Ok(QuantityValue { kind, value_base })
}

/// `285 TWh`, `40%`, `2.5mld` 처럼 단위가 붙은 입력을 기준 단위 값으로 읽는다.
/// 단위가 없으면 기준 단위로 간주한다.
pub fn parse_with_unit(kind: QuantityKind, input: &str) -> Result<f64, ConversionError> {
    let s = input.trim();
    let mut split = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E' | '_')))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    // `5EUR`: 지수 표기가 아닌 단위 첫 글자
    if split < s.len() && s[..split].ends_with(['e', 'E']) {
        split -= 1;
    }
    let (number, unit) = s.split_at(split);
    let value: f64 = number
        .replace('_', "")
        .parse()
        .map_err(|_| ConversionError::InvalidNumber(input.to_string()))?;
    if unit.trim().is_empty() {
        return Ok(value);
    }
    Ok(to_base(kind, value, unit)?.value_base)
}

pub fn parse_money_unit(s: &str) -> Result<MoneyUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "eur" | "€" | "euro" => Ok(MoneyUnit::Euro),
        "keur" | "k€" | "thousand" => Ok(MoneyUnit::ThousandEuro),
        "meur" | "m€" | "mln" | "million" => Ok(MoneyUnit::MillionEuro),
        "beur" | "bn€" | "bn €" | "bn" | "mld" | "mld €" | "billion" => Ok(MoneyUnit::BillionEuro),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_energy_volume_unit(s: &str) -> Result<EnergyVolumeUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "mwh" => Ok(EnergyVolumeUnit::MegawattHour),
        "gwh" => Ok(EnergyVolumeUnit::GigawattHour),
        "twh" => Ok(EnergyVolumeUnit::TerawattHour),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_fraction_unit(s: &str) -> Result<FractionUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "" | "fraction" | "frac" | "1" => Ok(FractionUnit::Fraction),
        "%" | "pct" | "percent" => Ok(FractionUnit::Percent),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
