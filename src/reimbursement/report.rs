//! 결과 표시 계층: 라벨이 붙은 결과 행, 금액 표시 단위 환산, 절감률, 타당성 경고, TOML 내보내기.

use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use super::price_model::PriceReimbursementResult;
use super::scenario::Scenario;
use crate::i18n::{keys, Translator};
use crate::units::{convert_money, MoneyUnit};

/// 보고서 저장 오류.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 결과 행의 값 단위.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineUnit {
    EuroPerMwh,
    Money(MoneyUnit),
    Ratio,
}

impl LineUnit {
    fn suffix(self) -> &'static str {
        match self {
            LineUnit::EuroPerMwh => "€/MWh",
            LineUnit::Money(unit) => unit.symbol(),
            LineUnit::Ratio => "",
        }
    }
}

/// 결과 표의 한 행. 라벨은 i18n 키로 보관한다.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub label_key: &'static str,
    pub value: f64,
    pub unit: LineUnit,
}

/// 타당성 경고. 오류가 아니라 비현실적 시나리오를 알리는 신호다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    NegativeOtherCosts,
    NegativeNetBenefit,
    UnboundedLeverage,
}

impl Warning {
    pub fn message_key(self) -> &'static str {
        match self {
            Warning::NegativeOtherCosts => keys::WARN_NEGATIVE_OTHER_COSTS,
            Warning::NegativeNetBenefit => keys::WARN_NEGATIVE_BENEFIT,
            Warning::UnboundedLeverage => keys::WARN_UNBOUNDED_LEVERAGE,
        }
    }
}

/// PUN 대비 등가 가격의 절감률(%). PUN이 0 이하면 0.
pub fn percent_saving(clearing_price: f64, equivalent_price: f64) -> f64 {
    if clearing_price > 0.0 {
        100.0 * (clearing_price - equivalent_price) / clearing_price
    } else {
        0.0
    }
}

/// 레버리지 표기. 무한대는 `∞`.
pub fn format_leverage(leverage: f64, decimals: usize) -> String {
    if leverage == f64::INFINITY {
        "∞".to_string()
    } else if leverage == f64::NEG_INFINITY {
        "-∞".to_string()
    } else {
        format!("{leverage:.decimals$}")
    }
}

/// 화면/CLI 표시용 보고서.
#[derive(Debug, Clone)]
pub struct Report {
    pub scenario: Scenario,
    pub result: PriceReimbursementResult,
    pub money_unit: MoneyUnit,
    pub lines: Vec<ReportLine>,
    pub percent_saving: f64,
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn build(
        scenario: &Scenario,
        result: &PriceReimbursementResult,
        money_unit: MoneyUnit,
    ) -> Self {
        let money = |v: f64| convert_money(v, MoneyUnit::Euro, money_unit);
        let line = |label_key, value, unit| ReportLine {
            label_key,
            value,
            unit,
        };
        let lines = vec![
            line(keys::RESULT_GAS_INCIDENCE, result.gas_incidence, LineUnit::EuroPerMwh),
            line(keys::RESULT_CO2_INCIDENCE, result.co2_incidence, LineUnit::EuroPerMwh),
            line(keys::RESULT_OTHER_COSTS, result.other_costs, LineUnit::EuroPerMwh),
            line(keys::RESULT_PRICE_NET_CO2, result.price_net_of_co2, LineUnit::EuroPerMwh),
            line(
                keys::RESULT_REIMBURSEMENT_COST,
                money(result.reimbursement_cost),
                LineUnit::Money(money_unit),
            ),
            line(keys::RESULT_PSOC, result.psoc, LineUnit::EuroPerMwh),
            line(keys::RESULT_EQUIVALENT_PRICE, result.equivalent_price, LineUnit::EuroPerMwh),
            line(
                keys::RESULT_NET_BENEFIT,
                money(result.net_benefit),
                LineUnit::Money(money_unit),
            ),
            line(keys::RESULT_LEVERAGE, result.leverage, LineUnit::Ratio),
        ];

        let mut warnings = Vec::new();
        if result.other_costs < 0.0 {
            warnings.push(Warning::NegativeOtherCosts);
        }
        if result.net_benefit < 0.0 {
            warnings.push(Warning::NegativeNetBenefit);
        }
        if !result.leverage.is_finite() {
            warnings.push(Warning::UnboundedLeverage);
        }

        Self {
            scenario: *scenario,
            result: *result,
            money_unit,
            lines,
            percent_saving: percent_saving(scenario.clearing_price, result.equivalent_price),
            warnings,
        }
    }

    /// 한 행의 값을 문자열로 만든다.
    pub fn format_line(line: &ReportLine, decimals: usize) -> String {
        let value = match line.unit {
            LineUnit::Ratio => format_leverage(line.value, decimals),
            _ => format!("{:.decimals$}", line.value),
        };
        let suffix = line.unit.suffix();
        if suffix.is_empty() {
            value
        } else {
            format!("{value} {suffix}")
        }
    }

    /// 번역된 텍스트 보고서를 만든다.
    pub fn render_text(&self, tr: &Translator, decimals: usize) -> String {
        let mut out = String::new();
        out.push_str(&tr.t(keys::RESULT_HEADING));
        out.push('\n');
        let labels: Vec<String> = self.lines.iter().map(|l| tr.t(l.label_key)).collect();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        for (line, label) in self.lines.iter().zip(labels) {
            let pad = width - label.chars().count();
            out.push_str(&format!(
                "  {label}{}  {}\n",
                " ".repeat(pad),
                Self::format_line(line, decimals)
            ));
        }
        out.push_str(&format!(
            "{} {:.2}%\n",
            tr.t(keys::RESULT_PERCENT_SAVING),
            self.percent_saving
        ));
        for w in &self.warnings {
            out.push_str(&format!("! {}\n", tr.t(w.message_key())));
        }
        out.push_str(&tr.t(keys::NOTE_LEVERAGE));
        out.push('\n');
        out.push_str(&tr.t(keys::NOTE_INDICATIVE));
        out.push('\n');
        out
    }

    pub fn record(&self) -> ReportRecord {
        ReportRecord {
            percent_saving: self.percent_saving,
            scenario: self.scenario,
            result: self.result,
        }
    }

    pub fn to_toml(&self) -> Result<String, ReportError> {
        Ok(toml::to_string_pretty(&self.record())?)
    }

    /// 보고서를 TOML 파일로 저장한다.
    pub fn export_toml(&self, path: &Path) -> Result<(), ReportError> {
        fs::write(path, self.to_toml()?)?;
        info!(path = %path.display(), "report exported");
        Ok(())
    }
}

/// 내보내기용 레코드. 금액은 기본 단위(€)로 저장한다.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    pub percent_saving: f64,
    pub scenario: Scenario,
    pub result: PriceReimbursementResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reimbursement::price_model::compute;

    fn reference_report(unit: MoneyUnit) -> Report {
        let s = Scenario::default();
        let r = compute(s.to_model_input()).unwrap();
        Report::build(&s, &r, unit)
    }

    #[test]
    fn percent_saving_guarded() {
        assert_eq!(percent_saving(0.0, 50.0), 0.0);
        assert_eq!(percent_saving(-3.0, 50.0), 0.0);
        assert!((percent_saving(100.0, 90.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn reference_lines_in_billions() {
        let rep = reference_report(MoneyUnit::BillionEuro);
        assert_eq!(rep.lines.len(), 9);
        assert_eq!(rep.lines[4].label_key, keys::RESULT_REIMBURSEMENT_COST);
        assert!((rep.lines[4].value - 2.6676).abs() < 1e-9);
        assert!((rep.lines[7].value - 4.0014).abs() < 1e-9);
        assert!((rep.percent_saving - 12.880_733_944_954_13).abs() < 1e-9);
        assert!(rep.warnings.is_empty());
    }

    #[test]
    fn zero_co2_price_warns_unbounded_leverage() {
        let mut s = Scenario::default();
        s.co2_price = 0.0;
        let r = compute(s.to_model_input()).unwrap();
        let rep = Report::build(&s, &r, MoneyUnit::Euro);
        assert!(rep.warnings.contains(&Warning::UnboundedLeverage));
        assert_eq!(Report::format_line(&rep.lines[8], 2), "∞");
    }

    #[test]
    fn inconsistent_inputs_warn() {
        let mut s = Scenario::default();
        s.clearing_price = 50.0;
        let r = compute(s.to_model_input()).unwrap();
        let rep = Report::build(&s, &r, MoneyUnit::Euro);
        assert!(rep.warnings.contains(&Warning::NegativeOtherCosts));
    }

    #[test]
    fn format_line_appends_unit() {
        let line = ReportLine {
            label_key: keys::RESULT_PSOC,
            value: 9.36,
            unit: LineUnit::EuroPerMwh,
        };
        assert_eq!(Report::format_line(&line, 2), "9.36 €/MWh");
    }

    #[test]
    fn render_text_contains_saving() {
        let tr = Translator::new("en");
        let text = reference_report(MoneyUnit::BillionEuro).render_text(&tr, 2);
        assert!(text.contains("12.88%"), "{text}");
        assert!(text.contains("2.67 bn €"), "{text}");
    }

    #[test]
    fn toml_export_has_base_units() {
        let text = reference_report(MoneyUnit::BillionEuro).to_toml().unwrap();
        let value: toml::Value = toml::from_str(&text).unwrap();
        let cost = value["result"]["reimbursement_cost"].as_float().unwrap();
        assert!((cost - 2.6676e9).abs() < 1.0);
    }
}
