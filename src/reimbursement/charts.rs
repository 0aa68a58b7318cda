//! 결과 레코드로부터 만드는 세 가지 막대 그래프 데이터.
//!
//! GUI는 egui painter로, CLI는 `render_text`로 그린다. 그래프는 결과 필드만 사용한다.

use super::price_model::PriceReimbursementResult;
use super::report::format_leverage;
use super::scenario::Scenario;
use crate::i18n::{keys, Translator};
use crate::units::{convert_money, MoneyUnit};

/// sRGB 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const GREY: Rgb = Rgb(0x88, 0x88, 0x88);
pub const TEAL: Rgb = Rgb(0x2a, 0x9d, 0x8f);
pub const SAND: Rgb = Rgb(0xf4, 0xa2, 0x61);
pub const STEEL_BLUE: Rgb = Rgb(0x45, 0x7b, 0x9d);
pub const TERRACOTTA: Rgb = Rgb(0xe7, 0x6f, 0x51);
pub const MUSTARD: Rgb = Rgb(0xe9, 0xc4, 0x6a);

/// 막대 하나(또는 누적 막대의 한 구간).
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label_key: &'static str,
    pub value: f64,
    /// 누적 막대에서 이 구간이 시작하는 높이. 일반 막대는 0.
    pub base: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartLayout {
    /// 막대를 나란히 배치
    Grouped,
    /// 첫 막대는 전체, 나머지는 그 위에 겹쳐 쌓는 구간
    Stacked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title_key: &'static str,
    /// 제목 뒤에 붙는 주석(예: 레버리지 값)
    pub annotation: Option<String>,
    pub y_unit: String,
    pub layout: ChartLayout,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// y축 범위(최소, 최대). 항상 0을 포함한다.
    pub fn value_range(&self) -> (f64, f64) {
        self.bars.iter().fold((0.0_f64, 0.0_f64), |(lo, hi), b| {
            let a = b.base;
            let z = b.base + b.value;
            (lo.min(a).min(z), hi.max(a).max(z))
        })
    }

    pub fn title(&self, tr: &Translator) -> String {
        match &self.annotation {
            Some(a) => format!("{} ({a})", tr.t(self.title_key)),
            None => tr.t(self.title_key),
        }
    }

    /// 터미널용 가로 막대 그래프. 음수 값은 `-` 문자로 그린다.
    pub fn render_text(&self, tr: &Translator, width: usize) -> String {
        let mut out = format!("{} [{}]\n", self.title(tr), self.y_unit);
        let (lo, hi) = self.value_range();
        let span = (hi - lo).max(f64::EPSILON);
        let labels: Vec<String> = self.bars.iter().map(|b| tr.t(b.label_key)).collect();
        let label_w = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let to_cells = |v: f64| {
            let c = (v / span * width as f64).round();
            (if c.is_finite() { c.max(0.0) as usize } else { 0 }).min(width)
        };
        for (bar, label) in self.bars.iter().zip(&labels) {
            // 음수 구간은 base + value 에서 base 쪽으로 그린다.
            let offset = if self.layout == ChartLayout::Stacked {
                to_cells(bar.base.min(bar.base + bar.value) - lo)
            } else {
                0
            };
            let cells = to_cells(bar.value.abs()).min(width - offset);
            let glyph = if bar.value < 0.0 { '-' } else { '#' };
            let pad = label_w - label.chars().count();
            out.push_str(&format!(
                "  {label}{} |{}{} {:.2}\n",
                " ".repeat(pad),
                " ".repeat(offset),
                glyph.to_string().repeat(cells),
                bar.value
            ));
        }
        out
    }
}

/// (a) 현재 PUN / CO2 제외 PUN / 등가 PUN 비교.
pub fn price_comparison(scenario: &Scenario, result: &PriceReimbursementResult) -> BarChart {
    BarChart {
        title_key: keys::CHART_PRICE_TITLE,
        annotation: None,
        y_unit: "€/MWh".into(),
        layout: ChartLayout::Grouped,
        bars: vec![
            Bar {
                label_key: keys::CHART_CURRENT_PUN,
                value: scenario.clearing_price,
                base: 0.0,
                color: GREY,
            },
            Bar {
                label_key: keys::RESULT_PRICE_NET_CO2,
                value: result.price_net_of_co2,
                base: 0.0,
                color: TEAL,
            },
            Bar {
                label_key: keys::RESULT_EQUIVALENT_PRICE,
                value: result.equivalent_price,
                base: 0.0,
                color: SAND,
            },
        ],
    }
}

/// (b) 현재 PUN을 가스/CO2/기타 구간으로 누적 분해.
pub fn price_decomposition(scenario: &Scenario, result: &PriceReimbursementResult) -> BarChart {
    BarChart {
        title_key: keys::CHART_DECOMPOSITION_TITLE,
        annotation: None,
        y_unit: "€/MWh".into(),
        layout: ChartLayout::Stacked,
        bars: vec![
            Bar {
                label_key: keys::CHART_TOTAL,
                value: scenario.clearing_price,
                base: 0.0,
                color: GREY,
            },
            Bar {
                label_key: keys::CHART_GAS_SHARE,
                value: result.gas_incidence,
                base: 0.0,
                color: STEEL_BLUE,
            },
            Bar {
                label_key: keys::CHART_CO2_SHARE,
                value: result.co2_incidence,
                base: result.gas_incidence,
                color: TERRACOTTA,
            },
            Bar {
                label_key: keys::RESULT_OTHER_COSTS,
                value: result.other_costs,
                base: result.gas_incidence + result.co2_incidence,
                color: MUSTARD,
            },
        ],
    }
}

/// (c) 시스템 순편익 대 환급 비용. 제목에 레버리지를 표기한다.
pub fn leverage_chart(result: &PriceReimbursementResult, money_unit: MoneyUnit) -> BarChart {
    let money = |v: f64| convert_money(v, MoneyUnit::Euro, money_unit);
    BarChart {
        title_key: keys::CHART_LEVERAGE_TITLE,
        annotation: Some(format!("= {}", format_leverage(result.leverage, 2))),
        y_unit: format!("{}/yr", money_unit.symbol()),
        layout: ChartLayout::Grouped,
        bars: vec![
            Bar {
                label_key: keys::RESULT_NET_BENEFIT,
                value: money(result.net_benefit),
                base: 0.0,
                color: TEAL,
            },
            Bar {
                label_key: keys::RESULT_REIMBURSEMENT_COST,
                value: money(result.reimbursement_cost),
                base: 0.0,
                color: TERRACOTTA,
            },
        ],
    }
}

/// 세 그래프를 원래 화면 순서대로 만든다.
pub fn all_charts(
    scenario: &Scenario,
    result: &PriceReimbursementResult,
    money_unit: MoneyUnit,
) -> [BarChart; 3] {
    [
        price_comparison(scenario, result),
        price_decomposition(scenario, result),
        leverage_chart(result, money_unit),
    ]
}
