use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::conversion::{self, parse_with_unit};
use crate::i18n::{self, keys, Translator};
use crate::quantity::QuantityKind;
use crate::reimbursement::scenario::{fraction_to_percent, percent_to_fraction};
use crate::reimbursement::{charts, compute, Parameter, Report, Scenario};
use crate::units::MoneyUnit;

/// 터미널 막대 그래프 폭(문자 수).
const CHART_WIDTH: usize = 40;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run,
    EditParameters,
    ResetDefaults,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_RUN,
        keys::MAIN_MENU_EDIT,
        keys::MAIN_MENU_RESET,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_menu_choice(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::Run),
        "2" => Some(MenuChoice::EditParameters),
        "3" => Some(MenuChoice::ResetDefaults),
        "4" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 시나리오를 검증·계산해 보고서(및 그래프) 텍스트를 만든다.
///
/// 범위 위반과 계산 불가 입력은 `AppError`로 돌려준다.
pub fn render_simulation(
    tr: &Translator,
    scenario: &Scenario,
    money_unit: MoneyUnit,
    decimals: usize,
    with_charts: bool,
) -> Result<(Report, String), AppError> {
    scenario.validate()?;
    let result = compute(scenario.to_model_input())?;
    let report = Report::build(scenario, &result, money_unit);
    let mut text = report.render_text(tr, decimals);
    if with_charts {
        for chart in charts::all_charts(scenario, &result, money_unit) {
            text.push('\n');
            text.push_str(&chart.render_text(tr, CHART_WIDTH));
        }
    }
    Ok((report, text))
}

/// 범위 위반을 번역된 라벨로 출력한다.
pub fn describe_error(tr: &Translator, err: &AppError) -> String {
    match err {
        AppError::Validation(v) => {
            let mut out = tr.t(keys::VALIDATION_HEADING);
            for violation in &v.violations {
                out.push_str(&format!(
                    "\n  - {}: {}",
                    tr.t(violation.parameter.label_key()),
                    violation
                ));
            }
            out
        }
        AppError::Model(e) => format!("{} {e}", tr.t(keys::RESULT_MODEL_ERROR)),
        other => format!("{}: {other}", tr.t(keys::ERROR_PREFIX)),
    }
}

/// 현재 파라미터로 시뮬레이션을 실행한다.
pub fn handle_run(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    match render_simulation(
        tr,
        &cfg.scenario,
        cfg.display.money_unit,
        cfg.display.decimals,
        true,
    ) {
        Ok((_, text)) => println!("\n{text}"),
        // 입력 문제는 메뉴 루프를 끝내지 않는다.
        Err(e @ (AppError::Validation(_) | AppError::Model(_))) => {
            println!("{}", describe_error(tr, &e))
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn parameter_line(tr: &Translator, index: usize, p: Parameter, scenario: &Scenario) -> String {
    let value = scenario.get(p);
    let (shown, unit) = if p.is_percent_input() {
        (fraction_to_percent(value), "%")
    } else {
        (value, p.unit())
    };
    format!("{}) {} = {shown} {unit}", index + 1, tr.t(p.label_key()))
}

fn print_parameters(tr: &Translator, scenario: &Scenario) {
    for (i, p) in Parameter::ALL.into_iter().enumerate() {
        println!("{}", parameter_line(tr, i, p, scenario));
    }
}

/// 파라미터 편집 메뉴를 처리한다.
pub fn handle_edit_parameters(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::EDIT_HEADING));
    loop {
        print_parameters(tr, &cfg.scenario);
        let sel = read_line(&tr.t(keys::EDIT_PROMPT_PARAM))?;
        if sel.trim().is_empty() {
            return Ok(());
        }
        let param = sel
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Parameter::ALL.get(i).copied());
        let Some(param) = param else {
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
            continue;
        };
        let value = read_parameter_value(tr, param)?;
        cfg.scenario.set(param, value);
        println!("{}", tr.t(keys::EDIT_UPDATED));
    }
}

/// 2024 기본값으로 되돌린다.
pub fn handle_reset(tr: &Translator, cfg: &mut Config) {
    cfg.scenario = Scenario::default();
    println!("{}", tr.t(keys::EDIT_RESET_DONE));
}

/// 설정 메뉴를 처리한다. 언어를 바꾸면 번역기를 다시 만든다.
pub fn handle_settings(tr: &mut Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_MONEY_UNIT),
        cfg.display.money_unit.symbol()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => {
            let lang = read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let lang = lang.trim().to_lowercase();
            if matches!(lang.as_str(), "auto" | "it" | "en" | "ko") {
                cfg.language = lang;
                let resolved = i18n::resolve_language(&cfg.language, None);
                *tr = Translator::new_with_pack(&resolved, cfg.language_pack_dir.as_deref());
                println!("{}", tr.t(keys::SETTINGS_SAVED));
            } else {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
            }
        }
        "2" => {
            let unit = read_line(&tr.t(keys::SETTINGS_PROMPT_MONEY_UNIT))?;
            match parse_money_unit_choice(&unit) {
                Some(u) => {
                    cfg.display.money_unit = u;
                    println!("{}", tr.t(keys::SETTINGS_SAVED));
                }
                None => println!("{}", tr.t(keys::SETTINGS_INVALID)),
            }
        }
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }
    Ok(())
}

/// 번호(1~4) 또는 단위 이름(`mld`, `M€` 등)을 받는다.
fn parse_money_unit_choice(s: &str) -> Option<MoneyUnit> {
    match s.trim() {
        "1" => Some(MoneyUnit::Euro),
        "2" => Some(MoneyUnit::ThousandEuro),
        "3" => Some(MoneyUnit::MillionEuro),
        "4" => Some(MoneyUnit::BillionEuro),
        other => conversion::parse_money_unit(other).ok(),
    }
}

/// 파라미터 입력 문자열을 기준 단위 값으로 해석한다.
///
/// 거래량은 `285 TWh`처럼 단위를 붙일 수 있다. 비중/효율은 단위 없이 입력하면 %로 본다
/// (`40` → 0.40). `0.4 fraction`처럼 명시할 수도 있다. 나머지는 숫자만 받는다.
pub fn parse_parameter_value(
    param: Parameter,
    input: &str,
) -> Result<f64, conversion::ConversionError> {
    match param {
        Parameter::TradedEnergy => parse_with_unit(QuantityKind::EnergyVolume, input),
        Parameter::GasShare | Parameter::GasEfficiency => {
            let value = parse_with_unit(QuantityKind::Fraction, input)?;
            let has_unit = input.contains('%')
                || input
                    .chars()
                    .any(|c| c.is_alphabetic() && !matches!(c, 'e' | 'E'));
            Ok(if has_unit { value } else { percent_to_fraction(value) })
        }
        _ => input
            .trim()
            .replace('_', "")
            .parse()
            .map_err(|_| conversion::ConversionError::InvalidNumber(input.to_string())),
    }
}

fn read_parameter_value(tr: &Translator, param: Parameter) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!(
            "{} - {}",
            tr.t(param.label_key()),
            tr.t(keys::EDIT_PROMPT_VALUE)
        ))?;
        match parse_parameter_value(param, &s) {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reimbursement::scenario::RangeViolation;
    use crate::reimbursement::ValidationError;

    #[test]
    fn menu_choices_map() {
        assert_eq!(parse_menu_choice(" 1\n"), Some(MenuChoice::Run));
        assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("9"), None);
    }

    #[test]
    fn percent_parameters_accept_plain_percent() {
        let v = parse_parameter_value(Parameter::GasShare, "40\n").unwrap();
        assert!((v - 0.4).abs() < 1e-12);
        let v = parse_parameter_value(Parameter::GasEfficiency, "0.56 fraction").unwrap();
        assert!((v - 0.56).abs() < 1e-12);
        let v = parse_parameter_value(Parameter::GasEfficiency, "56%").unwrap();
        assert!((v - 0.56).abs() < 1e-12);
    }

    #[test]
    fn traded_energy_accepts_suffix() {
        let v = parse_parameter_value(Parameter::TradedEnergy, "285 TWh").unwrap();
        assert!((v - 285_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn price_rejects_text() {
        assert!(parse_parameter_value(Parameter::Co2Price, "abc").is_err());
        assert_eq!(parse_parameter_value(Parameter::Co2Price, " 65.5 ").unwrap(), 65.5);
    }

    #[test]
    fn parameter_lines_show_units() {
        let tr = Translator::new("en");
        let s = Scenario::default();
        let line = parameter_line(&tr, 4, Parameter::TradedEnergy, &s);
        assert!(line.starts_with("5) "), "{line}");
        assert!(line.ends_with("= 285000000 MWh"), "{line}");
        let line = parameter_line(&tr, 2, Parameter::Co2Price, &s);
        assert!(line.ends_with("= 65 €/tCO2"), "{line}");
        let line = parameter_line(&tr, 5, Parameter::GasShare, &s);
        assert!(line.ends_with("= 40 %"), "{line}");
    }

    #[test]
    fn money_unit_choice_by_number_or_name() {
        assert_eq!(parse_money_unit_choice("4"), Some(MoneyUnit::BillionEuro));
        assert_eq!(parse_money_unit_choice("M€"), Some(MoneyUnit::MillionEuro));
        assert_eq!(parse_money_unit_choice("x"), None);
    }

    #[test]
    fn simulation_text_includes_charts() {
        let tr = Translator::new("en");
        let (report, text) =
            render_simulation(&tr, &Scenario::default(), MoneyUnit::BillionEuro, 2, true).unwrap();
        assert!((report.result.psoc - 9.36).abs() < 1e-9);
        assert!(text.contains("Leverage effect (= 1.50)"), "{text}");
        assert!(text.contains("Current PUN breakdown"), "{text}");
    }

    #[test]
    fn out_of_range_is_reported_with_labels() {
        let tr = Translator::new("en");
        let mut s = Scenario::default();
        s.gas_share = 2.0;
        let err = render_simulation(&tr, &s, MoneyUnit::Euro, 2, false).unwrap_err();
        let msg = describe_error(&tr, &err);
        assert!(msg.contains("Share of energy from gas"), "{msg}");
        let direct = AppError::Validation(ValidationError {
            violations: vec![RangeViolation {
                parameter: Parameter::GasShare,
                value: 2.0,
                bounds: Parameter::GasShare.bounds(),
            }],
        });
        assert_eq!(describe_error(&tr, &direct), msg);
    }
}
