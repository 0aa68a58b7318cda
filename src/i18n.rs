use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::debug;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_DISCLAIMER: &str = "general.disclaimer";
    pub const APP_INTRO: &str = "general.intro";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_RUN: &str = "main_menu.run";
    pub const MAIN_MENU_EDIT: &str = "main_menu.edit";
    pub const MAIN_MENU_RESET: &str = "main_menu.reset";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const EDIT_HEADING: &str = "edit.heading";
    pub const EDIT_PROMPT_PARAM: &str = "edit.prompt_param";
    pub const EDIT_PROMPT_VALUE: &str = "edit.prompt_value";
    pub const EDIT_UPDATED: &str = "edit.updated";
    pub const EDIT_RESET_DONE: &str = "edit.reset_done";

    pub const PARAM_GAS_PRICE: &str = "param.gas_price";
    pub const PARAM_CLEARING_PRICE: &str = "param.clearing_price";
    pub const PARAM_CO2_PRICE: &str = "param.co2_price";
    pub const PARAM_EMISSION_FACTOR: &str = "param.emission_factor";
    pub const PARAM_TRADED_ENERGY: &str = "param.traded_energy";
    pub const PARAM_GAS_SHARE: &str = "param.gas_share";
    pub const PARAM_GAS_EFFICIENCY: &str = "param.gas_efficiency";

    pub const VALIDATION_HEADING: &str = "validation.heading";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_CURRENT_MONEY_UNIT: &str = "settings.current_money_unit";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_MONEY_UNIT: &str = "settings.prompt_money_unit";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_GAS_INCIDENCE: &str = "result.gas_incidence";
    pub const RESULT_CO2_INCIDENCE: &str = "result.co2_incidence";
    pub const RESULT_OTHER_COSTS: &str = "result.other_costs";
    pub const RESULT_PRICE_NET_CO2: &str = "result.price_net_co2";
    pub const RESULT_REIMBURSEMENT_COST: &str = "result.reimbursement_cost";
    pub const RESULT_PSOC: &str = "result.psoc";
    pub const RESULT_EQUIVALENT_PRICE: &str = "result.equivalent_price";
    pub const RESULT_NET_BENEFIT: &str = "result.net_benefit";
    pub const RESULT_LEVERAGE: &str = "result.leverage";
    pub const RESULT_PERCENT_SAVING: &str = "result.percent_saving";
    pub const RESULT_MODEL_ERROR: &str = "result.model_error";

    pub const WARN_NEGATIVE_OTHER_COSTS: &str = "warn.negative_other_costs";
    pub const WARN_NEGATIVE_BENEFIT: &str = "warn.negative_benefit";
    pub const WARN_UNBOUNDED_LEVERAGE: &str = "warn.unbounded_leverage";

    pub const NOTE_LEVERAGE: &str = "note.leverage";
    pub const NOTE_INDICATIVE: &str = "note.indicative";

    pub const CHART_PRICE_TITLE: &str = "chart.price_title";
    pub const CHART_CURRENT_PUN: &str = "chart.current_pun";
    pub const CHART_DECOMPOSITION_TITLE: &str = "chart.decomposition_title";
    pub const CHART_TOTAL: &str = "chart.total";
    pub const CHART_GAS_SHARE: &str = "chart.gas_share";
    pub const CHART_CO2_SHARE: &str = "chart.co2_share";
    pub const CHART_LEVERAGE_TITLE: &str = "chart.leverage_title";

    pub const GUI_APP_TITLE: &str = "gui.app_title";
    pub const GUI_INPUTS: &str = "gui.inputs";
    pub const GUI_COMPUTE: &str = "gui.compute";
    pub const GUI_RESET: &str = "gui.reset";
    pub const GUI_EXPORT: &str = "gui.export";
    pub const GUI_EXPORT_DONE: &str = "gui.export_done";
    pub const GUI_CHARTS: &str = "gui.charts";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_SETTINGS_LANGUAGE: &str = "gui.settings_language";
    pub const GUI_SETTINGS_LANGUAGE_AUTO: &str = "gui.settings_language_auto";
    pub const GUI_SETTINGS_MONEY_UNIT: &str = "gui.settings_money_unit";
    pub const GUI_SETTINGS_ALPHA: &str = "gui.settings_alpha";
    pub const GUI_SETTINGS_SAVE: &str = "gui.settings_save";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    It,
    En,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("it") {
            Language::It
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::It => "it",
            Language::En => "en",
            Language::Ko => "ko",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    pack: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(it/en/ko)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    /// 외부 팩은 내장 팩 위에 키 단위로 덮어쓴다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let mut pack = built_in_pack(lang).unwrap_or_default();
        if let Some(over) = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
        {
            debug!(lang = lang.as_code(), keys = over.len(), "language pack override loaded");
            pack.extend(over);
        }
        Self {
            lang,
            pack,
            fallback: built_in_pack(Language::En).unwrap_or_default(),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.pack.get(key).cloned()
    }

    /// 번역을 가져온다. 현재 언어에 없으면 영어, 그것도 없으면 키 자체를 반환한다.
    pub fn t(&self, key: &str) -> String {
        self.pack
            .get(key)
            .or_else(|| self.fallback.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("it") => Some("it".into()),
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "it" | "en" | "ko" => Some(lang),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 섹션.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., it-it)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., it)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: Language) -> Option<HashMap<String, String>> {
    match lang {
        Language::It => parse_toml_to_map(include_str!("../locales/it.toml")),
        Language::En => parse_toml_to_map(include_str!("../locales/en.toml")),
        Language::Ko => parse_toml_to_map(include_str!("../locales/ko.toml")),
    }
}
