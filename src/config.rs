use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::reimbursement::Scenario;
use crate::units::MoneyUnit;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 결과 표시 관련 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// 환급 비용/순편익 표시 단위
    pub money_unit: MoneyUnit,
    /// 소수점 자릿수
    pub decimals: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            money_unit: MoneyUnit::BillionEuro,
            decimals: 2,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/it/en/ko)
    pub language: String,
    /// 외부 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// GUI 창 투명도(0.3~1.0)
    pub window_alpha: f32,
    pub display: DisplaySettings,
    /// 마지막으로 사용한 시나리오
    pub scenario: Scenario,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            window_alpha: 1.0,
            display: DisplaySettings::default(),
            scenario: Scenario::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(Path::new(DEFAULT_CONFIG_PATH))
}

/// 지정한 경로의 설정을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "config loaded");
        cfg
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        info!(path = %path.display(), "default config created");
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 로드한 파일(없으면 config.toml)에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        save_config(self, &path)?;
        info!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("co2_toolbox_{}_{name}.toml", std::process::id()))
    }

    #[test]
    fn creates_default_when_missing() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let cfg = load_or_default_at(&path).unwrap();
        assert_eq!(cfg.scenario, Scenario::default());
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_then_reload_keeps_scenario() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);
        let mut cfg = load_or_default_at(&path).unwrap();
        cfg.scenario.co2_price = 90.0;
        cfg.display.money_unit = MoneyUnit::MillionEuro;
        cfg.save().unwrap();
        let back = load_or_default_at(&path).unwrap();
        assert_eq!(back.scenario.co2_price, 90.0);
        assert_eq!(back.display.money_unit, MoneyUnit::MillionEuro);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let cfg: Config = toml::from_str("language = \"it\"\n[scenario]\nco2_price = 70.0\n").unwrap();
        assert_eq!(cfg.language, "it");
        assert_eq!(cfg.scenario.co2_price, 70.0);
        assert_eq!(cfg.scenario.gas_price, 36.0);
        assert_eq!(cfg.display.decimals, 2);
    }
}
