use thiserror::Error;

use crate::config::Config;
use crate::conversion;
use crate::i18n::{self, Translator};
use crate::reimbursement::{ModelError, ReportError, ValidationError};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 단위 변환 오류
    #[error("unit conversion error: {0}")]
    Conversion(#[from] conversion::ConversionError),
    /// 입력 범위 검증 실패
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    /// 모델 계산 불가
    #[error("model error: {0}")]
    Model(#[from] ModelError),
    /// 보고서 저장 오류
    #[error("report error: {0}")]
    Report(#[from] ReportError),
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &mut Translator) -> Result<(), AppError> {
    println!("{}", tr.t(i18n::keys::APP_DISCLAIMER));
    println!("{}", tr.t(i18n::keys::APP_INTRO));
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Run => ui_cli::handle_run(tr, config)?,
            MenuChoice::EditParameters => {
                ui_cli::handle_edit_parameters(tr, config)?;
                config.save()?;
            }
            MenuChoice::ResetDefaults => {
                ui_cli::handle_reset(tr, config);
                config.save()?;
            }
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
