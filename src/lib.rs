//! CO2(ETS) 비용 환급이 PUN(단일 전력 도매가격)에 주는 효과를 계산하는 라이브러리.
//! 핵심 계산 로직을 분리하여 CLI와 GUI가 같은 모델을 공유한다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod logging;
pub mod quantity;
pub mod reimbursement;
pub mod ui_cli;
pub mod units;
