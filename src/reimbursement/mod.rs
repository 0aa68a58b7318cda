//! CO2 배출권 비용 환급 시뮬레이션 모듈 모음.

pub mod charts;
pub mod price_model;
pub mod report;
pub mod scenario;

pub use price_model::*;
pub use report::{percent_saving, Report, ReportError};
pub use scenario::{Parameter, Scenario, ValidationError};
