//! 로깅 초기화.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// stderr로 출력하는 tracing subscriber를 설치한다.
///
/// `RUST_LOG`가 있으면 우선하고, 없으면 `level`을 사용한다. 두 번째 호출은 무시된다.
pub fn init(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
