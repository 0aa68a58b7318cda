use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use co2_reimbursement_toolbox::app::{self, AppError};
use co2_reimbursement_toolbox::config::{self, Config, DEFAULT_CONFIG_PATH};
use co2_reimbursement_toolbox::i18n::{self, Translator};
use co2_reimbursement_toolbox::logging;
use co2_reimbursement_toolbox::reimbursement::{Parameter, Scenario};
use co2_reimbursement_toolbox::ui_cli;

#[derive(Parser)]
#[command(name = "co2_reimbursement_toolbox_cli")]
#[command(about = "CO2 cost reimbursement effect on the Italian PUN")]
#[command(version)]
struct Cli {
    /// 언어 코드(auto/it/en/ko)
    #[arg(long, global = true, default_value = "auto")]
    lang: String,

    /// 설정 파일 경로
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// 로그 레벨(RUST_LOG가 있으면 무시)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 대화형 메뉴(기본)
    Interactive,

    /// 한 번 계산하고 결과를 출력한다. 생략한 값은 설정 파일의 시나리오를 쓴다.
    Compute {
        /// 가스 가격 [€/MWh]
        #[arg(long)]
        gas_price: Option<String>,
        /// 현재 PUN [€/MWh]
        #[arg(long)]
        clearing_price: Option<String>,
        /// CO2 가격 [€/tCO2]
        #[arg(long)]
        co2_price: Option<String>,
        /// 배출계수 [tCO2/MWh]
        #[arg(long)]
        emission_factor: Option<String>,
        /// 연간 거래 전력량 (예: 285000000, "285 TWh")
        #[arg(long)]
        traded_energy: Option<String>,
        /// 가스 한계가격 비중 (예: 40, "40%", "0.4 fraction")
        #[arg(long)]
        gas_share: Option<String>,
        /// 가스 발전 효율 (예: 56, "56%")
        #[arg(long)]
        gas_efficiency: Option<String>,
        /// 출력 형식
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// 텍스트 막대 그래프를 생략
        #[arg(long)]
        no_charts: bool,
        /// 결과를 TOML 파일로 저장
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Toml,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut cfg = match config::load_or_default_at(&config_path) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(%err, path = %config_path.display(), "failed to load config");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    info!(lang = tr.language_code(), "translator ready");

    let outcome = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => app::run(&mut cfg, &mut tr),
        Commands::Compute {
            gas_price,
            clearing_price,
            co2_price,
            emission_factor,
            traded_energy,
            gas_share,
            gas_efficiency,
            format,
            no_charts,
            output,
        } => {
            let overrides = [
                (Parameter::GasPrice, gas_price),
                (Parameter::ClearingPrice, clearing_price),
                (Parameter::Co2Price, co2_price),
                (Parameter::EmissionFactor, emission_factor),
                (Parameter::TradedEnergy, traded_energy),
                (Parameter::GasShare, gas_share),
                (Parameter::GasEfficiency, gas_efficiency),
            ];
            apply_overrides(cfg.scenario, overrides).and_then(|scenario| {
                run_compute(&tr, &cfg, &scenario, format, !no_charts, output)
            })
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "run failed");
            eprintln!("{}", ui_cli::describe_error(&tr, &err));
            ExitCode::FAILURE
        }
    }
}

fn apply_overrides(
    mut scenario: Scenario,
    overrides: [(Parameter, Option<String>); 7],
) -> Result<Scenario, AppError> {
    for (param, raw) in overrides {
        if let Some(raw) = raw {
            scenario.set(param, ui_cli::parse_parameter_value(param, &raw)?);
        }
    }
    Ok(scenario)
}

fn run_compute(
    tr: &Translator,
    cfg: &Config,
    scenario: &Scenario,
    format: OutputFormat,
    with_charts: bool,
    output: Option<PathBuf>,
) -> Result<(), AppError> {
    let (report, text) = ui_cli::render_simulation(
        tr,
        scenario,
        cfg.display.money_unit,
        cfg.display.decimals,
        with_charts,
    )?;
    match format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Toml => println!("{}", report.to_toml()?),
    }
    if let Some(path) = output {
        report.export_toml(&path)?;
    }
    Ok(())
}
