//! KOSPI 종목 스크리너 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # KOSPI200 자동 수집 후 상위 10개 추천
//! screener rank
//!
//! # 티커 직접 지정, 상위 5개, CSV 저장
//! screener rank -t 005930,000660,035420 -n 5 --format csv -o picks.csv
//!
//! # 티커 파일 + 10분마다 재실행
//! screener rank -f tickers.csv --watch 600
//!
//! # 종목 상세 (최근 종가 20개)
//! screener detail 005930 --recent 20
//!
//! # 구성 종목 목록
//! screener components
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use screener_core::{init_logging, AppConfig, LogConfig, LogFormat, ScreenerError};

mod commands;
mod output;

use commands::detail::DetailOptions;
use commands::rank::RankOptions;
use commands::{RunContext, ScreeningArgs, UniverseArgs};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "KOSPI 종목 스크리너 - 모멘텀/변동성/골든크로스 기반 추천", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (TOML). 지정하지 않으면 config/screener.toml 사용
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (RUST_LOG 가 우선)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 추천 순위 계산
    Rank {
        #[command(flatten)]
        universe: UniverseArgs,

        #[command(flatten)]
        screening: ScreeningArgs,

        /// 출력 형식 (table, csv, json)
        #[arg(long, default_value = "table")]
        format: String,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// 상위 N개 대신 전체 순위 출력
        #[arg(long)]
        all: bool,

        /// N초마다 재실행 (Ctrl-C로 종료)
        #[arg(long)]
        watch: Option<u64>,

        /// 캐시를 비우고 실행
        #[arg(long)]
        refresh: bool,
    },

    /// 종목 상세 (팩터, 순위, 최근 종가)
    Detail {
        /// 종목 코드 (예: 005930, 005930.KS)
        symbol: String,

        #[command(flatten)]
        universe: UniverseArgs,

        #[command(flatten)]
        screening: ScreeningArgs,

        /// 출력할 최근 종가 수
        #[arg(long, default_value = "10")]
        recent: usize,

        /// 출력 형식 (table, json)
        #[arg(long, default_value = "table")]
        format: String,

        /// 출력 파일 경로
        #[arg(short, long)]
        output: Option<String>,
    },

    /// KOSPI200 구성 종목 조회 (네이버 금융)
    Components {
        /// 출력 파일 경로
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = exit_code(&e);
            match e.downcast_ref::<ScreenerError>() {
                Some(se) if se.is_universe_failure() => {
                    eprintln!("오류: {}", e);
                    eprintln!(
                        "--tickers/--file 로 티커 목록을 지정하거나 조회 기간(--period)을 늘려 보세요"
                    );
                }
                Some(ScreenerError::Cancelled) => eprintln!("취소됨"),
                _ => {
                    error!("{:#}", e);
                    eprintln!("오류: {:#}", e);
                }
            }
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match cli.config {
        Some(ref path) => AppConfig::load(Some(path))?,
        None => AppConfig::load_default()?,
    };

    let level = cli.log_level.unwrap_or_else(|| config.logging.level.clone());
    let format: LogFormat = cli
        .log_format
        .as_deref()
        .unwrap_or(&config.logging.format)
        .parse()
        .map_err(anyhow::Error::msg)?;
    init_logging(LogConfig::new(level).with_format(format))
        .map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;

    let cancel = CancellationToken::new();
    spawn_ctrl_c(cancel.clone());

    match cli.command {
        Commands::Rank {
            universe,
            screening,
            format,
            output,
            all,
            watch,
            refresh,
        } => {
            screening.apply(&mut config)?;
            let ctx = RunContext { config, cancel };
            let options = RankOptions {
                universe,
                format: format.parse()?,
                output,
                all,
                watch: watch.filter(|s| *s > 0).map(Duration::from_secs),
                refresh,
            };
            commands::rank::run(&ctx, options).await
        }

        Commands::Detail {
            symbol,
            universe,
            screening,
            recent,
            format,
            output,
        } => {
            screening.apply(&mut config)?;
            let format: OutputFormat = format.parse()?;
            if format == OutputFormat::Csv {
                warn!("detail 명령은 csv를 지원하지 않아 table로 출력합니다");
            }
            let ctx = RunContext { config, cancel };
            let options = DetailOptions {
                symbol,
                universe,
                recent,
                format,
                output,
            };
            commands::detail::run(&ctx, options).await
        }

        Commands::Components { output } => {
            config.screening.validate()?;
            let ctx = RunContext { config, cancel };
            commands::components::run(&ctx, output).await
        }
    }
}

fn spawn_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C 수신, 작업 취소");
            cancel.cancel();
        }
    });
}

/// 오류 종류별 종료 코드. 유니버스 실패는 2, 취소는 130.
fn exit_code(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<ScreenerError>() {
        Some(se) if se.is_universe_failure() => 2,
        Some(ScreenerError::Cancelled) => 130,
        _ => 1,
    }
}
