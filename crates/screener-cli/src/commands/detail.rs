//! 종목 상세 명령어.

use anyhow::{bail, Result};
use tracing::warn;

use screener_core::Symbol;

use super::{RunContext, UniverseArgs};
use crate::output::{format_detail, format_json, write_output, OutputFormat};

/// 상세 명령어 옵션.
#[derive(Debug, Clone)]
pub struct DetailOptions {
    pub symbol: String,
    pub universe: UniverseArgs,
    /// 출력할 최근 종가 수
    pub recent: usize,
    pub format: OutputFormat,
    pub output: Option<String>,
}

/// 종목 상세 실행.
///
/// 순위는 유니버스 기준이므로 대상 종목을 유니버스에 포함시켜 전체 스크리닝을 수행합니다.
pub async fn run(ctx: &RunContext, options: DetailOptions) -> Result<()> {
    let Some(symbol) = Symbol::new(&options.symbol) else {
        bail!("유효하지 않은 티커: {:?}", options.symbol);
    };

    let pipeline = ctx.pipeline()?;
    let lister = ctx.component_lister()?;

    let mut tickers = ctx.resolve_tickers(&options.universe, &lister).await?;
    tickers.push(symbol.as_str().to_string());

    let report = ctx.run_pipeline(&pipeline, &tickers).await?;

    let Some(detail) = report.detail(symbol.as_str()) else {
        match report.rejection(symbol.as_str()) {
            Some(rejection) => bail!(
                "{} 제외됨: {} {}",
                symbol,
                rejection.reason,
                rejection.detail.as_deref().unwrap_or("")
            ),
            None => {
                warn!(%symbol, max = ctx.screening().max_universe_size, "유니버스 상한으로 잘림");
                bail!("{}: 유니버스에 포함되지 않음 (--max-universe 확인)", symbol);
            }
        }
    };

    let rendered = match options.format {
        OutputFormat::Json => format_json(&detail)?,
        _ => format_detail(&detail, options.recent),
    };
    write_output(&rendered, options.output.as_deref())
}
