//! 추천 순위 명령어.
//!
//! `--watch` 지정 시 같은 프로세스에서 주기적으로 재실행하며,
//! 시세는 TTL 캐시를 통해 재사용됩니다.

use std::time::Duration;

use anyhow::Result;
use tracing::info;

use screener_analytics::ScreeningReport;

use super::{RunContext, UniverseArgs};
use crate::output::{format_csv, format_json, format_table, write_output, OutputFormat};

/// 순위 명령어 옵션.
#[derive(Debug, Clone)]
pub struct RankOptions {
    pub universe: UniverseArgs,
    pub format: OutputFormat,
    pub output: Option<String>,
    /// 전체 순위 출력 (기본은 상위 N개)
    pub all: bool,
    /// 재실행 주기
    pub watch: Option<Duration>,
    /// 실행 전 캐시 초기화
    pub refresh: bool,
}

/// 순위 명령어 실행.
pub async fn run(ctx: &RunContext, options: RankOptions) -> Result<()> {
    let pipeline = ctx.pipeline()?;
    let lister = ctx.component_lister()?;

    if options.refresh {
        pipeline.provider().invalidate().await;
        lister.invalidate().await;
    }

    loop {
        let tickers = ctx.resolve_tickers(&options.universe, &lister).await?;
        let report = ctx.run_pipeline(&pipeline, &tickers).await?;
        let rendered = render(&report, &options)?;
        write_output(&rendered, options.output.as_deref())?;

        let Some(every) = options.watch else {
            return Ok(());
        };

        let stats = pipeline.provider().stats().await;
        info!(
            entries = stats.entries,
            hits = stats.hits,
            misses = stats.misses,
            next_in_secs = every.as_secs(),
            "다음 실행 대기"
        );

        tokio::select! {
            _ = ctx.cancel.cancelled() => return Ok(()),
            _ = tokio::time::sleep(every) => {}
        }
        pipeline.provider().purge_expired().await;
    }
}

fn render(report: &ScreeningReport, options: &RankOptions) -> Result<String> {
    let entries = if options.all {
        &report.ranked
    } else {
        &report.leaderboard
    };

    match options.format {
        OutputFormat::Table => Ok(format_table(
            entries,
            &report.universe,
            &report.rejections,
            report.generated_at,
        )),
        OutputFormat::Csv => Ok(format_csv(entries)),
        OutputFormat::Json => format_json(report),
    }
}
