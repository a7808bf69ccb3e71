//! 동시성 상한이 있는 일괄 시세 조회.
//!
//! 종목별 조회는 서로 독립적이므로 `buffer_unordered`로 병렬 실행하고,
//! 각 작업이 자신의 결과를 반환한 뒤 스트림 종료 시점에 입력 순서로 재정렬합니다.
//! 취소되면 부분 결과는 버립니다.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use screener_core::{DataConfig, Interval, Period, PriceSeries, ScreenerError, ScreenerResult, Symbol};

use crate::error::Result;
use crate::provider::PriceHistoryProvider;

/// 종목별 조회 결과.
pub type FetchResult = (Symbol, Result<PriceSeries>);

/// 일괄 조회 옵션.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// 조회 기간
    pub period: Period,
    /// 캔들 간격
    pub interval: Interval,
    /// 동시 조회 수 상한 (0이면 1로 취급)
    pub max_concurrency: usize,
    /// 요청 전 딜레이 (rate limit 완화)
    pub request_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&DataConfig::default())
    }
}

impl From<&DataConfig> for FetchOptions {
    fn from(config: &DataConfig) -> Self {
        Self {
            period: config.period,
            interval: config.interval,
            max_concurrency: config.max_concurrency,
            request_delay: config.request_delay(),
        }
    }
}

/// 수집 통계.
#[derive(Debug, Default)]
struct FetchStats {
    success: usize,
    no_data: usize,
    failed: usize,
}

impl FetchStats {
    fn from_results(results: &[FetchResult]) -> Self {
        let mut stats = Self::default();
        for (_, result) in results {
            match result {
                Ok(_) => stats.success += 1,
                Err(e) if e.is_no_data() => stats.no_data += 1,
                Err(_) => stats.failed += 1,
            }
        }
        stats
    }

    fn log_summary(&self, elapsed: Duration) {
        info!(
            success = self.success,
            no_data = self.no_data,
            failed = self.failed,
            elapsed_ms = elapsed.as_millis() as u64,
            "시세 조회 완료"
        );
    }
}

/// 여러 종목의 시세를 병렬로 조회합니다.
///
/// 결과는 `symbols`와 같은 순서입니다. 취소 토큰이 발동하면
/// `ScreenerError::Cancelled`를 반환합니다.
#[instrument(skip_all, fields(symbols = symbols.len(), concurrency = options.max_concurrency))]
pub async fn fetch_all<P>(
    provider: &P,
    symbols: &[Symbol],
    options: FetchOptions,
    cancel: &CancellationToken,
) -> ScreenerResult<Vec<FetchResult>>
where
    P: PriceHistoryProvider + ?Sized,
{
    if cancel.is_cancelled() {
        return Err(ScreenerError::Cancelled);
    }

    let started = std::time::Instant::now();
    let FetchOptions {
        period,
        interval,
        max_concurrency,
        request_delay,
    } = options;

    let tasks = stream::iter(symbols.iter().cloned().enumerate())
        .map(|(idx, symbol)| async move {
            if !request_delay.is_zero() {
                tokio::time::sleep(request_delay).await;
            }
            let result = provider.fetch_history(&symbol, period, interval).await;
            (idx, symbol, result)
        })
        .buffer_unordered(max_concurrency.max(1))
        .collect::<Vec<_>>();

    let mut indexed = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ScreenerError::Cancelled),
        results = tasks => results,
    };

    indexed.sort_by_key(|(idx, _, _)| *idx);
    let results: Vec<FetchResult> = indexed
        .into_iter()
        .map(|(_, symbol, result)| (symbol, result))
        .collect();

    FetchStats::from_results(&results).log_summary(started.elapsed());
    Ok(results)
}
