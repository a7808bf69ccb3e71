//! 스크리닝 파이프라인.
//!
//! 정규화 → 병렬 조회 → 종목별 팩터 계산 → 점수 합성을 한 번의 작업 단위로 실행합니다.
//! 실행 간 공유 상태는 없으며 (캐시는 공급자 바깥의 관심사), 취소되면
//! 부분 결과를 반환하지 않습니다.

use std::collections::HashMap;
use std::time::Instant;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use screener_core::{ScreenerError, ScreenerResult, ScreeningConfig};
use screener_data::{fetch_all, FetchOptions, PriceHistoryProvider};

use crate::aggregator::ScoreAggregator;
use crate::factor_engine::{FactorEngine, FactorOutcome};
use crate::report::{ReportParams, ScreeningReport};
use crate::universe::build_universe;

/// 스크리닝 파이프라인.
pub struct ScreeningPipeline<P> {
    provider: P,
    fetch: FetchOptions,
}

impl<P: PriceHistoryProvider> ScreeningPipeline<P> {
    pub fn new(provider: P, fetch: FetchOptions) -> Self {
        Self { provider, fetch }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// 파이프라인을 실행합니다.
    ///
    /// # 에러
    /// - `InvalidUniverse`: 정규화 후 종목이 없음
    /// - `EmptyUniverse`: 모든 종목이 제외됨
    /// - `Cancelled`: 취소 토큰 발동
    /// - `Config`: 인식 범위를 벗어난 설정 (`top_n = 0`, `max_universe_size = 0` 등)
    #[instrument(skip_all, fields(raw = raw_tickers.len(), top_n = config.top_n))]
    pub async fn run<S: AsRef<str>>(
        &self,
        raw_tickers: &[S],
        config: &ScreeningConfig,
        cancel: &CancellationToken,
    ) -> ScreenerResult<ScreeningReport> {
        let started = Instant::now();
        config.validate()?;
        let params = config.factor_params();

        let universe = build_universe(raw_tickers, config.max_universe_size)?;
        ensure_active(cancel)?;

        let results = fetch_all(&self.provider, &universe.symbols, self.fetch, cancel).await?;

        let engine = FactorEngine::new(params);
        let mut records = Vec::with_capacity(results.len());
        let mut rejections = Vec::new();
        let mut series = HashMap::new();

        for (symbol, result) in results {
            let kept = result.as_ref().ok().cloned();
            let _span = screener_core::screening_span!("factor", symbol.as_str()).entered();

            match engine.classify(&symbol, result) {
                FactorOutcome::Usable(record) => {
                    if let Some(s) = kept {
                        series.insert(symbol, s);
                    }
                    records.push(record);
                }
                FactorOutcome::Rejected(rejection) => {
                    debug!(
                        reason = %rejection.reason,
                        detail = rejection.detail.as_deref().unwrap_or(""),
                        "종목 제외"
                    );
                    rejections.push(rejection);
                }
            }
        }

        ensure_active(cancel)?;

        if records.is_empty() {
            return Err(ScreenerError::EmptyUniverse {
                rejected: rejections.len(),
            });
        }

        let aggregator = ScoreAggregator::new(config.weights);
        let ranked = aggregator.aggregate(&records)?;
        let leaderboard: Vec<_> = ranked.iter().take(config.top_n).cloned().collect();

        let report = ScreeningReport {
            universe: universe.stats,
            leaderboard,
            ranked,
            rejections,
            generated_at: Utc::now(),
            params: ReportParams {
                top_n: config.top_n,
                factor: params,
                weights: config.weights,
                period: self.fetch.period,
                interval: self.fetch.interval,
            },
            series,
            universe_symbols: universe.symbols,
        };

        debug_assert!(report.is_partitioned(), "ranked/rejections must partition the universe");

        info!(
            usable = report.usable_count(),
            rejected = report.rejected_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "스크리닝 완료"
        );

        Ok(report)
    }
}

fn ensure_active(cancel: &CancellationToken) -> ScreenerResult<()> {
    if cancel.is_cancelled() {
        Err(ScreenerError::Cancelled)
    } else {
        Ok(())
    }
}
