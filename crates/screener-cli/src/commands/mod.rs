//! CLI 명령어 구현 모듈.

pub mod components;
pub mod detail;
pub mod rank;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use screener_analytics::{ScreeningPipeline, ScreeningReport};
use screener_core::{AppConfig, ScreeningConfig};
use screener_data::{
    load_ticker_file, CachedComponentLister, CachedPriceHistoryProvider, ComponentLister,
    FetchOptions, NaverComponentLister, YahooPriceProvider,
};

/// 유니버스 입력 옵션.
#[derive(Debug, Clone, Args)]
pub struct UniverseArgs {
    /// 쉼표로 구분한 티커 (예: 005930,000660.KS)
    #[arg(short, long)]
    pub tickers: Option<String>,

    /// 티커 목록 파일 (CSV/TXT, 첫 번째 열)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// 네이버 금융 KOSPI200 자동 수집 비활성화
    #[arg(long)]
    pub no_auto: bool,
}

/// 스크리닝 파라미터 오버라이드.
#[derive(Debug, Clone, Default, Args)]
pub struct ScreeningArgs {
    /// 추천 종목 수 (1-50)
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// 모멘텀 기간 (30-252일)
    #[arg(long)]
    pub lookback_days: Option<usize>,

    /// 변동성 윈도우 (20-120일)
    #[arg(long)]
    pub vol_window: Option<usize>,

    /// 단기 이동평균 (2-100일)
    #[arg(long)]
    pub short_ma: Option<usize>,

    /// 장기 이동평균 (10-300일)
    #[arg(long)]
    pub long_ma: Option<usize>,

    /// 최대 유니버스 크기
    #[arg(long)]
    pub max_universe: Option<usize>,

    /// 조회 기간 (1mo, 3mo, 6mo, 1y, 2y, 5y, max)
    #[arg(long)]
    pub period: Option<String>,

    /// 캔들 간격 (1d, 1wk, 1mo)
    #[arg(long)]
    pub interval: Option<String>,

    /// 동시 조회 수
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl ScreeningArgs {
    /// 설정에 CLI 오버라이드를 적용하고 검증합니다.
    pub fn apply(&self, config: &mut AppConfig) -> Result<()> {
        let screening = &mut config.screening;
        if let Some(v) = self.top_n {
            screening.top_n = v;
        }
        if let Some(v) = self.lookback_days {
            screening.lookback_days = v;
        }
        if let Some(v) = self.vol_window {
            screening.vol_window = v;
        }
        if let Some(v) = self.short_ma {
            screening.short_ma_window = v;
        }
        if let Some(v) = self.long_ma {
            screening.long_ma_window = v;
        }
        if let Some(v) = self.max_universe {
            screening.max_universe_size = v;
        }

        let data = &mut config.data;
        if let Some(ref period) = self.period {
            data.period = period.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(ref interval) = self.interval {
            data.interval = interval.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(v) = self.concurrency {
            data.max_concurrency = v;
        }

        config.screening.validate()?;
        Ok(())
    }
}

/// 실행 컨텍스트 (설정 + 취소 토큰).
pub struct RunContext {
    pub config: AppConfig,
    pub cancel: CancellationToken,
}

impl RunContext {
    pub fn screening(&self) -> &ScreeningConfig {
        &self.config.screening
    }

    /// Yahoo Finance 공급자 + TTL 캐시로 파이프라인을 구성합니다.
    pub fn pipeline(
        &self,
    ) -> Result<ScreeningPipeline<Arc<CachedPriceHistoryProvider<YahooPriceProvider>>>> {
        let yahoo = YahooPriceProvider::new().context("Failed to create Yahoo Finance provider")?;
        let cached = Arc::new(CachedPriceHistoryProvider::new(
            yahoo,
            self.config.data.history_cache_ttl(),
        ));
        Ok(ScreeningPipeline::new(
            cached,
            FetchOptions::from(&self.config.data),
        ))
    }

    /// 네이버 금융 구성 종목 수집기.
    pub fn component_lister(&self) -> Result<CachedComponentLister<NaverComponentLister>> {
        let naver = NaverComponentLister::new(self.config.data.request_timeout())
            .context("Failed to create Naver Finance client")?;
        Ok(CachedComponentLister::new(
            naver,
            self.config.data.components_cache_ttl(),
        ))
    }

    /// 옵션 우선순위(`--tickers` → `--file` → 자동 수집)에 따라 원시 티커를 결정합니다.
    pub async fn resolve_tickers<L: ComponentLister>(
        &self,
        args: &UniverseArgs,
        lister: &L,
    ) -> Result<Vec<String>> {
        if let Some(ref tickers) = args.tickers {
            return Ok(tickers
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect());
        }

        if let Some(ref path) = args.file {
            return load_ticker_file(path)
                .with_context(|| format!("Failed to read ticker file: {}", path.display()));
        }

        if args.no_auto {
            return Ok(Vec::new());
        }

        let spinner = spinner(format!("{}에서 KOSPI200 구성 종목 수집 중...", lister.name()))?;
        let tickers = lister.list_components().await;
        spinner.finish_and_clear();

        if tickers.is_empty() {
            warn!("자동 수집 실패. --file 로 티커 목록을 지정하세요 (예: 005930.KS)");
        } else {
            info!(count = tickers.len(), "구성 종목 자동 수집");
        }
        Ok(tickers)
    }

    /// 스피너를 표시하며 파이프라인을 실행합니다.
    pub async fn run_pipeline<P>(
        &self,
        pipeline: &ScreeningPipeline<P>,
        tickers: &[String],
    ) -> Result<ScreeningReport>
    where
        P: screener_data::PriceHistoryProvider,
    {
        let spinner = spinner(format!(
            "주가 데이터 불러오는 중... ({}개 종목)",
            tickers.len().min(self.screening().max_universe_size)
        ))?;

        let result = pipeline
            .run(tickers, self.screening(), &self.cancel)
            .await;
        spinner.finish_and_clear();

        Ok(result?)
    }
}

/// stderr 스피너.
pub fn spinner(message: String) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_core::{Interval, Period, ScreenerError};
    use screener_data::StaticComponentLister;

    fn context() -> RunContext {
        RunContext {
            config: AppConfig::default(),
            cancel: CancellationToken::new(),
        }
    }

    fn universe_args() -> UniverseArgs {
        UniverseArgs {
            tickers: None,
            file: None,
            no_auto: false,
        }
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = AppConfig::default();
        let args = ScreeningArgs {
            top_n: Some(5),
            long_ma: Some(120),
            period: Some("2y".to_string()),
            interval: Some("1wk".to_string()),
            ..Default::default()
        };
        args.apply(&mut config).unwrap();

        assert_eq!(config.screening.top_n, 5);
        assert_eq!(config.screening.long_ma_window, 120);
        assert_eq!(config.data.period, Period::TwoYears);
        assert_eq!(config.data.interval, Interval::Weekly);
    }

    #[test]
    fn test_out_of_range_override_rejected() {
        let mut config = AppConfig::default();
        let args = ScreeningArgs {
            top_n: Some(100),
            ..Default::default()
        };
        let err = args.apply(&mut config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScreenerError>(),
            Some(ScreenerError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_explicit_tickers_win() {
        let lister = StaticComponentLister::new(["035420"]);
        let args = UniverseArgs {
            tickers: Some("005930, 000660,,".to_string()),
            ..universe_args()
        };
        let tickers = context().resolve_tickers(&args, &lister).await.unwrap();
        assert_eq!(tickers, vec!["005930", "000660"]);
    }

    #[tokio::test]
    async fn test_no_auto_yields_empty() {
        let lister = StaticComponentLister::new(["035420"]);
        let args = UniverseArgs {
            no_auto: true,
            ..universe_args()
        };
        assert!(context()
            .resolve_tickers(&args, &lister)
            .await
            .unwrap()
            .is_empty());
    }
}
