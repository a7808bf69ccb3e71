//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → 환경 변수(`SCREENER__` 접두사) 순서로 덮어씁니다.
//!
//! ```text
//! SCREENER__SCREENING__TOP_N=20
//! SCREENER__DATA__MAX_CONCURRENCY=4
//! ```

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::domain::{FactorParams, ScoreWeights};
use crate::error::{ScreenerError, ScreenerResult};
use crate::types::{Interval, Period};

/// 추천 종목 수 허용 범위.
pub const TOP_N_RANGE: RangeInclusive<usize> = 1..=50;
/// 모멘텀 기간 허용 범위.
pub const LOOKBACK_DAYS_RANGE: RangeInclusive<usize> = 30..=252;
/// 변동성 윈도우 허용 범위.
pub const VOL_WINDOW_RANGE: RangeInclusive<usize> = 20..=120;
/// 단기 이평 허용 범위.
pub const SHORT_MA_RANGE: RangeInclusive<usize> = 2..=100;
/// 장기 이평 허용 범위.
pub const LONG_MA_RANGE: RangeInclusive<usize> = 10..=300;
/// 기본 최대 유니버스 크기 (공급자 호출 비용 상한).
pub const DEFAULT_MAX_UNIVERSE_SIZE: usize = 250;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 스크리닝 설정
    pub screening: ScreeningConfig,
    /// 데이터 공급자 설정
    pub data: DataConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 스크리닝(순위 산정) 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScreeningConfig {
    /// 추천 종목 수 (Top N)
    pub top_n: usize,
    /// 모멘텀 기간 (일)
    pub lookback_days: usize,
    /// 변동성 산정 윈도우 (일)
    pub vol_window: usize,
    /// 단기 이동평균 (일)
    pub short_ma_window: usize,
    /// 장기 이동평균 (일)
    pub long_ma_window: usize,
    /// 최대 유니버스 크기
    pub max_universe_size: usize,
    /// 점수 가중치
    pub weights: ScoreWeights,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            lookback_days: 90,
            vol_window: 60,
            short_ma_window: 20,
            long_ma_window: 60,
            max_universe_size: DEFAULT_MAX_UNIVERSE_SIZE,
            weights: ScoreWeights::default(),
        }
    }
}

impl ScreeningConfig {
    /// 팩터 엔진 파라미터.
    pub fn factor_params(&self) -> FactorParams {
        FactorParams {
            lookback_days: self.lookback_days,
            vol_window: self.vol_window,
            short_ma_window: self.short_ma_window,
            long_ma_window: self.long_ma_window,
        }
    }

    /// 인식 범위를 벗어난 값을 거부합니다.
    ///
    /// 가중치 합이 1.0이 아니거나 장기 이평이 단기 이평보다 짧으면
    /// 경고만 남기고 허용합니다.
    pub fn validate(&self) -> ScreenerResult<()> {
        check_range("top_n", self.top_n, &TOP_N_RANGE)?;
        check_range("lookback_days", self.lookback_days, &LOOKBACK_DAYS_RANGE)?;
        check_range("vol_window", self.vol_window, &VOL_WINDOW_RANGE)?;
        check_range("short_ma_window", self.short_ma_window, &SHORT_MA_RANGE)?;
        check_range("long_ma_window", self.long_ma_window, &LONG_MA_RANGE)?;

        if self.max_universe_size == 0 {
            return Err(ScreenerError::Config(
                "max_universe_size는 1 이상이어야 합니다".to_string(),
            ));
        }

        let weights = [
            self.weights.momentum,
            self.weights.volatility,
            self.weights.golden_cross,
        ];
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ScreenerError::Config(
                "가중치는 유한한 실수여야 합니다".to_string(),
            ));
        }

        if !self.weights.is_normalized() {
            warn!(
                sum = self.weights.sum(),
                "가중치 합이 1.0이 아닙니다. 점수가 [0, 1] 범위를 벗어날 수 있습니다"
            );
        }

        if self.long_ma_window < self.short_ma_window {
            warn!(
                short = self.short_ma_window,
                long = self.long_ma_window,
                "장기 이평 윈도우가 단기 이평보다 짧습니다"
            );
        }

        Ok(())
    }
}

fn check_range(name: &str, value: usize, range: &RangeInclusive<usize>) -> ScreenerResult<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ScreenerError::Config(format!(
            "{}={} 범위 밖 ({}~{})",
            name,
            value,
            range.start(),
            range.end()
        )))
    }
}

/// 데이터 공급자 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// 시세 조회 기간
    pub period: Period,
    /// 캔들 간격
    pub interval: Interval,
    /// 동시 조회 수 상한
    pub max_concurrency: usize,
    /// 요청 간 딜레이 (밀리초)
    pub request_delay_ms: u64,
    /// 시세 캐시 TTL (초)
    pub history_cache_ttl_secs: u64,
    /// 구성 종목 캐시 TTL (초)
    pub components_cache_ttl_secs: u64,
    /// HTTP 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            period: Period::OneYear,
            interval: Interval::Daily,
            max_concurrency: 8,
            request_delay_ms: 0,
            history_cache_ttl_secs: 30 * 60,
            components_cache_ttl_secs: 60 * 60,
            request_timeout_secs: 10,
        }
    }
}

impl DataConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn history_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.history_cache_ttl_secs)
    }

    pub fn components_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.components_cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    pub fn load(path: Option<&Path>) -> ScreenerResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("SCREENER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 기본 경로(`config/screener.toml`)가 있으면 로드하고, 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load_default() -> ScreenerResult<Self> {
        let path = Path::new("config/screener.toml");
        if path.exists() {
            Self::load(Some(path))
        } else {
            Self::load(None)
        }
    }
}
