//! 종목별 팩터 파라미터와 계산 결과.

use serde::{Deserialize, Serialize};

use crate::types::Symbol;

/// 롤링 윈도우가 최신 시점에서 값을 갖도록 요구하는 여유 관측치 수.
pub const HISTORY_MARGIN: usize = 5;

/// 팩터 계산 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorParams {
    /// 모멘텀 기간 (관측치 수)
    pub lookback_days: usize,
    /// 변동성 롤링 윈도우
    pub vol_window: usize,
    /// 단기 이동평균 윈도우
    pub short_ma_window: usize,
    /// 장기 이동평균 윈도우
    pub long_ma_window: usize,
}

impl Default for FactorParams {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            vol_window: 60,
            short_ma_window: 20,
            long_ma_window: 60,
        }
    }
}

impl FactorParams {
    /// 충분성 검사에 필요한 최소 관측치 수.
    ///
    /// `max(long_ma_window, vol_window) + HISTORY_MARGIN`
    pub fn min_history(&self) -> usize {
        self.long_ma_window.max(self.vol_window) + HISTORY_MARGIN
    }
}

/// 종목 하나의 팩터 계산 결과.
///
/// 생성 후 변경되지 않습니다. 모멘텀/변동성이 정의되지 않은 종목은
/// 레코드 대신 `RejectionEntry`가 됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRecord {
    /// 종목 심볼
    pub symbol: Symbol,
    /// 최신 종가
    pub latest_price: f64,
    /// 모멘텀 (lookback 기간 수익률)
    pub momentum: f64,
    /// 일간 수익률의 롤링 표준편차
    pub volatility: f64,
    /// 단기 이동평균
    pub ma_short: f64,
    /// 장기 이동평균
    pub ma_long: f64,
    /// 단기 이평 > 장기 이평 (최신 시점 위치)
    pub golden_cross: bool,
}
