//! 종목별 팩터 계산.
//!
//! 순수 함수이며 공유 상태가 없습니다. 종목 단위 실패는 `RejectionEntry`로
//! 분류되고 실행 전체를 중단시키지 않습니다.
//!
//! # 분류 규칙
//!
//! | 조건 | 결과 |
//! |------|------|
//! | 공급자가 데이터를 주지 않음 / 빈 시계열 | `no_data` |
//! | 유효 관측치 < `max(long_ma, vol_window) + 5` | `insufficient_history` |
//! | 관측치 ≤ `lookback_days` (모멘텀 미정의) | `insufficient_history` |
//! | 공급자 오류, 심볼 불일치, 유한하지 않은 팩터 값 | `provider_error` |

use screener_core::{
    FactorParams, FactorRecord, PriceSeries, RejectionEntry, RejectionReason, Symbol,
};
use screener_data::DataError;

use crate::indicators::{momentum, pct_change, rolling_mean_last, rolling_std_last};

/// 팩터 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum FactorOutcome {
    /// 순위 산정 대상
    Usable(FactorRecord),
    /// 제외
    Rejected(RejectionEntry),
}

/// 팩터 계산기.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactorEngine {
    params: FactorParams,
}

impl FactorEngine {
    pub fn new(params: FactorParams) -> Self {
        Self { params }
    }

    /// 공급자 조회 결과를 분류합니다.
    pub fn classify(
        &self,
        symbol: &Symbol,
        result: Result<PriceSeries, DataError>,
    ) -> FactorOutcome {
        match result {
            Ok(series) if &series.symbol != symbol => FactorOutcome::Rejected(
                RejectionEntry::new(symbol.clone(), RejectionReason::ProviderError).with_detail(
                    format!("요청 {}, 수신 {}", symbol, series.symbol),
                ),
            ),
            Ok(series) => self.compute(&series),
            Err(e) if e.is_no_data() => FactorOutcome::Rejected(
                RejectionEntry::new(symbol.clone(), RejectionReason::NoData)
                    .with_detail(e.to_string()),
            ),
            Err(e) => FactorOutcome::Rejected(
                RejectionEntry::new(symbol.clone(), RejectionReason::ProviderError)
                    .with_detail(e.to_string()),
            ),
        }
    }

    /// 한 종목의 종가 시계열로 팩터를 계산합니다.
    pub fn compute(&self, series: &PriceSeries) -> FactorOutcome {
        let symbol = &series.symbol;
        let reject = |reason: RejectionReason, detail: String| {
            FactorOutcome::Rejected(RejectionEntry::new(symbol.clone(), reason).with_detail(detail))
        };

        let closes = series.closes();
        if closes.is_empty() {
            return reject(RejectionReason::NoData, "유효한 종가 없음".to_string());
        }

        let required = self.params.min_history();
        if closes.len() < required {
            return reject(
                RejectionReason::InsufficientHistory,
                format!("관측치 {}개 < 필요 {}개", closes.len(), required),
            );
        }

        let Some(momentum) = momentum(&closes, self.params.lookback_days) else {
            if closes.len() <= self.params.lookback_days {
                return reject(
                    RejectionReason::InsufficientHistory,
                    format!(
                        "모멘텀 기간 {}일에 관측치 {}개",
                        self.params.lookback_days,
                        closes.len()
                    ),
                );
            }
            return reject(
                RejectionReason::ProviderError,
                "모멘텀 값이 유한하지 않음".to_string(),
            );
        };

        let returns = pct_change(&closes);
        let volatility = rolling_std_last(&returns, self.params.vol_window);
        let ma_short = rolling_mean_last(&closes, self.params.short_ma_window);
        let ma_long = rolling_mean_last(&closes, self.params.long_ma_window);

        let (Some(volatility), Some(ma_short), Some(ma_long)) = (volatility, ma_short, ma_long)
        else {
            return reject(
                RejectionReason::InsufficientHistory,
                "롤링 윈도우를 채울 관측치 부족".to_string(),
            );
        };

        let latest_price = closes[closes.len() - 1];
        if ![latest_price, volatility, ma_short, ma_long]
            .iter()
            .all(|v| v.is_finite())
        {
            return reject(
                RejectionReason::ProviderError,
                "팩터 값이 유한하지 않음".to_string(),
            );
        }

        FactorOutcome::Usable(FactorRecord {
            symbol: symbol.clone(),
            latest_price,
            momentum,
            volatility,
            ma_short,
            ma_long,
            golden_cross: ma_short > ma_long,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use screener_core::PricePoint;

    fn params() -> FactorParams {
        FactorParams {
            lookback_days: 10,
            vol_window: 20,
            short_ma_window: 5,
            long_ma_window: 20,
        }
    }

    fn series(code: &str, closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, c)| PricePoint::new(start + Duration::days(i as i64), *c))
            .collect();
        PriceSeries::new(Symbol::new(code).unwrap(), points).unwrap()
    }

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn test_boundary_length_is_usable() {
        let engine = FactorEngine::new(params());
        // min_history = max(20, 20) + 5 = 25
        let outcome = engine.compute(&series("005930", &rising(25)));

        let FactorOutcome::Usable(record) = outcome else {
            panic!("expected usable, got {:?}", outcome);
        };
        assert_eq!(record.latest_price, 124.0);
        assert!((record.momentum - (124.0 / 114.0 - 1.0)).abs() < 1e-12);
        assert!(record.golden_cross);
        assert!(record.volatility >= 0.0);
    }

    #[test]
    fn test_one_short_of_boundary_rejected() {
        let engine = FactorEngine::new(params());
        let outcome = engine.compute(&series("005930", &rising(24)));

        let FactorOutcome::Rejected(rejection) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(rejection.reason, RejectionReason::InsufficientHistory);
    }

    #[test]
    fn test_momentum_longer_than_history_rejected() {
        let engine = FactorEngine::new(FactorParams {
            lookback_days: 40,
            ..params()
        });
        let outcome = engine.compute(&series("005930", &rising(30)));

        match outcome {
            FactorOutcome::Rejected(r) => {
                assert_eq!(r.reason, RejectionReason::InsufficientHistory)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_values_dropped_before_counting() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut points: Vec<PricePoint> = rising(25)
            .into_iter()
            .enumerate()
            .map(|(i, c)| PricePoint::new(start + Duration::days(i as i64), c))
            .collect();
        points[3] = PricePoint::missing(points[3].date);

        let series = PriceSeries::new(Symbol::new("005930").unwrap(), points).unwrap();
        let outcome = FactorEngine::new(params()).compute(&series);
        assert!(matches!(outcome, FactorOutcome::Rejected(_)));
    }

    #[test]
    fn test_falling_series_has_no_golden_cross() {
        let closes: Vec<f64> = (0..30).map(|i| 200.0 - i as f64).collect();
        let outcome = FactorEngine::new(params()).compute(&series("000660", &closes));

        let FactorOutcome::Usable(record) = outcome else {
            panic!("expected usable");
        };
        assert!(!record.golden_cross);
        assert!(record.momentum < 0.0);
    }

    #[test]
    fn test_classify_provider_results() {
        let engine = FactorEngine::new(params());
        let symbol = Symbol::new("005930").unwrap();

        let no_data = engine.classify(&symbol, Err(DataError::NotFound("x".to_string())));
        let failed = engine.classify(&symbol, Err(DataError::FetchError("timeout".to_string())));
        let empty = engine.classify(&symbol, Ok(PriceSeries::empty(symbol.clone())));
        let mismatch = engine.classify(&symbol, Ok(series("000660", &rising(25))));

        let reason = |o: FactorOutcome| match o {
            FactorOutcome::Rejected(r) => r.reason,
            FactorOutcome::Usable(_) => panic!("expected rejection"),
        };
        assert_eq!(reason(no_data), RejectionReason::NoData);
        assert_eq!(reason(failed), RejectionReason::ProviderError);
        assert_eq!(reason(empty), RejectionReason::NoData);
        assert_eq!(reason(mismatch), RejectionReason::ProviderError);
    }
}
