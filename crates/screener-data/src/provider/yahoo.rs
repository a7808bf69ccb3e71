//! Yahoo Finance 종가 시계열 공급자.
//!
//! 심볼은 Yahoo Finance 형식이어야 합니다:
//! - 한국 주식: "005930.KS" (코스피) 또는 "124560.KQ" (코스닥)
//! - 해외 주식: "AAPL"
//!
//! 수정 종가(`adjclose`)가 유효하면 우선 사용하고, 아니면 종가(`close`)를 사용합니다.
//! 거래일은 Unix timestamp를 Asia/Seoul 기준 날짜로 변환하여 결정합니다.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Seoul;
use tracing::{debug, instrument, warn};
use yahoo_finance_api as yahoo;

use screener_core::{Interval, Period, PricePoint, PriceSeries, Symbol};

use super::PriceHistoryProvider;
use crate::error::{DataError, Result};

/// Yahoo Finance 종가 시계열 공급자.
pub struct YahooPriceProvider {
    connector: yahoo::YahooConnector,
}

impl YahooPriceProvider {
    /// 새로운 Yahoo Finance 공급자 생성.
    pub fn new() -> Result<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| DataError::FetchError(format!("Yahoo Finance 연결 실패: {}", e)))?;

        Ok(Self { connector })
    }
}

/// Unix timestamp를 서울 기준 거래일로 변환합니다.
pub(crate) fn trading_date(timestamp: i64) -> Option<NaiveDate> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.with_timezone(&Seoul).date_naive())
}

/// 종가 선택: 양수이고 유한한 수정 종가 → 종가 → 결측.
pub(crate) fn select_close(close: f64, adjclose: f64) -> Option<f64> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(adjclose) {
        Some(adjclose)
    } else if valid(close) {
        Some(close)
    } else {
        None
    }
}

/// (timestamp, close, adjclose) 목록을 관측치로 변환합니다.
///
/// 같은 거래일이 여러 번 나오면 (장중 실시간 봉 등) 마지막 값을 사용합니다.
pub(crate) fn to_price_points<I>(rows: I) -> Vec<PricePoint>
where
    I: IntoIterator<Item = (i64, f64, f64)>,
{
    let mut by_date: BTreeMap<NaiveDate, Option<f64>> = BTreeMap::new();
    for (timestamp, close, adjclose) in rows {
        if let Some(date) = trading_date(timestamp) {
            by_date.insert(date, select_close(close, adjclose));
        }
    }

    by_date
        .into_iter()
        .map(|(date, close)| PricePoint { date, close })
        .collect()
}

fn map_yahoo_error(symbol: &Symbol, err: impl std::fmt::Display) -> DataError {
    let message = err.to_string();
    if message.contains("429") || message.to_lowercase().contains("too many requests") {
        DataError::RateLimited
    } else {
        DataError::FetchError(format!("Yahoo Finance API 오류 ({}): {}", symbol, message))
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooPriceProvider {
    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn fetch_history(
        &self,
        symbol: &Symbol,
        period: Period,
        interval: Interval,
    ) -> Result<PriceSeries> {
        let response = self
            .connector
            .get_quote_range(symbol.as_str(), interval.as_str(), period.as_str())
            .await
            .map_err(|e| map_yahoo_error(symbol, e))?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::NotFound(format!("{}: {}", symbol, e)))?;

        if quotes.is_empty() {
            warn!("Yahoo Finance: {} 데이터 없음", symbol);
            return Err(DataError::NotFound(symbol.to_string()));
        }

        debug!("Yahoo Finance: {} 캔들 {} 개 수신", symbol, quotes.len());

        let points = to_price_points(
            quotes
                .iter()
                .map(|q| (q.timestamp as i64, q.close, q.adjclose)),
        );

        PriceSeries::new(symbol.clone(), points).map_err(|e| DataError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-02 00:00:00 UTC = 2024-01-02 09:00 KST
    const JAN_2_UTC: i64 = 1_704_153_600;
    const DAY: i64 = 86_400;

    #[test]
    fn test_trading_date_uses_seoul_time() {
        assert_eq!(
            trading_date(JAN_2_UTC),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
        // 2024-01-02 16:00 UTC는 서울 기준 1월 3일
        assert_eq!(
            trading_date(JAN_2_UTC + 16 * 3600),
            NaiveDate::from_ymd_opt(2024, 1, 3)
        );
    }

    #[test]
    fn test_select_close_prefers_adjusted() {
        assert_eq!(select_close(100.0, 98.5), Some(98.5));
        assert_eq!(select_close(100.0, 0.0), Some(100.0));
        assert_eq!(select_close(100.0, f64::NAN), Some(100.0));
        assert_eq!(select_close(-1.0, f64::NAN), None);
    }

    #[test]
    fn test_to_price_points_dedupes_dates() {
        let points = to_price_points(vec![
            (JAN_2_UTC + DAY, 110.0, 110.0),
            (JAN_2_UTC, 100.0, 100.0),
            (JAN_2_UTC + DAY + 3600, 111.0, 111.0),
            (JAN_2_UTC + 2 * DAY, f64::NAN, f64::NAN),
        ]);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].close, Some(100.0));
        assert_eq!(points[1].close, Some(111.0));
        assert_eq!(points[2].close, None);
    }
}
