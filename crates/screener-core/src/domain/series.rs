//! 종가 시계열.
//!
//! 한 종목의 (날짜, 종가) 쌍을 날짜 오름차순으로 보관합니다.
//! 요청 단위로만 소유되며 코어에서 영속화하지 않습니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ScreenerError, ScreenerResult};
use crate::types::Symbol;

/// 단일 관측치.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 거래일
    pub date: NaiveDate,
    /// 종가 (결측이면 `None`)
    pub close: Option<f64>,
}

impl PricePoint {
    /// 새 관측치를 생성합니다.
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close: Some(close),
        }
    }

    /// 결측 관측치를 생성합니다.
    pub fn missing(date: NaiveDate) -> Self {
        Self { date, close: None }
    }
}

/// 종목 하나의 종가 시계열.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// 종목 심볼
    pub symbol: Symbol,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// 관측치 목록으로 시계열을 생성합니다.
    ///
    /// 날짜 오름차순으로 정렬하며, 같은 날짜가 두 번 나오면 에러를 반환합니다.
    pub fn new(symbol: Symbol, mut points: Vec<PricePoint>) -> ScreenerResult<Self> {
        points.sort_by_key(|p| p.date);

        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(ScreenerError::InvalidInput(format!(
                "{}: 중복 날짜 {}",
                symbol, pair[0].date
            )));
        }

        Ok(Self { symbol, points })
    }

    /// 빈 시계열.
    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            points: Vec::new(),
        }
    }

    /// 전체 관측치 (결측 포함).
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// 관측치 수 (결측 포함).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 결측과 유한하지 않은 값을 제거한 종가 목록.
    pub fn closes(&self) -> Vec<f64> {
        self.points
            .iter()
            .filter_map(|p| p.close)
            .filter(|c| c.is_finite())
            .collect()
    }

    /// 결측을 제거한 마지막 `n`개 관측치.
    pub fn tail(&self, n: usize) -> Vec<PricePoint> {
        let valid: Vec<PricePoint> = self
            .points
            .iter()
            .filter(|p| p.close.is_some_and(f64::is_finite))
            .copied()
            .collect();
        let skip = valid.len().saturating_sub(n);
        valid.into_iter().skip(skip).collect()
    }
}
