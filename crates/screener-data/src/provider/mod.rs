//! 데이터 Provider 모듈.
//!
//! ## 종가 시계열
//! - `PriceHistoryProvider`: 종목별 종가 시계열 조회 trait
//! - `YahooPriceProvider`: Yahoo Finance 구현
//!
//! ## 구성 종목
//! - `ComponentLister`: 지수 구성 종목 수집 trait (best effort)
//! - `NaverComponentLister`: 네이버 금융 KOSPI200 편입 종목 크롤러
//! - `StaticComponentLister`: 고정 목록
//!
//! ## 파일
//! - `load_ticker_file`: CSV/TXT 티커 목록 로더

pub mod file;
pub mod naver;
pub mod yahoo;

use std::sync::Arc;

use async_trait::async_trait;
use screener_core::{Interval, Period, PriceSeries, Symbol};

use crate::error::Result;

pub use file::{load_ticker_file, parse_ticker_list};
pub use naver::NaverComponentLister;
pub use yahoo::YahooPriceProvider;

/// 종가 시계열 공급자 trait.
///
/// 조회 타임아웃과 재시도는 구현체의 책임입니다.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// 한 종목의 종가 시계열 조회.
    ///
    /// # 인자
    /// * `symbol` - 정규화된 심볼 (예: "005930.KS")
    /// * `period` - 조회 기간
    /// * `interval` - 캔들 간격
    async fn fetch_history(
        &self,
        symbol: &Symbol,
        period: Period,
        interval: Interval,
    ) -> Result<PriceSeries>;

    /// 여러 종목을 순차 조회합니다. 결과는 입력 순서를 따릅니다.
    async fn fetch_many(
        &self,
        symbols: &[Symbol],
        period: Period,
        interval: Interval,
    ) -> Vec<(Symbol, Result<PriceSeries>)> {
        let mut results = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let result = self.fetch_history(symbol, period, interval).await;
            results.push((symbol.clone(), result));
        }
        results
    }
}

#[async_trait]
impl<P: PriceHistoryProvider + ?Sized> PriceHistoryProvider for Arc<P> {
    async fn fetch_history(
        &self,
        symbol: &Symbol,
        period: Period,
        interval: Interval,
    ) -> Result<PriceSeries> {
        (**self).fetch_history(symbol, period, interval).await
    }
}

/// 지수 구성 종목 수집 trait.
///
/// 실패하지 않습니다. 빈 목록은 "찾지 못함"을 뜻합니다.
#[async_trait]
pub trait ComponentLister: Send + Sync {
    /// 수집기 이름 (로그용).
    fn name(&self) -> &str;

    /// 구성 종목 원시 티커 목록.
    async fn list_components(&self) -> Vec<String>;
}

#[async_trait]
impl<L: ComponentLister + ?Sized> ComponentLister for Arc<L> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn list_components(&self) -> Vec<String> {
        (**self).list_components().await
    }
}

/// 고정 목록을 돌려주는 수집기 (오프라인/테스트용).
#[derive(Debug, Clone, Default)]
pub struct StaticComponentLister {
    tickers: Vec<String>,
}

impl StaticComponentLister {
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tickers: tickers.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ComponentLister for StaticComponentLister {
    fn name(&self) -> &str {
        "static"
    }

    async fn list_components(&self) -> Vec<String> {
        self.tickers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use chrono::NaiveDate;
    use screener_core::PricePoint;

    struct OneDayProvider;

    #[async_trait]
    impl PriceHistoryProvider for OneDayProvider {
        async fn fetch_history(
            &self,
            symbol: &Symbol,
            _period: Period,
            _interval: Interval,
        ) -> Result<PriceSeries> {
            if symbol.code() == "000000" {
                return Err(DataError::NotFound(symbol.to_string()));
            }
            let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
            PriceSeries::new(symbol.clone(), vec![PricePoint::new(date, 100.0)])
                .map_err(|e| DataError::ParseError(e.to_string()))
        }
    }

    #[tokio::test]
    async fn test_fetch_many_keeps_input_order() {
        let symbols = vec![
            Symbol::new("000660").unwrap(),
            Symbol::new("000000").unwrap(),
            Symbol::new("005930").unwrap(),
        ];
        let provider = Arc::new(OneDayProvider);
        let results = provider
            .fetch_many(&symbols, Period::OneYear, Interval::Daily)
            .await;

        let order: Vec<&str> = results.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(order, vec!["000660.KS", "000000.KS", "005930.KS"]);
        assert!(results[1].1.is_err());
    }

    #[tokio::test]
    async fn test_static_lister() {
        let lister = StaticComponentLister::new(["005930", "000660"]);
        assert_eq!(lister.list_components().await, vec!["005930", "000660"]);
        assert_eq!(lister.name(), "static");
    }
}
