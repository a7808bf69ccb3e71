//! 일괄 조회 순서/동시성/취소 통합 테스트.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use screener_core::{Interval, Period, PricePoint, PriceSeries, ScreenerError, Symbol};
use screener_data::{fetch_all, DataError, FetchOptions, PriceHistoryProvider};
use tokio_util::sync::CancellationToken;

/// 심볼 코드에 비례해 지연되는 공급자. 동시 실행 수 최대치를 기록합니다.
#[derive(Default)]
struct SlowProvider {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[async_trait]
impl PriceHistoryProvider for SlowProvider {
    async fn fetch_history(
        &self,
        symbol: &Symbol,
        _period: Period,
        _interval: Interval,
    ) -> screener_data::Result<PriceSeries> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let code: u64 = symbol.code().parse().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(100 - code % 100)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if code % 2 == 1 {
            return Err(DataError::FetchError("boom".to_string()));
        }
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        PriceSeries::new(symbol.clone(), vec![PricePoint::new(date, code as f64 + 1.0)])
            .map_err(|e| DataError::ParseError(e.to_string()))
    }
}

fn symbols(n: usize) -> Vec<Symbol> {
    (0..n)
        .map(|i| Symbol::new(&format!("{:06}", i * 7)).unwrap())
        .collect()
}

fn options(max_concurrency: usize) -> FetchOptions {
    FetchOptions {
        max_concurrency,
        ..FetchOptions::default()
    }
}

#[tokio::test(start_paused = true)]
async fn results_follow_input_order() {
    let provider = SlowProvider::default();
    let input = symbols(12);

    let results = fetch_all(&provider, &input, options(4), &CancellationToken::new())
        .await
        .unwrap();

    let order: Vec<Symbol> = results.iter().map(|(s, _)| s.clone()).collect();
    assert_eq!(order, input);
    assert!(results[0].1.is_ok());
    assert!(results[1].1.is_err());
}

#[tokio::test(start_paused = true)]
async fn concurrency_is_bounded() {
    let provider = SlowProvider::default();
    fetch_all(&provider, &symbols(20), options(3), &CancellationToken::new())
        .await
        .unwrap();

    let max = provider.max_in_flight.load(Ordering::SeqCst);
    assert!(max <= 3, "max in flight = {}", max);
    assert!(max >= 2);
}

#[tokio::test(start_paused = true)]
async fn zero_concurrency_treated_as_one() {
    let provider = SlowProvider::default();
    let results = fetch_all(&provider, &symbols(3), options(0), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(provider.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cancelled_before_start() {
    let provider = SlowProvider::default();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = fetch_all(&provider, &symbols(3), options(2), &cancel).await;
    assert!(matches!(result, Err(ScreenerError::Cancelled)));
    assert_eq!(provider.max_in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn cancelled_mid_flight_discards_results() {
    let provider = SlowProvider::default();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let result = fetch_all(&provider, &symbols(40), options(2), &cancel).await;
    assert!(matches!(result, Err(ScreenerError::Cancelled)));
}
