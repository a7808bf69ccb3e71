//! 캐시 기반 종가 시계열 공급자.
//!
//! `(symbol, period, interval)` 단위로 성공한 조회 결과만 보관합니다.
//! 종목 집합 단위 조회는 종목별 항목으로 나뉘어 저장되므로
//! 겹치는 유니버스끼리 항목을 공유합니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, instrument};

use screener_core::{Interval, Period, PriceSeries, Symbol};

use super::CacheStats;
use crate::error::Result;
use crate::provider::PriceHistoryProvider;

type CacheKey = (Symbol, Period, Interval);

struct CacheEntry {
    series: PriceSeries,
    fetched_at: Instant,
}

/// TTL 캐시를 씌운 종가 시계열 공급자.
pub struct CachedPriceHistoryProvider<P> {
    inner: P,
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<P: PriceHistoryProvider> CachedPriceHistoryProvider<P> {
    /// 새로운 캐시 공급자 생성.
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// 전체 캐시 삭제.
    pub async fn invalidate(&self) {
        let mut entries = self.entries.write().await;
        let cleared = entries.len();
        entries.clear();
        debug!(cleared, "시세 캐시 초기화");
    }

    /// 만료된 항목 삭제. 삭제된 항목 수를 반환합니다.
    pub async fn purge_expired(&self) -> usize {
        let ttl = self.ttl;
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.fetched_at.elapsed() < ttl);
        before - entries.len()
    }

    /// 캐시 통계.
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.read().await.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    async fn lookup(&self, key: &CacheKey) -> Option<PriceSeries> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.series.clone())
    }
}

#[async_trait]
impl<P: PriceHistoryProvider> PriceHistoryProvider for CachedPriceHistoryProvider<P> {
    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn fetch_history(
        &self,
        symbol: &Symbol,
        period: Period,
        interval: Interval,
    ) -> Result<PriceSeries> {
        let key = (symbol.clone(), period, interval);

        if let Some(series) = self.lookup(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("캐시 적중");
            return Ok(series);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let series = self.inner.fetch_history(symbol, period, interval).await?;

        self.entries.write().await.insert(
            key,
            CacheEntry {
                series: series.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(series)
    }
}
