//! 캐시 기반 구성 종목 수집기.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::provider::ComponentLister;

/// TTL 캐시를 씌운 구성 종목 수집기.
///
/// 빈 목록은 캐시하지 않습니다.
pub struct CachedComponentLister<L> {
    inner: L,
    ttl: Duration,
    cached: RwLock<Option<(Vec<String>, Instant)>>,
}

impl<L: ComponentLister> CachedComponentLister<L> {
    pub fn new(inner: L, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: RwLock::new(None),
        }
    }

    /// 캐시 삭제.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}

#[async_trait]
impl<L: ComponentLister> ComponentLister for CachedComponentLister<L> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn list_components(&self) -> Vec<String> {
        if let Some((tickers, fetched_at)) = self.cached.read().await.as_ref() {
            if fetched_at.elapsed() < self.ttl {
                debug!(lister = self.inner.name(), "구성 종목 캐시 적중");
                return tickers.clone();
            }
        }

        let tickers = self.inner.list_components().await;
        if !tickers.is_empty() {
            *self.cached.write().await = Some((tickers.clone(), Instant::now()));
        }
        tickers
    }
}
