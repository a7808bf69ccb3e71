//! 캐싱 레이어.
//!
//! - History 캐시: 종목별 종가 시계열 (TTL)
//! - Components 캐시: 지수 구성 종목 목록 (TTL)
//!
//! 만료된 항목은 다시 조회하는 것 외의 신선도 판단은 하지 않습니다.

pub mod components;
pub mod history;

use serde::Serialize;

pub use components::CachedComponentLister;
pub use history::CachedPriceHistoryProvider;

/// 캐시 통계.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// 보관 중인 항목 수 (만료 포함)
    pub entries: usize,
    /// 캐시 적중 수
    pub hits: u64,
    /// 캐시 미스 수
    pub misses: u64,
}
