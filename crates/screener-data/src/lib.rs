//! 시세 데이터 수집.
//!
//! 이 crate는 다음을 제공합니다:
//! - 종가 시계열 공급자 (Yahoo Finance)
//! - KOSPI200 구성 종목 수집 (네이버 금융)
//! - 티커 목록 파일 로더
//! - TTL 기반 인메모리 캐시
//! - 동시성 상한이 있는 일괄 조회

pub mod cache;
pub mod error;
pub mod fetch;
pub mod provider;

pub use cache::{CacheStats, CachedComponentLister, CachedPriceHistoryProvider};
pub use error::{DataError, Result};
pub use fetch::{fetch_all, FetchOptions, FetchResult};
pub use provider::{
    load_ticker_file, parse_ticker_list, ComponentLister, NaverComponentLister,
    PriceHistoryProvider, StaticComponentLister, YahooPriceProvider,
};
