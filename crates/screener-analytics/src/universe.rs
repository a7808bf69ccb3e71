//! 종목 유니버스 구성.
//!
//! 원시 티커 → 정규화 → 빈 값 제거 → 중복 제거(최초 등장 순서 유지) → 크기 상한 적용.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use screener_core::{ScreenerError, ScreenerResult, Symbol};

/// 유니버스 구성 통계 ("요청 vs 사용" 표시용).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseStats {
    /// 입력된 원시 티커 수
    pub requested: usize,
    /// 정규화/중복 제거 후 종목 수
    pub unique: usize,
    /// 상한 적용 후 실제 사용 종목 수
    pub used: usize,
}

impl UniverseStats {
    /// 상한 때문에 잘려나간 종목 수.
    pub fn truncated(&self) -> usize {
        self.unique - self.used
    }
}

/// 정규화된 종목 유니버스.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    /// 순서가 보존된 고유 심볼 목록
    pub symbols: Vec<Symbol>,
    /// 구성 통계
    pub stats: UniverseStats,
}

/// 원시 티커 목록으로 유니버스를 구성합니다.
///
/// 정규화 후 남은 종목이 없으면 `ScreenerError::InvalidUniverse`를 반환합니다.
/// `max_universe_size`는 1 이상이어야 합니다 (`ScreeningConfig::validate`에서 검사).
pub fn build_universe<S: AsRef<str>>(
    raw: &[S],
    max_universe_size: usize,
) -> ScreenerResult<Universe> {
    let mut seen = HashSet::new();
    let symbols: Vec<Symbol> = raw
        .iter()
        .filter_map(|t| Symbol::new(t.as_ref()))
        .filter(|s| seen.insert(s.clone()))
        .collect();

    let unique = symbols.len();
    if unique == 0 {
        return Err(ScreenerError::InvalidUniverse(format!(
            "입력 {}개 중 유효한 티커가 없습니다",
            raw.len()
        )));
    }

    let symbols: Vec<Symbol> = symbols.into_iter().take(max_universe_size).collect();
    let stats = UniverseStats {
        requested: raw.len(),
        unique,
        used: symbols.len(),
    };

    if stats.truncated() > 0 {
        warn!(
            limit = max_universe_size,
            dropped = stats.truncated(),
            "유니버스 크기 상한 초과, 초과분 제외"
        );
    }

    info!(
        requested = stats.requested,
        unique = stats.unique,
        used = stats.used,
        "유니버스 구성"
    );

    Ok(Universe { symbols, stats })
}
