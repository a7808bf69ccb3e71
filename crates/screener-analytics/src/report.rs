//! 스크리닝 결과 리포트.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use screener_core::{
    FactorParams, Interval, Period, PricePoint, PriceSeries, RankedEntry, RejectionEntry,
    ScoreWeights, Symbol,
};

use crate::universe::UniverseStats;

/// 리포트를 만든 실행 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportParams {
    pub top_n: usize,
    pub factor: FactorParams,
    pub weights: ScoreWeights,
    pub period: Period,
    pub interval: Interval,
}

/// 한 번의 스크리닝 실행 결과.
///
/// 유니버스의 모든 종목은 `ranked` 또는 `rejections` 중 정확히 한 곳에 나타납니다.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    /// 유니버스 구성 통계
    pub universe: UniverseStats,
    /// 상위 N개
    pub leaderboard: Vec<RankedEntry>,
    /// 전체 순위
    pub ranked: Vec<RankedEntry>,
    /// 제외 목록
    pub rejections: Vec<RejectionEntry>,
    /// 생성 시각
    pub generated_at: DateTime<Utc>,
    /// 실행 파라미터
    pub params: ReportParams,
    #[serde(skip)]
    pub(crate) series: HashMap<Symbol, PriceSeries>,
    #[serde(skip)]
    pub(crate) universe_symbols: Vec<Symbol>,
}

/// 종목 상세 조회 결과.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolDetail {
    /// 순위 항목
    pub entry: RankedEntry,
    /// 전체 순위 중 위치 (1-based)
    pub position: usize,
    /// 사용 가능 종목 수
    pub universe_size: usize,
    /// 단기/장기 이평 윈도우
    pub short_ma_window: usize,
    pub long_ma_window: usize,
    /// 계산에 사용한 종가 (결측 제외)
    pub history: Vec<PricePoint>,
}

impl SymbolDetail {
    /// 마지막 `n`개 종가.
    pub fn recent(&self, n: usize) -> &[PricePoint] {
        let skip = self.history.len().saturating_sub(n);
        &self.history[skip..]
    }
}

impl ScreeningReport {
    /// 순위에 포함된 종목 수.
    pub fn usable_count(&self) -> usize {
        self.ranked.len()
    }

    /// 제외된 종목 수.
    pub fn rejected_count(&self) -> usize {
        self.rejections.len()
    }

    /// 순위 항목 조회. 원시 티커(`005930`)도 정규화하여 찾습니다.
    pub fn entry(&self, raw: &str) -> Option<&RankedEntry> {
        let symbol = Symbol::new(raw)?;
        self.ranked.iter().find(|e| e.symbol() == &symbol)
    }

    /// 제외 항목 조회.
    pub fn rejection(&self, raw: &str) -> Option<&RejectionEntry> {
        let symbol = Symbol::new(raw)?;
        self.rejections.iter().find(|r| r.symbol == symbol)
    }

    /// 사용 가능 종목의 상세 정보.
    pub fn detail(&self, raw: &str) -> Option<SymbolDetail> {
        let symbol = Symbol::new(raw)?;
        let position = self.ranked.iter().position(|e| e.symbol() == &symbol)?;
        let history = self
            .series
            .get(&symbol)
            .map(|s| s.tail(s.len()))
            .unwrap_or_default();

        Some(SymbolDetail {
            entry: self.ranked[position].clone(),
            position: position + 1,
            universe_size: self.ranked.len(),
            short_ma_window: self.params.factor.short_ma_window,
            long_ma_window: self.params.factor.long_ma_window,
            history,
        })
    }

    /// 유니버스의 모든 종목이 순위/제외 중 정확히 한 곳에 있는지 확인합니다.
    pub fn is_partitioned(&self) -> bool {
        let mut seen = HashSet::new();
        let all_unique = self
            .ranked
            .iter()
            .map(|e| e.symbol())
            .chain(self.rejections.iter().map(|r| &r.symbol))
            .all(|s| seen.insert(s));

        let universe: HashSet<&Symbol> = self.universe_symbols.iter().collect();
        all_unique && seen == universe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_core::{FactorRecord, RejectionReason};

    fn sym(code: &str) -> Symbol {
        Symbol::new(code).unwrap()
    }

    fn entry(code: &str) -> RankedEntry {
        RankedEntry {
            record: FactorRecord {
                symbol: sym(code),
                latest_price: 10_000.0,
                momentum: 0.1,
                volatility: 0.02,
                ma_short: 10_000.0,
                ma_long: 9_900.0,
                golden_cross: true,
            },
            momentum_rank: 1,
            volatility_rank: 1,
            score: 1.0,
        }
    }

    fn report(universe: &[&str], ranked: &[&str], rejected: &[&str]) -> ScreeningReport {
        let ranked: Vec<RankedEntry> = ranked.iter().map(|c| entry(c)).collect();
        ScreeningReport {
            universe: UniverseStats {
                requested: universe.len(),
                unique: universe.len(),
                used: universe.len(),
            },
            leaderboard: ranked.clone(),
            ranked,
            rejections: rejected
                .iter()
                .map(|c| RejectionEntry::new(sym(c), RejectionReason::NoData))
                .collect(),
            generated_at: Utc::now(),
            params: ReportParams {
                top_n: 10,
                factor: FactorParams::default(),
                weights: ScoreWeights::default(),
                period: Period::default(),
                interval: Interval::default(),
            },
            series: HashMap::new(),
            universe_symbols: universe.iter().map(|c| sym(c)).collect(),
        }
    }

    #[test]
    fn test_partition_matches_universe_symbols() {
        assert!(report(&["005930", "000660"], &["005930"], &["000660"]).is_partitioned());

        // 개수는 같지만 유니버스 밖의 종목이 섞인 경우
        assert!(!report(&["005930", "000660"], &["005930"], &["035420"]).is_partitioned());
        // 누락
        assert!(!report(&["005930", "000660"], &["005930"], &[]).is_partitioned());
        // 중복
        assert!(!report(&["005930"], &["005930"], &["005930"]).is_partitioned());
    }
}
