//! 순위 기반 합성 점수.
//!
//! # 알고리즘
//!
//! 1. 모멘텀 내림차순 순위 (1 = 최고 모멘텀)
//! 2. 변동성 오름차순 순위 (1 = 최저 변동성)
//! 3. 순위 → goodness: `(N - rank) / N`
//! 4. `score = w_mom * mom_goodness + w_vol * vol_goodness + w_gc * golden_cross`
//! 5. 점수 내림차순 정렬, 동점은 입력 순서 유지
//!
//! 동일한 값은 같은 순위(가장 낮은 순위)를 공유하고 다음 순위는 건너뜁니다
//! (0.10, 0.10, 0.05 → 1, 1, 3).

use std::cmp::Ordering;

use tracing::debug;

use screener_core::{FactorRecord, RankedEntry, ScoreWeights, ScreenerError, ScreenerResult};

/// 합성 점수 계산기.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAggregator {
    weights: ScoreWeights,
}

impl ScoreAggregator {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// 전체 순위를 계산합니다 (잘라내지 않음).
    ///
    /// 입력이 비어 있으면 `ScreenerError::EmptyUniverse`를 반환합니다.
    pub fn aggregate(&self, records: &[FactorRecord]) -> ScreenerResult<Vec<RankedEntry>> {
        if records.is_empty() {
            return Err(ScreenerError::EmptyUniverse { rejected: 0 });
        }

        if let Some(bad) = records
            .iter()
            .find(|r| !r.momentum.is_finite() || !r.volatility.is_finite())
        {
            return Err(ScreenerError::InvalidInput(format!(
                "{}: 모멘텀/변동성이 정의되지 않은 레코드",
                bad.symbol
            )));
        }

        let n = records.len() as f64;
        let momenta: Vec<f64> = records.iter().map(|r| r.momentum).collect();
        let volatilities: Vec<f64> = records.iter().map(|r| r.volatility).collect();

        let momentum_ranks = competition_ranks(&momenta, |a, b| b.total_cmp(a));
        let volatility_ranks = competition_ranks(&volatilities, |a, b| a.total_cmp(b));

        let mut entries: Vec<RankedEntry> = records
            .iter()
            .zip(momentum_ranks.into_iter().zip(volatility_ranks))
            .map(|(record, (momentum_rank, volatility_rank))| {
                let momentum_goodness = (n - momentum_rank as f64) / n;
                let volatility_goodness = (n - volatility_rank as f64) / n;
                let golden = if record.golden_cross { 1.0 } else { 0.0 };

                let score = self.weights.momentum * momentum_goodness
                    + self.weights.volatility * volatility_goodness
                    + self.weights.golden_cross * golden;

                RankedEntry {
                    record: record.clone(),
                    momentum_rank,
                    volatility_rank,
                    score,
                }
            })
            .collect();

        // sort_by는 안정 정렬이므로 동점은 입력 순서를 유지한다
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!(count = entries.len(), "점수 합성 완료");
        Ok(entries)
    }

    /// 상위 `top_n`개만 반환합니다. `top_n`이 전체보다 크면 전체를 반환합니다.
    pub fn leaderboard(
        &self,
        records: &[FactorRecord],
        top_n: usize,
    ) -> ScreenerResult<Vec<RankedEntry>> {
        let mut entries = self.aggregate(records)?;
        entries.truncate(top_n);
        Ok(entries)
    }
}

/// 동일 값이 가장 낮은 순위를 공유하는 1-based 순위.
///
/// `cmp`가 `Less`를 반환하는 값이 더 좋은 순위입니다.
fn competition_ranks<F>(values: &[f64], cmp: F) -> Vec<usize>
where
    F: Fn(&f64, &f64) -> Ordering,
{
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| cmp(&values[i], &values[j]));

    let mut ranks = vec![0; values.len()];
    let mut rank = 1;
    for (position, &idx) in order.iter().enumerate() {
        if position > 0 && cmp(&values[order[position - 1]], &values[idx]) != Ordering::Equal {
            rank = position + 1;
        }
        ranks[idx] = rank;
    }
    ranks
}
