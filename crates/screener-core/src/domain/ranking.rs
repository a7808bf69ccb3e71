//! 순위 항목, 제외 항목, 점수 가중치.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::factor::FactorRecord;
use crate::types::Symbol;

/// 합성 점수 가중치.
///
/// 가중치 합이 1.0이라는 가정 하에 점수가 [0, 1] 범위에 들어옵니다.
/// 합계는 강제하지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// 모멘텀 순위 가중치
    pub momentum: f64,
    /// 변동성 순위 가중치
    pub volatility: f64,
    /// 골든크로스 보너스 가중치
    pub golden_cross: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            momentum: 0.6,
            volatility: 0.3,
            golden_cross: 0.1,
        }
    }
}

impl ScoreWeights {
    /// 가중치 합계.
    pub fn sum(&self) -> f64 {
        self.momentum + self.volatility + self.golden_cross
    }

    /// 가중치 합이 1.0인지 확인합니다 (허용 오차 1e-9).
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-9
    }
}

/// 순위가 매겨진 종목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 팩터 레코드
    #[serde(flatten)]
    pub record: FactorRecord,
    /// 모멘텀 순위 (1 = 최고 모멘텀)
    pub momentum_rank: usize,
    /// 변동성 순위 (1 = 최저 변동성)
    pub volatility_rank: usize,
    /// 합성 점수
    pub score: f64,
}

impl RankedEntry {
    pub fn symbol(&self) -> &Symbol {
        &self.record.symbol
    }
}

/// 제외 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// 공급자가 데이터를 주지 않음
    NoData,
    /// 롤링 윈도우/모멘텀 계산에 필요한 관측치 부족
    InsufficientHistory,
    /// 공급자 오류 또는 데이터 이상
    ProviderError,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::NoData => "no_data",
            RejectionReason::InsufficientHistory => "insufficient_history",
            RejectionReason::ProviderError => "provider_error",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 순위에서 제외된 종목 (진단용).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionEntry {
    /// 종목 심볼
    pub symbol: Symbol,
    /// 제외 사유
    pub reason: RejectionReason,
    /// 상세 설명
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RejectionEntry {
    /// 새 제외 항목을 생성합니다.
    pub fn new(symbol: Symbol, reason: RejectionReason) -> Self {
        Self {
            symbol,
            reason,
            detail: None,
        }
    }

    /// 상세 설명을 덧붙입니다.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_normalized() {
        let weights = ScoreWeights::default();
        assert!(weights.is_normalized());

        let skewed = ScoreWeights {
            momentum: 0.7,
            ..weights
        };
        assert!(!skewed.is_normalized());
    }

    #[test]
    fn test_rejection_reason_serialization() {
        let json = serde_json::to_string(&RejectionReason::InsufficientHistory).unwrap();
        assert_eq!(json, "\"insufficient_history\"");
        assert_eq!(RejectionReason::ProviderError.to_string(), "provider_error");
    }
}
