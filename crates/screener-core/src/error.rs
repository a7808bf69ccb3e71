//! 스크리너의 에러 타입.
//!
//! 실행 단위(run-level) 실패만 이 타입으로 표면화됩니다.
//! 종목 단위 실패(데이터 부족, 공급자 오류)는 `RejectionEntry`로 기록되고
//! 실행을 중단시키지 않습니다.

use thiserror::Error;

/// 핵심 스크리너 에러.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// 정규화/중복 제거 후 남은 종목이 없음
    #[error("유효한 종목 유니버스가 없습니다: {0}")]
    InvalidUniverse(String),

    /// 모든 종목이 제외되어 순위를 매길 데이터가 없음
    #[error("순위를 산정할 수 있는 종목이 없습니다 (제외 {rejected}개)")]
    EmptyUniverse { rejected: usize },

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 실행 취소됨 (부분 결과는 폐기)
    #[error("실행이 취소되었습니다")]
    Cancelled,
}

/// 스크리너 작업을 위한 Result 타입.
pub type ScreenerResult<T> = Result<T, ScreenerError>;

impl ScreenerError {
    /// 유니버스 단위 실패(입력 없음 또는 사용 가능 종목 없음)인지 확인합니다.
    pub fn is_universe_failure(&self) -> bool {
        matches!(
            self,
            ScreenerError::InvalidUniverse(_) | ScreenerError::EmptyUniverse { .. }
        )
    }
}

impl From<config::ConfigError> for ScreenerError {
    fn from(err: config::ConfigError) -> Self {
        ScreenerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_failures_are_distinct() {
        let empty_input = ScreenerError::InvalidUniverse("no tickers".to_string());
        let empty_usable = ScreenerError::EmptyUniverse { rejected: 5 };

        assert!(empty_input.is_universe_failure());
        assert!(empty_usable.is_universe_failure());
        assert!(!ScreenerError::Cancelled.is_universe_failure());
        assert!(!ScreenerError::Config("top_n".to_string()).is_universe_failure());
        assert_ne!(empty_input.to_string(), empty_usable.to_string());
    }
}
