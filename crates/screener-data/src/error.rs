//! 데이터 모듈 오류 타입.

use screener_core::ScreenerError;
use thiserror::Error;

/// 데이터 공급자 오류.
///
/// 종목 단위 오류는 실행을 중단시키지 않고 제외 사유로 기록됩니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 공급자가 해당 종목 데이터를 주지 않음
    #[error("No data: {0}")]
    NotFound(String),

    /// Rate limit 초과
    #[error("Rate limited")]
    RateLimited,

    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// 데이터 부재(`no_data`)로 분류해야 하는 오류인지 확인합니다.
    pub fn is_no_data(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) {
            DataError::RateLimited
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<DataError> for ScreenerError {
    fn from(err: DataError) -> Self {
        ScreenerError::Data(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_no_data() {
        assert!(DataError::NotFound("005930.KS".to_string()).is_no_data());
        assert!(!DataError::RateLimited.is_no_data());
    }

    #[test]
    fn test_into_screener_error() {
        let err: ScreenerError = DataError::ParseError("bad quote".to_string()).into();
        assert!(matches!(err, ScreenerError::Data(_)));
        assert!(!err.is_universe_failure());
    }
}
