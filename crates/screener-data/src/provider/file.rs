//! 티커 목록 파일 로더.
//!
//! 한 줄에 종목 하나, 첫 번째 콤마 구분 열을 티커로 사용합니다.
//! 빈 줄과 `#` 주석 줄은 건너뜁니다. 정규화는 하지 않습니다.

use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// 파일 내용을 원시 티커 목록으로 파싱합니다.
pub fn parse_ticker_list(content: &str) -> Vec<String> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split(',').next())
        .map(|first| first.trim().trim_matches('"').trim().to_string())
        .filter(|ticker| !ticker.is_empty())
        .collect()
}

/// CSV/TXT 티커 목록 파일을 읽습니다.
pub fn load_ticker_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let tickers = parse_ticker_list(&content);
    debug!(path = %path.display(), count = tickers.len(), "티커 파일 로드");
    Ok(tickers)
}
