//! 네이버 금융 KOSPI200 편입 종목 크롤러.
//!
//! ## 데이터 소스
//! - `/sise/entryJongmok.naver?code=KPI200&page=N`: 편입 종목 목록 (페이지당 약 10개)
//!
//! 종목 링크(`/item/main.naver?code=005930`)에서 6자리 코드를 추출합니다.
//! 새 코드가 나오지 않는 페이지에서 멈추며, 실패 시 그때까지 모은 코드를 반환합니다.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use super::ComponentLister;
use crate::error::{DataError, Result};

const DEFAULT_BASE_URL: &str = "https://finance.naver.com/sise/entryJongmok.naver?code=KPI200";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// KOSPI200은 페이지당 10종목, 20페이지.
pub const DEFAULT_MAX_PAGES: usize = 20;

/// 네이버 금융 KOSPI200 구성 종목 수집기.
pub struct NaverComponentLister {
    client: Client,
    base_url: String,
    max_pages: usize,
    /// 페이지 요청 간 딜레이
    request_delay: Duration,
}

impl NaverComponentLister {
    /// 요청 타임아웃을 지정하여 생성.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DataError::FetchError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            request_delay: Duration::from_millis(100),
        })
    }

    async fn fetch_page(&self, page: usize) -> Result<String> {
        let url = format!("{}&page={}", self.base_url, page);

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }

        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// 편입 종목 페이지 HTML에서 6자리 종목 코드를 문서 순서대로 추출합니다.
pub fn parse_component_codes(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("a[href*='code=']") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut codes = Vec::new();

    for link in document.select(&selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if let Some(code) = extract_code(href) {
            if seen.insert(code.clone()) {
                codes.push(code);
            }
        }
    }

    codes
}

/// `...?code=005930&...`에서 6자리 숫자 코드를 꺼냅니다.
fn extract_code(href: &str) -> Option<String> {
    let start = href.find("code=")? + "code=".len();
    let value: String = href[start..]
        .chars()
        .take_while(|c| *c != '&' && *c != '#')
        .collect();

    if value.len() == 6 && value.chars().all(|c| c.is_ascii_digit()) {
        Some(value)
    } else {
        None
    }
}

#[async_trait]
impl ComponentLister for NaverComponentLister {
    fn name(&self) -> &str {
        "naver"
    }

    async fn list_components(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut codes = Vec::new();

        for page in 1..=self.max_pages {
            if page > 1 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            let html = match self.fetch_page(page).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(page, error = %e, "KOSPI200 구성 종목 페이지 조회 실패");
                    break;
                }
            };

            let before = codes.len();
            for code in parse_component_codes(&html) {
                if seen.insert(code.clone()) {
                    codes.push(code);
                }
            }

            let added = codes.len() - before;
            debug!(page, added, "구성 종목 페이지 파싱");
            if added == 0 {
                break;
            }
        }

        info!(count = codes.len(), "KOSPI200 구성 종목 수집 완료");
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table class="type_1">
          <tr><td class="ctg"><a href="/item/main.naver?code=005930" target="_parent">삼성전자</a></td><td>71,000</td></tr>
          <tr><td class="ctg"><a href="/item/main.naver?code=000660" target="_parent">SK하이닉스</a></td><td>130,000</td></tr>
          <tr><td class="ctg"><a href="/item/main.naver?code=005930#chart">삼성전자</a></td></tr>
          <tr><td><a href="/sise/entryJongmok.naver?code=KPI200&page=2">2</a></td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_component_codes() {
        assert_eq!(parse_component_codes(PAGE), vec!["005930", "000660"]);
    }

    #[test]
    fn test_parse_empty_page() {
        assert!(parse_component_codes("<html><body></body></html>").is_empty());
    }

    #[test]
    fn test_extract_code() {
        assert_eq!(
            extract_code("/item/main.naver?code=035720&x=1"),
            Some("035720".to_string())
        );
        assert_eq!(extract_code("/sise/entryJongmok.naver?code=KPI200"), None);
        assert_eq!(extract_code("/item/main.naver"), None);
    }
}
