//! 심볼 및 시장 접미사 정의.
//!
//! 이 모듈은 종목 심볼 관련 타입을 정의합니다:
//! - `MarketSuffix` - 시세 공급자 접미사 (코스피 `.KS`, 코스닥 `.KQ`)
//! - `Symbol` - 공급자가 조회할 수 있는 정규화된 종목 심볼
//!
//! # 정규화 규칙
//!
//! 1. 앞뒤 공백 제거
//! 2. 이미 알려진 접미사가 있으면 그대로 반환
//! 3. 정확히 6자리 숫자이면 기본 접미사(`.KS`) 부착
//! 4. 그 외에는 공백만 제거한 문자열 반환 (이미 정규형이거나 해외 종목으로 간주)
//!
//! 정규화는 멱등입니다: `normalize(normalize(x)) == normalize(x)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 시장 접미사.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSuffix {
    /// 유가증권시장 (코스피)
    Kospi,
    /// 코스닥
    Kosdaq,
}

/// 6자리 숫자 코드에 붙이는 기본 접미사.
pub const DEFAULT_SUFFIX: MarketSuffix = MarketSuffix::Kospi;

impl MarketSuffix {
    /// 인식하는 모든 접미사.
    pub const ALL: [MarketSuffix; 2] = [MarketSuffix::Kospi, MarketSuffix::Kosdaq];

    /// 접미사 문자열 (Yahoo Finance 형식).
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSuffix::Kospi => ".KS",
            MarketSuffix::Kosdaq => ".KQ",
        }
    }

    /// 문자열 끝의 접미사를 인식합니다.
    pub fn detect(ticker: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|suffix| ticker.ends_with(suffix.as_str()))
    }
}

impl fmt::Display for MarketSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 원시 티커 문자열을 공급자 심볼 형식으로 정규화합니다.
///
/// 순수 함수이며 실패하지 않습니다. 최악의 경우 공백만 제거된 입력을 반환합니다.
pub fn normalize_ticker(raw: &str) -> String {
    let ticker = raw.trim();

    if MarketSuffix::detect(ticker).is_some() {
        return ticker.to_string();
    }

    if ticker.len() == 6 && ticker.chars().all(|c| c.is_ascii_digit()) {
        return format!("{}{}", ticker, DEFAULT_SUFFIX.as_str());
    }

    ticker.to_string()
}

/// 정규화된 종목 심볼.
///
/// 비어 있지 않으며, 항상 `normalize_ticker`를 거친 값만 담습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// 원시 문자열을 정규화하여 심볼을 생성합니다.
    ///
    /// 공백 제거 후 빈 문자열이면 `None`을 반환합니다.
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = normalize_ticker(raw);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// 심볼 문자열.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 시장 접미사 (해외/기타 심볼이면 `None`).
    pub fn suffix(&self) -> Option<MarketSuffix> {
        MarketSuffix::detect(&self.0)
    }

    /// 접미사를 제외한 종목 코드 (예: "005930.KS" → "005930").
    pub fn code(&self) -> &str {
        match self.suffix() {
            Some(suffix) => &self.0[..self.0.len() - suffix.as_str().len()],
            None => &self.0,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
