//! 시세 조회 기간과 캔들 간격 정의.
//!
//! 공급자(Yahoo Finance)의 `range`/`interval` 파라미터 문자열과 1:1로 대응합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 조회 기간 (lookback period).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// 1개월
    #[serde(rename = "1mo")]
    OneMonth,
    /// 3개월
    #[serde(rename = "3mo")]
    ThreeMonths,
    /// 6개월
    #[serde(rename = "6mo")]
    SixMonths,
    /// 1년
    #[serde(rename = "1y")]
    OneYear,
    /// 2년
    #[serde(rename = "2y")]
    TwoYears,
    /// 5년
    #[serde(rename = "5y")]
    FiveYears,
    /// 전체
    #[serde(rename = "max")]
    Max,
}

impl Default for Period {
    fn default() -> Self {
        Self::OneYear
    }
}

impl Period {
    /// 공급자 range 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1mo" => Ok(Period::OneMonth),
            "3mo" => Ok(Period::ThreeMonths),
            "6mo" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            "2y" => Ok(Period::TwoYears),
            "5y" => Ok(Period::FiveYears),
            "max" => Ok(Period::Max),
            _ => Err(format!("Invalid period: {}", s)),
        }
    }
}

/// 캔들 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// 일봉
    #[serde(rename = "1d")]
    Daily,
    /// 주봉
    #[serde(rename = "1wk")]
    Weekly,
    /// 월봉
    #[serde(rename = "1mo")]
    Monthly,
}

impl Default for Interval {
    fn default() -> Self {
        Self::Daily
    }
}

impl Interval {
    /// 공급자 interval 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" => Ok(Interval::Daily),
            "1wk" | "1w" => Ok(Interval::Weekly),
            "1mo" | "1m" => Ok(Interval::Monthly),
            _ => Err(format!("Invalid interval: {}", s)),
        }
    }
}
