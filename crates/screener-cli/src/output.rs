//! 결과 출력 (table / csv / json).

use std::fs::File;
use std::io::Write;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Asia::Seoul;
use tracing::info;

use screener_analytics::{SymbolDetail, UniverseStats};
use screener_core::{RankedEntry, RejectionEntry};

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid format: {}. Use: table, csv, json",
                s
            )),
        }
    }
}

/// 파일 또는 stdout에 출력.
pub fn write_output(content: &str, output_path: Option<&str>) -> Result<()> {
    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(content.as_bytes())
            .context("Failed to write to file")?;
        info!("Output written to: {}", path);
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn golden_flag(golden_cross: bool) -> &'static str {
    if golden_cross {
        "Y"
    } else {
        "N"
    }
}

/// KST 시각 문자열.
pub fn format_kst(at: DateTime<Utc>) -> String {
    at.with_timezone(&Seoul)
        .format("%Y-%m-%d %H:%M:%S KST")
        .to_string()
}

/// 순위표 테이블 형식.
pub fn format_table(
    leaderboard: &[RankedEntry],
    universe: &UniverseStats,
    rejections: &[RejectionEntry],
    generated_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "유니버스: 요청 {}개 → 사용 {}개 (중복 제거 후 {}개)  |  {}\n\n",
        universe.requested,
        universe.used,
        universe.unique,
        format_kst(generated_at)
    ));

    // 헤더
    output.push_str(&format!(
        "{:>4}  {:<12} {:>12} {:>10} {:>10} {:>12} {:>12} {:>3} {:>8}\n",
        "RANK", "TICKER", "PRICE", "MOMENTUM", "VOL", "MA_SHORT", "MA_LONG", "GC", "SCORE"
    ));
    output.push_str(&"-".repeat(93));
    output.push('\n');

    for (i, entry) in leaderboard.iter().enumerate() {
        let r = &entry.record;
        output.push_str(&format!(
            "{:>4}  {:<12} {:>12.2} {:>10.4} {:>10.4} {:>12.2} {:>12.2} {:>3} {:>8.4}\n",
            i + 1,
            r.symbol.as_str(),
            r.latest_price,
            r.momentum,
            r.volatility,
            r.ma_short,
            r.ma_long,
            golden_flag(r.golden_cross),
            entry.score
        ));
    }

    if !rejections.is_empty() {
        output.push_str(&format!("\n제외 종목: {}개\n", rejections.len()));
        for rejection in rejections {
            output.push_str(&format!(
                "  {:<12} {:<22} {}\n",
                rejection.symbol.as_str(),
                rejection.reason.as_str(),
                rejection.detail.as_deref().unwrap_or("")
            ));
        }
    }

    output
}

/// 순위표 CSV 형식.
pub fn format_csv(leaderboard: &[RankedEntry]) -> String {
    let mut output = String::from(
        "rank,ticker,price,momentum,volatility,ma_short,ma_long,golden_cross,momentum_rank,volatility_rank,score\n",
    );

    for (i, entry) in leaderboard.iter().enumerate() {
        let r = &entry.record;
        output.push_str(&format!(
            "{},{},{:.2},{:.4},{:.4},{:.2},{:.2},{},{},{},{:.4}\n",
            i + 1,
            r.symbol.as_str(),
            r.latest_price,
            r.momentum,
            r.volatility,
            r.ma_short,
            r.ma_long,
            golden_flag(r.golden_cross),
            entry.momentum_rank,
            entry.volatility_rank,
            entry.score
        ));
    }

    output
}

/// JSON 형식.
pub fn format_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize to JSON")
}

/// 종목 상세 텍스트 형식.
pub fn format_detail(detail: &SymbolDetail, recent: usize) -> String {
    let entry = &detail.entry;
    let r = &entry.record;
    let mut output = String::new();

    output.push_str(&format!(
        "{}  (순위 {}/{})\n",
        r.symbol, detail.position, detail.universe_size
    ));
    output.push_str(&"-".repeat(40));
    output.push('\n');
    output.push_str(&format!("현재가            {:.2} KRW\n", r.latest_price));
    output.push_str(&format!("모멘텀            {:.4}\n", r.momentum));
    output.push_str(&format!("변동성(σ)         {:.4}\n", r.volatility));
    output.push_str(&format!(
        "MA 단기 ({:>3}일)   {:.2}\n",
        detail.short_ma_window, r.ma_short
    ));
    output.push_str(&format!(
        "MA 장기 ({:>3}일)   {:.2}\n",
        detail.long_ma_window, r.ma_long
    ));
    output.push_str(&format!("골든크로스        {}\n", golden_flag(r.golden_cross)));
    output.push_str(&format!(
        "순위 (모멘텀/변동성) {}/{}\n",
        entry.momentum_rank, entry.volatility_rank
    ));
    output.push_str(&format!("점수              {:.4}\n", entry.score));

    let closes = detail.recent(recent);
    if !closes.is_empty() {
        output.push_str(&format!("\n최근 종가 {}개\n", closes.len()));
        for point in closes {
            if let Some(close) = point.close {
                output.push_str(&format!("  {}  {:>12.2}\n", point.date, close));
            }
        }
    }

    output
}
