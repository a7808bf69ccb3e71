//! KOSPI200 구성 종목 조회 명령어.

use anyhow::{bail, Result};

use screener_core::Symbol;
use screener_data::ComponentLister;

use super::RunContext;
use crate::output::write_output;

/// 자동 수집된 구성 종목을 정규화된 심볼로 한 줄씩 출력합니다.
pub async fn run(ctx: &RunContext, output: Option<String>) -> Result<()> {
    let lister = ctx.component_lister()?;
    let raw = lister.list_components().await;

    let symbols = normalize_all(&raw);
    if symbols.is_empty() {
        bail!("{}에서 구성 종목을 가져오지 못했습니다", lister.name());
    }

    let content = symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    write_output(&content, output.as_deref())
}

fn normalize_all(raw: &[String]) -> Vec<Symbol> {
    let mut seen = std::collections::HashSet::new();
    raw.iter()
        .filter_map(|t| Symbol::new(t))
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_all_dedupes_in_order() {
        let raw = vec![
            "005930".to_string(),
            "".to_string(),
            "000660".to_string(),
            "005930.KS".to_string(),
        ];
        let symbols: Vec<String> = normalize_all(&raw)
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();
        assert_eq!(symbols, vec!["005930.KS", "000660.KS"]);
    }
}
