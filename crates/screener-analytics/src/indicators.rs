//! 롤링 지표 계산.
//!
//! 모든 함수는 최신 시점의 값 하나만 계산하며, 윈도우를 채울 관측치가
//! 부족하면 `None`을 반환합니다 (0으로 채우지 않음).

/// 일간 수익률 (`values[i] / values[i-1] - 1`).
///
/// 결과 길이는 입력보다 1 짧습니다.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// 마지막 `window`개 값의 단순 평균.
pub fn rolling_mean_last(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }

    let tail = &values[values.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// 마지막 `window`개 값의 표본 표준편차 (ddof = 1).
///
/// 표본 표준편차는 관측치 2개 이상에서만 정의됩니다.
pub fn rolling_std_last(values: &[f64], window: usize) -> Option<f64> {
    if window < 2 || values.len() < window {
        return None;
    }

    let tail = &values[values.len() - window..];
    let mean = tail.iter().sum::<f64>() / window as f64;
    let variance = tail
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (window - 1) as f64;

    Some(variance.sqrt())
}

/// 모멘텀: `values[-1] / values[-1 - lookback] - 1`.
///
/// 관측치가 `lookback`개 이하이면 정의되지 않습니다.
pub fn momentum(values: &[f64], lookback: usize) -> Option<f64> {
    let n = values.len();
    if n <= lookback {
        return None;
    }

    let value = values[n - 1] / values[n - 1 - lookback] - 1.0;
    value.is_finite().then_some(value)
}
