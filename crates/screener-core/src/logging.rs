//! tracing 기반 로깅.
//!
//! 로그는 stderr로 출력되어 stdout의 순위표/CSV/JSON 출력과 섞이지 않습니다.
//! `RUST_LOG`가 설정되어 있으면 설정 파일의 레벨보다 우선합니다.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 여러 줄, 색상 포함 (개발용)
    Pretty,
    /// 로그 수집용 JSON
    Json,
    /// 한 줄 요약
    #[default]
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 로그 레벨 필터 (예: "info", "screener_analytics=debug")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// 전역 subscriber를 설치합니다. 두 번째 호출은 에러를 반환합니다.
///
/// ```no_run
/// use screener_core::logging::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::new("debug").with_format(LogFormat::Json)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    tracing::debug!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}

/// 종목 심볼 필드가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! screening_span {
    ($name:expr, $symbol:expr) => {
        tracing::info_span!($name, symbol = %$symbol)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("COMPACT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new("debug").with_format(LogFormat::Json);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(LogConfig::new("info").format, LogFormat::Compact);
    }
}
