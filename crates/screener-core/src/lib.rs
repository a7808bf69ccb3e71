//! # Screener Core
//!
//! 종목 스크리닝 엔진의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 스크리너 전반에서 사용되는 기본 타입을 제공합니다:
//! - 심볼 및 시장 접미사 정의 (정규화 포함)
//! - 종가 시계열
//! - 팩터 레코드, 순위 항목, 제외 항목
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
