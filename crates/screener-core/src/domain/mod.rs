//! 도메인 모델.
//!
//! 파이프라인의 각 단계가 주고받는 값 타입을 정의합니다:
//! 종가 시계열 → 팩터 레코드 → 순위 항목 / 제외 항목.

pub mod factor;
pub mod ranking;
pub mod series;

pub use factor::*;
pub use ranking::*;
pub use series::*;
