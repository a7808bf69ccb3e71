//! 팩터 계산, 점수 합성, 스크리닝 파이프라인.
//!
//! ```text
//! 원시 티커 ─▶ universe ─▶ fetch_all ─▶ FactorEngine ─▶ ScoreAggregator ─▶ ScreeningReport
//!                                          │
//!                                          └─▶ RejectionEntry (no_data / insufficient_history / provider_error)
//! ```

pub mod aggregator;
pub mod factor_engine;
pub mod indicators;
pub mod pipeline;
pub mod report;
pub mod universe;

pub use aggregator::ScoreAggregator;
pub use factor_engine::{FactorEngine, FactorOutcome};
pub use pipeline::ScreeningPipeline;
pub use report::{ReportParams, ScreeningReport, SymbolDetail};
pub use universe::{build_universe, Universe, UniverseStats};
