//! Household Projection - staged net-asset projection for marriage and child-rearing
//!
//! This library provides:
//! - A validated parameter model for household income, housing, marriage and child costs
//! - A fixed six-stage life-cycle schedule
//! - A deterministic projection engine producing per-stage records and summary risk metrics
//! - A static preset catalog and JSON/CSV parameter persistence
//! - Batch runs across many parameter sets

pub mod params;
pub mod projection;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use params::{ParameterSet, ParameterError, Preset, MarriageCosts, ChildCostProfile};
pub use projection::{
    ConfigError, ProjectionEngine, ProjectionConfig, ProjectionResult, StageRecord, SummaryMetrics,
};
pub use scenario::ScenarioRunner;
