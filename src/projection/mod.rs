//! Projection engine for staged household cash flows

mod schedule;
mod state;
mod engine;
mod records;

pub use schedule::{ChildCostPhase, StageDefinition, STAGE_COUNT, STAGE_SCHEDULE, total_years};
pub use state::ProjectionState;
pub use engine::{
    ProjectionEngine, ProjectionConfig, ConfigError, risk_coefficient, DEFAULT_SAVINGS_RATE,
    DEFAULT_INFLATION_STEP_YEARS, MAX_INFLATION_STEP_YEARS,
};
pub use records::{
    StageRecord, SummaryMetrics, ProjectionResult, FinancialHealth, ADEQUATE_RISK_COEFFICIENT,
};
