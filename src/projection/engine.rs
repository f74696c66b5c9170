//! Core projection engine for staged household cash flows

use log::{debug, info};
use thiserror::Error;

use crate::params::{ParameterError, ParameterSet};
use super::schedule::{StageDefinition, STAGE_SCHEDULE};
use super::state::ProjectionState;
use super::records::{ProjectionResult, StageRecord, SummaryMetrics};

/// Share of stage income assumed to be invested
pub const DEFAULT_SAVINGS_RATE: f64 = 0.2;

/// Years of inflation added per stage position after the first accrual stage
pub const DEFAULT_INFLATION_STEP_YEARS: u32 = 3;

/// Longest accepted inflation step; twice the longest stage
pub const MAX_INFLATION_STEP_YEARS: u32 = 12;

/// Reasons a projection config is rejected
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("savings rate must be a finite fraction in [0, 1], got {0}")]
    SavingsRate(f64),

    #[error("inflation step of {value} years exceeds the maximum of {max}")]
    InflationStep { value: u32, max: u32 },
}

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Fraction of stage income that earns the investment return
    pub savings_rate: f64,

    /// Inflation exponent step: stage `i` compounds `max(0, (i - 1) * step)` years.
    /// This is a per-position unit, not the true elapsed time of the schedule.
    pub inflation_step_years: u32,
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.savings_rate) {
            return Err(ConfigError::SavingsRate(self.savings_rate));
        }
        if self.inflation_step_years > MAX_INFLATION_STEP_YEARS {
            return Err(ConfigError::InflationStep {
                value: self.inflation_step_years,
                max: MAX_INFLATION_STEP_YEARS,
            });
        }
        Ok(())
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            savings_rate: DEFAULT_SAVINGS_RATE,
            inflation_step_years: DEFAULT_INFLATION_STEP_YEARS,
        }
    }
}

/// Main projection engine
///
/// Holds only configuration; every run allocates its own state, so one engine
/// can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine, rejecting configs the schedule cannot use
    pub fn new(config: ProjectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Validate parameters and project them across the stage schedule
    pub fn run(&self, params: &ParameterSet) -> Result<ProjectionResult, ParameterError> {
        params.validate()?;
        Ok(self.project(params))
    }

    /// Project already-validated parameters
    fn project(&self, params: &ParameterSet) -> ProjectionResult {
        let mut state = ProjectionState::from_parameters(params);
        let mut stages = Vec::with_capacity(STAGE_SCHEDULE.len());

        for stage in &STAGE_SCHEDULE {
            let record = self.calculate_stage(params, stage, &mut state);
            debug!(
                "Stage {} ({}): net cash flow {:.2}, economic gain {:.2}",
                record.stage_index, record.name, record.net_cash_flow, record.total_economic_gain
            );
            stages.push(record);
            state.advance_stage();
        }

        let summary = self.summarize(params, &state);
        info!(
            "Projection complete: net asset change {:.2}, min cash flow {:.2}, risk coefficient {:.2}",
            summary.total_net_asset_change, summary.min_cash_flow_surplus, summary.risk_coefficient
        );

        ProjectionResult { stages, summary }
    }

    /// Compounding exponent for the stage at `stage_index`
    fn elapsed_years(&self, stage_index: usize) -> u32 {
        let position = u32::try_from(stage_index.saturating_sub(1)).unwrap_or(u32::MAX);
        position.saturating_mul(self.config.inflation_step_years)
    }

    /// Calculate one stage and fold it into the running state
    fn calculate_stage(
        &self,
        params: &ParameterSet,
        stage: &StageDefinition,
        state: &mut ProjectionState,
    ) -> StageRecord {
        let years = stage.duration_years;
        let mut row = StageRecord::new(stage.name, state.stage_index, years, stage.is_preparation_stage);

        row.elapsed_years = self.elapsed_years(state.stage_index);
        let exponent = i32::try_from(row.elapsed_years).unwrap_or(i32::MAX);
        let inflation = (1.0 + params.living_inflation / 100.0).powi(exponent);

        if stage.is_preparation_stage {
            // Only marriage costs; income and expenses start after the wedding
            row.marriage_cost = params.total_marriage_cost();
        } else {
            let years_f = years as f64;

            row.income = params.effective_annual_income() * years_f;
            row.living_cost = params.base_living_cost * 12.0 * years_f * inflation;
            row.mortgage = params.monthly_mortgage * 12.0 * years_f;
            row.child_cost = stage.child_cost_phase.cost(&params.child_cost_profile)
                * params.child_count as f64
                * inflation;
            row.parent_support = params.annual_parent_support * years_f;
            row.investment_gain = row.income
                * self.config.savings_rate
                * (params.investment_return / 100.0)
                * years_f;
        }

        // Property moves in every stage, preparation included
        row.property_value_change = state.appreciate_property(params.property_appreciation, years);
        row.property_value_end = state.property_value;

        row.net_cash_flow = row.income + row.parent_support
            - row.living_cost
            - row.mortgage
            - row.child_cost
            - row.marriage_cost;
        row.total_economic_gain = row.net_cash_flow + row.property_value_change + row.investment_gain;
        row.marriage_and_child_cost = row.marriage_cost + row.child_cost;
        row.investment_and_support_gain = row.investment_gain + row.parent_support;

        if !stage.is_preparation_stage {
            state.observe_cash_flow(row.net_cash_flow);
        }
        state.total_net_asset_change += row.total_economic_gain;
        state.staged_child_cost += row.child_cost;

        row
    }

    /// Build summary metrics from the parameters and final state
    fn summarize(&self, params: &ParameterSet, state: &ProjectionState) -> SummaryMetrics {
        let total_marriage_cost = params.total_marriage_cost();
        let total_child_cost = params.total_child_cost();

        SummaryMetrics {
            total_net_asset_change: state.total_net_asset_change,
            min_cash_flow_surplus: state.min_cash_flow_surplus.unwrap_or(0.0),
            total_marriage_cost,
            total_child_cost,
            total_cost: total_marriage_cost + total_child_cost,
            stage_attributed_child_cost: state.staged_child_cost,
            risk_coefficient: risk_coefficient(params),
        }
    }
}

/// Monthly inflow (salaries plus amortized parent support) over fixed monthly obligations
///
/// Returns 0 when there are no obligations.
pub fn risk_coefficient(params: &ParameterSet) -> f64 {
    let obligations = params.monthly_obligations();
    if obligations > 0.0 {
        params.monthly_inflow() / obligations
    } else {
        0.0
    }
}
