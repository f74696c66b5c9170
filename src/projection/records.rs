//! Stage output structures for projections

use serde::{Deserialize, Serialize};

/// Risk coefficient above which the household's monthly buffer is considered adequate
pub const ADEQUATE_RISK_COEFFICIENT: f64 = 1.5;

/// Projection output for one life-cycle stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    // Timing
    pub name: String,
    pub stage_index: usize,
    pub years: u32,
    /// Compounding exponent applied to living and child costs
    pub elapsed_years: u32,
    pub is_preparation_stage: bool,

    // Inflows
    pub income: f64,
    pub parent_support: f64,
    pub investment_gain: f64,

    // Outflows
    pub living_cost: f64,
    pub mortgage: f64,
    pub child_cost: f64,
    pub marriage_cost: f64,

    // Property
    pub property_value_end: f64,
    pub property_value_change: f64,

    // Summary
    pub net_cash_flow: f64,
    pub marriage_and_child_cost: f64,
    pub investment_and_support_gain: f64,
    pub total_economic_gain: f64,
}

impl StageRecord {
    /// Create a zeroed record for a stage
    pub fn new(name: &str, stage_index: usize, years: u32, is_preparation_stage: bool) -> Self {
        Self {
            name: name.to_string(),
            stage_index,
            years,
            elapsed_years: 0,
            is_preparation_stage,
            income: 0.0,
            parent_support: 0.0,
            investment_gain: 0.0,
            living_cost: 0.0,
            mortgage: 0.0,
            child_cost: 0.0,
            marriage_cost: 0.0,
            property_value_end: 0.0,
            property_value_change: 0.0,
            net_cash_flow: 0.0,
            marriage_and_child_cost: 0.0,
            investment_and_support_gain: 0.0,
            total_economic_gain: 0.0,
        }
    }
}

/// Aggregate metrics over a complete projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Cumulative economic gain, starting from the negated marriage cost
    pub total_net_asset_change: f64,

    /// Lowest net cash flow across non-preparation stages (0 if none)
    pub min_cash_flow_surplus: f64,

    pub total_marriage_cost: f64,

    /// Whole-childhood cost for all children, university included, not inflated
    pub total_child_cost: f64,

    /// Marriage plus whole-childhood child cost
    pub total_cost: f64,

    /// Child cost actually charged to stages, inflated, university excluded
    pub stage_attributed_child_cost: f64,

    /// Monthly inflow over fixed monthly obligations (0 when there are none)
    pub risk_coefficient: f64,
}

/// Pass/fail reading of the headline metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialHealth {
    pub net_assets_positive: bool,
    pub cash_flow_positive: bool,
    pub risk_buffer_adequate: bool,
}

impl SummaryMetrics {
    pub fn health(&self) -> FinancialHealth {
        FinancialHealth {
            net_assets_positive: self.total_net_asset_change > 0.0,
            cash_flow_positive: self.min_cash_flow_surplus > 0.0,
            risk_buffer_adequate: self.risk_coefficient > ADEQUATE_RISK_COEFFICIENT,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// One record per stage, in schedule order
    pub stages: Vec<StageRecord>,

    pub summary: SummaryMetrics,
}

impl ProjectionResult {
    /// Property value after the last stage
    pub fn final_property_value(&self) -> Option<f64> {
        self.stages.last().map(|s| s.property_value_end)
    }

    /// Records of stages where income and expenses accrue
    pub fn accrual_stages(&self) -> impl Iterator<Item = &StageRecord> {
        self.stages.iter().filter(|s| !s.is_preparation_stage)
    }
}
