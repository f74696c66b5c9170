//! Running totals carried across stages of one projection

use crate::params::ParameterSet;

/// State of a household between stages during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Index of the next stage to compute (0-indexed)
    pub stage_index: usize,

    /// Property value at the start of the next stage
    pub property_value: f64,

    /// Cumulative economic gain, seeded with the negated marriage cost
    pub total_net_asset_change: f64,

    /// Lowest net cash flow seen in a non-preparation stage so far
    pub min_cash_flow_surplus: Option<f64>,

    /// Inflated child cost attributed to stages so far
    pub staged_child_cost: f64,
}

impl ProjectionState {
    /// Initialize state at the start of a run
    pub fn from_parameters(params: &ParameterSet) -> Self {
        Self {
            stage_index: 0,
            property_value: params.property_value,
            total_net_asset_change: -params.total_marriage_cost(),
            min_cash_flow_surplus: None,
            staged_child_cost: 0.0,
        }
    }

    /// Record a non-preparation stage's net cash flow
    pub fn observe_cash_flow(&mut self, net_cash_flow: f64) {
        self.min_cash_flow_surplus = Some(match self.min_cash_flow_surplus {
            Some(current) => current.min(net_cash_flow),
            None => net_cash_flow,
        });
    }

    /// Move the property value forward and return the gain over the stage
    pub fn appreciate_property(&mut self, annual_rate_percent: f64, years: u32) -> f64 {
        let start = self.property_value;
        let end = start * (1.0 + annual_rate_percent / 100.0).powi(years as i32);
        self.property_value = end;
        end - start
    }

    /// Advance to the next stage
    pub fn advance_stage(&mut self) {
        self.stage_index += 1;
    }
}
