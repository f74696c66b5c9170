//! Fixed life-cycle stage schedule

use serde::Serialize;

use crate::params::ChildCostProfile;

/// Which part of the child cost profile a stage pays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChildCostPhase {
    /// No child cost in this stage
    None,
    /// Prenatal care, delivery, postpartum care and three years of infant supplies
    Infancy,
    Kindergarten,
    PrimarySchool,
    JuniorHigh,
    /// Senior high plus the extracurricular aggregate
    SeniorHigh,
}

impl ChildCostPhase {
    /// Cost of this phase for one child, before inflation
    ///
    /// University is never attributed to a stage; it only enters the
    /// aggregate whole-childhood total.
    pub fn cost(&self, profile: &ChildCostProfile) -> f64 {
        match self {
            ChildCostPhase::None => 0.0,
            ChildCostPhase::Infancy => profile.infancy_cost(),
            ChildCostPhase::Kindergarten => profile.kindergarten,
            ChildCostPhase::PrimarySchool => profile.primary_school,
            ChildCostPhase::JuniorHigh => profile.junior_high,
            ChildCostPhase::SeniorHigh => profile.senior_high + profile.extracurricular,
        }
    }
}

/// One contiguous span of the household life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageDefinition {
    pub name: &'static str,
    pub duration_years: u32,
    /// Marriage preparation: no income, expenses or support accrue
    pub is_preparation_stage: bool,
    pub child_cost_phase: ChildCostPhase,
}

/// Number of stages in the schedule
pub const STAGE_COUNT: usize = 6;

/// Marriage preparation followed by the child's age bands up to 18
pub const STAGE_SCHEDULE: [StageDefinition; STAGE_COUNT] = [
    StageDefinition {
        name: "结婚准备",
        duration_years: 1,
        is_preparation_stage: true,
        child_cost_phase: ChildCostPhase::None,
    },
    StageDefinition {
        name: "0-3岁",
        duration_years: 3,
        is_preparation_stage: false,
        child_cost_phase: ChildCostPhase::Infancy,
    },
    StageDefinition {
        name: "3-6岁",
        duration_years: 3,
        is_preparation_stage: false,
        child_cost_phase: ChildCostPhase::Kindergarten,
    },
    StageDefinition {
        name: "6-12岁",
        duration_years: 6,
        is_preparation_stage: false,
        child_cost_phase: ChildCostPhase::PrimarySchool,
    },
    StageDefinition {
        name: "12-15岁",
        duration_years: 3,
        is_preparation_stage: false,
        child_cost_phase: ChildCostPhase::JuniorHigh,
    },
    StageDefinition {
        name: "15-18岁",
        duration_years: 3,
        is_preparation_stage: false,
        child_cost_phase: ChildCostPhase::SeniorHigh,
    },
];

/// Total years covered by the schedule, preparation included
pub fn total_years() -> u32 {
    STAGE_SCHEDULE.iter().map(|s| s.duration_years).sum()
}
