//! Household parameter structures matching the calculator document format

use serde::{Deserialize, Serialize};

/// Fixed keys of the marriage cost group, in document order
pub const MARRIAGE_COST_KEYS: [&str; 6] = [
    "betrothalGift",
    "weddingCeremony",
    "weddingRing",
    "honeymoon",
    "newHouseDownPayment",
    "renovation",
];

/// Fixed keys of the child cost group, in document order
pub const CHILD_COST_KEYS: [&str; 10] = [
    "prenatalCare",
    "delivery",
    "postpartumCare",
    "monthlyBabyCost",
    "kindergarten",
    "primarySchool",
    "juniorHigh",
    "seniorHigh",
    "university",
    "extracurricular",
];

/// Years over which the monthly infant cost is incurred
pub const INFANT_YEARS: f64 = 3.0;

/// One-off costs of getting married, all incurred in the preparation stage
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarriageCosts {
    /// Betrothal gift (彩礼)
    pub betrothal_gift: f64,
    /// Wedding ceremony, banquet and photography
    pub wedding_ceremony: f64,
    /// Rings and jewellery
    pub wedding_ring: f64,
    pub honeymoon: f64,
    /// Down payment on the marital home
    pub new_house_down_payment: f64,
    pub renovation: f64,
}

impl MarriageCosts {
    /// All six amounts keyed by their document names
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            (MARRIAGE_COST_KEYS[0], self.betrothal_gift),
            (MARRIAGE_COST_KEYS[1], self.wedding_ceremony),
            (MARRIAGE_COST_KEYS[2], self.wedding_ring),
            (MARRIAGE_COST_KEYS[3], self.honeymoon),
            (MARRIAGE_COST_KEYS[4], self.new_house_down_payment),
            (MARRIAGE_COST_KEYS[5], self.renovation),
        ]
    }

    /// Sum of all marriage cost categories
    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, v)| v).sum()
    }
}

/// Cost schedule of one representative child
///
/// Education entries are totals over their whole school phase, not annual
/// figures. `monthly_baby_cost` is the only monthly amount.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildCostProfile {
    pub prenatal_care: f64,
    pub delivery: f64,
    /// Postpartum confinement care
    pub postpartum_care: f64,
    /// Monthly infant supplies (formula, diapers, food)
    pub monthly_baby_cost: f64,
    /// Kindergarten, 3-year total
    pub kindergarten: f64,
    /// Primary school, 6-year total
    pub primary_school: f64,
    /// Junior high, 3-year total
    pub junior_high: f64,
    /// Senior high, 3-year total
    pub senior_high: f64,
    /// University, 4-year total
    pub university: f64,
    /// Tutoring and hobby classes, aggregate
    pub extracurricular: f64,
}

impl ChildCostProfile {
    /// All ten amounts keyed by their document names
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            (CHILD_COST_KEYS[0], self.prenatal_care),
            (CHILD_COST_KEYS[1], self.delivery),
            (CHILD_COST_KEYS[2], self.postpartum_care),
            (CHILD_COST_KEYS[3], self.monthly_baby_cost),
            (CHILD_COST_KEYS[4], self.kindergarten),
            (CHILD_COST_KEYS[5], self.primary_school),
            (CHILD_COST_KEYS[6], self.junior_high),
            (CHILD_COST_KEYS[7], self.senior_high),
            (CHILD_COST_KEYS[8], self.university),
            (CHILD_COST_KEYS[9], self.extracurricular),
        ]
    }

    /// Birth costs plus three years of infant supplies
    pub fn infancy_cost(&self) -> f64 {
        self.prenatal_care
            + self.delivery
            + self.postpartum_care
            + self.monthly_baby_cost * 12.0 * INFANT_YEARS
    }

    /// Whole-childhood cost of one child, university included
    pub fn lifetime_cost(&self) -> f64 {
        self.infancy_cost()
            + self.kindergarten
            + self.primary_school
            + self.junior_high
            + self.senior_high
            + self.university
            + self.extracurricular
    }
}

/// Complete set of financial inputs for one projection run
///
/// Amounts are raw currency units. Percentages are stored as entered
/// (e.g. `2.1` for 2.1%), not as fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSet {
    /// Monthly salary of partner A
    pub salary_a: f64,

    /// Monthly salary of partner B
    pub salary_b: f64,

    /// Combined annual bonus
    pub annual_bonus: f64,

    /// Income derate in percent, 0-100
    pub income_stability: f64,

    /// Current market value of owned property
    pub property_value: f64,

    /// Annual property appreciation in percent (may be negative)
    pub property_appreciation: f64,

    /// Monthly mortgage payment
    pub monthly_mortgage: f64,

    /// Annual cash support received from parents
    pub annual_parent_support: f64,

    pub marriage_costs: MarriageCosts,

    /// Number of children; multiplies every per-child cost
    pub child_count: u32,

    pub child_cost_profile: ChildCostProfile,

    /// Monthly baseline household living expense
    pub base_living_cost: f64,

    /// Annual inflation in percent applied to living and child costs
    pub living_inflation: f64,

    /// Annual return in percent on the invested share of income
    pub investment_return: f64,
}

impl ParameterSet {
    /// Annual household income before the stability derate
    pub fn gross_annual_income(&self) -> f64 {
        (self.salary_a + self.salary_b) * 12.0 + self.annual_bonus
    }

    /// Annual household income after the stability derate
    pub fn effective_annual_income(&self) -> f64 {
        self.gross_annual_income() * (self.income_stability / 100.0)
    }

    /// Monthly salaries plus parent support spread over twelve months
    pub fn monthly_inflow(&self) -> f64 {
        self.salary_a + self.salary_b + self.annual_parent_support / 12.0
    }

    /// Fixed monthly obligations: mortgage plus baseline living cost
    pub fn monthly_obligations(&self) -> f64 {
        self.monthly_mortgage + self.base_living_cost
    }

    /// Sum of all marriage costs
    pub fn total_marriage_cost(&self) -> f64 {
        self.marriage_costs.total()
    }

    /// Whole-childhood cost across all children
    pub fn total_child_cost(&self) -> f64 {
        self.child_cost_profile.lifetime_cost() * self.child_count as f64
    }

    /// Every scalar amount field keyed by its document name
    ///
    /// Percentage fields are excluded; they carry their own range rules.
    pub fn amount_fields(&self) -> [(&'static str, f64); 7] {
        [
            ("salaryA", self.salary_a),
            ("salaryB", self.salary_b),
            ("annualBonus", self.annual_bonus),
            ("propertyValue", self.property_value),
            ("monthlyMortgage", self.monthly_mortgage),
            ("annualParentSupport", self.annual_parent_support),
            ("baseLivingCost", self.base_living_cost),
        ]
    }

    /// Percentage fields keyed by their document names
    pub fn rate_fields(&self) -> [(&'static str, f64); 4] {
        [
            ("incomeStability", self.income_stability),
            ("propertyAppreciation", self.property_appreciation),
            ("livingInflation", self.living_inflation),
            ("investmentReturn", self.investment_return),
        ]
    }
}

impl Default for ParameterSet {
    /// Second-tier-city household used as the calculator's starting form
    fn default() -> Self {
        Self {
            salary_a: 22_000.0,
            salary_b: 18_000.0,
            annual_bonus: 80_000.0,
            income_stability: 82.0,
            property_value: 1_800_000.0,
            property_appreciation: -1.2,
            monthly_mortgage: 6_500.0,
            annual_parent_support: 35_000.0,
            marriage_costs: MarriageCosts {
                betrothal_gift: 58_000.0,
                wedding_ceremony: 128_000.0,
                wedding_ring: 35_000.0,
                honeymoon: 45_000.0,
                new_house_down_payment: 360_000.0,
                renovation: 180_000.0,
            },
            child_count: 1,
            child_cost_profile: ChildCostProfile {
                prenatal_care: 8_500.0,
                delivery: 12_000.0,
                postpartum_care: 22_000.0,
                monthly_baby_cost: 2_200.0,
                kindergarten: 96_000.0,
                primary_school: 180_000.0,
                junior_high: 156_000.0,
                senior_high: 132_000.0,
                university: 720_000.0,
                extracurricular: 120_000.0,
            },
            base_living_cost: 6_200.0,
            living_inflation: 2.1,
            investment_return: 3.8,
        }
    }
}
