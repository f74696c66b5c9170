//! Named parameter templates by city tier and risk posture

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::data::{ChildCostProfile, MarriageCosts, ParameterSet};

/// Built-in household templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// First-tier city (Beijing, Shanghai)
    Tier1,
    /// Second-tier city (Hangzhou, Nanjing)
    Tier2,
    /// Third-tier prefecture city
    Tier3,
    /// Low leverage, high income stability
    Conservative,
    /// High leverage, high income, volatile
    Aggressive,
    Balanced,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Tier1,
        Preset::Tier2,
        Preset::Tier3,
        Preset::Conservative,
        Preset::Aggressive,
        Preset::Balanced,
    ];

    /// Identifier used on the command line and in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Tier1 => "tier1",
            Preset::Tier2 => "tier2",
            Preset::Tier3 => "tier3",
            Preset::Conservative => "conservative",
            Preset::Aggressive => "aggressive",
            Preset::Balanced => "balanced",
        }
    }

    /// Label shown to users
    pub fn display_name(&self) -> &'static str {
        match self {
            Preset::Tier1 => "一线城市",
            Preset::Tier2 => "二线城市",
            Preset::Tier3 => "三线城市",
            Preset::Conservative => "保守型",
            Preset::Aggressive => "激进型",
            Preset::Balanced => "平衡型",
        }
    }

    /// Parameter set for this template
    pub fn parameters(&self) -> ParameterSet {
        match self {
            Preset::Tier1 => ParameterSet {
                salary_a: 28_000.0,
                salary_b: 24_000.0,
                annual_bonus: 120_000.0,
                income_stability: 78.0,
                property_value: 12_000_000.0,
                property_appreciation: 0.2,
                monthly_mortgage: 18_000.0,
                annual_parent_support: 60_000.0,
                marriage_costs: MarriageCosts {
                    betrothal_gift: 120_000.0,
                    wedding_ceremony: 200_000.0,
                    wedding_ring: 60_000.0,
                    honeymoon: 80_000.0,
                    new_house_down_payment: 1_200_000.0,
                    renovation: 400_000.0,
                },
                child_count: 1,
                child_cost_profile: ChildCostProfile {
                    prenatal_care: 15_000.0,
                    delivery: 25_000.0,
                    postpartum_care: 35_000.0,
                    monthly_baby_cost: 3_500.0,
                    kindergarten: 240_000.0,
                    primary_school: 480_000.0,
                    junior_high: 360_000.0,
                    senior_high: 300_000.0,
                    university: 1_200_000.0,
                    extracurricular: 200_000.0,
                },
                base_living_cost: 12_000.0,
                living_inflation: 2.8,
                investment_return: 4.5,
            },
            Preset::Tier2 => ParameterSet::default(),
            Preset::Tier3 => ParameterSet {
                salary_a: 12_000.0,
                salary_b: 10_000.0,
                annual_bonus: 40_000.0,
                income_stability: 85.0,
                property_value: 800_000.0,
                property_appreciation: -1.8,
                monthly_mortgage: 2_800.0,
                annual_parent_support: 20_000.0,
                marriage_costs: MarriageCosts {
                    betrothal_gift: 35_000.0,
                    wedding_ceremony: 68_000.0,
                    wedding_ring: 20_000.0,
                    honeymoon: 25_000.0,
                    new_house_down_payment: 160_000.0,
                    renovation: 90_000.0,
                },
                child_count: 1,
                child_cost_profile: ChildCostProfile {
                    prenatal_care: 5_500.0,
                    delivery: 8_000.0,
                    postpartum_care: 15_000.0,
                    monthly_baby_cost: 1_600.0,
                    kindergarten: 72_000.0,
                    primary_school: 132_000.0,
                    junior_high: 108_000.0,
                    senior_high: 96_000.0,
                    university: 480_000.0,
                    extracurricular: 80_000.0,
                },
                base_living_cost: 4_200.0,
                living_inflation: 2.0,
                investment_return: 3.5,
            },
            Preset::Conservative => ParameterSet {
                salary_a: 16_000.0,
                salary_b: 14_000.0,
                annual_bonus: 50_000.0,
                income_stability: 92.0,
                property_value: 1_500_000.0,
                property_appreciation: -0.8,
                monthly_mortgage: 4_500.0,
                annual_parent_support: 45_000.0,
                marriage_costs: MarriageCosts {
                    betrothal_gift: 38_000.0,
                    wedding_ceremony: 88_000.0,
                    wedding_ring: 25_000.0,
                    honeymoon: 30_000.0,
                    new_house_down_payment: 300_000.0,
                    renovation: 120_000.0,
                },
                child_count: 1,
                child_cost_profile: ChildCostProfile {
                    prenatal_care: 6_500.0,
                    delivery: 9_500.0,
                    postpartum_care: 18_000.0,
                    monthly_baby_cost: 1_800.0,
                    kindergarten: 72_000.0,
                    primary_school: 144_000.0,
                    junior_high: 120_000.0,
                    senior_high: 108_000.0,
                    university: 600_000.0,
                    extracurricular: 96_000.0,
                },
                base_living_cost: 5_200.0,
                living_inflation: 2.0,
                investment_return: 3.0,
            },
            Preset::Aggressive => ParameterSet {
                salary_a: 32_000.0,
                salary_b: 28_000.0,
                annual_bonus: 150_000.0,
                income_stability: 65.0,
                property_value: 2_800_000.0,
                property_appreciation: 1.5,
                monthly_mortgage: 11_000.0,
                annual_parent_support: 25_000.0,
                marriage_costs: MarriageCosts {
                    betrothal_gift: 88_000.0,
                    wedding_ceremony: 180_000.0,
                    wedding_ring: 80_000.0,
                    honeymoon: 100_000.0,
                    new_house_down_payment: 560_000.0,
                    renovation: 350_000.0,
                },
                child_count: 1,
                child_cost_profile: ChildCostProfile {
                    prenatal_care: 12_000.0,
                    delivery: 20_000.0,
                    postpartum_care: 35_000.0,
                    monthly_baby_cost: 3_200.0,
                    kindergarten: 180_000.0,
                    primary_school: 360_000.0,
                    junior_high: 300_000.0,
                    senior_high: 240_000.0,
                    university: 1_200_000.0,
                    extracurricular: 240_000.0,
                },
                base_living_cost: 9_200.0,
                living_inflation: 3.0,
                investment_return: 7.0,
            },
            Preset::Balanced => ParameterSet {
                salary_a: 24_000.0,
                salary_b: 20_000.0,
                annual_bonus: 90_000.0,
                income_stability: 80.0,
                property_value: 2_200_000.0,
                property_appreciation: 0.3,
                monthly_mortgage: 7_800.0,
                annual_parent_support: 38_000.0,
                marriage_costs: MarriageCosts {
                    betrothal_gift: 65_000.0,
                    wedding_ceremony: 135_000.0,
                    wedding_ring: 45_000.0,
                    honeymoon: 55_000.0,
                    new_house_down_payment: 440_000.0,
                    renovation: 220_000.0,
                },
                child_count: 1,
                child_cost_profile: ChildCostProfile {
                    prenatal_care: 9_500.0,
                    delivery: 14_000.0,
                    postpartum_care: 26_000.0,
                    monthly_baby_cost: 2_500.0,
                    kindergarten: 120_000.0,
                    primary_school: 240_000.0,
                    junior_high: 192_000.0,
                    senior_high: 168_000.0,
                    university: 960_000.0,
                    extracurricular: 144_000.0,
                },
                base_living_cost: 7_200.0,
                living_inflation: 2.3,
                investment_return: 4.5,
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preset name not in the catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset '{0}' (expected one of tier1, tier2, tier3, conservative, aggressive, balanced)")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_validate() {
        for preset in Preset::ALL {
            assert!(
                preset.parameters().validate().is_ok(),
                "preset {} failed validation",
                preset
            );
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.as_str().parse::<Preset>(), Ok(preset));
        }
        assert_eq!("Tier1".parse::<Preset>(), Ok(Preset::Tier1));
        assert!("tier4".parse::<Preset>().is_err());
    }

    #[test]
    fn test_tier2_is_default_form() {
        assert_eq!(Preset::Tier2.parameters(), ParameterSet::default());
    }

    #[test]
    fn test_tier1_marriage_total() {
        assert_eq!(Preset::Tier1.parameters().total_marriage_cost(), 2_060_000.0);
    }
}
