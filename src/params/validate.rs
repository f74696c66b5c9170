//! Parameter validation and conversion from loosely-typed documents
//!
//! A [`ParameterDocument`] is what arrives from a file or another caller: every
//! field optional, cost groups as open maps, the child count signed. Converting
//! it into a [`ParameterSet`] checks every rule once, so the engine never sees
//! malformed input.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::data::{
    ChildCostProfile, MarriageCosts, ParameterSet, CHILD_COST_KEYS, MARRIAGE_COST_KEYS,
};

/// Lowest accepted annual rate in percent; below this a value would turn negative
pub const MIN_RATE_PERCENT: f64 = -100.0;

/// Highest accepted annual rate in percent
pub const MAX_RATE_PERCENT: f64 = 1_000.0;

/// Largest accepted single amount, in raw currency units
///
/// Together with the rate bounds this keeps every projected figure finite.
pub const MAX_AMOUNT: f64 = 1e12;

/// Reasons a parameter set is rejected before any projection runs
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParameterError {
    /// An amount that must be non-negative is below zero
    #[error("parameter '{field}' must be non-negative, got {value}")]
    Negative { field: String, value: f64 },

    /// A bounded value lies outside its inclusive range
    #[error("parameter '{field}' value {value} is out of bounds [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinity supplied
    #[error("parameter '{field}' must be a finite number")]
    NotFinite { field: String },

    /// Child count below zero
    #[error("parameter 'childCount' must be non-negative, got {0}")]
    NegativeChildCount(i64),

    /// A required top-level field is absent
    #[error("required parameter '{field}' is missing")]
    MissingField { field: String },

    /// A fixed key is absent from a cost group
    #[error("cost group '{group}' is missing required key '{key}'")]
    MissingKey { group: String, key: String },

    /// A cost group carries a key outside its fixed set
    #[error("cost group '{group}' has unknown key '{key}'")]
    UnknownKey { group: String, key: String },
}

impl ParameterError {
    /// Name of the offending field, dotted for cost-group entries
    pub fn field(&self) -> String {
        match self {
            ParameterError::Negative { field, .. }
            | ParameterError::OutOfRange { field, .. }
            | ParameterError::NotFinite { field }
            | ParameterError::MissingField { field } => field.clone(),
            ParameterError::NegativeChildCount(_) => "childCount".to_string(),
            ParameterError::MissingKey { group, key } | ParameterError::UnknownKey { group, key } => {
                format!("{group}.{key}")
            }
        }
    }
}

fn check_amount(field: &str, value: f64) -> Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { field: field.to_string() });
    }
    if value < 0.0 {
        return Err(ParameterError::Negative {
            field: field.to_string(),
            value,
        });
    }
    if value > MAX_AMOUNT {
        return Err(ParameterError::OutOfRange {
            field: field.to_string(),
            value,
            min: 0.0,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { field: field.to_string() });
    }
    if value < min || value > max {
        return Err(ParameterError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl ParameterSet {
    /// Check every field rule, returning the first violation found
    ///
    /// Amounts must be finite and lie in [0, `MAX_AMOUNT`], `incomeStability`
    /// must lie in [0, 100], and annual rates in [-100%, `MAX_RATE_PERCENT`].
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (field, value) in self.amount_fields() {
            check_amount(field, value)?;
        }

        check_range("incomeStability", self.income_stability, 0.0, 100.0)?;
        for (field, value) in self.rate_fields().into_iter().skip(1) {
            check_range(field, value, MIN_RATE_PERCENT, MAX_RATE_PERCENT)?;
        }

        for (key, value) in self.marriage_costs.entries() {
            check_amount(&format!("marriageCosts.{key}"), value)?;
        }
        for (key, value) in self.child_cost_profile.entries() {
            check_amount(&format!("childCostProfile.{key}"), value)?;
        }

        Ok(())
    }
}

/// Loosely-typed parameter document as read from JSON or supplied by a caller
///
/// Unknown top-level keys are ignored so that documents written by richer
/// front ends (city tier selectors, UI toggles) still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDocument {
    pub salary_a: Option<f64>,
    pub salary_b: Option<f64>,
    pub annual_bonus: Option<f64>,
    pub income_stability: Option<f64>,
    pub property_value: Option<f64>,
    pub property_appreciation: Option<f64>,
    pub monthly_mortgage: Option<f64>,
    pub annual_parent_support: Option<f64>,
    pub marriage_costs: Option<BTreeMap<String, f64>>,
    pub child_count: Option<i64>,
    pub child_cost_profile: Option<BTreeMap<String, f64>>,

    /// Legacy list form of the child profile; the first entry is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BTreeMap<String, f64>>>,

    pub base_living_cost: Option<f64>,
    pub living_inflation: Option<f64>,
    pub investment_return: Option<f64>,
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, ParameterError> {
    value.ok_or_else(|| ParameterError::MissingField { field: field.to_string() })
}

/// Check a cost group has exactly the fixed keys and return values in key order
fn fixed_group<const N: usize>(
    group: &str,
    map: &BTreeMap<String, f64>,
    keys: [&str; N],
) -> Result<[f64; N], ParameterError> {
    if let Some(extra) = map.keys().find(|k| !keys.contains(&k.as_str())) {
        return Err(ParameterError::UnknownKey {
            group: group.to_string(),
            key: extra.clone(),
        });
    }

    let mut values = [0.0; N];
    for (slot, key) in values.iter_mut().zip(keys) {
        *slot = *map.get(key).ok_or_else(|| ParameterError::MissingKey {
            group: group.to_string(),
            key: key.to_string(),
        })?;
    }
    Ok(values)
}

impl ParameterDocument {
    /// Convert into a validated parameter set
    pub fn into_parameters(self) -> Result<ParameterSet, ParameterError> {
        let result = self.convert();
        if let Err(e) = &result {
            warn!("Rejected parameter document: {}", e);
        }
        result
    }

    fn convert(self) -> Result<ParameterSet, ParameterError> {
        let child_count = required("childCount", self.child_count)?;
        if child_count < 0 {
            return Err(ParameterError::NegativeChildCount(child_count));
        }
        let child_count = u32::try_from(child_count).map_err(|_| ParameterError::OutOfRange {
            field: "childCount".to_string(),
            value: child_count as f64,
            min: 0.0,
            max: u32::MAX as f64,
        })?;

        let marriage = required("marriageCosts", self.marriage_costs)?;
        let [betrothal_gift, wedding_ceremony, wedding_ring, honeymoon, new_house_down_payment, renovation] =
            fixed_group("marriageCosts", &marriage, MARRIAGE_COST_KEYS)?;

        let profile = match (self.child_cost_profile, self.children) {
            (Some(profile), _) => profile,
            (None, Some(children)) => children.into_iter().next().ok_or_else(|| {
                ParameterError::MissingField { field: "childCostProfile".to_string() }
            })?,
            (None, None) => {
                return Err(ParameterError::MissingField { field: "childCostProfile".to_string() })
            }
        };
        let [prenatal_care, delivery, postpartum_care, monthly_baby_cost, kindergarten, primary_school, junior_high, senior_high, university, extracurricular] =
            fixed_group("childCostProfile", &profile, CHILD_COST_KEYS)?;

        let params = ParameterSet {
            salary_a: required("salaryA", self.salary_a)?,
            salary_b: required("salaryB", self.salary_b)?,
            annual_bonus: required("annualBonus", self.annual_bonus)?,
            income_stability: required("incomeStability", self.income_stability)?,
            property_value: required("propertyValue", self.property_value)?,
            property_appreciation: required("propertyAppreciation", self.property_appreciation)?,
            monthly_mortgage: required("monthlyMortgage", self.monthly_mortgage)?,
            annual_parent_support: required("annualParentSupport", self.annual_parent_support)?,
            marriage_costs: MarriageCosts {
                betrothal_gift,
                wedding_ceremony,
                wedding_ring,
                honeymoon,
                new_house_down_payment,
                renovation,
            },
            child_count,
            child_cost_profile: ChildCostProfile {
                prenatal_care,
                delivery,
                postpartum_care,
                monthly_baby_cost,
                kindergarten,
                primary_school,
                junior_high,
                senior_high,
                university,
                extracurricular,
            },
            base_living_cost: required("baseLivingCost", self.base_living_cost)?,
            living_inflation: required("livingInflation", self.living_inflation)?,
            investment_return: required("investmentReturn", self.investment_return)?,
        };

        params.validate()?;
        Ok(params)
    }
}

fn group_map(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl From<&ParameterSet> for ParameterDocument {
    fn from(params: &ParameterSet) -> Self {
        Self {
            salary_a: Some(params.salary_a),
            salary_b: Some(params.salary_b),
            annual_bonus: Some(params.annual_bonus),
            income_stability: Some(params.income_stability),
            property_value: Some(params.property_value),
            property_appreciation: Some(params.property_appreciation),
            monthly_mortgage: Some(params.monthly_mortgage),
            annual_parent_support: Some(params.annual_parent_support),
            marriage_costs: Some(group_map(&params.marriage_costs.entries())),
            child_count: Some(i64::from(params.child_count)),
            child_cost_profile: Some(group_map(&params.child_cost_profile.entries())),
            children: None,
            base_living_cost: Some(params.base_living_cost),
            living_inflation: Some(params.living_inflation),
            investment_return: Some(params.investment_return),
        }
    }
}

impl TryFrom<ParameterDocument> for ParameterSet {
    type Error = ParameterError;

    fn try_from(doc: ParameterDocument) -> Result<Self, Self::Error> {
        doc.into_parameters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_document() -> ParameterDocument {
        ParameterDocument::from(&ParameterSet::default())
    }

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(ParameterSet::default().validate().is_ok());
    }

    #[test]
    fn test_document_round_trip_accepts() {
        let params = default_document().into_parameters().expect("valid document");
        assert_eq!(params, ParameterSet::default());
    }

    #[test]
    fn test_negative_child_count_rejected() {
        let mut doc = default_document();
        doc.child_count = Some(-1);
        let err = doc.into_parameters().unwrap_err();
        assert_eq!(err, ParameterError::NegativeChildCount(-1));
        assert_eq!(err.field(), "childCount");
    }

    #[test]
    fn test_negative_amount_names_field() {
        let params = ParameterSet {
            monthly_mortgage: -1.0,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.field(), "monthlyMortgage");
    }

    #[test]
    fn test_negative_group_entry_names_key() {
        let mut params = ParameterSet::default();
        params.child_cost_profile.university = -5.0;
        let err = params.validate().unwrap_err();
        assert_eq!(err.field(), "childCostProfile.university");
    }

    #[test]
    fn test_stability_bounds() {
        for bad in [-0.1, 100.5] {
            let params = ParameterSet {
                income_stability: bad,
                ..Default::default()
            };
            assert!(matches!(
                params.validate(),
                Err(ParameterError::OutOfRange { ref field, .. }) if field == "incomeStability"
            ));
        }
        for ok in [0.0, 100.0] {
            let params = ParameterSet {
                income_stability: ok,
                ..Default::default()
            };
            assert!(params.validate().is_ok());
        }
    }

    #[test]
    fn test_negative_appreciation_allowed() {
        let params = ParameterSet {
            property_appreciation: -5.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rate_upper_bound() {
        let at_bound = ParameterSet {
            property_appreciation: MAX_RATE_PERCENT,
            ..Default::default()
        };
        assert!(at_bound.validate().is_ok());

        let runaway = ParameterSet {
            property_appreciation: 1e200,
            ..Default::default()
        };
        assert_eq!(
            runaway.validate(),
            Err(ParameterError::OutOfRange {
                field: "propertyAppreciation".to_string(),
                value: 1e200,
                min: MIN_RATE_PERCENT,
                max: MAX_RATE_PERCENT,
            })
        );

        for (field, params) in [
            ("livingInflation", ParameterSet { living_inflation: 1_000.5, ..Default::default() }),
            ("investmentReturn", ParameterSet { investment_return: 5e3, ..Default::default() }),
        ] {
            assert_eq!(params.validate().unwrap_err().field(), field);
        }
    }

    #[test]
    fn test_amount_upper_bound() {
        let params = ParameterSet {
            property_value: MAX_AMOUNT * 10.0,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, ParameterError::OutOfRange { .. }));
        assert_eq!(err.field(), "propertyValue");
    }

    #[test]
    fn test_nan_rejected() {
        let params = ParameterSet {
            salary_a: f64::NAN,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParameterError::NotFinite { field: "salaryA".to_string() })
        );
    }

    #[test]
    fn test_missing_group_key_rejected() {
        let mut doc = default_document();
        doc.marriage_costs.as_mut().unwrap().remove("honeymoon");
        let err = doc.into_parameters().unwrap_err();
        assert_eq!(
            err,
            ParameterError::MissingKey {
                group: "marriageCosts".to_string(),
                key: "honeymoon".to_string()
            }
        );
        assert_eq!(err.field(), "marriageCosts.honeymoon");
    }

    #[test]
    fn test_unknown_group_key_rejected() {
        let mut doc = default_document();
        doc.child_cost_profile
            .as_mut()
            .unwrap()
            .insert("pony".to_string(), 1.0);
        assert!(matches!(
            doc.into_parameters(),
            Err(ParameterError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_missing_scalar_rejected() {
        let mut doc = default_document();
        doc.salary_b = None;
        assert_eq!(
            doc.into_parameters().unwrap_err().field(),
            "salaryB"
        );
    }

    #[test]
    fn test_legacy_children_list_used() {
        let mut doc = default_document();
        let profile = doc.child_cost_profile.take();
        doc.children = Some(vec![profile.unwrap()]);
        let params = doc.into_parameters().expect("legacy form accepted");
        assert_eq!(params.child_cost_profile, ParameterSet::default().child_cost_profile);
    }
}
