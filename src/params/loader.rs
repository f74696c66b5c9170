//! Load and save parameter sets
//!
//! JSON documents use the calculator's camelCase keys. Batch CSV files carry
//! one household per row, with cost-group entries flattened into dotted
//! columns (`marriageCosts.honeymoon`, `childCostProfile.university`).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

use super::data::ParameterSet;
use super::presets::{Preset, UnknownPreset};
use super::validate::{ParameterDocument, ParameterError};

/// Default file used by the calculator to save and restore its form
pub const DEFAULT_CONFIG_PATH: &str = "household_projection_config.json";

/// Failures while reading or writing parameter files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: column '{column}' is not a number: '{value}'")]
    NotANumber { row: usize, column: String, value: String },

    #[error("invalid parameters: {0}")]
    Invalid(#[from] ParameterError),

    #[error(transparent)]
    UnknownPreset(#[from] UnknownPreset),
}

/// Read a parameter set from any JSON reader
pub fn load_parameters_from_reader<R: Read>(reader: R) -> Result<ParameterSet, LoadError> {
    let doc: ParameterDocument = serde_json::from_reader(reader)?;
    Ok(doc.into_parameters()?)
}

/// Read a parameter set from a JSON file
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<ParameterSet, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let params = load_parameters_from_reader(BufReader::new(file))?;
    info!("Loaded parameters from {}", path.display());
    Ok(params)
}

/// Write a parameter set as pretty-printed JSON
pub fn save_parameters_to_writer<W: Write>(
    writer: W,
    params: &ParameterSet,
) -> Result<(), LoadError> {
    let doc = ParameterDocument::from(params);
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}

/// Write a parameter set to a JSON file, replacing any existing file
pub fn save_parameters<P: AsRef<Path>>(path: P, params: &ParameterSet) -> Result<(), LoadError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    save_parameters_to_writer(&mut writer, params)?;
    writer.flush()?;
    info!("Saved parameters to {}", path.display());
    Ok(())
}

/// Resolve a parameter source: a preset name, or else a path to a JSON document
///
/// A source that is neither a known preset nor an existing file is reported
/// as an unknown preset.
pub fn load_source(source: &str) -> Result<ParameterSet, LoadError> {
    match source.parse::<Preset>() {
        Ok(preset) => {
            info!("Using preset {} ({})", preset, preset.display_name());
            Ok(preset.parameters())
        }
        Err(unknown) => {
            let path = Path::new(source);
            if path.is_file() {
                load_parameters(path)
            } else {
                warn!("No preset or parameter file named '{}'", source);
                Err(unknown.into())
            }
        }
    }
}

/// Column holding the household label in batch files
const NAME_COLUMN: &str = "name";

fn number(row: usize, column: &str, value: &str) -> Result<f64, LoadError> {
    value.trim().parse().map_err(|_| LoadError::NotANumber {
        row,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Convert one flattened CSV row into a document
fn row_to_document(row: usize, record: BTreeMap<String, String>) -> Result<ParameterDocument, LoadError> {
    let mut doc = ParameterDocument::default();
    let mut marriage = BTreeMap::new();
    let mut profile = BTreeMap::new();

    for (column, value) in &record {
        if column == NAME_COLUMN {
            continue;
        }
        if let Some(key) = column.strip_prefix("marriageCosts.") {
            marriage.insert(key.to_string(), number(row, column, value)?);
            continue;
        }
        if let Some(key) = column.strip_prefix("childCostProfile.") {
            profile.insert(key.to_string(), number(row, column, value)?);
            continue;
        }

        let slot = match column.as_str() {
            "salaryA" => &mut doc.salary_a,
            "salaryB" => &mut doc.salary_b,
            "annualBonus" => &mut doc.annual_bonus,
            "incomeStability" => &mut doc.income_stability,
            "propertyValue" => &mut doc.property_value,
            "propertyAppreciation" => &mut doc.property_appreciation,
            "monthlyMortgage" => &mut doc.monthly_mortgage,
            "annualParentSupport" => &mut doc.annual_parent_support,
            "baseLivingCost" => &mut doc.base_living_cost,
            "livingInflation" => &mut doc.living_inflation,
            "investmentReturn" => &mut doc.investment_return,
            "childCount" => {
                doc.child_count = Some(value.trim().parse().map_err(|_| LoadError::NotANumber {
                    row,
                    column: column.clone(),
                    value: value.clone(),
                })?);
                continue;
            }
            _ => continue,
        };
        *slot = Some(number(row, column, value)?);
    }

    doc.marriage_costs = Some(marriage);
    doc.child_cost_profile = Some(profile);
    Ok(doc)
}

/// Load named parameter sets from any CSV reader
///
/// Rows without a `name` column value are labelled `row-N` (1-indexed).
pub fn load_parameter_sets_csv_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<(String, ParameterSet)>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut sets = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let record: BTreeMap<String, String> = result?;
        let row = idx + 1;
        let name = record
            .get(NAME_COLUMN)
            .filter(|n| !n.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("row-{row}"));
        let params = row_to_document(row, record)?.into_parameters()?;
        sets.push((name, params));
    }

    Ok(sets)
}

/// Load named parameter sets from a CSV file
pub fn load_parameter_sets_csv<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<(String, ParameterSet)>, LoadError> {
    let path = path.as_ref();
    let sets = load_parameter_sets_csv_from_reader(File::open(path)?)?;
    info!("Loaded {} parameter sets from {}", sets.len(), path.display());
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::data::{CHILD_COST_KEYS, MARRIAGE_COST_KEYS};

    #[test]
    fn test_json_round_trip() {
        let params = ParameterSet::default();
        let mut buf = Vec::new();
        save_parameters_to_writer(&mut buf, &params).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.contains("\"salaryA\""));
        assert!(text.contains("\"newHouseDownPayment\""));

        let loaded = load_parameters_from_reader(buf.as_slice()).unwrap();
        assert_eq!(loaded, params);
    }

    #[test]
    fn test_json_ignores_ui_keys_and_accepts_children_list() {
        let json = r#"{
            "salaryA": 22000, "salaryB": 18000, "annualBonus": 80000,
            "incomeStability": 82, "propertyValue": 1800000,
            "propertyAppreciation": -1.2, "monthlyMortgage": 6500,
            "annualParentSupport": 35000,
            "marriageCosts": {
                "betrothalGift": 58000, "weddingCeremony": 128000,
                "weddingRing": 35000, "honeymoon": 45000,
                "newHouseDownPayment": 360000, "renovation": 180000
            },
            "childCount": 1,
            "cityTier": "tier2",
            "children": [{
                "prenatalCare": 8500, "delivery": 12000, "postpartumCare": 22000,
                "monthlyBabyCost": 2200, "kindergarten": 96000,
                "primarySchool": 180000, "juniorHigh": 156000,
                "seniorHigh": 132000, "university": 720000,
                "extracurricular": 120000
            }],
            "baseLivingCost": 6200, "livingInflation": 2.1,
            "investmentReturn": 3.8, "riskSimulation": false
        }"#;
        let params = load_parameters_from_reader(json.as_bytes()).unwrap();
        assert_eq!(params, ParameterSet::default());
    }

    #[test]
    fn test_load_source_resolves_presets() {
        assert_eq!(load_source("tier3").unwrap(), Preset::Tier3.parameters());
        assert!(matches!(
            load_source("no-such-household"),
            Err(LoadError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_json_invalid_value_reported() {
        let mut buf = Vec::new();
        let params = ParameterSet {
            income_stability: 120.0,
            ..Default::default()
        };
        save_parameters_to_writer(&mut buf, &params).unwrap();
        let err = load_parameters_from_reader(buf.as_slice()).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ParameterError::OutOfRange { .. })));
    }

    fn csv_fixture(rows: &[(&str, ParameterSet)]) -> String {
        let mut header = vec![
            "name".to_string(),
            "salaryA".to_string(),
            "salaryB".to_string(),
            "annualBonus".to_string(),
            "incomeStability".to_string(),
            "propertyValue".to_string(),
            "propertyAppreciation".to_string(),
            "monthlyMortgage".to_string(),
            "annualParentSupport".to_string(),
            "childCount".to_string(),
            "baseLivingCost".to_string(),
            "livingInflation".to_string(),
            "investmentReturn".to_string(),
        ];
        header.extend(MARRIAGE_COST_KEYS.iter().map(|k| format!("marriageCosts.{k}")));
        header.extend(CHILD_COST_KEYS.iter().map(|k| format!("childCostProfile.{k}")));

        let mut out = header.join(",");
        out.push('\n');
        for (name, p) in rows {
            let mut cells = vec![
                name.to_string(),
                p.salary_a.to_string(),
                p.salary_b.to_string(),
                p.annual_bonus.to_string(),
                p.income_stability.to_string(),
                p.property_value.to_string(),
                p.property_appreciation.to_string(),
                p.monthly_mortgage.to_string(),
                p.annual_parent_support.to_string(),
                p.child_count.to_string(),
                p.base_living_cost.to_string(),
                p.living_inflation.to_string(),
                p.investment_return.to_string(),
            ];
            cells.extend(p.marriage_costs.entries().iter().map(|(_, v)| v.to_string()));
            cells.extend(p.child_cost_profile.entries().iter().map(|(_, v)| v.to_string()));
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_csv_batch_load() {
        let second = ParameterSet {
            child_count: 2,
            ..Default::default()
        };
        let text = csv_fixture(&[("base", ParameterSet::default()), ("two-kids", second.clone())]);
        let sets = load_parameter_sets_csv_from_reader(text.as_bytes()).unwrap();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].0, "base");
        assert_eq!(sets[0].1, ParameterSet::default());
        assert_eq!(sets[1].0, "two-kids");
        assert_eq!(sets[1].1, second);
    }

    #[test]
    fn test_csv_rejects_non_numeric_cell() {
        let text = csv_fixture(&[("base", ParameterSet::default())])
            .replacen("22000", "lots", 1);
        let err = load_parameter_sets_csv_from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NotANumber { row: 1, ref column, .. } if column == "salaryA"));
    }

    #[test]
    fn test_csv_negative_child_count() {
        let bad = csv_fixture(&[("base", ParameterSet::default())]);
        let mut lines: Vec<String> = bad.lines().map(String::from).collect();
        let mut cells: Vec<String> = lines[1].split(',').map(String::from).collect();
        cells[9] = "-2".to_string();
        lines[1] = cells.join(",");
        let text = lines.join("\n");

        let err = load_parameter_sets_csv_from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ParameterError::NegativeChildCount(-2))));
    }
}
