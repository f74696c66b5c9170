//! Scenario runner for batch projections
//!
//! Holds one engine configuration and runs it over many parameter sets.
//! Runs share nothing but the configuration, so batches fan out over rayon.

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::params::{ParameterError, ParameterSet, Preset};
use crate::projection::{ConfigError, ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Projection result labelled with the household it belongs to
#[derive(Debug, Clone, Serialize)]
pub struct NamedResult {
    pub name: String,
    pub result: ProjectionResult,
}

/// Runner for single and batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// for named in runner.run_presets() {
///     let named = named?;
///     println!("{}: {:.0}", named.name, named.result.summary.total_net_asset_change);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the default engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a specific engine configuration
    pub fn with_config(config: ProjectionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: ProjectionEngine::new(config)?,
        })
    }

    /// Run a single projection
    pub fn run(&self, params: &ParameterSet) -> Result<ProjectionResult, ParameterError> {
        self.engine.run(params)
    }

    /// Run a single projection and label it
    pub fn run_named(&self, name: &str, params: &ParameterSet) -> Result<NamedResult, ParameterError> {
        Ok(NamedResult {
            name: name.to_string(),
            result: self.engine.run(params)?,
        })
    }

    /// Run projections for many parameter sets in parallel, preserving input order
    ///
    /// Each entry fails or succeeds on its own.
    pub fn run_batch(&self, sets: &[ParameterSet]) -> Vec<Result<ProjectionResult, ParameterError>> {
        let results: Vec<_> = sets.par_iter().map(|p| self.engine.run(p)).collect();
        info!("Batch of {} projections complete", results.len());
        results
    }

    /// Run labelled parameter sets in parallel, preserving input order
    ///
    /// Each entry fails or succeeds on its own.
    pub fn run_named_batch(
        &self,
        sets: &[(String, ParameterSet)],
    ) -> Vec<Result<NamedResult, ParameterError>> {
        sets.par_iter()
            .map(|(name, params)| self.run_named(name, params))
            .collect()
    }

    /// Run every built-in preset in catalog order, one entry per preset
    pub fn run_presets(&self) -> Vec<Result<NamedResult, ParameterError>> {
        let catalog: Vec<_> = Preset::ALL
            .iter()
            .map(|preset| (preset.as_str().to_string(), preset.parameters()))
            .collect();
        self.run_named_batch(&catalog)
    }

    /// Get reference to the engine for inspection
    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_matches_sequential_runs() {
        let runner = ScenarioRunner::new();
        let sets: Vec<_> = Preset::ALL.iter().map(|p| p.parameters()).collect();

        let batch = runner.run_batch(&sets);
        assert_eq!(batch.len(), sets.len());
        for (params, result) in sets.iter().zip(&batch) {
            let single = runner.run(params).unwrap();
            assert_eq!(result.as_ref().unwrap(), &single);
        }
    }

    #[test]
    fn test_batch_keeps_failures_local() {
        let runner = ScenarioRunner::new();
        let bad = ParameterSet {
            income_stability: 150.0,
            ..Default::default()
        };
        let results = runner.run_batch(&[ParameterSet::default(), bad, ParameterSet::default()]);

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_named_batch_reports_failures_in_place() {
        let runner = ScenarioRunner::new();
        let sets = vec![
            ("ok".to_string(), ParameterSet::default()),
            (
                "runaway".to_string(),
                ParameterSet {
                    property_appreciation: 1e200,
                    ..Default::default()
                },
            ),
            ("also-ok".to_string(), ParameterSet::default()),
        ];
        let results = runner.run_named_batch(&sets);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().name, "ok");
        assert_eq!(results[1].as_ref().unwrap_err().field(), "propertyAppreciation");
        assert_eq!(results[2].as_ref().unwrap().name, "also-ok");
    }

    #[test]
    fn test_run_presets_covers_catalog_in_order() {
        let results = ScenarioRunner::new().run_presets();
        assert_eq!(results.len(), Preset::ALL.len());
        let names: Vec<_> = results
            .iter()
            .map(|r| r.as_ref().unwrap().name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["tier1", "tier2", "tier3", "conservative", "aggressive", "balanced"]
        );
    }

    #[test]
    fn test_higher_savings_rate_raises_net_assets() {
        let params = ParameterSet::default();
        let low = ScenarioRunner::with_config(ProjectionConfig {
            savings_rate: 0.1,
            ..Default::default()
        })
        .unwrap()
        .run(&params)
        .unwrap();
        let high = ScenarioRunner::with_config(ProjectionConfig {
            savings_rate: 0.4,
            ..Default::default()
        })
        .unwrap()
        .run(&params)
        .unwrap();

        assert!(high.summary.total_net_asset_change > low.summary.total_net_asset_change);
    }

    #[test]
    fn test_with_config_rejects_invalid_savings_rate() {
        let err = ScenarioRunner::with_config(ProjectionConfig {
            savings_rate: f64::NAN,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::SavingsRate(_)));
    }
}
