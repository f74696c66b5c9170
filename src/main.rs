//! Household Projection CLI
//!
//! Projects a household's net assets across the marriage and child-rearing stages

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use household_projection::export::{default_export_name, to_wan, write_stage_csv_file, write_summary_csv};
use household_projection::params::{
    load_parameter_sets_csv, load_source, save_parameters, ParameterSet, Preset,
};
use household_projection::projection::{ProjectionConfig, ProjectionResult, DEFAULT_SAVINGS_RATE};
use household_projection::scenario::ScenarioRunner;

#[derive(Parser, Debug)]
#[command(
    name = "household_projection",
    about = "Staged net-asset projection for marriage and child-rearing costs"
)]
struct Cli {
    #[arg(
        long,
        help = "Preset (tier1, tier2, tier3, conservative, aggressive, balanced) or JSON parameter file"
    )]
    params: Option<String>,

    #[arg(
        long,
        conflicts_with = "params",
        help = "CSV of named households; prints one summary row per household"
    )]
    batch: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = DEFAULT_SAVINGS_RATE,
        value_parser = parse_savings_rate,
        help = "Fraction of stage income that earns the investment return"
    )]
    savings_rate: f64,

    #[arg(long, help = "Write the stage table to this CSV file")]
    csv: Option<PathBuf>,

    #[arg(long, help = "Write the stage table to a timestamped CSV file")]
    export: bool,

    #[arg(long, help = "Save the parameters used for this run as JSON")]
    save_config: Option<PathBuf>,
}

fn parse_savings_rate(raw: &str) -> Result<f64, String> {
    let rate: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("{rate} is not a fraction in [0, 1]"))
    }
}

fn print_result(label: &str, result: &ProjectionResult) {
    println!("Projection: {}", label);
    println!("{:<10} {:>5} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Stage", "Yrs", "NetCF(万)", "Property(万)", "Cost(万)", "Inv+Sup(万)", "Total(万)");
    println!("{}", "-".repeat(84));

    for stage in &result.stages {
        println!("{:<10} {:>5} {:>12.1} {:>12.1} {:>12.1} {:>12.1} {:>12.1}",
            stage.name,
            stage.years,
            to_wan(stage.net_cash_flow),
            to_wan(stage.property_value_change),
            to_wan(stage.marriage_and_child_cost),
            to_wan(stage.investment_and_support_gain),
            to_wan(stage.total_economic_gain),
        );
    }

    let summary = &result.summary;
    let health = summary.health();
    println!("\nSummary:");
    println!("  Net asset change:      ¥{:.1}万", to_wan(summary.total_net_asset_change));
    println!("  Total marriage cost:   ¥{:.1}万", to_wan(summary.total_marriage_cost));
    println!("  Total child cost:      ¥{:.1}万", to_wan(summary.total_child_cost));
    println!("  Stage-charged child:   ¥{:.1}万", to_wan(summary.stage_attributed_child_cost));
    println!("  Total cost:            ¥{:.1}万", to_wan(summary.total_cost));
    println!("  Min cash flow surplus: ¥{:.1}万", to_wan(summary.min_cash_flow_surplus));
    println!("  Risk coefficient:      {:.2}", summary.risk_coefficient);
    println!("  Net assets positive:   {}", health.net_assets_positive);
    println!("  Cash flow positive:    {}", health.cash_flow_positive);
    println!("  Risk buffer adequate:  {}", health.risk_buffer_adequate);
}

fn run_batch(runner: &ScenarioRunner, path: &Path) -> Result<()> {
    let sets = load_parameter_sets_csv(path)
        .with_context(|| format!("loading batch file {}", path.display()))?;

    let mut rows = Vec::with_capacity(sets.len());
    for named in runner.run_named_batch(&sets) {
        rows.push(named.context("projecting batch household")?);
    }

    write_summary_csv(
        std::io::stdout().lock(),
        rows.iter().map(|r| (r.name.as_str(), &r.result.summary)),
    )
    .context("writing summary table")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let runner = ScenarioRunner::with_config(ProjectionConfig {
        savings_rate: cli.savings_rate,
        ..Default::default()
    })
    .context("invalid projection config")?;

    if let Some(path) = &cli.batch {
        return run_batch(&runner, path);
    }

    let (label, params) = match &cli.params {
        Some(source) => {
            let label = match source.parse::<Preset>() {
                Ok(preset) => format!("{} ({})", preset.display_name(), preset),
                Err(_) => source.clone(),
            };
            let params = load_source(source).with_context(|| format!("loading {}", source))?;
            (label, params)
        }
        None => ("default".to_string(), ParameterSet::default()),
    };

    let result = runner.run(&params).context("invalid parameters")?;
    print_result(&label, &result);

    if let Some(path) = &cli.save_config {
        save_parameters(path, &params)
            .with_context(|| format!("saving parameters to {}", path.display()))?;
        println!("\nParameters saved to: {}", path.display());
    }

    let export_path = match (&cli.csv, cli.export) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(PathBuf::from(default_export_name())),
        (None, false) => None,
    };
    if let Some(path) = export_path {
        write_stage_csv_file(&path, &result)
            .with_context(|| format!("writing stage table to {}", path.display()))?;
        println!("Stage table written to: {}", path.display());
    }

    Ok(())
}
