//! Run every built-in household preset and print a side-by-side summary
//!
//! Outputs one line per preset in 万, plus the same table as CSV when a path is given

use anyhow::{Context, Result};
use std::fs::File;
use std::time::Instant;

use household_projection::export::{to_wan, write_summary_csv};
use household_projection::params::Preset;
use household_projection::scenario::ScenarioRunner;

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    let runner = ScenarioRunner::new();
    let results = runner
        .run_presets()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .context("projecting presets")?;
    println!("Projected {} presets in {:?}\n", results.len(), start.elapsed());

    println!("{:<14} {:>12} {:>12} {:>12} {:>12} {:>8}",
        "Preset", "NetAsset(万)", "Marriage(万)", "Child(万)", "MinCF(万)", "Risk");
    println!("{}", "-".repeat(76));

    for named in &results {
        let label = named
            .name
            .parse::<Preset>()
            .map(|p| p.display_name().to_string())
            .unwrap_or_else(|_| named.name.clone());
        let s = &named.result.summary;
        println!("{:<14} {:>12.1} {:>12.1} {:>12.1} {:>12.1} {:>8.2}",
            label,
            to_wan(s.total_net_asset_change),
            to_wan(s.total_marriage_cost),
            to_wan(s.total_child_cost),
            to_wan(s.min_cash_flow_surplus),
            s.risk_coefficient,
        );
    }

    if let Some(path) = std::env::args().nth(1) {
        let file = File::create(&path).with_context(|| format!("creating {}", path))?;
        write_summary_csv(
            file,
            results.iter().map(|r| (r.name.as_str(), &r.result.summary)),
        )
        .context("writing preset summary")?;
        println!("\nSummary written to {}", path);
    }

    Ok(())
}
