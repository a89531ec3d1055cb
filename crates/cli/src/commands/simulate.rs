//! What-if simulation command

use std::path::Path;

use anyhow::{bail, Result};
use carbon_lib::carbon::calculate_footprint;
use carbon_lib::region_meta::{region_label, region_meta};
use carbon_lib::simulator::{
    compare_reports, quick_win_overrides, simulate, SimulationSettings,
};
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::commands::load_resources;
use crate::output::{
    format_co2_kg, format_currency, print_info, print_table, print_warning, OutputFormat,
};

/// Row for the before/after comparison table
#[derive(Tabled, Serialize)]
struct ComparisonRow {
    #[tabled(rename = "Report")]
    label: String,
    #[tabled(rename = "CO2")]
    co2: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Avg Intensity")]
    intensity: String,
}

/// Parse one `--override id=region` argument
fn parse_override(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((id, region)) if !id.is_empty() && !region.is_empty() => {
            Ok((id.to_string(), region.to_string()))
        }
        _ => bail!("Invalid override '{}': expected <resource-id>=<region>", raw),
    }
}

/// Run a what-if simulation and print the comparison
pub fn run_simulation(
    path: &Path,
    quick_wins: bool,
    efficient_compute: bool,
    overrides: &[String],
    format: OutputFormat,
) -> Result<()> {
    let resources = load_resources(path)?;

    let mut settings = SimulationSettings {
        enabled: true,
        efficient_compute,
        overrides: if quick_wins {
            quick_win_overrides(&resources)
        } else {
            Default::default()
        },
    };

    for raw in overrides {
        let (id, region) = parse_override(raw)?;
        if region_meta(&region).is_none() {
            print_warning(&format!(
                "Unknown region '{}': the default intensity of 400 g/kWh will be used",
                region
            ));
        }
        settings.set_override(id, region);
    }

    let original = calculate_footprint(&resources);
    let Some(simulated) = simulate(&resources, &settings) else {
        print_info("No resources loaded; nothing to simulate");
        return Ok(());
    };

    let summary = compare_reports(&original, &simulated);

    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct SimulationOutput<'a> {
                original: &'a carbon_lib::models::FootprintReport,
                simulated: &'a carbon_lib::models::FootprintReport,
                summary: &'a carbon_lib::simulator::SavingsSummary,
            }
            let output = SimulationOutput {
                original: &original,
                simulated: &simulated,
                summary: &summary,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!("{}", "What-If Simulation".bold());
            println!("{}", "=".repeat(50));
            if !settings.overrides.is_empty() {
                println!("Region overrides:       {}", settings.overrides.len());
            }
            if efficient_compute {
                println!("Efficient compute:      EC2 usage x 0.8");
            }
            println!();

            let rows = vec![
                ComparisonRow {
                    label: "Original".to_string(),
                    co2: format_co2_kg(original.total_co2_kg),
                    cost: format_currency(original.total_cost_usd),
                    intensity: format!("{:.0} g/kWh", original.avg_carbon_intensity),
                },
                ComparisonRow {
                    label: "Simulated".to_string(),
                    co2: format_co2_kg(simulated.total_co2_kg),
                    cost: format_currency(simulated.total_cost_usd),
                    intensity: format!("{:.0} g/kWh", simulated.avg_carbon_intensity),
                },
            ];
            print_table(&rows, OutputFormat::Table);

            println!();
            println!(
                "{} {} ({:.1}%)",
                "CO2 saved:".bold(),
                format_co2_kg(summary.co2_saved_kg).green().bold(),
                summary.percent_saved
            );
            if simulated.greenest_region != original.greenest_region {
                println!(
                    "Greenest region is now {}",
                    region_label(&simulated.greenest_region).cyan()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        let (id, region) = parse_override("web-1=eu-north-1").unwrap();
        assert_eq!(id, "web-1");
        assert_eq!(region, "eu-north-1");
    }

    #[test]
    fn test_parse_override_rejects_malformed() {
        assert!(parse_override("web-1").is_err());
        assert!(parse_override("=eu-north-1").is_err());
        assert!(parse_override("web-1=").is_err());
    }
}
