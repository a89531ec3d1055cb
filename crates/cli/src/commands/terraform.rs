//! Terraform estimation command

use std::path::Path;

use anyhow::{Context, Result};
use carbon_lib::carbon::{calculate_footprint, carbon_grams};
use carbon_lib::terraform::parse_terraform;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{
    color_co2_kg, format_co2_kg, format_currency, format_kwh, print_table, print_warning,
    OutputFormat,
};

/// Row for the extracted-resources table
#[derive(Tabled, Serialize)]
struct TerraformRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Energy")]
    energy: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "CO2")]
    co2: String,
}

/// Estimate the footprint of undeployed infrastructure from Terraform source
pub fn show_terraform(path: &Path, format: OutputFormat) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let resources = parse_terraform(&content);
    let report = calculate_footprint(&resources);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table if resources.is_empty() => {
            print_warning("No supported resource blocks found");
        }
        OutputFormat::Table => {
            println!("{}", "Terraform Footprint Estimate".bold());
            println!("{}", "=".repeat(50));

            let rows: Vec<TerraformRow> = resources
                .iter()
                .map(|r| TerraformRow {
                    id: r.id.clone(),
                    service: r.service.clone(),
                    region: r.region.clone(),
                    energy: format_kwh(r.usage_kwh),
                    cost: format_currency(r.cost_usd),
                    co2: color_co2_kg(carbon_grams(r.usage_kwh, &r.region) / 1000.0),
                })
                .collect();
            print_table(&rows, OutputFormat::Table);

            println!();
            println!(
                "Estimated monthly total: {} / {}",
                format_co2_kg(report.total_co2_kg).bold(),
                format_currency(report.total_cost_usd).bold()
            );
        }
    }

    Ok(())
}
