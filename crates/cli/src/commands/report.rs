//! Footprint report and top-emitter commands

use std::path::Path;

use anyhow::Result;
use carbon_lib::advisor::top_emitters;
use carbon_lib::carbon::{calculate_footprint, carbon_grams};
use carbon_lib::models::FootprintReport;
use carbon_lib::region_meta::region_label;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::commands::load_resources;
use crate::output::{
    color_co2_kg, color_intensity, format_co2_kg, format_currency, format_kwh, print_table,
    print_warning, OutputFormat,
};

/// Row for the by-service table
#[derive(Tabled, Serialize)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "CO2")]
    co2: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Energy")]
    energy: String,
}

/// Row for the by-region table
#[derive(Tabled, Serialize)]
struct RegionRow {
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Intensity")]
    intensity: String,
    #[tabled(rename = "CO2")]
    co2: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

/// Row for the by-date table
#[derive(Tabled, Serialize)]
struct DateRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "CO2")]
    co2: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

/// Row for the top-emitters table
#[derive(Tabled, Serialize)]
struct EmitterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "CO2")]
    co2: String,
    #[tabled(rename = "Energy")]
    energy: String,
}

fn print_report(report: &FootprintReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Table => {
            println!("{}", "Carbon Footprint Report".bold());
            println!("{}", "=".repeat(50));
            println!("Resources:              {}", report.resources.len());
            println!("Total CO2:              {}", color_co2_kg(report.total_co2_kg));
            println!(
                "Total cost:             {}",
                format_currency(report.total_cost_usd)
            );
            println!(
                "Average intensity:      {}",
                color_intensity(report.avg_carbon_intensity)
            );
            println!(
                "Greenest region:        {}",
                region_label(&report.greenest_region).cyan()
            );
            println!(
                "Highest-carbon service: {}",
                report.highest_carbon_service.red()
            );
            println!(
                "Most expensive service: {}",
                report.most_expensive_service.yellow()
            );

            if !report.by_service.is_empty() {
                println!();
                println!("{}", "By Service".bold());
                let rows: Vec<ServiceRow> = report
                    .by_service
                    .iter()
                    .map(|s| ServiceRow {
                        service: s.service.clone(),
                        co2: format_co2_kg(s.co2_kg),
                        cost: format_currency(s.cost_usd),
                        energy: format_kwh(s.usage_kwh),
                    })
                    .collect();
                print_table(&rows, OutputFormat::Table);
            }

            if !report.by_region.is_empty() {
                println!();
                println!("{}", "By Region".bold());
                let rows: Vec<RegionRow> = report
                    .by_region
                    .iter()
                    .map(|r| RegionRow {
                        region: region_label(&r.region).to_string(),
                        intensity: color_intensity(r.carbon_intensity),
                        co2: format_co2_kg(r.co2_kg),
                        cost: format_currency(r.cost_usd),
                    })
                    .collect();
                print_table(&rows, OutputFormat::Table);
            }

            if !report.by_date.is_empty() {
                println!();
                println!("{}", "By Date".bold());
                let rows: Vec<DateRow> = report
                    .by_date
                    .iter()
                    .map(|d| DateRow {
                        date: d.date.clone(),
                        co2: format_co2_kg(d.co2_kg),
                        cost: format_currency(d.cost_usd),
                    })
                    .collect();
                print_table(&rows, OutputFormat::Table);
            }
        }
    }

    Ok(())
}

/// Compute and print the footprint report for a billing export
pub fn show_report(path: &Path, format: OutputFormat) -> Result<()> {
    let resources = load_resources(path)?;
    if resources.is_empty() {
        print_warning("No resources found in input");
    }
    let report = calculate_footprint(&resources);
    print_report(&report, format)
}

/// Print the top N highest-carbon resources
pub fn show_top(path: &Path, count: usize, format: OutputFormat) -> Result<()> {
    let resources = load_resources(path)?;
    let top = top_emitters(&resources, count);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&top)?);
        }
        OutputFormat::Table => {
            println!("{}", format!("Top {} Emitters", top.len()).bold());
            let rows: Vec<EmitterRow> = top
                .iter()
                .map(|r| EmitterRow {
                    id: r.id.clone(),
                    service: r.service.clone(),
                    region: r.region.clone(),
                    co2: color_co2_kg(carbon_grams(r.usage_kwh, &r.region) / 1000.0),
                    energy: format_kwh(r.usage_kwh),
                })
                .collect();
            print_table(&rows, OutputFormat::Table);
        }
    }

    Ok(())
}
