//! Output formatting utilities

use carbon_lib::carbon::{intensity_severity, mass_severity, CarbonSeverity};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Parse a config-file value such as "json"; unknown values fall back
    /// to the default
    pub fn from_config(value: &str) -> Self {
        Self::from_str(value, true).unwrap_or_default()
    }
}

/// Print a table from a list of items
pub fn print_table<T: Tabled + Serialize>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("{}", "No items found".yellow());
                return;
            }
            let table = Table::new(items).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(&items) {
                println!("{}", json);
            }
        }
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a USD amount
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Format a CO2 mass in kilograms
pub fn format_co2_kg(kg: f64) -> String {
    format!("{:.2} kg", kg)
}

/// Format an energy amount in kWh
pub fn format_kwh(kwh: f64) -> String {
    format!("{:.2} kWh", kwh)
}

/// Color a grid intensity value by severity band
pub fn color_intensity(g_per_kwh: f64) -> String {
    let formatted = format!("{:.0} g/kWh", g_per_kwh);
    match intensity_severity(g_per_kwh) {
        CarbonSeverity::Low => formatted.green().to_string(),
        CarbonSeverity::Moderate => formatted.yellow().to_string(),
        CarbonSeverity::High => formatted.red().to_string(),
    }
}

/// Color an emitted mass by severity band
pub fn color_co2_kg(kg: f64) -> String {
    let formatted = format_co2_kg(kg);
    match mass_severity(kg) {
        CarbonSeverity::Low => formatted.green().to_string(),
        CarbonSeverity::Moderate => formatted.yellow().to_string(),
        CarbonSeverity::High => formatted.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(12.5), "$12.50");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn test_format_co2_and_kwh() {
        assert_eq!(format_co2_kg(41.5), "41.50 kg");
        assert_eq!(format_kwh(7.3), "7.30 kWh");
    }

    #[test]
    fn test_format_from_config() {
        assert!(matches!(OutputFormat::from_config("json"), OutputFormat::Json));
        assert!(matches!(OutputFormat::from_config("table"), OutputFormat::Table));
        assert!(matches!(OutputFormat::from_config("bogus"), OutputFormat::Table));
    }
}
