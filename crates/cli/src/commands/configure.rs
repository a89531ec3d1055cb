//! Config show/update command

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::output::print_success;

/// Show the current defaults, or update and persist them
pub fn show_or_update(format: Option<String>, top_count: Option<usize>) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();

    if format.is_none() && top_count.is_none() {
        println!("{}", "CLI Defaults".bold());
        println!("{}", "=".repeat(50));
        println!(
            "Output format:    {}",
            config.default_format.as_deref().unwrap_or("table")
        );
        println!(
            "Top emitters:     {}",
            config
                .default_top_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "5".to_string())
        );
        return Ok(());
    }

    if let Some(format) = format {
        config.default_format = Some(format);
    }
    if let Some(count) = top_count {
        config.default_top_count = Some(count);
    }
    config.save()?;
    print_success("Configuration saved");

    Ok(())
}
