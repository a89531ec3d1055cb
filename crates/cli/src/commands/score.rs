//! Green score command

use std::path::Path;

use anyhow::Result;
use carbon_lib::carbon::calculate_footprint;
use carbon_lib::score::{compute_green_score, Grade};
use colored::Colorize;

use crate::commands::load_resources;
use crate::output::{color_intensity, OutputFormat};

fn color_grade(grade: Grade) -> String {
    let letter = grade.to_string();
    match grade {
        Grade::A | Grade::B => letter.green().bold().to_string(),
        Grade::C => letter.yellow().bold().to_string(),
        Grade::D | Grade::F => letter.red().bold().to_string(),
    }
}

/// Compute and print the green score for a billing export
pub fn show_score(path: &Path, badge_only: bool, format: OutputFormat) -> Result<()> {
    let resources = load_resources(path)?;
    let report = calculate_footprint(&resources);
    let result = compute_green_score(&report);

    if badge_only {
        println!("{}", result.badge_markdown);
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            println!("{}", "Green Score".bold());
            println!("{}", "=".repeat(50));
            println!("Score:              {} / 100", result.score.to_string().bold());
            println!("Grade:              {}", color_grade(result.grade));
            println!(
                "Weighted intensity: {}",
                color_intensity(result.weighted_intensity)
            );
            println!();
            println!("Badge: {}", result.badge_markdown.dimmed());
        }
    }

    Ok(())
}
