//! Green score computation
//!
//! Derives a 0-100 sustainability score from a footprint report's
//! usage-weighted carbon intensity, plus a letter grade and an embeddable
//! shields.io badge.

use std::fmt;

use serde::Serialize;

use crate::carbon::MAX_KNOWN_INTENSITY;
use crate::models::FootprintReport;

/// Letter grade bands over the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    fn from_score(score: u32) -> Self {
        if score >= 80 {
            Grade::A
        } else if score >= 60 {
            Grade::B
        } else if score >= 40 {
            Grade::C
        } else if score >= 20 {
            Grade::D
        } else {
            Grade::F
        }
    }

    /// shields.io color name for this grade
    pub fn color(self) -> &'static str {
        match self {
            Grade::A => "brightgreen",
            Grade::B => "green",
            Grade::C => "yellow",
            Grade::D => "orange",
            Grade::F => "red",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Result of scoring one footprint report
#[derive(Debug, Clone, Serialize)]
pub struct GreenScoreResult {
    pub score: u32,
    pub grade: Grade,
    pub color: &'static str,
    #[serde(rename = "weightedIntensity")]
    pub weighted_intensity: f64,
    #[serde(rename = "shieldsUrl")]
    pub shields_url: String,
    #[serde(rename = "badgeMarkdown")]
    pub badge_markdown: String,
}

/// Score a footprint report
///
/// The scale anchors the worst tabulated grid (760 gCO2/kWh) to score 0
/// and a zero-carbon grid to 100. Zero total usage scores 100.
pub fn compute_green_score(report: &FootprintReport) -> GreenScoreResult {
    let total_kwh: f64 = report.by_region.iter().map(|r| r.usage_kwh).sum();

    let weighted_intensity = if total_kwh > 0.0 {
        report
            .by_region
            .iter()
            .map(|r| r.usage_kwh * r.carbon_intensity)
            .sum::<f64>()
            / total_kwh
    } else {
        0.0
    };

    let score = (100.0 - (weighted_intensity / MAX_KNOWN_INTENSITY) * 100.0)
        .round()
        .max(0.0) as u32;
    let grade = Grade::from_score(score);
    let color = grade.color();

    let shields_url = format!(
        "https://img.shields.io/badge/GreenScore-{score}%2F100-{color}?logo=leaf&logoColor=white"
    );
    let badge_markdown = format!("[![GreenScore]({shields_url})](https://github.com)");

    GreenScoreResult {
        score,
        grade,
        color,
        weighted_intensity,
        shields_url,
        badge_markdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carbon::calculate_footprint;
    use crate::models::CloudResource;

    fn resource(region: &str, usage_kwh: f64) -> CloudResource {
        CloudResource {
            id: format!("r-{region}-{usage_kwh}"),
            service: "EC2".to_string(),
            region: region.to_string(),
            usage_kwh,
            cost_usd: 1.0,
            date: "2024-01-01".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_midpoint_intensity_scores_fifty() {
        // 380 g/kWh is exactly half of the 760 anchor
        let mut report = calculate_footprint(&[resource("us-east-1", 1.0)]);
        report.by_region[0].carbon_intensity = 380.0;
        let result = compute_green_score(&report);
        assert_eq!(result.weighted_intensity, 380.0);
        assert_eq!(result.score, 50);
        assert_eq!(result.grade, Grade::C);
        assert_eq!(result.color, "yellow");
    }

    #[test]
    fn test_worst_region_scores_zero() {
        let report = calculate_footprint(&[resource("ap-southeast-2", 100.0)]);
        let result = compute_green_score(&report);
        assert_eq!(result.score, 0);
        assert_eq!(result.grade, Grade::F);
    }

    #[test]
    fn test_clean_region_scores_a() {
        let report = calculate_footprint(&[resource("eu-north-1", 100.0)]);
        let result = compute_green_score(&report);
        // 8/760 rounds to a score of 99
        assert_eq!(result.score, 99);
        assert_eq!(result.grade, Grade::A);
        assert_eq!(result.color, "brightgreen");
    }

    #[test]
    fn test_weighted_by_usage() {
        // 90% of usage in Sydney (760), 10% in Stockholm (8)
        let report = calculate_footprint(&[
            resource("ap-southeast-2", 90.0),
            resource("eu-north-1", 10.0),
        ]);
        let result = compute_green_score(&report);
        let expected = (90.0 * 760.0 + 10.0 * 8.0) / 100.0;
        assert!((result.weighted_intensity - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_report_scores_hundred() {
        let result = compute_green_score(&calculate_footprint(&[]));
        assert_eq!(result.weighted_intensity, 0.0);
        assert_eq!(result.score, 100);
        assert_eq!(result.grade, Grade::A);
    }

    #[test]
    fn test_badge_strings() {
        let report = calculate_footprint(&[resource("eu-north-1", 10.0)]);
        let result = compute_green_score(&report);
        assert!(result.shields_url.contains("GreenScore-99%2F100-brightgreen"));
        assert!(result.badge_markdown.starts_with("[![GreenScore]("));
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_score(80), Grade::A);
        assert_eq!(Grade::from_score(79), Grade::B);
        assert_eq!(Grade::from_score(60), Grade::B);
        assert_eq!(Grade::from_score(59), Grade::C);
        assert_eq!(Grade::from_score(40), Grade::C);
        assert_eq!(Grade::from_score(39), Grade::D);
        assert_eq!(Grade::from_score(20), Grade::D);
        assert_eq!(Grade::from_score(19), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }
}
