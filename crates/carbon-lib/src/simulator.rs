//! What-if simulation over a loaded resource set
//!
//! Applies hypothetical region reassignments and a compute-efficiency
//! multiplier to a resource list, then re-aggregates it into a second
//! report comparable with the original. The original list is never
//! mutated.

use std::collections::HashMap;

use serde::Serialize;

use crate::carbon::calculate_footprint;
use crate::models::{CloudResource, FootprintReport};

/// Usage multiplier for compute instances when the efficiency toggle is on
///
/// Models roughly 20% lower power draw from a more efficient processor
/// architecture.
pub const EFFICIENT_COMPUTE_FACTOR: f64 = 0.8;

/// Service tag the efficiency toggle applies to
const COMPUTE_SERVICE: &str = "EC2";

/// Dirty-to-clean region reassignments used to seed a simulation
const QUICK_WIN_TARGETS: &[(&str, &str)] = &[
    ("us-east-1", "us-west-2"),
    ("us-east-2", "us-west-2"),
    ("eu-west-1", "eu-north-1"),
    ("eu-west-2", "eu-north-1"),
    ("eu-west-3", "eu-north-1"),
    ("eu-central-1", "eu-north-1"),
    ("ap-southeast-1", "ap-northeast-1"),
    ("ap-southeast-2", "ap-northeast-1"),
    ("ap-south-1", "ap-northeast-1"),
    ("ap-northeast-2", "ap-northeast-1"),
];

/// Settings for one simulation pass
#[derive(Debug, Clone, Default)]
pub struct SimulationSettings {
    /// Master toggle; a disabled simulation produces no report
    pub enabled: bool,
    /// Apply [`EFFICIENT_COMPUTE_FACTOR`] to compute instances
    pub efficient_compute: bool,
    /// Per-resource region reassignments, resource id to replacement region
    pub overrides: HashMap<String, String>,
}

impl SimulationSettings {
    pub fn set_override(&mut self, id: impl Into<String>, region: impl Into<String>) {
        self.overrides.insert(id.into(), region.into());
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }
}

/// Quick-win target region for a given current region, if one is configured
pub fn quick_win_target(region: &str) -> Option<&'static str> {
    QUICK_WIN_TARGETS
        .iter()
        .find(|(from, _)| *from == region)
        .map(|(_, to)| *to)
}

/// Pre-populate region overrides from the quick-win table
///
/// Resources whose region has no configured cleaner target are left
/// unoverridden.
pub fn quick_win_overrides(resources: &[CloudResource]) -> HashMap<String, String> {
    let mut overrides = HashMap::new();
    for r in resources {
        if let Some(target) = quick_win_target(&r.region) {
            overrides.insert(r.id.clone(), target.to_string());
        }
    }
    overrides
}

/// Apply the simulation transform to a resource list
pub fn transform_resources(
    resources: &[CloudResource],
    settings: &SimulationSettings,
) -> Vec<CloudResource> {
    resources
        .iter()
        .map(|r| {
            let region = settings
                .overrides
                .get(&r.id)
                .cloned()
                .unwrap_or_else(|| r.region.clone());
            let usage_kwh = if settings.efficient_compute && r.service == COMPUTE_SERVICE {
                r.usage_kwh * EFFICIENT_COMPUTE_FACTOR
            } else {
                r.usage_kwh
            };
            CloudResource {
                region,
                usage_kwh,
                ..r.clone()
            }
        })
        .collect()
}

/// Run the simulation and aggregate the transformed list
///
/// Returns `None` when the simulation is disabled or there is nothing to
/// simulate; neither case is an error.
pub fn simulate(
    resources: &[CloudResource],
    settings: &SimulationSettings,
) -> Option<FootprintReport> {
    if !settings.enabled || resources.is_empty() {
        return None;
    }
    Some(calculate_footprint(&transform_resources(resources, settings)))
}

/// Before/after comparison of two reports
#[derive(Debug, Clone, Serialize)]
pub struct SavingsSummary {
    #[serde(rename = "co2SavedKg")]
    pub co2_saved_kg: f64,
    #[serde(rename = "percentSaved")]
    pub percent_saved: f64,
}

/// Compare an original report against its simulated counterpart
///
/// A simulation that increases emissions reports zero savings rather than
/// a negative number.
pub fn compare_reports(original: &FootprintReport, simulated: &FootprintReport) -> SavingsSummary {
    let co2_saved_kg = (original.total_co2_kg - simulated.total_co2_kg).max(0.0);
    let percent_saved = if original.total_co2_kg > 0.0 {
        co2_saved_kg / original.total_co2_kg * 100.0
    } else {
        0.0
    };
    SavingsSummary {
        co2_saved_kg,
        percent_saved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: &str, service: &str, region: &str, usage_kwh: f64) -> CloudResource {
        CloudResource {
            id: id.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            usage_kwh,
            cost_usd: 10.0,
            date: "2024-01-01".to_string(),
            description: None,
        }
    }

    fn enabled() -> SimulationSettings {
        SimulationSettings {
            enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_simulation_returns_none() {
        let resources = vec![resource("a", "EC2", "us-east-1", 100.0)];
        assert!(simulate(&resources, &SimulationSettings::default()).is_none());
    }

    #[test]
    fn test_empty_resources_return_none() {
        assert!(simulate(&[], &enabled()).is_none());
    }

    #[test]
    fn test_region_override_applies() {
        let resources = vec![
            resource("a", "EC2", "us-east-1", 100.0),
            resource("b", "S3", "us-east-1", 1.0),
        ];
        let mut settings = enabled();
        settings.set_override("a", "eu-north-1");

        let transformed = transform_resources(&resources, &settings);
        assert_eq!(transformed[0].region, "eu-north-1");
        assert_eq!(transformed[1].region, "us-east-1");
        // Everything else passes through
        assert_eq!(transformed[0].usage_kwh, 100.0);
        assert_eq!(transformed[0].cost_usd, 10.0);
    }

    #[test]
    fn test_efficiency_only_affects_compute() {
        let resources = vec![
            resource("a", "EC2", "us-east-1", 100.0),
            resource("b", "RDS", "us-east-1", 100.0),
        ];
        let mut settings = enabled();
        settings.efficient_compute = true;

        let transformed = transform_resources(&resources, &settings);
        assert!((transformed[0].usage_kwh - 80.0).abs() < 1e-9);
        assert_eq!(transformed[1].usage_kwh, 100.0);
    }

    #[test]
    fn test_quick_win_overrides() {
        let resources = vec![
            resource("a", "EC2", "us-east-1", 100.0),
            resource("b", "EC2", "eu-west-3", 50.0),
            resource("c", "EC2", "us-west-2", 50.0), // already clean, no target
        ];
        let overrides = quick_win_overrides(&resources);
        assert_eq!(overrides.get("a").map(String::as_str), Some("us-west-2"));
        assert_eq!(overrides.get("b").map(String::as_str), Some("eu-north-1"));
        assert!(!overrides.contains_key("c"));
    }

    #[test]
    fn test_simulation_reduces_emissions() {
        let resources = vec![resource("a", "EC2", "us-east-1", 100.0)];
        let original = calculate_footprint(&resources);

        let mut settings = enabled();
        settings.overrides = quick_win_overrides(&resources);
        let simulated = simulate(&resources, &settings).unwrap();

        let summary = compare_reports(&original, &simulated);
        // 100 kWh moved from 415 to 136 g/kWh saves 27.9 kg
        assert!((summary.co2_saved_kg - 27.9).abs() < 1e-9);
        assert!(summary.percent_saved > 67.0 && summary.percent_saved < 68.0);
    }

    #[test]
    fn test_savings_never_negative() {
        let resources = vec![resource("a", "EC2", "eu-north-1", 100.0)];
        let original = calculate_footprint(&resources);

        // Deliberately move to the dirtiest region
        let mut settings = enabled();
        settings.set_override("a", "ap-southeast-2");
        let simulated = simulate(&resources, &settings).unwrap();

        let summary = compare_reports(&original, &simulated);
        assert_eq!(summary.co2_saved_kg, 0.0);
        assert_eq!(summary.percent_saved, 0.0);
    }

    #[test]
    fn test_zero_baseline_guards_percent() {
        let resources = vec![resource("a", "EC2", "us-east-1", 0.0)];
        let original = calculate_footprint(&resources);
        let simulated = simulate(&resources, &enabled()).unwrap();
        let summary = compare_reports(&original, &simulated);
        assert_eq!(summary.percent_saved, 0.0);
    }

    #[test]
    fn test_clear_overrides() {
        let mut settings = enabled();
        settings.set_override("a", "eu-north-1");
        settings.clear_overrides();
        assert!(settings.overrides.is_empty());
    }
}
