//! Advisory boundary: ranking payload and suggestion shape
//!
//! The engine supplies the highest-carbon resources as the payload for an
//! external suggestion-generation service and models the shape of what
//! comes back. The network call itself lives outside this crate.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::carbon::carbon_grams;
use crate::models::CloudResource;

/// Default number of resources sent to the suggestion service
pub const DEFAULT_TOP_N: usize = 5;

/// Implementation effort estimated for a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    Low,
    Medium,
    High,
}

/// Category a suggestion falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Runtime,
    Region,
    Architecture,
    General,
}

/// One suggestion returned by the external advisory service
///
/// Treated as an opaque artifact: produced elsewhere, only deserialized
/// and displayed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreenSuggestion {
    pub suggestion: String,
    #[serde(rename = "estimatedCO2Reduction")]
    pub estimated_co2_reduction: String,
    #[serde(rename = "estimatedCostSavings")]
    pub estimated_cost_savings: String,
    pub effort: Effort,
    pub category: SuggestionCategory,
}

/// The top N highest-carbon resources, ranked by monthly CO2 grams
pub fn top_emitters(resources: &[CloudResource], n: usize) -> Vec<CloudResource> {
    let mut ranked: Vec<&CloudResource> = resources.iter().collect();
    ranked.sort_by(|a, b| {
        carbon_grams(b.usage_kwh, &b.region)
            .partial_cmp(&carbon_grams(a.usage_kwh, &a.region))
            .unwrap_or(Ordering::Equal)
    });
    ranked.into_iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: &str, region: &str, usage_kwh: f64) -> CloudResource {
        CloudResource {
            id: id.to_string(),
            service: "EC2".to_string(),
            region: region.to_string(),
            usage_kwh,
            cost_usd: 1.0,
            date: "2024-01-01".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_ranked_by_emissions_not_usage() {
        // Lower usage in a dirty grid can out-emit higher usage in a clean one
        let resources = vec![
            resource("clean-big", "eu-north-1", 1000.0), // 8,000 g
            resource("dirty-small", "ap-southeast-2", 50.0), // 38,000 g
        ];
        let top = top_emitters(&resources, 2);
        assert_eq!(top[0].id, "dirty-small");
        assert_eq!(top[1].id, "clean-big");
    }

    #[test]
    fn test_truncates_to_n() {
        let resources: Vec<_> = (0..10)
            .map(|i| resource(&format!("r{i}"), "us-east-1", i as f64))
            .collect();
        let top = top_emitters(&resources, DEFAULT_TOP_N);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].id, "r9");
    }

    #[test]
    fn test_fewer_resources_than_n() {
        let resources = vec![resource("only", "us-east-1", 1.0)];
        assert_eq!(top_emitters(&resources, 5).len(), 1);
    }

    #[test]
    fn test_suggestion_deserializes_from_service_response() {
        let json = r#"{
            "suggestion": "Move the web tier to eu-north-1.",
            "estimatedCO2Reduction": "~30%",
            "estimatedCostSavings": "~$15/month",
            "effort": "Low",
            "category": "region"
        }"#;
        let s: GreenSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(s.effort, Effort::Low);
        assert_eq!(s.category, SuggestionCategory::Region);
    }
}
