//! Core data models for the footprint engine

use serde::{Deserialize, Serialize};

/// Region assumed when a record carries none
pub const DEFAULT_REGION: &str = "us-east-1";

/// Service tag assumed when a record carries none
pub const UNKNOWN_SERVICE: &str = "Unknown";

/// One billed or declared unit of cloud infrastructure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudResource {
    pub id: String,
    pub service: String,
    pub region: String,
    #[serde(rename = "usageKwh")]
    pub usage_kwh: f64,
    #[serde(rename = "costUSD")]
    pub cost_usd: f64,
    /// ISO date string, YYYY-MM-DD
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Aggregation snapshot derived from exactly one resource list
///
/// Never mutated after creation; any change to the inputs produces a new
/// report via a fresh aggregation pass.
#[derive(Debug, Clone, Serialize)]
pub struct FootprintReport {
    #[serde(rename = "totalCO2grams")]
    pub total_co2_grams: f64,
    #[serde(rename = "totalCO2kg")]
    pub total_co2_kg: f64,
    #[serde(rename = "totalCostUSD")]
    pub total_cost_usd: f64,
    #[serde(rename = "avgCarbonIntensity")]
    pub avg_carbon_intensity: f64,
    #[serde(rename = "greenestRegion")]
    pub greenest_region: String,
    #[serde(rename = "mostExpensiveService")]
    pub most_expensive_service: String,
    #[serde(rename = "highestCarbonService")]
    pub highest_carbon_service: String,
    #[serde(rename = "byService")]
    pub by_service: Vec<ServiceBreakdown>,
    #[serde(rename = "byRegion")]
    pub by_region: Vec<RegionBreakdown>,
    #[serde(rename = "byDate")]
    pub by_date: Vec<DateBreakdown>,
    /// The exact input list, retained for traceability
    pub resources: Vec<CloudResource>,
}

impl FootprintReport {
    /// The well-defined report for an empty resource list
    pub fn empty() -> Self {
        Self {
            total_co2_grams: 0.0,
            total_co2_kg: 0.0,
            total_cost_usd: 0.0,
            avg_carbon_intensity: 0.0,
            greenest_region: "N/A".to_string(),
            most_expensive_service: "N/A".to_string(),
            highest_carbon_service: "N/A".to_string(),
            by_service: Vec::new(),
            by_region: Vec::new(),
            by_date: Vec::new(),
            resources: Vec::new(),
        }
    }
}

/// Per-service aggregation entry
#[derive(Debug, Clone, Serialize)]
pub struct ServiceBreakdown {
    pub service: String,
    #[serde(rename = "co2grams")]
    pub co2_grams: f64,
    #[serde(rename = "co2kg")]
    pub co2_kg: f64,
    #[serde(rename = "costUSD")]
    pub cost_usd: f64,
    #[serde(rename = "usageKwh")]
    pub usage_kwh: f64,
}

/// Per-region aggregation entry
#[derive(Debug, Clone, Serialize)]
pub struct RegionBreakdown {
    pub region: String,
    #[serde(rename = "carbonIntensity")]
    pub carbon_intensity: f64,
    #[serde(rename = "co2grams")]
    pub co2_grams: f64,
    #[serde(rename = "co2kg")]
    pub co2_kg: f64,
    #[serde(rename = "costUSD")]
    pub cost_usd: f64,
    #[serde(rename = "usageKwh")]
    pub usage_kwh: f64,
}

/// Per-date aggregation entry
#[derive(Debug, Clone, Serialize)]
pub struct DateBreakdown {
    pub date: String,
    #[serde(rename = "co2kg")]
    pub co2_kg: f64,
    #[serde(rename = "costUSD")]
    pub cost_usd: f64,
}
