//! Carbon intensity data and footprint aggregation
//!
//! The intensity table maps region codes to grid carbon intensity in
//! gCO2eq per kWh. [`calculate_footprint`] folds a resource list into a
//! [`FootprintReport`] with totals and service/region/date breakdowns.

use std::cmp::Ordering;

use crate::models::{
    CloudResource, DateBreakdown, FootprintReport, RegionBreakdown, ServiceBreakdown,
};

/// Grid carbon intensity per region, gCO2eq per kWh
const REGION_CARBON_INTENSITY: &[(&str, f64)] = &[
    ("us-east-1", 415.0),      // Virginia, coal-heavy
    ("us-east-2", 410.0),      // Ohio
    ("us-west-1", 210.0),      // N. California, mixed
    ("us-west-2", 136.0),      // Oregon, hydro/wind
    ("eu-west-1", 316.0),      // Ireland
    ("eu-west-2", 228.0),      // London
    ("eu-west-3", 56.0),       // Paris, nuclear
    ("eu-central-1", 338.0),   // Frankfurt
    ("eu-north-1", 8.0),       // Stockholm, almost all hydro
    ("ap-southeast-1", 493.0), // Singapore, gas-heavy
    ("ap-southeast-2", 760.0), // Sydney, coal-heavy
    ("ap-northeast-1", 506.0), // Tokyo
    ("ap-northeast-2", 415.0), // Seoul
    ("ap-south-1", 708.0),     // Mumbai, coal
    ("sa-east-1", 68.0),       // Sao Paulo, hydro
    ("ca-central-1", 120.0),   // Canada, hydro
];

/// Fallback intensity for regions not in the table
pub const DEFAULT_INTENSITY: f64 = 400.0;

/// Worst tabulated regional intensity (ap-southeast-2)
pub const MAX_KNOWN_INTENSITY: f64 = 760.0;

/// Look up the grid carbon intensity for a region
///
/// Total over all strings: unknown regions get [`DEFAULT_INTENSITY`].
pub fn region_intensity(region: &str) -> f64 {
    REGION_CARBON_INTENSITY
        .iter()
        .find(|(code, _)| *code == region)
        .map(|(_, intensity)| *intensity)
        .unwrap_or(DEFAULT_INTENSITY)
}

/// All region codes present in the intensity table
pub fn known_regions() -> impl Iterator<Item = &'static str> {
    REGION_CARBON_INTENSITY.iter().map(|(code, _)| *code)
}

/// CO2 emissions in grams for a given monthly usage and region
pub fn carbon_grams(usage_kwh: f64, region: &str) -> f64 {
    usage_kwh * region_intensity(region)
}

/// Severity band for colorizing carbon values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarbonSeverity {
    Low,
    Moderate,
    High,
}

/// Band a grid intensity value (gCO2/kWh)
pub fn intensity_severity(g_per_kwh: f64) -> CarbonSeverity {
    if g_per_kwh < 150.0 {
        CarbonSeverity::Low
    } else if g_per_kwh < 350.0 {
        CarbonSeverity::Moderate
    } else {
        CarbonSeverity::High
    }
}

/// Band an emitted mass value (kg CO2)
pub fn mass_severity(kg: f64) -> CarbonSeverity {
    if kg < 1.0 {
        CarbonSeverity::Low
    } else if kg < 5.0 {
        CarbonSeverity::Moderate
    } else {
        CarbonSeverity::High
    }
}

fn co2_descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Aggregate a resource list into a footprint report
///
/// Pure and deterministic. An empty input yields the all-zero report with
/// "N/A" labels rather than an error. Groups accumulate in first-occurrence
/// order, so ties after sorting resolve to the earliest record.
pub fn calculate_footprint(resources: &[CloudResource]) -> FootprintReport {
    if resources.is_empty() {
        return FootprintReport::empty();
    }

    let mut total_co2_grams = 0.0;
    let mut total_cost_usd = 0.0;
    let mut total_kwh = 0.0;

    let mut by_service: Vec<ServiceBreakdown> = Vec::new();
    let mut by_region: Vec<RegionBreakdown> = Vec::new();
    let mut by_date: Vec<DateBreakdown> = Vec::new();

    for r in resources {
        let co2 = carbon_grams(r.usage_kwh, &r.region);
        total_co2_grams += co2;
        total_cost_usd += r.cost_usd;
        total_kwh += r.usage_kwh;

        match by_service.iter_mut().find(|s| s.service == r.service) {
            Some(entry) => {
                entry.co2_grams += co2;
                entry.cost_usd += r.cost_usd;
                entry.usage_kwh += r.usage_kwh;
            }
            None => by_service.push(ServiceBreakdown {
                service: r.service.clone(),
                co2_grams: co2,
                co2_kg: 0.0,
                cost_usd: r.cost_usd,
                usage_kwh: r.usage_kwh,
            }),
        }

        match by_region.iter_mut().find(|g| g.region == r.region) {
            Some(entry) => {
                entry.co2_grams += co2;
                entry.cost_usd += r.cost_usd;
                entry.usage_kwh += r.usage_kwh;
            }
            None => by_region.push(RegionBreakdown {
                region: r.region.clone(),
                carbon_intensity: region_intensity(&r.region),
                co2_grams: co2,
                co2_kg: 0.0,
                cost_usd: r.cost_usd,
                usage_kwh: r.usage_kwh,
            }),
        }

        match by_date.iter_mut().find(|d| d.date == r.date) {
            Some(entry) => {
                entry.co2_kg += co2 / 1000.0;
                entry.cost_usd += r.cost_usd;
            }
            None => by_date.push(DateBreakdown {
                date: r.date.clone(),
                co2_kg: co2 / 1000.0,
                cost_usd: r.cost_usd,
            }),
        }
    }

    // Derive kg values in a post-pass, after accumulation completes
    for entry in &mut by_service {
        entry.co2_kg = entry.co2_grams / 1000.0;
    }
    for entry in &mut by_region {
        entry.co2_kg = entry.co2_grams / 1000.0;
    }

    by_service.sort_by(|a, b| co2_descending(a.co2_grams, b.co2_grams));
    by_region.sort_by(|a, b| co2_descending(a.co2_grams, b.co2_grams));
    // ISO dates sort lexicographically in chronological order
    by_date.sort_by(|a, b| a.date.cmp(&b.date));

    let mut greenest_region = "N/A".to_string();
    let mut lowest_intensity = f64::INFINITY;
    for entry in &by_region {
        if entry.carbon_intensity < lowest_intensity {
            lowest_intensity = entry.carbon_intensity;
            greenest_region = entry.region.clone();
        }
    }

    let mut most_expensive_service = "N/A".to_string();
    let mut highest_cost = f64::NEG_INFINITY;
    for entry in &by_service {
        if entry.cost_usd > highest_cost {
            highest_cost = entry.cost_usd;
            most_expensive_service = entry.service.clone();
        }
    }

    let highest_carbon_service = by_service
        .first()
        .map(|s| s.service.clone())
        .unwrap_or_else(|| "N/A".to_string());

    let avg_carbon_intensity = if total_kwh > 0.0 {
        total_co2_grams / total_kwh
    } else {
        0.0
    };

    FootprintReport {
        total_co2_grams,
        total_co2_kg: total_co2_grams / 1000.0,
        total_cost_usd,
        avg_carbon_intensity,
        greenest_region,
        most_expensive_service,
        highest_carbon_service,
        by_service,
        by_region,
        by_date,
        resources: resources.to_vec(),
    }
}
