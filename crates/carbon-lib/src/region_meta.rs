//! Static display metadata for known regions

use serde::Serialize;

/// Human-facing metadata for one region
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegionMeta {
    pub label: &'static str,
    /// Approximate round-trip from North America, ms
    #[serde(rename = "latencyMs")]
    pub latency_ms: u32,
    /// Relative to us-east-1 = 1.0
    #[serde(rename = "costMultiplier")]
    pub cost_multiplier: f64,
}

const REGION_META: &[(&str, RegionMeta)] = &[
    ("us-east-1", RegionMeta { label: "US East (N. Virginia)", latency_ms: 10, cost_multiplier: 1.00 }),
    ("us-east-2", RegionMeta { label: "US East (Ohio)", latency_ms: 20, cost_multiplier: 0.98 }),
    ("us-west-1", RegionMeta { label: "US West (N. California)", latency_ms: 60, cost_multiplier: 1.10 }),
    ("us-west-2", RegionMeta { label: "US West (Oregon)", latency_ms: 70, cost_multiplier: 0.95 }),
    ("eu-west-1", RegionMeta { label: "Europe (Ireland)", latency_ms: 90, cost_multiplier: 1.08 }),
    ("eu-west-2", RegionMeta { label: "Europe (London)", latency_ms: 95, cost_multiplier: 1.12 }),
    ("eu-west-3", RegionMeta { label: "Europe (Paris)", latency_ms: 100, cost_multiplier: 1.10 }),
    ("eu-central-1", RegionMeta { label: "Europe (Frankfurt)", latency_ms: 105, cost_multiplier: 1.12 }),
    ("eu-north-1", RegionMeta { label: "Europe (Stockholm)", latency_ms: 115, cost_multiplier: 1.05 }),
    ("ap-southeast-1", RegionMeta { label: "Asia Pacific (Singapore)", latency_ms: 200, cost_multiplier: 1.15 }),
    ("ap-southeast-2", RegionMeta { label: "Asia Pacific (Sydney)", latency_ms: 210, cost_multiplier: 1.20 }),
    ("ap-northeast-1", RegionMeta { label: "Asia Pacific (Tokyo)", latency_ms: 180, cost_multiplier: 1.18 }),
    ("ap-northeast-2", RegionMeta { label: "Asia Pacific (Seoul)", latency_ms: 185, cost_multiplier: 1.15 }),
    ("ap-south-1", RegionMeta { label: "Asia Pacific (Mumbai)", latency_ms: 230, cost_multiplier: 1.10 }),
    ("sa-east-1", RegionMeta { label: "South America (Sao Paulo)", latency_ms: 170, cost_multiplier: 1.25 }),
    ("ca-central-1", RegionMeta { label: "Canada (Central)", latency_ms: 30, cost_multiplier: 1.03 }),
];

/// Metadata for a region code, if it is known
pub fn region_meta(region: &str) -> Option<&'static RegionMeta> {
    REGION_META
        .iter()
        .find(|(code, _)| *code == region)
        .map(|(_, meta)| meta)
}

/// Display label for a region; unknown codes fall back to the code itself
pub fn region_label(region: &str) -> &str {
    region_meta(region).map(|m| m.label).unwrap_or(region)
}

/// All region codes with metadata
pub fn all_regions() -> impl Iterator<Item = &'static str> {
    REGION_META.iter().map(|(code, _)| *code)
}
