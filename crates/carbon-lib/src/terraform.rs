//! Terraform (HCL) resource extraction
//!
//! Best-effort structural scan over four supported resource kinds, used as
//! the fallback IaC ingestion path. Not a full HCL parser: block headers
//! are located by pattern and bodies are captured with a brace-depth
//! counter, so nested blocks such as `tags = { ... }` are handled. Braces
//! inside quoted strings are not special-cased.
//!
//! Emitted records are heuristic estimates from static wattage/kWh tables,
//! intended to be plausible and consistent rather than exact.

use regex::Regex;
use tracing::debug;

use crate::models::{CloudResource, DEFAULT_REGION};
use crate::parsers::today;

/// Average power draw per EC2 instance type, watts
const EC2_WATTS: &[(&str, f64)] = &[
    ("t3.micro", 2.5),
    ("t3.small", 5.0),
    ("t3.medium", 10.0),
    ("t3.large", 20.0),
    ("m5.large", 34.0),
    ("m5.xlarge", 68.0),
    ("m5.2xlarge", 136.0),
    ("r5.large", 48.0),
    ("r5.xlarge", 96.0),
    ("c5.large", 30.0),
    ("c5.xlarge", 60.0),
];

/// Monthly kWh per RDS instance class
const RDS_KWH: &[(&str, f64)] = &[
    ("db.t3.micro", 15.0),
    ("db.t3.small", 25.0),
    ("db.t3.medium", 40.0),
    ("db.m5.large", 80.0),
    ("db.m5.xlarge", 160.0),
    ("db.r5.large", 100.0),
];

const DEFAULT_EC2_WATTS: f64 = 20.0;
const DEFAULT_RDS_KWH: f64 = 40.0;

const HOURS_PER_MONTH: f64 = 730.0;

// Illustrative flat rates, not a real pricing model
const EC2_COST_PER_KWH: f64 = 0.12;
const RDS_COST_PER_KWH: f64 = 0.18;
const LAMBDA_KWH: f64 = 1.0;
const LAMBDA_COST: f64 = 0.20;
const S3_KWH: f64 = 0.5;
const S3_COST: f64 = 0.05;

fn instance_watts(instance_type: &str) -> f64 {
    EC2_WATTS
        .iter()
        .find(|(t, _)| *t == instance_type)
        .map(|(_, w)| *w)
        .unwrap_or(DEFAULT_EC2_WATTS)
}

fn rds_kwh(instance_class: &str) -> f64 {
    RDS_KWH
        .iter()
        .find(|(c, _)| *c == instance_class)
        .map(|(_, kwh)| *kwh)
        .unwrap_or(DEFAULT_RDS_KWH)
}

fn watts_to_monthly_kwh(watts: f64) -> f64 {
    watts * HOURS_PER_MONTH / 1000.0
}

/// Compiled patterns for block headers and body attributes
struct Patterns {
    resource_header: Regex,
    provider_header: Regex,
    region: Regex,
    instance_type: Regex,
    instance_class: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            resource_header: Regex::new(r#"resource\s+"(\w+)"\s+"([^"]+)"\s*\{"#).unwrap(),
            provider_header: Regex::new(r#"provider\s+"aws"\s*\{"#).unwrap(),
            region: Regex::new(r#"region\s*=\s*"([^"]+)""#).unwrap(),
            instance_type: Regex::new(r#"instance_type\s*=\s*"([^"]+)""#).unwrap(),
            instance_class: Regex::new(r#"instance_class\s*=\s*"([^"]+)""#).unwrap(),
        }
    }
}

/// Capture a block body starting just past its opening brace
///
/// Tracks nesting depth so inner `{ }` pairs do not truncate the body.
/// Returns `None` for an unterminated block.
fn block_body(content: &str, body_start: usize) -> Option<&str> {
    let mut depth = 1usize;
    for (offset, ch) in content[body_start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&content[body_start..body_start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn default_provider_region(content: &str, patterns: &Patterns) -> String {
    patterns
        .provider_header
        .find(content)
        .and_then(|header| block_body(content, header.end()))
        .and_then(|body| patterns.region.captures(body))
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

/// Extract estimated resource records from Terraform source text
///
/// Supported kinds: `aws_instance`, `aws_lambda_function`,
/// `aws_db_instance`, `aws_s3_bucket`; anything else is skipped. A
/// `region` attribute inside a block overrides the provider default.
pub fn parse_terraform(content: &str) -> Vec<CloudResource> {
    let patterns = Patterns::new();
    let date = today();
    let default_region = default_provider_region(content, &patterns);

    let mut resources = Vec::new();
    for caps in patterns.resource_header.captures_iter(content) {
        let kind = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let name = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        let header_end = match caps.get(0) {
            Some(m) => m.end(),
            None => continue,
        };
        let body = match block_body(content, header_end) {
            Some(body) => body,
            None => {
                debug!(kind, name, "skipping unterminated resource block");
                continue;
            }
        };

        let region = patterns
            .region
            .captures(body)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| default_region.clone());

        let resource = match kind {
            "aws_instance" => {
                let instance_type = patterns
                    .instance_type
                    .captures(body)
                    .map(|c| c[1].to_string())
                    .unwrap_or_else(|| "t3.micro".to_string());
                let usage_kwh = watts_to_monthly_kwh(instance_watts(&instance_type));
                CloudResource {
                    id: format!("tf-ec2-{name}"),
                    service: "EC2".to_string(),
                    region,
                    usage_kwh,
                    cost_usd: usage_kwh * EC2_COST_PER_KWH,
                    date: date.clone(),
                    description: Some(format!("terraform: {name} ({instance_type})")),
                }
            }
            "aws_lambda_function" => CloudResource {
                id: format!("tf-lambda-{name}"),
                service: "Lambda".to_string(),
                region,
                usage_kwh: LAMBDA_KWH,
                cost_usd: LAMBDA_COST,
                date: date.clone(),
                description: Some(format!("terraform: {name}")),
            },
            "aws_db_instance" => {
                let instance_class = patterns
                    .instance_class
                    .captures(body)
                    .map(|c| c[1].to_string())
                    .unwrap_or_else(|| "db.t3.micro".to_string());
                let usage_kwh = rds_kwh(&instance_class);
                CloudResource {
                    id: format!("tf-rds-{name}"),
                    service: "RDS".to_string(),
                    region,
                    usage_kwh,
                    cost_usd: usage_kwh * RDS_COST_PER_KWH,
                    date: date.clone(),
                    description: Some(format!("terraform: {name} ({instance_class})")),
                }
            }
            "aws_s3_bucket" => CloudResource {
                id: format!("tf-s3-{name}"),
                service: "S3".to_string(),
                region,
                usage_kwh: S3_KWH,
                cost_usd: S3_COST,
                date: date.clone(),
                description: Some(format!("terraform: {name}")),
            },
            other => {
                debug!(kind = other, name, "skipping unsupported resource type");
                continue;
            }
        };

        resources.push(resource);
    }

    resources
}
