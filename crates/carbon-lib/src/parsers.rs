//! Billing file parsers
//!
//! Converts uploaded JSON or CSV billing exports into normalized
//! [`CloudResource`] records. Structural problems (wrong JSON shape,
//! unsupported extension) abort the whole load; row-level problems degrade
//! to documented defaults so one malformed row never fails the batch.

use std::sync::atomic::{AtomicU64, Ordering};

use csv::ReaderBuilder;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::{CloudResource, DEFAULT_REGION, UNKNOWN_SERVICE};

/// Errors that abort an entire load
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unrecognized JSON format: expected an array or an object with a `resources` array")]
    UnrecognizedFormat,
    #[error("invalid JSON file: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("CSV parse error: {0}")]
    Csv(String),
    #[error("unsupported file type: .{0} (expected .csv or .json)")]
    UnsupportedExtension(String),
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Synthesize an id unique for the lifetime of this process
fn next_id() -> String {
    let n = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("r-{}-{}", chrono::Utc::now().timestamp_millis(), n)
}

/// Today's date as an ISO YYYY-MM-DD string (UTC)
pub(crate) fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Coerce a loose JSON value to a number, defaulting to 0
///
/// Numeric strings parse; anything else (null, objects, booleans,
/// unparseable strings) degrades to 0 rather than erroring.
fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn normalize_json_item(item: &Value) -> CloudResource {
    let obj = item.as_object();
    let get = |key: &str| obj.and_then(|m| m.get(key));
    let text = |key: &str| get(key).and_then(Value::as_str).map(str::to_owned);

    CloudResource {
        id: text("id").unwrap_or_else(next_id),
        service: text("service").unwrap_or_else(|| UNKNOWN_SERVICE.to_string()),
        region: text("region").unwrap_or_else(|| DEFAULT_REGION.to_string()),
        usage_kwh: coerce_number(get("usageKwh").or_else(|| get("usage_kwh"))),
        cost_usd: coerce_number(get("costUSD").or_else(|| get("cost_usd"))),
        date: text("date").unwrap_or_else(today),
        description: text("description"),
    }
}

/// Parse a JSON billing export
///
/// Accepts a top-level array of resource-like objects or an object with a
/// `resources` array field. Both camelCase and snake_case spellings of the
/// usage/cost fields are recognized.
pub fn parse_json(content: &str) -> Result<Vec<CloudResource>, ParseError> {
    let raw: Value = serde_json::from_str(content).map_err(ParseError::InvalidJson)?;

    let items = match &raw {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("resources") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => return Err(ParseError::UnrecognizedFormat),
        },
        _ => return Err(ParseError::UnrecognizedFormat),
    };

    Ok(items.iter().map(normalize_json_item).collect())
}

/// Lower-case a header and collapse whitespace runs to underscores
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Map a normalized header to a canonical field; unmapped columns are ignored
fn canonical_field(header: &str) -> Option<&'static str> {
    match header {
        "id" => Some("id"),
        "service" => Some("service"),
        "region" => Some("region"),
        "usage" | "usagekwh" | "usage_kwh" => Some("usage"),
        "cost" | "costusd" | "cost_usd" => Some("cost"),
        "date" => Some("date"),
        "description" => Some("description"),
        _ => None,
    }
}

fn normalize_csv_row(headers: &[String], record: &csv::StringRecord) -> CloudResource {
    let mut id = None;
    let mut service = None;
    let mut region = None;
    let mut usage_kwh = 0.0;
    let mut cost_usd = 0.0;
    let mut date = None;
    let mut description = None;

    for (header, value) in headers.iter().zip(record.iter()) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match canonical_field(header) {
            Some("id") => id = Some(value.to_string()),
            Some("service") => service = Some(value.to_string()),
            Some("region") => region = Some(value.to_string()),
            Some("usage") => usage_kwh = value.parse().unwrap_or(0.0),
            Some("cost") => cost_usd = value.parse().unwrap_or(0.0),
            Some("date") => date = Some(value.to_string()),
            Some("description") => description = Some(value.to_string()),
            _ => {}
        }
    }

    CloudResource {
        id: id.unwrap_or_else(next_id),
        service: service.unwrap_or_else(|| UNKNOWN_SERVICE.to_string()),
        region: region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
        usage_kwh,
        cost_usd,
        date: date.unwrap_or_else(today),
        description,
    }
}

/// Parse a CSV billing export with a header row
///
/// Fails only when the CSV reader reported errors and zero rows were
/// produced; rows that did parse are kept even if later ones errored.
pub fn parse_csv(content: &str) -> Result<Vec<CloudResource>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ParseError::Csv(e.to_string()))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    let mut first_error: Option<String> = None;
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(normalize_csv_row(&headers, &record)),
            Err(e) => {
                debug!(error = %e, "skipping malformed CSV record");
                if first_error.is_none() {
                    first_error = Some(e.to_string());
                }
            }
        }
    }

    if rows.is_empty() {
        if let Some(message) = first_error {
            return Err(ParseError::Csv(message));
        }
    }

    Ok(rows)
}

/// Parse a billing file, dispatching on its extension
///
/// Case-insensitive `.csv` and `.json` are supported; anything else is a
/// structural error naming the rejected extension.
pub fn parse_file(content: &str, filename: &str) -> Result<Vec<CloudResource>, ParseError> {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match ext.as_str() {
        "csv" => parse_csv(content),
        "json" => parse_json(content),
        other => Err(ParseError::UnsupportedExtension(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_json_top_level_array() {
        let content = r#"[
            {"service": "EC2", "region": "us-east-1", "usageKwh": 100, "costUSD": 12, "date": "2024-01-01"}
        ]"#;
        let resources = parse_json(content).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].service, "EC2");
        assert_eq!(resources[0].usage_kwh, 100.0);
        assert_eq!(resources[0].cost_usd, 12.0);
    }

    #[test]
    fn test_json_resources_wrapper() {
        let content = r#"{"resources": [{"service": "RDS", "usage_kwh": 40, "cost_usd": "7.5"}]}"#;
        let resources = parse_json(content).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].service, "RDS");
        assert_eq!(resources[0].usage_kwh, 40.0);
        assert_eq!(resources[0].cost_usd, 7.5);
        // Defaults applied for absent fields
        assert_eq!(resources[0].region, "us-east-1");
        assert!(!resources[0].id.is_empty());
    }

    #[test]
    fn test_json_unrecognized_shape() {
        assert!(matches!(
            parse_json(r#"{"rows": []}"#),
            Err(ParseError::UnrecognizedFormat)
        ));
        assert!(matches!(
            parse_json(r#""just a string""#),
            Err(ParseError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn test_json_syntax_error() {
        assert!(matches!(
            parse_json("{not json"),
            Err(ParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_json_non_numeric_degrades_to_zero() {
        let content = r#"[{"service": "EC2", "usageKwh": "not-a-number", "costUSD": null}]"#;
        let resources = parse_json(content).unwrap();
        assert_eq!(resources[0].usage_kwh, 0.0);
        assert_eq!(resources[0].cost_usd, 0.0);
    }

    #[test]
    fn test_synthesized_ids_are_unique() {
        let content = r#"[{"service": "A"}, {"service": "B"}, {"service": "C"}]"#;
        let resources = parse_json(content).unwrap();
        let ids: HashSet<_> = resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_csv_basic_row() {
        let content = "service,region,usage_kwh,cost_usd\nEC2,us-west-2,50,5\n";
        let resources = parse_csv(content).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].service, "EC2");
        assert_eq!(resources[0].region, "us-west-2");
        assert_eq!(resources[0].usage_kwh, 50.0);
        assert_eq!(resources[0].cost_usd, 5.0);
        assert!(!resources[0].id.is_empty());
        assert_eq!(resources[0].date, today());
    }

    #[test]
    fn test_csv_header_aliases_and_whitespace() {
        let content = "Service,USAGE KWH,Cost\nLambda,2,0.4\n";
        let resources = parse_csv(content).unwrap();
        assert_eq!(resources[0].service, "Lambda");
        assert_eq!(resources[0].usage_kwh, 2.0);
        assert_eq!(resources[0].cost_usd, 0.4);
    }

    #[test]
    fn test_csv_unmapped_columns_ignored() {
        let content = "service,account_id,usage\nS3,12345,0.5\n";
        let resources = parse_csv(content).unwrap();
        assert_eq!(resources[0].service, "S3");
        assert_eq!(resources[0].usage_kwh, 0.5);
    }

    #[test]
    fn test_csv_bad_numeric_degrades_to_zero() {
        let content = "service,usage,cost\nEC2,oops,n/a\n";
        let resources = parse_csv(content).unwrap();
        assert_eq!(resources[0].usage_kwh, 0.0);
        assert_eq!(resources[0].cost_usd, 0.0);
    }

    #[test]
    fn test_csv_empty_body_is_not_an_error() {
        let resources = parse_csv("service,usage\n").unwrap();
        assert!(resources.is_empty());
    }

    #[test]
    fn test_parse_file_dispatch() {
        let json = r#"[{"service": "EC2"}]"#;
        assert_eq!(parse_file(json, "billing.json").unwrap().len(), 1);
        assert_eq!(parse_file(json, "BILLING.JSON").unwrap().len(), 1);

        let csv = "service,usage\nEC2,1\n";
        assert_eq!(parse_file(csv, "export.csv").unwrap().len(), 1);
    }

    #[test]
    fn test_parse_file_rejects_other_extensions() {
        let err = parse_file("x", "report.xlsx").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedExtension(ref ext) if ext == "xlsx"));
        assert!(err.to_string().contains(".xlsx"));
    }
}
