//! Parse fragment responses into partial records
//!
//! Fragment extraction can also happen outside this crate (a model or
//! another service reading a slice of the statement). Those responses are
//! JSON objects using the record's field names, often wrapped in Markdown
//! code fences, and are read loosely: a field of the wrong type is skipped
//! instead of failing the whole fragment.

use crate::error::ExtractorError;
use crate::reconcile::PartialRecord;
use folio_domain::ActivityRow;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Parse one fragment response
///
/// `{}` is a valid, empty fragment. Text that is not JSON is a
/// [`ExtractorError::JsonParse`]; JSON that is not an object is rejected as
/// [`ExtractorError::InvalidFormat`].
pub fn parse_fragment_response(response: &str) -> Result<PartialRecord, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    Ok(PartialRecord {
        investor_name: read_string(obj, "investorName"),
        pan: read_string(obj, "pan"),
        total_portfolio: read_number(obj, "totalPortfolio"),
        mutual_funds_value: read_number(obj, "mutualFundsValue"),
        current_cost: read_number(obj, "currentCost"),
        unrealised_gain: read_number(obj, "unrealisedGain"),
        realised_gain: read_number(obj, "realisedGain"),
        abs_return: read_number(obj, "absReturn"),
        xirr: read_number(obj, "xirr"),
        change_in_a_day: read_number(obj, "changeInADay"),
        recent_activities: read_activities(obj),
        debt_fund_ratings: read_ratings(obj),
    })
}

/// Parse many fragment responses, dropping the ones that fail
pub fn parse_fragment_responses<S: AsRef<str>>(responses: &[S]) -> Vec<PartialRecord> {
    let mut fragments = Vec::with_capacity(responses.len());
    for (idx, response) in responses.iter().enumerate() {
        match parse_fragment_response(response.as_ref()) {
            Ok(fragment) => fragments.push(fragment),
            Err(e) => warn!("Dropping fragment {}: {}", idx, e),
        }
    }
    fragments
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if !trimmed.starts_with("```") {
        return Ok(trimmed.to_string());
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() < 2 {
        return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
    }

    // Drop the opening fence line and, when present, the closing one
    let end = if lines[lines.len() - 1].trim() == "```" {
        lines.len() - 1
    } else {
        lines.len()
    };
    Ok(lines[1..end].join("\n"))
}

fn read_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Null => None,
        other => {
            debug!("Ignoring '{}': expected string, got {}", key, other);
            None
        }
    }
}

fn read_number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::Null => None,
        other => {
            debug!("Ignoring '{}': expected number, got {}", key, other);
            None
        }
    }
}

fn read_activities(obj: &Map<String, Value>) -> Vec<ActivityRow> {
    let Some(value) = obj.get("recentActivities") else {
        return Vec::new();
    };
    let Some(entries) = value.as_array() else {
        debug!("Ignoring 'recentActivities': expected array");
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| match entry.as_object() {
            Some(row) => Some(ActivityRow {
                scheme: read_string(row, "scheme").unwrap_or_default(),
                folio_no: read_string(row, "folioNo").unwrap_or_default(),
                tran_date: read_string(row, "tranDate").unwrap_or_default(),
                tran_type: read_string(row, "tranType").unwrap_or_default(),
                nav: read_number(row, "nav").unwrap_or_default(),
                units: read_number(row, "units").unwrap_or_default(),
                amount: read_number(row, "amount").unwrap_or_default(),
            }),
            None => {
                debug!("Skipping activity {}: not an object", idx);
                None
            }
        })
        .collect()
}

fn read_ratings(obj: &Map<String, Value>) -> BTreeMap<String, f64> {
    let Some(value) = obj.get("debtFundRatings") else {
        return Default::default();
    };
    let Some(entries) = value.as_object() else {
        debug!("Ignoring 'debtFundRatings': expected object");
        return Default::default();
    };

    entries
        .keys()
        .filter_map(|label| read_number(entries, label).map(|v| (label.clone(), v)))
        .collect()
}
