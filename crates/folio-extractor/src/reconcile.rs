//! Fragment reconciliation
//!
//! Merges per-fragment partial records into one [`StructuredRecord`]. The
//! rules differ per field group:
//!
//! - name and PAN: first non-empty value wins
//! - portfolio, fund value and cost: first positive value wins
//! - gains, returns and one-day change: first value seen wins, even 0
//! - activities: concatenated in fragment order
//! - ratings: last write wins per category

use folio_domain::{is_valid_pan, ActivityRow, RiskCategory, StructuredRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Fields extracted from one fragment
///
/// `None` means the fragment did not carry the field. Ratings keep the raw
/// category labels; unknown labels are dropped when merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialRecord {
    /// Investor name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor_name: Option<String>,

    /// PAN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan: Option<String>,

    /// Total portfolio value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_portfolio: Option<f64>,

    /// Value held in mutual funds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutual_funds_value: Option<f64>,

    /// Current cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_cost: Option<f64>,

    /// Unrealised gain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrealised_gain: Option<f64>,

    /// Realised gain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realised_gain: Option<f64>,

    /// Absolute return, percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abs_return: Option<f64>,

    /// XIRR, percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xirr: Option<f64>,

    /// Change in a day
    #[serde(rename = "changeInADay", skip_serializing_if = "Option::is_none")]
    pub change_in_a_day: Option<f64>,

    /// Activity rows found in this fragment
    pub recent_activities: Vec<ActivityRow>,

    /// Risk allocation entries found in this fragment
    pub debt_fund_ratings: BTreeMap<String, f64>,
}

impl PartialRecord {
    /// True when the fragment carried nothing at all
    pub fn is_empty(&self) -> bool {
        *self == PartialRecord::default()
    }
}

fn first_text(slot: &mut String, candidate: Option<&str>) {
    if let Some(value) = candidate {
        if slot.is_empty() && !value.is_empty() {
            *slot = value.to_string();
        }
    }
}

fn first_positive(slot: &mut f64, candidate: Option<f64>) {
    if let Some(value) = candidate {
        if *slot == 0.0 && value > 0.0 {
            *slot = value;
        }
    }
}

fn first_assigned(slot: &mut Option<f64>, candidate: Option<f64>) {
    if slot.is_none() {
        *slot = candidate;
    }
}

/// Merge fragments, in order, into one record
///
/// An empty slice gives the default record.
///
/// # Examples
///
/// ```
/// use folio_extractor::{merge, PartialRecord};
///
/// let fragments = vec![
///     PartialRecord { total_portfolio: Some(0.0), abs_return: Some(0.0), ..Default::default() },
///     PartialRecord { total_portfolio: Some(50_000.0), abs_return: Some(12.5), ..Default::default() },
/// ];
/// let record = merge(&fragments);
/// assert_eq!(record.total_portfolio, 50_000.0);
/// assert_eq!(record.abs_return, 0.0);
/// ```
pub fn merge(fragments: &[PartialRecord]) -> StructuredRecord {
    let mut record = StructuredRecord::default();
    let mut unrealised_gain = None;
    let mut realised_gain = None;
    let mut abs_return = None;
    let mut xirr = None;
    let mut change_in_a_day = None;

    for fragment in fragments {
        first_text(&mut record.investor_name, fragment.investor_name.as_deref());
        let pan = fragment.pan.as_deref().filter(|pan| {
            let valid = pan.is_empty() || is_valid_pan(pan);
            if !valid {
                debug!("Ignoring malformed PAN '{}' from fragment", pan);
            }
            valid
        });
        first_text(&mut record.pan, pan);

        first_positive(&mut record.total_portfolio, fragment.total_portfolio);
        first_positive(&mut record.mutual_funds_value, fragment.mutual_funds_value);
        first_positive(&mut record.current_cost, fragment.current_cost);

        first_assigned(&mut unrealised_gain, fragment.unrealised_gain);
        first_assigned(&mut realised_gain, fragment.realised_gain);
        first_assigned(&mut abs_return, fragment.abs_return);
        first_assigned(&mut xirr, fragment.xirr);
        first_assigned(&mut change_in_a_day, fragment.change_in_a_day);

        record
            .recent_activities
            .extend(fragment.recent_activities.iter().cloned());

        for (label, value) in &fragment.debt_fund_ratings {
            match RiskCategory::from_label(label) {
                Some(category) => record.debt_fund_ratings.set(category, *value),
                None => debug!("Dropping unknown risk category '{}'", label),
            }
        }
    }

    record.unrealised_gain = unrealised_gain.unwrap_or(0.0);
    record.realised_gain = realised_gain.unwrap_or(0.0);
    record.abs_return = abs_return.unwrap_or(0.0);
    record.xirr = xirr.unwrap_or(0.0);
    record.change_in_a_day = change_in_a_day.unwrap_or(0.0);
    record
}
