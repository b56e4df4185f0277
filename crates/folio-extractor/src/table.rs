//! Recent-activities table extraction

use crate::numeric::to_number;
use folio_domain::ActivityRow;
use tracing::debug;

/// Header line of the recent-activities table, tab separated
pub const ACTIVITY_HEADER: &str = "Scheme\tFolio No\tTran Date\tTran Type\tNAV\tUnits\tAmount";

/// Columns a row needs before it is accepted
pub const ACTIVITY_COLUMNS: usize = 7;

/// Extract every activity row following the table header
///
/// Rows run to the end of the text: blank lines and lines with fewer than
/// seven tab-separated fields are skipped rather than ending the table, and
/// fields beyond the seventh are ignored. No header means no rows.
///
/// # Examples
///
/// ```
/// use folio_extractor::{extract_activities, ACTIVITY_HEADER};
///
/// let text = format!("{}\nFund A\t123\t01-Jan-2024\tPurchase\t10.0\t100.0\t1,000.00", ACTIVITY_HEADER);
/// let rows = extract_activities(&text);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].amount, 1000.0);
/// ```
pub fn extract_activities(text: &str) -> Vec<ActivityRow> {
    let Some(start) = text.find(ACTIVITY_HEADER) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    // The first piece is whatever trails the header on its own line
    for line in text[start + ACTIVITY_HEADER.len()..].split('\n').skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(row) => rows.push(row),
            None => debug!("Skipping non-table line: {}", line),
        }
    }
    rows
}

/// Repeat the table header at the top of every fragment after the one holding it
///
/// Rows run to the end of the text, so whatever follows the header fragment is
/// still table content. Fragments before the header are left alone.
pub fn carry_table_header(fragments: Vec<String>) -> Vec<String> {
    let mut in_table = false;
    fragments
        .into_iter()
        .map(|fragment| {
            if in_table {
                return format!("{}\n{}", ACTIVITY_HEADER, fragment);
            }
            in_table = fragment.contains(ACTIVITY_HEADER);
            fragment
        })
        .collect()
}

fn parse_row(line: &str) -> Option<ActivityRow> {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() < ACTIVITY_COLUMNS {
        return None;
    }
    Some(ActivityRow {
        scheme: cols[0].to_string(),
        folio_no: cols[1].to_string(),
        tran_date: cols[2].to_string(),
        tran_type: cols[3].to_string(),
        nav: to_number(cols[4]),
        units: to_number(cols[5]),
        amount: to_number(cols[6]),
    })
}
