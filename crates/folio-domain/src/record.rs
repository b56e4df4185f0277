//! Record module - the normalized statement produced by extraction

use crate::risk::RiskAllocation;
use serde::{Deserialize, Serialize};

/// One row of the recent-activities table
///
/// Values are kept as extracted: the date keeps its source format and no
/// cross-field checks (units * nav == amount, etc.) are made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRow {
    /// Mutual fund scheme name
    pub scheme: String,

    /// Folio number
    pub folio_no: String,

    /// Transaction date, source format preserved
    pub tran_date: String,

    /// Transaction type (purchase, redemption, SIP, ...)
    pub tran_type: String,

    /// NAV at the time of the transaction
    pub nav: f64,

    /// Units transacted
    pub units: f64,

    /// Transaction amount
    pub amount: f64,
}

/// A portfolio statement in normalized form
///
/// Built once per extraction call and not mutated afterwards. Numeric fields
/// default to 0, which is also what an unreadable or missing field yields, so
/// consumers must treat 0 as "zero or unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRecord {
    /// Investor's full name
    pub investor_name: String,

    /// Investor identity code; empty or exactly 10 alphanumerics
    pub pan: String,

    /// Total portfolio value
    pub total_portfolio: f64,

    /// Value held in mutual funds
    pub mutual_funds_value: f64,

    /// Current cost of the mutual fund holdings
    pub current_cost: f64,

    /// Unrealised gain (negative for a loss)
    pub unrealised_gain: f64,

    /// Realised gain (negative for a loss)
    pub realised_gain: f64,

    /// Absolute return, percent
    pub abs_return: f64,

    /// XIRR return, percent
    pub xirr: f64,

    /// Change in portfolio value over the last day
    #[serde(rename = "changeInADay")]
    pub change_in_a_day: f64,

    /// Recent transactions in statement order
    pub recent_activities: Vec<ActivityRow>,

    /// Debt-fund risk allocation, always all six categories
    pub debt_fund_ratings: RiskAllocation,
}

impl StructuredRecord {
    /// Absolute return implied by portfolio value and cost
    ///
    /// `None` unless both are positive.
    pub fn implied_abs_return(&self) -> Option<f64> {
        if self.current_cost > 0.0 && self.total_portfolio > 0.0 {
            Some((self.total_portfolio - self.current_cost) / self.current_cost * 100.0)
        } else {
            None
        }
    }

    /// Fill derived metrics the statement did not state
    ///
    /// Only `abs_return` is derived, and only when it is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_domain::StructuredRecord;
    ///
    /// let record = StructuredRecord {
    ///     total_portfolio: 120_000.0,
    ///     current_cost: 100_000.0,
    ///     ..Default::default()
    /// };
    /// assert_eq!(record.enriched().abs_return, 20.0);
    /// ```
    pub fn enriched(self) -> Self {
        if self.abs_return != 0.0 {
            return self;
        }
        match self.implied_abs_return() {
            Some(abs_return) => Self { abs_return, ..self },
            None => self,
        }
    }
}
