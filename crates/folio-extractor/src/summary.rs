//! Portfolio summary metrics and risk allocation
//!
//! Each metric has an ordered list of [`FieldStrategy`] values. A strategy
//! that lands on a non-zero number settles the field; a zero (or a missing
//! label) lets the next strategy try. Keeping the lists as data makes the
//! precedence for every field visible in one place.

use crate::locator::{locate, locate_number};
use crate::numeric::{to_number, to_percent};
use folio_domain::{RiskAllocation, RiskCategory};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// `NAVI MF   10.00   13.06`: fund value then portfolio total on one line
static MF_SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*([A-Z ]+MF)\s+([\d,.]+)\s+([\d,.]+)$").expect("valid MF summary regex")
});

/// Column of the one-line MF summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryColumn {
    /// First number: value held in mutual funds
    FundValue,
    /// Second number: total portfolio value
    Portfolio,
}

/// One way of reading a summary metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStrategy {
    /// Take a column from the one-line MF summary
    MfSummaryLine(SummaryColumn),
    /// Number found `offset` lines below `label`
    LabelBelow {
        /// Label to search for
        label: &'static str,
        /// Lines below the label
        offset: usize,
    },
    /// Percentage found `offset` lines below `label`, `%` ignored
    PercentBelow {
        /// Label to search for
        label: &'static str,
        /// Lines below the label
        offset: usize,
    },
}

/// Scalar metrics of the portfolio summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryField {
    /// Total portfolio value
    TotalPortfolio,
    /// Value held in mutual funds
    MutualFundsValue,
    /// Current cost
    CurrentCost,
    /// Unrealised gain
    UnrealisedGain,
    /// Realised gain
    RealisedGain,
    /// Absolute return, percent
    AbsReturn,
    /// XIRR, percent
    Xirr,
    /// Change in a day
    ChangeInADay,
}

impl SummaryField {
    /// All metrics in record order
    pub const ALL: [SummaryField; 8] = [
        SummaryField::TotalPortfolio,
        SummaryField::MutualFundsValue,
        SummaryField::CurrentCost,
        SummaryField::UnrealisedGain,
        SummaryField::RealisedGain,
        SummaryField::AbsReturn,
        SummaryField::Xirr,
        SummaryField::ChangeInADay,
    ];

    /// Strategies for this metric, highest precedence first
    pub fn strategies(&self) -> &'static [FieldStrategy] {
        use FieldStrategy::*;
        match self {
            SummaryField::TotalPortfolio => &[
                MfSummaryLine(SummaryColumn::Portfolio),
                LabelBelow { label: "Total Portfolio Value", offset: 2 },
            ],
            SummaryField::MutualFundsValue => &[
                MfSummaryLine(SummaryColumn::FundValue),
                LabelBelow { label: "Mutual Funds", offset: 2 },
            ],
            SummaryField::CurrentCost => &[LabelBelow { label: "MF Current Cost", offset: 2 }],
            SummaryField::UnrealisedGain => &[LabelBelow { label: "MF Unrealised", offset: 2 }],
            SummaryField::RealisedGain => &[LabelBelow { label: "MF Realised", offset: 2 }],
            SummaryField::AbsReturn => &[
                PercentBelow { label: "Abs. Return (MFs)", offset: 1 },
                PercentBelow { label: "Abs.\nReturn (MFs)", offset: 1 },
            ],
            SummaryField::Xirr => &[
                PercentBelow { label: "XIRR Return (MFs)", offset: 1 },
                PercentBelow { label: "XIRR\nReturn (MFs)", offset: 1 },
            ],
            SummaryField::ChangeInADay => &[
                LabelBelow { label: "MF Change in a Day", offset: 2 },
                LabelBelow { label: "MF Change\nin a Day", offset: 2 },
            ],
        }
    }
}

/// Text plus the MF summary line, parsed once
struct SummaryContext<'a> {
    text: &'a str,
    mf_line: Option<(f64, f64)>,
}

impl<'a> SummaryContext<'a> {
    fn new(text: &'a str) -> Self {
        let mf_line = MF_SUMMARY_RE
            .captures(text)
            .map(|caps| (to_number(&caps[2]), to_number(&caps[3])));
        Self { text, mf_line }
    }
}

impl FieldStrategy {
    /// `None` when this strategy could not find its source at all
    fn apply(&self, ctx: &SummaryContext<'_>) -> Option<f64> {
        match *self {
            FieldStrategy::MfSummaryLine(column) => ctx.mf_line.map(|(fund, total)| match column {
                SummaryColumn::FundValue => fund,
                SummaryColumn::Portfolio => total,
            }),
            FieldStrategy::LabelBelow { label, offset } => locate_number(ctx.text, label, offset),
            FieldStrategy::PercentBelow { label, offset } => {
                locate(ctx.text, label, offset).map(to_percent)
            }
        }
    }
}

/// Run strategies in order until one yields a non-zero value
///
/// Falls back to the first zero any strategy produced, and to `None` when no
/// strategy located anything.
fn resolve_field(ctx: &SummaryContext<'_>, field: SummaryField) -> Option<f64> {
    let mut first_zero = None;
    for strategy in field.strategies() {
        match strategy.apply(ctx) {
            Some(value) if value != 0.0 => {
                debug!("{:?} resolved by {:?}: {}", field, strategy, value);
                return Some(value);
            }
            Some(value) => {
                first_zero.get_or_insert(value);
            }
            None => {}
        }
    }
    first_zero
}

/// Summary metrics with a found flag per field
///
/// `None` means no strategy located the field's label; `Some(0.0)` means the
/// label was there and read as zero. Risk categories only appear when their
/// label was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryFields {
    /// Total portfolio value
    pub total_portfolio: Option<f64>,
    /// Value held in mutual funds
    pub mutual_funds_value: Option<f64>,
    /// Current cost
    pub current_cost: Option<f64>,
    /// Unrealised gain
    pub unrealised_gain: Option<f64>,
    /// Realised gain
    pub realised_gain: Option<f64>,
    /// Absolute return, percent
    pub abs_return: Option<f64>,
    /// XIRR, percent
    pub xirr: Option<f64>,
    /// Change in a day
    pub change_in_a_day: Option<f64>,
    /// Risk allocation for the categories that were found
    pub debt_fund_ratings: BTreeMap<RiskCategory, f64>,
}

impl SummaryFields {
    /// Value of a metric by name
    pub fn get(&self, field: SummaryField) -> Option<f64> {
        match field {
            SummaryField::TotalPortfolio => self.total_portfolio,
            SummaryField::MutualFundsValue => self.mutual_funds_value,
            SummaryField::CurrentCost => self.current_cost,
            SummaryField::UnrealisedGain => self.unrealised_gain,
            SummaryField::RealisedGain => self.realised_gain,
            SummaryField::AbsReturn => self.abs_return,
            SummaryField::Xirr => self.xirr,
            SummaryField::ChangeInADay => self.change_in_a_day,
        }
    }
}

/// Summary metrics with zero defaults and a complete risk allocation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Total portfolio value
    pub total_portfolio: f64,
    /// Value held in mutual funds
    pub mutual_funds_value: f64,
    /// Current cost
    pub current_cost: f64,
    /// Unrealised gain
    pub unrealised_gain: f64,
    /// Realised gain
    pub realised_gain: f64,
    /// Absolute return, percent
    pub abs_return: f64,
    /// XIRR, percent
    pub xirr: f64,
    /// Change in a day
    #[serde(rename = "changeInADay")]
    pub change_in_a_day: f64,
    /// Risk allocation, all six categories
    pub debt_fund_ratings: RiskAllocation,
}

impl From<SummaryFields> for PortfolioSummary {
    fn from(fields: SummaryFields) -> Self {
        let mut debt_fund_ratings = RiskAllocation::new();
        for (category, value) in fields.debt_fund_ratings {
            debt_fund_ratings.set(category, value);
        }
        Self {
            total_portfolio: fields.total_portfolio.unwrap_or(0.0),
            mutual_funds_value: fields.mutual_funds_value.unwrap_or(0.0),
            current_cost: fields.current_cost.unwrap_or(0.0),
            unrealised_gain: fields.unrealised_gain.unwrap_or(0.0),
            realised_gain: fields.realised_gain.unwrap_or(0.0),
            abs_return: fields.abs_return.unwrap_or(0.0),
            xirr: fields.xirr.unwrap_or(0.0),
            change_in_a_day: fields.change_in_a_day.unwrap_or(0.0),
            debt_fund_ratings,
        }
    }
}

/// Extract summary metrics, keeping track of which fields were found
pub fn extract_summary_fields(text: &str) -> SummaryFields {
    let ctx = SummaryContext::new(text);
    let debt_fund_ratings = RiskCategory::ALL
        .into_iter()
        .filter_map(|category| {
            locate(text, category.label(), 1).map(|value| (category, to_percent(value)))
        })
        .collect();

    let fields = SummaryFields {
        total_portfolio: resolve_field(&ctx, SummaryField::TotalPortfolio),
        mutual_funds_value: resolve_field(&ctx, SummaryField::MutualFundsValue),
        current_cost: resolve_field(&ctx, SummaryField::CurrentCost),
        unrealised_gain: resolve_field(&ctx, SummaryField::UnrealisedGain),
        realised_gain: resolve_field(&ctx, SummaryField::RealisedGain),
        abs_return: resolve_field(&ctx, SummaryField::AbsReturn),
        xirr: resolve_field(&ctx, SummaryField::Xirr),
        change_in_a_day: resolve_field(&ctx, SummaryField::ChangeInADay),
        debt_fund_ratings,
    };
    let missing: Vec<SummaryField> = SummaryField::ALL
        .into_iter()
        .filter(|field| fields.get(*field).is_none())
        .collect();
    if !missing.is_empty() {
        debug!("Summary fields not found: {:?}", missing);
    }
    fields
}

/// Extract summary metrics; anything not found is 0
pub fn extract_summary(text: &str) -> PortfolioSummary {
    extract_summary_fields(text).into()
}
