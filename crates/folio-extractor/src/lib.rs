//! Folio Extractor
//!
//! Turns the plain text of a mutual-fund portfolio statement into a
//! [`StructuredRecord`](folio_domain::StructuredRecord).
//!
//! # Overview
//!
//! Statements come out of PDF text extraction as a loose column of lines: a
//! label, a unit line, then the value. The extractor reads them with a small
//! set of layered heuristics:
//!
//! - **Field Locator**: value lines a fixed offset below a label
//! - **Numeric Normalizer**: grouped numbers with trailing noise, 0 on failure
//! - **Identity Extractor**: `NAME [PAN]` lines, with fallbacks
//! - **Table Extractor**: tab-separated recent-activities rows
//! - **Summary Assembler**: ordered strategies per summary metric
//! - **Fragment Reconciler**: merges records extracted from slices of a statement
//!
//! # Architecture
//!
//! ```text
//! Text → normalize → identity + summary + table → StructuredRecord
//!
//! Text → split → fragments (blocking pool) → PartialRecord... → merge → StructuredRecord
//! ```
//!
//! # Example Usage
//!
//! ```
//! use folio_extractor::{Extractor, ExtractorConfig};
//!
//! let extractor = Extractor::new(ExtractorConfig::default());
//! let text = "JOHN SMITH [ABCDE1234F]\nTotal Portfolio Value\n(INR)\n1,50,000.00";
//!
//! let record = extractor.extract(text).unwrap();
//! assert_eq!(record.investor_name, "JOHN SMITH");
//! assert_eq!(record.total_portfolio, 150_000.0);
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod identity;
mod latest;
mod locator;
mod normalize;
mod numeric;
mod parser;
mod reconcile;
mod summary;
mod table;

#[cfg(test)]
mod tests;

pub use chunking::FragmentSplitter;
pub use config::{ExtractorConfig, FragmentStrategy};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use identity::{extract_identity, pan_label_identity, resolve_identity, Identity, IdentityStrategy};
pub use latest::LatestRecord;
pub use locator::{locate, locate_number};
pub use normalize::normalize_text;
pub use numeric::{to_number, to_percent};
pub use parser::{parse_fragment_response, parse_fragment_responses};
pub use reconcile::{merge, PartialRecord};
pub use summary::{
    extract_summary, extract_summary_fields, FieldStrategy, PortfolioSummary, SummaryColumn,
    SummaryField, SummaryFields,
};
pub use table::{carry_table_header, extract_activities, ACTIVITY_COLUMNS, ACTIVITY_HEADER};
