//! Folio Domain Layer
//!
//! The normalized shape of a mutual-fund portfolio statement once it has been
//! pulled out of extracted PDF text. Every other crate in the workspace
//! produces or consumes these types.
//!
//! ## Key Concepts
//!
//! - **StructuredRecord**: investor identity, summary metrics, recent
//!   activities and the debt-fund risk allocation
//! - **ActivityRow**: one transaction line from the activity table
//! - **RiskAllocation**: a total map over the six fixed risk categories
//! - **PAN**: the 10-character investor identity code
//!
//! ## Serialization
//!
//! Field names follow the camelCase contract consumed by dashboards
//! (`investorName`, `pan`, `totalPortfolio`, ... `debtFundRatings`).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pan;
pub mod record;
pub mod risk;
pub mod validation;

// Re-exports for convenience
pub use pan::is_valid_pan;
pub use record::{ActivityRow, StructuredRecord};
pub use risk::{RiskAllocation, RiskCategory};
pub use validation::{validate, ValidationError};
