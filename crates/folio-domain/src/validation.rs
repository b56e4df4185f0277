//! Validation of extracted records before they are handed to consumers

use crate::pan::is_valid_pan;
use crate::record::StructuredRecord;
use thiserror::Error;

/// Reasons a record is not fit to publish
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No investor name was extracted
    #[error("investor name is required")]
    MissingInvestorName,

    /// PAN is missing or malformed
    #[error("valid PAN is required, got '{0}'")]
    InvalidPan(String),

    /// Total portfolio value is below zero
    #[error("total portfolio value cannot be negative: {0}")]
    NegativePortfolio(f64),
}

/// Check the minimum a record needs to identify an investor
///
/// Checks run name, then PAN, then portfolio value; the first failure wins.
pub fn validate(record: &StructuredRecord) -> Result<(), ValidationError> {
    if record.investor_name.trim().is_empty() {
        return Err(ValidationError::MissingInvestorName);
    }
    if !is_valid_pan(&record.pan) {
        return Err(ValidationError::InvalidPan(record.pan.clone()));
    }
    if record.total_portfolio < 0.0 {
        return Err(ValidationError::NegativePortfolio(record.total_portfolio));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> StructuredRecord {
        StructuredRecord {
            investor_name: "JOHN SMITH".to_string(),
            pan: "ABCDE1234F".to_string(),
            total_portfolio: 1000.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(validate(&valid_record()).is_ok());
    }

    #[test]
    fn test_missing_name() {
        let record = StructuredRecord {
            investor_name: "  ".to_string(),
            ..valid_record()
        };
        assert_eq!(validate(&record), Err(ValidationError::MissingInvestorName));
    }

    #[test]
    fn test_invalid_pan() {
        let record = StructuredRecord {
            pan: "ABC".to_string(),
            ..valid_record()
        };
        assert_eq!(
            validate(&record),
            Err(ValidationError::InvalidPan("ABC".to_string()))
        );
    }

    #[test]
    fn test_negative_portfolio() {
        let record = StructuredRecord {
            total_portfolio: -1.0,
            ..valid_record()
        };
        assert_eq!(
            validate(&record),
            Err(ValidationError::NegativePortfolio(-1.0))
        );
    }

    #[test]
    fn test_name_checked_before_pan() {
        let record = StructuredRecord::default();
        assert_eq!(validate(&record), Err(ValidationError::MissingInvestorName));
    }
}
