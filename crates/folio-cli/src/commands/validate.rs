//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::output::Formatter;
use folio_extractor::Extractor;

/// Execute the validate command.
///
/// A record that fails validation is reported as an error so the process
/// exits non-zero.
pub async fn execute_validate(
    args: ValidateArgs,
    extractor: &Extractor,
    formatter: &Formatter,
) -> Result<()> {
    let record = super::extract_file(extractor, &args.file, false).await?;
    folio_domain::validate(&record)?;
    println!(
        "{}",
        formatter.success(&format!("{} is a valid statement", args.file.display()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use folio_domain::ValidationError;
    use folio_extractor::ExtractorConfig;
    use std::fs;
    use tempfile::TempDir;

    async fn validate_text(text: &str) -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("statement.txt");
        fs::write(&path, text).unwrap();

        let extractor = Extractor::new(ExtractorConfig::default());
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        execute_validate(ValidateArgs { file: path }, &extractor, &formatter).await
    }

    #[tokio::test]
    async fn test_valid_statement() {
        assert!(validate_text("JOHN SMITH [ABCDE1234F]").await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_name_fails() {
        let result = validate_text("Total Portfolio Value\n(INR)\n100").await;
        assert!(matches!(
            result,
            Err(CliError::Validation(ValidationError::MissingInvestorName))
        ));
    }
}
