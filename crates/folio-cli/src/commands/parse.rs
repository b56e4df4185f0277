//! Parse command implementation.

use crate::cli::ParseArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use folio_domain::StructuredRecord;
use folio_extractor::Extractor;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Execute the parse command.
pub async fn execute_parse(
    args: ParseArgs,
    extractor: &Extractor,
    formatter: &Formatter,
) -> Result<()> {
    let text = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = args.file {
        fs::read_to_string(file_path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either a file or --stdin".to_string(),
        ));
    };

    let record = extract_text(extractor, &text, args.fragmented, args.enrich).await?;
    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

/// Read a statement file and extract a record from it.
pub async fn extract_file(
    extractor: &Extractor,
    path: &Path,
    fragmented: bool,
) -> Result<StructuredRecord> {
    let text = fs::read_to_string(path)?;
    extract_text(extractor, &text, fragmented, false).await
}

async fn extract_text(
    extractor: &Extractor,
    text: &str,
    fragmented: bool,
    enrich: bool,
) -> Result<StructuredRecord> {
    debug!("Extracting {} chars (fragmented: {})", text.len(), fragmented);
    let record = if fragmented {
        extractor.extract_fragmented(text).await?
    } else {
        extractor.extract(text)?
    };
    Ok(if enrich { record.enriched() } else { record })
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_extractor::ExtractorConfig;
    use tempfile::TempDir;

    const STATEMENT: &str = "JOHN SMITH [ABCDE1234F]\nTotal Portfolio Value\n(INR)\n1,20,000.00\nMF Current Cost\n(INR)\n1,00,000.00";

    #[tokio::test]
    async fn test_extract_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("statement.txt");
        fs::write(&path, STATEMENT).unwrap();

        let extractor = Extractor::new(ExtractorConfig::default());
        let record = extract_file(&extractor, &path, false).await.unwrap();
        assert_eq!(record.pan, "ABCDE1234F");
        assert_eq!(record.abs_return, 0.0);
    }

    #[tokio::test]
    async fn test_enrich_derives_abs_return() {
        let extractor = Extractor::new(ExtractorConfig::default());
        let record = extract_text(&extractor, STATEMENT, true, true).await.unwrap();
        assert_eq!(record.abs_return, 20.0);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let extractor = Extractor::new(ExtractorConfig::default());
        let result = extract_file(&extractor, &dir.path().join("nope.txt"), false).await;
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
