//! Merge command implementation.

use crate::cli::MergeArgs;
use crate::error::Result;
use crate::output::Formatter;
use folio_domain::StructuredRecord;
use folio_extractor::Extractor;
use std::fs;
use std::path::PathBuf;

/// Execute the merge command.
pub async fn execute_merge(
    args: MergeArgs,
    extractor: &Extractor,
    formatter: &Formatter,
) -> Result<()> {
    let record = merge_files(extractor, &args.files)?;
    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

/// Read fragment responses from files, in order, and merge them.
fn merge_files(extractor: &Extractor, files: &[PathBuf]) -> Result<StructuredRecord> {
    let responses = files
        .iter()
        .map(fs::read_to_string)
        .collect::<std::io::Result<Vec<_>>>()?;
    Ok(extractor.merge_responses(responses.as_slice()))
}
