//! Core Extractor implementation

use crate::chunking::FragmentSplitter;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::identity::{resolve_identity, IdentityStrategy};
use crate::normalize::normalize_text;
use crate::parser::parse_fragment_responses;
use crate::reconcile::{merge, PartialRecord};
use crate::summary::{extract_summary, extract_summary_fields};
use crate::table::{carry_table_header, extract_activities};
use folio_domain::StructuredRecord;
use tracing::{debug, info, warn};

/// The Extractor turns statement text into a [`StructuredRecord`]
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    fn check_length(&self, text: &str) -> Result<(), ExtractorError> {
        let len = text.chars().count();
        if len > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(len, self.config.max_text_length));
        }
        Ok(())
    }

    /// Extract a record from the whole text in one pass
    pub fn extract(&self, text: &str) -> Result<StructuredRecord, ExtractorError> {
        self.check_length(text)?;
        info!("Starting extraction, text length {}", text.len());

        let text = normalize_text(text);
        let identity = resolve_identity(&text, &IdentityStrategy::ALL);
        let summary = extract_summary(&text);
        let recent_activities = extract_activities(&text);

        info!(
            "Extraction complete: investor '{}', {} activities",
            identity.name,
            recent_activities.len()
        );

        Ok(StructuredRecord {
            investor_name: identity.name,
            pan: identity.pan,
            total_portfolio: summary.total_portfolio,
            mutual_funds_value: summary.mutual_funds_value,
            current_cost: summary.current_cost,
            unrealised_gain: summary.unrealised_gain,
            realised_gain: summary.realised_gain,
            abs_return: summary.abs_return,
            xirr: summary.xirr,
            change_in_a_day: summary.change_in_a_day,
            recent_activities,
            debt_fund_ratings: summary.debt_fund_ratings,
        })
    }

    /// Extract a partial record, keeping track of which fields were found
    pub fn extract_partial(&self, text: &str) -> Result<PartialRecord, ExtractorError> {
        self.check_length(text)?;
        Ok(partial_from_text(&normalize_text(text)))
    }

    /// Extract a record, splitting oversized text into fragments
    ///
    /// Fragments after the one opening the activities table get the table
    /// header repeated on top, so a long table keeps every row. Fragments are
    /// extracted concurrently on the blocking pool and merged in fragment
    /// order. A fragment task that fails is logged and skipped;
    /// only when every task fails is an error returned.
    pub async fn extract_fragmented(&self, text: &str) -> Result<StructuredRecord, ExtractorError> {
        self.check_length(text)?;

        let text = normalize_text(text);
        if text.chars().count() <= self.config.max_fragment_size {
            return self.extract(&text);
        }

        let splitter =
            FragmentSplitter::new(self.config.fragment_strategy, self.config.max_fragment_size);
        let fragments = carry_table_header(splitter.split(&text));
        info!(
            "Text exceeds max fragment size, split into {} fragments",
            fragments.len()
        );

        let handles: Vec<_> = fragments
            .into_iter()
            .map(|fragment| tokio::task::spawn_blocking(move || partial_from_text(&fragment)))
            .collect();
        let total = handles.len();

        let mut partials = Vec::with_capacity(total);
        for (idx, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(partial) => {
                    debug!("Fragment {}/{} extracted", idx + 1, total);
                    partials.push(partial);
                }
                Err(e) => warn!("Fragment {}/{} failed: {}", idx + 1, total, e),
            }
        }

        if partials.is_empty() && total > 0 {
            return Err(ExtractorError::Fragment(format!(
                "all {} fragment tasks failed",
                total
            )));
        }

        let record = merge(&partials);
        info!(
            "Fragmented extraction complete: {} of {} fragments merged, {} activities",
            partials.len(),
            total,
            record.recent_activities.len()
        );
        Ok(record)
    }

    /// Parse externally produced fragment responses and merge them
    ///
    /// Responses that fail to parse are dropped.
    pub fn merge_responses<S: AsRef<str>>(&self, responses: &[S]) -> StructuredRecord {
        let partials = parse_fragment_responses(responses);
        info!(
            "Merging {} of {} fragment responses",
            partials.len(),
            responses.len()
        );
        merge(&partials)
    }
}

/// Extract a partial record from already normalized text
fn partial_from_text(text: &str) -> PartialRecord {
    let identity = resolve_identity(text, &IdentityStrategy::ALL);
    let (investor_name, pan) = if identity.is_empty() {
        (None, None)
    } else {
        (Some(identity.name), Some(identity.pan))
    };
    let summary = extract_summary_fields(text);

    PartialRecord {
        investor_name,
        pan,
        total_portfolio: summary.total_portfolio,
        mutual_funds_value: summary.mutual_funds_value,
        current_cost: summary.current_cost,
        unrealised_gain: summary.unrealised_gain,
        realised_gain: summary.realised_gain,
        abs_return: summary.abs_return,
        xirr: summary.xirr,
        change_in_a_day: summary.change_in_a_day,
        recent_activities: extract_activities(text),
        debt_fund_ratings: summary
            .debt_fund_ratings
            .into_iter()
            .map(|(category, value)| (category.label().to_string(), value))
            .collect(),
    }
}
