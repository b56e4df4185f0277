//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use folio_domain::{ActivityRow, RiskAllocation, StructuredRecord};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a whole record.
    pub fn format_record(&self, record: &StructuredRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Table => Ok(self.format_record_table(record)),
            OutputFormat::Quiet => Ok(format!("{}\t{}", record.investor_name, record.pan)),
        }
    }

    /// Format the recent-activities table of a record.
    pub fn format_activities(&self, activities: &[ActivityRow]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(activities)?),
            OutputFormat::Table => Ok(self.format_activities_table(activities)),
            OutputFormat::Quiet => Ok(activities
                .iter()
                .map(|row| row.scheme.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a risk allocation.
    pub fn format_ratings(&self, ratings: &RiskAllocation) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(ratings)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Risk Category", "Allocation (%)"]);
                for (category, value) in ratings.iter() {
                    builder.push_record([category.label().to_string(), format!("{:.2}", value)]);
                }
                builder.push_record(["Total".to_string(), format!("{:.2}", ratings.total())]);
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(ratings
                .iter()
                .map(|(category, value)| format!("{}\t{}", category, value))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a record as summary and activity tables.
    fn format_record_table(&self, record: &StructuredRecord) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        let rows = [
            ("Investor", record.investor_name.clone()),
            ("PAN", record.pan.clone()),
            ("Total Portfolio", format!("{:.2}", record.total_portfolio)),
            ("Mutual Funds", format!("{:.2}", record.mutual_funds_value)),
            ("Current Cost", format!("{:.2}", record.current_cost)),
            ("Unrealised Gain", format!("{:.2}", record.unrealised_gain)),
            ("Realised Gain", format!("{:.2}", record.realised_gain)),
            ("Abs. Return (%)", format!("{:.2}", record.abs_return)),
            ("XIRR (%)", format!("{:.2}", record.xirr)),
            ("Change in a Day", format!("{:.2}", record.change_in_a_day)),
        ];
        for (field, value) in rows {
            builder.push_record([field.to_string(), value]);
        }

        format!(
            "{}\n{}",
            self.render(builder),
            self.format_activities_table(&record.recent_activities)
        )
    }

    /// Format activities as a table.
    fn format_activities_table(&self, activities: &[ActivityRow]) -> String {
        if activities.is_empty() {
            return self.colorize("No recent activities found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Scheme", "Folio No", "Date", "Type", "NAV", "Units", "Amount"]);
        for row in activities {
            builder.push_record([
                row.scheme.clone(),
                row.folio_no.clone(),
                row.tran_date.clone(),
                row.tran_type.clone(),
                format!("{:.4}", row.nav),
                format!("{:.3}", row.units),
                format!("{:.2}", row.amount),
            ]);
        }
        self.render(builder)
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a record-loaded message.
    pub fn record_loaded(&self, record: &StructuredRecord) -> String {
        let name = if record.investor_name.is_empty() {
            "unknown investor"
        } else {
            record.investor_name.as_str()
        };
        self.success(&format!(
            "Loaded statement for {} ({} activities)",
            name,
            record.recent_activities.len()
        ))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
