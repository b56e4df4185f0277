//! Label-relative field lookup
//!
//! Statements print a label and put its value a fixed number of lines below
//! it. The locator finds the first line containing the label and reads the
//! line `offset` positions further down.

use crate::numeric::to_number;

/// Find the value line `offset` lines below the first line containing `label`
///
/// Matching is a case-sensitive substring test against each trimmed line.
/// Only the first occurrence of the label is considered. A label containing
/// `\n` must have its parts on consecutive lines, and the offset counts from
/// the line holding the last part.
///
/// Returns the trimmed value line, or `None` if the label never appears or
/// the offset runs past the end of the text.
///
/// # Examples
///
/// ```
/// use folio_extractor::locate;
///
/// let text = "Total Portfolio Value\n(INR)\n1,50,000.00";
/// assert_eq!(locate(text, "Total Portfolio Value", 2), Some("1,50,000.00"));
/// assert_eq!(locate(text, "Total Portfolio Value", 3), None);
/// ```
pub fn locate<'a>(text: &'a str, label: &str, offset: usize) -> Option<&'a str> {
    let lines: Vec<&str> = text.split('\n').collect();
    let parts: Vec<&str> = label.split('\n').collect();
    let span = parts.len() - 1;

    let start = (0..lines.len()).find(|&i| {
        parts.iter().enumerate().all(|(k, part)| {
            lines
                .get(i + k)
                .is_some_and(|line| line.trim().contains(part))
        })
    })?;

    lines.get(start + span + offset).map(|line| line.trim())
}

/// [`locate`] followed by [`to_number`]; `None` only when the label is missing
pub fn locate_number(text: &str, label: &str, offset: usize) -> Option<f64> {
    locate(text, label, offset).map(to_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Portfolio Summary\n  MF Current Cost  \nINR\n  1,00,000.00 \nMF Current Cost\nINR\n5.00";

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(locate(TEXT, "MF Current Cost", 2), Some("1,00,000.00"));
    }

    #[test]
    fn test_offset_zero_returns_label_line() {
        assert_eq!(locate(TEXT, "Summary", 0), Some("Portfolio Summary"));
    }

    #[test]
    fn test_missing_label() {
        assert_eq!(locate(TEXT, "XIRR", 1), None);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(locate(TEXT, "mf current cost", 1), None);
    }

    #[test]
    fn test_offset_past_end() {
        assert_eq!(locate("Label\nvalue", "Label", 2), None);
        assert_eq!(locate("Label\nvalue", "Label", 1), Some("value"));
    }

    #[test]
    fn test_multi_line_label() {
        let text = "Abs.\nReturn (MFs)\n18.25";
        assert_eq!(locate(text, "Abs.\nReturn (MFs)", 1), Some("18.25"));
        assert_eq!(locate(text, "Abs. Return (MFs)", 1), None);
    }

    #[test]
    fn test_multi_line_label_needs_consecutive_lines() {
        let text = "Abs.\nsomething\nReturn (MFs)\n18.25";
        assert_eq!(locate(text, "Abs.\nReturn (MFs)", 1), None);
    }

    #[test]
    fn test_locate_number() {
        assert_eq!(locate_number(TEXT, "MF Current Cost", 2), Some(100_000.0));
        assert_eq!(locate_number(TEXT, "MF Current Cost", 1), Some(0.0));
        assert_eq!(locate_number(TEXT, "MF Realised", 2), None);
    }
}
