//! Line-ending normalization for extracted PDF text

/// Convert `\r\n` and lone `\r` to `\n` and trim the ends
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}
