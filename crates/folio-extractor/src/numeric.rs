//! Numeric tokens as printed on statements

/// Convert a statement token to a number
///
/// Drops `,` separators (Indian and Western grouping alike), then parses the
/// first whitespace-delimited field. Anything unreadable is 0, so the result
/// cannot tell "zero" from "missing".
pub fn to_number(token: &str) -> f64 {
    let cleaned = token.replace(',', "");
    cleaned
        .split_whitespace()
        .next()
        .and_then(|field| field.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Convert a percentage token, ignoring any `%` signs
pub fn to_percent(token: &str) -> f64 {
    to_number(&token.replace('%', ""))
}
