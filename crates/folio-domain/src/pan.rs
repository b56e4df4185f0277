//! PAN module - the investor identity code

/// Length of a PAN
pub const PAN_LENGTH: usize = 10;

/// Check whether a code is a well-formed PAN: exactly 10 ASCII alphanumerics
pub fn is_valid_pan(code: &str) -> bool {
    code.len() == PAN_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
