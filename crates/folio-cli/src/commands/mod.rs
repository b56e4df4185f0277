//! Command implementations.

pub mod merge;
pub mod parse;
pub mod validate;

pub use self::merge::execute_merge;
pub use self::parse::{execute_parse, extract_file};
pub use self::validate::execute_validate;
