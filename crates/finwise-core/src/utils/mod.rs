//! Utility functions for amount parsing and display formatting.

pub mod format;

pub use format::{format_currency, format_month, parse_amount, truncate_string};
