//! Reporting utilities: load summary and event table.

pub mod format;

pub use format::{format_event_table, format_load_summary};
