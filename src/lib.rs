//! `fomc-rates` library crate.
//!
//! The binary (`fomc-dash`) is a thin wrapper around this library so that:
//!
//! - the join, chart and hover logic is testable without a browser
//! - the HTTP layer stays a small shell over pure functions

pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod hover;
pub mod io;
pub mod report;
pub mod server;
