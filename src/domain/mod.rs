//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - input rows and observations (`RateObservation`, `MeetingRecord`)
//! - the joined event row (`MeetingEvent`) and its category (`Sentiment`)
//! - resolved run settings (`DashboardConfig`)

pub mod types;

pub use types::*;
