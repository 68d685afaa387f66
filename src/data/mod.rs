//! Data loading and joining.
//!
//! - `series`: the date-indexed rate series
//! - `join`: inner join of meetings with rate observations
//! - `dataset`: the startup pipeline that ties ingest and join together

pub mod dataset;
pub mod join;
pub mod series;

pub use dataset::{Dataset, LoadReport};
pub use join::{JoinOutcome, inner_join};
pub use series::RateSeries;
