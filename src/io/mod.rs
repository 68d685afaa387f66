//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - chart exports (figure JSON, SVG) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
