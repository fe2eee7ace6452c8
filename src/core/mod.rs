//! Post-parse processing for chatview.
//!
//! This module contains:
//! - [`models`] - Export configuration
//! - [`filter`] - Message filtering by date, sender and kind
//! - [`stats`] - Transcript summary counts
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatview::core::{
//!     FilterConfig, OutputConfig, TranscriptStats,
//!     apply_filters, to_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod filter;
pub mod models;
pub mod output;
pub mod stats;

pub use filter::{FilterConfig, apply_filters};
pub use models::OutputConfig;
pub use stats::TranscriptStats;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
