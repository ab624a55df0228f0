//! LAS 2.0/3.0 parser for well-log files
//!
//! This module turns a LAS file into a [`WellInfo`](crate::WellInfo) and one
//! data file per curve in a single pass over the input. Lines are classified
//! by a section state machine and dispatched to small, pure field parsers;
//! data rows are streamed straight into the curve writers.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - File reading, decoding, and the success/rollback decision
//! - [`state`] - Section state machine and per-line dispatch
//! - [`section`] - Section header naming and classification
//! - [`header_field`] - `MNEM.UNIT VALUE : DESCRIPTION` decomposition
//! - [`curve_definition`] - Curve identity parsing and name de-duplication
//! - [`tokenizer`] - Line normalization and quote-aware field splitting
//! - [`stats`] - Extraction statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use las_extractor::{ExtractorConfig, ImportData, LasExtractor};
//!
//! # async fn example() -> las_extractor::Result<()> {
//! let extractor = LasExtractor::new(ExtractorConfig::default().with_storage_root("/srv/curves"));
//! let outcome = extractor
//!     .extract(std::path::Path::new("upload.las"), ImportData::new("alice"))
//!     .await?;
//!
//! println!("{} curves from {} rows",
//!          outcome.well.curve_count(),
//!          outcome.stats.rows_written);
//! # Ok(())
//! # }
//! ```

pub mod curve_definition;
pub mod header_field;
pub mod parser;
pub mod section;
pub mod state;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header_field::HeaderField;
pub use parser::LasExtractor;
pub use section::{LasVersion, SectionKind};
pub use state::ParserState;
pub use stats::{ExtractOutcome, ExtractStats};
