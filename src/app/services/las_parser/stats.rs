//! Extraction statistics and result structures

use crate::app::models::WellInfo;
use serde::{Deserialize, Serialize};

/// Result of a successful extraction
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    /// Normalized well description; curve paths are relative to the storage root
    pub well: WellInfo,

    /// Counters gathered while reading the file
    pub stats: ExtractStats,
}

/// Simple extraction statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Lines read from the input, including skipped ones
    pub lines_read: usize,

    /// Blank and comment lines
    pub lines_skipped: usize,

    /// Section header lines
    pub header_lines: usize,

    /// Complete data rows written
    pub rows_written: usize,

    /// Datasets in the finalized well
    pub datasets: usize,

    /// Curve data files kept
    pub curve_files: usize,
}

impl ExtractStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that carried content
    pub fn content_lines(&self) -> usize {
        self.lines_read.saturating_sub(self.lines_skipped)
    }
}
