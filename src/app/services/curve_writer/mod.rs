//! Per-curve data file writers
//!
//! Each curve of a dataset gets one buffered text file, created when its data
//! section is entered. Curves sharing a base name (`NMR[1]`, `NMR[2]`, ...)
//! share one file with several values per line. On success the files are
//! flushed and, for decreasing-depth logs, reversed; on failure they are
//! deleted.

pub mod aggregator;
pub mod buffer;
pub mod finalize;

pub use aggregator::{DatasetWriter, RowContext};
pub use buffer::CurveBuffer;
pub use finalize::{normalize_dataset_direction, normalize_well_step, widen_well_range};
