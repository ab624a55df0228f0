//! Row assembly and depth tracking for one dataset
//!
//! Data lines are tokenized upstream and pushed here. Fields accumulate until
//! a complete row (index plus one value per curve) is available; in wrap mode
//! a row may span several lines. Each complete row updates the dataset's top,
//! bottom, step and count and is written to the curve buffers.

use super::buffer::CurveBuffer;
use crate::FormatError;
use crate::app::models::{CurveFormat, Dataset};
use crate::app::services::las_parser::tokenizer::is_quoted;
use crate::constants::{STEP_DECIMALS, STEP_EPSILON};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Per-line context the writer needs from the surrounding file
#[derive(Debug, Clone, Copy, Default)]
pub struct RowContext {
    /// NULL sentinel from the WELL section
    pub null_value: Option<f64>,
    /// Keep the step at 0 (a LAS 2 file declaring `STEP` 0)
    pub fixed_zero_step: bool,
    /// Rows may span several lines
    pub wrap: bool,
    /// 1-based line number, for error reporting
    pub line_number: usize,
}

/// Writers and row state of one dataset
#[derive(Debug)]
pub struct DatasetWriter {
    /// Keyed by curve name without array subscripts
    pub(super) buffers: HashMap<String, CurveBuffer>,
    /// Buffer key of each column, in curve order
    columns: Vec<String>,
    pending: Vec<String>,
    /// Last numeric index written
    previous_index: Option<f64>,
    /// A non-numeric index was seen; the step stays 0
    irregular_index: bool,
    capacity: usize,
}

impl DatasetWriter {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: HashMap::new(),
            columns: Vec::new(),
            pending: Vec::new(),
            previous_index: None,
            irregular_index: false,
            capacity,
        }
    }

    /// Start a new data section; columns are re-attached afterwards
    pub fn begin_section(&mut self) {
        self.columns.clear();
        self.pending.clear();
    }

    /// Fail if a wrapped row is still missing values
    pub fn ensure_row_complete(&self, line_number: usize) -> Result<(), FormatError> {
        if self.pending.is_empty() {
            Ok(())
        } else {
            Err(FormatError::InsufficientData { line_number })
        }
    }

    /// File already backing `key`, if any
    pub fn buffer_path(&self, key: &str) -> Option<&Path> {
        self.buffers.get(key).map(CurveBuffer::path)
    }

    /// Attach a curve that has no file yet: create the file, or widen the
    /// buffer if another column already uses `key`
    pub fn open_column(&mut self, key: &str, path: &Path) -> io::Result<()> {
        match self.buffers.get_mut(key) {
            Some(buffer) => buffer.add_column(),
            None => {
                let buffer = CurveBuffer::create(path.to_path_buf(), self.capacity)?;
                self.buffers.insert(key.to_string(), buffer);
            }
        }
        self.columns.push(key.to_string());
        Ok(())
    }

    /// Attach a curve whose file was opened by an earlier data section
    pub fn reuse_column(&mut self, key: &str) {
        self.columns.push(key.to_string());
    }

    /// Every file this writer has created
    pub fn paths(&self) -> Vec<PathBuf> {
        self.buffers.values().map(|b| b.path().to_path_buf()).collect()
    }

    /// Ingest the fields of one data line
    pub fn push_fields(
        &mut self,
        dataset: &mut Dataset,
        fields: Vec<String>,
        ctx: &RowContext,
    ) -> Result<(), FormatError> {
        self.pending.extend(fields);

        let curve_count = dataset.curves.len();
        let line_number = ctx.line_number;

        if !ctx.wrap && self.pending.len() <= curve_count {
            return Err(FormatError::InsufficientData { line_number });
        }
        if self.pending.len() > curve_count + 1 {
            return Err(FormatError::TooManyColumns { line_number });
        }
        if self.pending.len() == curve_count + 1 {
            self.write_row(dataset, ctx)?;
        }

        Ok(())
    }

    fn write_row(&mut self, dataset: &mut Dataset, ctx: &RowContext) -> Result<(), FormatError> {
        let row = std::mem::take(&mut self.pending);
        let Some((index_text, values)) = row.split_first() else {
            return Ok(());
        };

        if self.columns.len() != dataset.curves.len() {
            return Err(FormatError::ExtractFailed {
                reason: format!(
                    "{} curves but {} open columns at line {}",
                    dataset.curves.len(),
                    self.columns.len(),
                    ctx.line_number
                ),
            });
        }

        self.track_index(dataset, index_text, ctx);

        for ((curve, key), value) in dataset.curves.iter_mut().zip(&self.columns).zip(values) {
            if !curve.is_text() && is_quoted(value) {
                curve.format = CurveFormat::Text;
            }

            let buffer = self
                .buffers
                .get_mut(key)
                .ok_or_else(|| FormatError::ExtractFailed {
                    reason: format!("no open file for curve {}", curve.name),
                })?;

            buffer
                .write_value(index_text, value, ctx.null_value)
                .map_err(|e| FormatError::ExtractFailed {
                    reason: format!("writing curve {}: {}", curve.name, e),
                })?;
        }

        dataset.count += 1;
        Ok(())
    }

    /// Update top, bottom and step from one row's index
    ///
    /// Non-numeric indexes (e.g. time stamps) are written as-is and make the
    /// step irregular.
    fn track_index(&mut self, dataset: &mut Dataset, index_text: &str, ctx: &RowContext) {
        let index = match index_text.parse::<f64>() {
            Ok(index) if index.is_finite() => index,
            _ => {
                if !self.irregular_index {
                    debug!(
                        "Non-numeric index '{}' at line {}, step set to 0",
                        index_text, ctx.line_number
                    );
                }
                self.irregular_index = true;
                dataset.step = 0.0;
                return;
            }
        };

        match self.previous_index {
            None => dataset.top = index,
            Some(_) if self.irregular_index || ctx.fixed_zero_step => dataset.step = 0.0,
            Some(previous) if dataset.count == 1 => dataset.step = round_step(index - previous),
            Some(previous) => {
                if dataset.step != 0.0 && !steps_match(index - previous, dataset.step) {
                    dataset.step = 0.0;
                }
            }
        }

        dataset.bottom = index;
        self.previous_index = Some(index);
    }

    /// Close and delete every file; returns how many were removed
    pub fn discard(self) -> usize {
        let mut removed = 0;
        for (key, buffer) in self.buffers {
            let path = buffer.path().to_path_buf();
            match buffer.discard() {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to remove {} file {}: {}", key, path.display(), e),
            }
        }
        removed
    }
}

/// Round a step to the compared precision
pub fn round_step(step: f64) -> f64 {
    let factor = 10f64.powi(STEP_DECIMALS);
    (step * factor).round() / factor
}

/// True if `difference`, once rounded, equals `step`
pub fn steps_match(difference: f64, step: f64) -> bool {
    (round_step(difference) - step).abs() < STEP_EPSILON
}
