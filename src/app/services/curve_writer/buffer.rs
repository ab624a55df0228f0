//! Buffered output file of one curve
//!
//! A buffer may back several consecutive columns (an array curve); it writes
//! one text line per data row: the raw index followed by a space-prefixed
//! value per column, with NULL sentinels written as a bare space.

use crate::constants::NULL_PLACEHOLDER;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct CurveBuffer {
    path: PathBuf,
    dimension: usize,
    /// Values written on the current line
    count: usize,
    writer: Option<BufWriter<File>>,
}

impl CurveBuffer {
    /// Create (or truncate) the file at `path`
    pub fn create(path: PathBuf, capacity: usize) -> io::Result<Self> {
        let file = File::create(&path)?;
        debug!("Opened curve file {}", path.display());

        Ok(Self {
            path,
            dimension: 1,
            count: 0,
            writer: Some(BufWriter::with_capacity(capacity, file)),
        })
    }

    /// Another column shares this file
    pub fn add_column(&mut self) {
        self.dimension += 1;
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one value of the row indexed by `index`
    pub fn write_value(&mut self, index: &str, value: &str, null: Option<f64>) -> io::Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::other(format!("{} is closed", self.path.display())))?;

        if self.count == 0 {
            writer.write_all(index.as_bytes())?;
        }

        if is_null(value, null) {
            writer.write_all(NULL_PLACEHOLDER.as_bytes())?;
        } else {
            writer.write_all(b" ")?;
            writer.write_all(value.as_bytes())?;
        }

        self.count += 1;
        if self.count >= self.dimension {
            writer.write_all(b"\n")?;
            self.count = 0;
        }

        Ok(())
    }

    /// Flush and close the file; later writes fail
    pub fn close(&mut self) -> io::Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }

    /// Close and delete the file
    pub fn discard(mut self) -> io::Result<()> {
        // Unflushed data is being thrown away anyway
        drop(self.writer.take());
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// True if `value` parses to the NULL sentinel
pub fn is_null(value: &str, null: Option<f64>) -> bool {
    match null {
        Some(null) => value.trim().parse::<f64>().is_ok_and(|v| v == null),
        None => false,
    }
}

/// Rewrite a curve file with its lines in reverse order
pub fn reverse_lines(path: &Path) -> io::Result<()> {
    let content = std::fs::read_to_string(path)?;
    if content.is_empty() {
        return Ok(());
    }

    let mut reversed = String::with_capacity(content.len());
    for line in content.lines().rev() {
        reversed.push_str(line);
        reversed.push('\n');
    }

    std::fs::write(path, reversed)
}
