//! File-level LAS extraction
//!
//! [`LasExtractor`] opens the input, decodes it line by line (UTF-8, falling
//! back to Latin-1 for legacy files), feeds the [`ParserState`] and turns its
//! verdict into an [`ExtractOutcome`] or an error. The input file is removed
//! afterwards unless the configuration says to keep it.

use super::state::ParserState;
use super::stats::ExtractOutcome;
use crate::app::models::ImportData;
use crate::app::services::storage::{HashDirResolver, PathResolver};
use crate::config::ExtractorConfig;
use crate::{Error, FormatError, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, info, warn};

/// Converts LAS files into a well description plus per-curve data files
#[derive(Clone)]
pub struct LasExtractor {
    config: ExtractorConfig,
    resolver: Arc<dyn PathResolver>,
}

impl LasExtractor {
    /// Create an extractor storing curves in hashed directories
    pub fn new(config: ExtractorConfig) -> Self {
        Self::with_resolver(config, Arc::new(HashDirResolver::new()))
    }

    /// Create an extractor with a custom path allocation scheme
    pub fn with_resolver(config: ExtractorConfig, resolver: Arc<dyn PathResolver>) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a LAS file without blocking the async runtime
    pub async fn extract(&self, input: &Path, import: ImportData) -> Result<ExtractOutcome> {
        let extractor = self.clone();
        let input = input.to_path_buf();

        task::spawn_blocking(move || extractor.extract_blocking(&input, &import))
            .await
            .map_err(|e| Error::extract_failed(format!("extraction task failed: {}", e)))?
    }

    /// Extract a LAS file on the current thread
    ///
    /// On success every curve's `path` is relative to the storage root. On any
    /// failure no curve files are left behind.
    pub fn extract_blocking(&self, input: &Path, import: &ImportData) -> Result<ExtractOutcome> {
        let start_time = Instant::now();
        info!("Extracting LAS file: {}", input.display());

        let file = File::open(input).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::file_not_found(input.display().to_string()),
            _ => Error::io(format!("Failed to open {}", input.display()), e),
        })?;

        let mut state = ParserState::new(&self.config, self.resolver.as_ref(), import, input);
        if let Err(e) = self.feed_lines(file, &mut state) {
            state.fail(FormatError::ExtractFailed {
                reason: format!("reading {}: {}", input.display(), e),
            });
        }

        let verdict = state.finish();
        self.remove_source(input);

        match verdict {
            Ok((well, stats)) => {
                info!(
                    "Extracted well {}: {} datasets, {} curve files, {} rows in {:.2?}",
                    well.name,
                    stats.datasets,
                    stats.curve_files,
                    stats.rows_written,
                    start_time.elapsed()
                );
                Ok(ExtractOutcome { well, stats })
            }
            Err(error) => {
                warn!("Rejected {}: {}", input.display(), error);
                Err(error.into())
            }
        }
    }

    fn feed_lines(&self, file: File, state: &mut ParserState<'_>) -> io::Result<()> {
        let mut reader = BufReader::with_capacity(self.config.read_buffer_size, file);
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            state.handle_line(&decode_line(&buffer));
        }

        debug!(
            "Read {} lines ({} with content)",
            state.stats().lines_read,
            state.stats().content_lines()
        );
        Ok(())
    }

    fn remove_source(&self, input: &Path) {
        if !self.config.remove_source {
            return;
        }

        match std::fs::remove_file(input) {
            Ok(()) => debug!("Removed source file {}", input.display()),
            Err(e) => warn!("Failed to remove source file {}: {}", input.display(), e),
        }
    }
}

/// Decode one line, dropping the terminator; non-UTF-8 lines are read as Latin-1
pub(crate) fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(line) => Cow::Borrowed(line),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}
