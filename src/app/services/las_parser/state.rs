//! Section state machine
//!
//! [`ParserState`] consumes one line at a time. Header lines switch the
//! active section after checking the section order
//! (VERSION, then WELL, then a definition, then data); every other line is
//! routed to the handler of the active section. The first error is recorded
//! and all later lines are ignored, so the caller can keep draining its input.

use super::curve_definition::{CurveDefinition, parse_index_unit, strip_array_index};
use super::header_field::{HeaderField, split_mnemonic};
use super::section::{LasVersion, SectionKind, classify, section_name};
use super::stats::ExtractStats;
use super::tokenizer::{normalize_line, split_fields};
use crate::FormatError;
use crate::app::models::{Dataset, ImportData, Parameter, WellField, WellInfo};
use crate::app::services::curve_writer::{
    DatasetWriter, RowContext, normalize_dataset_direction, normalize_well_step, widen_well_range,
};
use crate::app::services::storage::{PathResolver, curve_identity};
use crate::config::ExtractorConfig;
use crate::constants::{
    COMMENT_MARKER, DELIMITER_COMMA, DELIMITER_TAB, DESCRIPTION_SEPARATOR, SECTION_MARKER,
    WRAP_ENABLED, mnemonics,
};
use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

type LineResult = std::result::Result<(), FormatError>;

/// Furthest mandatory section reached so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Progress {
    Start,
    Version,
    Well,
    Definition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveSection {
    /// Before the first header
    None,
    Version,
    Well,
    Parameter { dataset: usize, scoped: bool },
    Definition { dataset: usize },
    Data { dataset: usize },
    /// `free_form` sections accept lines without a `:`
    Other { free_form: bool },
}

#[derive(Debug)]
struct DatasetEntry {
    /// Name the dataset was opened under
    key: String,
    dataset: Dataset,
    writer: DatasetWriter,
    /// The index line of a definition section has been seen
    index_declared: bool,
    /// Named by a `SET` parameter
    renamed: bool,
}

/// Line-by-line parsing state of one LAS file
pub struct ParserState<'a> {
    config: &'a ExtractorConfig,
    resolver: &'a dyn PathResolver,
    user: String,
    known_well: bool,
    well: WellInfo,

    version: LasVersion,
    delimiter: char,
    wrap: bool,

    section: ActiveSection,
    progress: Progress,
    data_seen: bool,

    datasets: Vec<DatasetEntry>,
    current: Option<usize>,
    /// Number of bare PARAMETER sections seen in a LAS 3 file
    parameter_index: usize,

    error: Option<FormatError>,
    stats: ExtractStats,
}

impl<'a> ParserState<'a> {
    pub fn new(
        config: &'a ExtractorConfig,
        resolver: &'a dyn PathResolver,
        import: &ImportData,
        input: &Path,
    ) -> Self {
        Self {
            config,
            resolver,
            user: import.user.clone(),
            known_well: import.has_known_well(),
            well: import.initial_well(input),
            version: LasVersion::default(),
            delimiter: ' ',
            wrap: false,
            section: ActiveSection::None,
            progress: Progress::Start,
            data_seen: false,
            datasets: Vec::new(),
            current: None,
            parameter_index: 0,
            error: None,
            stats: ExtractStats::new(),
        }
    }

    pub fn well(&self) -> &WellInfo {
        &self.well
    }

    pub fn version(&self) -> LasVersion {
        self.version
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn is_wrapped(&self) -> bool {
        self.wrap
    }

    /// First error recorded, if any
    pub fn error(&self) -> Option<&FormatError> {
        self.error.as_ref()
    }

    pub fn stats(&self) -> &ExtractStats {
        &self.stats
    }

    /// Record an error from outside the line handlers (e.g. a read failure)
    pub fn fail(&mut self, error: FormatError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Feed one raw line (without its terminator)
    pub fn handle_line(&mut self, raw: &str) {
        self.stats.lines_read += 1;
        if self.error.is_some() {
            return;
        }

        let line = self.normalize(raw);
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            self.stats.lines_skipped += 1;
            return;
        }

        let result = if line.starts_with(SECTION_MARKER) {
            self.handle_header(&line)
        } else {
            self.handle_body(&line)
        };

        if let Err(error) = result {
            debug!("Line {} rejected: {}", self.line_number(), error);
            self.error = Some(error);
        }
    }

    fn line_number(&self) -> usize {
        self.stats.lines_read
    }

    /// Only data rows keep a TAB delimiter; metadata and header lines are
    /// always space-separated
    fn normalize(&self, raw: &str) -> String {
        if !matches!(self.section, ActiveSection::Data { .. }) || self.delimiter == ' ' {
            return normalize_line(raw, ' ');
        }

        let line = normalize_line(raw, self.delimiter);
        if line.starts_with(SECTION_MARKER) {
            normalize_line(raw, ' ')
        } else {
            line
        }
    }

    fn handle_header(&mut self, line: &str) -> LineResult {
        self.stats.header_lines += 1;

        let name = section_name(line, self.version);
        let kind = classify(&name, self.version);
        debug!("Line {}: section {} ({:?})", self.line_number(), name, kind);

        self.close_data_section()?;
        self.check_order(&kind)?;
        if kind.is_data() {
            self.data_seen = true;
        }
        self.section = self.enter_section(kind)?;
        Ok(())
    }

    fn check_order(&mut self, kind: &SectionKind) -> LineResult {
        match kind {
            SectionKind::Version => {
                if self.progress == Progress::Start {
                    self.progress = Progress::Version;
                }
            }
            SectionKind::Well => {
                self.require(Progress::Version)?;
                self.progress = Progress::Well;
            }
            SectionKind::Curve | SectionKind::Definition(_) => {
                self.require(Progress::Well)?;
                self.progress = Progress::Definition;
            }
            SectionKind::Ascii | SectionKind::Data(_) => {
                self.require(Progress::Definition)?;
                self.progress = Progress::Well;
            }
            SectionKind::Parameter | SectionKind::ScopedParameter(_) | SectionKind::Other(_) => {}
        }
        Ok(())
    }

    /// A wrapped row left incomplete when its data section ends
    fn close_data_section(&self) -> LineResult {
        match self.section {
            ActiveSection::Data { dataset } => self.datasets[dataset]
                .writer
                .ensure_row_complete(self.line_number()),
            _ => Ok(()),
        }
    }

    /// Error naming the first mandatory section missing before `needed`
    fn require(&self, needed: Progress) -> LineResult {
        if self.progress >= needed {
            return Ok(());
        }

        Err(match self.progress {
            Progress::Start => FormatError::MissingVersionSection,
            Progress::Version => FormatError::MissingWellSection,
            Progress::Well | Progress::Definition => FormatError::MissingDefinitionSection,
        })
    }

    fn enter_section(&mut self, kind: SectionKind) -> Result<ActiveSection, FormatError> {
        let section = match kind {
            SectionKind::Version => ActiveSection::Version,
            SectionKind::Well => ActiveSection::Well,
            SectionKind::Parameter => {
                let dataset = match self.version {
                    LasVersion::V2 => self.las2_dataset(),
                    LasVersion::V3 => {
                        self.parameter_index += 1;
                        let key = self.default_key();
                        self.open_dataset(key)
                    }
                };
                ActiveSection::Parameter {
                    dataset,
                    scoped: false,
                }
            }
            SectionKind::ScopedParameter(prefix) => ActiveSection::Parameter {
                dataset: self.open_dataset(prefix),
                scoped: true,
            },
            SectionKind::Curve => {
                let dataset = match (self.version, self.current) {
                    (LasVersion::V2, _) => self.las2_dataset(),
                    (LasVersion::V3, Some(current)) => current,
                    (LasVersion::V3, None) => {
                        let key = self.default_key();
                        self.open_dataset(key)
                    }
                };
                ActiveSection::Definition { dataset }
            }
            SectionKind::Definition(prefix) => ActiveSection::Definition {
                dataset: self.open_dataset(prefix),
            },
            SectionKind::Ascii => {
                let dataset = match self.version {
                    LasVersion::V2 => self.las2_dataset(),
                    LasVersion::V3 => self
                        .find_dataset(&self.default_key())
                        .or(self.current)
                        .ok_or(FormatError::MissingDefinitionSection)?,
                };
                self.enter_data(dataset)?;
                ActiveSection::Data { dataset }
            }
            SectionKind::Data(prefix) => {
                let dataset = self
                    .find_dataset(&prefix)
                    .or(self.current)
                    .ok_or(FormatError::MissingDefinitionSection)?;
                self.enter_data(dataset)?;
                ActiveSection::Data { dataset }
            }
            SectionKind::Other(name) => ActiveSection::Other {
                free_form: name == self.version.titles().other,
            },
        };

        Ok(section)
    }

    /// Key of the dataset addressed by bare PARAMETER/CURVE/ASCII sections
    fn default_key(&self) -> String {
        if self.parameter_index == 0 {
            self.well.name.clone()
        } else {
            format!("{}{}", self.well.name, self.parameter_index)
        }
    }

    fn find_dataset(&self, key: &str) -> Option<usize> {
        self.datasets.iter().position(|entry| entry.key == key)
    }

    /// Open the dataset named `key`, or make it current if it already exists
    fn open_dataset(&mut self, key: String) -> usize {
        let index = match self.find_dataset(&key) {
            Some(index) => index,
            None => {
                debug!("Opening dataset {}", key);
                self.datasets.push(DatasetEntry {
                    dataset: Dataset::new(key.as_str()),
                    key,
                    writer: DatasetWriter::new(self.config.write_buffer_size),
                    index_declared: false,
                    renamed: false,
                });
                self.datasets.len() - 1
            }
        };
        self.current = Some(index);
        index
    }

    /// A LAS 2 file has exactly one dataset
    fn las2_dataset(&mut self) -> usize {
        if self.datasets.is_empty() {
            let key = self.well.name.clone();
            self.open_dataset(key)
        } else {
            self.current = Some(0);
            0
        }
    }

    /// Attach every curve of the dataset to its output file
    fn enter_data(&mut self, index: usize) -> LineResult {
        let Self {
            datasets,
            well,
            user,
            config,
            resolver,
            ..
        } = self;
        let entry = &mut datasets[index];
        entry.writer.begin_section();

        for curve in entry.dataset.curves.iter_mut() {
            let key = strip_array_index(&curve.name);
            if curve.path.is_some() {
                entry.writer.reuse_column(&key);
                continue;
            }

            let path: PathBuf = match entry.writer.buffer_path(&key) {
                Some(existing) => existing.to_path_buf(),
                None => {
                    let identity =
                        curve_identity(user, &well.name, &entry.key, &key, &curve.unit, curve.step);
                    resolver
                        .resolve(
                            &config.storage_root,
                            &identity,
                            &config.curve_file_name(&key),
                        )
                        .map_err(extract_failed)?
                }
            };

            entry
                .writer
                .open_column(&key, &path)
                .map_err(extract_failed)?;
            curve.path = Some(path);
        }

        Ok(())
    }

    fn handle_body(&mut self, line: &str) -> LineResult {
        let free_form = matches!(
            self.section,
            ActiveSection::Version
                | ActiveSection::Data { .. }
                | ActiveSection::Other { free_form: true }
        );
        if !free_form && !line.contains(DESCRIPTION_SEPARATOR) {
            return Err(FormatError::WrongFormat {
                line_number: self.line_number(),
            });
        }

        match self.section {
            ActiveSection::None | ActiveSection::Other { .. } => Ok(()),
            ActiveSection::Version => {
                self.handle_version_line(line);
                Ok(())
            }
            ActiveSection::Well => {
                self.handle_well_line(line);
                Ok(())
            }
            ActiveSection::Parameter { dataset, scoped } => {
                self.handle_parameter_line(dataset, scoped, line);
                Ok(())
            }
            ActiveSection::Definition { dataset } => {
                self.handle_definition_line(dataset, line);
                Ok(())
            }
            ActiveSection::Data { dataset } => self.handle_data_line(dataset, line),
        }
    }

    fn handle_version_line(&mut self, line: &str) {
        let (mnem, rest) = split_mnemonic(line);
        let value = match rest.rfind(DESCRIPTION_SEPARATOR) {
            Some(colon) => &rest[..colon],
            None => rest,
        }
        .trim()
        .to_uppercase();

        match mnem.trim().to_uppercase().as_str() {
            mnemonics::VERSION => {
                self.version = LasVersion::from_value(&value);
                debug!("LAS version {} ({:?})", value, self.version);
            }
            mnemonics::DELIMITER => {
                self.delimiter = match value.as_str() {
                    DELIMITER_COMMA => ',',
                    DELIMITER_TAB => '\t',
                    _ => ' ',
                };
                debug!("Data delimiter {:?}", self.delimiter);
            }
            mnemonics::WRAP => {
                self.wrap = self.version == LasVersion::V2 && value == WRAP_ENABLED;
            }
            _ => {}
        }
    }

    fn handle_well_line(&mut self, line: &str) {
        if self.known_well {
            return;
        }

        let field = HeaderField::parse(line);
        if field.mnem.is_empty() {
            return;
        }

        if field.mnem == mnemonics::WELL && !field.value.is_empty() {
            self.well.name = field.value.clone();
        }
        self.well.set_field(
            field.mnem,
            WellField::new(field.value, field.description, field.unit),
        );
    }

    fn handle_parameter_line(&mut self, index: usize, scoped: bool, line: &str) {
        if self.known_well {
            return;
        }

        let field = HeaderField::parse(line);
        let entry = &mut self.datasets[index];

        if !scoped && field.mnem == mnemonics::SET && !field.value.is_empty() {
            entry.dataset.name = field.value.clone();
            entry.renamed = true;
        }

        entry.dataset.params.push(Parameter {
            mnem: field.mnem,
            value: field.value,
            description: field.description,
            unit: field.unit,
        });
    }

    fn handle_definition_line(&mut self, index: usize, line: &str) {
        let entry = &mut self.datasets[index];

        if !entry.index_declared {
            entry.dataset.unit = parse_index_unit(line);
            entry.index_declared = true;
            return;
        }

        let curve = CurveDefinition::parse(line).into_curve(&entry.dataset.curves);
        trace!("Dataset {}: curve {} ({})", entry.key, curve.name, curve.format);
        entry.dataset.curves.push(curve);
    }

    fn handle_data_line(&mut self, index: usize, line: &str) -> LineResult {
        let ctx = RowContext {
            null_value: self.well.null_value(),
            fixed_zero_step: self.version == LasVersion::V2 && self.well.step() == Some(0.0),
            wrap: self.wrap,
            line_number: self.line_number(),
        };
        let fields = split_fields(line, self.delimiter);

        let entry = &mut self.datasets[index];
        let before = entry.dataset.count;
        entry.writer.push_fields(&mut entry.dataset, fields, &ctx)?;
        self.stats.rows_written += entry.dataset.count - before;
        Ok(())
    }

    /// Mandatory section still missing once the input is exhausted
    fn missing_section(&self) -> Option<FormatError> {
        match (self.progress, self.data_seen) {
            (Progress::Start, _) => Some(FormatError::MissingVersionSection),
            (Progress::Version, _) => Some(FormatError::MissingWellSection),
            (Progress::Well, false) => Some(FormatError::MissingDefinitionSection),
            (Progress::Well, true) => None,
            (Progress::Definition, _) => Some(FormatError::MissingDataSection),
        }
    }

    /// Conclude the file: finalize on success, delete all output on failure
    pub fn finish(mut self) -> Result<(WellInfo, ExtractStats), FormatError> {
        if self.error.is_none() {
            self.error = self
                .close_data_section()
                .err()
                .or_else(|| self.missing_section());
        }

        if let Some(error) = self.error.take() {
            self.rollback();
            return Err(error);
        }

        let written: Vec<PathBuf> = self
            .datasets
            .iter()
            .flat_map(|entry| entry.writer.paths())
            .collect();

        self.finalize().map_err(|e| {
            for path in &written {
                if let Err(remove_error) = std::fs::remove_file(path) {
                    warn!("Failed to remove {}: {}", path.display(), remove_error);
                }
            }
            extract_failed(e)
        })
    }

    fn rollback(&mut self) {
        let removed: usize = self
            .datasets
            .drain(..)
            .map(|entry| entry.writer.discard())
            .sum();

        if removed > 0 {
            debug!("Removed {} partial curve files", removed);
        }
    }

    fn finalize(self) -> io::Result<(WellInfo, ExtractStats)> {
        let Self {
            config,
            mut well,
            version,
            datasets,
            mut stats,
            ..
        } = self;

        normalize_well_step(&mut well);
        let index_unit = well
            .field(mnemonics::START)
            .map(|field| field.unit.clone())
            .unwrap_or_default();

        for entry in datasets {
            let DatasetEntry {
                mut dataset,
                writer,
                renamed,
                ..
            } = entry;

            if version == LasVersion::V2 && !renamed {
                dataset.name = well.name.clone();
            }
            if dataset.unit.is_empty() {
                dataset.unit = index_unit.clone();
            }

            let recorded_step = normalize_dataset_direction(&mut dataset);
            widen_well_range(&mut well, &dataset);
            stats.curve_files += writer.finalize(&mut dataset, recorded_step, &config.storage_root)?;
            stats.datasets += 1;
            well.datasets.push(dataset);
        }

        Ok((well, stats))
    }
}

fn extract_failed(error: impl Display) -> FormatError {
    FormatError::ExtractFailed {
        reason: error.to_string(),
    }
}
