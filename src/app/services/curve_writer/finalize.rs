//! End-of-file normalization of the well and its datasets
//!
//! Decreasing-depth logs are flipped into ascending order: the well's
//! `STRT`/`STOP` and each dataset's top/bottom are swapped, the step negated,
//! and the rows of every curve file reversed. Array curves collapse into one
//! curve whose dimension is the number of columns sharing its file.

use super::aggregator::DatasetWriter;
use super::buffer::reverse_lines;
use crate::app::models::{CurveFormat, Dataset, WellField, WellInfo};
use crate::app::services::las_parser::curve_definition::strip_array_index;
use crate::app::services::storage::relative_to_root;
use crate::constants::mnemonics;
use std::collections::HashSet;
use std::io;
use std::path::Path;
use tracing::debug;

/// Make a negative well `STEP` positive and swap `STRT`/`STOP` values
pub fn normalize_well_step(well: &mut WellInfo) {
    let Some(step) = well.step() else {
        return;
    };
    if step >= 0.0 {
        return;
    }

    if let Some(field) = well.fields.get_mut(mnemonics::STEP) {
        field.value = format_depth(-step);
    }

    let start = well.field(mnemonics::START).map(|f| f.value.clone());
    let stop = well.field(mnemonics::STOP).map(|f| f.value.clone());
    if let (Some(start), Some(stop)) = (start, stop) {
        if let Some(field) = well.fields.get_mut(mnemonics::START) {
            field.value = stop;
        }
        if let Some(field) = well.fields.get_mut(mnemonics::STOP) {
            field.value = start;
        }
    }
}

/// Flip a dataset recorded with a negative step; returns the step as recorded
pub fn normalize_dataset_direction(dataset: &mut Dataset) -> f64 {
    let recorded = dataset.step;
    if recorded < 0.0 {
        dataset.step = -recorded;
        std::mem::swap(&mut dataset.top, &mut dataset.bottom);
    }
    recorded
}

/// Extend the well's `STRT`/`STOP` to cover the dataset's range
pub fn widen_well_range(well: &mut WellInfo, dataset: &Dataset) {
    if !dataset.has_range() {
        return;
    }

    widen_field(well, mnemonics::START, dataset.top, &dataset.unit, |current, top| top < current);
    widen_field(well, mnemonics::STOP, dataset.bottom, &dataset.unit, |current, bottom| {
        bottom > current
    });
}

fn widen_field(
    well: &mut WellInfo,
    mnemonic: &str,
    depth: f64,
    unit: &str,
    extends: impl Fn(f64, f64) -> bool,
) {
    match well.fields.get_mut(mnemonic) {
        Some(field) => {
            let extended = field
                .numeric_value()
                .is_some_and(|current| extends(current, depth));
            if extended {
                field.value = format_depth(depth);
            }
        }
        None => well.set_field(mnemonic, WellField::new(format_depth(depth), "", unit)),
    }
}

/// Render a depth the way it is stored in header fields
pub fn format_depth(depth: f64) -> String {
    format!("{depth}")
}

impl DatasetWriter {
    /// Close all files and fold the dataset's curves into their final form
    ///
    /// Array members collapse into their first occurrence; files are reversed
    /// when `recorded_step` was negative. Returns the number of curve files.
    pub fn finalize(
        self,
        dataset: &mut Dataset,
        recorded_step: f64,
        storage_root: &Path,
    ) -> io::Result<usize> {
        let mut buffers = self.buffers;
        let mut seen = HashSet::new();
        let mut files = 0;
        let curves = std::mem::take(&mut dataset.curves);

        for mut curve in curves {
            let key = strip_array_index(&curve.name);
            if !seen.insert(key.clone()) {
                continue;
            }
            curve.name = key;

            match buffers.remove(&curve.name) {
                Some(mut buffer) => {
                    curve.dimension = buffer.dimension();
                    if curve.dimension > 1 {
                        curve.format = CurveFormat::Array;
                    }

                    buffer.close()?;
                    if recorded_step < 0.0 {
                        reverse_lines(buffer.path())?;
                    }
                    curve.path = Some(relative_to_root(buffer.path(), storage_root));
                    files += 1;
                }
                None => {
                    curve.dimension = 1;
                    curve.path = None;
                }
            }

            curve.start_depth = dataset.top;
            curve.stop_depth = dataset.bottom;
            curve.step = dataset.step;
            dataset.curves.push(curve);
        }

        for (key, mut buffer) in buffers {
            debug!("Closing unclaimed curve file for {}", key);
            buffer.close()?;
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Curve;
    use crate::app::services::curve_writer::RowContext;
    use tempfile::TempDir;

    fn well_with(strt: &str, stop: &str, step: &str) -> WellInfo {
        let mut well = WellInfo::new("W");
        well.set_field("STRT", WellField::new(strt, "START", "M"));
        well.set_field("STOP", WellField::new(stop, "STOP", "M"));
        well.set_field("STEP", WellField::new(step, "STEP", "M"));
        well
    }

    #[test]
    fn test_negative_well_step_is_flipped() {
        let mut well = well_with("200", "100", "-0.5");
        normalize_well_step(&mut well);

        assert_eq!(well.field("STEP").unwrap().value, "0.5");
        assert_eq!(well.field("STRT").unwrap().value, "100");
        assert_eq!(well.field("STOP").unwrap().value, "200");
        assert_eq!(well.field("STRT").unwrap().description, "START");
    }

    #[test]
    fn test_positive_well_step_untouched() {
        let mut well = well_with("100", "200", "0.5");
        normalize_well_step(&mut well);
        assert_eq!(well.field("STRT").unwrap().value, "100");
        assert_eq!(well.field("STEP").unwrap().value, "0.5");
    }

    #[test]
    fn test_dataset_direction() {
        let mut dataset = Dataset::new("W");
        dataset.top = 101.0;
        dataset.bottom = 100.0;
        dataset.step = -0.5;

        assert_eq!(normalize_dataset_direction(&mut dataset), -0.5);
        assert_eq!(dataset.top, 100.0);
        assert_eq!(dataset.bottom, 101.0);
        assert_eq!(dataset.step, 0.5);
    }

    #[test]
    fn test_widen_well_range() {
        let mut well = well_with("100", "200", "1");
        let mut dataset = Dataset::new("W");
        dataset.top = 90.0;
        dataset.bottom = 150.0;

        widen_well_range(&mut well, &dataset);
        assert_eq!(well.field("STRT").unwrap().value, "90");
        assert_eq!(well.field("STOP").unwrap().value, "200");

        let mut bare = WellInfo::new("W");
        dataset.unit = "M".to_string();
        widen_well_range(&mut bare, &dataset);
        assert_eq!(bare.field("STOP").unwrap().value, "150");
        assert_eq!(bare.field("STRT").unwrap().unit, "M");
    }

    #[test]
    fn test_widen_ignores_empty_dataset() {
        let mut well = WellInfo::new("W");
        widen_well_range(&mut well, &Dataset::new("EMPTY"));
        assert!(well.fields.is_empty());
    }

    #[test]
    fn test_finalize_collapses_arrays_and_reverses() {
        let dir = TempDir::new().unwrap();
        let mut dataset = Dataset::new("W");
        for name in ["GR", "NMR[1]", "NMR[2]"] {
            dataset.curves.push(Curve::new(name, "", "", CurveFormat::Number));
        }

        let mut writer = DatasetWriter::new(1024);
        writer.begin_section();
        for key in ["GR", "NMR", "NMR"] {
            writer.open_column(key, &dir.path().join(format!("{key}.txt"))).unwrap();
        }

        let ctx = RowContext::default();
        for row in ["101 1 10 11", "100 2 20 21"] {
            let fields = row.split(' ').map(String::from).collect();
            writer.push_fields(&mut dataset, fields, &ctx).unwrap();
        }

        let recorded = normalize_dataset_direction(&mut dataset);
        let files = writer.finalize(&mut dataset, recorded, dir.path()).unwrap();

        assert_eq!(files, 2);
        assert_eq!(dataset.curves.len(), 2);

        let nmr = &dataset.curves[1];
        assert_eq!(nmr.name, "NMR");
        assert_eq!(nmr.dimension, 2);
        assert_eq!(nmr.format, CurveFormat::Array);
        assert_eq!(nmr.start_depth, 100.0);
        assert_eq!(nmr.stop_depth, 101.0);
        assert_eq!(nmr.step, 1.0);
        assert_eq!(nmr.path.as_deref(), Some(Path::new("NMR.txt")));

        let content = std::fs::read_to_string(dir.path().join("NMR.txt")).unwrap();
        assert_eq!(content, "100 20 21\n101 10 11\n");
    }
}
