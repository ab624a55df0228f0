//! Core data structures for LAS extraction
//!
//! Defines the well description produced by the extractor: the well itself
//! with its WELL-section fields, the datasets (logical logs) it owns, and the
//! curves of each dataset. Also defines the caller-supplied import context.

use crate::constants::mnemonics;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One WELL-section field (`MNEM.UNIT VALUE : DESCRIPTION`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellField {
    pub value: String,
    pub description: String,
    pub unit: String,
}

impl WellField {
    pub fn new(
        value: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            description: description.into(),
            unit: unit.into(),
        }
    }

    /// The value interpreted as a number, if it is one
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok()
    }
}

/// Well description, one per input file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellInfo {
    /// Well name (file stem until a `WELL` field names it)
    pub name: String,

    /// Original file name of the upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// WELL-section fields keyed by mnemonic, in file order
    #[serde(default)]
    pub fields: IndexMap<String, WellField>,

    /// Datasets in the order they were opened
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl WellInfo {
    /// Create an empty well with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a well named after an uploaded file (`A-1.las` becomes `A-1`)
    pub fn from_file_name(file_name: &str) -> Self {
        let name = match file_name.rfind('.') {
            Some(dot) => &file_name[..dot],
            None => file_name,
        };

        Self {
            name: name.to_string(),
            filename: Some(file_name.to_string()),
            ..Default::default()
        }
    }

    /// Look up a WELL field by mnemonic
    pub fn field(&self, mnemonic: &str) -> Option<&WellField> {
        self.fields.get(mnemonic)
    }

    /// Numeric value of a WELL field
    pub fn numeric_field(&self, mnemonic: &str) -> Option<f64> {
        self.field(mnemonic).and_then(WellField::numeric_value)
    }

    /// Insert or replace a WELL field
    pub fn set_field(&mut self, mnemonic: impl Into<String>, field: WellField) {
        self.fields.insert(mnemonic.into(), field);
    }

    /// The NULL sentinel declared in the WELL section
    pub fn null_value(&self) -> Option<f64> {
        self.numeric_field(mnemonics::NULL)
    }

    pub fn step(&self) -> Option<f64> {
        self.numeric_field(mnemonics::STEP)
    }

    /// Look up a dataset by name
    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|dataset| dataset.name == name)
    }

    /// Total number of curves across all datasets
    pub fn curve_count(&self) -> usize {
        self.datasets.iter().map(|dataset| dataset.curves.len()).sum()
    }
}

/// One parameter record from a PARAMETER section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub mnem: String,
    pub value: String,
    pub description: String,
    pub unit: String,
}

/// One logical log: curves sharing an index range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub curves: Vec<Curve>,
    pub top: f64,
    pub bottom: f64,
    pub step: f64,
    /// Index unit declared by the first definition line
    pub unit: String,
    pub params: Vec<Parameter>,
    /// Number of data rows ingested
    pub count: usize,
}

impl Dataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up a curve by name (case-insensitive)
    pub fn curve(&self, name: &str) -> Option<&Curve> {
        self.curves
            .iter()
            .find(|curve| curve.name.eq_ignore_ascii_case(name))
    }

    /// True if any rows populated the depth range
    pub fn has_range(&self) -> bool {
        !(self.top == 0.0 && self.bottom == 0.0)
    }
}

/// Storage format of a curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurveFormat {
    #[default]
    Number,
    Text,
    Array,
}

impl fmt::Display for CurveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CurveFormat::Number => "NUMBER",
            CurveFormat::Text => "TEXT",
            CurveFormat::Array => "ARRAY",
        };
        f.write_str(label)
    }
}

/// One measurement channel within a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curve {
    pub name: String,
    pub unit: String,
    pub description: String,
    #[serde(rename = "type")]
    pub format: CurveFormat,
    pub dimension: usize,
    pub start_depth: f64,
    pub stop_depth: f64,
    pub step: f64,
    /// Data file location, relative to the storage root once finalized
    pub path: Option<PathBuf>,
}

impl Curve {
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        description: impl Into<String>,
        format: CurveFormat,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            description: description.into(),
            format,
            dimension: 1,
            start_depth: 0.0,
            stop_depth: 0.0,
            step: 0.0,
            path: None,
        }
    }

    pub fn is_text(&self) -> bool {
        self.format == CurveFormat::Text
    }
}

/// Caller-supplied context for one extraction
#[derive(Debug, Clone, Default)]
pub struct ImportData {
    /// Identity of the owner, used only to derive storage paths
    pub user: String,

    /// Known well; when set, WELL and PARAMETER fields are not populated from the file
    pub well: Option<WellInfo>,

    /// Name of the file as uploaded (defaults to the input path's file name)
    pub original_name: Option<String>,
}

impl ImportData {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ..Default::default()
        }
    }

    pub fn with_well(mut self, well: WellInfo) -> Self {
        self.well = Some(well);
        self
    }

    pub fn with_original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = Some(name.into());
        self
    }

    /// The well to start parsing with
    pub fn initial_well(&self, input_path: &Path) -> WellInfo {
        if let Some(well) = &self.well {
            return well.clone();
        }

        let file_name = self.original_name.clone().unwrap_or_else(|| {
            input_path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default()
        });
        WellInfo::from_file_name(&file_name)
    }

    pub fn has_known_well(&self) -> bool {
        self.well.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_from_file_name() {
        let well = WellInfo::from_file_name("15_9-F-11.las");
        assert_eq!(well.name, "15_9-F-11");
        assert_eq!(well.filename.as_deref(), Some("15_9-F-11.las"));

        let well = WellInfo::from_file_name("NOEXT");
        assert_eq!(well.name, "NOEXT");
    }

    #[test]
    fn test_numeric_fields() {
        let mut well = WellInfo::new("W");
        well.set_field("NULL", WellField::new("-999.25", "NULL VALUE", ""));
        well.set_field("STEP", WellField::new("abc", "STEP", "M"));

        assert_eq!(well.null_value(), Some(-999.25));
        assert_eq!(well.step(), None);
        assert_eq!(well.numeric_field("STRT"), None);
    }

    #[test]
    fn test_curve_serializes_with_camel_case_and_type() {
        let curve = Curve::new("GR", "GAPI", "GAMMA", CurveFormat::Number);
        let json = serde_json::to_value(&curve).unwrap();

        assert_eq!(json["type"], "NUMBER");
        assert_eq!(json["startDepth"], 0.0);
        assert_eq!(json["dimension"], 1);
    }

    #[test]
    fn test_initial_well_prefers_known_well() {
        let import = ImportData::new("alice").with_well(WellInfo::new("KNOWN"));
        let well = import.initial_well(Path::new("/tmp/upload_123"));
        assert_eq!(well.name, "KNOWN");

        let import = ImportData::new("alice").with_original_name("A-1.las");
        let well = import.initial_well(Path::new("/tmp/upload_123"));
        assert_eq!(well.name, "A-1");
    }
}
