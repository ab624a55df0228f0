//! Section header naming and classification
//!
//! LAS 2 names sections by their first letter (`~W`, `~C`, `~A`); LAS 3 uses
//! full titles and per-dataset sections such as `~LOG_DEFINITION`. The version
//! is not known until the `VERS` line has been read, so header lines before it
//! are interpreted with LAS 3 rules.

use crate::constants::{SECTION_MARKER, titles};

/// LAS major version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LasVersion {
    V2,
    #[default]
    V3,
}

impl LasVersion {
    /// Interpret a `VERS` value: a leading number below 3 is LAS 2
    pub fn from_value(value: &str) -> Self {
        let major: String = value
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();

        match major.parse::<u32>() {
            Ok(major) if major < 3 => LasVersion::V2,
            _ => LasVersion::V3,
        }
    }

    /// Section titles in effect for this version
    pub fn titles(self) -> SectionTitles {
        match self {
            LasVersion::V2 => SectionTitles {
                well: titles::WELL_SHORT,
                curve: titles::CURVE_SHORT,
                ascii: titles::ASCII_SHORT,
                parameter: titles::PARAMETER_SHORT,
                other: titles::OTHER_SHORT,
            },
            LasVersion::V3 => SectionTitles {
                well: titles::WELL,
                curve: titles::CURVE,
                ascii: titles::ASCII,
                parameter: titles::PARAMETER,
                other: titles::OTHER,
            },
        }
    }
}

/// Titles of the fixed sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTitles {
    pub well: &'static str,
    pub curve: &'static str,
    pub ascii: &'static str,
    pub parameter: &'static str,
    pub other: &'static str,
}

/// What a section header introduces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    Version,
    Well,
    /// Curves of the default dataset
    Curve,
    /// `~<NAME>_DEFINITION`, carrying `<NAME>`
    Definition(String),
    /// Parameters of the default dataset
    Parameter,
    /// `~<NAME>_PARAMETER`, carrying `<NAME>`
    ScopedParameter(String),
    /// Rows of the default dataset
    Ascii,
    /// `~<NAME>_DATA`, carrying `<NAME>`
    Data(String),
    /// Anything else, carrying the section name
    Other(String),
}

impl SectionKind {
    /// Sections holding data rows rather than `MNEM.UNIT VALUE : DESC` lines
    pub fn is_data(&self) -> bool {
        matches!(self, SectionKind::Ascii | SectionKind::Data(_))
    }
}

/// Upper-cased section name of a header line
pub fn section_name(header_line: &str, version: LasVersion) -> String {
    let upper = header_line.to_uppercase();
    let body = upper.strip_prefix(SECTION_MARKER).unwrap_or(&upper);

    match version {
        LasVersion::V2 => body.chars().next().map(String::from).unwrap_or_default(),
        LasVersion::V3 => {
            let end = body.find([' ', '|']).unwrap_or(body.len());
            body[..end].to_string()
        }
    }
}

/// Classify a section name
pub fn classify(name: &str, version: LasVersion) -> SectionKind {
    let titles = version.titles();

    if name.contains(titles::VERSION) || name == titles::VERSION_SHORT {
        SectionKind::Version
    } else if name == titles.well {
        SectionKind::Well
    } else if name == titles.curve {
        SectionKind::Curve
    } else if name.contains(titles::DEFINITION_SUFFIX) {
        SectionKind::Definition(name.replace(titles::DEFINITION_SUFFIX, ""))
    } else if name == titles.ascii {
        SectionKind::Ascii
    } else if name.contains(titles::DATA_SUFFIX) {
        SectionKind::Data(name.replace(titles::DATA_SUFFIX, ""))
    } else if name == titles.parameter {
        SectionKind::Parameter
    } else if name.contains(titles::PARAMETER_SUFFIX) {
        SectionKind::ScopedParameter(name.replace(titles::PARAMETER_SUFFIX, ""))
    } else {
        SectionKind::Other(name.to_string())
    }
}
