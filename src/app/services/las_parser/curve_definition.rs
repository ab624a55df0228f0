//! Curve definition lines (`~CURVE` and `~<NAME>_DEFINITION` sections)
//!
//! The first line of a definition section describes the index; every other
//! line declares a curve:
//!
//! ```text
//! GR   .GAPI        : Gamma Ray     {F}
//! LITH .            : Lithology     {S}
//! NMR[1].MS          : T2 bin 1      | NMR
//! ```

use super::header_field::{split_mnemonic, truncate_unit, unit_end};
use crate::app::models::{Curve, CurveFormat};
use crate::constants::{ASSOCIATION_MARKER, DESCRIPTION_SEPARATOR};
use regex::Regex;
use std::sync::LazyLock;

static ARRAY_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("array index pattern is valid"));

/// One parsed curve declaration, before name de-duplication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveDefinition {
    pub name: String,
    pub unit: String,
    pub description: String,
    pub format: CurveFormat,
}

impl CurveDefinition {
    pub fn parse(line: &str) -> Self {
        let (raw_name, rest) = split_mnemonic(line);
        let name = raw_name.trim().to_uppercase().replace('/', "_");
        let unit = truncate_unit(rest[..unit_end(rest)].trim()).to_string();

        let left_brace = rest.rfind('{').filter(|&i| i > 0);
        let right_brace = rest.rfind('}').filter(|&i| i > 0);
        let bar = rest.rfind(ASSOCIATION_MARKER).filter(|&i| i > 0);

        let description_end = left_brace.or(bar).unwrap_or(rest.len());
        let description_start = rest
            .rfind(DESCRIPTION_SEPARATOR)
            .map(|colon| colon + 1)
            .unwrap_or(0);
        let description = if description_start <= description_end {
            rest[description_start..description_end].trim()
        } else {
            ""
        };

        let format = match (left_brace, right_brace) {
            (Some(left), Some(right)) if left < right => format_code(&rest[left + 1..right]),
            _ => CurveFormat::Number,
        };

        Self {
            name,
            unit,
            description: description.to_string(),
            format,
        }
    }

    /// Build the curve, renaming on collision with `existing`
    pub fn into_curve(self, existing: &[Curve]) -> Curve {
        let name = unique_curve_name(&self.name, existing);
        Curve::new(name, self.unit, self.description, self.format)
    }
}

/// `S` marks a string curve; every other code is numeric
fn format_code(code: &str) -> CurveFormat {
    match code.trim().chars().next() {
        Some('S') | Some('s') => CurveFormat::Text,
        _ => CurveFormat::Number,
    }
}

/// Unit of the index, from the first line of a definition section
pub fn parse_index_unit(line: &str) -> String {
    let (_, rest) = split_mnemonic(line);
    rest[..unit_end(rest)].trim().to_string()
}

/// `name`, or `name_1`, `name_2`, ... if already taken (case-insensitive)
pub fn unique_curve_name(name: &str, existing: &[Curve]) -> String {
    let taken = |candidate: &str| {
        existing
            .iter()
            .any(|curve| curve.name.eq_ignore_ascii_case(candidate))
    };

    if !taken(name) {
        return name.to_string();
    }

    let mut suffix = 1;
    loop {
        let candidate = format!("{name}_{suffix}");
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Curve name without array subscripts: `NMR[3]` becomes `NMR`
pub fn strip_array_index(name: &str) -> String {
    ARRAY_INDEX.replace_all(name, "").into_owned()
}
