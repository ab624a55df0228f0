//! Decomposition of `MNEM.UNIT VALUE : DESCRIPTION` header lines
//!
//! Used for WELL, PARAMETER and VERSION lines. The mnemonic ends at the first
//! dot, the unit directly follows the dot, the value runs up to the last colon
//! and the description follows it. Malformed lines never fail; the affected
//! parts come back empty.

use crate::constants::{DESCRIPTION_SEPARATOR, UNIT_SEPARATOR, UNIT_TRUNCATION_MARKER};

/// One decomposed header line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderField {
    pub mnem: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

impl HeaderField {
    /// Parse a normalized header line
    pub fn parse(line: &str) -> Self {
        let (mnem, rest) = split_mnemonic(line);
        let unit_end = unit_end(rest);
        let unit = truncate_unit(rest[..unit_end].trim());

        let (value, description) = match rest.rfind(DESCRIPTION_SEPARATOR) {
            Some(colon) => {
                let value = if unit_end <= colon {
                    rest[unit_end..colon].trim()
                } else {
                    ""
                };
                (value, rest[colon + 1..].trim())
            }
            None => ("", ""),
        };

        Self {
            mnem: mnem.trim().to_string(),
            unit: unit.to_string(),
            value: value.to_string(),
            description: description.to_string(),
        }
    }
}

/// Split at the first dot; the remainder excludes the dot itself
pub(crate) fn split_mnemonic(line: &str) -> (&str, &str) {
    match line.find(UNIT_SEPARATOR) {
        Some(dot) => (&line[..dot], &line[dot + 1..]),
        None => ("", line),
    }
}

/// End of the unit token: the first space or colon after the dot
pub(crate) fn unit_end(after_dot: &str) -> usize {
    after_dot
        .find([' ', DESCRIPTION_SEPARATOR])
        .unwrap_or(after_dot.len())
}

/// Cut a unit at the first `00`
pub(crate) fn truncate_unit(unit: &str) -> &str {
    match unit.find(UNIT_TRUNCATION_MARKER) {
        Some(cut) => &unit[..cut],
        None => unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_line() {
        let field = HeaderField::parse("STRT.M 1670.0000 : START DEPTH");
        assert_eq!(field.mnem, "STRT");
        assert_eq!(field.unit, "M");
        assert_eq!(field.value, "1670.0000");
        assert_eq!(field.description, "START DEPTH");
    }

    #[test]
    fn test_parse_without_unit() {
        let field = HeaderField::parse("WELL. ANY ET AL 12-34-12-34 : WELL");
        assert_eq!(field.mnem, "WELL");
        assert_eq!(field.unit, "");
        assert_eq!(field.value, "ANY ET AL 12-34-12-34");
        assert_eq!(field.description, "WELL");
    }

    #[test]
    fn test_parse_space_before_dot() {
        let field = HeaderField::parse("NULL . -999.25 : NULL VALUE");
        assert_eq!(field.mnem, "NULL");
        assert_eq!(field.unit, "");
        assert_eq!(field.value, "-999.25");
    }

    #[test]
    fn test_value_may_contain_colons() {
        let field = HeaderField::parse("TIME. 13:45 : LOG TIME");
        assert_eq!(field.value, "13:45");
        assert_eq!(field.description, "LOG TIME");
    }

    #[test]
    fn test_unit_directly_followed_by_colon() {
        let field = HeaderField::parse("DEPT.M: DEPTH");
        assert_eq!(field.unit, "M");
        assert_eq!(field.value, "");
        assert_eq!(field.description, "DEPTH");
    }

    #[test]
    fn test_unit_truncated_at_double_zero() {
        let field = HeaderField::parse("BHT.DEGC00123 85.0 : BOTTOM HOLE TEMPERATURE");
        assert_eq!(field.unit, "DEGC");
        assert_eq!(field.value, "85.0");
    }

    #[test]
    fn test_missing_colon_yields_empty_value() {
        let field = HeaderField::parse("COMP.  ACME OIL");
        assert_eq!(field.mnem, "COMP");
        assert_eq!(field.value, "");
        assert_eq!(field.description, "");
    }
}
