//! Application constants for the LAS extractor
//!
//! This module contains the LAS markers, section titles, numeric tolerances
//! and default values used throughout the extractor.

// =============================================================================
// Line Markers
// =============================================================================

/// First character of every section header line
pub const SECTION_MARKER: char = '~';

/// First character of a comment line
pub const COMMENT_MARKER: char = '#';

/// Separates a header field's value from its description
pub const DESCRIPTION_SEPARATOR: char = ':';

/// Separates a mnemonic from its unit
pub const UNIT_SEPARATOR: char = '.';

/// LAS 3 association marker in header and definition lines
pub const ASSOCIATION_MARKER: char = '|';

/// Marks a quoted text value in a data row
pub const QUOTE: char = '"';

/// Vendor units sometimes embed a numeric run (e.g. `IN00...`); the unit is cut there
pub const UNIT_TRUNCATION_MARKER: &str = "00";

// =============================================================================
// Section Titles
// =============================================================================

/// Section titles, long form (LAS 3) and single-letter aliases (LAS 2)
pub mod titles {
    pub const VERSION: &str = "VERSION";
    pub const VERSION_SHORT: &str = "V";

    pub const WELL: &str = "WELL";
    pub const CURVE: &str = "CURVE";
    pub const ASCII: &str = "ASCII";
    pub const PARAMETER: &str = "PARAMETER";
    pub const OTHER: &str = "OTHER";

    pub const WELL_SHORT: &str = "W";
    pub const CURVE_SHORT: &str = "C";
    pub const ASCII_SHORT: &str = "A";
    pub const PARAMETER_SHORT: &str = "P";
    pub const OTHER_SHORT: &str = "O";

    /// `~<NAME>_DEFINITION` declares the curves of dataset `<NAME>`
    pub const DEFINITION_SUFFIX: &str = "_DEFINITION";
    /// `~<NAME>_DATA` holds the rows of dataset `<NAME>`
    pub const DATA_SUFFIX: &str = "_DATA";
    /// `~<NAME>_PARAMETER` holds the parameters of dataset `<NAME>`
    pub const PARAMETER_SUFFIX: &str = "_PARAMETER";
}

/// Reserved mnemonics
pub mod mnemonics {
    pub const VERSION: &str = "VERS";
    pub const WRAP: &str = "WRAP";
    pub const DELIMITER: &str = "DLM";

    pub const WELL: &str = "WELL";
    pub const START: &str = "STRT";
    pub const STOP: &str = "STOP";
    pub const STEP: &str = "STEP";
    pub const NULL: &str = "NULL";

    /// Dataset name override in a LAS 3 `~PARAMETER` section
    pub const SET: &str = "SET";
}

// =============================================================================
// Data Section
// =============================================================================

/// `DLM` values naming a non-space delimiter
pub const DELIMITER_COMMA: &str = "COMMA";
pub const DELIMITER_TAB: &str = "TAB";

/// `WRAP` value enabling wrap mode
pub const WRAP_ENABLED: &str = "YES";

/// Written in place of a value equal to the NULL sentinel
pub const NULL_PLACEHOLDER: &str = " ";

/// Step values are compared after rounding to this many decimal places
pub const STEP_DECIMALS: i32 = 6;

/// Two rounded steps closer than this are the same step
pub const STEP_EPSILON: f64 = 1e-7;

// =============================================================================
// Defaults
// =============================================================================

/// Default extension of curve data files
pub const DEFAULT_CURVE_FILE_EXTENSION: &str = "txt";

/// Default identity used for storage paths when no user is given
pub const DEFAULT_USER: &str = "anonymous";

/// Directory name under the platform data/config directories
pub const APP_DIR_NAME: &str = "las-extractor";

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default buffered reader capacity (bytes)
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;

/// Default buffered writer capacity per curve file (bytes)
pub const DEFAULT_WRITE_BUFFER_SIZE: usize = 8 * 1024;

/// File extensions picked up when a directory is given as input
pub const LAS_FILE_EXTENSIONS: &[&str] = &["las"];
