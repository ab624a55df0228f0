//! Test utilities and fixtures for LAS parser testing
//!
//! This module provides sample LAS files and helper functions used across
//! the parser test modules.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};
use walkdir::WalkDir;

use crate::app::models::Curve;
use crate::config::ExtractorConfig;

mod state_tests;

/// Minimal LAS 2.0 file with one NULL value
pub const SIMPLE_LAS2: &str = r#"~VERSION INFORMATION
VERS.2 : 2.0
WRAP.NO
~WELL INFORMATION
STRT.M 100 : START
STOP.M 102 : STOP
STEP.M 1 : STEP
NULL.M -999.25 : NULL
WELL.  MyWell : WELL
~CURVE INFORMATION
DEPT.M : DEPTH
GR.GAPI : GAMMA
~ASCII
100 50.0
101 -999.25
102 52.0
"#;

/// LAS 3.0 file with a comma delimiter, a decreasing default dataset and a
/// second named dataset
pub const LAS3_MULTI_DATASET: &str = r#"# LAS 3 sample
~VERSION INFORMATION
VERS. 3.0 : CWLS LOG ASCII STANDARD - VERSION 3.0
WRAP. NO : ONE LINE PER DEPTH STEP
DLM . COMMA : DELIMITING CHARACTER
~WELL INFORMATION
STRT.M 1670.0 : First Index Value
STOP.M 1669.0 : Last Index Value
STEP.M -0.5 : STEP
NULL. -999.25 : NULL VALUE
WELL. ANY ET AL 12-34-12-34 : WELL
~PARAMETER INFORMATION
SET. RUN1 : Dataset name
BHT.DEGC 35.5 : Bottom Hole Temperature
~CURVE INFORMATION
DEPT.M : DEPTH {F}
GR.GAPI : Gamma Ray {F}
LITH. : Lithology {S}
~ASCII
1670.0,120.5,"SAND STONE"
1669.5,-999.25,SHALE
1669.0,98.0,"LIME"
~OTHER
Free text notes without any separator
~CORE_PARAMETER
BIT.MM 200 : Bit size
~CORE_DEFINITION
DEPT.M : Core depth
PERM.MD : Permeability
~CORE_DATA | CORE_DEFINITION
1671.0,12.5
1672.5,13.0
"#;

/// LAS 2.0 file in wrap mode: each row spans two lines
pub const WRAPPED_LAS2: &str = r#"~VERSION INFORMATION
VERS. 2.0 : CWLS LOG ASCII STANDARD - VERSION 2.0
WRAP. YES : Multiple lines per depth step
~WELL INFORMATION
STRT.M 910.0 : START DEPTH
STOP.M 910.5 : STOP DEPTH
STEP.M 0.5 : STEP
NULL. -999.25 : NULL VALUE
~CURVE INFORMATION
DEPT.M : DEPTH
DT.US/M : SONIC TRANSIT TIME
RHOB.K/M3 : BULK DENSITY
NPHI.V/V : NEUTRON POROSITY
~A
910.000
-999.2500 2550.0000 0.4500
910.500
123.4500 2551.0000 0.4400
"#;

/// LAS 3.0 file with one array curve spread over three columns
pub const LAS3_ARRAY: &str = r#"~VERSION
VERS. 3.0 : CWLS LOG ASCII STANDARD - VERSION 3.0
~WELL
NULL. -999.25 : NULL VALUE
~NMR_DEFINITION
DEPT.M : Depth
NMR[1].MS : T2 bin 1
NMR[2].MS : T2 bin 2
NMR[3].MS : T2 bin 3
~NMR_DATA
1000.0 1 2 3
1000.1 4 5 6
"#;

/// Helper to create a temporary file with content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Extractor configuration storing under `root` and keeping the source
pub fn create_test_config(root: &TempDir) -> ExtractorConfig {
    ExtractorConfig::default()
        .with_storage_root(root.path())
        .with_keep_source()
}

/// Absolute path of a finalized curve's data file
pub fn curve_file(root: &TempDir, curve: &Curve) -> PathBuf {
    root.path().join(curve.path.as_ref().unwrap())
}

/// Content of a finalized curve's data file
pub fn read_curve(root: &TempDir, curve: &Curve) -> String {
    std::fs::read_to_string(curve_file(root, curve)).unwrap()
}

/// Number of regular files under `root`
pub fn count_files(root: &Path) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count()
}
