//! Tests for the section state machine

use super::*;
use crate::FormatError;
use crate::app::models::{CurveFormat, ImportData, WellInfo};
use crate::app::services::las_parser::{ExtractStats, LasVersion, ParserState};
use crate::app::services::storage::HashDirResolver;

fn run(content: &str, root: &TempDir) -> Result<(WellInfo, ExtractStats), FormatError> {
    run_with(content, root, ImportData::new("tester").with_original_name("TEST.las"))
}

fn run_with(
    content: &str,
    root: &TempDir,
    import: ImportData,
) -> Result<(WellInfo, ExtractStats), FormatError> {
    let config = create_test_config(root);
    let resolver = HashDirResolver::new();
    let mut state = ParserState::new(&config, &resolver, &import, Path::new("TEST.las"));

    for line in content.lines() {
        state.handle_line(line);
    }
    state.finish()
}

#[test]
fn test_version_line_settings() {
    let root = TempDir::new().unwrap();
    let config = create_test_config(&root);
    let resolver = HashDirResolver::new();
    let import = ImportData::new("tester");
    let mut state = ParserState::new(&config, &resolver, &import, Path::new("A.las"));

    assert_eq!(state.version(), LasVersion::V3);
    for line in ["~VERSION", "VERS. 2.0 : CWLS", "WRAP. YES : WRAPPED", "DLM. TAB : TABS"] {
        state.handle_line(line);
    }

    assert_eq!(state.version(), LasVersion::V2);
    assert!(state.is_wrapped());
    assert_eq!(state.delimiter(), '\t');
    assert!(state.error().is_none());
}

#[test]
fn test_wrap_ignored_for_las3() {
    let root = TempDir::new().unwrap();
    let config = create_test_config(&root);
    let resolver = HashDirResolver::new();
    let import = ImportData::new("tester");
    let mut state = ParserState::new(&config, &resolver, &import, Path::new("A.las"));

    for line in ["~VERSION", "VERS. 3.0 : CWLS", "WRAP. YES : WRAPPED", "DLM . COMMA : C"] {
        state.handle_line(line);
    }
    assert!(!state.is_wrapped());
    assert_eq!(state.delimiter(), ',');
}

#[test]
fn test_empty_input_is_missing_version() {
    let root = TempDir::new().unwrap();
    assert_eq!(run("", &root), Err(FormatError::MissingVersionSection));
    assert_eq!(
        run("# only a comment\n\n", &root),
        Err(FormatError::MissingVersionSection)
    );
}

#[test]
fn test_data_without_headers_is_missing_version() {
    let root = TempDir::new().unwrap();
    assert_eq!(
        run("~ASCII\n100 1\n", &root),
        Err(FormatError::MissingVersionSection)
    );
}

#[test]
fn test_section_order_violations() {
    let root = TempDir::new().unwrap();

    let curve_before_well = "~VERSION\nVERS. 2.0 : V\n~CURVE\nDEPT.M : D\n";
    assert_eq!(run(curve_before_well, &root), Err(FormatError::MissingWellSection));

    let data_before_curves = "~VERSION\nVERS. 2.0 : V\n~WELL\nSTRT.M 1 : S\n~ASCII\n1 2\n";
    assert_eq!(
        run(data_before_curves, &root),
        Err(FormatError::MissingDefinitionSection)
    );

    let well_before_version = "~WELL\nSTRT.M 1 : S\n";
    assert_eq!(
        run(well_before_version, &root),
        Err(FormatError::MissingVersionSection)
    );
}

#[test]
fn test_truncated_files() {
    let root = TempDir::new().unwrap();

    assert_eq!(
        run("~VERSION\nVERS. 2.0 : V\n", &root),
        Err(FormatError::MissingWellSection)
    );
    assert_eq!(
        run("~VERSION\nVERS. 2.0 : V\n~WELL\nNULL. -999.25 : N\n", &root),
        Err(FormatError::MissingDefinitionSection)
    );
    assert_eq!(
        run(
            "~VERSION\nVERS. 2.0 : V\n~WELL\nNULL. -999.25 : N\n~CURVE\nDEPT.M : D\nGR.API : G\n",
            &root
        ),
        Err(FormatError::MissingDataSection)
    );
}

#[test]
fn test_line_without_colon_is_wrong_format() {
    let root = TempDir::new().unwrap();
    let content = "~VERSION\nVERS. 2.0 : V\n~WELL\nCOMP ACME OIL\n~CURVE\n";
    assert_eq!(
        run(content, &root),
        Err(FormatError::WrongFormat { line_number: 4 })
    );
}

#[test]
fn test_first_error_wins_and_lines_keep_counting() {
    let root = TempDir::new().unwrap();
    let config = create_test_config(&root);
    let resolver = HashDirResolver::new();
    let import = ImportData::new("tester");
    let mut state = ParserState::new(&config, &resolver, &import, Path::new("A.las"));

    for line in ["~VERSION", "VERS. 2.0 : V", "~WELL", "BROKEN", "ALSO BROKEN", "~ASCII"] {
        state.handle_line(line);
    }

    assert_eq!(
        state.error(),
        Some(&FormatError::WrongFormat { line_number: 4 })
    );
    assert_eq!(state.stats().lines_read, 6);
    assert_eq!(state.stats().header_lines, 2);
}

#[test]
fn test_other_section_accepts_free_text() {
    let root = TempDir::new().unwrap();
    let content = format!("{SIMPLE_LAS2}~OTHER\nAny remark at all\n");
    assert!(run(&content, &root).is_ok());

    // An unknown section still needs separators
    let content = format!("{SIMPLE_LAS2}~TOPS\nNo separator here\n");
    assert!(matches!(
        run(&content, &root),
        Err(FormatError::WrongFormat { .. })
    ));
}

#[test]
fn test_las2_well_fields_and_dataset() {
    let root = TempDir::new().unwrap();
    let (well, stats) = run(SIMPLE_LAS2, &root).unwrap();

    assert_eq!(well.name, "MyWell");
    assert_eq!(well.filename.as_deref(), Some("TEST.las"));
    assert_eq!(well.field("STRT").unwrap().unit, "M");
    assert_eq!(well.null_value(), Some(-999.25));

    assert_eq!(well.datasets.len(), 1);
    let dataset = &well.datasets[0];
    assert_eq!(dataset.name, "MyWell");
    assert_eq!(dataset.unit, "M");
    assert_eq!(dataset.count, 3);

    assert_eq!(stats.rows_written, 3);
    assert_eq!(stats.curve_files, 1);
    assert_eq!(stats.header_lines, 4);
}

#[test]
fn test_las2_parameters_before_well_stay_in_one_dataset() {
    let root = TempDir::new().unwrap();
    let content = r#"~V
VERS. 2.0 : V
~P
BHT.DEGC 35 : TEMP
~W
WELL. RENAMED : WELL
~C
DEPT.M : D
GR.API : G
~A
1 2
"#;
    let (well, _) = run(content, &root).unwrap();
    assert_eq!(well.datasets.len(), 1);
    assert_eq!(well.datasets[0].name, "RENAMED");
    assert_eq!(well.datasets[0].params[0].mnem, "BHT");
    assert_eq!(well.datasets[0].params[0].unit, "DEGC");
}

#[test]
fn test_las3_datasets_and_set_rename() {
    let root = TempDir::new().unwrap();
    let (well, _) = run(LAS3_MULTI_DATASET, &root).unwrap();

    assert_eq!(well.name, "ANY ET AL 12-34-12-34");
    let names: Vec<&str> = well.datasets.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["RUN1", "CORE"]);

    let run1 = &well.datasets[0];
    assert_eq!(run1.params.len(), 2);
    assert_eq!(run1.params[1].value, "35.5");
    assert_eq!(run1.curve("LITH").unwrap().format, CurveFormat::Text);

    let core = &well.datasets[1];
    assert_eq!(core.params[0].mnem, "BIT");
    assert_eq!(core.curves.len(), 1);
    assert_eq!(core.curves[0].name, "PERM");
}

#[test]
fn test_duplicate_curve_names_get_suffixes() {
    let root = TempDir::new().unwrap();
    let content = r#"~VERSION
VERS. 2.0 : V
~WELL
NULL. -999.25 : N
~CURVE
DEPT.M : D
GR.API : G
gr.API : second
GR.API : third
~ASCII
1 10 20 30
"#;
    let (well, _) = run(content, &root).unwrap();
    let names: Vec<&str> = well.datasets[0]
        .curves
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["GR", "GR_1", "GR_2"]);

    let gr_2 = well.datasets[0].curve("GR_2").unwrap();
    assert_eq!(read_curve(&root, gr_2), "1 30\n");
}

#[test]
fn test_known_well_skips_header_population() {
    let root = TempDir::new().unwrap();
    let mut known = WellInfo::new("KNOWN");
    known.set_field("NULL", crate::WellField::new("-1", "NULL", ""));

    let import = ImportData::new("tester").with_well(known);
    let (well, _) = run_with(SIMPLE_LAS2, &root, import).unwrap();

    assert_eq!(well.name, "KNOWN");
    assert!(well.field("WELL").is_none());
    assert_eq!(well.datasets[0].name, "KNOWN");

    // The known well's NULL (-1) applies, not the file's
    let gr = well.datasets[0].curve("GR").unwrap();
    assert_eq!(read_curve(&root, gr), "100 50.0\n101 -999.25\n102 52.0\n");
}
