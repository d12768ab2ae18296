mod common;

use avocado_dashboard::error::DashboardError;
use avocado_dashboard::loader::{load, load_from_reader};
use avocado_dashboard::record::AvocadoType;
use common::{HEADER, date};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

fn load_str(contents: &str) -> Result<avocado_dashboard::dataset::Dataset, DashboardError> {
    load_from_reader(contents.as_bytes(), "inline")
}

#[test]
fn test_load_sorts_by_date_and_keeps_ties_stable() {
    let csv = format!(
        "{HEADER}\n\
         2015-01-03,1.10,100,organic,Albany\n\
         2015-01-01,1.20,200,conventional,Chicago\n\
         2015-01-03,1.30,300,organic,Chicago\n\
         2015-01-02,1.40,400,organic,Albany\n"
    );
    let file = write_csv(&csv);
    let dataset = load(file.path()).expect("dataset should load");

    let dates: Vec<_> = dataset.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![date("2015-01-01"), date("2015-01-02"), date("2015-01-03"), date("2015-01-03")]
    );
    // the two 01-03 rows stay in file order
    assert_eq!(dataset[2].region, "Albany");
    assert_eq!(dataset[3].region, "Chicago");
    assert_eq!(dataset[0].kind, AvocadoType::Conventional);
    assert_eq!(dataset[1].average_price, 1.40);
    assert_eq!(dataset[1].total_volume, 400.0);
}

#[test]
fn test_load_ignores_extra_columns_and_order() {
    let csv = ",region,Total Volume,year,type,Date,AveragePrice,Total Bags\n\
               0, Albany ,62505.65,2015,conventional,2015-12-27,1.33,8696.87\n\
               1,Albany,54876.98,2015,Organic,2015-12-20,1.35,9505.56\n";
    let dataset = load_str(csv).expect("dataset should load");

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset[0].date, date("2015-12-20"));
    assert_eq!(dataset[0].kind, AvocadoType::Organic);
    assert_eq!(dataset[1].region, "Albany", "cells are trimmed");
    assert_eq!(dataset[1].total_volume, 62505.65);
}

#[test]
fn test_missing_file_is_data_load_error() {
    let path = PathBuf::from("definitely/not/here/avocado.csv");
    match load(&path) {
        Err(DashboardError::DataLoad { source_name, .. }) => {
            assert!(source_name.contains("avocado.csv"));
        }
        other => panic!("expected DataLoad, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn test_missing_column_is_data_load_error() {
    let csv = "Date,AveragePrice,type,region\n2015-01-01,1.0,organic,Albany\n";
    let err = load_str(csv).unwrap_err();
    assert!(matches!(err, DashboardError::DataLoad { .. }));
    assert!(err.to_string().contains("Total Volume"), "message was: {}", err);
}

#[test]
fn test_bad_date_is_date_parse_error_with_line() {
    let csv = format!("{HEADER}\n2015-01-01,1.0,10,organic,Albany\n01/02/2015,1.0,10,organic,Albany\n");
    match load_str(&csv) {
        Err(DashboardError::DateParse { line, value }) => {
            assert_eq!(line, 3);
            assert_eq!(value, "01/02/2015");
        }
        other => panic!("expected DateParse, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn test_impossible_date_is_date_parse_error() {
    let csv = format!("{HEADER}\n2015-02-30,1.0,10,organic,Albany\n");
    assert!(matches!(load_str(&csv), Err(DashboardError::DateParse { line: 2, .. })));
}

#[test]
fn test_non_numeric_price_is_data_load_error() {
    let csv = format!("{HEADER}\n2015-01-01,cheap,10,organic,Albany\n");
    let err = load_str(&csv).unwrap_err();
    assert!(matches!(err, DashboardError::DataLoad { .. }));
    assert!(err.to_string().contains("AveragePrice"), "message was: {}", err);
}

#[test]
fn test_unknown_type_is_data_load_error() {
    let csv = format!("{HEADER}\n2015-01-01,1.0,10,heirloom,Albany\n");
    let err = load_str(&csv).unwrap_err();
    assert!(matches!(err, DashboardError::DataLoad { .. }));
    assert!(err.to_string().contains("heirloom"));
}

#[test]
fn test_header_only_file_is_rejected() {
    let err = load_str(&format!("{HEADER}\n")).unwrap_err();
    assert!(matches!(err, DashboardError::DataLoad { .. }));
}

#[test]
fn test_ragged_row_is_rejected() {
    let csv = format!("{HEADER}\n2015-01-01,1.0,10,organic\n");
    assert!(matches!(load_str(&csv), Err(DashboardError::DataLoad { .. })));
}

#[test]
fn test_bundled_sample_data_loads() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/avocado.csv");
    let dataset = load(&path).expect("bundled sample should load");

    assert!(!dataset.is_empty());
    assert!(dataset.windows(2).all(|w| w[0].date <= w[1].date));
    let catalog = dataset.catalog();
    assert!(catalog.has_region("Albany"));
    assert!(catalog.has_type(AvocadoType::Organic));
}
