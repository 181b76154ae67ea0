//! Codec round-trip properties

use chrono::NaiveDate;
use framelite::codec::CodecRegistry;
use framelite::model::{CellValue, DataFrame};

fn mixed_frame() -> DataFrame {
    DataFrame::new(vec![
        (
            "Name",
            vec![
                "Braund, Mr. Owen Harris".into(),
                "Bonnell, Miss. Elizabeth".into(),
                "Adeoye Leon".into(),
            ],
        ),
        (
            "Age",
            vec![22i64.into(), CellValue::Null, 49i64.into()],
        ),
        (
            "Fare",
            vec![
                CellValue::Float(7.25),
                CellValue::Float(26.55),
                CellValue::Null,
            ],
        ),
        (
            "Boarded",
            vec![
                CellValue::Date(NaiveDate::from_ymd_opt(1912, 4, 10).unwrap()),
                CellValue::Date(NaiveDate::from_ymd_opt(1912, 4, 11).unwrap()),
                CellValue::Null,
            ],
        ),
    ])
    .unwrap()
}

#[test]
fn json_round_trip_preserves_values_and_order() {
    let frame = mixed_frame();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passengers.json");

    let registry = CodecRegistry::new();
    registry.write(&frame, &path).unwrap();
    let reread = registry.read(&path).unwrap();

    assert_eq!(reread, frame);
}

#[test]
fn csv_round_trip_preserves_values_and_order() {
    let frame = mixed_frame();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passengers.csv");

    let registry = CodecRegistry::new();
    registry.write(&frame, &path).unwrap();
    let reread = registry.read(&path).unwrap();

    assert_eq!(reread, frame);
}

#[test]
fn label_index_is_not_persisted() {
    let frame = mixed_frame().set_index("Name").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("indexed.json");

    let registry = CodecRegistry::new();
    registry.write(&frame, &path).unwrap();
    let reread = registry.read(&path).unwrap();

    // only the remaining columns survive; the caller resets the index
    // first if the labels should be kept
    assert_eq!(reread.column_names(), vec!["Age", "Fare", "Boarded"]);
}

#[test]
fn unknown_extension_is_rejected() {
    let registry = CodecRegistry::new();
    assert!(registry.read(std::path::Path::new("data.parquet")).is_err());
}

#[test]
fn transform_then_round_trip() {
    let frame = mixed_frame();
    let filled = frame.fillna_mean("Age").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filled.csv");

    let registry = CodecRegistry::new();
    registry.write(&filled, &path).unwrap();
    let reread = registry.read(&path).unwrap();

    assert_eq!(reread, filled);
    assert_eq!(reread.column("Age").unwrap().count_non_null(), 3);
}
