use crate::col;
use ods_records::common::errors::AppError;
use ods_records::ods::sheet_model::Sheet;
use ods_records::records::{validate_header, HeaderColumn};

fn header() -> Sheet {
    Sheet::from_text_rows("Grades", &[&["NAME", "AGE"], &["JOHN", "12"]])
}

#[test]
fn matching_header_passes() {
    let expected = [
        HeaderColumn::new(col("A"), "NAME"),
        HeaderColumn::new(col("B"), "AGE"),
    ];
    validate_header(&header(), 1, &expected).expect("valid header");
}

#[test]
fn mismatch_reports_label_column_and_actual_text() {
    let err = validate_header(&header(), 1, &[HeaderColumn::new(col("B"), "GRADE")])
        .expect_err("mismatch");
    match &err {
        AppError::TemplateMismatch {
            label,
            column,
            actual,
        } => {
            assert_eq!(label, "GRADE");
            assert_eq!(column, "B");
            assert_eq!(actual, "AGE");
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("GRADE"));
    assert!(message.contains("AGE"));
    assert_eq!(err.code(), 1014);
}

#[test]
fn labels_compare_after_normalization() {
    let sheet = Sheet::from_text_rows("Grades", &[&["Student Name:", "age "]]);
    let expected = [
        HeaderColumn::new(col("A"), "student name"),
        HeaderColumn::new(col("B"), "AGE"),
    ];
    validate_header(&sheet, 1, &expected).expect("valid header");
}

#[test]
fn validation_stops_at_first_failing_column() {
    let expected = [
        HeaderColumn::new(col("A"), "NAME"),
        HeaderColumn::new(col("B"), "YEAR"),
        HeaderColumn::new(col("C"), "SCORE"),
    ];
    let err = validate_header(&header(), 1, &expected).expect_err("mismatch");
    assert!(matches!(err, AppError::TemplateMismatch { ref label, .. } if label == "YEAR"));
}

#[test]
fn missing_header_cell_reports_empty_text() {
    let err = validate_header(&header(), 1, &[HeaderColumn::new(col("D"), "SCORE")])
        .expect_err("mismatch");
    assert!(matches!(err, AppError::TemplateMismatch { ref actual, .. } if actual.is_empty()));
}

#[test]
fn header_row_is_configurable() {
    let sheet = Sheet::from_text_rows("Grades", &[&["Report"], &["NAME", "AGE"]]);
    validate_header(&sheet, 2, &[HeaderColumn::new(col("B"), "Age")]).expect("valid");
    assert!(validate_header(&sheet, 1, &[HeaderColumn::new(col("B"), "Age")]).is_err());
}

#[test]
fn header_columns_deserialize_with_letters_or_indexes() {
    let columns: Vec<HeaderColumn> = serde_json::from_value(serde_json::json!([
        { "column": "A", "label": "NAME" },
        { "column": 2, "label": "AGE" }
    ]))
    .expect("columns");
    assert_eq!(columns[1], HeaderColumn::new(col("B"), "AGE"));
}
