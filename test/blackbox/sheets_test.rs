use crate::common::{dispatch, new_ods_path, path_arg, seed_ods, ROSTER};
use ods_records::ods::ods_file::OdsFile;
use ods_records::ods::sheet_model::Sheet;
use serde_json::json;

#[test]
fn create_ods_writes_bold_template_header() {
    let (_dir, path) = new_ods_path("template.ods");

    let created = dispatch(
        "create_ods",
        json!({
            "path": path_arg(&path),
            "initial_sheet_name": "Grades",
            "headers": ["ID", "NAME", "COURSE"]
        }),
    )
    .expect("create_ods");
    assert_eq!(created["sheets"], json!(["Grades"]));
    assert_eq!(created["headers"], 3);

    let content = dispatch("get_sheet_content", json!({ "path": path_arg(&path) }))
        .expect("content");
    assert_eq!(content["data"], json!([["ID", "NAME", "COURSE"]]));

    let workbook = OdsFile::read_workbook(&path).expect("read");
    let header = workbook.sheets[0].get_cell(0, 2).expect("C1");
    assert_eq!(header.style.bold, Some(true));
}

#[test]
fn create_ods_overwrite_flag_is_enforced() {
    let (_dir, path) = new_ods_path("overwrite.ods");

    dispatch("create_ods", json!({ "path": path_arg(&path) })).expect("first create");
    let err = dispatch("create_ods", json!({ "path": path_arg(&path), "overwrite": false }))
        .expect_err("should fail");
    assert!(err.to_string().contains("already exists"));

    dispatch("create_ods", json!({ "path": path_arg(&path), "overwrite": true }))
        .expect("overwrite");
}

#[test]
fn validate_template_passes_and_reports_drift() {
    let (_dir, path) = new_ods_path("validate.ods");
    dispatch(
        "create_ods",
        json!({ "path": path_arg(&path), "headers": ["ID", "NAME", "COURSE"] }),
    )
    .expect("create_ods");

    let ok = dispatch(
        "validate_template",
        json!({
            "path": path_arg(&path),
            "columns": [
                { "column": "A", "label": "id" },
                { "column": 3, "label": "Course" }
            ]
        }),
    )
    .expect("valid template");
    assert_eq!(ok["valid"], true);
    assert_eq!(ok["checked"], 2);

    let err = dispatch(
        "validate_template",
        json!({
            "path": path_arg(&path),
            "columns": [ { "column": "B", "label": "GRADE" } ]
        }),
    )
    .expect_err("drift");
    assert_eq!(err.code(), 1014);
    let message = err.to_string();
    assert!(message.contains("GRADE") && message.contains("NAME"));
}

#[test]
fn active_sheet_is_reported_selected_and_used_by_default() {
    let (_dir, path) = new_ods_path("active.ods");
    seed_ods(
        &path,
        vec![
            Sheet::from_text_rows("Roster", ROSTER),
            Sheet::from_text_rows("Summary", &[&["TOTAL", "3"]]),
        ],
    );

    let sheets = dispatch("get_sheets", json!({ "path": path_arg(&path) })).expect("sheets");
    assert_eq!(
        sheets["sheets"],
        json!([
            { "name": "Roster", "rows": 7, "active": true },
            { "name": "Summary", "rows": 1, "active": false }
        ])
    );

    let selected = dispatch(
        "set_active_sheet",
        json!({ "path": path_arg(&path), "sheet": { "name": "Summary" } }),
    )
    .expect("set_active_sheet");
    assert_eq!(selected, json!({ "active": "Summary", "index": 1 }));

    let sheets = dispatch("get_sheets", json!({ "path": path_arg(&path) })).expect("sheets");
    assert_eq!(sheets["sheets"][1]["active"], true);
    assert_eq!(sheets["sheets"][0]["active"], false);

    let content = dispatch("get_sheet_content", json!({ "path": path_arg(&path) }))
        .expect("content");
    assert_eq!(content["sheet"], "Summary");
    assert_eq!(content["data"], json!([["TOTAL", "3"]]));

    let err = dispatch(
        "set_active_sheet",
        json!({ "path": path_arg(&path), "sheet": { "index": 5 } }),
    )
    .expect_err("missing sheet");
    assert!(err.to_string().contains("sheet not found"));
}

#[test]
fn get_sheet_content_supports_start_row_and_limits() {
    let (_dir, path) = new_ods_path("content.ods");
    seed_ods(&path, vec![Sheet::from_text_rows("Roster", ROSTER)]);

    let tail = dispatch(
        "get_sheet_content",
        json!({
            "path": path_arg(&path),
            "sheet": "Roster",
            "start_row": 6,
            "max_rows": 10
        }),
    )
    .expect("tail");
    assert_eq!(tail["start_row"], 6);
    assert_eq!(tail["rows"], 2);
    assert_eq!(tail["data"][0][0], "B-200");
    assert_eq!(tail["data"][1][1], "Madonna");

    let narrow = dispatch(
        "get_sheet_content",
        json!({
            "path": path_arg(&path),
            "sheet": "{\"index\":0}",
            "max_rows": 1,
            "max_cols": 2,
            "include_empty_trailing": true
        }),
    )
    .expect("narrow");
    assert_eq!(narrow["rows"], 1);
    assert_eq!(narrow["cols"], 2);
    assert_eq!(narrow["data"], json!([["ID", "NAME"]]));

    let bad_mode = dispatch(
        "get_sheet_content",
        json!({ "path": path_arg(&path), "mode": "records" }),
    )
    .expect_err("invalid mode");
    assert!(bad_mode.to_string().contains("mode=matrix"));
}

#[test]
fn missing_files_and_bad_extensions_are_rejected() {
    let (_dir, path) = new_ods_path("missing.ods");
    let err = dispatch("get_sheets", json!({ "path": path_arg(&path) })).expect_err("missing");
    assert!(err.to_string().contains("file not found"));

    let err = dispatch("get_sheets", json!({ "path": "demo.xlsx" })).expect_err("extension");
    assert!(err.to_string().contains("expected .ods extension"));
}
