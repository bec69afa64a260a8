use crate::common::{dispatch, new_ods_path, path_arg, seed_roster};
use serde_json::json;

#[test]
fn find_record_by_id_returns_whole_record_set() {
    let (_dir, path) = new_ods_path("find_id.ods");
    seed_roster(&path);

    let out = dispatch(
        "find_record",
        json!({
            "path": path_arg(&path),
            "lookup": { "by": "id", "column": "A", "id": "b200" }
        }),
    )
    .expect("find_record");

    assert_eq!(out["sheet"], "Roster");
    assert_eq!(out["found"], true);
    assert_eq!(out["anchor_row"], 4);
    assert_eq!(out["record_set"], json!({ "start": 4, "end": 6 }));
    assert_eq!(
        out["rows"],
        json!([
            ["B-200", "Jane Roe", "MATH"],
            ["B-200", "Jane Roe", "BIO"],
            ["B-200", "Jane Roe", "CHEM"]
        ])
    );
}

#[test]
fn find_record_by_combined_name() {
    let (_dir, path) = new_ods_path("find_name.ods");
    seed_roster(&path);

    let out = dispatch(
        "find_record",
        json!({
            "path": path_arg(&path),
            "sheet": { "name": "Roster" },
            "lookup": {
                "by": "name",
                "name": { "kind": "combined", "name": "B", "order": "FIRST_NAME_LAST_NAME" },
                "candidates": [ { "first_name": "john", "last_name": "doe" } ]
            }
        }),
    )
    .expect("find_record");

    assert_eq!(out["anchor_row"], 2);
    assert_eq!(out["record_set"], json!({ "start": 2, "end": 3 }));
}

#[test]
fn find_record_reports_missing_ids_softly() {
    let (_dir, path) = new_ods_path("find_missing.ods");
    seed_roster(&path);

    let out = dispatch(
        "find_record",
        json!({
            "path": path_arg(&path),
            "lookup": { "by": "id", "column": "A", "id": "Z-999" }
        }),
    )
    .expect("find_record");
    assert_eq!(out["found"], false);
    assert!(out["record_set"].is_null());
    assert_eq!(out["rows"], json!([]));

    // The header row sits above first_row and is never searched.
    let header = dispatch(
        "find_record",
        json!({
            "path": path_arg(&path),
            "lookup": { "by": "id", "column": 1, "id": "ID" }
        }),
    )
    .expect("find_record");
    assert_eq!(header["found"], false);
}

#[test]
fn find_record_suffix_fallback_and_row_bounds() {
    let (_dir, path) = new_ods_path("find_suffix.ods");
    seed_roster(&path);

    let suffix = dispatch(
        "find_record",
        json!({
            "path": path_arg(&path),
            "lookup": { "by": "id", "column": "A", "id": "300", "suffix_fallback": true }
        }),
    )
    .expect("suffix");
    assert_eq!(suffix["anchor_row"], 7);
    assert_eq!(suffix["record_set"], json!({ "start": 7, "end": 7 }));

    let bounded = dispatch(
        "find_record",
        json!({
            "path": path_arg(&path),
            "last_row": 5,
            "lookup": { "by": "id", "column": "A", "id": "B-200" }
        }),
    )
    .expect("bounded");
    assert_eq!(bounded["record_set"], json!({ "start": 4, "end": 5 }));
}

#[test]
fn next_record_steps_to_following_entity() {
    let (_dir, path) = new_ods_path("next.ods");
    seed_roster(&path);

    let out = dispatch(
        "next_record",
        json!({
            "path": path_arg(&path),
            "row": 2,
            "lookup": { "by": "id", "column": "A" }
        }),
    )
    .expect("next_record");
    assert_eq!(out["found"], true);
    assert_eq!(out["identity"], "B200");
    assert_eq!(out["record_set"], json!({ "start": 4, "end": 6 }));
    assert_eq!(out["rows"][0], json!(["B-200", "Jane Roe", "MATH"]));
}

#[test]
fn next_record_applies_conditions() {
    let (_dir, path) = new_ods_path("next_conditions.ods");
    seed_roster(&path);

    let out = dispatch(
        "next_record",
        json!({
            "path": path_arg(&path),
            "row": 2,
            "lookup": { "by": "id", "column": "A" },
            "conditions": [ { "column": "C", "test": "equals", "value": "bio" } ]
        }),
    )
    .expect("next_record");
    assert_eq!(out["record_set"], json!({ "start": 5, "end": 6 }));
}

#[test]
fn next_record_treats_undecomposable_names_as_new_entity() {
    let (_dir, path) = new_ods_path("next_names.ods");
    seed_roster(&path);

    let out = dispatch(
        "next_record",
        json!({
            "path": path_arg(&path),
            "row": 4,
            "lookup": {
                "by": "name",
                "name": { "kind": "combined", "name": "B", "order": "FIRST_NAME_LAST_NAME" }
            }
        }),
    )
    .expect("next_record");
    assert_eq!(out["found"], true);
    assert!(out["identity"].is_null());
    assert_eq!(out["record_set"], json!({ "start": 7, "end": 7 }));
}

#[test]
fn next_record_at_last_entity_finds_nothing() {
    let (_dir, path) = new_ods_path("next_last.ods");
    seed_roster(&path);

    let out = dispatch(
        "next_record",
        json!({
            "path": path_arg(&path),
            "row": 7,
            "lookup": { "by": "id", "column": "A" }
        }),
    )
    .expect("next_record");
    assert_eq!(out["found"], false);
    assert_eq!(out["rows"], json!([]));
}

#[test]
fn next_record_needs_an_identity_to_step_from() {
    let (_dir, path) = new_ods_path("next_header.ods");
    seed_roster(&path);

    let err = dispatch(
        "next_record",
        json!({
            "path": path_arg(&path),
            "row": 1,
            "lookup": {
                "by": "name",
                "name": { "kind": "split", "first_name": "D", "last_name": "E" }
            }
        }),
    )
    .expect_err("no identity");
    assert_eq!(err.code(), 1011);
}

#[test]
fn last_row_past_the_data_is_clamped_to_the_sheet() {
    let (_dir, path) = new_ods_path("clamp.ods");
    seed_roster(&path);

    let found = dispatch(
        "find_record",
        json!({
            "path": path_arg(&path),
            "last_row": 20,
            "lookup": { "by": "id", "column": "A", "id": "C300" }
        }),
    )
    .expect("find_record");
    assert_eq!(found["record_set"], json!({ "start": 7, "end": 7 }));
    assert_eq!(found["rows"], json!([["C-300", "Madonna", "MATH"]]));

    let next = dispatch(
        "next_record",
        json!({
            "path": path_arg(&path),
            "row": 4,
            "last_row": 20,
            "lookup": { "by": "id", "column": "A" }
        }),
    )
    .expect("next_record");
    assert_eq!(next["record_set"], json!({ "start": 7, "end": 7 }));
    assert_eq!(next["rows"].as_array().expect("rows").len(), 1);
}

#[test]
fn huge_row_numbers_do_not_overflow() {
    let (_dir, path) = new_ods_path("huge.ods");
    seed_roster(&path);

    let found = dispatch(
        "find_record",
        json!({
            "path": path_arg(&path),
            "last_row": u64::MAX,
            "lookup": { "by": "id", "column": "A", "id": "A-100" }
        }),
    )
    .expect("find_record");
    assert_eq!(found["record_set"], json!({ "start": 2, "end": 3 }));

    let err = dispatch(
        "next_record",
        json!({
            "path": path_arg(&path),
            "row": u64::MAX,
            "last_row": u64::MAX,
            "lookup": { "by": "id", "column": "A" }
        }),
    )
    .expect_err("row past the sheet");
    assert_eq!(err.code(), 1011);
}
