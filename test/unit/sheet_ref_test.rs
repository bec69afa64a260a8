use ods_records::ods::sheet_model::{Sheet, Workbook};
use ods_records::tools::sheet_ref::SheetRef;
use serde_json::json;

fn parse(value: serde_json::Value) -> Result<SheetRef, serde_json::Error> {
    serde_json::from_value(value)
}

#[test]
fn sheet_ref_accepts_every_selector_shape() {
    assert_eq!(
        parse(json!({ "name": "Roster" })).expect("object name"),
        SheetRef::Name { name: "Roster".to_string() }
    );
    assert_eq!(
        parse(json!({ "index": "2" })).expect("string index"),
        SheetRef::Index { index: 2 }
    );
    assert_eq!(parse(json!(1)).expect("bare index"), SheetRef::Index { index: 1 });
    assert_eq!(
        parse(json!("Summary")).expect("bare name"),
        SheetRef::Name { name: "Summary".to_string() }
    );
    assert_eq!(
        parse(json!(" {\"index\": 0}")).expect("encoded object"),
        SheetRef::Index { index: 0 }
    );
    assert_eq!(parse(json!(null)).expect("null"), SheetRef::Active);
}

#[test]
fn sheet_ref_rejects_malformed_selectors() {
    assert!(parse(json!({})).is_err());
    assert!(parse(json!({ "index": -1 })).is_err());
    assert!(parse(json!({ "index": "first" })).is_err());
    assert!(parse(json!("{not json")).is_err());
    assert!(parse(json!(true)).is_err());
}

#[test]
fn sheet_ref_resolves_against_workbook() {
    let mut workbook = Workbook::new("Roster".to_string());
    workbook.sheets.push(Sheet::new("Summary".to_string()));
    workbook.active_sheet = 1;

    assert_eq!(
        SheetRef::Active.resolve_in_workbook(&workbook).expect("active"),
        (1, "Summary".to_string())
    );
    assert_eq!(
        SheetRef::Name { name: "Roster".to_string() }
            .resolve_in_workbook(&workbook)
            .expect("by name"),
        (0, "Roster".to_string())
    );
    let err = SheetRef::Index { index: 2 }
        .resolve_in_workbook(&workbook)
        .expect_err("out of range");
    assert_eq!(err.code(), 1005);
}
