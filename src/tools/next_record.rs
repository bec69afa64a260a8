use crate::common::errors::AppError;
use crate::records::{
    find_next_group_start, find_record_set, ColumnCondition, LookupSpec, RecordSet, RowIdentity,
};
use crate::tools::session::{parse_input, row_texts, to_output, SheetSession};
use crate::tools::sheet_ref::SheetRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct NextRecordInput {
    path: String,
    #[serde(default)]
    sheet: SheetRef,
    /// Any row of the current record set.
    row: usize,
    lookup: LookupSpec,
    #[serde(default)]
    conditions: Vec<ColumnCondition>,
    #[serde(default)]
    last_row: Option<usize>,
}

#[derive(Debug, Serialize)]
struct NextRecordOutput {
    sheet: String,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    identity: Option<RowIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record_set: Option<RecordSet>,
    rows: Vec<Vec<String>>,
}

pub fn handle(params: Value) -> Result<Value, AppError> {
    // Steps from the record set holding `row` to the next entity's record set.
    let input: NextRecordInput = parse_input(params)?;
    let session = SheetSession::open(&input.path, &input.sheet)?;
    let sheet = session.sheet();
    // Scans never run past the last stored row.
    let last_row = input
        .last_row
        .map_or(sheet.row_count(), |row| row.min(sheet.row_count()));

    let current = sheet
        .row(input.row)
        .and_then(|row| input.lookup.identity(&row))
        .ok_or_else(|| {
            AppError::InvalidInput(format!("row {} has no identity to step from", input.row))
        })?;

    let candidates = sheet.get_rows(
        input.row.saturating_add(1),
        last_row.saturating_sub(input.row),
    );
    let next = find_next_group_start(&candidates, &current, &input.lookup, &input.conditions);

    let record_set = next.map(|row| {
        find_record_set(sheet, row.number, &input.lookup)
            .map(|set| RecordSet {
                start: set.start.max(row.number),
                end: set.end.min(last_row),
            })
            .unwrap_or(RecordSet {
                start: row.number,
                end: row.number,
            })
    });
    let rows = record_set
        .map(|set| (set.start..=set.end).map(|n| row_texts(sheet, n)).collect())
        .unwrap_or_default();

    to_output(NextRecordOutput {
        sheet: session.name.clone(),
        found: next.is_some(),
        identity: next.and_then(|row| input.lookup.identity(&row)),
        record_set,
        rows,
    })
}
