use crate::common::errors::AppError;
use crate::ods::cell_address::Column;
use crate::ods::sheet_model::Sheet;
use crate::records::{
    find_group_start, find_record_set, find_record_set_end, find_row_by_id, find_row_by_name,
    normalize_default, IdMatchOptions, LookupSpec, NameLookup, NameMatchOptions, PersonName,
    RecordSet,
};
use crate::tools::session::{parse_input, row_texts, to_output, SheetSession};
use crate::tools::sheet_ref::SheetRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct NameCandidate {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
enum RecordQuery {
    Id {
        column: Column,
        id: String,
        #[serde(default)]
        suffix_fallback: bool,
    },
    Name {
        name: NameLookup,
        candidates: Vec<NameCandidate>,
        #[serde(default = "default_similar_fallback")]
        similar_fallback: bool,
    },
}

fn default_similar_fallback() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct FindRecordInput {
    path: String,
    #[serde(default)]
    sheet: SheetRef,
    /// First data row; rows above it (headers) are never searched.
    #[serde(default = "default_first_row")]
    first_row: usize,
    #[serde(default)]
    last_row: Option<usize>,
    lookup: RecordQuery,
}

fn default_first_row() -> usize {
    2
}

#[derive(Debug, Serialize)]
struct FindRecordOutput {
    sheet: String,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    anchor_row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record_set: Option<RecordSet>,
    rows: Vec<Vec<String>>,
}

pub fn handle(params: Value) -> Result<Value, AppError> {
    // Locates the anchor row, then expands it into the contiguous record set.
    let input: FindRecordInput = parse_input(params)?;
    if input.first_row == 0 {
        return Err(AppError::RowOutOfRange("first_row starts at 1".to_string()));
    }
    let session = SheetSession::open(&input.path, &input.sheet)?;
    let sheet = session.sheet();
    // Scans never run past the last stored row.
    let last_row = input
        .last_row
        .map_or(sheet.row_count(), |row| row.min(sheet.row_count()));

    let located = locate(sheet, &input.lookup, input.first_row, last_row);
    let rows = located
        .map(|(_, set)| (set.start..=set.end).map(|n| row_texts(sheet, n)).collect())
        .unwrap_or_default();

    to_output(FindRecordOutput {
        sheet: session.name.clone(),
        found: located.is_some(),
        anchor_row: located.map(|(anchor, _)| anchor),
        record_set: located.map(|(_, set)| set),
        rows,
    })
}

fn locate(
    sheet: &Sheet,
    query: &RecordQuery,
    first_row: usize,
    last_row: usize,
) -> Option<(usize, RecordSet)> {
    let count = last_row.saturating_add(1).saturating_sub(first_row);
    let rows = sheet.get_rows(first_row, count);

    match query {
        RecordQuery::Id {
            column,
            id,
            suffix_fallback,
        } => {
            let options = IdMatchOptions {
                suffix_fallback: *suffix_fallback,
            };
            let anchor = find_row_by_id(&rows, id, *column, None, options)?;
            // The group is keyed by the row's own value, which differs from `id`
            // when the suffix fallback matched.
            let value = anchor.text(*column).unwrap_or_default();
            let target = normalize_default(Some(&value));
            let same = |text: Option<&str>| normalize_default(text) == target;
            let start =
                find_group_start(sheet, anchor.number, *column, Some(&same)).max(first_row);
            let remaining = last_row.saturating_add(1).saturating_sub(anchor.number);
            let tail = sheet.get_rows(anchor.number, remaining);
            let end = find_record_set_end(&tail, &value, *column, None, last_row);
            Some((anchor.number, RecordSet { start, end }))
        }
        RecordQuery::Name {
            name,
            candidates,
            similar_fallback,
        } => {
            let candidates: Vec<PersonName> = candidates
                .iter()
                .map(|c| PersonName::new(c.first_name.as_deref(), c.last_name.as_deref()))
                .collect();
            let options = NameMatchOptions {
                similar_fallback: *similar_fallback,
            };
            let anchor = find_row_by_name(&rows, &candidates, name, options)?;
            let lookup = LookupSpec::Name { name: name.clone() };
            let set = find_record_set(sheet, anchor.number, &lookup)?;
            let set = RecordSet {
                start: set.start.max(first_row),
                end: set.end.min(last_row),
            };
            Some((anchor.number, set))
        }
    }
}
