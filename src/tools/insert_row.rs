use crate::common::errors::AppError;
use crate::ods::cell_address::Column;
use crate::records::{find_group_start, insert_row_after_group};
use crate::tools::session::{parse_input, to_output, SheetSession};
use crate::tools::sheet_ref::SheetRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct InsertRowInput {
    path: String,
    #[serde(default)]
    sheet: SheetRef,
    /// Any row of the group; the scan starts from the group's first row.
    row: usize,
    column: Column,
    /// First data row; the upward scan never enters the header above it.
    #[serde(default = "default_first_row")]
    first_row: usize,
}

fn default_first_row() -> usize {
    2
}

#[derive(Debug, Serialize)]
struct InsertRowOutput {
    sheet: String,
    group_start: usize,
    inserted_row: usize,
}

pub fn handle(params: Value) -> Result<Value, AppError> {
    let input: InsertRowInput = parse_input(params)?;
    if input.row == 0 {
        return Err(AppError::RowOutOfRange("row numbers start at 1".to_string()));
    }

    let mut session = SheetSession::open(&input.path, &input.sheet)?;
    let group_start =
        find_group_start(session.sheet(), input.row, input.column, None).max(input.first_row);
    let inserted_row = insert_row_after_group(session.sheet_mut(), group_start, input.column)?;
    session.save()?;

    to_output(InsertRowOutput {
        sheet: session.name,
        group_start,
        inserted_row,
    })
}
