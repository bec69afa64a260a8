use crate::common::errors::AppError;
use crate::tools::session::{parse_input, to_output, SheetSession};
use crate::tools::sheet_ref::SheetRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct SetActiveSheetInput {
    path: String,
    sheet: SheetRef,
}

#[derive(Debug, Serialize)]
struct SetActiveSheetOutput {
    active: String,
    index: usize,
}

pub fn handle(params: Value) -> Result<Value, AppError> {
    let input: SetActiveSheetInput = parse_input(params)?;
    let mut session = SheetSession::open(&input.path, &input.sheet)?;
    session.workbook.active_sheet = session.index;
    session.save()?;
    to_output(SetActiveSheetOutput {
        active: session.name,
        index: session.index,
    })
}
