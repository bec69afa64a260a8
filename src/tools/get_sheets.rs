use crate::common::errors::AppError;
use crate::common::fs::FsUtil;
use crate::ods::ods_file::OdsFile;
use crate::tools::session::{parse_input, to_output};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct GetSheetsInput {
    path: String,
}

#[derive(Debug, Serialize)]
struct SheetSummary {
    name: String,
    rows: usize,
    active: bool,
}

#[derive(Debug, Serialize)]
struct GetSheetsOutput {
    sheets: Vec<SheetSummary>,
}

pub fn handle(params: Value) -> Result<Value, AppError> {
    // Sheets in tab order, flagging the one selected on open.
    let input: GetSheetsInput = parse_input(params)?;
    let path = FsUtil::resolve_existing_ods_path(&input.path)?;

    let workbook = OdsFile::read_workbook(&path)?;
    let active = workbook.active_sheet;
    let sheets = workbook
        .sheets
        .into_iter()
        .enumerate()
        .map(|(i, s)| SheetSummary {
            rows: s.row_count(),
            name: s.name,
            active: i == active,
        })
        .collect();
    to_output(GetSheetsOutput { sheets })
}
