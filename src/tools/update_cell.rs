use crate::common::errors::AppError;
use crate::ods::cell_address::{CellAddress, Column};
use crate::records::{update_cell, CellUpdate};
use crate::tools::session::{parse_input, to_output, SheetSession};
use crate::tools::sheet_ref::SheetRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct UpdateCellInput {
    path: String,
    #[serde(default)]
    sheet: SheetRef,
    /// A1 address of the cell to change.
    cell: String,
    update: CellUpdate,
}

#[derive(Debug, Serialize)]
struct UpdateCellOutput {
    updated: bool,
    sheet: String,
    cell: String,
}

pub fn handle(params: Value) -> Result<Value, AppError> {
    // Edits one existing cell in place; the file is rewritten only on success.
    let input: UpdateCellInput = parse_input(params)?;
    let address = CellAddress::parse(&input.cell)?;
    let column = Column::from_number(address.col + 1)?;

    let mut session = SheetSession::open(&input.path, &input.sheet)?;
    update_cell(session.sheet_mut(), address.row + 1, column, &input.update)?;
    session.save()?;

    to_output(UpdateCellOutput {
        updated: true,
        sheet: session.name,
        cell: address.to_a1(),
    })
}
