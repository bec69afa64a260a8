use crate::common::errors::AppError;
use crate::ods::cell_address::Column;
use crate::ods::sheet_model::{Cell, CellValue, Sheet};
use tracing::info;

fn populated(sheet: &Sheet, row: usize, column: Column) -> bool {
    sheet
        .rows
        .get(row - 1)
        .and_then(|cells| cells.get(column.offset()))
        .is_some_and(|cell| match &cell.value {
            CellValue::Empty => false,
            CellValue::String(s) => !s.is_empty(),
            _ => true,
        })
}

/// Inserts a blank row below the group starting at `start_row` (the run of
/// rows with `column` populated) and returns its number. Rows below shift down.
pub fn insert_row_after_group(
    sheet: &mut Sheet,
    start_row: usize,
    column: Column,
) -> Result<usize, AppError> {
    if start_row == 0 {
        return Err(AppError::RowOutOfRange("row numbers start at 1".to_string()));
    }

    let mut target = start_row;
    while target <= sheet.row_count() && populated(sheet, target, column) {
        target += 1;
    }

    if target > start_row {
        sheet.duplicate_row(target - 1, 1, true);
        let row = &mut sheet.rows[target - 1];
        for cell in row.iter_mut() {
            cell.value = CellValue::Empty;
            cell.note = None;
        }
        if row.len() < column.number() {
            row.resize(column.number(), Cell::empty());
        }
    } else {
        sheet.insert_row(target, vec![Cell::empty(); column.number()]);
    }
    info!(sheet = %sheet.name, row = target, "inserted row after group");
    Ok(target)
}
