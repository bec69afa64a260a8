use crate::common::errors::AppError;
use crate::ods::cell_address::Column;
use crate::ods::sheet_model::{Cell, CellStyle, CellValue, Sheet};

/// Changes to apply to one cell. Absent fields leave the cell untouched.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct CellUpdate {
    pub value: Option<CellValue>,
    /// Replaces the whole style before the individual style fields below apply.
    pub style: Option<CellStyle>,
    pub fill: Option<String>,
    pub num_fmt: Option<String>,
    pub bold: Option<bool>,
    pub font_color: Option<String>,
    pub note: Option<String>,
    pub clear_note: bool,
}

impl CellUpdate {
    pub fn value(value: CellValue) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    fn apply(&self, cell: &mut Cell) {
        if let Some(value) = &self.value {
            cell.value = value.clone();
        }
        if let Some(style) = &self.style {
            cell.style = style.clone();
        }
        if let Some(fill) = &self.fill {
            cell.style.fill = Some(fill.clone());
        }
        if let Some(num_fmt) = &self.num_fmt {
            cell.style.num_fmt = Some(num_fmt.clone());
        }
        if let Some(bold) = self.bold {
            cell.style.bold = Some(bold);
        }
        if let Some(color) = &self.font_color {
            cell.style.font_color = Some(color.clone());
        }
        if self.clear_note {
            cell.note = None;
        }
        if let Some(note) = &self.note {
            cell.note = Some(note.clone());
        }
    }
}

/// Applies `update` to one cell of an existing row.
///
/// Updates never add rows: `row` must lie within the sheet. The row grows to
/// reach `column` if needed.
pub fn update_cell(
    sheet: &mut Sheet,
    row: usize,
    column: Column,
    update: &CellUpdate,
) -> Result<(), AppError> {
    if row == 0 || row > sheet.row_count() {
        return Err(AppError::RowOutOfRange(format!(
            "row {row} outside 1..={} of sheet {}",
            sheet.row_count(),
            sheet.name
        )));
    }
    let cells = &mut sheet.rows[row - 1];
    if cells.len() < column.number() {
        cells.resize(column.number(), Cell::empty());
    }
    update.apply(&mut cells[column.offset()]);
    Ok(())
}
