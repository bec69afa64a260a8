use crate::common::errors::AppError;
use crate::tools::session::{parse_input, to_output, SheetSession};
use crate::tools::sheet_ref::SheetRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct GetSheetContentInput {
    path: String,
    #[serde(default)]
    sheet: SheetRef,
    #[serde(default = "default_start_row")]
    start_row: usize,
    #[serde(default = "default_mode")]
    mode: String,
    #[serde(default = "default_max_rows")]
    max_rows: usize,
    #[serde(default = "default_max_cols")]
    max_cols: usize,
    #[serde(default)]
    include_empty_trailing: bool,
}

#[derive(Debug, Serialize)]
struct GetSheetContentOutput {
    sheet: String,
    start_row: usize,
    rows: usize,
    cols: usize,
    data: Vec<Vec<String>>,
}

fn default_start_row() -> usize {
    1
}
fn default_mode() -> String {
    "matrix".to_string()
}
fn default_max_rows() -> usize {
    200
}
fn default_max_cols() -> usize {
    50
}

pub fn handle(params: Value) -> Result<Value, AppError> {
    // Builds a bounded 2D matrix of display texts starting at `start_row`.
    let input: GetSheetContentInput = parse_input(params)?;
    if input.mode != "matrix" {
        return Err(AppError::InvalidInput(
            "only mode=matrix is supported".to_string(),
        ));
    }
    if input.start_row == 0 {
        return Err(AppError::RowOutOfRange("start_row starts at 1".to_string()));
    }

    let session = SheetSession::open(&input.path, &input.sheet)?;
    let sheet = session.sheet();
    let col_limit = std::cmp::min(sheet.max_cols(), input.max_cols);

    let matrix: Vec<Vec<String>> = sheet
        .get_rows(input.start_row, input.max_rows)
        .iter()
        .map(|row| {
            (0..col_limit)
                .map(|c| {
                    row.cells
                        .get(c)
                        .and_then(|cell| cell.text())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    let (rows, cols, data) = if input.include_empty_trailing {
        (matrix.len(), col_limit, matrix)
    } else {
        trim_trailing(matrix)
    };

    to_output(GetSheetContentOutput {
        sheet: session.name,
        start_row: input.start_row,
        rows,
        cols,
        data,
    })
}

/// Drops blank rows at the bottom and blank columns on the right.
fn trim_trailing(mut matrix: Vec<Vec<String>>) -> (usize, usize, Vec<Vec<String>>) {
    while matrix
        .last()
        .is_some_and(|r| r.iter().all(String::is_empty))
    {
        matrix.pop();
    }

    let max_col = matrix
        .iter()
        .filter_map(|row| row.iter().rposition(|v| !v.is_empty()))
        .map(|last| last + 1)
        .max()
        .unwrap_or(0);

    for row in &mut matrix {
        row.truncate(max_col);
    }

    (matrix.len(), max_col, matrix)
}
