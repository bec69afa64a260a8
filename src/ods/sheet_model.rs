use crate::ods::cell_address::Column;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum CellValue {
    String(String),
    Number(f64),
    Boolean(bool),
    /// ISO-8601 date or date-time text, kept verbatim.
    Date(String),
    Formula {
        formula: String,
        result: Box<CellValue>,
    },
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Display text as a spreadsheet would render it without a number format.
    pub fn text(&self) -> Option<String> {
        match self {
            CellValue::String(v) => Some(v.clone()),
            CellValue::Number(v) => Some(format_number(*v)),
            CellValue::Boolean(v) => Some(if *v { "TRUE" } else { "FALSE" }.to_string()),
            CellValue::Date(v) => Some(v.clone()),
            CellValue::Formula { result, .. } => result.text(),
            CellValue::Empty => None,
        }
    }
}

fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// Presentation metadata carried by a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_fmt: Option<String>,
}

impl CellStyle {
    pub fn is_default(&self) -> bool {
        self == &CellStyle::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
    pub note: Option<String>,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            value: CellValue::Empty,
            style: CellStyle::default(),
            note: None,
        }
    }

    pub fn with_value(value: CellValue) -> Self {
        Self {
            value,
            ..Self::empty()
        }
    }

    pub fn text(&self) -> Option<String> {
        self.value.text()
    }
}

/// Borrowed view of one sheet row together with its 1-based row number.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    pub number: usize,
    pub cells: &'a [Cell],
}

impl<'a> RowRef<'a> {
    pub fn cell(&self, column: Column) -> Option<&'a Cell> {
        self.cells.get(column.offset())
    }

    pub fn text(&self, column: Column) -> Option<String> {
        self.cell(column).and_then(Cell::text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
    /// Zero-based index of the sheet tab shown when the file is opened.
    pub active_sheet: usize,
}

impl Sheet {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rows: Vec::new(),
        }
    }

    /// Builds a sheet of string cells; empty strings become empty cells.
    pub fn from_text_rows(name: &str, rows: &[&[&str]]) -> Self {
        let mut sheet = Self::new(name.to_string());
        for (r, row) in rows.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                if !text.is_empty() {
                    sheet.ensure_cell_mut(r, c).value = CellValue::String(text.to_string());
                }
            }
            while sheet.rows.len() <= r {
                sheet.rows.push(Vec::new());
            }
        }
        sheet
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn ensure_cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        // Grow rows first.
        while self.rows.len() <= row {
            self.rows.push(Vec::new());
        }
        // Then grow every row to keep a rectangular matrix shape.
        for row_cells in &mut self.rows {
            while row_cells.len() <= col {
                row_cells.push(Cell::empty());
            }
        }
        &mut self.rows[row][col]
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn max_cols(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Row by 1-based number.
    pub fn row(&self, number: usize) -> Option<RowRef<'_>> {
        let cells = self.rows.get(number.checked_sub(1)?)?;
        Some(RowRef { number, cells })
    }

    /// Up to `count` rows starting at 1-based `start`, clamped to the sheet.
    pub fn get_rows(&self, start: usize, count: usize) -> Vec<RowRef<'_>> {
        let first = start.max(1);
        let last = start.saturating_add(count).min(self.rows.len() + 1);
        (first..last).filter_map(|n| self.row(n)).collect()
    }

    pub fn cell_text(&self, row: usize, column: Column) -> Option<String> {
        self.row(row).and_then(|r| r.text(column))
    }

    /// Inserts `cells` as row `number`, shifting that row and everything below it down.
    /// Numbers past the end append, padding with empty rows.
    pub fn insert_row(&mut self, number: usize, cells: Vec<Cell>) {
        let index = number.saturating_sub(1);
        while self.rows.len() < index {
            self.rows.push(Vec::new());
        }
        self.rows.insert(index, cells);
    }

    /// Copies row `number` `count` times directly below it. With `insert` the copies
    /// shift the following rows down; otherwise they overwrite them.
    pub fn duplicate_row(&mut self, number: usize, count: usize, insert: bool) {
        let Some(source) = number
            .checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .cloned()
        else {
            return;
        };
        for i in 0..count {
            let target = number + i;
            if insert || target >= self.rows.len() {
                self.rows.insert(target.min(self.rows.len()), source.clone());
            } else {
                self.rows[target] = source.clone();
            }
        }
    }
}

impl Workbook {
    pub fn new(initial_sheet_name: String) -> Self {
        Self {
            sheets: vec![Sheet::new(initial_sheet_name)],
            active_sheet: 0,
        }
    }

    pub fn sheet_index_by_name(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name == name)
    }
}
