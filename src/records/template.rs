use crate::common::errors::AppError;
use crate::ods::cell_address::Column;
use crate::ods::sheet_model::Sheet;
use crate::records::normalize::normalize_default;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One expected header label and the column it must appear in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderColumn {
    pub column: Column,
    pub label: String,
}

impl HeaderColumn {
    pub fn new(column: Column, label: &str) -> Self {
        Self {
            column,
            label: label.to_string(),
        }
    }
}

/// Checks that `header_row` carries each expected label, in the given order.
///
/// Labels and header text are compared after normalization. The first
/// mismatch stops validation and is reported with both texts.
pub fn validate_header(
    sheet: &Sheet,
    header_row: usize,
    expected: &[HeaderColumn],
) -> Result<(), AppError> {
    for header in expected {
        let actual = sheet.cell_text(header_row, header.column);
        if normalize_default(actual.as_deref()) == normalize_default(Some(&header.label)) {
            continue;
        }
        let actual = actual.unwrap_or_default();
        warn!(
            sheet = %sheet.name,
            column = %header.column,
            label = %header.label,
            actual = %actual,
            "header does not match template"
        );
        return Err(AppError::TemplateMismatch {
            label: header.label.clone(),
            column: header.column.letters(),
            actual,
        });
    }
    Ok(())
}
