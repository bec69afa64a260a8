use crate::common::errors::AppError;
use crate::records::{validate_header, HeaderColumn};
use crate::tools::session::{parse_input, to_output, SheetSession};
use crate::tools::sheet_ref::SheetRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ValidateTemplateInput {
    path: String,
    #[serde(default)]
    sheet: SheetRef,
    #[serde(default = "default_header_row")]
    header_row: usize,
    columns: Vec<HeaderColumn>,
}

fn default_header_row() -> usize {
    1
}

#[derive(Debug, Serialize)]
struct ValidateTemplateOutput {
    sheet: String,
    valid: bool,
    checked: usize,
}

pub fn handle(params: Value) -> Result<Value, AppError> {
    // A mismatch surfaces as a TemplateMismatch error rather than `valid: false`.
    let input: ValidateTemplateInput = parse_input(params)?;
    let session = SheetSession::open(&input.path, &input.sheet)?;
    validate_header(session.sheet(), input.header_row, &input.columns)?;
    to_output(ValidateTemplateOutput {
        sheet: session.name,
        valid: true,
        checked: input.columns.len(),
    })
}
