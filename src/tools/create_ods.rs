use crate::common::errors::AppError;
use crate::common::fs::FsUtil;
use crate::ods::cell_address::Column;
use crate::ods::ods_file::OdsFile;
use crate::ods::sheet_model::CellValue;
use crate::records::{update_cell, CellUpdate};
use crate::tools::session::{parse_input, to_output};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct CreateOdsInput {
    path: String,
    #[serde(default)]
    overwrite: bool,
    #[serde(default = "default_sheet_name")]
    initial_sheet_name: String,
    /// Template header labels written to row 1, from column A onwards.
    #[serde(default)]
    headers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CreateOdsOutput {
    path: String,
    sheets: Vec<String>,
    headers: usize,
}

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

pub fn handle(params: Value) -> Result<Value, AppError> {
    let input: CreateOdsInput = parse_input(params)?;
    let path = FsUtil::resolve_ods_path(&input.path)?;

    if path.exists() && !input.overwrite {
        return Err(AppError::AlreadyExists(path.display().to_string()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    OdsFile::create(&path, input.initial_sheet_name.clone())?;

    if !input.headers.is_empty() {
        let mut workbook = OdsFile::read_workbook(&path)?;
        let sheet = workbook
            .sheets
            .first_mut()
            .ok_or_else(|| AppError::InvalidOdsFormat("no sheet in new file".to_string()))?;
        sheet.rows.push(Vec::new());
        for (i, label) in input.headers.iter().enumerate() {
            let column = Column::from_number(i + 1)?;
            let update = CellUpdate {
                value: Some(CellValue::String(label.clone())),
                bold: Some(true),
                ..CellUpdate::default()
            };
            update_cell(sheet, 1, column, &update)?;
        }
        OdsFile::write_workbook(&path, &workbook)?;
    }

    to_output(CreateOdsOutput {
        path: path.display().to_string(),
        sheets: vec![input.initial_sheet_name],
        headers: input.headers.len(),
    })
}
