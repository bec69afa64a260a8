use crate::common::errors::AppError;
use crate::common::fs::FsUtil;
use crate::ods::ods_file::OdsFile;
use crate::ods::sheet_model::{Sheet, Workbook};
use crate::tools::sheet_ref::SheetRef;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

pub fn parse_input<T: DeserializeOwned>(params: Value) -> Result<T, AppError> {
    serde_json::from_value(params).map_err(|e| AppError::InvalidInput(e.to_string()))
}

pub fn to_output<T: Serialize>(output: T) -> Result<Value, AppError> {
    serde_json::to_value(output).map_err(|e| AppError::InvalidInput(e.to_string()))
}

/// An opened workbook with one resolved sheet, for the open-mutate-save cycle of a tool call.
pub struct SheetSession {
    pub path: PathBuf,
    pub workbook: Workbook,
    pub index: usize,
    pub name: String,
}

impl SheetSession {
    pub fn open(path: &str, sheet: &SheetRef) -> Result<Self, AppError> {
        let path = FsUtil::resolve_existing_ods_path(path)?;
        let workbook = OdsFile::read_workbook(&path)?;
        let (index, name) = sheet.resolve_in_workbook(&workbook)?;
        Ok(Self {
            path,
            workbook,
            index,
            name,
        })
    }

    pub fn sheet(&self) -> &Sheet {
        &self.workbook.sheets[self.index]
    }

    pub fn sheet_mut(&mut self) -> &mut Sheet {
        &mut self.workbook.sheets[self.index]
    }

    pub fn save(&self) -> Result<(), AppError> {
        OdsFile::write_workbook(&self.path, &self.workbook)
    }
}

/// Display text of every cell in `row`, empty cells as empty strings.
pub fn row_texts(sheet: &Sheet, row: usize) -> Vec<String> {
    sheet
        .row(row)
        .map(|r| {
            r.cells
                .iter()
                .map(|c| c.text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}
