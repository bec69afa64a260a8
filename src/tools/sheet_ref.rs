use crate::common::errors::AppError;
use crate::ods::sheet_model::Workbook;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};

/// Sheet selector accepted by every tool: `{"name": ..}`, `{"index": ..}`, a
/// bare name or index, a JSON object encoded as a string, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetRef {
    Name { name: String },
    Index { index: usize },
    /// The tab selected when the file was last saved.
    #[default]
    Active,
}

impl SheetRef {
    pub fn resolve_in_workbook(&self, workbook: &Workbook) -> Result<(usize, String), AppError> {
        let index = match self {
            SheetRef::Name { name } => workbook
                .sheet_index_by_name(name)
                .ok_or_else(|| AppError::SheetNotFound(name.clone()))?,
            SheetRef::Index { index } => *index,
            SheetRef::Active => workbook.active_sheet,
        };
        let sheet = workbook
            .sheets
            .get(index)
            .ok_or_else(|| AppError::SheetNotFound(index.to_string()))?;
        Ok((index, sheet.name.clone()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelector {
    Index(usize),
    Text(String),
    Fields {
        name: Option<String>,
        index: Option<RawIndex>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Number(usize),
    Text(String),
}

impl RawSelector {
    fn into_sheet_ref(self) -> Result<SheetRef, String> {
        match self {
            RawSelector::Index(index) => Ok(SheetRef::Index { index }),
            RawSelector::Text(text) if text.trim_start().starts_with('{') => {
                let nested: RawSelector = serde_json::from_str(text.trim())
                    .map_err(|_| "sheet JSON string is not a valid object".to_string())?;
                nested.into_sheet_ref()
            }
            RawSelector::Text(name) => Ok(SheetRef::Name { name }),
            RawSelector::Fields {
                name: Some(name), ..
            } => Ok(SheetRef::Name { name }),
            RawSelector::Fields {
                index: Some(RawIndex::Number(index)),
                ..
            } => Ok(SheetRef::Index { index }),
            RawSelector::Fields {
                index: Some(RawIndex::Text(text)),
                ..
            } => text
                .trim()
                .parse()
                .map(|index| SheetRef::Index { index })
                .map_err(|_| "sheet.index must be a non-negative integer".to_string()),
            RawSelector::Fields { .. } => Err("sheet must include either name or index".to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for SheetRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawSelector>::deserialize(deserializer)? {
            Some(raw) => raw.into_sheet_ref().map_err(D::Error::custom),
            None => Ok(SheetRef::Active),
        }
    }
}
