use crate::ods::cell_address::Column;
use crate::ods::sheet_model::RowRef;
use crate::records::normalize::{
    normalize, normalize_default, normalized_non_empty, NormalizeOptions,
};
use serde::{Deserialize, Serialize};

/// Order of the parts inside a combined name cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NameOrder {
    /// `JOHN DOE`
    FirstNameLastName,
    /// `DOE, JOHN`
    LastNameFirstName,
}

fn default_delimiter() -> String {
    " ".to_string()
}

/// Where a row keeps a person's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NameLookup {
    /// First and last name in their own columns.
    Split { first_name: Column, last_name: Column },
    /// Both parts packed into one cell.
    Combined {
        name: Column,
        order: NameOrder,
        #[serde(default = "default_delimiter")]
        delimiter: String,
    },
}

/// A person's name, normalized on construction. Blank parts are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PersonName {
    pub fn new(first_name: Option<&str>, last_name: Option<&str>) -> Self {
        Self {
            first_name: normalized_non_empty(first_name),
            last_name: normalized_non_empty(last_name),
        }
    }

    /// Both parts, when both are present and non-empty.
    pub(crate) fn parts(&self) -> Option<(&str, &str)> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                Some((first, last))
            }
            _ => None,
        }
    }
}

impl NameLookup {
    /// Derives the name stored in `row`, or `None` when it cannot be decomposed.
    pub fn derive(&self, row: &RowRef<'_>) -> Option<PersonName> {
        match self {
            NameLookup::Split {
                first_name,
                last_name,
            } => {
                let name = PersonName {
                    first_name: normalized_non_empty(row.text(*first_name).as_deref()),
                    last_name: normalized_non_empty(row.text(*last_name).as_deref()),
                };
                if name.first_name.is_none() && name.last_name.is_none() {
                    return None;
                }
                Some(name)
            }
            NameLookup::Combined {
                name,
                order,
                delimiter,
            } => {
                let full = normalize(
                    row.text(*name).as_deref(),
                    &NormalizeOptions::keep_special_chars(),
                )?;
                split_full_name(&full, *order, delimiter)
            }
        }
    }
}

fn split_full_name(full: &str, order: NameOrder, delimiter: &str) -> Option<PersonName> {
    if delimiter.is_empty() {
        return None;
    }
    // The full text is already upper-cased; fold the delimiter the same way.
    let delimiter = delimiter.to_uppercase();
    let parts: Vec<&str> = full
        .split(delimiter.as_str())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let (head, rest) = parts.split_first()?;
    if rest.is_empty() {
        return None;
    }
    // The leading part is one name, everything after it is the other.
    let rest = rest.join(" ");
    let name = match order {
        NameOrder::FirstNameLastName => PersonName::new(Some(head), Some(&rest)),
        NameOrder::LastNameFirstName => PersonName::new(Some(&rest), Some(head)),
    };
    name.parts().is_some().then_some(name)
}

/// Which columns identify the entity a row belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum LookupSpec {
    Id { column: Column },
    Name { name: NameLookup },
}

/// The derived identity of a row under a [`LookupSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RowIdentity {
    Id(String),
    Name(PersonName),
}

impl LookupSpec {
    pub fn identity(&self, row: &RowRef<'_>) -> Option<RowIdentity> {
        match self {
            LookupSpec::Id { column } => {
                normalized_non_empty(row.text(*column).as_deref()).map(RowIdentity::Id)
            }
            LookupSpec::Name { name } => name.derive(row).map(RowIdentity::Name),
        }
    }
}

/// Test applied to one cell's normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum CellTest {
    NonEmpty,
    Empty,
    Equals { value: String },
    Contains { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCondition {
    pub column: Column,
    #[serde(flatten)]
    pub test: CellTest,
}

impl ColumnCondition {
    pub fn holds(&self, row: &RowRef<'_>) -> bool {
        let text = normalized_non_empty(row.text(self.column).as_deref());
        match &self.test {
            CellTest::NonEmpty => text.is_some(),
            CellTest::Empty => text.is_none(),
            CellTest::Equals { value } => text == normalize_default(Some(value)),
            CellTest::Contains { value } => {
                let needle = normalize_default(Some(value)).unwrap_or_default();
                text.is_some_and(|t| t.contains(&needle))
            }
        }
    }
}
