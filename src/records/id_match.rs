use crate::ods::cell_address::Column;
use crate::ods::sheet_model::RowRef;
use crate::records::normalize::normalize_default;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdMatchOptions {
    /// Accept rows whose value ends with the requested id when nothing matches exactly.
    pub suffix_fallback: bool,
}

/// Finds the first row whose `column` holds `id`.
///
/// Strategies run in order and the first hit wins:
/// 1. normalized equality;
/// 2. `fallback` applied to every non-empty normalized value, when supplied;
/// 3. otherwise, with `suffix_fallback`, a normalized value ending with the raw `id`.
///
/// The suffix check compares the raw `id`, not its normalized form. Blank ids
/// and blank cells never match.
pub fn find_row_by_id<'a>(
    rows: &[RowRef<'a>],
    id: &str,
    column: Column,
    fallback: Option<&dyn Fn(&str) -> bool>,
    options: IdMatchOptions,
) -> Option<RowRef<'a>> {
    if rows.is_empty() {
        debug!(id, "no rows to search for id");
        return None;
    }

    let target = normalize_default(Some(id));
    let values: Vec<Option<String>> = rows
        .iter()
        .map(|row| normalize_default(row.text(column).as_deref()))
        .collect();

    let blank_id = target.as_deref().map_or(true, str::is_empty);
    let non_empty = |i: usize| values[i].as_deref().filter(|v| !v.is_empty());
    // Blank cells never match, not even a blank id.
    let exact = (0..rows.len()).find(|&i| non_empty(i).is_some() && values[i] == target);
    let found = exact.or_else(|| match fallback {
        Some(predicate) => (0..rows.len()).find(|&i| non_empty(i).is_some_and(predicate)),
        None if options.suffix_fallback && !blank_id => {
            (0..rows.len()).find(|&i| non_empty(i).is_some_and(|v| v.ends_with(id)))
        }
        None => None,
    });

    match found {
        Some(i) => Some(rows[i]),
        None => {
            debug!(id, column = %column, "no row matches id");
            None
        }
    }
}
