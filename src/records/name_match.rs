use crate::ods::sheet_model::RowRef;
use crate::records::lookup::{NameLookup, PersonName};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameMatchOptions {
    /// Fall back to mutual containment when no row matches exactly.
    pub similar_fallback: bool,
}

impl Default for NameMatchOptions {
    fn default() -> Self {
        Self {
            similar_fallback: true,
        }
    }
}

/// Mutual-containment test: either the row's names contain the candidate's,
/// or the candidate's contain the row's. Both sides need both parts.
pub fn names_similar(row: &PersonName, candidate: &PersonName) -> bool {
    let (Some((row_first, row_last)), Some((cand_first, cand_last))) =
        (row.parts(), candidate.parts())
    else {
        return false;
    };
    (row_last.contains(cand_last) && row_first.contains(cand_first))
        || (cand_last.contains(row_last) && cand_first.contains(row_first))
}

/// Finds the first row whose derived name matches one of `candidates`.
///
/// Candidates are expected in normalized form (see [`PersonName::new`]).
/// Rows whose name cannot be derived are skipped.
pub fn find_row_by_name<'a>(
    rows: &[RowRef<'a>],
    candidates: &[PersonName],
    lookup: &NameLookup,
    options: NameMatchOptions,
) -> Option<RowRef<'a>> {
    if rows.is_empty() || candidates.is_empty() {
        debug!(
            rows = rows.len(),
            candidates = candidates.len(),
            "nothing to match names against"
        );
        return None;
    }

    let derived: Vec<Option<PersonName>> = rows.iter().map(|row| lookup.derive(row)).collect();

    // Partial names never match exactly; equal names share both parts.
    let exact = derived.iter().position(|name| {
        name.as_ref()
            .filter(|name| name.parts().is_some())
            .is_some_and(|name| candidates.iter().any(|c| c == name))
    });
    if let Some(i) = exact {
        return Some(rows[i]);
    }

    if options.similar_fallback {
        let similar = derived.iter().position(|name| {
            name.as_ref()
                .is_some_and(|name| candidates.iter().any(|c| names_similar(name, c)))
        });
        if let Some(i) = similar {
            debug!(row = rows[i].number, "name matched by containment");
            return Some(rows[i]);
        }
    }

    debug!(?candidates, "no row matches names");
    None
}
