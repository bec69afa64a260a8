//! Expanding a seed row into the contiguous run of rows ("record set") that
//! shares its identifying value, and stepping from one record set to the next.
//!
//! Scans are bounded by the sheet itself (row 1 and the last stored row) or by
//! the row range the caller passes in.

use crate::ods::cell_address::Column;
use crate::ods::sheet_model::{RowRef, Sheet};
use crate::records::lookup::{ColumnCondition, LookupSpec, RowIdentity};
use crate::records::normalize::normalize_default;
use serde::Serialize;
use tracing::debug;

/// Membership test over a cell's text; `None` means the cell is blank or missing.
pub type CellPredicate<'p> = &'p dyn Fn(Option<&str>) -> bool;

/// Inclusive 1-based row span of a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordSet {
    pub start: usize,
    pub end: usize,
}

impl RecordSet {
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, row: usize) -> bool {
        (self.start..=self.end).contains(&row)
    }
}

fn belongs(sheet: &Sheet, row: usize, column: Column, predicate: Option<CellPredicate<'_>>) -> bool {
    let text = sheet.cell_text(row, column);
    match predicate {
        Some(predicate) => predicate(text.as_deref()),
        None => text.is_some_and(|t| !t.trim().is_empty()),
    }
}

pub fn find_group_start(
    sheet: &Sheet,
    seed_row: usize,
    column: Column,
    predicate: Option<CellPredicate<'_>>,
) -> usize {
    let mut start = seed_row;
    while start > 1 && belongs(sheet, start - 1, column, predicate) {
        start -= 1;
    }
    start
}

pub fn find_group_end(
    sheet: &Sheet,
    seed_row: usize,
    column: Column,
    predicate: Option<CellPredicate<'_>>,
) -> usize {
    let mut end = seed_row;
    while end < sheet.row_count() && belongs(sheet, end + 1, column, predicate) {
        end += 1;
    }
    end
}

/// Returns the last row of the record set holding `current_value`.
///
/// `rows` starts at the first row of the set. The scan stops at the first row
/// whose normalized value differs from `current_value` or fails `predicate`
/// (which sees the normalized value); the set ends one row above it. When no
/// such row exists in `rows`, `upper_bound` is returned.
pub fn find_record_set_end(
    rows: &[RowRef<'_>],
    current_value: &str,
    column: Column,
    predicate: Option<CellPredicate<'_>>,
    upper_bound: usize,
) -> usize {
    let target = normalize_default(Some(current_value));
    let boundary = rows.iter().find(|row| {
        let value = normalize_default(row.text(column).as_deref());
        value != target || predicate.is_some_and(|p| !p(value.as_deref()))
    });
    match boundary {
        Some(row) => row.number.saturating_sub(1),
        None => upper_bound,
    }
}

/// First row whose identity differs from `current` and which passes every
/// condition. Rows without an identity count as a new group.
pub fn find_next_group_start<'a>(
    rows: &[RowRef<'a>],
    current: &RowIdentity,
    lookup: &LookupSpec,
    conditions: &[ColumnCondition],
) -> Option<RowRef<'a>> {
    let next = rows.iter().copied().find(|row| {
        let differs = lookup
            .identity(row)
            .map_or(true, |identity| &identity != current);
        differs && conditions.iter().all(|c| c.holds(row))
    });
    if next.is_none() {
        debug!(?current, "no further group in range");
    }
    next
}

/// Expands `anchor` into the maximal contiguous run of rows sharing its identity.
/// Returns `None` when the anchor row is missing or has no identity.
pub fn find_record_set(sheet: &Sheet, anchor: usize, lookup: &LookupSpec) -> Option<RecordSet> {
    let identity = sheet.row(anchor).and_then(|row| lookup.identity(&row))?;
    let same = |n: usize| {
        sheet
            .row(n)
            .and_then(|row| lookup.identity(&row))
            .is_some_and(|other| other == identity)
    };

    let mut start = anchor;
    while start > 1 && same(start - 1) {
        start -= 1;
    }
    let mut end = anchor;
    while end < sheet.row_count() && same(end + 1) {
        end += 1;
    }
    Some(RecordSet { start, end })
}
