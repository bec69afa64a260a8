//! Template-driven record helpers: normalizing text, locating rows by id or
//! person name, expanding them into record sets, and editing rows in place.

pub mod boundary;
pub mod cell_update;
pub mod id_match;
pub mod insert;
pub mod lookup;
pub mod name_match;
pub mod normalize;
pub mod template;

pub use boundary::{
    find_group_end, find_group_start, find_next_group_start, find_record_set,
    find_record_set_end, CellPredicate, RecordSet,
};
pub use cell_update::{update_cell, CellUpdate};
pub use id_match::{find_row_by_id, IdMatchOptions};
pub use insert::insert_row_after_group;
pub use lookup::{
    CellTest, ColumnCondition, LookupSpec, NameLookup, NameOrder, PersonName, RowIdentity,
};
pub use name_match::{find_row_by_name, names_similar, NameMatchOptions};
pub use normalize::{normalize, normalize_default, NormalizeOptions};
pub use template::{validate_header, HeaderColumn};
