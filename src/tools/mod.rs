pub mod create_ods;
pub mod find_record;
pub mod get_sheet_content;
pub mod get_sheets;
pub mod insert_row;
pub mod next_record;
pub mod session;
pub mod set_active_sheet;
pub mod sheet_ref;
pub mod update_cell;
pub mod validate_template;
