pub mod cell_address;
pub mod content_xml;
pub mod ods_file;
pub mod ods_templates;
pub mod settings_xml;
pub mod sheet_model;
