use crate::common::errors::AppError;
use crate::ods::content_xml::ContentXml;
use crate::ods::settings_xml::SettingsXml;
use crate::ods::sheet_model::Workbook;

pub struct OdsTemplates;

impl OdsTemplates {
    // MIME string checked by spreadsheet apps before parsing XML.
    pub fn mimetype() -> &'static str {
        "application/vnd.oasis.opendocument.spreadsheet"
    }

    pub fn meta_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-meta xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" office:version="1.2">
  <office:meta />
</office:document-meta>"#
    }

    pub fn styles_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" office:version="1.2">
  <office:styles>
    <style:style style:name="Default" style:family="table-cell" />
  </office:styles>
</office:document-styles>"#
    }

    pub fn manifest_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
  <manifest:file-entry manifest:full-path="/" manifest:version="1.2" manifest:media-type="application/vnd.oasis.opendocument.spreadsheet" />
  <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml" />
  <manifest:file-entry manifest:full-path="styles.xml" manifest:media-type="text/xml" />
  <manifest:file-entry manifest:full-path="meta.xml" manifest:media-type="text/xml" />
  <manifest:file-entry manifest:full-path="settings.xml" manifest:media-type="text/xml" />
</manifest:manifest>"#
    }

    pub fn content_xml(initial_sheet_name: String) -> Result<String, AppError> {
        // Start every new document with one empty sheet.
        ContentXml::render(&Workbook::new(initial_sheet_name))
    }

    pub fn settings_xml(initial_sheet_name: &str) -> Result<String, AppError> {
        SettingsXml::render(Some(initial_sheet_name))
    }
}
