use crate::common::errors::AppError;
use crate::ods::content_xml::ContentXml;
use crate::ods::ods_templates::OdsTemplates;
use crate::ods::settings_xml::SettingsXml;
use crate::ods::sheet_model::Workbook;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub struct OdsFile;

impl OdsFile {
    // Creates a minimal but valid ODS zip package from templates.
    pub fn create(path: &Path, initial_sheet_name: String) -> Result<(), AppError> {
        let settings = OdsTemplates::settings_xml(&initial_sheet_name)?;
        let content = OdsTemplates::content_xml(initial_sheet_name)?;

        let mut entries = BTreeMap::new();
        entries.insert("content.xml".to_string(), content.into_bytes());
        entries.insert("styles.xml".to_string(), OdsTemplates::styles_xml().into());
        entries.insert("meta.xml".to_string(), OdsTemplates::meta_xml().into());
        entries.insert("settings.xml".to_string(), settings.into_bytes());
        entries.insert(
            "META-INF/manifest.xml".to_string(),
            OdsTemplates::manifest_xml().into(),
        );
        Self::write_entries(path, &entries)
    }

    pub fn read_workbook(path: &Path) -> Result<Workbook, AppError> {
        let entries = Self::read_entries(path)?;
        let content = Self::entry_text(&entries, "content.xml")?
            .ok_or_else(|| AppError::InvalidOdsFormat("missing content.xml".to_string()))?;
        let mut workbook = ContentXml::parse(&content)?;

        if let Some(settings) = Self::entry_text(&entries, "settings.xml")? {
            if let Some(active) = SettingsXml::active_table(&settings)? {
                workbook.active_sheet = workbook.sheet_index_by_name(&active).unwrap_or(0);
            }
        }
        debug!(
            path = %path.display(),
            sheets = workbook.sheets.len(),
            "workbook loaded"
        );
        Ok(workbook)
    }

    pub fn write_workbook(path: &Path, workbook: &Workbook) -> Result<(), AppError> {
        let content = ContentXml::render(workbook)?;
        let active = workbook
            .sheets
            .get(workbook.active_sheet)
            .map(|s| s.name.as_str());
        let settings = SettingsXml::render(active)?;

        // Other entries are carried over unchanged.
        let mut entries = Self::read_entries(path)?;
        entries.insert("content.xml".to_string(), content.into_bytes());
        entries.insert("settings.xml".to_string(), settings.into_bytes());
        Self::write_entries(path, &entries)?;
        debug!(path = %path.display(), "workbook written");
        Ok(())
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, Vec<u8>>, AppError> {
        let file = File::open(path)?;
        let mut zip = ZipArchive::new(file)?;

        let mut mimetype = String::new();
        zip.by_name("mimetype")?.read_to_string(&mut mimetype)?;
        if mimetype.trim() != OdsTemplates::mimetype() {
            return Err(AppError::InvalidOdsFormat("invalid mimetype".to_string()));
        }

        let mut entries = BTreeMap::new();
        for i in 0..zip.len() {
            let mut file = zip.by_index(i)?;
            let name = file.name().to_string();
            if name.ends_with('/') || name == "mimetype" {
                continue;
            }
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            entries.insert(name, bytes);
        }
        Ok(entries)
    }

    fn entry_text(
        entries: &BTreeMap<String, Vec<u8>>,
        name: &str,
    ) -> Result<Option<String>, AppError> {
        entries
            .get(name)
            .map(|bytes| {
                String::from_utf8(bytes.clone())
                    .map_err(|e| AppError::InvalidOdsFormat(format!("{name}: {e}")))
            })
            .transpose()
    }

    fn write_entries(path: &Path, entries: &BTreeMap<String, Vec<u8>>) -> Result<(), AppError> {
        let out = File::create(path)?;
        let mut writer = ZipWriter::new(out);

        // ODS requires "mimetype" to be first and stored (not compressed).
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        writer.start_file("mimetype", stored)?;
        writer.write_all(OdsTemplates::mimetype().as_bytes())?;

        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, content) in entries {
            writer.start_file(name.as_str(), deflated)?;
            writer.write_all(content)?;
        }

        writer.finish()?;
        Ok(())
    }
}
