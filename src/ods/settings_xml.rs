use crate::common::errors::AppError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

/// The part of `settings.xml` that selects the sheet tab shown on open.
pub struct SettingsXml;

impl SettingsXml {
    /// Name of the active table, if the settings declare one.
    pub fn active_table(content: &str) -> Result<Option<String>, AppError> {
        let mut reader = Reader::from_str(content);
        let mut in_active_table = false;
        loop {
            match reader.read_event()? {
                Event::Start(e) if e.local_name().as_ref() == b"config-item" => {
                    in_active_table = e.attributes().flatten().any(|a| {
                        a.key.local_name().as_ref() == b"name" && a.value.as_ref() == b"ActiveTable"
                    });
                }
                Event::Text(text) if in_active_table => {
                    return Ok(Some(text.unescape()?.into_owned()));
                }
                Event::End(e) if e.local_name().as_ref() == b"config-item" => {
                    in_active_table = false;
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    pub fn render(active_table: Option<&str>) -> Result<String, AppError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("office:document-settings");
        root.push_attribute((
            "xmlns:office",
            "urn:oasis:names:tc:opendocument:xmlns:office:1.0",
        ));
        root.push_attribute((
            "xmlns:config",
            "urn:oasis:names:tc:opendocument:xmlns:config:1.0",
        ));
        root.push_attribute(("office:version", "1.2"));
        writer.write_event(Event::Start(root))?;
        writer.write_event(Event::Start(BytesStart::new("office:settings")))?;

        if let Some(active_table) = active_table {
            let mut set = BytesStart::new("config:config-item-set");
            set.push_attribute(("config:name", "ooo:view-settings"));
            writer.write_event(Event::Start(set))?;
            let mut views = BytesStart::new("config:config-item-map-indexed");
            views.push_attribute(("config:name", "Views"));
            writer.write_event(Event::Start(views))?;
            writer.write_event(Event::Start(BytesStart::new(
                "config:config-item-map-entry",
            )))?;
            Self::write_item(&mut writer, "ViewId", "view1")?;
            Self::write_item(&mut writer, "ActiveTable", active_table)?;
            writer.write_event(Event::End(BytesEnd::new("config:config-item-map-entry")))?;
            writer.write_event(Event::End(BytesEnd::new("config:config-item-map-indexed")))?;
            writer.write_event(Event::End(BytesEnd::new("config:config-item-set")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("office:settings")))?;
        writer.write_event(Event::End(BytesEnd::new("office:document-settings")))?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| AppError::XmlParseError(e.to_string()))
    }

    fn write_item(
        writer: &mut Writer<Cursor<Vec<u8>>>,
        name: &str,
        value: &str,
    ) -> Result<(), AppError> {
        let mut item = BytesStart::new("config:config-item");
        item.push_attribute(("config:name", name));
        item.push_attribute(("config:type", "string"));
        writer.write_event(Event::Start(item))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new("config:config-item")))?;
        Ok(())
    }
}
