use crate::common::errors::AppError;
use crate::ods::sheet_model::{Cell, CellStyle, CellValue, Sheet, Workbook};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

mod styles_xml;
mod workbook_xml;

pub use styles_xml::NumberFormat;

/// Reader/renderer for the `content.xml` part of an ODS package.
pub struct ContentXml;

impl ContentXml {
    fn is_local_name_bytes(full_name: &[u8], local_name: &[u8]) -> bool {
        if full_name == local_name {
            return true;
        }
        if let Some(pos) = full_name.iter().rposition(|b| *b == b':') {
            return &full_name[pos + 1..] == local_name;
        }
        false
    }

    fn attr_value(
        e: &BytesStart<'_>,
        key: &[u8],
        decoder: quick_xml::encoding::Decoder,
    ) -> Option<String> {
        e.attributes()
            .flatten()
            .find(|attr| Self::is_local_name_bytes(attr.key.as_ref(), key))
            .and_then(|attr| attr.decode_and_unescape_value(decoder).ok())
            .map(|v| v.into_owned())
    }

    fn attr_repeat(e: &BytesStart<'_>, key: &[u8], decoder: quick_xml::encoding::Decoder) -> usize {
        // ODS can compress repeated rows/columns using repeat attributes.
        Self::attr_value(e, key, decoder)
            .and_then(|v| v.parse::<usize>().ok())
            .map(|n| n.max(1))
            .unwrap_or(1)
    }

    fn write_paragraphs(
        writer: &mut Writer<Cursor<Vec<u8>>>,
        text: &str,
    ) -> Result<(), AppError> {
        // Line breaks inside a cell are separate paragraphs in ODS.
        for line in text.split('\n') {
            writer.write_event(Event::Start(BytesStart::new("text:p")))?;
            writer.write_event(Event::Text(BytesText::new(line)))?;
            writer.write_event(Event::End(BytesEnd::new("text:p")))?;
        }
        Ok(())
    }
}
