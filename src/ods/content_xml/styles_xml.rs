use super::*;
use std::collections::HashMap;
use tracing::debug;

/// Number format subset that round-trips through ODS data styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimals: usize,
    pub grouping: bool,
    pub percent: bool,
}

impl NumberFormat {
    /// Parses spreadsheet format codes such as `0`, `0.00`, `#,##0.00` or `0.0%`.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        let (body, percent) = match code.strip_suffix('%') {
            Some(body) => (body, true),
            None => (code, false),
        };
        if body.is_empty() || !body.chars().all(|c| matches!(c, '0' | '#' | ',' | '.')) {
            return None;
        }
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() || frac_part.contains(['.', ',']) {
            return None;
        }
        Some(Self {
            decimals: frac_part.len(),
            grouping: int_part.contains(','),
            percent,
        })
    }

    pub fn code(&self) -> String {
        let mut code = if self.grouping { "#,##0" } else { "0" }.to_string();
        if self.decimals > 0 {
            code.push('.');
            code.push_str(&"0".repeat(self.decimals));
        }
        if self.percent {
            code.push('%');
        }
        code
    }
}

#[derive(Default)]
struct StyleEntry {
    style: CellStyle,
    data_style: Option<String>,
}

/// Automatic cell and data styles declared in `content.xml`.
#[derive(Default)]
pub(super) struct AutomaticStyles {
    cell_styles: HashMap<String, StyleEntry>,
    number_formats: HashMap<String, NumberFormat>,
}

impl AutomaticStyles {
    pub(super) fn parse(content: &str) -> Result<Self, AppError> {
        let mut reader = Reader::from_str(content);
        let mut styles = AutomaticStyles::default();

        let mut current_cell_style: Option<(String, StyleEntry)> = None;
        let mut current_number: Option<(String, NumberFormat)> = None;
        let mut in_number_text = false;

        loop {
            let event = reader.read_event()?;
            let decoder = reader.decoder();
            match event {
                Event::Start(e) | Event::Empty(e)
                    if ContentXml::is_local_name_bytes(e.name().as_ref(), b"body") =>
                {
                    break;
                }
                Event::Start(e) if ContentXml::is_local_name_bytes(e.name().as_ref(), b"style") => {
                    let family = ContentXml::attr_value(&e, b"family", decoder);
                    let name = ContentXml::attr_value(&e, b"name", decoder);
                    if let (Some("table-cell"), Some(name)) = (family.as_deref(), name) {
                        let entry = StyleEntry {
                            style: CellStyle::default(),
                            data_style: ContentXml::attr_value(&e, b"data-style-name", decoder),
                        };
                        current_cell_style = Some((name, entry));
                    }
                }
                Event::Empty(e) if ContentXml::is_local_name_bytes(e.name().as_ref(), b"style") => {
                    let family = ContentXml::attr_value(&e, b"family", decoder);
                    let name = ContentXml::attr_value(&e, b"name", decoder);
                    if let (Some("table-cell"), Some(name)) = (family.as_deref(), name) {
                        let entry = StyleEntry {
                            style: CellStyle::default(),
                            data_style: ContentXml::attr_value(&e, b"data-style-name", decoder),
                        };
                        styles.cell_styles.insert(name, entry);
                    }
                }
                Event::End(e) if ContentXml::is_local_name_bytes(e.name().as_ref(), b"style") => {
                    if let Some((name, entry)) = current_cell_style.take() {
                        styles.cell_styles.insert(name, entry);
                    }
                }
                Event::Start(e) | Event::Empty(e)
                    if ContentXml::is_local_name_bytes(
                        e.name().as_ref(),
                        b"table-cell-properties",
                    ) =>
                {
                    if let Some((_, entry)) = current_cell_style.as_mut() {
                        entry.style.fill = ContentXml::attr_value(&e, b"background-color", decoder)
                            .filter(|c| c != "transparent");
                    }
                }
                Event::Start(e) | Event::Empty(e)
                    if ContentXml::is_local_name_bytes(e.name().as_ref(), b"text-properties") =>
                {
                    if let Some((_, entry)) = current_cell_style.as_mut() {
                        entry.style.bold = ContentXml::attr_value(&e, b"font-weight", decoder)
                            .map(|w| w == "bold");
                        entry.style.font_color = ContentXml::attr_value(&e, b"color", decoder);
                    }
                }
                Event::Start(e)
                    if ContentXml::is_local_name_bytes(e.name().as_ref(), b"number-style")
                        || ContentXml::is_local_name_bytes(
                            e.name().as_ref(),
                            b"percentage-style",
                        ) =>
                {
                    let percent = ContentXml::is_local_name_bytes(
                        e.name().as_ref(),
                        b"percentage-style",
                    );
                    if let Some(name) = ContentXml::attr_value(&e, b"name", decoder) {
                        let format = NumberFormat {
                            decimals: 0,
                            grouping: false,
                            percent,
                        };
                        current_number = Some((name, format));
                    }
                }
                Event::End(e)
                    if ContentXml::is_local_name_bytes(e.name().as_ref(), b"number-style")
                        || ContentXml::is_local_name_bytes(
                            e.name().as_ref(),
                            b"percentage-style",
                        ) =>
                {
                    if let Some((name, format)) = current_number.take() {
                        styles.number_formats.insert(name, format);
                    }
                }
                Event::Start(e) | Event::Empty(e)
                    if ContentXml::is_local_name_bytes(e.name().as_ref(), b"number") =>
                {
                    if let Some((_, format)) = current_number.as_mut() {
                        format.decimals = ContentXml::attr_value(&e, b"decimal-places", decoder)
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(0);
                        format.grouping = ContentXml::attr_value(&e, b"grouping", decoder)
                            .is_some_and(|v| v == "true");
                    }
                }
                Event::Start(e) if ContentXml::is_local_name_bytes(e.name().as_ref(), b"text") => {
                    in_number_text = current_number.is_some();
                }
                Event::End(e) if ContentXml::is_local_name_bytes(e.name().as_ref(), b"text") => {
                    in_number_text = false;
                }
                Event::Text(text) if in_number_text => {
                    if text.unescape()?.contains('%') {
                        if let Some((_, format)) = current_number.as_mut() {
                            format.percent = true;
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(styles)
    }

    /// Resolves a `table:style-name` into the presentation metadata it carries.
    pub(super) fn resolve(&self, name: &str) -> CellStyle {
        let Some(entry) = self.cell_styles.get(name) else {
            return CellStyle::default();
        };
        let mut style = entry.style.clone();
        style.num_fmt = entry
            .data_style
            .as_deref()
            .and_then(|data| self.number_formats.get(data))
            .map(NumberFormat::code);
        style
    }
}

/// Style names assigned while rendering a workbook.
pub(super) struct StyleCatalog {
    styles: Vec<CellStyle>,
    number_formats: Vec<NumberFormat>,
}

impl StyleCatalog {
    pub(super) fn collect(workbook: &Workbook) -> Self {
        let mut catalog = StyleCatalog {
            styles: Vec::new(),
            number_formats: Vec::new(),
        };
        let cells = workbook
            .sheets
            .iter()
            .flat_map(|s| s.rows.iter())
            .flat_map(|r| r.iter());
        for cell in cells {
            if cell.style.is_default() || catalog.styles.contains(&cell.style) {
                continue;
            }
            if let Some(code) = cell.style.num_fmt.as_deref() {
                match NumberFormat::from_code(code) {
                    Some(format) if !catalog.number_formats.contains(&format) => {
                        catalog.number_formats.push(format);
                    }
                    Some(_) => {}
                    None => debug!(code, "number format not representable, dropped on save"),
                }
            }
            catalog.styles.push(cell.style.clone());
        }
        catalog
    }

    pub(super) fn style_name(&self, style: &CellStyle) -> Option<String> {
        if style.is_default() {
            return None;
        }
        self.styles
            .iter()
            .position(|s| s == style)
            .map(|i| format!("ce{}", i + 1))
    }

    fn data_style_name(&self, code: &str) -> Option<String> {
        let format = NumberFormat::from_code(code)?;
        self.number_formats
            .iter()
            .position(|f| *f == format)
            .map(|i| format!("N{}", i + 1))
    }

    pub(super) fn render(&self, writer: &mut Writer<Cursor<Vec<u8>>>) -> Result<(), AppError> {
        writer.write_event(Event::Start(BytesStart::new("office:automatic-styles")))?;

        for (i, format) in self.number_formats.iter().enumerate() {
            let tag = if format.percent {
                "number:percentage-style"
            } else {
                "number:number-style"
            };
            let name = format!("N{}", i + 1);
            let mut start = BytesStart::new(tag);
            start.push_attribute(("style:name", name.as_str()));
            writer.write_event(Event::Start(start))?;

            let decimals = format.decimals.to_string();
            let mut number = BytesStart::new("number:number");
            number.push_attribute(("number:decimal-places", decimals.as_str()));
            number.push_attribute(("number:min-integer-digits", "1"));
            if format.grouping {
                number.push_attribute(("number:grouping", "true"));
            }
            writer.write_event(Event::Empty(number))?;

            if format.percent {
                writer.write_event(Event::Start(BytesStart::new("number:text")))?;
                writer.write_event(Event::Text(BytesText::new("%")))?;
                writer.write_event(Event::End(BytesEnd::new("number:text")))?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }

        for (i, style) in self.styles.iter().enumerate() {
            let name = format!("ce{}", i + 1);
            let mut start = BytesStart::new("style:style");
            start.push_attribute(("style:name", name.as_str()));
            start.push_attribute(("style:family", "table-cell"));
            start.push_attribute(("style:parent-style-name", "Default"));
            let data_style = style
                .num_fmt
                .as_deref()
                .and_then(|code| self.data_style_name(code));
            if let Some(data_style) = data_style.as_deref() {
                start.push_attribute(("style:data-style-name", data_style));
            }
            writer.write_event(Event::Start(start))?;

            if let Some(fill) = style.fill.as_deref() {
                let mut props = BytesStart::new("style:table-cell-properties");
                props.push_attribute(("fo:background-color", fill));
                writer.write_event(Event::Empty(props))?;
            }
            if style.bold.is_some() || style.font_color.is_some() {
                let mut props = BytesStart::new("style:text-properties");
                if let Some(bold) = style.bold {
                    props.push_attribute(("fo:font-weight", if bold { "bold" } else { "normal" }));
                }
                if let Some(color) = style.font_color.as_deref() {
                    props.push_attribute(("fo:color", color));
                }
                writer.write_event(Event::Empty(props))?;
            }
            writer.write_event(Event::End(BytesEnd::new("style:style")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("office:automatic-styles")))?;
        Ok(())
    }
}
