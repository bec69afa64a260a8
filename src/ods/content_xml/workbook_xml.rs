use super::styles_xml::{AutomaticStyles, StyleCatalog};
use super::*;

/// Cell being read between its start and end tags.
struct PendingCell {
    cell: Cell,
    repeat: usize,
    formula: Option<String>,
    text_is_value: bool,
    paragraphs: usize,
    note_paragraphs: usize,
}

impl PendingCell {
    fn push_text(&mut self, text: &str, in_annotation: bool) {
        if in_annotation {
            let note = self.cell.note.get_or_insert_with(String::new);
            note.push_str(text);
            return;
        }
        if !self.text_is_value {
            return;
        }
        match &mut self.cell.value {
            CellValue::String(existing) => existing.push_str(text),
            CellValue::Empty => self.cell.value = CellValue::String(text.to_string()),
            _ => {}
        }
    }

    fn start_paragraph(&mut self, in_annotation: bool) {
        // Paragraphs after the first become line breaks.
        if in_annotation {
            if self.note_paragraphs > 0 {
                self.push_text("\n", true);
            }
            self.note_paragraphs += 1;
        } else {
            if self.paragraphs > 0 {
                self.push_text("\n", false);
            }
            self.paragraphs += 1;
        }
    }

    fn finish(mut self) -> (Cell, usize) {
        if let Some(formula) = self.formula.take() {
            let result = std::mem::replace(&mut self.cell.value, CellValue::Empty);
            self.cell.value = CellValue::Formula {
                formula,
                result: Box::new(result),
            };
        }
        (self.cell, self.repeat)
    }
}

/// Appends cells to a row, holding back runs of blank cells until something
/// non-blank follows so trailing repeated padding never materializes.
#[derive(Default)]
struct RowBuilder {
    cells: Vec<Cell>,
    pending_blank: usize,
}

impl RowBuilder {
    fn push(&mut self, cell: Cell, repeat: usize) {
        if cell == Cell::empty() {
            self.pending_blank += repeat;
            return;
        }
        self.cells
            .extend(std::iter::repeat(Cell::empty()).take(self.pending_blank));
        self.pending_blank = 0;
        self.cells.extend(std::iter::repeat(cell).take(repeat));
    }
}

#[derive(Default)]
struct SheetBuilder {
    sheet: Option<Sheet>,
    pending_blank_rows: usize,
}

impl SheetBuilder {
    fn push_rows(&mut self, cells: Vec<Cell>, repeat: usize) {
        let Some(sheet) = self.sheet.as_mut() else {
            return;
        };
        if cells.is_empty() {
            self.pending_blank_rows += repeat;
            return;
        }
        for _ in 0..self.pending_blank_rows {
            sheet.rows.push(Vec::new());
        }
        self.pending_blank_rows = 0;
        for _ in 0..repeat {
            sheet.rows.push(cells.clone());
        }
    }
}

impl ContentXml {
    pub fn parse(content: &str) -> Result<Workbook, AppError> {
        // Only the subset the sheet model carries: tables, rows, cells, text, notes and styles.
        let styles = AutomaticStyles::parse(content)?;
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);
        let mut sheets: Vec<Sheet> = Vec::new();

        let mut current = SheetBuilder::default();
        let mut current_row: Option<(RowBuilder, usize)> = None;
        let mut current_cell: Option<PendingCell> = None;
        let mut in_text_p = false;
        let mut in_annotation = false;

        loop {
            let event = reader.read_event()?;
            let decoder = reader.decoder();
            match event {
                Event::Start(e) if Self::is_local_name_bytes(e.name().as_ref(), b"table") => {
                    let name = Self::attr_value(&e, b"name", decoder)
                        .unwrap_or_else(|| "Sheet1".to_string());
                    current = SheetBuilder {
                        sheet: Some(Sheet::new(name)),
                        pending_blank_rows: 0,
                    };
                }
                Event::Empty(e) if Self::is_local_name_bytes(e.name().as_ref(), b"table") => {
                    let name = Self::attr_value(&e, b"name", decoder)
                        .unwrap_or_else(|| "Sheet1".to_string());
                    sheets.push(Sheet::new(name));
                }
                Event::End(e) if Self::is_local_name_bytes(e.name().as_ref(), b"table") => {
                    if let Some(sheet) = current.sheet.take() {
                        sheets.push(sheet);
                    }
                }
                Event::Start(e) if Self::is_local_name_bytes(e.name().as_ref(), b"table-row") => {
                    let repeat = Self::attr_repeat(&e, b"number-rows-repeated", decoder);
                    current_row = Some((RowBuilder::default(), repeat));
                }
                Event::Empty(e) if Self::is_local_name_bytes(e.name().as_ref(), b"table-row") => {
                    let repeat = Self::attr_repeat(&e, b"number-rows-repeated", decoder);
                    current.push_rows(Vec::new(), repeat);
                }
                Event::End(e) if Self::is_local_name_bytes(e.name().as_ref(), b"table-row") => {
                    if let Some((row, repeat)) = current_row.take() {
                        current.push_rows(row.cells, repeat);
                    }
                }
                Event::Empty(e)
                    if Self::is_local_name_bytes(e.name().as_ref(), b"table-cell")
                        || Self::is_local_name_bytes(e.name().as_ref(), b"covered-table-cell") =>
                {
                    if let Some((row, _)) = current_row.as_mut() {
                        let (cell, repeat) = Self::start_cell(&e, decoder, &styles).finish();
                        row.push(cell, repeat);
                    }
                }
                Event::Start(e)
                    if Self::is_local_name_bytes(e.name().as_ref(), b"table-cell")
                        || Self::is_local_name_bytes(e.name().as_ref(), b"covered-table-cell") =>
                {
                    current_cell = Some(Self::start_cell(&e, decoder, &styles));
                }
                Event::End(e)
                    if Self::is_local_name_bytes(e.name().as_ref(), b"table-cell")
                        || Self::is_local_name_bytes(e.name().as_ref(), b"covered-table-cell") =>
                {
                    if let (Some((row, _)), Some(pending)) =
                        (current_row.as_mut(), current_cell.take())
                    {
                        let (cell, repeat) = pending.finish();
                        row.push(cell, repeat);
                    }
                    in_text_p = false;
                    in_annotation = false;
                }
                Event::Start(e) if Self::is_local_name_bytes(e.name().as_ref(), b"annotation") => {
                    in_annotation = true;
                }
                Event::End(e) if Self::is_local_name_bytes(e.name().as_ref(), b"annotation") => {
                    in_annotation = false;
                }
                Event::Start(e) if Self::is_local_name_bytes(e.name().as_ref(), b"p") => {
                    in_text_p = true;
                    if let Some(pending) = current_cell.as_mut() {
                        pending.start_paragraph(in_annotation);
                    }
                }
                Event::Empty(e) if Self::is_local_name_bytes(e.name().as_ref(), b"p") => {
                    if let Some(pending) = current_cell.as_mut() {
                        pending.start_paragraph(in_annotation);
                    }
                }
                Event::End(e) if Self::is_local_name_bytes(e.name().as_ref(), b"p") => {
                    in_text_p = false;
                }
                Event::Empty(e) if in_text_p && Self::is_local_name_bytes(e.name().as_ref(), b"s") => {
                    // <text:s text:c="n"/> encodes runs of spaces.
                    let count = Self::attr_repeat(&e, b"c", decoder);
                    if let Some(pending) = current_cell.as_mut() {
                        pending.push_text(&" ".repeat(count), in_annotation);
                    }
                }
                Event::Text(text) if in_text_p => {
                    let t = text.unescape()?;
                    if let Some(pending) = current_cell.as_mut() {
                        pending.push_text(&t, in_annotation);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Workbook {
            sheets,
            active_sheet: 0,
        })
    }

    pub fn render(workbook: &Workbook) -> Result<String, AppError> {
        // Writes the workbook model back to ODS content.xml syntax.
        let catalog = StyleCatalog::collect(workbook);
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("office:document-content");
        for (prefix, ns) in [
            ("xmlns:office", "urn:oasis:names:tc:opendocument:xmlns:office:1.0"),
            ("xmlns:style", "urn:oasis:names:tc:opendocument:xmlns:style:1.0"),
            ("xmlns:text", "urn:oasis:names:tc:opendocument:xmlns:text:1.0"),
            ("xmlns:table", "urn:oasis:names:tc:opendocument:xmlns:table:1.0"),
            ("xmlns:number", "urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0"),
            (
                "xmlns:fo",
                "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0",
            ),
            ("xmlns:of", "urn:oasis:names:tc:opendocument:xmlns:of:1.2"),
            (
                "xmlns:calcext",
                "urn:org:documentfoundation:names:experimental:calc:xmlns:calcext:1.0",
            ),
        ] {
            root.push_attribute((prefix, ns));
        }
        root.push_attribute(("office:version", "1.2"));
        writer.write_event(Event::Start(root))?;

        catalog.render(&mut writer)?;

        writer.write_event(Event::Start(BytesStart::new("office:body")))?;
        writer.write_event(Event::Start(BytesStart::new("office:spreadsheet")))?;

        for sheet in &workbook.sheets {
            let mut table = BytesStart::new("table:table");
            table.push_attribute(("table:name", sheet.name.as_str()));
            writer.write_event(Event::Start(table))?;

            for row in &sheet.rows {
                if row.is_empty() {
                    // A row must hold at least one cell to be valid ODF.
                    writer.write_event(Event::Start(BytesStart::new("table:table-row")))?;
                    writer.write_event(Event::Empty(BytesStart::new("table:table-cell")))?;
                    writer.write_event(Event::End(BytesEnd::new("table:table-row")))?;
                    continue;
                }
                writer.write_event(Event::Start(BytesStart::new("table:table-row")))?;
                for cell in row {
                    Self::write_cell(&mut writer, cell, &catalog)?;
                }
                writer.write_event(Event::End(BytesEnd::new("table:table-row")))?;
            }

            writer.write_event(Event::End(BytesEnd::new("table:table")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("office:spreadsheet")))?;
        writer.write_event(Event::End(BytesEnd::new("office:body")))?;
        writer.write_event(Event::End(BytesEnd::new("office:document-content")))?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| AppError::XmlParseError(e.to_string()))
    }

    fn write_cell(
        writer: &mut Writer<Cursor<Vec<u8>>>,
        cell: &Cell,
        catalog: &StyleCatalog,
    ) -> Result<(), AppError> {
        let mut cell_tag = BytesStart::new("table:table-cell");
        if let Some(style_name) = catalog.style_name(&cell.style) {
            cell_tag.push_attribute(("table:style-name", style_name.as_str()));
        }

        let scalar = match &cell.value {
            CellValue::Formula { formula, result } => {
                cell_tag.push_attribute(("table:formula", formula.as_str()));
                result.as_ref()
            }
            other => other,
        };
        let text = match scalar {
            CellValue::String(v) => {
                cell_tag.push_attribute(("office:value-type", "string"));
                Some(v.clone())
            }
            CellValue::Number(v) => {
                let n = v.to_string();
                let percent = cell.style.num_fmt.as_deref().is_some_and(|f| f.ends_with('%'));
                let value_type = if percent { "percentage" } else { "float" };
                cell_tag.push_attribute(("office:value-type", value_type));
                cell_tag.push_attribute(("office:value", n.as_str()));
                scalar.text()
            }
            CellValue::Boolean(v) => {
                cell_tag.push_attribute(("office:value-type", "boolean"));
                cell_tag.push_attribute(("office:boolean-value", if *v { "true" } else { "false" }));
                scalar.text()
            }
            CellValue::Date(v) => {
                cell_tag.push_attribute(("office:value-type", "date"));
                cell_tag.push_attribute(("office:date-value", v.as_str()));
                Some(v.clone())
            }
            CellValue::Formula { .. } | CellValue::Empty => None,
        };

        if text.is_none() && cell.note.is_none() {
            writer.write_event(Event::Empty(cell_tag))?;
            return Ok(());
        }

        writer.write_event(Event::Start(cell_tag))?;
        if let Some(note) = cell.note.as_deref() {
            writer.write_event(Event::Start(BytesStart::new("office:annotation")))?;
            Self::write_paragraphs(writer, note)?;
            writer.write_event(Event::End(BytesEnd::new("office:annotation")))?;
        }
        if let Some(text) = text.as_deref() {
            Self::write_paragraphs(writer, text)?;
        }
        writer.write_event(Event::End(BytesEnd::new("table:table-cell")))?;
        Ok(())
    }

    fn start_cell(
        e: &BytesStart<'_>,
        decoder: quick_xml::encoding::Decoder,
        styles: &AutomaticStyles,
    ) -> PendingCell {
        let style = Self::attr_value(e, b"style-name", decoder)
            .map(|name| styles.resolve(&name))
            .unwrap_or_default();
        let (value, text_is_value) = Self::value_from_attrs(e, decoder);
        PendingCell {
            cell: Cell {
                value,
                style,
                note: None,
            },
            repeat: Self::attr_repeat(e, b"number-columns-repeated", decoder),
            formula: Self::attr_value(e, b"formula", decoder),
            text_is_value,
            paragraphs: 0,
            note_paragraphs: 0,
        }
    }

    /// Typed value from the cell attributes, plus whether paragraph text should
    /// become the value (string cells without `office:string-value`).
    fn value_from_attrs(
        e: &BytesStart<'_>,
        decoder: quick_xml::encoding::Decoder,
    ) -> (CellValue, bool) {
        let value_type = Self::attr_value(e, b"value-type", decoder);
        match value_type.as_deref() {
            Some("float") | Some("percentage") | Some("currency") => {
                let value = Self::attr_value(e, b"value", decoder)
                    .and_then(|v| v.parse::<f64>().ok())
                    .map(CellValue::Number)
                    .unwrap_or(CellValue::Empty);
                (value, false)
            }
            Some("boolean") => {
                let value = Self::attr_value(e, b"boolean-value", decoder)
                    .map(|v| CellValue::Boolean(v.eq_ignore_ascii_case("true")))
                    .unwrap_or(CellValue::Empty);
                (value, false)
            }
            Some("date") => {
                let value = Self::attr_value(e, b"date-value", decoder)
                    .map(CellValue::Date)
                    .unwrap_or(CellValue::Empty);
                (value, false)
            }
            Some("string") => match Self::attr_value(e, b"string-value", decoder) {
                Some(v) => (CellValue::String(v), false),
                None => (CellValue::Empty, true),
            },
            _ => (CellValue::Empty, false),
        }
    }
}
