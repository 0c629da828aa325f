//! The CSV serialization state machine.
//!
//! [`CsvEmitter`] consumes the push protocol of [`crate::content`] and decides,
//! event by event, what reaches the sink. It keeps just enough state across
//! events to guarantee the shape of the output:
//!
//! - **Table selection**: exactly one table is exported, either the first one
//!   the traversal meets or the one carrying the requested name. Rows of every
//!   other table are suppressed.
//! - **Separator discipline**: a written row of a table with `N` columns
//!   carries `N - 1` delimiters followed by one terminator, never a trailing
//!   delimiter.
//! - **Page de-duplication**: header band rows are only written on page 1,
//!   footer band rows are never written, and labels placed outside any row
//!   only appear on page 1.
//! - **Datatype row**: optionally, the declared datatypes of the exported
//!   columns are written once, right before the first data row.
//!
//! No handler ever fails. Anything the emitter cannot resolve makes it write
//! less. Sink write failures are logged and kept for [`CsvEmitter::take_error`],
//! close failures for [`CsvEmitter::take_close_error`].
//!
//! ## Examples
//!
//! ```rust
//! use report_csv::content::{ComponentId, PageContent, ReportContent, RowContent, TableContent};
//! use report_csv::{CsvEmitter, CsvOptions, ReportDesign};
//!
//! let report = ReportContent::new().with_page(PageContent::new(1).with_table(
//!     TableContent::new(ComponentId(1), None, 2)
//!         .with_row(RowContent::new(ComponentId(2), 1).with_texts(["East", "100"])),
//! ));
//!
//! let mut emitter = CsvEmitter::new(Vec::new(), ReportDesign::new(), CsvOptions::new()).unwrap();
//! report.accept(&mut emitter);
//!
//! let bytes = emitter.into_inner().unwrap();
//! assert_eq!(String::from_utf8(bytes).unwrap(), "East,100\r\n");
//! ```

use crate::content::{
    is_hidden, BandKind, CellContent, ComponentId, ContentEmitter, ContentEvent, PageContent,
    RowContent, TableContent, TextContent,
};
use crate::datatype::datatype_row;
use crate::design::DesignCatalog;
use crate::options::{CsvOptions, TableSelector, DEFAULT_TABLE};
use crate::writer::CsvWriter;
use crate::Result;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Counters describing a finished emission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitStats {
    /// Rows terminated in the output, the datatype row included.
    pub rows_written: usize,
    /// The requested table name, when the design holds no such element.
    pub missing_table: Option<String>,
}

#[derive(Debug)]
struct EmitterState {
    total_columns: usize,
    current_column: usize,
    is_first_page: bool,
    first_table: Option<ComponentId>,
    write_data: bool,
    output_current_table: bool,
    datatype_row_written: bool,
    row_depth: usize,
}

impl Default for EmitterState {
    fn default() -> Self {
        EmitterState {
            total_columns: 0,
            current_column: 0,
            is_first_page: true,
            first_table: None,
            write_data: true,
            output_current_table: false,
            datatype_row_written: false,
            row_depth: 0,
        }
    }
}

/// Streams report content into delimited text.
///
/// The sink is opened on [`ContentEvent::Start`] and closed on
/// [`ContentEvent::End`]. If the traversal aborts in between, dropping the
/// emitter still flushes and releases the sink.
pub struct CsvEmitter<W: Write, D: DesignCatalog> {
    writer: CsvWriter<W>,
    sink: Option<W>,
    design: D,
    options: CsvOptions,
    state: EmitterState,
    stats: EmitStats,
}

impl<W: Write, D: DesignCatalog> CsvEmitter<W, D> {
    /// Creates an emitter writing to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error when `options` fail [`CsvOptions::validate`].
    pub fn new(sink: W, design: D, options: CsvOptions) -> Result<Self> {
        options.validate()?;
        Ok(CsvEmitter {
            writer: CsvWriter::new(),
            sink: Some(sink),
            design,
            options,
            state: EmitterState::default(),
            stats: EmitStats::default(),
        })
    }

    #[must_use]
    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    #[must_use]
    pub fn stats(&self) -> &EmitStats {
        &self.stats
    }

    /// Takes the first sink failure seen while writing.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.writer.take_error()
    }

    /// Takes the failure raised while closing the sink, if any.
    pub fn take_close_error(&mut self) -> Option<io::Error> {
        self.writer.take_close_error()
    }

    /// Closes the output if still open and hands back the sink.
    pub fn into_inner(self) -> Option<W> {
        let CsvEmitter { writer, sink, .. } = self;
        match sink {
            Some(sink) => Some(sink),
            None => writer.into_inner(),
        }
    }

    fn start(&mut self) {
        debug!("Starting CSV emitter");
        self.state = EmitterState::default();
        self.stats = EmitStats::default();

        match self.sink.take() {
            Some(sink) => self.writer.open(sink),
            None => warn!("CSV emitter started twice, output stream already consumed"),
        }
    }

    fn end(&mut self) {
        debug!("CSV emitter end report");
        self.writer.close();

        if let TableSelector::Named(name) = &self.options.table {
            if !self.design.find_element(name) {
                warn!(
                    table = %name,
                    "{} Table not found in report design, blank report generated",
                    name
                );
                self.stats.missing_table = Some(name.clone());
            }
        }
    }

    fn start_page(&mut self, page: &PageContent) {
        debug!(page = page.number, "CSV emitter start page");
        self.state.is_first_page = page.number <= 1;
    }

    fn start_table(&mut self, table: &TableContent) {
        self.state.total_columns = table.column_count;
        let first_table = *self.state.first_table.get_or_insert(table.id);

        let name = table.name.as_deref();
        self.state.output_current_table = match &self.options.table {
            TableSelector::FirstTable => table.id == first_table || name == Some(DEFAULT_TABLE),
            TableSelector::Named(wanted) => name == Some(wanted.as_str()),
        };
        self.state.datatype_row_written = false;
    }

    fn start_row(&mut self, row: &RowContent) {
        self.state.write_data = self.state.output_current_table
            && !is_row_in_footer(row)
            && !self.is_row_in_header_except_first_page(row);

        if self.options.show_datatype_in_second_row
            && row.row_id == 1
            && self.state.write_data
            && !self.state.datatype_row_written
        {
            self.write_datatype_row(row);
        }

        self.state.current_column = 0;
        self.state.row_depth += 1;
    }

    fn start_text(&mut self, text: &TextContent) {
        if is_hidden(text.style.as_ref()) {
            debug!("Skipping hidden text");
            return;
        }

        if self.state.write_data {
            self.writer.text(
                text.text.as_deref(),
                &self.options.delimiter,
                &self.options.replace_delimiter_inside_text_with,
            );
            self.state.current_column += 1;
        }
    }

    // The page master repeats labels outside rows on every page. Labels in a
    // cell fill their column like any text.
    fn start_label(&mut self, label: &TextContent) {
        if self.state.is_first_page || self.state.row_depth > 0 {
            self.start_text(label);
        }
    }

    fn end_cell(&mut self, cell: &CellContent) {
        if is_hidden(cell.style.as_ref()) {
            debug!("Skipping hidden cell");
            return;
        }

        if self.state.write_data && self.state.current_column < self.state.total_columns {
            self.writer.close_tag(&self.options.delimiter);
        }
    }

    fn end_row(&mut self) {
        if self.state.write_data {
            self.writer.close_tag(&self.options.line_terminator);
            self.stats.rows_written += 1;
        }
        self.state.write_data = true;
        self.state.row_depth = self.state.row_depth.saturating_sub(1);
    }

    fn is_row_in_header_except_first_page(&self, row: &RowContent) -> bool {
        !self.state.is_first_page && row.band == Some(BandKind::Header)
    }

    fn write_datatype_row(&mut self, row: &RowContent) {
        let Some(datatypes) = datatype_row(&self.design, row.id) else {
            debug!(row = row.id.0, "No row definition for datatype row");
            return;
        };
        let Some(last) = datatypes.len().checked_sub(1) else {
            return;
        };

        for (i, datatype) in datatypes.iter().enumerate() {
            self.writer.text(
                datatype.as_deref(),
                &self.options.delimiter,
                &self.options.replace_delimiter_inside_text_with,
            );
            if i < last {
                self.writer.close_tag(&self.options.delimiter);
            } else {
                self.writer.close_tag(&self.options.line_terminator);
            }
        }

        self.state.datatype_row_written = true;
        self.stats.rows_written += 1;
    }
}

fn is_row_in_footer(row: &RowContent) -> bool {
    row.band == Some(BandKind::Footer)
}

impl<W: Write, D: DesignCatalog> ContentEmitter for CsvEmitter<W, D> {
    fn handle(&mut self, event: ContentEvent<'_>) {
        match event {
            ContentEvent::Start => self.start(),
            ContentEvent::StartPage(page) => self.start_page(page),
            ContentEvent::StartTable(table) => self.start_table(table),
            ContentEvent::StartRow(row) => self.start_row(row),
            ContentEvent::StartText(text) => self.start_text(text),
            ContentEvent::StartLabel(label) => self.start_label(label),
            ContentEvent::EndCell(cell) => self.end_cell(cell),
            ContentEvent::EndRow(_) => self.end_row(),
            ContentEvent::End => self.end(),
            ContentEvent::EndPage(_) | ContentEvent::EndTable(_) | ContentEvent::StartCell(_) => {}
        }
    }
}
