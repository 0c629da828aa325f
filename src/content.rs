//! Rendered report content and the push protocol that replays it.
//!
//! The report engine lays a design out into pages of tables, rows, cells and
//! text. The emitter never walks that tree itself; it is driven by a
//! traversal that pushes one [`ContentEvent`] per node boundary into a
//! [`ContentEmitter`]. Start events arrive in pre-order, end events in the
//! matching post-order, and no two events are ever delivered concurrently.
//!
//! [`ReportContent`] is an in-memory rendition of the tree together with the
//! reference traversal, [`ReportContent::accept`]. Any other producer can
//! drive an emitter as long as it respects the same ordering.
//!
//! ## Examples
//!
//! ```rust
//! use report_csv::content::{CellContent, ComponentId, PageContent, ReportContent, RowContent, TableContent};
//!
//! let table = TableContent::new(ComponentId(10), Some("Sales"), 2).with_row(
//!     RowContent::new(ComponentId(11), 1)
//!         .with_cell(CellContent::text("East"))
//!         .with_cell(CellContent::text("100")),
//! );
//! let report = ReportContent::new().with_page(PageContent::new(1).with_table(table));
//! assert_eq!(report.pages.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Visibility format that hides an element in every viewer.
pub const FORMAT_TYPE_VIEWER: &str = "viewer";

/// Visibility format that hides an element in all output formats.
pub const FORMAT_TYPE_ALL: &str = "all";

/// Stable identity of a design element, shared by every rendered occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub u64);

/// The part of a computed style the emitter cares about.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default)]
    pub visible_format: Option<String>,
}

impl Style {
    /// A style hidden for the given output formats, e.g. `"viewer"` or `"all"`.
    pub fn hidden_for(format: impl Into<String>) -> Self {
        Style {
            visible_format: Some(format.into()),
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.visible_format.as_deref().is_some_and(|format| {
            format.contains(FORMAT_TYPE_VIEWER) || format.contains(FORMAT_TYPE_ALL)
        })
    }
}

/// Whether content carrying this style is hidden. A missing style is visible.
#[must_use]
pub fn is_hidden(style: Option<&Style>) -> bool {
    style.is_some_and(Style::is_hidden)
}

/// Kind of band a row was laid out in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    Header,
    Footer,
    Detail,
    Other,
}

/// Text-bearing leaf: a data value, a text item or a label.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub style: Option<Style>,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        TextContent {
            text: Some(text.into()),
            style: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

/// Content that may appear on a page or inside a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReportItemContent {
    Table(TableContent),
    Text(TextContent),
    Label(TextContent),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellContent {
    #[serde(default)]
    pub style: Option<Style>,
    #[serde(default)]
    pub children: Vec<ReportItemContent>,
}

impl CellContent {
    /// A visible cell holding a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        CellContent {
            style: None,
            children: vec![ReportItemContent::Text(TextContent::new(text))],
        }
    }

    /// A visible cell with no content at all.
    pub fn empty() -> Self {
        CellContent::default()
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: ReportItemContent) -> Self {
        self.children.push(item);
        self
    }
}

/// A rendered row.
///
/// `row_id` is the 0-based ordinal of the row inside its table; row 1 is the
/// first data row. `band` is the band the row sits in, if its parent is a band
/// at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowContent {
    pub id: ComponentId,
    pub row_id: usize,
    #[serde(default)]
    pub band: Option<BandKind>,
    #[serde(default)]
    pub cells: Vec<CellContent>,
}

impl RowContent {
    pub fn new(id: ComponentId, row_id: usize) -> Self {
        RowContent {
            id,
            row_id,
            band: None,
            cells: Vec::new(),
        }
    }

    #[must_use]
    pub fn in_band(mut self, band: BandKind) -> Self {
        self.band = Some(band);
        self
    }

    #[must_use]
    pub fn with_cell(mut self, cell: CellContent) -> Self {
        self.cells.push(cell);
        self
    }

    /// Appends one single-text cell per value.
    #[must_use]
    pub fn with_texts<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cells.extend(values.into_iter().map(CellContent::text));
        self
    }
}

/// One occurrence of a table on a page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableContent {
    pub id: ComponentId,
    #[serde(default)]
    pub name: Option<String>,
    pub column_count: usize,
    #[serde(default)]
    pub rows: Vec<RowContent>,
}

impl TableContent {
    pub fn new(id: ComponentId, name: Option<&str>, column_count: usize) -> Self {
        TableContent {
            id,
            name: name.map(str::to_string),
            column_count,
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_row(mut self, row: RowContent) -> Self {
        self.rows.push(row);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// 1-based page number.
    pub number: u32,
    #[serde(default)]
    pub children: Vec<ReportItemContent>,
}

impl PageContent {
    pub fn new(number: u32) -> Self {
        PageContent {
            number,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: TableContent) -> Self {
        self.children.push(ReportItemContent::Table(table));
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: ReportItemContent) -> Self {
        self.children.push(item);
        self
    }
}

/// A fully laid out report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportContent {
    #[serde(default)]
    pub pages: Vec<PageContent>,
}

impl ReportContent {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: PageContent) -> Self {
        self.pages.push(page);
        self
    }

    /// Replays the report into `emitter`, bracketed by `Start` and `End`.
    pub fn accept<E: ContentEmitter + ?Sized>(&self, emitter: &mut E) {
        emitter.handle(ContentEvent::Start);
        for page in &self.pages {
            emitter.handle(ContentEvent::StartPage(page));
            for item in &page.children {
                visit_item(item, emitter);
            }
            emitter.handle(ContentEvent::EndPage(page));
        }
        emitter.handle(ContentEvent::End);
    }
}

fn visit_item<E: ContentEmitter + ?Sized>(item: &ReportItemContent, emitter: &mut E) {
    match item {
        ReportItemContent::Table(table) => {
            emitter.handle(ContentEvent::StartTable(table));
            for row in &table.rows {
                emitter.handle(ContentEvent::StartRow(row));
                for cell in &row.cells {
                    emitter.handle(ContentEvent::StartCell(cell));
                    for child in &cell.children {
                        visit_item(child, emitter);
                    }
                    emitter.handle(ContentEvent::EndCell(cell));
                }
                emitter.handle(ContentEvent::EndRow(row));
            }
            emitter.handle(ContentEvent::EndTable(table));
        }
        ReportItemContent::Text(text) => emitter.handle(ContentEvent::StartText(text)),
        ReportItemContent::Label(label) => emitter.handle(ContentEvent::StartLabel(label)),
    }
}

/// One step of the push protocol.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContentEvent<'a> {
    Start,
    StartPage(&'a PageContent),
    EndPage(&'a PageContent),
    StartTable(&'a TableContent),
    EndTable(&'a TableContent),
    StartRow(&'a RowContent),
    EndRow(&'a RowContent),
    StartCell(&'a CellContent),
    EndCell(&'a CellContent),
    StartText(&'a TextContent),
    StartLabel(&'a TextContent),
    End,
}

/// Receiver of the push protocol.
pub trait ContentEmitter {
    fn handle(&mut self, event: ContentEvent<'_>);
}
