//! # report_csv
//!
//! A streaming CSV emitter for paginated report content.
//!
//! ## What does it do?
//!
//! A report engine lays a report design out into pages: tables split across
//! pages, header bands repeated on every page, footers, labels. This crate
//! flattens that layout back into plain delimited text, one line per table
//! row, the way a spreadsheet user expects it.
//!
//! ## Key Features
//!
//! - **One table per export**: the first table encountered, or a table chosen
//!   by name
//! - **Page de-duplication**: the header row is written once, footers are
//!   dropped
//! - **Exact separators**: `N - 1` delimiters per row, no trailing delimiter,
//!   one terminator
//! - **Datatype row**: optionally, the declared datatype of each column is
//!   written ahead of the first data row
//! - **Never fails mid-stream**: unresolvable content writes less instead of
//!   aborting
//!
//! ## Quick Start
//!
//! ```rust
//! use report_csv::content::{ComponentId, PageContent, ReportContent, RowContent, TableContent};
//! use report_csv::{to_string_with_options, CsvOptions, ReportDesign};
//!
//! let sales = TableContent::new(ComponentId(1), Some("Sales"), 2)
//!     .with_row(RowContent::new(ComponentId(2), 1).with_texts(["East", "100"]))
//!     .with_row(RowContent::new(ComponentId(2), 2).with_texts(["West", "200"]));
//! let report = ReportContent::new().with_page(PageContent::new(1).with_table(sales));
//!
//! let options = CsvOptions::new().with_table("Sales");
//! let csv = to_string_with_options(&report, &ReportDesign::new(), options).unwrap();
//! assert_eq!(csv, "East,100\r\nWest,200\r\n");
//! ```
//!
//! ## Driving the emitter from another engine
//!
//! The emitter is a push-style state machine. Any traversal that delivers
//! [`ContentEvent`]s in document order can drive it through
//! [`ContentEmitter::handle`]; [`ReportContent::accept`] is the reference
//! traversal.
//!
//! ## Output format
//!
//! - Fields are joined by the delimiter (default `,`)
//! - Delimiters inside text are replaced (default: a single blank), nothing
//!   is quoted
//! - Every row ends with the line terminator (default `\r\n`)
//! - UTF-8, no byte-order mark
//!
//! Run the demo with: `cargo run --example export_table`

pub mod content;
pub mod datatype;
pub mod design;
pub mod emitter;
pub mod error;
pub mod options;
pub mod writer;

pub use content::{ContentEmitter, ContentEvent, ReportContent};
pub use design::{DesignCatalog, ReportDesign};
pub use emitter::{CsvEmitter, EmitStats};
pub use error::{Error, Result};
pub use options::{CsvOptions, TableSelector};
pub use writer::CsvWriter;

use std::io;

/// Render `report` as CSV text with default options.
///
/// # Errors
///
/// Returns an error if the default options are rejected, which cannot happen
/// in practice.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<D>(report: &ReportContent, design: D) -> Result<String>
where
    D: DesignCatalog,
{
    to_string_with_options(report, design, CsvOptions::default())
}

/// Render `report` as CSV text with custom options.
///
/// # Errors
///
/// Returns an error if `options` fail validation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<D>(
    report: &ReportContent,
    design: D,
    options: CsvOptions,
) -> Result<String>
where
    D: DesignCatalog,
{
    let mut buffer = Vec::with_capacity(256);
    to_writer_with_options(&mut buffer, report, design, options)?;
    String::from_utf8(buffer).map_err(Error::custom)
}

/// Render `report` as CSV into `writer` with default options.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, D>(writer: W, report: &ReportContent, design: D) -> Result<()>
where
    W: io::Write,
    D: DesignCatalog,
{
    to_writer_with_options(writer, report, design, CsvOptions::default())
}

/// Render `report` as CSV into `writer` with custom options.
///
/// The whole report is streamed before any sink failure is reported: the
/// emitter stops writing at the first failed write and the error surfaces
/// here. A failure while closing the writer is only logged.
///
/// # Errors
///
/// Returns an error if `options` fail validation or writing to the writer
/// fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, D>(
    writer: W,
    report: &ReportContent,
    design: D,
    options: CsvOptions,
) -> Result<()>
where
    W: io::Write,
    D: DesignCatalog,
{
    let mut emitter = CsvEmitter::new(writer, design, options)?;
    report.accept(&mut emitter);
    match emitter.take_error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
