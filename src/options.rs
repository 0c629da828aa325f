//! Render options for CSV emission.
//!
//! This module provides types to customize the emitted output:
//!
//! - [`CsvOptions`]: Main configuration struct
//! - [`TableSelector`]: Which table of the report is exported
//!
//! Every option has a concrete default, so a report rendered with no options
//! at all exports the first table it meets, comma-separated, with delimiters
//! inside text replaced by a blank and lines ended by `\r\n`.
//!
//! ## Loading from render options
//!
//! `CsvOptions` deserializes from the same keys the report engine uses for its
//! render-option map, either in short camelCase form or with the
//! `csvRenderOption.` prefix:
//!
//! ```rust
//! use report_csv::{CsvOptions, TableSelector};
//!
//! let json = r#"{
//!     "csvRenderOption.exportTableByName": "Sales",
//!     "csvRenderOption.Delimiter": "|"
//! }"#;
//! let options: CsvOptions = serde_json::from_str(json).unwrap();
//!
//! assert_eq!(options.table, TableSelector::Named("Sales".to_string()));
//! assert_eq!(options.delimiter, "|");
//! assert_eq!(options.replace_delimiter_inside_text_with, " ");
//! ```

use crate::writer::{COMMA, CR};
use crate::{Error, Result};
use serde::Deserialize;

/// Table name that the report engine uses to mean "no explicit table".
pub const DEFAULT_TABLE: &str = "Default";

/// Selects the single table subtree that is written.
///
/// Exactly one table is ever eligible for output per run: either the first
/// table the traversal meets, or every occurrence of the table carrying the
/// requested name.
///
/// # Examples
///
/// ```rust
/// use report_csv::TableSelector;
///
/// assert_eq!(TableSelector::from(None), TableSelector::FirstTable);
/// assert_eq!(TableSelector::from(Some("Default".to_string())), TableSelector::FirstTable);
/// assert_eq!(
///     TableSelector::from(Some("Sales".to_string())),
///     TableSelector::Named("Sales".to_string())
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Option<String>")]
pub enum TableSelector {
    #[default]
    FirstTable,
    Named(String),
}

impl TableSelector {
    /// Returns the requested table name, if one was given.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            TableSelector::FirstTable => None,
            TableSelector::Named(name) => Some(name),
        }
    }
}

impl From<Option<String>> for TableSelector {
    fn from(name: Option<String>) -> Self {
        match name {
            Some(name) if name != DEFAULT_TABLE => TableSelector::Named(name),
            _ => TableSelector::FirstTable,
        }
    }
}

/// Configuration options for CSV emission.
///
/// # Examples
///
/// ```rust
/// use report_csv::CsvOptions;
///
/// // Defaults: first table, comma, blank replacement, no datatype row
/// let options = CsvOptions::new();
/// assert_eq!(options.delimiter, ",");
///
/// // Custom configuration
/// let options = CsvOptions::new()
///     .with_table("Sales")
///     .with_delimiter(";")
///     .with_replacement("_")
///     .with_datatype_row(true);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    #[serde(
        rename = "exportTableByName",
        alias = "csvRenderOption.exportTableByName"
    )]
    pub table: TableSelector,

    #[serde(rename = "delimiter", alias = "csvRenderOption.Delimiter")]
    pub delimiter: String,

    #[serde(
        rename = "replaceDelimiterInsideTextWith",
        alias = "csvRenderOption.replaceDelimiterInsideTextWith"
    )]
    pub replace_delimiter_inside_text_with: String,

    #[serde(
        rename = "showDatatypeInSecondRow",
        alias = "csvRenderOption.showDatatypeInSecondRow"
    )]
    pub show_datatype_in_second_row: bool,

    #[serde(rename = "lineTerminator", alias = "csvRenderOption.lineTerminator")]
    pub line_terminator: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            table: TableSelector::default(),
            delimiter: COMMA.to_string(),
            replace_delimiter_inside_text_with: " ".to_string(),
            show_datatype_in_second_row: false,
            line_terminator: CR.to_string(),
        }
    }
}

impl CsvOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts output to the table with this exact name.
    ///
    /// Passing `"Default"` restores the first-table behavior.
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>) -> Self {
        self.table = TableSelector::from(Some(name.into()));
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Sets the string that replaces the delimiter when it occurs inside text.
    #[must_use]
    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replace_delimiter_inside_text_with = replacement.into();
        self
    }

    /// Enables or disables the synthesized datatype row.
    #[must_use]
    pub fn with_datatype_row(mut self, show: bool) -> Self {
        self.show_datatype_in_second_row = show;
        self
    }

    /// Sets the row terminator.
    #[must_use]
    pub fn with_line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }

    /// Checks that the options describe a well-formed output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] when the delimiter or the line terminator
    /// is empty, or when the replacement string contains the delimiter.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(Error::invalid_option("delimiter", "must not be empty"));
        }
        if self.line_terminator.is_empty() {
            return Err(Error::invalid_option("lineTerminator", "must not be empty"));
        }
        if self
            .replace_delimiter_inside_text_with
            .contains(self.delimiter.as_str())
        {
            return Err(Error::invalid_option(
                "replaceDelimiterInsideTextWith",
                "must not contain the delimiter",
            ));
        }
        Ok(())
    }
}
