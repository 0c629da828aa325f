//! Property-based tests for the structural guarantees of the emitter.
//!
//! These cover what a fixed fixture cannot: separator discipline across
//! arbitrary column counts, cell contents and delimiters.

use proptest::prelude::*;
use report_csv::content::{ComponentId, PageContent, ReportContent, RowContent, TableContent};
use report_csv::writer::escape;
use report_csv::{to_string_with_options, CsvOptions, ReportDesign};

fn delimiter() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(",".to_string()),
        Just(";".to_string()),
        Just("\t".to_string()),
        Just("|".to_string()),
        Just("::".to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_escape_is_identity_without_delimiter(value in "[a-z0-9 ]{0,20}", delim in delimiter()) {
        prop_assume!(!value.contains(delim.as_str()));
        prop_assert_eq!(escape(&value, &delim, "_"), value.as_str());
    }

    #[test]
    fn prop_escape_removes_every_delimiter(value in "[a-z,;|:\t]{0,30}", delim in delimiter()) {
        let escaped = escape(&value, &delim, " ");
        prop_assert!(!escaped.contains(delim.as_str()));
    }

    #[test]
    fn prop_rows_have_exact_separator_count(
        rows in prop::collection::vec(prop::collection::vec("[a-z,;|\t]{0,8}", 1..6), 1..10),
        delim in delimiter(),
    ) {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let table = rows.iter().enumerate().fold(
            TableContent::new(ComponentId(1), None, columns),
            |table, (i, values)| {
                table.with_row(RowContent::new(ComponentId(2), i + 1).with_texts(values.clone()))
            },
        );
        let report = ReportContent::new().with_page(PageContent::new(1).with_table(table));

        let options = CsvOptions::new().with_delimiter(delim.clone()).with_line_terminator("\n");
        let csv = to_string_with_options(&report, ReportDesign::new(), options).unwrap();

        let lines: Vec<&str> = csv.split_terminator('\n').collect();
        prop_assert_eq!(lines.len(), rows.len());
        prop_assert!(csv.ends_with('\n'));
        for (line, values) in lines.iter().zip(&rows) {
            // A row with fewer cells than the table has columns gets one
            // separator per cell, still never past the last column.
            let expected = values.len().min(columns.saturating_sub(1));
            prop_assert_eq!(line.matches(delim.as_str()).count(), expected);
        }
    }
}
