//! Exporting one table of a paginated report as CSV.
//!
//! Run with: cargo run --example export_table

use report_csv::content::{BandKind, ComponentId, PageContent, ReportContent, RowContent, TableContent};
use report_csv::design::{CellDesign, DataSetDesign, DesignElement};
use report_csv::{to_string_with_options, CsvOptions, ReportDesign};
use std::error::Error;

fn page(number: u32, rows: &[(&str, &str)], first_row_id: usize) -> PageContent {
    let header = RowContent::new(ComponentId(11), 0)
        .in_band(BandKind::Header)
        .with_texts(["Region", "Amount"]);
    let footer = RowContent::new(ComponentId(13), 0)
        .in_band(BandKind::Footer)
        .with_texts(["Page total", "n/a"]);

    let table = rows.iter().enumerate().fold(
        TableContent::new(ComponentId(10), Some("Sales"), 2).with_row(header),
        |table, (i, (region, amount))| {
            table.with_row(
                RowContent::new(ComponentId(12), first_row_id + i)
                    .in_band(BandKind::Detail)
                    .with_texts([*region, *amount]),
            )
        },
    );

    PageContent::new(number).with_table(table.with_row(footer))
}

fn main() -> Result<(), Box<dyn Error>> {
    let report = ReportContent::new()
        .with_page(page(1, &[("East", "100"), ("North, upper", "150")], 1))
        .with_page(page(2, &[("West", "200")], 3));

    let design = ReportDesign::new()
        .with_element(DesignElement::table(ComponentId(10), "Sales"))
        .with_element(DesignElement::row(
            ComponentId(12),
            vec![CellDesign::data("REGION"), CellDesign::data("AMOUNT")],
        ))
        .with_data_set(
            DataSetDesign::new("sales")
                .with_column("REGION", "string")
                .with_column("AMOUNT", "decimal"),
        );

    // Default options: first table, comma, header once, no footers
    let csv = to_string_with_options(&report, &design, CsvOptions::new())?;
    println!("Default:\n{}", csv);

    // Named table, semicolon, datatype row ahead of the data
    let options = CsvOptions::new()
        .with_table("Sales")
        .with_delimiter(";")
        .with_datatype_row(true)
        .with_line_terminator("\n");
    let csv = to_string_with_options(&report, &design, options)?;
    println!("With datatypes:\n{}", csv);

    // A table that does not exist yields an empty export and a warning
    let csv = to_string_with_options(&report, &design, CsvOptions::new().with_table("Ghost"))?;
    println!("Missing table: {:?}", csv);

    Ok(())
}
