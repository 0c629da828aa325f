//! Column datatype resolution for the datatype row.
//!
//! When enabled, the emitter writes one extra row in front of the first data
//! row of the exported table, listing each column's declared datatype. The
//! column order comes from the row's design definition: each cell's *first*
//! content item is inspected and, when it is a data item, its bound
//! result-set column names the slot. Any other first item (a label, a text, a
//! nested grid) contributes no slot, and later items in the same cell are
//! never looked at.
//!
//! Datatypes come from the result-set metadata of every data set in the
//! design, merged in declaration order so that a later data set overrides an
//! earlier one on a shared column name.

use crate::content::ComponentId;
use crate::design::{CellDesign, DesignCatalog, ReportItem};
use indexmap::IndexMap;

/// Bound column names of `cells`, left to right.
///
/// A data item with no binding still occupies a slot, as `None`.
#[must_use]
pub fn column_names_in_table_order(cells: &[CellDesign]) -> Vec<Option<String>> {
    cells
        .iter()
        .filter_map(|cell| match cell.first_content() {
            Some(ReportItem::Data { result_set_column }) => Some(result_set_column.clone()),
            _ => None,
        })
        .collect()
}

/// Column name to declared datatype, across every data set of the design.
#[must_use]
pub fn result_set_datatypes<D: DesignCatalog + ?Sized>(design: &D) -> IndexMap<String, String> {
    let mut datatypes = IndexMap::new();
    for data_set in design.data_sets() {
        for column in &data_set.result_set {
            datatypes.insert(column.column_name.clone(), column.data_type.clone());
        }
    }
    datatypes
}

/// Datatypes for the row rendered from design element `row`, one per slot.
///
/// Returns `None` when `row` does not resolve to a row definition. A slot is
/// `None` when its column is unbound or has no declared datatype.
#[must_use]
pub fn datatype_row<D: DesignCatalog + ?Sized>(
    design: &D,
    row: ComponentId,
) -> Option<Vec<Option<String>>> {
    let cells = design.row_cells(row)?;
    let columns = column_names_in_table_order(cells);
    let datatypes = result_set_datatypes(design);

    Some(
        columns
            .into_iter()
            .map(|column| column.and_then(|name| datatypes.get(&name).cloned()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{DataSetDesign, DesignElement, ReportDesign};

    fn design() -> ReportDesign {
        ReportDesign::new()
            .with_element(DesignElement::row(
                ComponentId(2),
                vec![
                    CellDesign::data("REGION"),
                    CellDesign::label("Amount"),
                    CellDesign::data("AMOUNT"),
                    CellDesign::data("NOTE"),
                ],
            ))
            .with_data_set(
                DataSetDesign::new("first")
                    .with_column("REGION", "string")
                    .with_column("AMOUNT", "integer"),
            )
            .with_data_set(DataSetDesign::new("second").with_column("AMOUNT", "decimal"))
    }

    #[test]
    fn test_only_first_content_counts() {
        let cells = vec![
            CellDesign::with_contents(vec![
                ReportItem::Label { text: None },
                ReportItem::Data {
                    result_set_column: Some("HIDDEN".to_string()),
                },
            ]),
            CellDesign::with_contents(vec![
                ReportItem::Data {
                    result_set_column: Some("A".to_string()),
                },
                ReportItem::Data {
                    result_set_column: Some("B".to_string()),
                },
            ]),
            CellDesign::default(),
        ];

        assert_eq!(
            column_names_in_table_order(&cells),
            vec![Some("A".to_string())]
        );
    }

    #[test]
    fn test_later_data_set_wins() {
        let datatypes = result_set_datatypes(&design());
        assert_eq!(datatypes.get("AMOUNT").map(String::as_str), Some("decimal"));
        assert_eq!(datatypes.len(), 2);
    }

    #[test]
    fn test_datatype_row_keeps_unknown_slots() {
        let row = datatype_row(&design(), ComponentId(2)).unwrap();
        assert_eq!(
            row,
            vec![
                Some("string".to_string()),
                Some("decimal".to_string()),
                None
            ]
        );
    }

    #[test]
    fn test_unresolved_row_is_skipped() {
        assert!(datatype_row(&design(), ComponentId(99)).is_none());
    }
}
