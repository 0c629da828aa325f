//! The report design catalog.
//!
//! The rendered content only says *what* was laid out. What a column *is*
//! (its declared datatype, the result-set column a data item is bound to)
//! lives in the report design. The emitter reads it through the
//! [`DesignCatalog`] trait, and [`ReportDesign`] is an in-memory catalog that
//! can be built in code or deserialized from JSON.
//!
//! ## Examples
//!
//! ```rust
//! use report_csv::content::ComponentId;
//! use report_csv::design::{CellDesign, DataSetDesign, DesignCatalog, DesignElement, ReportDesign};
//!
//! let design = ReportDesign::new()
//!     .with_element(DesignElement::table(ComponentId(1), "Sales"))
//!     .with_element(DesignElement::row(
//!         ComponentId(2),
//!         vec![CellDesign::data("REGION"), CellDesign::data("AMOUNT")],
//!     ))
//!     .with_data_set(
//!         DataSetDesign::new("sales")
//!             .with_column("REGION", "string")
//!             .with_column("AMOUNT", "decimal"),
//!     );
//!
//! assert!(design.find_element("Sales"));
//! assert_eq!(design.row_cells(ComponentId(2)).map(|cells| cells.len()), Some(2));
//! ```

use crate::content::ComponentId;
use serde::{Deserialize, Serialize};

/// Read access to a report design.
pub trait DesignCatalog {
    /// Whether the design holds an element with this exact name.
    fn find_element(&self, name: &str) -> bool;

    /// The cell definitions of the row element with this id, left to right.
    ///
    /// Returns `None` when the id is unknown or does not denote a row.
    fn row_cells(&self, id: ComponentId) -> Option<&[CellDesign]>;

    /// Every data set declared in the design, in declaration order.
    fn data_sets(&self) -> &[DataSetDesign];
}

impl<D: DesignCatalog + ?Sized> DesignCatalog for &D {
    fn find_element(&self, name: &str) -> bool {
        (**self).find_element(name)
    }

    fn row_cells(&self, id: ComponentId) -> Option<&[CellDesign]> {
        (**self).row_cells(id)
    }

    fn data_sets(&self) -> &[DataSetDesign] {
        (**self).data_sets()
    }
}

/// A report item placed in a cell definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReportItem {
    /// A data item, optionally bound to a result-set column.
    Data {
        #[serde(default, rename = "resultSetColumn")]
        result_set_column: Option<String>,
    },
    Label {
        #[serde(default)]
        text: Option<String>,
    },
    Text {
        #[serde(default)]
        content: Option<String>,
    },
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellDesign {
    #[serde(default)]
    pub contents: Vec<ReportItem>,
}

impl CellDesign {
    /// A cell whose only content is a data item bound to `column`.
    pub fn data(column: impl Into<String>) -> Self {
        CellDesign {
            contents: vec![ReportItem::Data {
                result_set_column: Some(column.into()),
            }],
        }
    }

    /// A cell whose only content is a label.
    pub fn label(text: impl Into<String>) -> Self {
        CellDesign {
            contents: vec![ReportItem::Label {
                text: Some(text.into()),
            }],
        }
    }

    pub fn with_contents(contents: Vec<ReportItem>) -> Self {
        CellDesign { contents }
    }

    /// The first content item; the only one the datatype row looks at.
    #[must_use]
    pub fn first_content(&self) -> Option<&ReportItem> {
        self.contents.first()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementKind {
    Table,
    Row {
        #[serde(default)]
        cells: Vec<CellDesign>,
    },
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignElement {
    pub id: ComponentId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl DesignElement {
    pub fn table(id: ComponentId, name: impl Into<String>) -> Self {
        DesignElement {
            id,
            name: Some(name.into()),
            kind: ElementKind::Table,
        }
    }

    pub fn row(id: ComponentId, cells: Vec<CellDesign>) -> Self {
        DesignElement {
            id,
            name: None,
            kind: ElementKind::Row { cells },
        }
    }
}

/// One column of a data set's declared result set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSetColumn {
    pub column_name: String,
    pub data_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetDesign {
    pub name: String,
    #[serde(default)]
    pub result_set: Vec<ResultSetColumn>,
}

impl DataSetDesign {
    pub fn new(name: impl Into<String>) -> Self {
        DataSetDesign {
            name: name.into(),
            result_set: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>, data_type: impl Into<String>) -> Self {
        self.result_set.push(ResultSetColumn {
            column_name: column.into(),
            data_type: data_type.into(),
        });
        self
    }
}

/// In-memory report design.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDesign {
    #[serde(default)]
    pub elements: Vec<DesignElement>,
    #[serde(default)]
    pub data_sets: Vec<DataSetDesign>,
}

impl ReportDesign {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_element(mut self, element: DesignElement) -> Self {
        self.elements.push(element);
        self
    }

    #[must_use]
    pub fn with_data_set(mut self, data_set: DataSetDesign) -> Self {
        self.data_sets.push(data_set);
        self
    }

    #[must_use]
    pub fn element(&self, id: ComponentId) -> Option<&DesignElement> {
        self.elements.iter().find(|element| element.id == id)
    }
}

impl DesignCatalog for ReportDesign {
    fn find_element(&self, name: &str) -> bool {
        self.elements
            .iter()
            .any(|element| element.name.as_deref() == Some(name))
    }

    fn row_cells(&self, id: ComponentId) -> Option<&[CellDesign]> {
        match &self.element(id)?.kind {
            ElementKind::Row { cells } => Some(cells),
            _ => None,
        }
    }

    fn data_sets(&self) -> &[DataSetDesign] {
        &self.data_sets
    }
}
