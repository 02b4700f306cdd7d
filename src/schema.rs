//! Schema validation at the dataset boundary.
//!
//! Raw tables carry arbitrary string columns. Validation happens once here:
//! a missing required *column* is fatal, while a row with a missing field or
//! a non-numeric coordinate is dropped and counted. Everything downstream
//! works on the typed entities in the crate root.

use std::collections::HashMap;

use log::info;

use crate::error::{ComposeError, Result};
use crate::{Landmark, LocationPoint, RouteSample};

/// Header plus string cells, as read from a spreadsheet export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Convenience constructor for literal tables.
    ///
    /// ```
    /// use map_composer::RawTable;
    /// let table = RawTable::from_rows(&["name", "latitude"], &[&["Park", "45.5"]]);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn from_rows(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    fn column_index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::new();
        for (i, name) in self.columns.iter().enumerate() {
            // first occurrence wins for duplicated headers
            index.entry(name.as_str()).or_insert(i);
        }
        index
    }
}

/// Required and numeric columns of one dataset.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub dataset: &'static str,
    pub required: &'static [&'static str],
    /// Required columns that must also parse as finite numbers
    pub numeric: &'static [&'static str],
}

pub const POINTS_SCHEMA: TableSchema = TableSchema {
    dataset: "points",
    required: &["name", "category", "latitude", "longitude"],
    numeric: &["latitude", "longitude"],
};

pub const ROUTES_SCHEMA: TableSchema = TableSchema {
    dataset: "routes",
    required: &["route_name", "route_type", "latitude", "longitude"],
    numeric: &["latitude", "longitude"],
};

pub const LANDMARKS_SCHEMA: TableSchema = TableSchema {
    dataset: "landmarks",
    required: &["name", "kind", "latitude", "longitude"],
    numeric: &["latitude", "longitude"],
};

/// A row that passed validation, with typed accessors by column name.
pub struct ValidRow<'a> {
    cells: &'a [String],
    index: &'a HashMap<&'a str, usize>,
}

impl<'a> ValidRow<'a> {
    /// Cell text exactly as read, `None` when absent or blank.
    pub fn text(&self, column: &str) -> Option<&'a str> {
        let i = *self.index.get(column)?;
        let value = self.cells.get(i)?.as_str();
        (!value.trim().is_empty()).then_some(value)
    }

    /// Finite numeric value of a column, `None` when absent or unparseable.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.text(column)?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn required_text(&self, column: &str) -> String {
        self.text(column).unwrap_or_default().to_string()
    }

    fn required_number(&self, column: &str) -> f64 {
        self.number(column).unwrap_or_default()
    }
}

/// Check the header against `schema`, then visit every row whose required
/// fields are present and whose numeric fields parse.
///
/// Fails with [`ComposeError::Schema`] naming every missing column (in schema
/// order). Rows failing the per-row checks are dropped silently apart from an
/// `info` log line with the counts.
pub fn validate_rows<T>(
    table: &RawTable,
    schema: &TableSchema,
    mut build: impl FnMut(&ValidRow<'_>) -> T,
) -> Result<Vec<T>> {
    let missing: Vec<String> = schema
        .required
        .iter()
        .filter(|col| !table.has_column(col))
        .map(|col| col.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ComposeError::Schema {
            dataset: schema.dataset.to_string(),
            missing,
        });
    }

    let index = table.column_index();
    let mut out = Vec::with_capacity(table.len());

    for cells in &table.rows {
        let row = ValidRow { cells, index: &index };
        let complete = schema.required.iter().all(|col| row.text(col).is_some());
        let numeric = schema.numeric.iter().all(|col| row.number(col).is_some());
        if complete && numeric {
            out.push(build(&row));
        }
    }

    let dropped = table.len() - out.len();
    if dropped > 0 {
        info!(
            "[schema] dropped {} of {} {} rows with missing or non-numeric fields",
            dropped,
            table.len(),
            schema.dataset
        );
    }

    Ok(out)
}

/// Validate a points table into [`LocationPoint`]s.
pub fn validate_points(table: &RawTable) -> Result<Vec<LocationPoint>> {
    validate_rows(table, &POINTS_SCHEMA, |row| LocationPoint {
        name: row.required_text("name"),
        category: row.required_text("category"),
        latitude: row.required_number("latitude"),
        longitude: row.required_number("longitude"),
        description: row.text("description").map(str::to_string),
    })
}

/// Validate a routes table into [`RouteSample`]s.
///
/// Without a `seq` column every sample gets sequence 0, so row order decides.
pub fn validate_routes(table: &RawTable) -> Result<Vec<RouteSample>> {
    let has_seq = table.has_column("seq");
    validate_rows(table, &ROUTES_SCHEMA, |row| RouteSample {
        route_name: row.required_text("route_name"),
        route_type: row.required_text("route_type"),
        sequence: if has_seq { row.number("seq") } else { Some(0.0) },
        latitude: row.required_number("latitude"),
        longitude: row.required_number("longitude"),
    })
}

/// Validate a landmarks table into [`Landmark`]s.
pub fn validate_landmarks(table: &RawTable) -> Result<Vec<Landmark>> {
    validate_rows(table, &LANDMARKS_SCHEMA, |row| Landmark {
        name: row.required_text("name"),
        kind: row.required_text("kind"),
        latitude: row.required_number("latitude"),
        longitude: row.required_number("longitude"),
    })
}
