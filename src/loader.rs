//! CSV loading for the points, routes and landmarks datasets.
//!
//! Points are mandatory. Routes and landmarks are optional: a missing file
//! reads as an empty dataset.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::{debug, info};

use crate::error::{ComposeError, Result};
use crate::schema::{self, RawTable};
use crate::{Landmark, LocationPoint, RouteSample};

/// Parse CSV with a header row into a [`RawTable`].
///
/// Header names are trimmed; cell values are kept verbatim. Rows shorter
/// than the header are accepted and their trailing fields read as absent.
///
/// ```
/// use map_composer::loader::read_table;
/// let csv = "name,category,latitude,longitude\nPark,park,45.5,-122.6\n";
/// let table = read_table(csv.as_bytes()).unwrap();
/// assert_eq!(table.columns().len(), 4);
/// assert_eq!(table.len(), 1);
/// ```
pub fn read_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns: Vec<String> = rdr.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }

    debug!("[loader] read {} rows with columns {:?}", rows.len(), columns);
    Ok(RawTable::new(columns, rows))
}

/// Read a CSV file; a missing file is an error.
pub fn load_table(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| ComposeError::io(path, e))?;
    read_table(file)
}

/// Read a CSV file that may legitimately not exist.
pub fn load_optional_table(path: &Path) -> Result<Option<RawTable>> {
    match File::open(path) {
        Ok(file) => read_table(file).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("[loader] {} not found, treating as empty", path.display());
            Ok(None)
        }
        Err(e) => Err(ComposeError::io(path, e)),
    }
}

pub fn load_points(path: &Path) -> Result<Vec<LocationPoint>> {
    schema::validate_points(&load_table(path)?)
}

pub fn load_routes(path: &Path) -> Result<Vec<RouteSample>> {
    match load_optional_table(path)? {
        Some(table) => schema::validate_routes(&table),
        None => Ok(Vec::new()),
    }
}

pub fn load_landmarks(path: &Path) -> Result<Vec<Landmark>> {
    match load_optional_table(path)? {
        Some(table) => schema::validate_landmarks(&table),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn missing_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("map-composer-missing-{}-{}.csv", std::process::id(), name))
    }

    #[test]
    fn test_read_table_trims_headers_only() {
        let csv = " name , category,latitude,longitude\n Park ,park,45.5,-122.6\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.columns()[0], "name");
        let points = schema::validate_points(&table).unwrap();
        assert_eq!(points[0].name, " Park ");
    }

    #[test]
    fn test_read_table_short_rows() {
        let csv = "name,category,latitude,longitude\nA,park,45.5\nB,park,45.6,-122.6\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        let points = schema::validate_points(&table).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_read_table_header_only() {
        let table = read_table("route_name,route_type,latitude,longitude\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(schema::validate_routes(&table).unwrap().is_empty());
    }

    #[test]
    fn test_missing_points_file_is_error() {
        let err = load_points(&missing_path("points")).unwrap_err();
        assert!(matches!(err, ComposeError::Io { .. }));
    }

    #[test]
    fn test_missing_routes_file_is_empty() {
        let routes = load_routes(&missing_path("routes")).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn test_missing_landmarks_file_is_empty() {
        assert!(load_optional_table(&missing_path("landmarks")).unwrap().is_none());
        assert!(load_landmarks(&missing_path("landmarks")).unwrap().is_empty());
    }
}
