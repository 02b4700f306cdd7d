//! Count tables for the report.
//!
//! Rows are ordered by descending count. Ties keep the order in which each
//! group was first seen during aggregation.

use std::collections::HashMap;

use serde::Serialize;

use crate::{LocationPoint, Route};

/// A two-column `(label, count)` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    pub columns: (String, String),
    pub rows: Vec<(String, usize)>,
}

impl SummaryTable {
    pub fn total(&self) -> usize {
        self.rows.iter().map(|(_, n)| n).sum()
    }
}

/// Everything the report needs about the composed dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_locations: usize,
    pub categories: SummaryTable,
    /// Absent, not empty, when there are no routes
    pub route_types: Option<SummaryTable>,
}

/// Count occurrences of each key.
///
/// ```
/// use map_composer::summary::count_by;
///
/// let rows = count_by(["park", "museum", "park"]);
/// assert_eq!(rows, vec![("park".to_string(), 2), ("museum".to_string(), 1)]);
/// ```
pub fn count_by<K: AsRef<str>>(keys: impl IntoIterator<Item = K>) -> Vec<(String, usize)> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<(String, usize)> = Vec::new();

    for key in keys {
        let key = key.as_ref();
        match slots.get(key) {
            Some(&i) => rows[i].1 += 1,
            None => {
                slots.insert(key.to_string(), rows.len());
                rows.push((key.to_string(), 1));
            }
        }
    }

    // stable: equal counts stay in first-seen order
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// Locations per category (exact category strings).
pub fn category_table(points: &[LocationPoint]) -> SummaryTable {
    SummaryTable {
        columns: ("Category".to_string(), "Locations".to_string()),
        rows: count_by(points.iter().map(|p| p.category.as_str())),
    }
}

/// Routes per type, or `None` when there are no routes.
///
/// Surrounding whitespace of the type is ignored; case is kept.
pub fn route_type_table(routes: &[Route]) -> Option<SummaryTable> {
    if routes.is_empty() {
        return None;
    }
    Some(SummaryTable {
        columns: ("Route type".to_string(), "Routes".to_string()),
        rows: count_by(routes.iter().map(|r| r.route_type.trim())),
    })
}

pub fn summarize(points: &[LocationPoint], routes: &[Route]) -> Summary {
    Summary {
        total_locations: points.len(),
        categories: category_table(points),
        route_types: route_type_table(routes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(category: &str) -> LocationPoint {
        LocationPoint::new("p", category, 45.0, -122.0)
    }

    fn route(name: &str, route_type: &str) -> Route {
        Route {
            name: name.to_string(),
            route_type: route_type.to_string(),
            points: vec![],
        }
    }

    #[test]
    fn test_category_counts_descending() {
        let points = vec![point("park"), point("museum"), point("park")];
        let table = category_table(&points);
        assert_eq!(
            table.rows,
            vec![("park".to_string(), 2), ("museum".to_string(), 1)]
        );
        assert_eq!(table.columns.0, "Category");
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let rows = count_by(["b", "a", "c", "a", "b", "d"]);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_empty_points_give_empty_table() {
        let table = category_table(&[]);
        assert!(table.rows.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_no_routes_means_no_route_table() {
        let summary = summarize(&[point("park")], &[]);
        assert!(summary.route_types.is_none());
        assert_eq!(summary.total_locations, 1);
    }

    #[test]
    fn test_route_types_counted_per_route() {
        let routes = vec![route("A", "bus"), route("B", "tram "), route("C", "bus"), route("D", "tram")];
        let table = route_type_table(&routes).unwrap();
        assert_eq!(
            table.rows,
            vec![("bus".to_string(), 2), ("tram".to_string(), 2)]
        );
        assert_eq!(table.columns.1, "Routes");
    }
}
