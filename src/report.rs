//! HTML summary report embedding the map by reference.

use std::fs;
use std::path::Path;

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::info;

use crate::error::{ComposeError, Result};
use crate::render::fill_template;
use crate::summary::{Summary, SummaryTable};

/// Render one count table.
pub fn table_html(table: &SummaryTable) -> String {
    let mut html = String::from("<table class=\"summary-table\">\n  <thead>\n    <tr>");
    html.push_str(&format!(
        "<th>{}</th><th>{}</th>",
        encode_text(&table.columns.0),
        encode_text(&table.columns.1)
    ));
    html.push_str("</tr>\n  </thead>\n  <tbody>\n");
    for (label, count) in &table.rows {
        html.push_str(&format!(
            "    <tr><td>{}</td><td>{}</td></tr>\n",
            encode_text(label),
            count
        ));
    }
    html.push_str("  </tbody>\n</table>");
    html
}

/// Summary section: the category table, then the route type table when
/// routes exist.
pub fn summary_html(summary: &Summary) -> String {
    let mut parts = vec![table_html(&summary.categories)];
    if let Some(route_types) = &summary.route_types {
        parts.push("<h3>Route types</h3>".to_string());
        parts.push(table_html(route_types));
    }
    parts.join("\n")
}

/// Full report page pointing an iframe at `map_file`.
///
/// ```
/// use map_composer::{build_report, summarize, LocationPoint};
///
/// let points = vec![LocationPoint::new("Library", "civic", 45.518, -122.678)];
/// let html = build_report(&summarize(&points, &[]), "city_map_base.html", "Locations");
/// assert!(html.contains(r#"<iframe src="city_map_base.html"></iframe>"#));
/// assert!(!html.contains("Route types"));
/// ```
pub fn build_report(summary: &Summary, map_file: &str, title: &str) -> String {
    let title = encode_text(title);
    let map_file = encode_double_quoted_attribute(map_file);
    let total = summary.total_locations.to_string();
    let tables = summary_html(summary);
    fill_template(
        REPORT_TEMPLATE,
        &[
            ("__TITLE__", &*title),
            ("__MAP_FILE__", &*map_file),
            ("__TOTAL__", total.as_str()),
            ("__SUMMARY__", tables.as_str()),
        ],
    )
}

pub fn write_report(summary: &Summary, map_file: &str, title: &str, path: &Path) -> Result<()> {
    fs::write(path, build_report(summary, map_file, title)).map_err(|e| ComposeError::io(path, e))?;
    info!("[report] saved {}", path.display());
    Ok(())
}

const REPORT_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>__TITLE__</title>
  <style>
    body { font-family: system-ui, -apple-system, "Segoe UI", sans-serif; margin: 0; background: #f7f7f7; color: #222; }
    .page { max-width: 1100px; margin: 0 auto; padding: 2rem 1.5rem 3rem; background: #fff; }
    .meta { color: #777; font-size: 0.9rem; }
    .map-wrapper { margin: 1.5rem 0; border: 1px solid #ddd; height: 520px; }
    .map-wrapper iframe { width: 100%; height: 100%; border: 0; }
    table.summary-table { border-collapse: collapse; margin-top: 0.75rem; font-size: 0.9rem; }
    table.summary-table th, table.summary-table td { padding: 0.4rem 0.8rem; border-bottom: 1px solid #eee; text-align: left; }
    table.summary-table th { background: #f2f2f2; }
  </style>
</head>
<body>
  <div class="page">
    <h1>__TITLE__</h1>
    <p class="meta">Total locations: <strong>__TOTAL__</strong></p>
    <div class="map-wrapper">
      <iframe src="__MAP_FILE__"></iframe>
    </div>
    <h2>Summary</h2>
__SUMMARY__
  </div>
</body>
</html>
"#;
