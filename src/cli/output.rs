//! Plain-text rendering of list state, tree rows and summaries.

use serde_json::Value;

use crate::features::territory::{ExpandedSet, TreeRow};
use crate::features::tracking::{LocationPoint, RouteSummary};
use crate::shared::types::Pagination;

const MAX_CELL_WIDTH: usize = 40;

/// Left-aligned table with a dashed rule under the header
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate(cell)).collect())
        .collect();

    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(format_row(headers));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        out.push(format_row(row));
    }
    out.join("\n")
}

fn truncate(cell: &str) -> String {
    let single_line = cell.replace('\n', " ");
    if single_line.chars().count() <= MAX_CELL_WIDTH {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(MAX_CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("[{}]", items.len()),
        other => other.to_string(),
    }
}

/// Table over serialized rows: `id_field` and `name_field` first, then the
/// remaining scalar fields in key order
pub fn render_items(items: &[Value], id_field: &str, name_field: &str) -> String {
    let mut headers = vec![id_field.to_string(), name_field.to_string()];
    for item in items {
        if let Value::Object(map) = item {
            for (key, value) in map {
                if !value.is_object() && !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|h| item.get(h).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();

    render_table(&headers, &rows)
}

pub fn render_pagination(pagination: &Pagination) -> String {
    format!(
        "Page {} of {} ({} total, {} per page)",
        pagination.page,
        pagination.total_pages.max(1),
        pagination.total,
        pagination.limit
    )
}

/// Indented tree rows; `+`/`-` mark collapsed/expanded nodes with children
pub fn render_tree(rows: &[&TreeRow], expanded: &ExpandedSet) -> String {
    rows.iter()
        .map(|row| {
            let marker = match (row.has_children, expanded.contains(&row.key)) {
                (false, _) => ' ',
                (true, true) => '-',
                (true, false) => '+',
            };
            let code = row
                .code
                .as_deref()
                .map(|c| format!(" [{}]", c))
                .unwrap_or_default();
            format!(
                "{}{} {}{}  ({}, {})",
                "  ".repeat(row.level),
                marker,
                row.name,
                code,
                row.node_type.label(),
                row.key
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_route(points: &[LocationPoint], summary: &RouteSummary) -> String {
    let headers = ["Recorded At", "Latitude", "Longitude", "Speed", "Address"]
        .map(String::from)
        .to_vec();
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| {
            vec![
                p.recorded_at.clone().unwrap_or_default(),
                format!("{:.6}", p.latitude),
                format!("{:.6}", p.longitude),
                p.speed.map(|s| format!("{:.1}", s)).unwrap_or_default(),
                p.address.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let mut out = render_table(&headers, &rows);
    out.push_str(&format!(
        "\n\n{} points, {:.2} km",
        summary.point_count,
        summary.distance_km()
    ));
    if let Some(max) = summary.max_speed {
        out.push_str(&format!(", max speed {:.1} km/h", max));
    }
    out
}
