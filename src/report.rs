// src/report.rs
//! Output formatting for discovered groups.

use crate::types::Group;

/// One line per group: space-separated member ids.
#[must_use]
pub fn format_terminal(groups: &[Group]) -> String {
    let mut out = String::new();
    for group in groups {
        let line: Vec<String> = group.ids.iter().map(u32::to_string).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// JSON array of id arrays, one per group.
#[must_use]
pub fn format_json(groups: &[Group]) -> String {
    let ids: Vec<&Vec<u32>> = groups.iter().map(|g| &g.ids).collect();
    serde_json::to_string_pretty(&ids).unwrap_or_else(|_| "[]".to_string())
}

/// Dispatches on the requested format name.
#[must_use]
pub fn format_report(groups: &[Group], format: &str) -> String {
    match format {
        "json" => format_json(groups),
        _ => format_terminal(groups),
    }
}
