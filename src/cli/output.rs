//! Output formatting utilities

use crate::application::export::{ExportFormat, ExportOutcome};
use crate::application::list_tags::TagSummary;
use crate::application::publish::PublishReport;
use std::path::Path;

/// Format the tag tree as an indented outline
pub fn format_tag_tree(tags: &[TagSummary]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for tag in tags {
        let indent = "  ".repeat(tag.level.saturating_sub(1));
        if tag.notes == 0 {
            output.push_str(&format!("{}{}\n", indent, tag.name));
        } else {
            output.push_str(&format!("{}{} ({})\n", indent, tag.name, tag.notes));
        }
    }
    output
}

/// Format configuration entries as `key = value` lines
pub fn format_config(entries: &[(&str, String)]) -> String {
    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut output = String::new();
    for (key, value) in entries {
        output.push_str(&format!("{:width$} = {}\n", key, value, width = width));
    }
    output
}

/// One-line result of an export command
pub fn format_export_outcome(outcome: &ExportOutcome, format: ExportFormat, output: &Path) -> String {
    match outcome {
        ExportOutcome::Written { count } => format!(
            "Exported {} notes as {} to {}",
            count,
            format.label(),
            output.display()
        ),
        ExportOutcome::NoFavorites { looked_for } => {
            format!("No favorites found (looked for {})", looked_for.join(", "))
        }
    }
}

/// Summarize a publish run
pub fn format_publish_report(report: &PublishReport) -> String {
    let mut output = String::new();
    for published in &report.outputs {
        output.push_str(&format!(
            "{:<26} {:>5}  {}\n",
            published.format.label(),
            published.count,
            published.path.display()
        ));
    }
    output.push_str(&format!("Index: {}\n", report.index.display()));
    output
}
