/*!
 * Report files and console output for filetools
 *
 * Renders the two text reports written by the audit and structure actions,
 * decides where they are written, and formats an action outcome for the
 * terminal using the tabled library.
 */

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};
use tracing::debug;

use crate::error::{FileToolsError, Result};
use crate::types::Outcome;

/// File name of the empty-file report
pub const EMPTY_FILES_REPORT: &str = "empty_files_log.txt";

/// File name of the folder structure report
pub const STRUCTURE_REPORT: &str = "folder_structure.txt";

const EMPTY_REPORT_HEADER: &str =
    "Empty files found (excluding common build/binary/temporary files):";
const RULE_WIDTH: usize = 60;

/// Render the empty-file report; `empty` is already sorted
pub fn render_empty_report(empty: &BTreeSet<String>) -> String {
    let mut out = String::new();
    out.push_str(EMPTY_REPORT_HEADER);
    out.push('\n');

    if empty.is_empty() {
        out.push_str("\n  No empty files found matching the criteria.\n");
        return out;
    }

    let rule = "=".repeat(RULE_WIDTH);
    out.push_str(&rule);
    out.push('\n');
    for path in empty {
        out.push_str("  ");
        out.push_str(path);
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("\nTotal empty files found: {}\n", empty.len()));
    out
}

/// Render the structure report: lines joined by newlines, no trailing newline
pub fn render_structure_report(lines: &[String]) -> String {
    lines.join("\n")
}

/// Folder a report goes to: `dest` when it is an existing folder, otherwise
/// the folder holding the running executable, otherwise the current folder.
pub fn resolve_output_dir(dest: Option<&Path>) -> PathBuf {
    if let Some(dest) = dest {
        if !dest.as_os_str().is_empty() && dest.is_dir() {
            return dest.to_path_buf();
        }
        debug!("Report destination {} is not a folder, using fallback", dest.display());
    }
    fallback_output_dir()
}

fn fallback_output_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Write (or overwrite) `file_name` inside `dir`
pub fn write_report(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, content).map_err(|source| FileToolsError::Report {
        path: path.clone(),
        source,
    })?;
    debug!("Wrote report {}", path.display());
    Ok(path)
}

/// Format of the console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
    /// Outcome serialized as pretty JSON
    Json,
}

/// Console reporter for action outcomes
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate the console text for an outcome
    pub fn generate_report(&self, outcome: &Outcome) -> Result<String> {
        match self.format {
            ReportFormat::ConsoleTable => Ok(self.create_summary_table(outcome)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, outcome: &Outcome) -> Result<()> {
        println!("{}", self.generate_report(outcome)?);
        Ok(())
    }

    fn create_summary_table(&self, outcome: &Outcome) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "Action".to_string(),
                value: outcome.action.to_string(),
            },
            SummaryRow {
                key: "Status".to_string(),
                value: outcome.status.to_string(),
            },
            SummaryRow {
                key: "Count".to_string(),
                value: outcome.count.to_string(),
            },
        ];

        if let Some(copy) = &outcome.copy {
            rows.push(SummaryRow {
                key: "Failed".to_string(),
                value: copy.failed.to_string(),
            });
            rows.push(SummaryRow {
                key: "Skipped (empty)".to_string(),
                value: copy.skipped_empty.to_string(),
            });
            rows.push(SummaryRow {
                key: "Skipped (unreadable)".to_string(),
                value: copy.skipped_unreadable.to_string(),
            });
        }

        if let Some(path) = &outcome.report_path {
            rows.push(SummaryRow {
                key: "Report".to_string(),
                value: path.display().to_string(),
            });
        }

        rows.push(SummaryRow {
            key: "Message".to_string(),
            value: outcome.message.clone(),
        });

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}
