/*!
 * Caller-facing actions
 *
 * Each action takes its inputs explicitly, validates them, runs one
 * traversal and returns an [`Outcome`]. Setup problems come back as `Err`
 * before anything is read; failures during the traversal or while writing
 * the report come back as a failed `Outcome`, leaving whatever was already
 * written on disk.
 */

use std::path::Path;

use indicatif::ProgressBar;
use tracing::{error, info};

use crate::audit::EmptyFileAuditor;
use crate::copier::{prepare_destination, validate_source, CopyOptions, FlatCopier};
use crate::error::Result;
use crate::exclusion::ExclusionPolicy;
use crate::report::{
    render_empty_report, render_structure_report, resolve_output_dir, write_report,
    EMPTY_FILES_REPORT, STRUCTURE_REPORT,
};
use crate::tree::TreeScanner;
use crate::types::{Action, CopySummary, Outcome, OutcomeStatus};

/// Flatten-copy `source` into `dest`
pub fn copy_files(
    policy: &ExclusionPolicy,
    source: &Path,
    dest: Option<&Path>,
    options: CopyOptions,
    progress: ProgressBar,
) -> Result<Outcome> {
    validate_source(source)?;
    let dest = prepare_destination(dest)?;

    let copier = FlatCopier::new(policy, options, progress);
    let outcome = match copier.copy(source, &dest) {
        Ok(summary) => copy_outcome(summary),
        Err(e) => {
            error!("Copy of {} aborted: {}", source.display(), e);
            Outcome::failed(Action::Copy, format!("An error occurred during copy: {}", e))
        }
    };
    Ok(outcome)
}

/// Status for a finished copy, telling partial success apart from total failure
pub fn copy_outcome(summary: CopySummary) -> Outcome {
    let (status, message) = match (summary.copied, summary.failed) {
        (copied, 0) => (
            OutcomeStatus::Success,
            format!("Files copied successfully! ({} files)", copied),
        ),
        (0, failed) => (
            OutcomeStatus::Failed,
            format!("Copy failed: none of {} files could be copied", failed),
        ),
        (copied, failed) => (
            OutcomeStatus::Partial,
            format!("Copied {} files, {} failed", copied, failed),
        ),
    };

    Outcome {
        action: Action::Copy,
        status,
        message,
        count: summary.copied,
        report_path: None,
        copy: Some(summary),
    }
}

/// Write `empty_files_log.txt` listing the zero-length files of `source`
pub fn check_empty_files(
    policy: &ExclusionPolicy,
    source: &Path,
    dest: Option<&Path>,
) -> Result<Outcome> {
    validate_source(source)?;

    let result = EmptyFileAuditor::new(policy)
        .find_empty(source)
        .and_then(|empty| {
            let dir = resolve_output_dir(dest);
            let path = write_report(&dir, EMPTY_FILES_REPORT, &render_empty_report(&empty))?;
            Ok((empty.len(), path))
        });

    let outcome = match result {
        Ok((count, path)) => {
            info!("Empty file log saved to {}", path.display());
            Outcome {
                action: Action::CheckEmpty,
                status: OutcomeStatus::Success,
                message: format!("Empty file check complete. Log saved to: {}", path.display()),
                count,
                report_path: Some(path),
                copy: None,
            }
        }
        Err(e) => {
            error!("Empty file check of {} failed: {}", source.display(), e);
            Outcome::failed(
                Action::CheckEmpty,
                format!("An error occurred while scanning for empty files: {}", e),
            )
        }
    };
    Ok(outcome)
}

/// Write `folder_structure.txt` with the filtered tree of `source`
pub fn generate_structure(
    policy: &ExclusionPolicy,
    source: &Path,
    dest: Option<&Path>,
) -> Result<Outcome> {
    validate_source(source)?;

    let result = TreeScanner::new(policy).scan(source).and_then(|lines| {
        let dir = resolve_output_dir(dest);
        let path = write_report(&dir, STRUCTURE_REPORT, &render_structure_report(&lines))?;
        Ok((lines.len(), path))
    });

    let outcome = match result {
        Ok((count, path)) => {
            info!("Folder structure saved to {}", path.display());
            Outcome {
                action: Action::Structure,
                status: OutcomeStatus::Success,
                message: format!("Folder structure generated: {}", path.display()),
                count,
                report_path: Some(path),
                copy: None,
            }
        }
        Err(e) => {
            error!("Structure scan of {} failed: {}", source.display(), e);
            Outcome::failed(
                Action::Structure,
                format!("An error occurred while generating structure: {}", e),
            )
        }
    };
    Ok(outcome)
}
