/*!
 * Core types shared by the filetools actions
 */

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// The three caller-facing actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Flatten and copy files into one folder
    Copy,
    /// Report zero-length files
    CheckEmpty,
    /// Render the filtered folder tree
    Structure,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Copy => "Copy Files",
            Self::CheckEmpty => "Check Empty Files",
            Self::Structure => "Generate Folder Structure",
        };
        f.write_str(name)
    }
}

/// Source and destination of a single copy, computed right before copying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPlan {
    /// File being copied
    pub source: PathBuf,
    /// Collision-free target inside the destination folder
    pub destination: PathBuf,
}

/// Counters gathered during a flattening copy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopySummary {
    /// Files written to the destination
    pub copied: usize,
    /// Files whose copy failed
    pub failed: usize,
    /// Zero-length files left out
    pub skipped_empty: usize,
    /// Files whose size could not be read
    pub skipped_unreadable: usize,
}

/// How an action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    /// Some files were copied, some failed
    Partial,
    Failed,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result handed back to the caller of an action
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub action: Action,
    pub status: OutcomeStatus,
    /// Human readable status line
    pub message: String,
    /// Files copied, empty files found, or tree lines written
    pub count: usize,
    /// Report file written by the action, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
    /// Copy counters, for the copy action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<CopySummary>,
}

impl Outcome {
    /// Outcome for an action that aborted before or during traversal
    pub fn failed(action: Action, message: impl Into<String>) -> Self {
        Self {
            action,
            status: OutcomeStatus::Failed,
            message: message.into(),
            count: 0,
            report_path: None,
            copy: None,
        }
    }
}
