/*!
 * filetools - Flatten, audit and map source trees
 *
 * This library scans a directory tree under a fixed exclusion policy and
 * either copies its files flat into one folder, lists its empty files, or
 * renders its folder structure as text.
 */

pub mod audit;
pub mod config;
pub mod copier;
pub mod error;
pub mod exclusion;
pub mod operations;
pub mod report;
pub mod tree;
pub mod types;
pub mod walk;


// Re-export main components for easier access
pub use audit::EmptyFileAuditor;
pub use config::Config;
pub use copier::{CopyOptions, FlatCopier};
pub use error::{FileToolsError, Result};
pub use exclusion::ExclusionPolicy;
pub use operations::{check_empty_files, copy_files, generate_structure};
pub use report::{ReportFormat, Reporter};
pub use tree::TreeScanner;
pub use types::{Action, CopyPlan, CopySummary, Outcome, OutcomeStatus};
