/*!
 * Pruned directory walk shared by the copier and the auditor
 */

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::exclusion::ExclusionPolicy;

/// Whether an entry should be treated as a directory.
///
/// Symlinks are not followed, but a symlink pointing at a directory still
/// counts as one so it is never handed out as a file.
fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().to_string()
}

/// Walk `root` and yield every file that survives the exclusion policy.
///
/// Excluded directories are pruned before they are entered, so nothing
/// below them is ever read. Unreadable directories are logged and skipped.
pub fn walk_files<'a>(
    root: &'a Path,
    policy: &'a ExclusionPolicy,
) -> impl Iterator<Item = DirEntry> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            if entry.depth() == 0 || !is_directory(entry) {
                return true;
            }
            let keep = !policy.is_excluded_dir(&entry_name(entry));
            if !keep {
                debug!("Pruning excluded folder {}", entry.path().display());
            }
            keep
        })
        .filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| !is_directory(entry))
        .filter(move |entry| {
            let excluded = policy.is_excluded_file_path(entry.path());
            if excluded {
                debug!("Skipping excluded file {}", entry.path().display());
            }
            !excluded
        })
}

/// Path of `path` relative to `root`; `path` itself when it is not below `root`
pub fn relative_path(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

/// Relative path rendered with forward slashes
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
