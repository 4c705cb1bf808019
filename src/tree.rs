/*!
 * Folder structure scanning
 *
 * Produces the indented text tree written to `folder_structure.txt`. No tree
 * is kept in memory: lines are appended to one output buffer, depth first,
 * each carrying its own indentation.
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, ResultExt};
use crate::exclusion::ExclusionPolicy;

const BRANCH: &str = "├──";
const LAST_BRANCH: &str = "└──";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// Line emitted in place of the children of a folder that cannot be listed
pub const PERMISSION_DENIED: &str = "[Permission Denied]";

/// A filtered child of a folder, listed in the tree
#[derive(Debug)]
struct TreeEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Scanner rendering the filtered folder tree
pub struct TreeScanner<'a> {
    policy: &'a ExclusionPolicy,
}

impl<'a> TreeScanner<'a> {
    pub fn new(policy: &'a ExclusionPolicy) -> Self {
        Self { policy }
    }

    /// Scan `root` and return the display lines, header first
    pub fn scan(&self, root: &Path) -> Result<Vec<String>> {
        let mut lines = vec![format!("{}/", root_name(root)?)];
        self.scan_directory(root, "", &mut lines)?;
        debug!("Rendered {} structure lines for {}", lines.len(), root.display());
        Ok(lines)
    }

    fn scan_directory(&self, dir: &Path, indent: &str, lines: &mut Vec<String>) -> Result<()> {
        let entries = match self.list_entries(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                warn!("Permission denied listing {}", dir.display());
                lines.push(format!("{}{} {}", indent, LAST_BRANCH, PERMISSION_DENIED));
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let count = entries.len();
        for (i, entry) in entries.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let prefix = if is_last { LAST_BRANCH } else { BRANCH };

            if entry.is_dir {
                lines.push(format!("{}{} {}/", indent, prefix, entry.name));
                let child_indent = format!(
                    "{}{}",
                    indent,
                    if is_last { SPACE_INDENT } else { PIPE_INDENT }
                );
                self.scan_directory(&entry.path, &child_indent, lines)?;
            } else {
                lines.push(format!("{}{} {}", indent, prefix, entry.name));
            }
        }

        Ok(())
    }

    /// Immediate children of `dir` that survive the exclusion policy, sorted
    /// by name with folders and files interleaved.
    ///
    /// Entries are classified by their target: a symlink to a folder is a
    /// folder, a dangling symlink or special file is dropped.
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();

        for result in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = result.map_err(walk_to_io)?;
            let name = entry.file_name().to_string_lossy().to_string();
            let path = entry.path().to_path_buf();

            // Follow links the way a plain stat would
            let Ok(metadata) = fs::metadata(&path) else {
                debug!("Skipping unresolvable entry {}", path.display());
                continue;
            };

            if metadata.is_dir() {
                if !self.policy.is_excluded_dir(&name) {
                    entries.push(TreeEntry { name, path, is_dir: true });
                }
            } else if metadata.is_file() && !self.policy.is_excluded_file_path(&path) {
                entries.push(TreeEntry { name, path, is_dir: false });
            }
        }

        Ok(entries)
    }
}

/// Keep the io error kind so permission failures stay recognisable
fn walk_to_io(err: walkdir::Error) -> io::Error {
    match err.io_error() {
        Some(io_err) => io::Error::new(io_err.kind(), err.to_string()),
        None => io::Error::new(io::ErrorKind::Other, err.to_string()),
    }
}

/// Base name of the scan root, resolving `.` and similar through the filesystem
fn root_name(root: &Path) -> Result<String> {
    if let Some(name) = root.file_name() {
        return Ok(name.to_string_lossy().to_string());
    }
    let resolved = fs::canonicalize(root)
        .with_context(|| format!("Failed to resolve {}", root.display()))?;
    Ok(resolved
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string())
}
