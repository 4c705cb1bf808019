/*!
 * Flattening copy of a source tree into a single folder
 *
 * Every non-excluded file lands directly in the destination folder. Names
 * either keep the bare file name or encode the relative path, and never
 * overwrite anything already present: a `_1`, `_2`, ... suffix is inserted
 * before the extension until a free name is found.
 */

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use crate::error::{FileToolsError, Result};
use crate::exclusion::{split_extension, ExclusionPolicy};
use crate::types::{CopyPlan, CopySummary};
use crate::walk::{relative_path, walk_files};

/// Characters replaced by `_` when a relative path becomes a file name
const UNSAFE_NAME_CHARS: [char; 7] = [':', '*', '?', '"', '<', '>', '|'];

/// Options controlling a flattening copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    /// Encode the path relative to the source into the copied file name
    pub use_relative_naming: bool,
    /// Leave zero-length files out of the copy
    pub skip_empty: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            use_relative_naming: true,
            skip_empty: true,
        }
    }
}

/// Copier for flattening a tree into one folder
pub struct FlatCopier<'a> {
    policy: &'a ExclusionPolicy,
    options: CopyOptions,
    progress: ProgressBar,
}

impl<'a> FlatCopier<'a> {
    pub fn new(policy: &'a ExclusionPolicy, options: CopyOptions, progress: ProgressBar) -> Self {
        Self {
            policy,
            options,
            progress,
        }
    }

    /// Copy every eligible file of `source` into `dest`.
    ///
    /// Both folders must already be validated (see [`validate_source`] and
    /// [`prepare_destination`]). Per-file failures are logged and counted in
    /// the returned summary; they never abort the copy.
    pub fn copy(&self, source: &Path, dest: &Path) -> Result<CopySummary> {
        let mut summary = CopySummary::default();

        for entry in walk_files(source, self.policy) {
            let path = entry.path();

            let metadata = match fs::metadata(path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!("Skipping {}: cannot read size: {}", path.display(), e);
                    summary.skipped_unreadable += 1;
                    continue;
                }
            };
            if metadata.len() == 0 && self.options.skip_empty {
                debug!("Skipping empty file {}", path.display());
                summary.skipped_empty += 1;
                continue;
            }

            let plan = self.plan(source, path, dest);
            self.progress
                .set_message(format!("Copying {}", plan.source.display()));

            match copy_with_metadata(&plan, &metadata) {
                Ok(()) => {
                    debug!(
                        "Copied {} -> {}",
                        plan.source.display(),
                        plan.destination.display()
                    );
                    summary.copied += 1;
                    self.progress.inc(1);
                }
                Err(e) => {
                    warn!("Could not copy file {}: {}", plan.source.display(), e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Copied {} files from {} ({} failed)",
            summary.copied,
            source.display(),
            summary.failed
        );
        Ok(summary)
    }

    /// Work out where `file` goes inside `dest`
    pub fn plan(&self, source: &Path, file: &Path, dest: &Path) -> CopyPlan {
        let name = if self.options.use_relative_naming {
            OsString::from(flatten_relative_path(&relative_path(source, file)))
        } else {
            file.file_name().unwrap_or_default().to_os_string()
        };

        CopyPlan {
            source: file.to_path_buf(),
            destination: unique_destination(&dest.join(name)),
        }
    }
}

/// Turn a relative path into a single file name.
///
/// Path separators and the characters `: * ? " < > |` all become `_`.
pub fn flatten_relative_path(relative: &Path) -> String {
    relative
        .to_string_lossy()
        .chars()
        .map(|c| {
            if std::path::is_separator(c) || UNSAFE_NAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// First free path among `path`, `stem_1.ext`, `stem_2.ext`, ...
///
/// A name is free only when nothing at all sits there, dangling symlinks
/// included, so a copy never writes through an existing link.
pub fn unique_destination(path: &Path) -> PathBuf {
    if is_free(path) {
        return path.to_path_buf();
    }

    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let (stem, extension) = split_extension(&file_name);
    let mut counter: u64 = 1;
    loop {
        let candidate = path.with_file_name(format!("{}_{}{}", stem, counter, extension));
        if is_free(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

fn is_free(path: &Path) -> bool {
    fs::symlink_metadata(path).is_err()
}

/// Copy content and permissions, then carry over access and modification
/// times from `metadata`, read from the source before the copy
fn copy_with_metadata(plan: &CopyPlan, metadata: &fs::Metadata) -> io::Result<()> {
    fs::copy(&plan.source, &plan.destination)?;

    let atime = FileTime::from_last_access_time(metadata);
    let mtime = FileTime::from_last_modification_time(metadata);
    if let Err(e) = filetime::set_file_times(&plan.destination, atime, mtime) {
        warn!(
            "Copied {} but could not preserve timestamps: {}",
            plan.destination.display(),
            e
        );
    }
    Ok(())
}

/// Source must be a non-empty path naming an existing directory
pub fn validate_source(source: &Path) -> Result<()> {
    if source.as_os_str().is_empty() || !source.is_dir() {
        return Err(FileToolsError::InvalidSource(source.to_path_buf()));
    }
    Ok(())
}

/// Make sure `dest` is a usable directory, creating it when missing
pub fn prepare_destination(dest: Option<&Path>) -> Result<PathBuf> {
    let dest = match dest {
        Some(dest) if !dest.as_os_str().is_empty() => dest,
        _ => return Err(FileToolsError::MissingDestination),
    };

    if !dest.exists() {
        fs::create_dir_all(dest).map_err(|source| FileToolsError::CreateDestination {
            path: dest.to_path_buf(),
            source,
        })?;
        info!("Created destination folder {}", dest.display());
    }
    if !dest.is_dir() {
        return Err(FileToolsError::DestinationNotDirectory(dest.to_path_buf()));
    }
    Ok(dest.to_path_buf())
}
