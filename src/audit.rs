/*!
 * Empty-file audit
 */

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::exclusion::ExclusionPolicy;
use crate::walk::{relative_path, to_forward_slashes, walk_files};

/// Collects zero-length files below a folder
pub struct EmptyFileAuditor<'a> {
    policy: &'a ExclusionPolicy,
}

impl<'a> EmptyFileAuditor<'a> {
    pub fn new(policy: &'a ExclusionPolicy) -> Self {
        Self { policy }
    }

    /// Relative paths (forward slashes, sorted) of every non-excluded file of
    /// size zero. Files whose size cannot be read are left out.
    pub fn find_empty(&self, source: &Path) -> Result<BTreeSet<String>> {
        let mut empty = BTreeSet::new();

        for entry in walk_files(source, self.policy) {
            match fs::metadata(entry.path()) {
                Ok(metadata) if metadata.len() == 0 => {
                    empty.insert(to_forward_slashes(&relative_path(source, entry.path())));
                }
                Ok(_) => {}
                Err(e) => debug!("Skipping {}: cannot read size: {}", entry.path().display(), e),
            }
        }

        info!("Found {} empty files in {}", empty.len(), source.display());
        Ok(empty)
    }
}
