/*!
 * Exclusion policy shared by every traversal
 *
 * Folder and file names match case-sensitively. Extensions are compared in
 * lowercase and include the leading dot (`.log`). Entries that contain glob
 * metacharacters (`*.egg-info`) are matched as patterns, everything else by
 * plain equality.
 */

use std::collections::HashSet;
use std::path::Path;

use glob_match::glob_match;
use once_cell::sync::Lazy;

/// Folders skipped by every action, together with their whole subtree
pub static DEFAULT_EXCLUDED_FOLDERS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        ".svn",
        ".hg",
        // Python
        "__pycache__",
        "venv",
        ".venv",
        "*.egg-info",
        ".pytest_cache",
        ".mypy_cache",
        ".tox",
        "site-packages",
        // Node.js
        "node_modules",
        // Build & Dist
        "build",
        "dist",
        "target",
        "bin",
        "obj",
        "out",
        "builds",
        // IDEs & Editors
        ".vscode",
        ".idea",
        ".project",
        ".settings",
        // OS Files & Caches
        ".DS_Store",
        ".cache",
        // Common project structures
        "uploads",
        "logs",
        "data",
        "instance",
        "temp",
        "tmp",
        // Framework output
        "coverage",
        "static",
        "media",
    ]
});

/// Extensions skipped by every action, lowercase with the leading dot
pub static DEFAULT_EXCLUDED_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Databases
        ".db", ".sqlite", ".sqlite3", ".mdb",
        // Logs
        ".log",
        // Keys & Certificates
        ".pem", ".key", ".crt", ".cer", ".p12", ".pfx",
        // Images
        ".ico", ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".tiff", ".svg",
        // Executables & Packages
        ".exe", ".dll", ".so", ".o", ".a", ".lib",
        ".pyc", ".pyo", ".pyd",
        ".class", ".jar",
        ".toc", ".pyz", ".spec", ".pkg",
        // Archives
        ".zip", ".tar", ".gz", ".bz2", ".7z", ".rar",
        // Documents & Media
        ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
        ".mp3", ".mp4", ".avi", ".mov", ".wav", ".flv", ".wmv",
        // Fonts
        ".ttf", ".otf", ".woff", ".woff2",
        // Backup & Swap
        ".bak", ".swp", ".swo",
    ]
});

/// File names skipped by every action
pub static DEFAULT_EXCLUDED_FILES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // OS Files
        ".DS_Store",
        "Thumbs.db",
        // Lock files
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "poetry.lock",
        "Pipfile.lock",
        // Environment files
        ".env",
    ]
});

/// A set of names matched either exactly or, for glob-like entries, as patterns
#[derive(Debug, Clone, Default)]
struct NameSet {
    exact: HashSet<String>,
    patterns: Vec<String>,
}

impl NameSet {
    fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for name in names {
            let name = name.into();
            if is_glob(&name) {
                set.patterns.push(name);
            } else {
                set.exact.insert(name);
            }
        }
        set
    }

    fn contains(&self, name: &str) -> bool {
        self.exact.contains(name) || self.patterns.iter().any(|p| glob_match(p, name))
    }
}

fn is_glob(name: &str) -> bool {
    name.contains(&['*', '?', '['][..])
}

/// Static rule set deciding which folders, files and extensions are skipped
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    folders: NameSet,
    files: NameSet,
    extensions: HashSet<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_FOLDERS.iter().copied(),
            DEFAULT_EXCLUDED_FILES.iter().copied(),
            DEFAULT_EXCLUDED_EXTENSIONS.iter().copied(),
        )
    }
}

impl ExclusionPolicy {
    /// Build a policy from explicit lists. Extensions are lowercased.
    pub fn new<F, N, E>(folders: F, files: N, extensions: E) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            folders: NameSet::new(folders),
            files: NameSet::new(files),
            extensions: extensions
                .into_iter()
                .map(|e| e.into().to_lowercase())
                .collect(),
        }
    }

    /// A directory is excluded by its name only
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.folders.contains(name)
    }

    /// A file is excluded by exact name or by its extension (with the dot)
    pub fn is_excluded_file(&self, name: &str, extension: &str) -> bool {
        self.files.contains(name)
            || (!extension.is_empty() && self.extensions.contains(&extension.to_lowercase()))
    }

    /// Convenience wrapper deriving name and extension from a path
    pub fn is_excluded_file_path(&self, path: &Path) -> bool {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        self.is_excluded_file(&name, &dotted_extension(path))
    }
}

/// Extension of the last path component including the dot, or an empty string.
///
/// Leading dots do not start an extension (`.env` and `..log` have none), a
/// trailing dot yields `"."`.
pub fn dotted_extension(path: &Path) -> String {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    split_extension(&name).1.to_string()
}

/// Split a file name into stem and dotted extension, ignoring leading dots
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(i) => name.split_at(leading + i),
        None => (name, ""),
    }
}
