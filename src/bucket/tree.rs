//! Extraction tree walking and installer path mapping

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{self, Result};

/// A regular file found in the raw extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Path relative to the extraction root
    pub relative: PathBuf,
    /// Absolute path on disk
    pub absolute: PathBuf,
    /// Lookup key, see [`path_key`]
    pub key: String,
}

/// Every regular file below an extraction root
#[derive(Debug, Clone)]
pub struct ExtractedTree {
    pub files: Vec<ExtractedFile>,
    /// Path key to position in `files`, first match wins
    index: HashMap<String, usize>,
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['\\', '/']).filter(|s| !s.is_empty() && *s != ".")
}

fn strip_braces(segment: &str) -> String {
    segment.replace(['{', '}'], "")
}

/// A segment that stays a single plain directory or file name on this platform
fn contained(segment: String) -> Option<String> {
    let mut components = Path::new(&segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(segment),
        _ => None,
    }
}

/// Normalized key used to match script paths against disk paths
///
/// Braces are dropped and case folded so `{app}\Bin\a.dll` and the renamed
/// `app/bin/a.dll` produce the same key.
pub fn path_key(path: &str) -> String {
    segments(path)
        .map(|s| strip_braces(s).to_lowercase())
        .collect::<Vec<_>>()
        .join("\\")
}

/// Remove innounp's duplicate suffix: `tool,2.exe` becomes `tool.exe`
pub fn strip_variant_suffix(file_name: &str) -> String {
    let (stem, ext) = match file_name.rfind('.') {
        Some(dot) if dot > 0 => file_name.split_at(dot),
        _ => (file_name, ""),
    };
    match stem.rsplit_once(',') {
        Some((base, n))
            if !base.is_empty() && !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) =>
        {
            format!("{base}{ext}")
        }
        _ => file_name.to_string(),
    }
}

/// Installer placeholders that map onto the root of an output tree
#[derive(Debug, Clone)]
pub struct Placeholders {
    app: String,
}

impl Placeholders {
    pub fn new(app_placeholder: &str) -> Self {
        Self {
            app: strip_braces(app_placeholder).to_lowercase(),
        }
    }

    /// Map an installer path to a path relative to an output tree
    ///
    /// A leading application placeholder is dropped; other `{name}`
    /// segments become plain `name` directories. `None` when a segment
    /// would leave the tree (`..`, a drive or root prefix).
    pub fn to_relative(&self, installer_path: &str) -> Option<PathBuf> {
        let mut parts = segments(installer_path).peekable();
        if parts
            .peek()
            .is_some_and(|first| strip_braces(first).to_lowercase() == self.app)
        {
            parts.next();
        }
        parts.map(|part| contained(strip_braces(part))).collect()
    }
}

/// Map a `DestName` to a relative path, split on either separator
///
/// `None` when the name is empty or a segment would leave the tree.
pub fn dest_name_path(dest_name: &str) -> Option<PathBuf> {
    let path = segments(dest_name)
        .map(|part| contained(part.to_string()))
        .collect::<Option<PathBuf>>()?;
    (!path.as_os_str().is_empty()).then_some(path)
}

impl Default for Placeholders {
    fn default() -> Self {
        Self::new("{app}")
    }
}

impl ExtractedTree {
    /// Walk `root` and record every regular file
    pub fn walk(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(error::fs::extraction_not_found(root));
        }

        let mut files = Vec::new();
        let mut index = HashMap::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| error::fs::walk_failed(root, e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let absolute = entry.path().to_path_buf();
            let relative = absolute
                .strip_prefix(root)
                .unwrap_or(&absolute)
                .to_path_buf();
            let key = path_key(&relative.to_string_lossy());
            index.entry(key.clone()).or_insert(files.len());
            files.push(ExtractedFile {
                relative,
                absolute,
                key,
            });
        }

        if files.is_empty() {
            return Err(error::fs::extraction_empty(root));
        }

        Ok(Self { files, index })
    }

    /// Position of the file matching an installer path
    pub fn find(&self, installer_path: &str) -> Option<usize> {
        self.index.get(&path_key(installer_path)).copied()
    }
}
