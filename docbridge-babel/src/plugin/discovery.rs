//! Discovery of manifest plugins in directories.

use super::manifest::ManifestPlugin;
use super::registry::PluginRegistry;
use crate::error::{BabelError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

const MANIFEST_EXT: &str = "toml";

/// Directory names never searched
const SKIPPED_DIRS: &[&str] = &["test", "tests"];

fn is_skipped(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('_') || name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && SKIPPED_DIRS.contains(&name.as_ref())
}

/// Manifest files below `dir`, sorted. A missing directory yields nothing.
///
/// Entries that cannot be read, such as an unreadable subdirectory or a dangling link, fail
/// the whole scan.
pub fn manifest_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "plugin directory does not exist");
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry))
    {
        let entry = entry.map_err(walk_error)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if path.extension().is_some_and(|ext| ext == MANIFEST_EXT) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn walk_error(err: walkdir::Error) -> BabelError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    match err.into_io_error() {
        Some(io) if path.as_os_str().is_empty() => BabelError::Io(io),
        Some(io) => BabelError::PluginManifest {
            path,
            reason: io.to_string(),
        },
        None => BabelError::PluginManifest {
            path,
            reason: "filesystem loop".to_string(),
        },
    }
}

/// Load every manifest found below `dirs` into `registry`.
///
/// Plugins already in the registry are not added twice. Returns the number of plugins added.
pub fn discover_plugins<P: AsRef<Path>>(dirs: &[P], registry: &mut PluginRegistry) -> Result<usize> {
    let mut added = 0;
    for dir in dirs {
        for path in manifest_files(dir.as_ref())? {
            debug!(manifest = %path.display(), "loading plugin manifest");
            let plugin = ManifestPlugin::from_file(&path)?;
            if registry.add(plugin) {
                added += 1;
            }
        }
    }
    Ok(added)
}
