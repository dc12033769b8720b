//! Loading and grouping a build file from disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::core::grouper::group_lines;
use crate::core::types::GroupedBuildFile;

/// A grouped build file together with the directory its paths resolve against.
#[derive(Debug, Clone)]
pub struct LoadedBuildFile {
    pub path: PathBuf,
    pub base_dir: PathBuf,
    pub grouped: GroupedBuildFile,
}

impl LoadedBuildFile {
    /// Resolve a referenced path against the build file's directory.
    pub fn resolve(&self, referenced: &str) -> PathBuf {
        self.base_dir.join(referenced)
    }
}

/// Read and group the build file at `path`.
///
/// A missing or unreadable file is fatal; callers must not contact the
/// explanation service when this fails.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_build_file(path: &Path) -> Result<LoadedBuildFile> {
    let source =
        fs::read_to_string(path).with_context(|| format!("read build file {}", path.display()))?;
    let grouped = group_lines(&source);
    debug!(
        commands = grouped.commands.len(),
        referenced_paths = grouped.referenced_paths.len(),
        "grouped build file"
    );
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(LoadedBuildFile {
        path: path.to_path_buf(),
        base_dir,
        grouped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_build_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_build_file(&temp.path().join("Dockerfile")).unwrap_err();
        assert!(err.to_string().contains("read build file"));
    }

    #[test]
    fn referenced_paths_resolve_against_build_file_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("svc");
        fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("Dockerfile");
        fs::write(&path, "FROM alpine\nCOPY app.py /app/\n").expect("write");

        let loaded = load_build_file(&path).expect("load");
        assert_eq!(loaded.grouped.commands.len(), 2);
        assert_eq!(loaded.grouped.referenced_paths, vec!["app.py"]);
        assert_eq!(loaded.resolve("app.py"), dir.join("app.py"));
    }
}
