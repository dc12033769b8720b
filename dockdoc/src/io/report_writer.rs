//! Report output.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::report::{Report, render_markdown};
use crate::io::write_atomic;

/// Render `report` and atomically replace the file at `path`.
pub fn write_report(path: &Path, report: &Report) -> Result<()> {
    let markdown = render_markdown(report);
    write_atomic(path, &markdown).with_context(|| format!("write report {}", path.display()))?;
    info!(
        path = %path.display(),
        commands = report.commands.len(),
        files = report.files.len(),
        "wrote report"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ExplanationEntry;
    use std::fs;

    #[test]
    fn overwrites_existing_report_without_leaving_temp_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("README.md");
        fs::write(&path, "stale").expect("seed");

        let report = Report {
            commands: vec![ExplanationEntry::new("FROM alpine", "Base image.")],
            files: Vec::new(),
        };
        write_report(&path, &report).expect("write");

        let written = fs::read_to_string(&path).expect("read");
        assert!(written.starts_with("# Dockerfile Command Analysis"));
        assert!(!temp.path().join("README.md.tmp").exists());
    }

    #[test]
    fn creates_missing_parent_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("docs").join("build.md");
        write_report(&path, &Report::default()).expect("write");
        assert!(path.exists());
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "file, not a dir").expect("write");
        let err = write_report(&blocker.join("README.md"), &Report::default()).unwrap_err();
        assert!(err.to_string().contains("write report"));
    }
}
