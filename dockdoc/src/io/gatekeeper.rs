//! Eligibility checks for files referenced by copy steps.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::warn;

/// Number of leading bytes inspected for null bytes.
pub const SNIFF_LEN: u64 = 1024;

/// Why a referenced file was or was not selected for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileVerdict {
    Eligible,
    Missing,
    Binary,
}

impl FileVerdict {
    pub fn is_eligible(self) -> bool {
        self == FileVerdict::Eligible
    }
}

/// Decide whether `path` should be sent for content explanation.
pub fn check_file(path: &Path) -> FileVerdict {
    if !path.exists() {
        return FileVerdict::Missing;
    }
    if is_binary_file(path) {
        FileVerdict::Binary
    } else {
        FileVerdict::Eligible
    }
}

/// Returns true if the first [`SNIFF_LEN`] bytes contain a null byte.
///
/// Any I/O failure (permissions, directories, ...) counts as binary so the
/// file is skipped rather than aborting the run.
pub fn is_binary_file(path: &Path) -> bool {
    match sniff_for_null(path) {
        Ok(found) => found,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot inspect file, treating as binary");
            true
        }
    }
}

fn sniff_for_null(path: &Path) -> io::Result<bool> {
    let mut chunk = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut chunk)?;
    Ok(chunk.contains(&0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn text_file_is_eligible() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.py");
        fs::write(&path, "print('hi')\n").expect("write");
        assert_eq!(check_file(&path), FileVerdict::Eligible);
    }

    #[test]
    fn empty_file_is_eligible() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("empty");
        fs::write(&path, "").expect("write");
        assert!(check_file(&path).is_eligible());
    }

    #[test]
    fn missing_file_is_excluded_without_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert_eq!(
            check_file(&temp.path().join("nope.txt")),
            FileVerdict::Missing
        );
    }

    #[test]
    fn null_byte_in_head_is_binary() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("blob.bin");
        let mut bytes = vec![b'a'; 1023];
        bytes.push(0);
        fs::write(&path, bytes).expect("write");
        assert_eq!(check_file(&path), FileVerdict::Binary);
    }

    #[test]
    fn null_byte_past_sniff_window_is_ignored() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("late.bin");
        let mut bytes = vec![b'a'; 1024];
        bytes.push(0);
        fs::write(&path, bytes).expect("write");
        assert_eq!(check_file(&path), FileVerdict::Eligible);
    }

    #[test]
    fn directory_is_treated_as_binary() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("src");
        fs::create_dir_all(&dir).expect("mkdir");
        assert_eq!(check_file(&dir), FileVerdict::Binary);
    }
}
