//! Batch source reading.

use std::fs;
use std::path::Path;

use crate::error::{AppError, EXIT_IO};

/// Read every line of a batch file.
///
/// A missing, unreadable or non-UTF-8 file is a single up-front error; nothing is
/// generated in that case.
pub fn read_batch_source(path: &Path) -> Result<Vec<String>, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to read batch file '{}': {e}", path.display())))?;
    Ok(text.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        fs::write(&path, "https://a.example\r\n\nhello world\n").unwrap();

        let lines = read_batch_source(&path).unwrap();

        assert_eq!(lines, vec!["https://a.example", "", "hello world"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_batch_source(&dir.path().join("nope.txt")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IO);
        assert!(err.to_string().contains("nope.txt"));
    }
}
