//! File Utility Functions

use crate::error::*;
use std::path::{Path, PathBuf};

/// Extension of binary array files.
pub const ARRAY_FILE_EXTENSION: &str = ".bin";

/// Returns the absolute path after resolving the given path.
///
/// * `path` - The path.
pub fn absolute_path(path: &str) -> Result<String> {
    PathBuf::from(path)
        .canonicalize()?
        .into_os_string()
        .into_string()
        .map_err(|_| Error::InvalidArgument(format!("path {path} is not valid UTF-8")))
}

/// Returns the lowercase extension of a file name including the leading `.`.
///
/// * `path` - The path.
pub fn get_extension_from_filename(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Returns true if the path names a binary array file rather than a text
/// float file.
///
/// * `path` - The path.
pub fn is_array_file(path: &str) -> bool {
    get_extension_from_filename(path).as_deref() == Some(ARRAY_FILE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension() {
        assert_eq!(get_extension_from_filename("h.BIN").as_deref(), Some(".bin"));
        assert_eq!(get_extension_from_filename("dir/e.txt").as_deref(), Some(".txt"));
        assert_eq!(get_extension_from_filename("noext"), None);
    }

    #[test]
    fn array_files_by_extension() {
        assert!(is_array_file("out/E.Bin"));
        assert!(!is_array_file("E.txt"));
        assert!(!is_array_file("E"));
    }

    #[test]
    fn absolute_path_of_missing_file() {
        assert!(matches!(
            absolute_path("/definitely/not/here.txt"),
            Err(Error::Io(_))
        ));
    }
}
