//! Photo byte loading.
//!
//! The camera pipeline hands over an image reference (a file path); the
//! form controller only ever sees the raw bytes behind it.

use std::fs;
use std::io;
use std::path::Path;

/// Read the contents of a captured image into raw bytes.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be read.
pub fn read_image_bytes(path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
    fs::read(path)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let bytes = read_image_bytes(file.path()).unwrap();
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_image_bytes("/no/such/image.jpg").is_err());
    }
}
