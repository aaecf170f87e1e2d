use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Reads the text for one-shot commands from a file or stdin.
pub struct InputReader;

impl InputReader {
    pub fn read(file_path: Option<&str>) -> Result<String> {
        file_path.map_or_else(|| Self::read_from(io::stdin().lock()), Self::read_file)
    }

    /// Like [`Self::read`], but rejects input that is empty after trimming.
    pub fn read_text(file_path: Option<&str>) -> Result<String> {
        let text = Self::read(file_path)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            bail!("Error: Input is empty");
        }
        Ok(trimmed.to_string())
    }

    fn read_file(path: &str) -> Result<String> {
        let metadata =
            fs::metadata(path).with_context(|| format!("Failed to access file: {path}"))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(size_error(size, "file"));
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
    }

    fn read_from(reader: impl Read) -> Result<String> {
        let mut buffer = Vec::new();
        // Read one byte past the limit so oversized input is detectable.
        reader
            .take(MAX_INPUT_SIZE as u64 + 1)
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;

        if buffer.len() > MAX_INPUT_SIZE {
            bail!(size_error(buffer.len(), "input"));
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn size_error(size: usize, what: &str) -> String {
    format!(
        "Error: Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
         Consider splitting the {what} into smaller parts.",
        size as f64 / 1024.0 / 1024.0
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Hello, World!").unwrap();

        let content = InputReader::read(Some(temp_file.path().to_str().unwrap())).unwrap();
        assert_eq!(content.trim(), "Hello, World!");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = InputReader::read(Some("/nonexistent/path/to/file.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_text_trims() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "\n  Bom dia  \n").unwrap();

        let content = InputReader::read_text(Some(temp_file.path().to_str().unwrap())).unwrap();
        assert_eq!(content, "Bom dia");
    }

    #[test]
    fn test_read_text_rejects_blank() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "   \n\t").unwrap();

        let result = InputReader::read_text(Some(temp_file.path().to_str().unwrap()));
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_read_file_exceeds_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("large_file.txt");
        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE + 1)).unwrap();

        let result = InputReader::read(Some(file_path.to_str().unwrap()));
        assert!(result.unwrap_err().to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_read_from_reader_limits_size() {
        let big = vec![b'x'; MAX_INPUT_SIZE + 10];
        let result = InputReader::read_from(&big[..]);
        assert!(result.unwrap_err().to_string().contains("exceeds maximum"));

        let ok = InputReader::read_from(&b"hello"[..]).unwrap();
        assert_eq!(ok, "hello");
    }

    #[test]
    fn test_read_from_rejects_invalid_utf8() {
        let result = InputReader::read_from(&[0xff, 0xfe][..]);
        assert!(result.is_err());
    }
}
