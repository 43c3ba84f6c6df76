use anyhow::{Result, Context};
use std::fs;
use std::io::Read;
use std::path::Path;

// @module: Input and output file helpers

/// Path value that selects standard input
pub const STDIN_MARKER: &str = "-";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    /// Read the text to translate from a file, or from stdin when the path is `-`
    pub fn read_input<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        if path.as_os_str() == STDIN_MARKER {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read from stdin")?;
            return Ok(content);
        }

        if !Self::file_exists(path) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", path));
        }
        Self::read_to_string(path)
    }

    /// Write a string to a file, creating parent directories as needed
    pub fn write_string<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write file: {:?}", path))
    }
}
