//! Plain text loader.

use std::path::Path;

use crate::error::DocumentError;

use super::{read_file, DocumentLoader, Result};

/// Loads UTF-8 text files as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextLoader;

impl DocumentLoader for PlainTextLoader {
    fn load(&self, path: &Path) -> Result<String> {
        let data = read_file(path)?;
        String::from_utf8(data).map_err(|_| DocumentError::Encoding(path.display().to_string()))
    }
}
