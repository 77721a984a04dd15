//! Document loading: turns a source file into one raw text blob.

mod docx;
mod text;

pub use docx::DocxLoader;
pub use text::PlainTextLoader;

use std::path::Path;

use tracing::debug;

use crate::error::DocumentError;
use crate::models::config::DocumentConfig;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Format of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Office Open XML word processing document.
    Docx,
    /// UTF-8 text.
    PlainText,
}

impl DocumentKind {
    /// Determine the format from a path's extension.
    pub fn detect(path: &Path, config: &DocumentConfig) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        if config.is_docx(extension) {
            DocumentKind::Docx
        } else {
            DocumentKind::PlainText
        }
    }
}

/// Trait for document loaders.
pub trait DocumentLoader {
    /// Load a document and linearize it into text.
    ///
    /// Paragraphs and table cells each end with a line break, in document
    /// order.
    fn load(&self, path: &Path) -> Result<String>;
}

/// Load a document with the loader matching its extension.
pub fn load_document(path: &Path, config: &DocumentConfig) -> Result<String> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.display().to_string()));
    }

    let kind = DocumentKind::detect(path, config);
    debug!("Loading {} as {:?}", path.display(), kind);

    let text = match kind {
        DocumentKind::Docx => DocxLoader::new()
            .with_tables(config.include_tables)
            .load(path)?,
        DocumentKind::PlainText => PlainTextLoader.load(path)?,
    };

    debug!("Loaded {} characters from {}", text.len(), path.display());

    Ok(text)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| DocumentError::Read {
        path: path.display().to_string(),
        source,
    })
}
