//! DOCX loader using docx-rs.

use std::path::Path;

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, TableCellContent, TableChild,
    TableRowChild,
};

use crate::error::DocumentError;

use super::{read_file, DocumentLoader, Result};

/// Linearizes a Word document into paragraph and table cell lines.
#[derive(Debug, Clone)]
pub struct DocxLoader {
    /// Whether table cell text is included.
    pub include_tables: bool,
}

impl DocxLoader {
    /// Create a new DOCX loader with default settings.
    pub fn new() -> Self {
        Self {
            include_tables: true,
        }
    }

    /// Enable or disable table cell text.
    pub fn with_tables(mut self, enabled: bool) -> Self {
        self.include_tables = enabled;
        self
    }

    /// Linearize an in-memory DOCX document.
    pub fn load_bytes(&self, data: &[u8]) -> Result<String> {
        let docx = read_docx(data).map_err(|e| DocumentError::Docx(e.to_string()))?;

        let mut content = String::new();

        for child in docx.document.children {
            match child {
                DocumentChild::Paragraph(para) => {
                    content.push_str(&paragraph_text(&para));
                    content.push('\n');
                }
                DocumentChild::Table(tbl) if self.include_tables => {
                    for row in &tbl.rows {
                        let TableChild::TableRow(tr) = row;

                        for cell in &tr.cells {
                            let TableRowChild::TableCell(tc) = cell;

                            let paragraphs: Vec<String> = tc
                                .children
                                .iter()
                                .filter_map(|child| match child {
                                    TableCellContent::Paragraph(para) => Some(paragraph_text(para)),
                                    _ => None,
                                })
                                .collect();

                            content.push_str(&paragraphs.join("\n"));
                            content.push('\n');
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(content)
    }
}

impl Default for DocxLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader for DocxLoader {
    fn load(&self, path: &Path) -> Result<String> {
        let data = read_file(path)?;
        self.load_bytes(&data)
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&mut text, &para.children);
    text
}

/// Append run text, walking into hyperlinks. Tabs become `\t` and line
/// breaks become `\n`.
fn push_children(text: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) | RunChild::CarriageReturn(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children(text, &link.children),
            _ => {}
        }
    }
}
