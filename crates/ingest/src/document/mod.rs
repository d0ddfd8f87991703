pub mod chunker;
mod md;
mod pdf;
mod txt;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("No text could be extracted from {0}")]
    EmptyResult(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page of extracted text with metadata.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number (for PDFs). For TXT/MD, always 1.
    pub page_number: usize,
    pub text: String,
    /// Heading titles, without the leading `#`s (MD only).
    pub headings: Vec<String>,
}

/// Result of extracting text from a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub filename: String,
    /// Normalized file type: "pdf", "txt" or "md".
    pub file_type: String,
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// All page text joined by blank lines, so page breaks read as paragraph breaks.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Total character count across all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.text.chars().count()).sum()
    }

    pub fn is_markdown(&self) -> bool {
        self.file_type == "md"
    }
}

/// Extract text from file bytes based on the extension of `filename`.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let (file_type, pages) = match ext.as_str() {
        "pdf" => ("pdf", pdf::extract_pdf(bytes, filename)?),
        "txt" | "text" => ("txt", txt::extract_txt(bytes)?),
        "md" | "markdown" => ("md", md::extract_md(bytes)?),
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        file_type: file_type.to_string(),
        pages,
    })
}

/// Read and extract a file from disk. The document is named after the file name.
pub fn parse_file(path: &Path) -> Result<ExtractedDocument, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    extract_text(&bytes, &filename)
}
