pub mod images;
pub mod lopdf_backend;

use crate::error::ExtractError;

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageText {
    /// 1-based page number.
    pub page_number: usize,
    pub text: String,
}

impl PageText {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

/// An image found while scanning the document.
#[derive(Debug, Clone)]
pub struct ImageCandidate {
    /// 1-based page number the image appears on.
    pub page_number: usize,
    pub width: u32,
    pub height: u32,
    /// Stored stream bytes, still in their source encoding.
    pub data: Vec<u8>,
    /// Stream filter name (`DCTDecode`, `FlateDecode`, ...), if declared.
    pub filter: Option<String>,
    /// True when the stream points at an external file instead of
    /// carrying bytes.
    pub external: bool,
}

/// Trait for PDF extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageText per page.
    ///
    /// Pages without extractable text yield an empty string rather than
    /// an error; only a document that cannot be opened at all fails.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractError>;

    /// Enumerate image XObjects across all pages.
    fn scan_images(&self, pdf_bytes: &[u8]) -> Result<Vec<ImageCandidate>, ExtractError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
