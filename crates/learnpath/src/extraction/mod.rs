//! Plain-text extraction from uploaded course documents

use std::path::Path;

use crate::error::{Error, Result};

/// Trait for document-to-text extraction
///
/// Kept synchronous: extraction is pure CPU + local file reading.
pub trait TextExtractor: Send + Sync {
    /// Extract the full text of the document at `path`
    ///
    /// Fails with [`Error::Extraction`] if the file cannot be opened or
    /// parsed as the expected document format.
    fn extract_text(&self, path: &Path) -> Result<String>;
}

/// Extracts plain text from a paginated PDF document
///
/// Pages are walked in page order and their text concatenated; a page that
/// yields no text contributes an empty string rather than failing the whole
/// document.
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document.pdf")
            .to_string();

        let data = std::fs::read(path)
            .map_err(|e| Error::extraction(&filename, format!("cannot open file: {}", e)))?;

        let doc = lopdf::Document::load_mem(&data)
            .map_err(|e| Error::extraction(&filename, format!("cannot parse PDF: {}", e)))?;

        // BTreeMap keys give us pages in page order
        let mut text = String::new();
        for page_number in doc.get_pages().keys() {
            let page_text = doc.extract_text(&[*page_number]).unwrap_or_default();
            text.push_str(&page_text);
        }

        // Some PDFs defeat lopdf's per-page extraction (unusual encodings,
        // content in form XObjects). Try the whole-document extractor before
        // settling for an empty result.
        if text.trim().is_empty() {
            tracing::debug!("Per-page extraction empty for '{}', trying fallback", filename);
            text = pdf_extract::extract_text_from_mem(&data).unwrap_or_default();
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_extraction_error() {
        let err = DocumentTextExtractor
            .extract_text(Path::new("/nonexistent/syllabus.pdf"))
            .unwrap_err();
        match err {
            Error::Extraction { filename, .. } => assert_eq!(filename, "syllabus.pdf"),
            other => panic!("expected extraction error, got {:?}", other),
        }
    }

    #[test]
    fn garbage_bytes_are_extraction_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let err = DocumentTextExtractor.extract_text(file.path()).unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
    }
}
