//! Turning raw bytes into [`UploadedFile`]s.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::client::UploadedFile;

const PDF_MAGIC: &[u8] = b"%PDF";

/// MIME type declared for a file name, by extension.
pub fn mime_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "json" => "application/json",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Text content of a file's bytes.
///
/// Real PDFs go through the PDF text extractor; anything else, including a
/// PDF the extractor rejects, is read as lossy UTF-8.
pub fn text_content(name: &str, bytes: &[u8]) -> String {
    if bytes.starts_with(PDF_MAGIC) {
        #[cfg(feature = "native")]
        match pdf_extract::extract_text_from_mem(bytes) {
            Ok(text) => {
                debug!("Extracted {} characters of PDF text from {}", text.len(), name);
                return text;
            }
            Err(e) => warn!("PDF text extraction failed for {}: {}", name, e),
        }
        #[cfg(not(feature = "native"))]
        warn!("No PDF text extractor in this build, reading {} as text", name);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

impl UploadedFile {
    /// Wrap in-memory bytes as an upload with text content.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        let name = name.into();
        let content = text_content(&name, bytes);
        let mime = mime_type_for(&name);
        UploadedFile::new(name, mime, bytes.len() as u64).with_content(content)
    }

    /// Read a file from disk as an upload.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_bytes(name, &bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type_for("invoice.PDF"), "application/pdf");
        assert_eq!(mime_type_for("lines.csv"), "text/csv");
        assert_eq!(mime_type_for("bundle.zip"), "application/zip");
        assert_eq!(mime_type_for("README"), "application/octet-stream");
    }

    #[test]
    fn test_text_file_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.pdf");
        std::fs::write(&path, "Invoice Nr.: 12345\n").unwrap();

        let file = UploadedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "invoice.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.size, 19);
        assert_eq!(file.content.as_deref(), Some("Invoice Nr.: 12345\n"));
    }

    #[test]
    fn test_missing_file() {
        assert!(UploadedFile::from_path(Path::new("/nonexistent/invoice.pdf")).is_err());
    }
}
