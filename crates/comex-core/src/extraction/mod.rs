//! Field extraction from uploaded files.

mod parser;
pub mod rules;
mod shipping;

pub use parser::PatternExtractor;
pub use shipping::ShippingLayoutExtractor;

use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::client::UploadedFile;
use crate::models::config::{ExtractionConfig, ExtractionProfile};
use crate::models::extracted::ExtractedData;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for text-to-record extractors.
pub trait TextExtractor {
    /// Populate a record from raw document text. Fields without a match stay
    /// absent.
    fn extract(&self, text: &str) -> ExtractedData;
}

/// File formats with a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Excel,
    Word,
    Csv,
}

impl FileFormat {
    /// Format from a lower-case extension.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext {
            "pdf" => Ok(FileFormat::Pdf),
            "xlsx" | "xls" => Ok(FileFormat::Excel),
            "docx" | "doc" => Ok(FileFormat::Word),
            "csv" => Ok(FileFormat::Csv),
            other => Err(ExtractionError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Format of an uploaded file, judged by its name.
    pub fn of_file(file: &UploadedFile) -> Result<Self> {
        let ext = file.extension().unwrap_or_default();
        Self::from_extension(&ext)
    }
}

/// Dispatches files to per-format handlers and merges the results.
pub struct FieldExtractor {
    profile: ExtractionProfile,
    generic: PatternExtractor,
    shipping: ShippingLayoutExtractor,
}

impl FieldExtractor {
    /// Create an extractor with the generic PDF rules.
    pub fn new() -> Self {
        Self {
            profile: ExtractionProfile::Generic,
            generic: PatternExtractor::new(),
            shipping: ShippingLayoutExtractor::new(),
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_profile(config.profile)
    }

    /// Set the rule set used for PDF text.
    pub fn with_profile(mut self, profile: ExtractionProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Extract fields from raw text with the active PDF rules.
    pub fn extract(&self, text: &str) -> ExtractedData {
        match self.profile {
            ExtractionProfile::Generic => self.generic.extract(text),
            ExtractionProfile::Shipping => self.shipping.extract(text),
        }
    }

    /// Extract fields from one file, dispatching on its extension.
    pub fn extract_file(&self, file: &UploadedFile) -> Result<ExtractedData> {
        let format = FileFormat::of_file(file)?;
        debug!("Extracting {} as {:?}", file.name, format);

        let data = match format {
            FileFormat::Pdf => self.extract(file.content.as_deref().unwrap_or("")),
            // Spreadsheet, word processor and CSV handlers are not implemented.
            FileFormat::Excel | FileFormat::Word | FileFormat::Csv => ExtractedData::new(),
        };

        Ok(data)
    }

    /// Extract every file in order and merge the results.
    ///
    /// Merging is first-writer-wins for scalars and concatenation for lists,
    /// so file order matters. Any failing file aborts the whole batch and
    /// nothing is returned.
    pub fn extract_batch(&self, files: &[UploadedFile]) -> Result<ExtractedData> {
        info!("Extracting batch of {} files", files.len());

        let mut merged = ExtractedData::new();
        for file in files {
            let data = self.extract_file(file)?;
            merged.merge_from(&data);
        }

        Ok(merged)
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}
