//! The "process documents" unit of work: extract, merge and score a batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::confidence;
use crate::extraction::FieldExtractor;
use crate::models::client::UploadedFile;
use crate::models::config::ExtractionConfig;
use crate::models::extracted::ExtractedData;

/// Outcome of processing one batch of files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub success: bool,
    pub extracted_data: ExtractedData,
    /// Mean of the per-file scores, 0-100.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub processing_time_ms: u64,
}

/// Runs extraction and scoring over a batch of uploaded files.
pub struct DocumentProcessor {
    extractor: FieldExtractor,
    isolate_failures: bool,
}

impl DocumentProcessor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            extractor: FieldExtractor::from_config(config),
            isolate_failures: config.isolate_failures,
        }
    }

    /// Use a preconfigured extractor.
    pub fn with_extractor(mut self, extractor: FieldExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    /// Process files strictly in order.
    ///
    /// By default the first failing file aborts the batch: the result is
    /// unsuccessful, carries an empty record and zero confidence. With
    /// failure isolation the failing file is skipped and reported in
    /// `errors`, and the rest of the batch still merges.
    pub async fn process_documents(&self, files: &[UploadedFile]) -> ProcessingResult {
        let start = Utc::now();
        info!("Processing {} files", files.len());

        let mut merged = ExtractedData::new();
        let mut scores = Vec::with_capacity(files.len());
        let mut errors = Vec::new();

        for file in files {
            match self.extractor.extract_file(file) {
                Ok(data) => {
                    scores.push(confidence::score(&data));
                    merged.merge_from(&data);
                }
                Err(e) if self.isolate_failures => {
                    warn!("Skipping {}: {}", file.name, e);
                    errors.push(format!("{}: {}", file.name, e));
                }
                Err(e) => {
                    warn!("Batch aborted at {}: {}", file.name, e);
                    return ProcessingResult {
                        success: false,
                        extracted_data: ExtractedData::new(),
                        confidence: 0.0,
                        errors: vec![e.to_string()],
                        processing_time_ms: elapsed_ms(start),
                    };
                }
            }
        }

        let confidence = confidence::average(&scores);
        info!(
            "Processed {} of {} files, confidence {:.1}",
            scores.len(),
            files.len(),
            confidence
        );

        ProcessingResult {
            success: true,
            extracted_data: merged,
            confidence,
            errors,
            processing_time_ms: elapsed_ms(start),
        }
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

/// Milliseconds since `start`, from the wall clock so it also works in the
/// browser.
pub fn elapsed_ms(start: DateTime<Utc>) -> u64 {
    u64::try_from((Utc::now() - start).num_milliseconds()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pdf(name: &str, content: &str) -> UploadedFile {
        UploadedFile::new(name, "application/pdf", content.len() as u64).with_content(content)
    }

    #[tokio::test]
    async fn test_successful_batch() {
        let files = vec![
            pdf("a.pdf", "Invoice Nr.: 12345\nDate: 08/28/2025"),
            pdf("b.pdf", "SELLER: Australis Mar S.A.\nBUYER: JSC RUSSIAN FISH COMPANY"),
        ];

        let result = DocumentProcessor::default().process_documents(&files).await;

        assert!(result.success);
        assert!(result.errors.is_empty());
        assert_eq!(result.extracted_data.invoice_number.as_deref(), Some("12345"));
        assert_eq!(result.extracted_data.buyer_name.as_deref(), Some("JSC RUSSIAN FISH COMPANY"));
        // Each file fills half of the important fields.
        assert_eq!(result.confidence, 50.0);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let result = DocumentProcessor::default().process_documents(&[]).await;
        assert!(result.success);
        assert_eq!(result.confidence, 0.0);
        assert!(result.extracted_data.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_file_aborts_batch() {
        let files = vec![
            pdf("a.pdf", "Invoice Nr.: 12345"),
            UploadedFile::new("bundle.zip", "application/zip", 10),
        ];

        let result = DocumentProcessor::default().process_documents(&files).await;

        assert!(!result.success);
        assert!(result.extracted_data.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.errors, vec!["unsupported file format: zip".to_string()]);
    }

    #[tokio::test]
    async fn test_isolated_failure_keeps_rest_of_batch() {
        let config = ExtractionConfig {
            isolate_failures: true,
            ..Default::default()
        };
        let files = vec![
            UploadedFile::new("bundle.zip", "application/zip", 10),
            pdf("a.pdf", "Invoice Nr.: 12345"),
        ];

        let result = DocumentProcessor::new(&config).process_documents(&files).await;

        assert!(result.success);
        assert_eq!(result.extracted_data.invoice_number.as_deref(), Some("12345"));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("bundle.zip"));
        assert_eq!(result.confidence, 25.0);
    }
}
