//! Pairs extracted data with each of a client's document templates.
//!
//! Assembly does no placeholder substitution; the output is handed to an
//! external renderer.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::client::{Client, GeneratedDocument, Order};
use crate::models::config::{AssemblyConfig, ConfidenceMode};
use crate::models::extracted::ExtractedData;
use crate::models::template::DocumentType;
use crate::registry;

/// One document ready for preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledDocument {
    #[serde(rename = "type")]
    pub kind: DocumentType,
    /// Display name from the registry.
    pub name: String,
    pub icon: String,
    pub color: String,
    /// Identifier of the client's template for this type.
    pub template_id: String,
    pub data: ExtractedData,
    pub generated: bool,
    /// 0-100.
    pub confidence: f64,
}

impl AssembledDocument {
    /// Persistable record of this document for an order.
    pub fn to_generated(&self, order: &Order, at: DateTime<Utc>) -> GeneratedDocument {
        GeneratedDocument {
            id: uuid::Uuid::new_v4().to_string(),
            kind: self.kind,
            name: download_name(&self.name, &order.number),
            content: self.template_id.clone(),
            pdf_url: None,
            generated_at: at,
        }
    }
}

/// Builds one [`AssembledDocument`] per document type a client selected.
pub struct DocumentAssembler {
    config: AssemblyConfig,
}

impl DocumentAssembler {
    pub fn new(config: AssemblyConfig) -> Self {
        Self { config }
    }

    /// Assemble with the thread-local random source.
    pub fn assemble(
        &self,
        client: &Client,
        data: &ExtractedData,
        scored_confidence: f64,
    ) -> Vec<AssembledDocument> {
        self.assemble_with_rng(client, data, scored_confidence, &mut rand::thread_rng())
    }

    /// Assemble drawing display confidences from `rng`.
    ///
    /// `scored_confidence` is only used in [`ConfidenceMode::Scored`].
    pub fn assemble_with_rng<R: Rng + ?Sized>(
        &self,
        client: &Client,
        data: &ExtractedData,
        scored_confidence: f64,
        rng: &mut R,
    ) -> Vec<AssembledDocument> {
        client
            .document_types
            .iter()
            .map(|&kind| {
                let config = registry::get_config(kind);
                let template_id = client
                    .template(kind)
                    .map(|t| t.id.clone())
                    .unwrap_or_else(|| config.default_template.id.clone());

                let confidence = match self.config.confidence_mode {
                    ConfidenceMode::Display => self.display_confidence(rng),
                    ConfidenceMode::Scored => scored_confidence,
                };

                debug!("Assembled {} with confidence {:.1}", kind, confidence);

                AssembledDocument {
                    kind,
                    name: config.name.to_string(),
                    icon: config.icon.to_string(),
                    color: config.color.to_string(),
                    template_id,
                    data: data.clone(),
                    generated: true,
                    confidence,
                }
            })
            .collect()
    }

    fn display_confidence<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let (min, max) = (self.config.display_min, self.config.display_max);
        if max <= min {
            return min;
        }
        rng.gen_range(min..max)
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new(AssemblyConfig::default())
    }
}

/// File name a generated document would be downloaded as.
pub fn download_name(document_name: &str, order_number: &str) -> String {
    format!("{}_{}.pdf", document_name, order_number)
}

/// File names for downloading every assembled document of an order.
pub fn download_listing(documents: &[AssembledDocument], order: &Order) -> Vec<String> {
    documents
        .iter()
        .map(|d| download_name(&d.name, &order.number))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_one_document_per_selected_type() {
        let client = sample::sample_client();
        let data = sample::sample_extracted_data();
        let mut rng = StdRng::seed_from_u64(7);

        let docs = DocumentAssembler::default().assemble_with_rng(&client, &data, 60.0, &mut rng);

        let kinds: Vec<DocumentType> = docs.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, client.document_types);
        for doc in &docs {
            assert!(doc.generated);
            assert_eq!(doc.data, data);
            assert!((85.0..95.0).contains(&doc.confidence), "{}", doc.confidence);
        }
        assert_eq!(docs[0].name, "Commercial Invoice");
        assert_eq!(docs[0].icon, "file-text");
        assert_eq!(docs[0].template_id, "default-invoice");
    }

    #[test]
    fn test_scored_mode_uses_scorer_value() {
        let client = sample::sample_client();
        let assembler = DocumentAssembler::new(AssemblyConfig {
            confidence_mode: ConfidenceMode::Scored,
            ..Default::default()
        });

        let docs = assembler.assemble(&client, &ExtractedData::new(), 42.5);
        assert!(docs.iter().all(|d| d.confidence == 42.5));
    }

    #[test]
    fn test_no_document_types_yields_nothing() {
        let mut client = sample::sample_client();
        client.document_types.clear();
        client.templates.clear();
        assert!(DocumentAssembler::default()
            .assemble(&client, &ExtractedData::new(), 0.0)
            .is_empty());
    }

    #[test]
    fn test_download_listing() {
        let client = sample::sample_client();
        let order = Order {
            id: "o1".to_string(),
            number: "ORD-2025-001".to_string(),
            client_id: client.id.clone(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 8, 28).unwrap(),
            status: Default::default(),
            uploaded_files: Vec::new(),
            generated_docs: Vec::new(),
            extracted_data: ExtractedData::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let docs = DocumentAssembler::default().assemble(&client, &ExtractedData::new(), 0.0);

        assert_eq!(
            download_listing(&docs, &order),
            vec![
                "Commercial Invoice_ORD-2025-001.pdf",
                "Packing List_ORD-2025-001.pdf",
                "Price List_ORD-2025-001.pdf",
                "Quality Certificate_ORD-2025-001.pdf",
            ]
        );

        let generated = docs[1].to_generated(&order, Utc::now());
        assert_eq!(generated.kind, DocumentType::PackingList);
        assert_eq!(generated.name, "Packing List_ORD-2025-001.pdf");
        assert_eq!(generated.content, "default-packing");
    }
}
