//! Clients, their orders, and the files and documents an order owns.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::extracted::ExtractedData;
use super::template::{DocumentTemplate, DocumentType};

/// An importer/exporter for whom documents are generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: String,
    /// Documents generated for this client's orders, in selection order.
    #[serde(default)]
    pub document_types: Vec<DocumentType>,
    /// Possibly customized template per selected document type.
    #[serde(default)]
    pub templates: BTreeMap<DocumentType, DocumentTemplate>,
    #[serde(default)]
    pub orders: Vec<Order>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Find one of this client's orders.
    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Template for a document type, if the type is selected.
    pub fn template(&self, kind: DocumentType) -> Option<&DocumentTemplate> {
        self.templates.get(&kind)
    }

    /// Whether every template key is also a selected document type.
    pub fn templates_consistent(&self) -> bool {
        self.templates.keys().all(|k| self.document_types.contains(k))
    }
}

/// Fields supplied when creating a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub document_types: Vec<DocumentType>,
}

/// Lifecycle of an order.
///
/// Only New → InProgress is driven by the application; Completed and
/// Cancelled are set by callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(alias = "Nueva")]
    New,
    #[serde(alias = "En proceso")]
    InProgress,
    #[serde(alias = "Completada")]
    Completed,
    #[serde(alias = "Cancelada")]
    Cancelled,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::InProgress => "In progress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// One shipment under a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Display number, `ORD-<year>-<seq>`. Unique within a client only.
    pub number: String,
    /// Owning client, by identifier.
    pub client_id: String,
    pub date: NaiveDate,
    pub status: OrderStatus,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
    #[serde(default)]
    pub generated_docs: Vec<GeneratedDocument>,
    #[serde(default)]
    pub extracted_data: ExtractedData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A file handed to the extractor.
///
/// The text content only lives for the duration of processing; it is never
/// written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    /// Declared MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    #[serde(default, skip_serializing)]
    pub content: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl UploadedFile {
    /// Wrap a file with a fresh identifier and upload timestamp.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            content: None,
            uploaded_at: Utc::now(),
        }
    }

    /// Attach raw text content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Copy of the file without its text content.
    pub fn without_content(&self) -> Self {
        Self {
            content: None,
            ..self.clone()
        }
    }

    /// Lower-cased text after the last dot of the file name.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
    }
}

/// A document produced for an order, ready for an external renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub name: String,
    /// Identifier of the template the renderer lays this document out with.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    pub generated_at: DateTime<Utc>,
}
