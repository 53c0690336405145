//! Error types for the comex-core library.

use thiserror::Error;

use crate::models::template::DocumentType;

/// Main error type for the comex library.
#[derive(Error, Debug)]
pub enum ComexError {
    /// Client/order store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Template registry error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the client/order store.
///
/// All of these are reported before the store is mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A required client field is missing or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// No client with this identifier.
    #[error("client not found: {0}")]
    ClientNotFound(String),

    /// No order with this identifier under the given client.
    #[error("order {order_id} not found for client {client_id}")]
    OrderNotFound { client_id: String, order_id: String },

    /// A template was supplied for a document type the client has not selected.
    #[error("document type {0} is not selected for this client")]
    DocumentTypeNotSelected(DocumentType),

    /// Imported data does not have the export shape.
    #[error("invalid import data: {0}")]
    InvalidImport(String),
}

/// Errors related to field extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The file extension has no handler.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A handler failed on a file.
    #[error("failed to extract {file}: {reason}")]
    Failed { file: String, reason: String },
}

/// Errors related to the template registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The document kind is not one of the registered types.
    #[error("document kind not found: {0}")]
    KindNotFound(String),
}

/// Result type for the comex library.
pub type Result<T> = std::result::Result<T, ComexError>;
